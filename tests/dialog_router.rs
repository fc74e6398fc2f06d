use ai_assistant::graph::{route, Route};
use ai_assistant::models::{AssistantId, DialogState, Message, ToolCall};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(AssistantId),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Push(AssistantId::General)),
        Just(Op::Push(AssistantId::DirectoryMapper)),
        Just(Op::Pop),
    ]
}

fn tool_name_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("get_resolved_path"),
        Just("get_directory_tree"),
        Just("save_json_to_file"),
        Just("save_json_structure_as_txt"),
        Just("transfer_to_directory_mapper"),
        Just("complete_or_escalate"),
    ]
}

fn calls(names: &[&str]) -> Message {
    Message::assistant_with_tools(
        None,
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ToolCall::function(format!("call_{}", i), *name, "{}"))
            .collect(),
    )
}

proptest! {
    #[test]
    fn stack_depth_never_exceeds_one(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut dialog = DialogState::new();
        for op in ops {
            match op {
                Op::Push(id) => { dialog.push(id); }
                Op::Pop => { dialog.pop(); }
            }
            prop_assert!(dialog.depth() <= 1);
            prop_assert!(!dialog.stack().contains(&AssistantId::General));
            prop_assert_eq!(dialog.depth() == 0, dialog.current() == AssistantId::General);
        }
    }

    #[test]
    fn dialog_state_survives_serialization(ops in prop::collection::vec(op_strategy(), 0..16)) {
        let mut dialog = DialogState::new();
        for op in ops {
            match op {
                Op::Push(id) => { dialog.push(id); }
                Op::Pop => { dialog.pop(); }
            }
        }
        let json = serde_json::to_string(&dialog).unwrap();
        let back: DialogState = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, dialog);
    }

    #[test]
    fn known_names_always_route(
        names in prop::collection::vec(tool_name_strategy(), 1..6),
        in_skill in any::<bool>(),
    ) {
        let mut dialog = DialogState::new();
        if in_skill {
            dialog.push(AssistantId::DirectoryMapper);
        }
        let routed = route(&dialog, &calls(&names));
        prop_assert!(routed.is_ok());

        let first_control = names
            .iter()
            .position(|n| *n == "transfer_to_directory_mapper" || *n == "complete_or_escalate");
        match (first_control, routed.unwrap()) {
            (None, Route::RunTools(id)) => prop_assert_eq!(id, dialog.current()),
            (Some(i), Route::EnterSkill { target, call_id }) => {
                prop_assert_eq!(names[i], "transfer_to_directory_mapper");
                prop_assert_eq!(target, AssistantId::DirectoryMapper);
                prop_assert_eq!(call_id, format!("call_{}", i));
            }
            (Some(i), Route::LeaveSkill { call_id }) => {
                prop_assert_eq!(names[i], "complete_or_escalate");
                prop_assert_eq!(call_id, format!("call_{}", i));
            }
            (first, other) => prop_assert!(false, "unexpected route {:?} for first control {:?}", other, first),
        }
    }
}

#[test]
fn pop_on_empty_stack_is_a_no_op() {
    let mut dialog = DialogState::new();
    assert_eq!(dialog.pop(), AssistantId::General);
    assert_eq!(dialog.depth(), 0);
}

#[test]
fn pushing_the_active_assistant_changes_nothing() {
    let mut dialog = DialogState::new();
    assert!(dialog.push(AssistantId::DirectoryMapper));
    assert!(!dialog.push(AssistantId::DirectoryMapper));
    assert!(!dialog.push(AssistantId::General));
    assert_eq!(dialog.stack(), &[AssistantId::DirectoryMapper]);
}
