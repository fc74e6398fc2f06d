use ai_assistant::config::GraphConfig;
use ai_assistant::error::AssistantError;
use ai_assistant::graph::{nodes, AssistantSet, NoopObserver, TurnEvent, TurnRunner};
use ai_assistant::llm::ScriptedModel;
use ai_assistant::models::{AssistantId, Message, Role, ToolCall};
use ai_assistant::orchestrator::Orchestrator;
use ai_assistant::session::{FilesystemThreadStore, MemoryThreadStore, ThreadStore};
use ai_assistant::tools::{ToolRegistry, ToolSettings};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn settings_for(temp_dir: &TempDir) -> ToolSettings {
    ToolSettings {
        base_dir: temp_dir.path().to_path_buf(),
        restrict_to_base_dir: true,
        max_file_size_bytes: 1024 * 1024,
        ignore_dirs: vec![".git".to_string()],
    }
}

fn orchestrator(
    temp_dir: &TempDir,
    model: Arc<ScriptedModel>,
    limits: GraphConfig,
    store: Box<dyn ThreadStore>,
) -> Orchestrator {
    let runner = TurnRunner::new(
        model,
        ToolRegistry::with_settings(settings_for(temp_dir)),
        AssistantSet::default(),
        limits,
    );
    Orchestrator::new(runner, store, 0)
}

fn call(id: &str, name: &str, arguments: serde_json::Value) -> Message {
    Message::assistant_with_tools(None, vec![ToolCall::function(id, name, arguments.to_string())])
}

fn tool_names(request: &ai_assistant::llm::ChatRequest) -> Vec<String> {
    request
        .tools
        .iter()
        .map(|t| t["function"]["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_map_directory_and_save_as_text() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("project")).unwrap();
    fs::write(temp_dir.path().join("project").join("a.txt"), "a").unwrap();
    let tree = r#"{"name":"project","children":[{"name":"a.txt"}]}"#;

    let model = Arc::new(ScriptedModel::new([
        call("c1", "transfer_to_directory_mapper", json!({ "request": "map project, save as txt" })),
        call("c2", "get_directory_tree", json!({ "path": "project" })),
        call(
            "c3",
            "save_json_structure_as_txt",
            json!({ "json_string": tree, "output_path": "project_tree.txt" }),
        ),
        call("c4", "complete_or_escalate", json!({ "reason": "tree saved" })),
        Message::assistant("Saved the structure to project_tree.txt."),
    ]));
    let orchestrator = orchestrator(
        &temp_dir,
        model.clone(),
        GraphConfig::default(),
        Box::new(MemoryThreadStore::new()),
    );

    let outcome = orchestrator
        .send("t1", "Map my project folder and save it as text", &NoopObserver)
        .await
        .unwrap();

    assert_eq!(outcome.reply, "Saved the structure to project_tree.txt.");
    assert_eq!(outcome.invocations, 5);
    assert!(outcome.events.contains(&TurnEvent::HandedOff {
        from: AssistantId::General,
        to: AssistantId::DirectoryMapper,
    }));
    assert!(outcome.events.contains(&TurnEvent::Returned {
        from: AssistantId::DirectoryMapper,
        to: AssistantId::General,
    }));

    let text = fs::read_to_string(temp_dir.path().join("project_tree.txt")).unwrap();
    assert_eq!(text, "project/\n└── a.txt");

    let requests = model.requests();
    assert_eq!(tool_names(&requests[0]), vec!["transfer_to_directory_mapper"]);
    assert_eq!(
        tool_names(&requests[1]),
        vec![
            "get_resolved_path",
            "get_directory_tree",
            "save_json_to_file",
            "save_json_structure_as_txt",
            "complete_or_escalate",
        ]
    );
    assert_eq!(tool_names(&requests[4]), vec!["transfer_to_directory_mapper"]);
    for request in &requests {
        assert_eq!(request.messages[0].role, Role::System);
    }

    // The tree result reached the mapper before it asked to save
    let tree_result = &requests[2].messages.last().unwrap();
    assert_eq!(tree_result.tool_call_id.as_deref(), Some("c2"));
    assert_eq!(tree_result.text(), tree);

    let thread = orchestrator.store().load("t1").unwrap().unwrap();
    assert_eq!(thread.dialog.current(), AssistantId::General);
    assert_eq!(thread.messages.len(), 10);
    assert_eq!(thread.messages[0].role, Role::User);
    assert_eq!(thread.messages[9].text(), outcome.reply);
    let answered: Vec<_> = thread
        .messages
        .iter()
        .filter_map(|m| m.tool_call_id.as_deref())
        .collect();
    assert_eq!(answered, vec!["c1", "c2", "c3", "c4"]);
}

#[tokio::test]
async fn test_specialist_keeps_control_across_turns() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::new([
        call("c1", "transfer_to_directory_mapper", json!({ "request": "map a folder" })),
        Message::assistant("Which folder should I map?"),
        Message::assistant("Mapping it now."),
    ]));
    let orchestrator = orchestrator(
        &temp_dir,
        model.clone(),
        GraphConfig::default(),
        Box::new(MemoryThreadStore::new()),
    );

    let first = orchestrator.send("t", "map a folder", &NoopObserver).await.unwrap();
    assert_eq!(first.reply, "Which folder should I map?");
    let thread = orchestrator.store().load("t").unwrap().unwrap();
    assert_eq!(thread.dialog.current(), AssistantId::DirectoryMapper);

    orchestrator.send("t", "the docs folder", &NoopObserver).await.unwrap();
    let requests = model.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[2].messages[0].text().contains("mapping directory"));
    assert!(tool_names(&requests[2]).contains(&"complete_or_escalate".to_string()));
}

#[tokio::test]
async fn test_control_call_skips_sibling_calls() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::new([
        Message::assistant_with_tools(
            None,
            vec![
                ToolCall::function("c1", "get_directory_tree", r#"{"path":"."}"#),
                ToolCall::function("c2", "transfer_to_directory_mapper", r#"{"request":"map"}"#),
            ],
        ),
        Message::assistant("Which folder?"),
    ]));
    let orchestrator = orchestrator(
        &temp_dir,
        model,
        GraphConfig::default(),
        Box::new(MemoryThreadStore::new()),
    );

    orchestrator.send("t", "map stuff", &NoopObserver).await.unwrap();
    let thread = orchestrator.store().load("t").unwrap().unwrap();

    assert_eq!(thread.messages[2].tool_call_id.as_deref(), Some("c1"));
    assert!(thread.messages[2].text().starts_with("Error:"));
    assert_eq!(thread.messages[3].tool_call_id.as_deref(), Some("c2"));
    assert!(thread.messages[3].text().contains("directory mapping assistant"));
    assert_eq!(thread.dialog.current(), AssistantId::DirectoryMapper);
}

#[tokio::test]
async fn test_empty_reply_is_retried_once_with_transient_directive() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::new([
        Message::assistant(""),
        Message::assistant("Hello there."),
    ]));
    let orchestrator = orchestrator(
        &temp_dir,
        model.clone(),
        GraphConfig::default(),
        Box::new(MemoryThreadStore::new()),
    );

    let outcome = orchestrator.send("t", "hi", &NoopObserver).await.unwrap();
    assert_eq!(outcome.reply, "Hello there.");
    assert_eq!(outcome.invocations, 2);
    assert!(outcome.events.contains(&TurnEvent::RetriedEmpty {
        assistant: AssistantId::General,
        attempt: 1,
    }));

    let requests = model.requests();
    let directive = requests[1].messages.last().unwrap();
    assert_eq!(directive.role, Role::User);
    assert_eq!(directive.text(), nodes::RETRY_DIRECTIVE);

    let thread = orchestrator.store().load("t").unwrap().unwrap();
    assert_eq!(thread.messages.len(), 2);
    assert!(thread
        .messages
        .iter()
        .all(|m| m.text() != nodes::RETRY_DIRECTIVE));
}

#[tokio::test]
async fn test_second_empty_reply_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::new([
        Message::assistant(""),
        Message::assistant(" "),
        Message::assistant("never requested"),
    ]));
    let orchestrator = orchestrator(
        &temp_dir,
        model.clone(),
        GraphConfig::default(),
        Box::new(MemoryThreadStore::new()),
    );

    let outcome = orchestrator.send("t", "hi", &NoopObserver).await.unwrap();
    assert_eq!(outcome.reply, "");
    assert_eq!(outcome.invocations, 2);
    assert_eq!(model.remaining(), 1);
}

#[tokio::test]
async fn test_step_limit_aborts_without_saving() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::new(
        (0..10).map(|i| call(&format!("c{}", i), "get_resolved_path", json!({}))),
    ));
    let limits = GraphConfig {
        max_steps: 3,
        empty_reply_retries: 1,
    };
    let orchestrator = orchestrator(&temp_dir, model.clone(), limits, Box::new(MemoryThreadStore::new()));

    let err = orchestrator.send("t", "loop forever", &NoopObserver).await.unwrap_err();
    assert!(matches!(err, AssistantError::StepLimit(3)));
    assert_eq!(model.requests().len(), 3);
    assert!(orchestrator.store().load("t").unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_tool_aborts_and_keeps_stored_thread() {
    let temp_dir = TempDir::new().unwrap();
    let store_dir = temp_dir.path().join("threads");
    let model = Arc::new(ScriptedModel::new([
        Message::assistant("First answer."),
        call("c1", "format_disk", json!({})),
    ]));
    let orchestrator = orchestrator(
        &temp_dir,
        model,
        GraphConfig::default(),
        Box::new(FilesystemThreadStore::new(&store_dir)),
    );

    orchestrator.send("t", "hello", &NoopObserver).await.unwrap();
    let before = fs::read_to_string(store_dir.join("thread-t.json")).unwrap();

    let err = orchestrator.send("t", "now do something odd", &NoopObserver).await.unwrap_err();
    assert!(matches!(err, AssistantError::UnknownRoute(_)));

    let after = fs::read_to_string(store_dir.join("thread-t.json")).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_model_error_propagates_and_keeps_stored_thread() {
    let temp_dir = TempDir::new().unwrap();
    let model = Arc::new(ScriptedModel::new([Message::assistant("First answer.")]));
    model.push_error(AssistantError::ApiError {
        status: 503,
        message: "overloaded".to_string(),
    });
    let orchestrator = orchestrator(
        &temp_dir,
        model,
        GraphConfig::default(),
        Box::new(MemoryThreadStore::new()),
    );

    orchestrator.send("t", "hello", &NoopObserver).await.unwrap();
    let err = orchestrator.send("t", "again", &NoopObserver).await.unwrap_err();
    assert!(matches!(err, AssistantError::ApiError { status: 503, .. }));

    let thread = orchestrator.store().load("t").unwrap().unwrap();
    assert_eq!(thread.messages.len(), 2);
}
