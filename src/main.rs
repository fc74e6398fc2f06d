use clap::Parser;
use colored::*;
use std::process;
use std::sync::Arc;

use ai_assistant::cli::Args;
use ai_assistant::config::{Config, FileConfig};
use ai_assistant::graph::{render_mermaid, AssistantSet, TurnRunner};
use ai_assistant::llm::OpenAiCompatibleModel;
use ai_assistant::logging;
use ai_assistant::orchestrator::Orchestrator;
use ai_assistant::session::{new_thread_id, FilesystemThreadStore, MemoryThreadStore, ThreadStore};
use ai_assistant::tools::{ToolRegistry, ToolSettings};
use ai_assistant::ui::{
    display_banner, display_error, display_info, display_reply, prompt_line, ConsoleObserver,
};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "sair"];

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if args.graph {
        println!("{}", render_mermaid(&AssistantSet::default()));
        return;
    }

    // Handle --config-init
    if args.config_init {
        let Some(dir) = FileConfig::user_config_dir() else {
            display_error(&"could not determine home directory");
            process::exit(1);
        };
        let path = dir.join("config.yaml");
        match FileConfig::write_example(&path) {
            Ok(()) => {
                display_info(&format!("Example config written to {}", path.display()));
                return;
            }
            Err(e) => {
                display_error(&format!("{:#}", e));
                process::exit(1);
            }
        }
    }

    // Handle --clear
    if args.clear_history {
        let result = FilesystemThreadStore::default_location()
            .and_then(|store| Ok((store.clear_all()?, store.dir().to_path_buf())));
        match result {
            Ok((count, dir)) => {
                display_info(&format!(
                    "Cleared {} conversation thread(s) from {}.",
                    count,
                    dir.display()
                ));
                return;
            }
            Err(e) => {
                display_error(&format!("clearing history: {}", e));
                process::exit(1);
            }
        }
    }

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            display_error(&e);
            process::exit(1);
        }
    };

    let orchestrator = match build_orchestrator(&config, args.ephemeral) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            display_error(&e);
            process::exit(1);
        }
    };

    let thread_id = if args.new_thread {
        new_thread_id()
    } else {
        config.thread_id.clone()
    };
    let observer = ConsoleObserver::new(config.verbose);

    if !args.message.is_empty() {
        let message = args.message.join(" ");
        match orchestrator.send(&thread_id, &message, &observer).await {
            Ok(outcome) => display_reply(&outcome.reply),
            Err(e) => {
                display_error(&e);
                process::exit(1);
            }
        }
        return;
    }

    display_banner(&thread_id, &config.model);
    loop {
        let line = match prompt_line() {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                display_error(&e);
                process::exit(1);
            }
        };

        if line.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&line.to_lowercase().as_str()) {
            break;
        }

        match orchestrator.send(&thread_id, &line, &observer).await {
            Ok(outcome) => display_reply(&outcome.reply),
            Err(e) => display_error(&e),
        }
    }
    println!("{}", "Goodbye.".dimmed());
}

fn build_orchestrator(config: &Config, ephemeral: bool) -> ai_assistant::error::Result<Orchestrator> {
    let settings = ToolSettings::from_config(&config.tools);
    let registry = ToolRegistry::new(&config.tools, settings);
    tracing::debug!(
        base_dir = %registry.settings().base_dir.display(),
        tools = registry.list().len(),
        "tool registry ready"
    );

    let model = Arc::new(OpenAiCompatibleModel::from_config(config)?);
    let runner = TurnRunner::new(
        model,
        registry,
        AssistantSet::from_config(config),
        config.graph.clone(),
    );

    let store: Box<dyn ThreadStore> = if ephemeral {
        Box::new(MemoryThreadStore::new())
    } else {
        Box::new(FilesystemThreadStore::default_location()?)
    };

    Ok(Orchestrator::new(runner, store, config.max_history_turns))
}
