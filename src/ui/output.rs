use colored::*;
use std::io::{self, Write};

use crate::graph::{TurnEvent, TurnObserver};

const MAX_PREVIEW_CHARS: usize = 400;

/// Prints turn events to stderr. Handoffs are always shown; tool traffic
/// only when verbose.
pub struct ConsoleObserver {
    verbose: bool,
}

impl ConsoleObserver {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl TurnObserver for ConsoleObserver {
    fn on_event(&self, event: &TurnEvent) {
        match event {
            TurnEvent::HandedOff { to, .. } => {
                eprintln!("{}", format!("[{}]", to.display_name()).cyan());
            }
            TurnEvent::Returned { to, .. } => {
                eprintln!("{}", format!("[{}]", to.display_name()).cyan());
            }
            TurnEvent::ToolCalled {
                tool, arguments, ..
            } if self.verbose => {
                eprintln!("{}", format!("[tool] {} {}", tool, arguments).dimmed());
            }
            TurnEvent::ToolFinished {
                tool,
                output,
                is_error,
            } if self.verbose => {
                let preview = preview(output);
                if *is_error {
                    eprintln!("{}", format!("[tool] {} failed: {}", tool, preview).red());
                } else {
                    eprintln!("{}", format!("[tool] {} -> {}", tool, preview).dimmed());
                }
            }
            TurnEvent::RetriedEmpty { assistant, attempt } if self.verbose => {
                eprintln!(
                    "{}",
                    format!("[{}] empty reply, retry {}", assistant, attempt).yellow()
                );
            }
            _ => {}
        }
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

pub fn display_reply(reply: &str) {
    if reply.trim().is_empty() {
        println!("{}", "(no reply)".dimmed());
    } else {
        println!("{}", reply.trim_end());
    }
}

pub fn display_error(error: &dyn std::fmt::Display) {
    eprintln!("{} {}", "Error:".red(), error);
}

pub fn display_info(message: &str) {
    println!("{}", message.green());
}

pub fn display_banner(thread_id: &str, model: &str) {
    println!(
        "{}",
        format!("Thread {} · model {}", thread_id, model).bold()
    );
    println!("{}", "Type 'exit', 'quit' or 'sair' to leave.".dimmed());
}

/// Print the input prompt and read one line. `None` on EOF.
pub fn prompt_line() -> io::Result<Option<String>> {
    print!("{} ", ">".green().bold());
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
