use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "assistant")]
#[command(
    about = "Conversational assistant that hands directory-mapping tasks to a specialized sub-agent",
    long_about = None
)]
pub struct Args {
    #[arg(short = 't', long = "thread", help = "Conversation thread to load and continue")]
    pub thread: Option<String>,

    #[arg(short = 'n', long = "new", help = "Start a fresh thread with a random id")]
    pub new_thread: bool,

    #[arg(long = "clear", help = "Delete every stored conversation thread")]
    pub clear_history: bool,

    #[arg(
        long = "ephemeral",
        help = "Keep the conversation in memory only; nothing is written to disk"
    )]
    pub ephemeral: bool,

    #[arg(short = 'v', long = "verbose", help = "Log routing and tool activity to stderr")]
    pub verbose: bool,

    #[arg(long = "model", help = "Model identifier sent to the API")]
    pub model: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(
        long = "base-dir",
        help = "Directory the tools resolve relative paths against (default: home)"
    )]
    pub base_dir: Option<String>,

    #[arg(long = "config-init", help = "Write an example config file and exit")]
    pub config_init: bool,

    #[arg(long = "graph", help = "Print the dialog graph as a Mermaid diagram and exit")]
    pub graph: bool,

    #[arg(help = "Message to send; omit to start an interactive chat")]
    pub message: Vec<String>,
}
