mod output;

pub use output::{
    display_banner, display_error, display_info, display_reply, prompt_line, ConsoleObserver,
};
