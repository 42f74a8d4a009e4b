mod commands;
mod output;

pub use commands::{Cli, Commands, GlobalArgs, run};
pub use output::{QueryReport, format_history, format_panel};
