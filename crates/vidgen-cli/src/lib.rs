//! Command-line interface for the vidgen video-generation toolkit.

mod args;
mod commands;

pub use args::{Cli, Commands};
pub use commands::run;
