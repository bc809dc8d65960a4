//! Terminal front end for the strictly_hanoi engine.
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Render**: text drawing of towers and the round clock
//! - **Repl**: line-driven play session

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod render;
mod repl;

pub use cli::{Cli, Command};
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, HanoiConfig};
pub use render::{format_clock, render_board, render_status};
pub use repl::{HELP, Input, InputError, RoundClock, Session};
