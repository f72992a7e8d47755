pub mod commands;
pub mod confirm;
pub mod forms;
pub mod output;
pub mod ui;

pub use commands::{CommandError, CommandOutcome, CommandResult};
