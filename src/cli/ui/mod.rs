pub mod prompts;
pub mod render;
pub mod style;
pub mod test_mode;

pub use prompts::{CrosstermTerminal, KeyInput, WizardTerminal};
