//! User conversation: the prompt trait, the terminal prompt and the scripted
//! prompt used for unattended runs.
pub mod prompt;
pub mod script;

pub use prompt::{ConsolePrompt, Prompt};
pub use script::{Script, ScriptedPrompt};
