// CLI module
// Public interface for the chat REPL

mod commands;
mod conversation;
mod repl;

pub use commands::{parse_command, Command};
pub use conversation::{Message, SessionLog};
pub use repl::Repl;
