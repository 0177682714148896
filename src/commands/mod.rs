//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor`
//! trait. Image file I/O lives in [`imageio`] so the library itself never
//! touches image formats.

mod decrypt;
mod encrypt;
mod imageio;
mod ledger;
mod verify;

pub use decrypt::DecryptCommand;
pub use encrypt::EncryptCommand;
pub use ledger::LedgerCommand;
pub use verify::VerifyCommand;

use anyhow::Result;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}
