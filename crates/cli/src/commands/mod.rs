//! Subcommand implementations.

use quickbite_storefront::AppError;
use serde::Serialize;
use thiserror::Error;

pub mod browse;
pub mod cart;
pub mod checkout;
pub mod track;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A storefront operation failed.
    #[error("{}", .0.user_message())]
    App(#[from] AppError),

    /// Output could not be serialized.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Write a value to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
