//! CLI subcommand implementations.
//!
//! Commands return their output as a string; `main` prints it.

pub mod cart;
pub mod route;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The item entered on the command line is invalid.
    #[error("Invalid item: {0}")]
    Item(#[from] canteen_cart::CartItemError),

    /// Output could not be serialized.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}
