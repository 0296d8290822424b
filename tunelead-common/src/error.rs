//! Error handling for the TuneLead services
//!
//! One shared taxonomy: the HTTP layer maps these onto status codes
//! (InvalidInput 400, NotFound 404, the rest 500), background tasks log
//! them and stop, and the bot refuses to start on Config.

use thiserror::Error;

/// Common result type for TuneLead operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures shared across the TuneLead services
#[derive(Error, Debug)]
pub enum Error {
    /// Lead or track request id that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected submission fields or request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or malformed environment configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// SQLite failure surfaced by the store layer
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem failure while preparing the database location
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else; surfaced as a server error
    #[error("Internal error: {0}")]
    Internal(String),
}
