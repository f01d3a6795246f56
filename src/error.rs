//! Error types for ticket-sweep.
//!
//! Unparseable date mentions and unmapped attachments are not errors —
//! those are `Option`s at the extraction layer. The variants here cover
//! bad configuration (fatal at startup) and failing platform calls
//! (logged per thread/leg, retried on the next scheduled run).

/// Top-level error type for a sweep run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Configuration-related errors. All of these are fatal — nothing
/// meaningful can run without a valid city table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("City table is empty")]
    EmptyCityTable,

    #[error("Duplicate city name: {0}")]
    DuplicateCity(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures from the external mail/calendar/document collaborators.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Mail search failed: {0}")]
    Search(String),

    #[error("Label operation failed: {0}")]
    Label(String),

    #[error("Thread read failed: {0}")]
    Thread(String),

    #[error("Message read failed: {0}")]
    Message(String),

    #[error("Folder operation failed: {0}")]
    Folder(String),

    #[error("File upload failed: {0}")]
    Upload(String),

    #[error("Sharing failed for file {file_id}: {reason}")]
    Sharing { file_id: String, reason: String },

    #[error("Calendar operation failed: {0}")]
    Calendar(String),

    #[error("Event insert failed: {0}")]
    EventInsert(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
