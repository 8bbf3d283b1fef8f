//! Error types for sigmap-wifi.

/// Result type for sigmap-wifi operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying link status.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The link-status tool could not be spawned, or exited unsuccessfully.
    #[error("link query failed for {interface}: {reason}")]
    LinkQuery { interface: String, reason: String },

    /// The tool ran but its output carried no signal reading.
    #[error("no signal reading in link status for {0}")]
    SignalNotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
