use thiserror::Error;

/// Errors raised by the crate's own plumbing (terminal, log file).
///
/// Fetch problems never reach this type: they end up in the rendered view as a
/// failure outcome.
#[derive(Debug, Error)]
pub enum Error {
    /// A generic I/O error (terminal, log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logging could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
