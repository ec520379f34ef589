//! Error types.
//!
//! Only two things can stop the runtime from the outside: display I/O
//! failing, or the host asking the application to close. Everything else
//! (effect panics) is reported and absorbed by the reactive core.

use thiserror::Error;

/// Runtime error.
#[derive(Debug, Error)]
pub enum Error {
    /// Display or input device I/O failed.
    #[error("display i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The host raised the close signal.
    ///
    /// `run` treats this as normal termination.
    #[error("application closed")]
    Closed,
}

impl Error {
    /// Check if this is the close sentinel rather than a real failure.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_is_sentinel() {
        assert!(Error::Closed.is_closed());
        let io = Error::from(std::io::Error::other("boom"));
        assert!(!io.is_closed());
        assert_eq!(io.to_string(), "display i/o failed: boom");
    }
}
