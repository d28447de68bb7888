//! Error types for CrewDock core.

use std::{error::Error, fmt};

/// Error type for CrewDock core operations.
#[derive(Debug)]
pub enum CrewDockError {
    /// A value did not parse into a known domain enum.
    UnknownValue {
        /// Which enum the value was parsed against.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A catch-all error with a message.
    Other(String),
}

impl fmt::Display for CrewDockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownValue { kind, value } => write!(f, "unknown {kind}: {value}"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

impl Error for CrewDockError {}

/// Convenience result type for CrewDock core.
pub type Result<T> = std::result::Result<T, CrewDockError>;

#[cfg(test)]
mod tests {
    use super::CrewDockError;

    #[test]
    fn unknown_value_formats_message() {
        let error = CrewDockError::UnknownValue {
            kind: "crew status",
            value: "RETIRED".to_string(),
        };
        assert_eq!(format!("{error}"), "unknown crew status: RETIRED");
    }

    #[test]
    fn other_error_formats_message() {
        let error = CrewDockError::Other("crewdock failed".to_string());
        assert_eq!(format!("{error}"), "crewdock failed");
    }
}
