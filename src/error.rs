use std::{fmt, io};

use regex::Error as RegexError;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

#[cfg(feature = "service")]
use sqlx::Error as SqlxError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum RoamError {
    /// A construction precondition failed (e.g. the record source path does not exist). No
    /// collection is produced.
    #[error("Precondition failed: {0}")]
    Precondition(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
    #[error("Org codec error: {0}")]
    Codec(String),
}

impl RoamError {
    /// The error raised by every identifier-accepting lookup when resolution fails.
    pub fn unresolved(identifier: &str) -> RoamError {
        RoamError::NotFound(format!("No node with provided identifier: {identifier}"))
    }
}

impl From<toml::de::Error> for RoamError {
    fn from(src: toml::de::Error) -> RoamError {
        RoamError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for RoamError {
    fn from(src: toml::ser::Error) -> RoamError {
        RoamError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for RoamError {
    fn from(src: JsonError) -> RoamError {
        RoamError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for RoamError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => RoamError::NotFound(format!("{x}")),
            _ => RoamError::Io(format!("IOError: {}: {x}", x.kind())),
        }
    }
}

impl From<fmt::Error> for RoamError {
    fn from(x: fmt::Error) -> Self {
        RoamError::Codec(format!("{x}"))
    }
}

impl From<RegexError> for RoamError {
    fn from(x: RegexError) -> Self {
        RoamError::Serialization(format!("Regex parse failed: {x}"))
    }
}

#[cfg(feature = "service")]
impl From<SqlxError> for RoamError {
    fn from(db_error: SqlxError) -> Self {
        RoamError::Database(format!("database error: {db_error:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err: RoamError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, RoamError::NotFound(_)));

        let err: RoamError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, RoamError::Io(_)));
    }

    #[test]
    fn unresolved_names_the_identifier() {
        let err = RoamError::unresolved("no-such-note");
        assert!(err.to_string().contains("no-such-note"));
    }
}
