use std::{fmt, io};

use thiserror::Error;

use crate::profile::ValidationError;

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Store operation named in I/O failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    List,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Read => "read",
            Operation::Write => "write",
            Operation::List => "list",
            Operation::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Error type that captures profile validation and persistence failures.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationError>),
    #[error("Profile `{name}` not found")]
    NotFound { name: String },
    #[error("Profile `{name}` is unreadable: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to {operation} profile `{name}`: {source}")]
    Io {
        operation: Operation,
        name: String,
        #[source]
        source: io::Error,
    },
}

impl ProfileError {
    pub(crate) fn io(operation: Operation, name: &str, source: io::Error) -> Self {
        ProfileError::Io {
            operation,
            name: name.to_string(),
            source,
        }
    }

    pub(crate) fn not_found(name: &str) -> Self {
        ProfileError::NotFound {
            name: name.to_string(),
        }
    }

    /// True when the requested profile cannot be used at all, either because
    /// it does not exist or because its record is corrupt.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ProfileError::NotFound { .. } | ProfileError::Decode { .. }
        )
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
