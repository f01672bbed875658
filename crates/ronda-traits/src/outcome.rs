//! Serializable success-or-failure wrapper for the output boundary.
//!
//! Engines return [`Result`]. When a result crosses into a presentation layer
//! that wants plain data, it is converted to an [`Outcome`], which serializes
//! a failure as `{"Error": "<message>"}` and nothing else.

use crate::{Result, RondaError};
use serde::Serialize;

/// A computed value or a labeled failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    /// The computation succeeded.
    Value(T),
    /// The computation failed with the given message.
    Failure {
        /// Human-readable failure message.
        #[serde(rename = "Error")]
        error: String,
    },
}

impl<T> Outcome<T> {
    /// Whether this outcome is a failure.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Failure { error } => Some(error.as_str()),
        }
    }

    /// The value, if any.
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Failure { .. } => None,
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(v) => Self::Value(v),
            Err(e) => Self::Failure {
                error: e.to_string(),
            },
        }
    }
}

impl<T> From<RondaError> for Outcome<T> {
    fn from(err: RondaError) -> Self {
        Self::Failure {
            error: err.to_string(),
        }
    }
}
