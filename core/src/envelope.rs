//! The uniform `{data, error?, status?}` result of every content accessor.

use serde::{Deserialize, Serialize};

/// Outcome of one content fetch.
///
/// `error` is set only for infrastructural failures. A missing resource is
/// `data: None` with no `error`; list accessors always carry `Some(vec)`.
/// Serialization omits `error` and `status` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl<T> Envelope<T> {
    pub fn found(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            data: None,
            error: None,
            status: None,
        }
    }

    pub fn failed(error: impl Into<String>, status: u16) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            status: Some(status),
        }
    }

    /// A failed mutation: an error message without a status code.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            status: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self::found(items)
    }

    /// The items, or an empty slice when `data` is absent.
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or_default()
    }
}
