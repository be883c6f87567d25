#[cfg(test)]
#[path = "request_id_test.rs"]
mod request_id_test;

use std::fmt;

use crate::error::MountError;

/// Identifier of the request this chat thread belongs to. Also the room key.
///
/// Read once from the page at mount time and never changed afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Build from the raw `data-request-id` attribute value.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::MissingRequestId`] when the attribute is absent
    /// or blank.
    pub fn from_attr(value: Option<String>) -> Result<Self, MountError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(Self(v)),
            _ => Err(MountError::MissingRequestId),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
