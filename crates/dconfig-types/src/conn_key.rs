//! Connection keys: `<resource key>/<ordinal>`.
//!
//! The IPC layer hands out one key per client connection to a resource. The
//! resource key may itself contain `/`; only the last `/` separates it from
//! the decimal connection ordinal.

/// Composite key addressing one client connection to a resource.
pub type ConnKey = String;

/// The resource scope part of a [`ConnKey`].
pub type ResourceKey = String;

/// Bus name of the service owning a connection.
pub type ConnServiceName = String;

/// Reference count the connection registry keeps per connection.
pub type ConnRefCount = i32;

/// Errors from strict ordinal parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnKeyError {
    #[error("connection key '{0}' has no ordinal")]
    MissingOrdinal(String),
    #[error("connection key '{key}' has malformed ordinal '{suffix}'")]
    MalformedOrdinal { key: String, suffix: String },
}

/// Encode a resource key and connection ordinal into a [`ConnKey`].
pub fn conn_key(resource_key: &str, ordinal: u32) -> ConnKey {
    format!("{resource_key}/{ordinal}")
}

/// Everything before the last `/`, or `""` when there is none.
///
/// A key without a separator is malformed upstream; callers should not
/// treat the empty result as a real resource.
pub fn resource_key_of(conn_key: &str) -> &str {
    conn_key.rsplit_once('/').map(|(key, _)| key).unwrap_or("")
}

/// Text after the last `/`, or the whole key when there is none.
fn ordinal_text(conn_key: &str) -> &str {
    conn_key
        .rsplit_once('/')
        .map(|(_, suffix)| suffix)
        .unwrap_or(conn_key)
}

/// Strictly parse the connection ordinal.
///
/// Only ASCII digits are accepted (no sign, no whitespace) and the value
/// must fit in a `u32`.
pub fn try_ordinal_of(conn_key: &str) -> Result<u32, ConnKeyError> {
    let suffix = ordinal_text(conn_key);
    if suffix.is_empty() {
        return Err(ConnKeyError::MissingOrdinal(conn_key.to_string()));
    }
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConnKeyError::MalformedOrdinal {
            key: conn_key.to_string(),
            suffix: suffix.to_string(),
        });
    }
    suffix
        .parse::<u32>()
        .map_err(|_| ConnKeyError::MalformedOrdinal {
            key: conn_key.to_string(),
            suffix: suffix.to_string(),
        })
}

/// Parse the connection ordinal, degrading to `0` when it is missing or
/// malformed.
///
/// Use [`try_ordinal_of`] to tell an explicit `0` from a bad key.
pub fn ordinal_of(conn_key: &str) -> u32 {
    try_ordinal_of(conn_key).unwrap_or(0)
}

/// Split a key into its resource key and (lenient) ordinal.
pub fn split_conn_key(conn_key: &str) -> (&str, u32) {
    (resource_key_of(conn_key), ordinal_of(conn_key))
}

// ============================================================================
// Tests
// ============================================================================
