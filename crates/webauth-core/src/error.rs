//! Error types for webauth-core.

use thiserror::Error;

/// Result type alias for webauth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading webauth metadata.
///
/// Missing carrier keys are never errors — they decode to `None`. These
/// variants cover actual defects: a host that forgot to install the
/// middleware, or an upstream that wrote garbage into a timestamp key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No identity envelope where one was expected. Names the accessor that
    /// came up empty so the wiring mistake is obvious from the message.
    #[error("no webauth info in {0}; is the webauth middleware installed?")]
    Unavailable(&'static str),

    /// A token timestamp key held something other than integer epoch
    /// seconds.
    #[error("malformed timestamp in {key}: {value:?}")]
    MalformedTimestamp {
        /// The carrier key that held the bad value.
        key: &'static str,
        /// The raw value as received.
        value: String,
    },
}
