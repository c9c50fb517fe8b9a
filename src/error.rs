use thiserror::Error;

/// Errors returned by store lookups, store configuration and action decoding.
///
/// Reducers never fail; every variant here comes from the edges of the
/// crate: asking for a slice that does not exist, registering the same slice
/// twice, or decoding an action document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No slice is registered under this name.
    #[error("no slice named '{0}'")]
    UnknownSlice(String),

    /// The slice exists but holds a different state type.
    #[error("slice '{name}' does not hold a `{expected}`")]
    SliceTypeMismatch {
        name: String,
        expected: &'static str,
    },

    /// Two slices were registered under the same name.
    #[error("slice '{0}' is registered more than once")]
    DuplicateSlice(String),

    /// The bounded history has dropped actions, so state cannot be refolded.
    #[error("history dropped {dropped} action(s); cannot rebuild from seed")]
    HistoryTruncated { dropped: u64 },

    /// A foreign action was given a tag that belongs to a slice.
    #[error("'{0}' is a recognized action type and cannot be used for a foreign action")]
    ReservedActionType(String),

    /// The document is not an object with a string `type` field.
    #[error("malformed action: {0}")]
    MalformedAction(String),

    /// A recognized action tag carried a payload of the wrong shape.
    #[error("invalid payload for '{action_type}': {source}")]
    InvalidPayload {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
