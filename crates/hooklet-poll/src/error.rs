use thiserror::Error;

/// Failure of one poll fetch. The chain absorbs these (optionally routing
/// them to an error sink) and keeps polling by default.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request never completed.
    #[error("request to `{url}` failed: {reason}")]
    Request { url: String, reason: String },
    /// The response arrived but its body could not be read.
    #[error("reading response body from `{url}` failed: {reason}")]
    Body { url: String, reason: String },
}
