//! Error types exposed by the content API layer.

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced while building queries or communicating with the content
/// API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    /// The request failed before an HTTP response was received.
    #[error("network error talking to the content API: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The content API answered with a non-2xx status.
    #[error("content API returned {status}: {body}")]
    HttpStatus {
        /// Status code of the response.
        status: StatusCode,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// The response was successful but did not carry JSON.
    #[error("content API returned unexpected content type: {content_type}")]
    UnexpectedContentType {
        /// The `Content-Type` header value, or `<missing>`.
        content_type: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("content API response could not be decoded: {message}")]
    Decode {
        /// Deserialisation error detail.
        message: String,
    },

    /// The requested content does not exist or is not published.
    #[error("content {id} was not found or is not published")]
    NotFound {
        /// Identifier that was requested.
        id: String,
    },

    /// A list query was built from invalid cursor or limit values.
    #[error("invalid list query: {message}")]
    InvalidQuery {
        /// Description of the invalid parameter.
        message: String,
    },

    /// The API base URL or a content identifier could not be parsed.
    #[error("content API URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A card template failed to compile or render.
    #[error("template error: {message}")]
    Template {
        /// Details reported by the template engine.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
