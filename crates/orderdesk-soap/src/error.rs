//! Codec error types.

use thiserror::Error;

/// Errors raised while decoding a service response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The outer SOAP envelope is not well-formed XML.
    #[error("Invalid XML response: {0}")]
    MalformedResponse(String),

    /// The envelope has no result element for the operation.
    #[error("No result found in response (expected {0})")]
    MissingResult(&'static str),

    /// The result element's text is not well-formed XML.
    #[error("Invalid result XML: {0}")]
    MalformedResult(String),
}
