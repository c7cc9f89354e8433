//! Error types for document loading and example resolution.
//!
//! Most resolution failures are recovered locally and only surface as
//! [`Diagnostic`](crate::Diagnostic)s. The errors in this module are the
//! ones a caller has to deal with.

/// Hard failure raised while resolving example references.
///
/// Only raised for reference strings the resolver cannot interpret at all.
/// Missing targets (unknown path, response, content type...) never end up here,
/// the placeholder is left unresolved and a diagnostic is reported instead.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum ResolveError {
    /// The operation segment of a `#/paths/...` reference is not one of
    /// `get`, `post`, `put`, `patch` or `delete`.
    #[display("Unsupported operation '{method}' in example reference '{reference}'")]
    UnsupportedMethod {
        /// The full reference string.
        reference: String,
        /// The offending (lower-cased) operation segment.
        method: String,
    },
}

/// Errors that can occur when loading an OpenAPI document.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum DocumentError {
    /// Reading the document from disk failed.
    IoError(std::io::Error),

    /// The document is not valid JSON, or does not match the OpenAPI model.
    JsonError(serde_json::Error),

    /// The document is not valid YAML.
    #[cfg(feature = "yaml")]
    #[display("Invalid YAML document: {error}")]
    #[from(skip)]
    YamlError {
        /// The YAML parser error message.
        error: String,
    },

    /// The document parsed, but a section does not have the expected shape.
    #[display("Invalid document at '{section}': {error}")]
    #[from(skip)]
    InvalidSection {
        /// The document section, e.g. `components.examples`.
        section: &'static str,
        /// The underlying deserialization error.
        error: serde_json::Error,
    },

    /// The document has no `openapi` version field.
    #[display("Missing 'openapi' version field")]
    MissingVersion,
}
