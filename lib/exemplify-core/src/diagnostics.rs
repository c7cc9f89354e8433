//! Diagnostics reported while collecting and resolving examples.
//!
//! The collector and the resolver never log directly: every failure or
//! fallback is turned into a [`Diagnostic`] and handed to a [`Diagnostics`]
//! sink supplied by the caller.
//!
//! - [`TracingDiagnostics`] forwards them to `tracing` (what a generator run wants)
//! - [`CollectedDiagnostics`] keeps them in memory (what a test wants)
//!
//! # Example
//!
//! ```rust
//! use exemplify_core::{ApiDocument, CollectedDiagnostics, ExamplePlaceholder, resolve};
//! use utoipa::openapi::OpenApiBuilder;
//!
//! let document = ApiDocument::new(OpenApiBuilder::new().build());
//! let mut examples = vec![ExamplePlaceholder::reference(
//!     "example",
//!     "application/json",
//!     "#/definitions/Pet",
//! )];
//!
//! let mut diagnostics = CollectedDiagnostics::default();
//! resolve("getPet", &mut examples, &document, &mut diagnostics)?;
//!
//! assert_eq!(diagnostics.len(), 1);
//! # Ok::<(), exemplify_core::ResolveError>(())
//! ```

use std::fmt;

use tracing::{Level, debug, warn};

/// The step of a `#/paths/...` reference that could not be followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// A segment is not a valid JSON pointer token.
    InvalidPointer {
        /// The parser error message.
        error: String,
    },
    /// The reference ends before the named segment.
    MissingSegment {
        /// What the missing segment should have contained.
        expected: &'static str,
    },
    /// The path template is not declared in `paths`.
    UnknownPath {
        /// The decoded path template.
        path: String,
    },
    /// The path exists but does not declare this operation.
    UnknownOperation {
        /// The operation method.
        method: String,
    },
    /// The operation does not declare this response status.
    UnknownResponse {
        /// The response status code.
        status: String,
    },
    /// The response is a reference to an undeclared `#/components/responses` entry.
    UnknownComponentResponse {
        /// The response reference.
        reference: String,
    },
    /// The request body or response has no content.
    MissingContent,
    /// The content map does not declare this media type.
    UnknownContentType {
        /// The decoded content type.
        content_type: String,
    },
    /// The media type has no example with this name.
    UnknownNamedExample {
        /// The example name.
        name: String,
    },
    /// The media type has no single `example` to fall back to.
    MissingDirectExample,
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPointer { error } => write!(f, "is not a valid pointer: {error}"),
            Self::MissingSegment { expected } => write!(f, "is missing the {expected} segment"),
            Self::UnknownPath { path } => write!(f, "refers to path {path} but it is not defined"),
            Self::UnknownOperation { method } => {
                write!(f, "refers to operation {method} but it is not defined")
            }
            Self::UnknownResponse { status } => {
                write!(f, "refers to response {status} that is not defined")
            }
            Self::UnknownComponentResponse { reference } => {
                write!(f, "refers to response {reference} that is not defined")
            }
            Self::MissingContent => write!(f, "refers to content that is not defined"),
            Self::UnknownContentType { content_type } => {
                write!(f, "refers to mediaType {content_type} that is not defined")
            }
            Self::UnknownNamedExample { name } => {
                write!(f, "refers to example {name} that is not defined")
            }
            Self::MissingDirectExample => {
                write!(f, "refers to a media type without any example")
            }
        }
    }
}

/// Something worth reporting while collecting or resolving examples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A named example was collected from a media type.
    ExampleCollected {
        /// The example key.
        key: String,
        /// The media type content type.
        content_type: String,
        /// The response code, or `requestBody`.
        response_code: String,
    },

    /// A placeholder has no value at all, it is dropped.
    MissingValue {
        /// The placeholder key.
        key: String,
        /// The owner being resolved.
        owner: String,
    },

    /// The reference uses an addressing scheme the resolver does not know.
    UnknownPrefix {
        /// The reference string.
        reference: String,
        /// The owner being resolved.
        owner: String,
    },

    /// A `#/components/examples/...` reference targets nothing.
    BrokenComponentsRef {
        /// The reference string.
        reference: String,
        /// The owner being resolved.
        owner: String,
    },

    /// A `#/paths/...` reference could not be followed.
    BrokenPathRef {
        /// The reference string.
        reference: String,
        /// The owner being resolved.
        owner: String,
        /// The failing step.
        step: PathStep,
    },

    /// A `#/paths/...` reference stops at a media type instead of one of its named examples.
    ///
    /// The media type `example` is used anyway.
    MalformedDirectRef {
        /// The reference string.
        reference: String,
        /// The owner being resolved.
        owner: String,
    },

    /// Following a chain of references came back to an already visited one.
    CyclicRef {
        /// The reference that started the chain.
        reference: String,
        /// The reference seen twice.
        repeated: String,
        /// The owner being resolved.
        owner: String,
    },

    /// A reference was replaced by the concrete example it points to.
    Replaced {
        /// The reference string.
        reference: String,
        /// The owner being resolved.
        owner: String,
    },
}

impl Diagnostic {
    /// The level this diagnostic is logged at.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::ExampleCollected { .. } | Self::Replaced { .. } => Level::DEBUG,
            Self::MissingValue { .. }
            | Self::UnknownPrefix { .. }
            | Self::BrokenComponentsRef { .. }
            | Self::BrokenPathRef { .. }
            | Self::MalformedDirectRef { .. }
            | Self::CyclicRef { .. } => Level::WARN,
        }
    }

    /// The reference this diagnostic is about, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::ExampleCollected { .. } | Self::MissingValue { .. } => None,
            Self::UnknownPrefix { reference, .. }
            | Self::BrokenComponentsRef { reference, .. }
            | Self::BrokenPathRef { reference, .. }
            | Self::MalformedDirectRef { reference, .. }
            | Self::CyclicRef { reference, .. }
            | Self::Replaced { reference, .. } => Some(reference),
        }
    }

    /// The operation (or schema) the diagnostic was raised for, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::ExampleCollected { .. } => None,
            Self::MissingValue { owner, .. }
            | Self::UnknownPrefix { owner, .. }
            | Self::BrokenComponentsRef { owner, .. }
            | Self::BrokenPathRef { owner, .. }
            | Self::MalformedDirectRef { owner, .. }
            | Self::CyclicRef { owner, .. }
            | Self::Replaced { owner, .. } => Some(owner),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExampleCollected {
                key,
                content_type,
                response_code,
            } => write!(
                f,
                "Adding example: {key} with content type: {content_type} and responseCode: {response_code}"
            ),
            Self::MissingValue { key, owner } => write!(
                f,
                "Example: {key} used in: {owner} refers to an example that does not exist"
            ),
            Self::UnknownPrefix { reference, owner } | Self::BrokenComponentsRef { reference, owner } => {
                write!(
                    f,
                    "Example ref: {reference} used in: {owner} refers to an example that does not exist"
                )
            }
            Self::BrokenPathRef {
                reference,
                owner,
                step,
            } => write!(f, "Example ref: {reference} used in: {owner} {step}"),
            Self::MalformedDirectRef { reference, owner } => write!(
                f,
                "Incorrect example reference found! Replacing Example ref: {reference} used in: {owner} with the media type example"
            ),
            Self::CyclicRef {
                reference,
                repeated,
                owner,
            } => write!(
                f,
                "Example ref: {reference} used in: {owner} loops back to {repeated}"
            ),
            Self::Replaced { reference, owner } => {
                write!(f, "Replacing Example ref: {reference} used in: {owner}")
            }
        }
    }
}

/// A sink receiving the diagnostics of a collect or resolve pass.
pub trait Diagnostics {
    /// Records one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        let reference = diagnostic.reference().unwrap_or_default();
        let owner = diagnostic.owner().unwrap_or_default();
        if diagnostic.level() == Level::WARN {
            warn!(reference, owner, "{diagnostic}");
        } else {
            debug!(reference, owner, "{diagnostic}");
        }
    }
}

/// Keeps diagnostics in memory, in reporting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_more::Deref)]
pub struct CollectedDiagnostics(Vec<Diagnostic>);

impl CollectedDiagnostics {
    /// Only the warnings, skipping debug traces.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|diag| diag.level() == Level::WARN)
    }

    /// Consumes the sink, returning the recorded diagnostics.
    #[must_use]
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }
}
