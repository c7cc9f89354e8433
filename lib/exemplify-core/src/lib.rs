//! # Exemplify Core
//!
//! Collect the examples of an OpenAPI document and inline the ones that are
//! only referenced, ready for a documentation or client generator.
//!
//! Two stages work on a read-only [`ApiDocument`]:
//! - **[`collect`]** turns one media type into [`ExamplePlaceholder`]s
//!   (inline `example`, named `examples`, component schema `example`)
//! - **[`resolve`]** replaces every referenced example of an owner (usually an
//!   operation) by the concrete example it points to
//!
//! Both report what went wrong to an injected [`Diagnostics`] sink instead of
//! failing, the only hard error being [`ResolveError::UnsupportedMethod`].
//!
//! ## Quick Start
//!
//! ```rust
//! use exemplify_core::{ApiDocument, TracingDiagnostics, collect_document_examples};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = ApiDocument::from_json_str(r##"{
//!   "openapi": "3.1.0",
//!   "info": { "title": "Pets", "version": "1.0.0" },
//!   "paths": {
//!     "/pets": {
//!       "get": {
//!         "operationId": "listPets",
//!         "responses": {
//!           "200": {
//!             "description": "The pets",
//!             "content": {
//!               "application/json": {
//!                 "examples": { "rex": { "$ref": "#/components/examples/rex" } }
//!               }
//!             }
//!           }
//!         }
//!       }
//!     }
//!   },
//!   "components": {
//!     "examples": { "rex": { "value": [{ "name": "Rex" }] } }
//!   }
//! }"##)?;
//!
//! let owners = collect_document_examples(&document, &mut TracingDiagnostics)?;
//! assert_eq!(owners[0].owner, "listPets");
//! assert_eq!(owners[0].examples[0].value(), Some(&serde_json::json!([{ "name": "Rex" }])));
//! # Ok(())
//! # }
//! ```
//!
//! ## Working a media type at a time
//!
//! ```rust
//! use exemplify_core::{ApiDocument, CollectedDiagnostics, collect, resolve};
//! use serde_json::json;
//! use utoipa::openapi::{ContentBuilder, OpenApiBuilder};
//!
//! # fn main() -> Result<(), exemplify_core::ResolveError> {
//! let document = ApiDocument::new(OpenApiBuilder::new().build());
//! let media_type = ContentBuilder::new()
//!     .example(Some(json!({ "$ref": "#/components/examples/missing" })))
//!     .build();
//!
//! let mut diagnostics = CollectedDiagnostics::default();
//! let mut examples = vec![];
//! collect(&document, &media_type, "200", "application/json", &mut examples, &mut diagnostics);
//! resolve("getPet", &mut examples, &document, &mut diagnostics)?;
//!
//! // still a reference: broken references are kept, and reported
//! assert_eq!(examples[0].reference_location(), Some("#/components/examples/missing"));
//! assert_eq!(diagnostics.warnings().count(), 1);
//! # Ok(())
//! # }
//! ```

mod collector;
mod diagnostics;
mod document;
mod error;
mod placeholder;
mod resolver;
mod traversal;

pub use collector::{SINGLE_EXAMPLE_KEY, collect};
pub use diagnostics::{CollectedDiagnostics, Diagnostic, Diagnostics, PathStep, TracingDiagnostics};
pub use document::ApiDocument;
pub use error::{DocumentError, ResolveError};
pub use placeholder::{ExamplePlaceholder, PlaceholderState};
pub use resolver::resolve;
pub use traversal::{
    OwnerExamples, REQUEST_BODY_LABEL, collect_document_examples, operation_examples,
};
