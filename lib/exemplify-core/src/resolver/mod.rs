//! Inlining of referenced examples.
//!
//! Two addressing schemes are understood:
//!
//! - `#/components/examples/{name}`, a lookup in the component examples registry
//! - `#/paths/{path}/{method}/...`, a walk through the document down to a media type
//!
//! Resolution follows chains: when a reference lands on another reference, it
//! keeps going until a concrete example is found.
//!
//! # Failure policy
//!
//! - a placeholder without any example is dropped
//! - a reference that cannot be followed is left as is, so callers can still
//!   tell "unresolved reference" apart from "no example"
//! - an operation outside `get`, `post`, `put`, `patch` and `delete` is a hard
//!   [`ResolveError`]
//!
//! Everything else ends up in the [`Diagnostics`] sink.

mod paths;
pub(crate) mod pointer;

use std::collections::BTreeSet;

use utoipa::openapi::RefOr;
use utoipa::openapi::example::Example;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::placeholder::PlaceholderState;
use crate::{ApiDocument, ExamplePlaceholder, ResolveError};

const PATHS_REF_PREFIX: &str = "#/paths";
const COMPONENTS_EXAMPLES_REF_PREFIX: &str = "#/components/examples/";

/// Resolves every referenced example of `owner` in place.
///
/// `owner` only names the operation (or schema) in diagnostics.
///
/// Placeholders without example are removed once every other placeholder has
/// been processed. Concrete placeholders are never touched, so resolving an
/// already resolved list changes nothing.
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedMethod`] as soon as a `#/paths/...`
/// reference names an unsupported operation. Placeholders processed before it
/// keep their resolved example, no placeholder is removed.
///
/// # Example
///
/// ```rust
/// use exemplify_core::{ApiDocument, ExamplePlaceholder, TracingDiagnostics, resolve};
/// use serde_json::json;
/// use utoipa::openapi::example::ExampleBuilder;
/// use utoipa::openapi::{OpenApiBuilder, RefOr};
///
/// let document = ApiDocument::new(OpenApiBuilder::new().build()).with_component_example(
///     "rex",
///     RefOr::T(ExampleBuilder::new().value(Some(json!({"name": "Rex"}))).build()),
/// );
///
/// let mut examples = vec![
///     ExamplePlaceholder::reference("rex", "application/json", "#/components/examples/rex"),
///     ExamplePlaceholder::missing("ghost", "application/json"),
/// ];
/// resolve("getPet", &mut examples, &document, &mut TracingDiagnostics)?;
///
/// assert_eq!(examples.len(), 1);
/// assert_eq!(examples[0].value(), Some(&json!({"name": "Rex"})));
/// # Ok::<(), exemplify_core::ResolveError>(())
/// ```
pub fn resolve(
    owner: &str,
    examples: &mut Vec<ExamplePlaceholder>,
    document: &ApiDocument,
    diagnostics: &mut impl Diagnostics,
) -> Result<(), ResolveError> {
    for placeholder in examples.iter_mut() {
        let location = match placeholder.example() {
            None => {
                diagnostics.report(Diagnostic::MissingValue {
                    key: placeholder.key().to_string(),
                    owner: owner.to_string(),
                });
                continue;
            }
            Some(RefOr::T(_)) => continue,
            Some(RefOr::Ref(reference)) => reference.ref_location.clone(),
        };

        if let Some(example) = resolve_chain(owner, &location, document, diagnostics)? {
            diagnostics.report(Diagnostic::Replaced {
                reference: location,
                owner: owner.to_string(),
            });
            placeholder.replace_example(example);
        }
    }

    // Dropped here so later stages never see an example-less placeholder
    examples.retain(|placeholder| placeholder.state() != PlaceholderState::Missing);
    Ok(())
}

fn resolve_chain(
    owner: &str,
    location: &str,
    document: &ApiDocument,
    diagnostics: &mut impl Diagnostics,
) -> Result<Option<Example>, ResolveError> {
    let mut visited = BTreeSet::new();
    let mut current = location.to_string();

    loop {
        if !visited.insert(current.clone()) {
            diagnostics.report(Diagnostic::CyclicRef {
                reference: location.to_string(),
                repeated: current,
                owner: owner.to_string(),
            });
            return Ok(None);
        }

        let target = if let Some(name) = current.strip_prefix(COMPONENTS_EXAMPLES_REF_PREFIX) {
            lookup_component(owner, &current, name, document, diagnostics)
        } else if current.starts_with(PATHS_REF_PREFIX) {
            paths::lookup(owner, &current, document, diagnostics)?
        } else {
            diagnostics.report(Diagnostic::UnknownPrefix {
                reference: current.clone(),
                owner: owner.to_string(),
            });
            None
        };

        match target {
            None => return Ok(None),
            Some(RefOr::T(example)) => return Ok(Some(example)),
            Some(RefOr::Ref(next)) => current = next.ref_location,
        }
    }
}

fn lookup_component(
    owner: &str,
    reference: &str,
    name: &str,
    document: &ApiDocument,
    diagnostics: &mut impl Diagnostics,
) -> Option<RefOr<Example>> {
    let example = document
        .component_examples()
        .and_then(|examples| examples.get(name));

    if example.is_none() {
        diagnostics.report(Diagnostic::BrokenComponentsRef {
            reference: reference.to_string(),
            owner: owner.to_string(),
        });
    }
    example.cloned()
}
