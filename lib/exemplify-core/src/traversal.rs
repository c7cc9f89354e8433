//! Collecting and resolving the examples of a whole document, operation by operation.

use serde::Serialize;
use utoipa::openapi::path::{Operation, PathItem};
use utoipa::openapi::{Content, RefOr};

use crate::diagnostics::Diagnostics;
use crate::{ApiDocument, ExamplePlaceholder, ResolveError, collect, resolve};

/// The response code label used for request body examples.
pub const REQUEST_BODY_LABEL: &str = "requestBody";

/// The resolved examples of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerExamples {
    /// The operation id, or `"{METHOD} {path}"` when the operation has none.
    pub owner: String,
    /// The upper-cased HTTP method.
    pub method: String,
    /// The path template.
    pub path: String,
    /// The examples, request body first, then responses by status code.
    pub examples: Vec<ExamplePlaceholder>,
}

/// Helper to iterate over all operations in a `PathItem`, with their upper-cased method.
fn iter_operations(path_item: &PathItem) -> impl Iterator<Item = (&'static str, &Operation)> {
    [
        ("GET", path_item.get.as_ref()),
        ("PUT", path_item.put.as_ref()),
        ("POST", path_item.post.as_ref()),
        ("DELETE", path_item.delete.as_ref()),
        ("OPTIONS", path_item.options.as_ref()),
        ("HEAD", path_item.head.as_ref()),
        ("PATCH", path_item.patch.as_ref()),
        ("TRACE", path_item.trace.as_ref()),
    ]
    .into_iter()
    .filter_map(|(method, operation)| operation.map(|op| (method, op)))
}

/// Collects then resolves the examples of every operation of the document.
///
/// Operations without examples are still listed, with no example.
///
/// # Errors
///
/// Stops at the first [`ResolveError`].
pub fn collect_document_examples(
    document: &ApiDocument,
    diagnostics: &mut impl Diagnostics,
) -> Result<Vec<OwnerExamples>, ResolveError> {
    let mut result = vec![];

    for (path, path_item) in document.openapi().paths.paths.iter() {
        for (method, operation) in iter_operations(path_item) {
            let owner = operation
                .operation_id
                .clone()
                .unwrap_or_else(|| format!("{method} {path}"));

            let mut examples = operation_examples(document, operation, diagnostics);
            resolve(&owner, &mut examples, document, diagnostics)?;

            result.push(OwnerExamples {
                owner,
                method: method.to_string(),
                path: path.clone(),
                examples,
            });
        }
    }

    Ok(result)
}

/// Collects the (unresolved) examples of a single operation.
pub fn operation_examples(
    document: &ApiDocument,
    operation: &Operation,
    diagnostics: &mut impl Diagnostics,
) -> Vec<ExamplePlaceholder> {
    let mut examples = vec![];

    if let Some(request_body) = &operation.request_body {
        collect_content(
            document,
            &request_body.content,
            REQUEST_BODY_LABEL,
            &mut examples,
            diagnostics,
        );
    }

    for (status, response) in &operation.responses.responses {
        let response = match response {
            RefOr::T(response) => Some(response),
            RefOr::Ref(reference) => document.referenced_response(&reference.ref_location),
        };
        if let Some(response) = response {
            collect_content(document, &response.content, status, &mut examples, diagnostics);
        }
    }

    examples
}

fn collect_content<'a>(
    document: &ApiDocument,
    content: impl IntoIterator<Item = (&'a String, &'a Content)>,
    response_code: &str,
    examples: &mut Vec<ExamplePlaceholder>,
    diagnostics: &mut impl Diagnostics,
) {
    for (content_type, media_type) in content {
        collect(
            document,
            media_type,
            response_code,
            content_type,
            examples,
            diagnostics,
        );
    }
}
