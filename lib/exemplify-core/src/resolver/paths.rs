//! Structural `#/paths/...` example references.
//!
//! ```text
//! #/paths/{path}/{method}/requestBody/content/{content-type}[/examples/{name}]
//! #/paths/{path}/{method}/responses/{status}/content/{content-type}[/examples/{name}]
//! ```

use serde_json::Value;
use utoipa::openapi::example::Example;
use utoipa::openapi::path::{Operation, PathItem};
use utoipa::openapi::{Content, RefOr};

use super::PATHS_REF_PREFIX;
use super::pointer::decode_segments;
use crate::diagnostics::{Diagnostic, Diagnostics, PathStep};
use crate::placeholder::example_of;
use crate::{ApiDocument, ResolveError};

const REQUEST_BODY_SEGMENT: &str = "requestBody";
const EXAMPLES_SEGMENT: &str = "examples";

/// Operations an example reference may point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum OperationMethod {
    #[display("get")]
    Get,
    #[display("post")]
    Post,
    #[display("put")]
    Put,
    #[display("patch")]
    Patch,
    #[display("delete")]
    Delete,
}

impl OperationMethod {
    fn parse(reference: &str, segment: &str) -> Result<Self, ResolveError> {
        let method = segment.to_lowercase();
        match method.as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(ResolveError::UnsupportedMethod {
                reference: reference.to_string(),
                method,
            }),
        }
    }

    fn select(self, path_item: &PathItem) -> Option<&Operation> {
        match self {
            Self::Get => path_item.get.as_ref(),
            Self::Post => path_item.post.as_ref(),
            Self::Put => path_item.put.as_ref(),
            Self::Patch => path_item.patch.as_ref(),
            Self::Delete => path_item.delete.as_ref(),
        }
    }
}

/// What a structural reference lands on.
enum Target<'a> {
    /// An entry of the media type `examples`.
    Named(&'a RefOr<Example>),
    /// The media type single `example`.
    Direct(&'a Value),
}

#[derive(derive_more::From)]
enum Failure {
    Broken(PathStep),
    Unsupported(ResolveError),
}

/// Looks up the example targeted by a `#/paths/...` reference.
///
/// Broken references are reported and yield `None`.
pub(super) fn lookup(
    owner: &str,
    reference: &str,
    document: &ApiDocument,
    diagnostics: &mut impl Diagnostics,
) -> Result<Option<RefOr<Example>>, ResolveError> {
    match follow(reference, document) {
        Ok(Target::Named(example)) => Ok(Some(example.clone())),
        Ok(Target::Direct(value)) => {
            diagnostics.report(Diagnostic::MalformedDirectRef {
                reference: reference.to_string(),
                owner: owner.to_string(),
            });
            Ok(Some(RefOr::T(example_of(value.clone()))))
        }
        Err(Failure::Broken(step)) => {
            diagnostics.report(Diagnostic::BrokenPathRef {
                reference: reference.to_string(),
                owner: owner.to_string(),
                step,
            });
            Ok(None)
        }
        Err(Failure::Unsupported(error)) => Err(error),
    }
}

fn follow<'a>(reference: &str, document: &'a ApiDocument) -> Result<Target<'a>, Failure> {
    let pointer = reference.strip_prefix(PATHS_REF_PREFIX).unwrap_or(reference);
    let segments = decode_segments(pointer).map_err(|error| PathStep::InvalidPointer { error })?;
    let segment = |index: usize, expected: &'static str| {
        segments
            .get(index)
            .map(String::as_str)
            .ok_or(PathStep::MissingSegment { expected })
    };

    let path = segment(0, "path")?;
    let path_item = document
        .openapi()
        .paths
        .paths
        .get(path)
        .ok_or_else(|| PathStep::UnknownPath {
            path: path.to_string(),
        })?;

    let method = OperationMethod::parse(reference, segment(1, "operation")?)?;
    let operation = method
        .select(path_item)
        .ok_or_else(|| PathStep::UnknownOperation {
            method: method.to_string(),
        })?;

    let section = segment(2, "requestBody or responses")?;
    let (media_type, content_type_index) = if section == REQUEST_BODY_SEGMENT {
        let request_body = operation
            .request_body
            .as_ref()
            .ok_or(PathStep::MissingContent)?;
        (
            find_media_type(&request_body.content, segment(4, "content type"))?,
            4,
        )
    } else {
        let status = segment(3, "response status")?;
        let response = match operation.responses.responses.get(status) {
            Some(RefOr::T(response)) => response,
            Some(RefOr::Ref(response_ref)) => document
                .referenced_response(&response_ref.ref_location)
                .ok_or_else(|| PathStep::UnknownComponentResponse {
                    reference: response_ref.ref_location.clone(),
                })?,
            None => {
                return Err(PathStep::UnknownResponse {
                    status: status.to_string(),
                }
                .into());
            }
        };
        (
            find_media_type(&response.content, segment(5, "content type"))?,
            5,
        )
    };

    if segments.get(content_type_index + 1).map(String::as_str) == Some(EXAMPLES_SEGMENT) {
        let name = segment(content_type_index + 2, "example name")?;
        let example = media_type
            .examples
            .get(name)
            .ok_or_else(|| PathStep::UnknownNamedExample {
                name: name.to_string(),
            })?;
        return Ok(Target::Named(example));
    }

    media_type
        .example
        .as_ref()
        .map(Target::Direct)
        .ok_or(Failure::Broken(PathStep::MissingDirectExample))
}

/// Request bodies and responses do not share the same map type for their content.
fn find_media_type<'a>(
    content: impl IntoIterator<Item = (&'a String, &'a Content)>,
    content_type: Result<&str, PathStep>,
) -> Result<&'a Content, PathStep> {
    let mut content = content.into_iter().peekable();
    if content.peek().is_none() {
        return Err(PathStep::MissingContent);
    }

    let content_type = content_type?;
    content
        .find(|(name, _)| name.as_str() == content_type)
        .map(|(_, media_type)| media_type)
        .ok_or_else(|| PathStep::UnknownContentType {
            content_type: content_type.to_string(),
        })
}
