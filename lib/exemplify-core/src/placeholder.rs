use serde::Serialize;
use serde_json::Value;
use utoipa::openapi::example::{Example, ExampleBuilder};
use utoipa::openapi::{Ref, RefOr};

/// One example of a media type, waiting to be inlined.
///
/// The example itself is either:
/// - absent, the placeholder will be dropped by [`resolve`](crate::resolve)
/// - a reference ([`RefOr::Ref`]) into the document, still to be resolved
/// - a concrete [`Example`] ([`RefOr::T`]), inline or already resolved
///
/// Placeholders are created by [`collect`](crate::collect) and only the resolver
/// replaces their example.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePlaceholder {
    key: String,
    content_type: String,
    is_json: bool,
    example: Option<RefOr<Example>>,
}

/// Where a placeholder stands in the resolution process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderState {
    /// No example at all.
    Missing,
    /// The example is still a reference.
    Reference,
    /// The example is concrete.
    Concrete,
}

impl ExamplePlaceholder {
    /// Creates a placeholder holding any example (or none).
    pub fn new(
        key: impl Into<String>,
        content_type: impl Into<String>,
        example: Option<RefOr<Example>>,
    ) -> Self {
        let content_type = content_type.into();
        Self {
            key: key.into(),
            is_json: is_json(&content_type),
            content_type,
            example,
        }
    }

    /// Creates a placeholder wrapping a concrete example value.
    pub fn concrete(key: impl Into<String>, content_type: impl Into<String>, value: Value) -> Self {
        Self::new(key, content_type, Some(RefOr::T(example_of(value))))
    }

    /// Creates a placeholder pointing to an example elsewhere in the document.
    pub fn reference(
        key: impl Into<String>,
        content_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::new(key, content_type, Some(RefOr::Ref(Ref::new(location))))
    }

    /// Creates a placeholder without any example.
    pub fn missing(key: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::new(key, content_type, None)
    }

    /// The example name, `example` for single examples.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The content type of the owning media type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Whether the content type is a JSON one.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.is_json
    }

    /// The example, concrete or still a reference.
    #[must_use]
    pub fn example(&self) -> Option<&RefOr<Example>> {
        self.example.as_ref()
    }

    /// The reference location while the example is not resolved.
    #[must_use]
    pub fn reference_location(&self) -> Option<&str> {
        match &self.example {
            Some(RefOr::Ref(reference)) => Some(&reference.ref_location),
            _ => None,
        }
    }

    /// The concrete example value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match &self.example {
            Some(RefOr::T(example)) => example.value.as_ref(),
            _ => None,
        }
    }

    /// The current resolution state.
    #[must_use]
    pub fn state(&self) -> PlaceholderState {
        match &self.example {
            None => PlaceholderState::Missing,
            Some(RefOr::Ref(_)) => PlaceholderState::Reference,
            Some(RefOr::T(_)) => PlaceholderState::Concrete,
        }
    }

    pub(crate) fn replace_example(&mut self, example: Example) {
        self.example = Some(RefOr::T(example));
    }
}

/// Wraps a raw value into an [`Example`].
pub(crate) fn example_of(value: Value) -> Example {
    ExampleBuilder::new().value(Some(value)).build()
}

fn is_json(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}
