//! Collecting example placeholders from media types.

use serde_json::Value;
use utoipa::openapi::schema::ArrayItems;
use utoipa::openapi::{Content, RefOr, Schema};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resolver::pointer::decode_segment;
use crate::{ApiDocument, ExamplePlaceholder};

const COMPONENTS_SCHEMAS_REF_PREFIX: &str = "#/components/schemas";

/// The key used for single (non named) examples.
pub const SINGLE_EXAMPLE_KEY: &str = "example";

/// Appends the example placeholders of a media type to `examples`.
///
/// In order:
/// 1. the media type `example`, keyed `example` (kept as a reference when it is a `{"$ref": ...}` object)
/// 2. every entry of the media type `examples`, keyed by name, in name order
///    (utoipa keeps them in a sorted map, the document order is lost)
/// 3. the `example` of the component schema referenced by the media type schema,
///    directly or as array items
///
/// Never fails, a media type without examples adds nothing.
pub fn collect(
    document: &ApiDocument,
    media_type: &Content,
    response_code: &str,
    content_type: &str,
    examples: &mut Vec<ExamplePlaceholder>,
    diagnostics: &mut impl Diagnostics,
) {
    if let Some(example) = &media_type.example {
        examples.push(inline_example(content_type, example));
    }

    for (key, example) in &media_type.examples {
        diagnostics.report(Diagnostic::ExampleCollected {
            key: key.clone(),
            content_type: content_type.to_string(),
            response_code: response_code.to_string(),
        });
        examples.push(ExamplePlaceholder::new(
            key.as_str(),
            content_type,
            Some(example.clone()),
        ));
    }

    let schema_ref = match &media_type.schema {
        Some(RefOr::Ref(reference)) => Some(reference.ref_location.as_str()),
        Some(RefOr::T(Schema::Array(array))) => match &array.items {
            ArrayItems::RefOrSchema(items) => match items.as_ref() {
                RefOr::Ref(reference) => Some(reference.ref_location.as_str()),
                RefOr::T(_) => None,
            },
            ArrayItems::False => None,
        },
        _ => None,
    };

    if let Some(example) = schema_ref.and_then(|location| schema_example(document, location)) {
        examples.push(ExamplePlaceholder::concrete(
            SINGLE_EXAMPLE_KEY,
            content_type,
            example.clone(),
        ));
    }
}

fn inline_example(content_type: &str, example: &Value) -> ExamplePlaceholder {
    match example.get("$ref").and_then(Value::as_str) {
        Some(location) => ExamplePlaceholder::reference(SINGLE_EXAMPLE_KEY, content_type, location),
        None => ExamplePlaceholder::concrete(SINGLE_EXAMPLE_KEY, content_type, example.clone()),
    }
}

/// The example of the `#/components/schemas/{name}` schema.
fn schema_example<'a>(document: &'a ApiDocument, location: &str) -> Option<&'a Value> {
    if !location.starts_with(COMPONENTS_SCHEMAS_REF_PREFIX) {
        return None;
    }
    let (_, name) = location.rsplit_once('/')?;
    let name = decode_segment(name)?;

    match document.component_schema(&name)? {
        RefOr::T(Schema::Object(object)) => object.example.as_ref().or(object.examples.first()),
        RefOr::T(Schema::Array(array)) => array.example.as_ref().or(array.examples.first()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use utoipa::openapi::schema::{Array, ObjectBuilder};
    use utoipa::openapi::{Components, ContentBuilder, OpenApiBuilder, Ref};

    use super::*;
    use crate::diagnostics::CollectedDiagnostics;
    use crate::placeholder::{PlaceholderState, example_of};

    fn document_with_pet() -> ApiDocument {
        let pet = ObjectBuilder::new()
            .example(Some(json!({"name": "Rex"})))
            .build();
        let mut components = Components::new();
        components
            .schemas
            .insert("Pet".to_string(), RefOr::T(pet.into()));
        components.schemas.insert(
            "Tag".to_string(),
            RefOr::T(ObjectBuilder::new().build().into()),
        );

        ApiDocument::new(
            OpenApiBuilder::new()
                .components(Some(components))
                .build(),
        )
    }

    fn collect_all(document: &ApiDocument, media_type: &Content) -> Vec<ExamplePlaceholder> {
        let mut examples = vec![];
        let mut diagnostics = CollectedDiagnostics::default();
        collect(
            document,
            media_type,
            "200",
            "application/json",
            &mut examples,
            &mut diagnostics,
        );
        examples
    }

    #[test]
    fn should_collect_nothing_without_examples() {
        let media_type = ContentBuilder::new().build();

        let examples = collect_all(&document_with_pet(), &media_type);

        assert!(examples.is_empty());
    }

    #[test]
    fn should_collect_inline_example() {
        let media_type = ContentBuilder::new()
            .example(Some(json!({"id": 1})))
            .build();

        let examples = collect_all(&document_with_pet(), &media_type);

        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].key(), "example");
        assert_eq!(examples[0].value(), Some(&json!({"id": 1})));
        assert!(examples[0].is_json());
    }

    #[test]
    fn should_keep_inline_example_ref() {
        let media_type = ContentBuilder::new()
            .example(Some(json!({"$ref": "#/components/examples/pet"})))
            .build();

        let examples = collect_all(&document_with_pet(), &media_type);

        assert_eq!(examples[0].state(), PlaceholderState::Reference);
        assert_eq!(
            examples[0].reference_location(),
            Some("#/components/examples/pet")
        );
    }

    #[test]
    fn should_collect_named_examples_after_inline_one_by_name() {
        let mut media_type = ContentBuilder::new().example(Some(json!("inline"))).build();
        media_type.examples.insert(
            "dog".to_string(),
            RefOr::Ref(Ref::new("#/components/examples/dog")),
        );
        media_type
            .examples
            .insert("cat".to_string(), RefOr::T(example_of(json!("Tom"))));

        let mut examples = vec![];
        let mut diagnostics = CollectedDiagnostics::default();
        collect(
            &document_with_pet(),
            &media_type,
            "requestBody",
            "application/json",
            &mut examples,
            &mut diagnostics,
        );

        let keys = examples.iter().map(ExamplePlaceholder::key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["example", "cat", "dog"]);
        assert_eq!(examples[2].state(), PlaceholderState::Reference);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.warnings().count(), 0);
    }

    #[test]
    fn should_fall_back_to_schema_example() {
        let media_type = ContentBuilder::new()
            .schema(Some(RefOr::Ref(Ref::new("#/components/schemas/Pet"))))
            .build();

        let examples = collect_all(&document_with_pet(), &media_type);

        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].key(), "example");
        assert_eq!(examples[0].value(), Some(&json!({"name": "Rex"})));
    }

    #[test]
    fn should_fall_back_to_array_items_schema_example() {
        let items = Array::new(RefOr::Ref(Ref::new("#/components/schemas/Pet")));
        let media_type = ContentBuilder::new()
            .schema(Some(RefOr::T(Schema::Array(items))))
            .build();

        let examples = collect_all(&document_with_pet(), &media_type);

        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].value(), Some(&json!({"name": "Rex"})));
    }

    #[test]
    fn should_append_schema_example_after_inline_one() {
        let media_type = ContentBuilder::new()
            .schema(Some(RefOr::Ref(Ref::new("#/components/schemas/Pet"))))
            .example(Some(json!({"name": "Inline"})))
            .build();

        let examples = collect_all(&document_with_pet(), &media_type);

        let values = examples
            .iter()
            .filter_map(ExamplePlaceholder::value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![&json!({"name": "Inline"}), &json!({"name": "Rex"})]);
    }

    #[test]
    fn should_ignore_schema_without_example() {
        let tag = ContentBuilder::new()
            .schema(Some(RefOr::Ref(Ref::new("#/components/schemas/Tag"))))
            .build();
        let unknown = ContentBuilder::new()
            .schema(Some(RefOr::Ref(Ref::new("#/components/schemas/Unknown"))))
            .build();
        let foreign = ContentBuilder::new()
            .schema(Some(RefOr::Ref(Ref::new("#/definitions/Pet"))))
            .build();

        let document = document_with_pet();
        assert!(collect_all(&document, &tag).is_empty());
        assert!(collect_all(&document, &unknown).is_empty());
        assert!(collect_all(&document, &foreign).is_empty());
    }
}
