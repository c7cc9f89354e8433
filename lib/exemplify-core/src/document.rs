//! Read-only view over an OpenAPI document.
//!
//! [`ApiDocument`] wraps a [`utoipa::openapi::OpenApi`] and adds what the
//! example resolution needs but the utoipa model does not carry: the
//! `components.examples` registry.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::Error as _;
use serde_json::{Map, Value};
use tracing::debug;
use utoipa::openapi::example::Example;
use utoipa::openapi::{OpenApi, RefOr, Response, Schema};

use crate::DocumentError;

const COMPONENTS_RESPONSES_REF_PREFIX: &str = "#/components/responses/";

/// An OpenAPI document, as seen by the collector and the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    openapi: OpenApi,
    examples: Option<IndexMap<String, RefOr<Example>>>,
}

impl ApiDocument {
    /// Wraps a document without any component example.
    pub fn new(openapi: OpenApi) -> Self {
        Self {
            openapi,
            examples: None,
        }
    }

    /// Registers a `#/components/examples/{name}` entry.
    #[must_use]
    pub fn with_component_example(
        mut self,
        name: impl Into<String>,
        example: RefOr<Example>,
    ) -> Self {
        self.examples
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), example);
        self
    }

    /// The underlying utoipa document.
    #[must_use]
    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    /// The `components.examples` registry in document order, `None` when the document does not declare one.
    #[must_use]
    pub fn component_examples(&self) -> Option<&IndexMap<String, RefOr<Example>>> {
        self.examples.as_ref()
    }

    /// The `components.schemas` entry with this name.
    #[must_use]
    pub fn component_schema(&self, name: &str) -> Option<&RefOr<Schema>> {
        self.openapi.components.as_ref()?.schemas.get(name)
    }

    /// The `components.responses` entry with this name.
    #[must_use]
    pub fn component_response(&self, name: &str) -> Option<&RefOr<Response>> {
        self.openapi.components.as_ref()?.responses.get(name)
    }

    /// The response targeted by a `#/components/responses/{name}` reference.
    ///
    /// Only one level is followed, a component response that is itself a
    /// reference yields `None`.
    #[must_use]
    pub fn referenced_response(&self, location: &str) -> Option<&Response> {
        let name = location.strip_prefix(COMPONENTS_RESPONSES_REF_PREFIX)?;
        match self.component_response(name)? {
            RefOr::T(response) => Some(response),
            RefOr::Ref(_) => None,
        }
    }

    /// Builds the document from an already parsed JSON value.
    ///
    /// `openapi: 3.0.x` documents are read through the 3.1 model.
    ///
    /// # Errors
    ///
    /// Fails when the value is not an object, has no `openapi` field, or does
    /// not match the OpenAPI model.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        let Value::Object(mut root) = value else {
            return Err(DocumentError::InvalidSection {
                section: "root",
                error: serde_json::Error::custom("expected an object"),
            });
        };

        normalize_version(&mut root)?;
        let examples = extract_component_examples(&root)?;
        let openapi = serde_json::from_value::<OpenApi>(Value::Object(root))?;

        Ok(Self { openapi, examples })
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// See [`ApiDocument::from_value`], plus invalid JSON.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        let value = serde_json::from_str::<Value>(json)?;
        Self::from_value(value)
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// See [`ApiDocument::from_value`], plus invalid YAML.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DocumentError> {
        let value = serde_saphyr::from_str::<Value>(yaml).map_err(|err| {
            DocumentError::YamlError {
                error: err.to_string(),
            }
        })?;
        Self::from_value(value)
    }

    /// Reads a document from disk, as YAML for `.yml`/`.yaml` files and JSON otherwise.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let ext = path.extension().unwrap_or_default();
        #[cfg(feature = "yaml")]
        if ext == "yml" || ext == "yaml" {
            return Self::from_yaml_str(&contents);
        }
        debug!(?ext, "reading document as JSON");

        Self::from_json_str(&contents)
    }
}

impl From<OpenApi> for ApiDocument {
    fn from(openapi: OpenApi) -> Self {
        Self::new(openapi)
    }
}

fn normalize_version(root: &mut Map<String, Value>) -> Result<(), DocumentError> {
    let version = root
        .get("openapi")
        .and_then(Value::as_str)
        .ok_or(DocumentError::MissingVersion)?;

    if version.starts_with("3.0") {
        debug!(%version, "reading OpenAPI 3.0 document with the 3.1 model");
        root.insert("openapi".to_string(), Value::from("3.1.0"));
    }
    Ok(())
}

fn extract_component_examples(
    root: &Map<String, Value>,
) -> Result<Option<IndexMap<String, RefOr<Example>>>, DocumentError> {
    let Some(examples) = root.get("components").and_then(|comp| comp.get("examples")) else {
        return Ok(None);
    };

    serde_json::from_value(examples.clone())
        .map(Some)
        .map_err(|error| DocumentError::InvalidSection {
            section: "components.examples",
            error,
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use utoipa::openapi::OpenApiBuilder;

    use super::*;

    fn minimal(version: &str) -> Value {
        json!({
            "openapi": version,
            "info": { "title": "Pets", "version": "1.0.0" },
            "paths": {}
        })
    }

    #[test]
    fn should_read_component_examples() {
        let mut value = minimal("3.1.0");
        value["components"] = json!({
            "examples": {
                "rex": { "summary": "A dog", "value": { "name": "Rex" } },
                "alias": { "$ref": "#/components/examples/rex" }
            }
        });

        let document = ApiDocument::from_value(value).expect("valid document");
        let examples = document.component_examples().expect("examples registry");

        assert!(matches!(examples.get("rex"), Some(RefOr::T(example)) if example.value == Some(json!({"name": "Rex"}))));
        assert!(matches!(examples.get("alias"), Some(RefOr::Ref(reference)) if reference.ref_location == "#/components/examples/rex"));
    }

    #[test]
    fn should_accept_openapi_30_documents() {
        let document = ApiDocument::from_value(minimal("3.0.3")).expect("valid document");

        assert!(document.component_examples().is_none());
        assert!(document.openapi().paths.paths.is_empty());
    }

    #[test]
    fn should_reject_missing_version() {
        let error = ApiDocument::from_value(json!({ "paths": {} })).expect_err("no version");

        assert!(matches!(error, DocumentError::MissingVersion));
    }

    #[test]
    fn should_reject_invalid_examples_section() {
        let mut value = minimal("3.1.0");
        value["components"] = json!({ "examples": ["not", "a", "map"] });

        let error = ApiDocument::from_value(value).expect_err("invalid examples");

        assert!(matches!(
            error,
            DocumentError::InvalidSection {
                section: "components.examples",
                ..
            }
        ));
    }

    #[test]
    fn should_register_component_examples() {
        let document = ApiDocument::new(OpenApiBuilder::new().build())
            .with_component_example("rex", RefOr::T(crate::placeholder::example_of(json!("Rex"))));

        assert_eq!(document.component_examples().map(IndexMap::len), Some(1));
        assert!(document.component_schema("Pet").is_none());
    }
}
