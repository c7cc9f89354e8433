use std::path::PathBuf;

use exemplify_core::ApiDocument;
use rstest::fixture;
use serde_json::json;
use tracing::info;

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A small pet store, with examples declared in every place they can be referenced from.
#[fixture]
pub fn petstore() -> ApiDocument {
    init_tracing();
    let document = json!({
        "openapi": "3.1.0",
        "info": { "title": "Pet store", "version": "1.0.0" },
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "responses": {
                        "200": {
                            "description": "The pets",
                            "content": {
                                "application/json": {
                                    "example": { "id": 2 },
                                    "examples": {
                                        "sample": { "value": { "id": 1 } }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "operationId": "createPet",
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "examples": {
                                    "rex": { "value": { "name": "Rex" } }
                                }
                            }
                        }
                    },
                    "responses": {
                        "201": { "$ref": "#/components/responses/Pet" }
                    }
                }
            },
            "/pets/{petId}": {
                "get": {
                    "operationId": "showPetById",
                    "responses": {
                        "200": {
                            "description": "A pet",
                            "content": {
                                "application/vnd~pet+json": {
                                    "examples": {
                                        "felix": { "value": { "name": "Felix" } }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "example": { "name": "Rex" }
                }
            },
            "responses": {
                "Pet": {
                    "description": "The created pet",
                    "content": {
                        "application/json": {
                            "schema": { "$ref": "#/components/schemas/Pet" }
                        }
                    }
                }
            },
            "examples": {
                "foo": { "value": { "a": 1 } },
                "alias": { "$ref": "#/components/examples/foo" }
            }
        }
    });

    match ApiDocument::from_value(document) {
        Ok(document) => document,
        Err(error) => {
            panic!("invalid petstore document: {error:?}");
        }
    }
}
