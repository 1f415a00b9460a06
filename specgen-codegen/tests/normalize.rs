use serde_json::{Value, json};
use specgen_codegen::{DiagnosticKind, Normalized, normalize};
use specgen_core::Selector;
use specgen_input::{Document, ParserConfig};
use specgen_ir::{
    IrContext, IrSchema, PaginationLocation, ResponseKind, SchemaKind, SecuritySchemeKind,
};

const PETSTORE: &str = r##"
openapi: 3.0.3
info:
  title: Petstore
  version: 1.0.0
servers:
  - url: https://petstore.example.com/v1
paths:
  /pets:
    get:
      operationId: listPets
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
        - name: cursor
          in: query
          schema:
            type: string
      responses:
        "200":
          description: A page of pets
          content:
            application/json:
              schema:
                type: array
                items:
                  $ref: "#/components/schemas/Pet"
        default:
          description: unexpected error
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Error"
    post:
      operationId: createPet
      requestBody:
        required: true
        content:
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                name:
                  type: string
      responses:
        "201":
          description: Created
  /pets/{petId}:
    parameters:
      - name: petId
        in: path
        required: true
        schema:
          type: string
    get:
      responses:
        "200":
          description: A pet
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
components:
  schemas:
    Pet:
      type: object
      required: [id, name]
      properties:
        id:
          type: integer
          format: int64
        name:
          type: string
        status:
          type: string
          enum: [available, sold]
        tag:
          type: string
          nullable: true
    Error:
      type: object
      properties:
        code:
          type: integer
        message:
          type: string
"##;

fn normalize_value(value: Value) -> Normalized {
    let document = Document::from_value(value).unwrap();
    normalize(&document, &ParserConfig::default())
}

fn schema_keys(ir: &IrContext) -> Vec<String> {
    ir.schemas.keys().map(ToString::to_string).collect()
}

fn property<'a>(ir: &'a IrContext, schema: &str, name: &str) -> &'a IrSchema {
    let entry = ir.schema(&Selector::reference(schema)).unwrap();
    let SchemaKind::Object { properties, .. } = &entry.schema.kind else {
        panic!("{schema} is not an object");
    };
    &properties[name].schema
}

fn property_names(ir: &IrContext, selector: &Selector) -> Vec<String> {
    let entry = ir.schema(selector).unwrap();
    let SchemaKind::Object { properties, .. } = &entry.schema.kind else {
        panic!("{selector} is not an object");
    };
    properties.keys().cloned().collect()
}

#[test]
fn test_petstore_selectors_and_naming() {
    let document = Document::from_yaml_str(PETSTORE, "petstore.yaml").unwrap();
    let Normalized { ir, diagnostics } = normalize(&document, &ParserConfig::default());

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        schema_keys(&ir),
        vec![
            "ref:Pet",
            "ref:Error",
            "inline:schema/Pet/status",
            "inline:operation/listPets/response/200",
            "inline:operation/listPets/error/default",
            "inline:operation/createPet/request",
            "inline:operation/getPetsByPetId/response/200",
        ]
    );

    let names: Vec<_> = ir.schemas.values().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Pet",
            "Error",
            "PetStatus",
            "ListPetsResponse",
            "ListPetsErrorDefault",
            "CreatePetData",
            "GetPetsByPetIdResponse",
        ]
    );

    let operations: Vec<_> = ir.operations.keys().map(ToString::to_string).collect();
    assert_eq!(
        operations,
        vec![
            "operation:listPets",
            "operation:createPet",
            "operation:getPetsByPetId"
        ]
    );
    assert_eq!(ir.meta.title, "Petstore");
    assert_eq!(ir.servers[0].url, "https://petstore.example.com/v1");
}

#[test]
fn test_petstore_operation_details() {
    let document = Document::from_yaml_str(PETSTORE, "petstore.yaml").unwrap();
    let ir = normalize(&document, &ParserConfig::default()).ir;

    let list = ir.operation(&Selector::operation("listPets")).unwrap();
    let pagination = list.pagination.as_ref().unwrap();
    assert_eq!(pagination.parameter, "cursor");
    assert_eq!(pagination.location, PaginationLocation::Query);
    assert_eq!(list.responses.len(), 2);
    assert_eq!(list.responses[0].kind, ResponseKind::Success);
    assert_eq!(list.responses[1].kind, ResponseKind::Error);
    assert_eq!(
        list.primary_response().unwrap().schema,
        Some(Selector::inline("operation/listPets/response/200"))
    );

    let create = ir.operation(&Selector::operation("createPet")).unwrap();
    let body = create.request_body.as_ref().unwrap();
    assert!(body.required);
    assert_eq!(body.media_type, "application/json");
    assert_eq!(body.schema, Selector::inline("operation/createPet/request"));
    assert_eq!(create.responses[0].schema, None);

    let get = ir.operation(&Selector::operation("getPetsByPetId")).unwrap();
    assert_eq!(get.parameters.len(), 1);
    assert_eq!(get.parameters[0].name, "petId");
    assert!(get.parameters[0].required);
    let response = ir.schema(&Selector::inline("operation/getPetsByPetId/response/200")).unwrap();
    assert_eq!(
        response.schema.as_ref_selector(),
        Some(&Selector::reference("Pet"))
    );
}

#[test]
fn test_petstore_schema_details() {
    let document = Document::from_yaml_str(PETSTORE, "petstore.yaml").unwrap();
    let ir = normalize(&document, &ParserConfig::default()).ir;

    let pet = &ir.schema(&Selector::reference("Pet")).unwrap().schema;
    let SchemaKind::Object { properties, .. } = &pet.kind else {
        panic!("Pet is not an object");
    };
    assert!(properties["id"].required);
    assert!(!properties["status"].required);
    assert_eq!(properties["id"].schema.format.as_deref(), Some("int64"));
    assert_eq!(
        properties["status"].schema.as_ref_selector(),
        Some(&Selector::inline("schema/Pet/status"))
    );
    assert!(properties["tag"].schema.nullable);

    let status = &ir.schema(&Selector::inline("schema/Pet/status")).unwrap().schema;
    assert_eq!(
        status.kind,
        SchemaKind::Enum {
            values: vec![json!("available"), json!("sold")]
        }
    );
}

#[test]
fn test_swagger_and_openapi_share_selectors() {
    let v2 = normalize_value(json!({
        "swagger": "2.0",
        "info": {"title": "t", "version": "1"},
        "host": "api.example.com",
        "basePath": "/v1",
        "paths": {
            "/pets": {
                "post": {
                    "operationId": "createPet",
                    "parameters": [{
                        "name": "body",
                        "in": "body",
                        "required": true,
                        "schema": {"$ref": "#/definitions/Pet"}
                    }],
                    "responses": {
                        "200": {"description": "ok", "schema": {"$ref": "#/definitions/Pet"}}
                    }
                }
            }
        },
        "definitions": {
            "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
        }
    }));
    let v3 = normalize_value(json!({
        "openapi": "3.1.0",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/pets": {
                "post": {
                    "operationId": "createPet",
                    "requestBody": {
                        "required": true,
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}
                    },
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Pet"}}}
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
            }
        }
    }));

    assert_eq!(schema_keys(&v2.ir), schema_keys(&v3.ir));
    assert_eq!(
        v2.ir.schema(&Selector::reference("Pet")).unwrap().schema,
        v3.ir.schema(&Selector::reference("Pet")).unwrap().schema
    );
    assert_eq!(
        v2.ir.schema(&Selector::reference("Pet")).unwrap().pointer.as_deref(),
        Some("#/components/schemas/Pet")
    );
    let body = v2.ir.operations[0].request_body.as_ref().unwrap();
    assert!(body.required);
    assert_eq!(body.media_type, "application/json");
    assert_eq!(v2.ir.servers[0].url, "https://api.example.com/v1");
}

#[test]
fn test_swagger_form_data_becomes_body() {
    let Normalized { ir, .. } = normalize_value(json!({
        "swagger": "2.0",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/pets/{id}/photo": {
                "post": {
                    "operationId": "uploadPhoto",
                    "parameters": [
                        {"name": "id", "in": "path", "required": true, "type": "integer"},
                        {"name": "file", "in": "formData", "required": true, "type": "file"},
                        {"name": "caption", "in": "formData", "type": "string"}
                    ],
                    "responses": {"204": {"description": "done"}}
                }
            }
        }
    }));

    let operation = &ir.operations[0];
    assert_eq!(operation.parameters.len(), 1);
    assert_eq!(operation.parameters[0].schema.kind, SchemaKind::Integer);

    let body = operation.request_body.as_ref().unwrap();
    assert_eq!(body.media_type, "multipart/form-data");
    let data = &ir.schema(&body.schema).unwrap();
    assert_eq!(data.name, "UploadPhotoData");
    let SchemaKind::Object { properties, .. } = &data.schema.kind else {
        panic!("form body is not an object");
    };
    assert!(properties["file"].required);
    assert!(!properties["caption"].required);
    assert_eq!(properties["file"].schema.kind, SchemaKind::String);
    assert_eq!(properties["file"].schema.format.as_deref(), Some("binary"));
}

#[test]
fn test_self_and_mutual_recursion() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.1.0",
        "info": {"title": "t", "version": "1"},
        "components": {
            "schemas": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "children": {"type": "array", "items": {"$ref": "#/components/schemas/Node"}},
                        "parent": {"$ref": "#/components/schemas/Node"}
                    }
                },
                "A": {"type": "object", "properties": {"b": {"$ref": "#/components/schemas/B"}}},
                "B": {"type": "object", "properties": {"a": {"$ref": "#/components/schemas/A"}}}
            }
        }
    }));

    assert!(diagnostics.is_empty());
    assert_eq!(schema_keys(&ir), vec!["ref:Node", "ref:A", "ref:B"]);
    assert_eq!(
        property(&ir, "Node", "parent").as_ref_selector(),
        Some(&Selector::reference("Node"))
    );
    assert_eq!(
        property(&ir, "A", "b").as_ref_selector(),
        Some(&Selector::reference("B"))
    );
    assert_eq!(
        property(&ir, "B", "a").as_ref_selector(),
        Some(&Selector::reference("A"))
    );
}

#[test]
fn test_unresolved_reference_omits_dependents() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.0.0",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "responses": {
                        "200": {
                            "description": "ok",
                            "content": {"application/json": {"schema": {
                                "type": "array",
                                "items": {"$ref": "#/components/schemas/Pet"}
                            }}}
                        }
                    }
                }
            },
            "/tags": {
                "get": {
                    "operationId": "listTags",
                    "responses": {"200": {"description": "ok"}}
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "properties": {"owner": {"$ref": "#/components/schemas/Missing"}}
                },
                "Shelf": {
                    "type": "object",
                    "properties": {"pets": {"type": "array", "items": {"$ref": "#/components/schemas/Pet"}}}
                },
                "Remote": {"$ref": "common.yaml#/Remote"},
                "Tag": {"type": "string"}
            }
        }
    }));

    assert_eq!(schema_keys(&ir), vec!["ref:Tag"]);
    let operations: Vec<_> = ir.operations.keys().map(ToString::to_string).collect();
    assert_eq!(operations, vec!["operation:listTags"]);

    let unresolved: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::UnresolvedReference)
        .collect();
    assert_eq!(unresolved.len(), 2);
    assert!(unresolved[0].message.contains("#/components/schemas/Missing"));
    assert_eq!(
        unresolved[0].location.as_deref(),
        Some("#/components/schemas/Pet/properties/owner")
    );
    assert_eq!(unresolved[0].selector, Some(Selector::reference("Pet")));
    assert!(unresolved[1].message.contains("common.yaml#/Remote"));

    let omitted: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::OmittedEntity)
        .filter_map(|d| d.selector.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(
        omitted,
        vec![
            "ref:Shelf",
            "inline:operation/listPets/response/200",
            "operation:listPets"
        ]
    );
}

#[test]
fn test_duplicate_operation_ids_are_renamed() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.0.0",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/pets": {"get": {"operationId": "getPet", "responses": {}}},
            "/pets/{id}": {"get": {"operationId": "getPet", "responses": {}}}
        }
    }));

    let ids: Vec<_> = ir.operations.values().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["getPet", "getPet2"]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::DuplicateOperationId);
}

#[test]
fn test_nullability_across_versions() {
    let cases = [
        json!({
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "definitions": {
                "Pet": {"type": "object", "properties": {"tag": {"type": "string", "x-nullable": true}}}
            }
        }),
        json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "components": {"schemas": {
                "Pet": {"type": "object", "properties": {"tag": {"type": "string", "nullable": true}}}
            }}
        }),
        json!({
            "openapi": "3.1.0",
            "info": {"title": "t", "version": "1"},
            "components": {"schemas": {
                "Pet": {"type": "object", "properties": {"tag": {"type": ["string", "null"]}}}
            }}
        }),
        json!({
            "openapi": "3.1.0",
            "info": {"title": "t", "version": "1"},
            "components": {"schemas": {
                "Pet": {"type": "object", "properties": {"tag": {"anyOf": [{"type": "string"}, {"type": "null"}]}}}
            }}
        }),
    ];

    for case in cases {
        let ir = normalize_value(case).ir;
        let tag = property(&ir, "Pet", "tag");
        assert_eq!(tag.kind, SchemaKind::String);
        assert!(tag.nullable, "{ir:?}");
    }
}

#[test]
fn test_explicit_discriminator_mapping() {
    let ir = normalize_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "t", "version": "1"},
        "paths": {},
        "components": {"schemas": {
            "Pet": {
                "oneOf": [
                    {"$ref": "#/components/schemas/Cat"},
                    {"$ref": "#/components/schemas/Dog"}
                ],
                "discriminator": {
                    "propertyName": "kind",
                    "mapping": {"cat": "#/components/schemas/Cat", "dog": "Dog"}
                }
            },
            "Cat": {"type": "object", "properties": {"kind": {"type": "string"}}},
            "Dog": {"type": "object", "properties": {"kind": {"type": "string"}}}
        }}
    }))
    .ir;

    let pet = &ir.schema(&Selector::reference("Pet")).unwrap().schema;
    let SchemaKind::OneOf {
        discriminator: Some(discriminator),
        members,
    } = &pet.kind
    else {
        panic!("Pet is not a discriminated union");
    };
    assert_eq!(members.len(), 2);
    assert_eq!(discriminator.mapping["cat"], Selector::reference("Cat"));
    assert_eq!(discriminator.mapping["dog"], Selector::reference("Dog"));
}

#[test]
fn test_shared_parameters_and_security() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "t", "version": "1"},
        "security": [{"apiKey": []}],
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "security": [{"oauth": ["read:pets"]}],
                    "parameters": [{"$ref": "#/components/parameters/Limit"}],
                    "responses": {"200": {"$ref": "#/components/responses/Pets"}}
                }
            }
        },
        "components": {
            "parameters": {
                "Limit": {"name": "limit", "in": "query", "schema": {"type": "integer"}}
            },
            "responses": {
                "Pets": {
                    "description": "pets",
                    "content": {"application/json": {"schema": {"type": "array", "items": {"type": "string"}}}}
                }
            },
            "securitySchemes": {
                "apiKey": {"type": "apiKey", "name": "X-Api-Key", "in": "header"},
                "oauth": {"type": "oauth2", "flows": {"implicit": {
                    "authorizationUrl": "https://auth.example.com",
                    "scopes": {"read:pets": "read"}
                }}}
            }
        }
    }));

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert!(ir.parameter(&Selector::parameter("Limit")).is_some());

    let list = ir.operation(&Selector::operation("listPets")).unwrap();
    assert_eq!(list.parameters[0].selector, Some(Selector::parameter("Limit")));
    assert_eq!(list.responses[0].media_type.as_deref(), Some("application/json"));
    assert!(list.responses[0].schema.is_some());
    assert_eq!(list.security.as_ref().unwrap()[0].scopes, vec!["read:pets"]);

    assert_eq!(ir.security[0].scheme, "apiKey");
    assert!(matches!(
        ir.security_schemes["oauth"].kind,
        SecuritySchemeKind::OAuth2 { .. }
    ));
}

#[test]
fn test_normalization_is_deterministic() {
    let document = Document::from_yaml_str(PETSTORE, "petstore.yaml").unwrap();
    let first = normalize(&document, &ParserConfig::default());
    let second = normalize(&document, &ParserConfig::default());

    assert_eq!(
        serde_json::to_string(&first.ir).unwrap(),
        serde_json::to_string(&second.ir).unwrap()
    );
}

#[test]
fn test_properties_required_by_default() {
    let document = Document::from_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "t", "version": "1"},
        "paths": {},
        "components": {"schemas": {
            "Pet": {"type": "object", "properties": {"name": {"type": "string"}}},
            "Tag": {"type": "object", "required": [], "properties": {"name": {"type": "string"}}}
        }}
    }))
    .unwrap();
    let config = ParserConfig {
        properties_required_by_default: true,
        ..ParserConfig::default()
    };
    let ir = normalize(&document, &config).ir;

    let required = |schema: &str| {
        let entry = ir.schema(&Selector::reference(schema)).unwrap();
        let SchemaKind::Object { properties, .. } = &entry.schema.kind else {
            panic!("not an object");
        };
        properties["name"].required
    };
    assert!(required("Pet"));
    assert!(!required("Tag"));
}

#[test]
fn test_schema_and_operation_context_paths_never_meet() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/pets": {
                "post": {
                    "operationId": "createPet",
                    "requestBody": {
                        "content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {"bodyField": {"type": "string"}}
                        }}}
                    },
                    "responses": {"201": {"description": "created"}}
                }
            }
        },
        "components": {"schemas": {
            "createPet": {
                "type": "object",
                "properties": {"request": {
                    "type": "object",
                    "properties": {"schemaField": {"type": "string"}}
                }}
            }
        }}
    }));

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        schema_keys(&ir),
        vec![
            "ref:createPet",
            "inline:schema/createPet/request",
            "inline:operation/createPet/request",
        ]
    );

    let request = property(&ir, "createPet", "request").as_ref_selector().unwrap();
    assert_eq!(property_names(&ir, request), vec!["schemaField"]);
    let body = &ir.operations[0].request_body.as_ref().unwrap().schema;
    assert_eq!(property_names(&ir, body), vec!["bodyField"]);
}

#[test]
fn test_property_names_with_slashes_are_escaped() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "t", "version": "1"},
        "paths": {},
        "components": {"schemas": {
            "Pet": {
                "type": "object",
                "properties": {
                    "a/b": {"type": "object", "properties": {"slash": {"type": "string"}}},
                    "a": {
                        "type": "object",
                        "properties": {"b": {
                            "type": "object",
                            "properties": {"nested": {"type": "string"}}
                        }}
                    }
                }
            }
        }}
    }));

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        schema_keys(&ir),
        vec![
            "ref:Pet",
            "inline:schema/Pet/a~1b",
            "inline:schema/Pet/a/b",
            "inline:schema/Pet/a",
        ]
    );

    let slashed = property(&ir, "Pet", "a/b").as_ref_selector().unwrap();
    assert_eq!(property_names(&ir, slashed), vec!["slash"]);
    let nested = ir.schema(&Selector::inline("schema/Pet/a/b")).unwrap();
    assert_eq!(property_names(&ir, &nested.selector), vec!["nested"]);
}

#[test]
fn test_pagination_in_request_body() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/pets/search": {
                "post": {
                    "operationId": "searchPets",
                    "requestBody": {
                        "content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {
                                "term": {"type": "string"},
                                "cursor": {"type": "string"}
                            }
                        }}}
                    },
                    "responses": {"200": {"description": "ok"}}
                }
            },
            "/pets/browse": {
                "post": {
                    "operationId": "browsePets",
                    "requestBody": {
                        "content": {"application/json": {"schema": {
                            "$ref": "#/components/schemas/PageRequest"
                        }}}
                    },
                    "responses": {"200": {"description": "ok"}}
                }
            },
            "/pets/count": {
                "post": {
                    "operationId": "countPets",
                    "requestBody": {
                        "content": {"application/json": {"schema": {
                            "type": "object",
                            "properties": {"term": {"type": "string"}}
                        }}}
                    },
                    "responses": {"200": {"description": "ok"}}
                }
            }
        },
        "components": {"schemas": {
            "PageRequest": {
                "type": "object",
                "properties": {"page": {"type": "integer"}}
            }
        }}
    }));

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let pagination = |id: &str| {
        ir.operation(&Selector::operation(id))
            .unwrap()
            .pagination
            .as_ref()
            .map(|p| (p.parameter.as_str(), p.location))
    };
    assert_eq!(
        pagination("searchPets"),
        Some(("cursor", PaginationLocation::Body))
    );
    assert_eq!(
        pagination("browsePets"),
        Some(("page", PaginationLocation::Body))
    );
    assert_eq!(pagination("countPets"), None);
}

#[test]
fn test_unsupported_constructs_are_reported() {
    let Normalized { ir, diagnostics } = normalize_value(json!({
        "openapi": "3.0.3",
        "info": {"title": "t", "version": "1"},
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "parameters": [
                        {"name": "filter", "in": "matrix", "schema": {"type": "string"}},
                        {"name": "limit", "in": "query", "schema": {"type": "integer"}}
                    ],
                    "responses": {"200": {"description": "ok"}}
                }
            }
        },
        "components": {"schemas": {
            "Pet": {"type": "object", "properties": {"id": {"type": "uuid"}}}
        }}
    }));

    let unsupported: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::Unsupported)
        .map(|d| d.location.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(
        unsupported,
        vec![
            "#/components/schemas/Pet/properties/id",
            "#/paths/~1pets/get/parameters/0",
        ]
    );
    assert!(diagnostics.iter().all(|d| d.severity.is_warning()));

    let list = ir.operation(&Selector::operation("listPets")).unwrap();
    let names: Vec<_> = list.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["limit"]);
    assert_eq!(property(&ir, "Pet", "id").kind, SchemaKind::Unknown);
}
