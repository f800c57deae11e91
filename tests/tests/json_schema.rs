use tests::prelude::*;
use tests::prelude::assert_eq;

use jsonbase::json_schema::DRAFT;

#[test]
fn document_shape() {
    let registry = catalog();
    let doc = registry.json_schema("Publisher", &json!({})).unwrap();

    assert_eq!(
        doc,
        json!({
            "$schema": DRAFT,
            "$ref": "#/definitions/Publisher",
            "definitions": {
                "Publisher": {
                    "type": "object",
                    "title": "Publisher",
                    "properties": {
                        "id": { "title": "id", "type": "integer", "readOnly": true },
                        "name": { "title": "name", "type": "string" },
                    },
                    "required": ["name"],
                },
            },
        })
    );
}

#[test]
fn property_types_and_formats() {
    let registry = catalog();
    let doc = registry.json_schema("Book", &json!({})).unwrap();
    let properties = &doc["definitions"]["Book"]["properties"];

    assert_eq!(
        properties["price"],
        json!({ "title": "price", "type": ["number", "null"], "format": "decimal" })
    );
    assert_eq!(
        properties["published"],
        json!({ "title": "published", "type": ["string", "null"], "format": "date-time" })
    );
    assert_eq!(
        properties["rating"],
        json!({ "title": "rating", "type": ["number", "null"] })
    );
    assert_eq!(
        properties["in_print"],
        json!({ "title": "in_print", "type": ["boolean", "null"], "default": true })
    );
    assert_eq!(
        properties["tags"],
        json!({ "title": "tags", "type": ["array", "null"] })
    );
    assert_eq!(
        properties["extra"],
        json!({ "title": "extra", "type": ["object", "null"] })
    );
    assert_eq!(doc["definitions"]["Book"]["required"], json!(["title"]));
}

#[test]
fn labels_validators_and_computed_properties() {
    let registry = catalog();
    let doc = registry.json_schema("Author", &json!({})).unwrap();
    let properties = &doc["definitions"]["Author"]["properties"];

    assert_eq!(
        properties["email"],
        json!({
            "title": "E-mail",
            "type": ["string", "null"],
            "minLength": 3,
            "maxLength": 64,
        })
    );
    assert_eq!(
        properties["born"],
        json!({ "title": "born", "type": ["string", "null"], "format": "date" })
    );
    assert_eq!(
        properties["display_name"],
        json!({ "title": "display_name", "readOnly": true })
    );
    assert!(properties.get("_password").is_none());

    let doc = registry.json_schema("Review", &json!({})).unwrap();
    assert_eq!(
        doc["definitions"]["Review"]["properties"]["stars"],
        json!({ "title": "stars", "type": "integer", "minimum": 1.0, "maximum": 5.0 })
    );
}

#[test]
fn foreign_keys_name_the_referenced_model() {
    let registry = catalog();

    let doc = registry.json_schema("Book", &json!({})).unwrap();
    assert_eq!(
        doc["definitions"]["Book"]["properties"]["author_id"],
        json!({ "title": "author_id", "type": ["integer", "null"], "foreignModel": "Author" })
    );

    let doc = registry.json_schema("Review", &json!({})).unwrap();
    assert_eq!(
        doc["definitions"]["Review"]["properties"]["book_id"]["foreignModel"],
        json!("Book")
    );
}

#[test]
fn unresolved_foreign_key_is_left_out() {
    let model = Model::builder("Orphan")
        .column(
            "parent_id",
            Column::new(Type::Integer).foreign_key("nowhere.id"),
        )
        .build();

    let registry = models!(model);
    let doc = registry.json_schema("Orphan", &json!({})).unwrap();

    assert_eq!(
        doc["definitions"]["Orphan"]["properties"]["parent_id"],
        json!({ "title": "parent_id", "type": ["integer", "null"] })
    );
}

#[test]
fn unfollowed_relationships_point_at_their_own_document() {
    let registry = catalog();
    let doc = registry.json_schema("Book", &json!({})).unwrap();
    let properties = &doc["definitions"]["Book"]["properties"];

    assert_eq!(
        properties["author"],
        json!({ "$ref": "Author#/definitions/Author" })
    );
    assert_eq!(
        properties["reviews"],
        json!({
            "title": "reviews",
            "type": "array",
            "items": { "$ref": "Review#/definitions/Review" },
        })
    );
    assert_eq!(
        doc["definitions"].as_object().unwrap().keys().collect::<Vec<_>>(),
        ["Book"]
    );
}

#[test]
fn followed_relationships_are_defined_locally() {
    let registry = catalog();
    let doc = registry
        .json_schema("Book", &json!({ "follow": ["author", "reviews"] }))
        .unwrap();
    let definitions = doc["definitions"].as_object().unwrap();

    assert_eq!(
        definitions.keys().collect::<Vec<_>>(),
        ["Book", "Author", "Review"]
    );

    let properties = &definitions["Book"]["properties"];
    assert_eq!(properties["author"], json!({ "$ref": "#/definitions/Author" }));
    assert_eq!(
        properties["reviews"]["items"],
        json!({ "$ref": "#/definitions/Review" })
    );
    assert_eq!(
        properties["publisher"],
        json!({ "$ref": "Publisher#/definitions/Publisher" })
    );

    // References back to the root stay local
    assert_eq!(
        definitions["Author"]["properties"]["books"]["items"],
        json!({ "$ref": "#/definitions/Book" })
    );
    assert_eq!(
        definitions["Review"]["properties"]["book"],
        json!({ "$ref": "#/definitions/Book" })
    );
}

#[test]
fn cycles_define_each_model_once() {
    let registry = catalog();
    let doc = registry
        .json_schema(
            "Author",
            &json!({ "books": { "follow": ["author", "reviews"], "reviews": { "follow": "book" } } }),
        )
        .unwrap();
    let definitions = doc["definitions"].as_object().unwrap();

    assert_eq!(
        definitions.keys().collect::<Vec<_>>(),
        ["Author", "Book", "Review"]
    );
    assert_eq!(
        definitions["Book"]["properties"]["author"],
        json!({ "$ref": "#/definitions/Author" })
    );
    assert_eq!(
        definitions["Review"]["properties"]["book"],
        json!({ "$ref": "#/definitions/Book" })
    );
}

#[test]
fn nested_views_shape_followed_definitions() {
    let registry = catalog();
    let doc = registry
        .json_schema("Book", &json!({ "only": ["title"], "author": { "only": "name" } }))
        .unwrap();

    assert_eq!(
        doc["definitions"]["Book"]["properties"],
        json!({
            "title": { "title": "title", "type": "string" },
            "author": { "$ref": "#/definitions/Author" },
        })
    );
    assert_eq!(
        doc["definitions"]["Author"],
        json!({
            "type": "object",
            "title": "Author",
            "properties": { "name": { "title": "name", "type": "string" } },
            "required": ["name"],
        })
    );
}

#[test]
fn nullable_to_many() {
    let model = Model::builder("Shelf")
        .column("id", Column::new(Type::Integer).primary_key())
        .relationship("books", Relationship::to_many("Book"))
        .schema_arg("books", FieldArgs::new().allow_none(true).label("Books"))
        .build();

    let registry = models!(model);
    let doc = registry.json_schema("Shelf", &json!({})).unwrap();

    assert_eq!(
        doc["definitions"]["Shelf"]["properties"]["books"],
        json!({
            "title": "Books",
            "type": ["array", "null"],
            "items": { "$ref": "Book#/definitions/Book" },
        })
    );
}

#[test]
fn ref_prefix_points_at_external_documents() {
    let mut builder = Registry::builder();
    builder
        .ref_prefix("https://example.com/schemas/")
        .register(book())
        .register(author());
    let registry = builder.build().unwrap();

    let doc = registry
        .json_schema("Book", &json!({ "follow": "author" }))
        .unwrap();
    let properties = &doc["definitions"]["Book"]["properties"];

    assert_eq!(properties["author"], json!({ "$ref": "#/definitions/Author" }));
    assert_eq!(
        properties["publisher"],
        json!({ "$ref": "https://example.com/schemas/Publisher#/definitions/Publisher" })
    );
}

#[test]
fn metadata_format_and_enum_pass_through() {
    let model = Model::builder("Contact")
        .column(
            "email",
            Column::new(Type::String)
                .not_null()
                .info(FieldArgs::new().format("email").meta("x-order", 1)),
        )
        .column(
            "kind",
            Column::new(Type::String).info(
                FieldArgs::new()
                    .validate(Validator::one_of(["home", "work"]))
                    .load_only(true),
            ),
        )
        .column(
            "phones",
            Column::new(Type::List)
                .info(FieldArgs::new().validate(Validator::length(Some(1), Some(3)))),
        )
        .build();

    let registry = models!(model);
    let doc = registry.json_schema("Contact", &json!({})).unwrap();
    let properties = &doc["definitions"]["Contact"]["properties"];

    assert_eq!(
        properties["email"],
        json!({ "title": "email", "type": "string", "format": "email", "x-order": 1 })
    );
    assert_eq!(
        properties["kind"],
        json!({
            "title": "kind",
            "type": ["string", "null"],
            "writeOnly": true,
            "enum": ["home", "work"],
        })
    );
    assert_eq!(
        properties["phones"],
        json!({ "title": "phones", "type": ["array", "null"], "minItems": 1, "maxItems": 3 })
    );
}

#[test]
fn subclass_document() {
    let registry = catalog();
    let doc = registry.json_schema("Ebook", &json!({})).unwrap();
    let definition = &doc["definitions"]["Ebook"];

    assert_eq!(definition["title"], json!("Ebook"));
    assert_eq!(
        definition["properties"]["title"],
        json!({ "title": "Ebook title", "type": "string" })
    );
    assert!(definition["properties"].get("tags").is_none());
    assert!(definition["properties"].get("file_size").is_some());
}

#[test]
fn followed_target_must_be_registered() {
    let registry = models!(book());

    assert!(registry.json_schema("Book", &json!({})).is_ok());

    let err = registry
        .json_schema("Book", &json!({ "follow": "author" }))
        .unwrap_err();
    assert!(err.is_unknown_model());
}

#[test]
fn unknown_model() {
    let registry = catalog();
    let err = registry.json_schema("Shelf", &json!({})).unwrap_err();
    assert!(err.is_unknown_model());
}
