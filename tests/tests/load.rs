use tests::prelude::*;
use tests::prelude::assert_eq;

use chrono::{NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;
use jsonbase::DefaultValue;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

fn errors<const N: usize>(entries: [(&str, Vec<&str>); N]) -> IndexMap<String, Vec<String>> {
    entries
        .into_iter()
        .map(|(name, messages)| {
            (
                name.to_string(),
                messages.iter().map(|m| m.to_string()).collect(),
            )
        })
        .collect()
}

fn map<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Map(
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    )
}

#[test]
fn values_unrecognized_keys_and_load_defaults() {
    let registry = catalog();
    let data = object(json!({
        "id": 99,
        "title": "Dune",
        "price": "19.99",
        "isbn": "978-0441013593",
    }));

    let loaded = registry.load("Book", &data, false).unwrap();

    assert_eq!(loaded.values["title"], Value::from("Dune"));
    assert_eq!(loaded.values["price"], Value::from(Decimal::new(1999, 2)));
    assert_eq!(loaded.values["in_print"], Value::Bool(true));
    assert!(!loaded.values.contains_key("id"));

    assert_eq!(
        loaded.unrecognized,
        object(json!({ "id": 99, "isbn": "978-0441013593" }))
    );
}

#[test]
fn missing_required_field() {
    let registry = catalog();

    let err = registry.load("Book", &Map::new(), false).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        err.validation_errors().unwrap(),
        &errors([("title", vec!["Missing data for required field."])])
    );
}

#[test]
fn failures_are_collected_across_fields() {
    let registry = catalog();
    let data = object(json!({
        "stars": 9,
        "book_id": "abc",
        "body": null,
    }));

    let err = registry.load("Review", &data, false).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap(),
        &errors([
            ("stars", vec!["value 9 is greater than maximum 5"]),
            ("book_id", vec!["Not a valid integer."]),
        ])
    );
    assert!(err.to_string().starts_with("validation failed: "));
}

#[test]
fn integers_beyond_i64_are_invalid() {
    let registry = catalog();
    let data = object(json!({ "stars": 3, "book_id": 1e30 }));

    let err = registry.load("Review", &data, false).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap(),
        &errors([("book_id", vec!["Not a valid integer."])])
    );

    let loaded = registry
        .load("Review", &object(json!({ "stars": 4.0, "book_id": 12.0 })), false)
        .unwrap();
    assert_eq!(loaded.values["stars"], Value::I64(4));
    assert_eq!(loaded.values["book_id"], Value::I64(12));
}

#[test]
fn null_handling_follows_nullability() {
    let registry = catalog();

    let found = registry
        .validate("Book", &object(json!({ "title": null, "price": null })), false)
        .unwrap();
    assert_eq!(found, errors([("title", vec!["Field may not be null."])]));
}

#[test]
fn every_validator_reports() {
    let model = Model::builder("Account")
        .column(
            "handle",
            Column::new(Type::String).info(
                FieldArgs::new()
                    .validate(Validator::length(Some(5), None))
                    .validate(Validator::predicate("must be lowercase", |value| {
                        value
                            .as_str()
                            .is_some_and(|s| s.chars().all(|c| !c.is_uppercase()))
                    })),
            ),
        )
        .build();

    let registry = models!(model);

    let found = registry
        .validate("Account", &object(json!({ "handle": "ABC" })), false)
        .unwrap();
    assert_eq!(
        found,
        errors([(
            "handle",
            vec!["value length 3 is too short (minimum: 5)", "must be lowercase"]
        )])
    );

    let found = registry
        .validate("Account", &object(json!({ "handle": "abcdef" })), false)
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn partial_load_skips_required_and_defaults() {
    let registry = catalog();

    let loaded = registry
        .load("Book", &object(json!({ "rating": 4 })), true)
        .unwrap();

    assert_eq!(loaded.values.len(), 1);
    assert_eq!(loaded.values["rating"], Value::F64(4.0));
}

#[test]
fn primitive_kinds_coerce_input() {
    let registry = catalog();

    let loaded = registry
        .load(
            "Author",
            &object(json!({ "name": "Ada", "born": "1815-12-10" })),
            false,
        )
        .unwrap();
    assert_eq!(
        loaded.values["born"],
        Value::from(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
    );

    let found = registry
        .validate(
            "Book",
            &object(json!({
                "title": "Dune",
                "in_print": "maybe",
                "published": "last year",
                "tags": "scifi",
                "extra": [1],
            })),
            false,
        )
        .unwrap();
    assert_eq!(
        found,
        errors([
            ("in_print", vec!["Not a valid boolean."]),
            ("published", vec!["Not a valid datetime."]),
            ("tags", vec!["Not a valid list."]),
            ("extra", vec!["Not a valid mapping type."]),
        ])
    );
}

#[test]
fn callable_load_default_is_invoked_per_load() {
    let counter = Arc::new(AtomicI64::new(0));
    let next = counter.clone();

    let model = Model::builder("Ticket")
        .column(
            "number",
            Column::new(Type::Integer)
                .default_fn(move || Value::from(next.fetch_add(1, Ordering::SeqCst))),
        )
        .build();

    let registry = models!(model);

    for expected in 0..3 {
        let loaded = registry.load("Ticket", &Map::new(), false).unwrap();
        assert_eq!(loaded.values["number"], Value::from(expected as i64));
    }

    registry
        .load("Ticket", &object(json!({ "number": 42 })), false)
        .unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn caller_load_default_wins_over_column_default() {
    let model = Model::builder("Ticket")
        .column("state", Column::new(Type::String).default("open"))
        .schema_arg(
            "state",
            FieldArgs::new().missing(DefaultValue::value("triage")),
        )
        .build();

    let registry = models!(model);
    let loaded = registry.load("Ticket", &Map::new(), false).unwrap();
    assert_eq!(loaded.values["state"], Value::from("triage"));
}

#[test]
fn nested_documents_load_against_the_target_schema() {
    let registry = catalog();
    let data = object(json!({
        "title": "Dune",
        "author": { "name": "Frank", "nickname": "FH" },
        "reviews": [{ "stars": 5 }, { "stars": 4, "body": "good" }],
        "publisher": null,
    }));

    let loaded = registry.load("Book", &data, false).unwrap();

    assert_eq!(loaded.values["author"], map([("name", Value::from("Frank"))]));
    assert_eq!(
        loaded.values["reviews"],
        Value::List(vec![
            map([("stars", Value::from(5))]),
            map([("stars", Value::from(4)), ("body", Value::from("good"))]),
        ])
    );
    assert_eq!(loaded.values["publisher"], Value::Null);
}

#[test]
fn nested_failures_are_prefixed_with_their_path() {
    let registry = catalog();
    let data = object(json!({
        "title": "Dune",
        "author": { "email": "x" },
        "reviews": [{ "stars": 5 }, { "stars": 0 }, "bad"],
    }));

    let found = registry.validate("Book", &data, false).unwrap();
    assert_eq!(
        found,
        errors([
            (
                "author",
                vec![
                    "email: value length 1 is too short (minimum: 3)",
                    "name: Missing data for required field.",
                ]
            ),
            (
                "reviews",
                vec!["1: stars: value 0 is less than minimum 1", "2: Invalid input type."]
            ),
        ])
    );
}

#[test]
fn nested_shape_mismatches() {
    let registry = catalog();
    let data = object(json!({
        "title": "Dune",
        "author": 5,
        "reviews": { "stars": 5 },
    }));

    let found = registry.validate("Book", &data, false).unwrap();
    assert_eq!(
        found,
        errors([
            ("author", vec!["Invalid input type."]),
            ("reviews", vec!["Not a valid list."]),
        ])
    );

    let found = registry
        .validate("Book", &object(json!({ "title": "Dune", "reviews": null })), false)
        .unwrap();
    assert_eq!(found, errors([("reviews", vec!["Field may not be null."])]));
}

#[test]
fn apply_attempts_every_assignment() {
    let registry = catalog();
    let mut author = ada();

    let values = IndexMap::from([
        ("display_name".to_string(), Value::from("someone")),
        ("name".to_string(), Value::from("Augusta")),
    ]);

    let err = registry.apply(&mut author, values).unwrap_err();
    assert_eq!(
        err.validation_errors().unwrap(),
        &errors([("display_name", vec!["can't set attribute `display_name`"])])
    );
    assert_eq!(author.value("name"), Some(&Value::from("Augusta")));
}

#[test]
fn update_applies_a_partial_document() {
    let registry = catalog();
    let mut book = book_record(1, "Dune");

    let unrecognized = registry
        .update(
            &mut book,
            &object(json!({
                "title": "Dune Messiah",
                "author": { "name": "Frank" },
                "isbn": "978-0593098233",
            })),
        )
        .unwrap();

    assert_eq!(unrecognized, object(json!({ "isbn": "978-0593098233" })));
    assert_eq!(book.value("title"), Some(&Value::from("Dune Messiah")));

    let author = book.one("author").unwrap();
    assert_eq!(author.model(), "Author");
    assert_eq!(author.value("name"), Some(&Value::from("Frank")));
    // Untouched fields keep their values
    assert_eq!(book.value("author_id"), Some(&Value::from(1)));
}

#[test]
fn update_wires_to_many_documents() {
    let registry = catalog();
    let mut book = book_record(1, "Dune");

    registry
        .update(&mut book, &object(json!({ "reviews": [{ "stars": 3 }] })))
        .unwrap();

    let reviews = book.many("reviews");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].model(), "Review");
    assert_eq!(reviews[0].value("stars"), Some(&Value::from(3)));
}

#[test]
fn invalid_update_leaves_the_instance_alone() {
    let registry = catalog();
    let mut book = book_record(1, "Dune");

    let err = registry
        .update(&mut book, &object(json!({ "title": null, "rating": "high" })))
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(book.value("title"), Some(&Value::from("Dune")));
    assert_eq!(book.value("rating"), None);
}

#[test]
fn read_write_computed_properties_load() {
    let model = Model::builder("Person")
        .column("first", Column::new(Type::String))
        .column("last", Column::new(Type::String))
        .computed("full_name", Computed::read_write())
        .build();

    let registry = models!(model);

    let mut person = Record::new("Person").with_setter(
        "full_name",
        |person| {
            let part = |name| person.value(name).and_then(Value::as_str).unwrap_or("");
            Value::from(format!("{} {}", part("first"), part("last")))
        },
        |person, value| {
            let full = value.as_str().unwrap_or_default().to_string();
            let (first, last) = full.split_once(' ').unwrap_or((full.as_str(), ""));
            person.set_value("first", Value::from(first));
            person.set_value("last", Value::from(last));
            Ok(())
        },
    );

    registry
        .update(&mut person, &object(json!({ "full_name": "Ada Lovelace" })))
        .unwrap();

    assert_eq!(person.value("first"), Some(&Value::from("Ada")));
    assert_eq!(person.value("last"), Some(&Value::from("Lovelace")));

    let out = registry.dump(&person, &json!({ "only": "full_name" })).unwrap();
    assert_eq!(out, object(json!({ "full_name": "Ada Lovelace" })));
}

#[test]
fn dumped_documents_load_back() {
    let registry = catalog();
    let published = Utc.with_ymd_and_hms(1965, 8, 1, 9, 30, 15).unwrap();
    let extra = IndexMap::from([
        ("pages".to_string(), Value::from(412)),
        ("series".to_string(), Value::from("Dune Chronicles")),
    ]);

    let book = book_record(3, "Dune")
        .with("price", Decimal::new(1999, 2))
        .with("published", published)
        .with("rating", 4.25)
        .with("in_print", false)
        .with("tags", vec![Value::from("sf"), Value::from("classic")])
        .with("extra", extra.clone());

    let dumped = registry.dump(&book, &json!({})).unwrap();
    let loaded = registry.load("Book", &dumped, false).unwrap();
    assert_eq!(loaded.unrecognized, object(json!({ "id": 3 })));

    let mut copy = Record::new("Book");
    registry.apply(&mut copy, loaded.values).unwrap();

    for name in ["title", "price", "published", "rating", "in_print", "tags", "extra", "author_id"] {
        assert_eq!(copy.value(name), book.value(name), "{name}");
    }
    assert_eq!(copy.value("published"), Some(&Value::DateTime(published)));
    assert_eq!(copy.value("extra"), Some(&Value::Map(extra)));

    let born = NaiveDate::from_ymd_opt(1815, 12, 10).unwrap();
    let author = ada().with("born", born);
    let dumped = registry.dump(&author, &json!({})).unwrap();
    let loaded = registry.load("Author", &dumped, false).unwrap();

    assert_eq!(loaded.values["born"], Value::Date(born));
    assert_eq!(loaded.values["email"], Value::from("ada@example.com"));
}

#[test]
fn unknown_model() {
    let registry = catalog();
    let err = registry.load("Shelf", &Map::new(), false).unwrap_err();
    assert!(err.is_unknown_model());
}
