//! Tests for the generic collection abstraction.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn every_kind_round_trips_through_its_key() {
    for kind in CollectionKind::ALL {
        assert_eq!(CollectionKind::from_key(kind.as_str()), Some(kind));
        let encoded = serde_json::to_value(kind).expect("serialise kind");
        assert_eq!(encoded, json!(kind.as_str()));
    }
}

#[rstest]
#[case("about")]
#[case("Blogs")]
#[case("")]
fn unknown_keys_do_not_resolve(#[case] key: &str) {
    assert_eq!(CollectionKind::from_key(key), None);
}

#[rstest]
#[case(CollectionKind::Specifications, json!({}), "title")]
#[case(CollectionKind::Features, json!({"title": "  "}), "title")]
#[case(CollectionKind::Achievements, json!({"number": "10"}), "label")]
#[case(CollectionKind::Values, json!({"description": "x"}), "title")]
#[case(CollectionKind::Team, json!({"role": "CTO"}), "name")]
#[case(CollectionKind::Testimonials, json!({"rating": 4}), "name")]
#[case(CollectionKind::Clients, json!({"img": "/a.png"}), "name")]
#[case(CollectionKind::Blogs, json!({"slug": "a"}), "title")]
#[case(CollectionKind::Blogs, json!({"title": "A"}), "slug")]
fn missing_required_fields_are_rejected(
    #[case] kind: CollectionKind,
    #[case] body: Value,
    #[case] field: &str,
) {
    let err = kind.normalise(body).expect_err("missing field");
    assert_eq!(err.field(), Some(field));
    assert_eq!(err.reason(), "missing_field");
}

#[rstest]
fn normalisation_fills_defaults_and_drops_unknown_fields() {
    let body = json!({"name": "Dr. Amara", "id": "client-supplied", "_id": "x", "extra": true});
    let normalised = CollectionKind::Testimonials
        .normalise(body)
        .expect("valid testimonial");
    assert_eq!(normalised["name"], "Dr. Amara");
    assert_eq!(normalised["rating"], 5);
    assert_eq!(normalised["organization"], "");
    assert!(normalised.get("id").is_none());
    assert!(normalised.get("_id").is_none());
    assert!(normalised.get("extra").is_none());
}

#[rstest]
#[case(0)]
#[case(6)]
fn out_of_range_ratings_are_rejected(#[case] rating: u8) {
    let err = CollectionKind::Testimonials
        .normalise(json!({"name": "A", "rating": rating}))
        .expect_err("rating out of range");
    assert_eq!(err, ContentValidationError::RatingOutOfRange { value: rating });
}

#[rstest]
#[case(json!({"name": "A", "rating": "five"}))]
#[case(json!({"name": "A", "rating": -1}))]
#[case(json!({"name": 12}))]
fn wrongly_typed_fields_are_malformed(#[case] body: Value) {
    let err = CollectionKind::Testimonials
        .normalise(body)
        .expect_err("malformed");
    assert_eq!(err.reason(), "malformed");
}

#[rstest]
fn unknown_icon_names_are_malformed() {
    let err = CollectionKind::Specifications
        .normalise(json!({"title": "T", "icon": "Rocket"}))
        .expect_err("unknown icon");
    assert!(matches!(err, ContentValidationError::Malformed { .. }));
}

#[rstest]
#[case(json!([]))]
#[case(json!("text"))]
#[case(Value::Null)]
fn non_object_bodies_are_rejected(#[case] body: Value) {
    assert_eq!(
        CollectionKind::Clients.normalise(body),
        Err(ContentValidationError::NotAnObject)
    );
}

#[rstest]
fn blog_slug_is_normalised_on_write() {
    let normalised = CollectionKind::Blogs
        .normalise(json!({"title": "Post", "slug": "  Lab Results: Q3 "}))
        .expect("valid blog");
    assert_eq!(normalised["slug"], "lab-results-q3");
    assert!(normalised.get("coverImg").is_none());
    assert_eq!(normalised["contentHtml"], "");
}

#[rstest]
#[case("!!!")]
#[case("---")]
#[case("- -")]
fn blog_slug_that_normalises_to_empty_is_rejected(#[case] slug: &str) {
    let err = CollectionKind::Blogs
        .normalise(json!({"title": "Post", "slug": slug}))
        .expect_err("empty slug");
    assert_eq!(err, ContentValidationError::EmptySlug);
    assert_eq!(err.field(), Some("slug"));
}

#[rstest]
fn document_json_places_id_alongside_body() {
    let id = RecordId::random();
    let doc = ContentDocument::new(id, json!({"name": "Acme", "id": "stale"}));
    let record = doc.to_json();
    assert_eq!(record["id"], id.to_string());
    assert_eq!(record["name"], "Acme");
    assert_eq!(doc.field_str("name"), Some("Acme"));
}

#[rstest]
fn merge_patch_overlays_fields_and_ignores_identifiers() {
    let stored = json!({"name": "Acme", "img": "/old.png"});
    let merged = merge_patch(&stored, json!({"img": "/new.png", "id": "x", "_id": "y"}))
        .expect("object patch");
    assert_eq!(merged, json!({"name": "Acme", "img": "/new.png"}));
}

#[rstest]
fn merge_patch_rejects_non_objects() {
    let stored = json!({"name": "Acme"});
    assert_eq!(
        merge_patch(&stored, json!(["name"])),
        Err(ContentValidationError::NotAnObject)
    );
}

#[rstest]
fn blanking_a_required_field_through_a_patch_fails_validation() {
    let stored = json!({"name": "Acme", "img": ""});
    let merged = merge_patch(&stored, json!({"name": ""})).expect("object patch");
    let err = CollectionKind::Clients
        .normalise(merged)
        .expect_err("blank name");
    assert_eq!(err.field(), Some("name"));
}

#[rstest]
#[case("not-a-uuid")]
#[case("")]
#[case("123")]
fn non_uuid_record_ids_do_not_parse(#[case] raw: &str) {
    assert!(RecordId::parse(raw).is_none());
}

#[rstest]
fn record_ids_parse_their_display_form() {
    let id = RecordId::random();
    assert_eq!(RecordId::parse(&id.to_string()), Some(id));
}
