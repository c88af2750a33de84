//! Structural checks applied to every loaded content document.
//!
//! Field-level rules (required titles, rating ranges, icon names) belong to
//! the backend; this module only guarantees the shape the backend relies on
//! when seeding.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::DefaultContentError;

/// Ensure every record in `collection` is a JSON object.
pub(crate) fn ensure_objects(collection: &str, records: &[Value]) -> Result<(), DefaultContentError> {
    match records.iter().position(|record| !record.is_object()) {
        Some(index) => Err(DefaultContentError::NotAnObject {
            collection: collection.to_owned(),
            index,
        }),
        None => Ok(()),
    }
}

/// Ensure every blog carries a non-blank slug and no slug repeats.
pub(crate) fn ensure_unique_slugs(blogs: &[Value]) -> Result<(), DefaultContentError> {
    let mut seen = HashSet::new();
    for (index, blog) in blogs.iter().enumerate() {
        let slug = blog
            .get("slug")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .ok_or(DefaultContentError::MissingSlug { index })?;
        if !seen.insert(slug.to_ascii_lowercase()) {
            return Err(DefaultContentError::DuplicateSlug {
                slug: slug.to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::expect_used,
        reason = "test code uses expect for clear failure messages"
    )]

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn accepts_object_records() {
        let records = vec![json!({"name": "a"}), json!({})];
        ensure_objects("clients", &records).expect("objects accepted");
    }

    #[rstest]
    #[case(vec![json!("text")], 0)]
    #[case(vec![json!({}), json!([1, 2])], 1)]
    fn reports_first_non_object(#[case] records: Vec<Value>, #[case] index: usize) {
        let err = ensure_objects("team", &records).expect_err("non-object rejected");
        assert_eq!(
            err,
            DefaultContentError::NotAnObject {
                collection: "team".to_owned(),
                index,
            }
        );
    }

    #[rstest]
    fn duplicate_slugs_compare_case_insensitively() {
        let blogs = vec![json!({"slug": "post"}), json!({"slug": "POST"})];
        let err = ensure_unique_slugs(&blogs).expect_err("duplicate rejected");
        assert_eq!(
            err,
            DefaultContentError::DuplicateSlug {
                slug: "POST".to_owned()
            }
        );
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({"slug": "  "}))]
    #[case(json!({"slug": 7}))]
    fn blogs_need_a_slug(#[case] blog: Value) {
        let err = ensure_unique_slugs(&[blog]).expect_err("missing slug rejected");
        assert_eq!(err, DefaultContentError::MissingSlug { index: 0 });
    }
}
