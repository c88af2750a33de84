//! Blog slug normalisation.
//!
//! Slugs are lowercased and trimmed, characters outside `[a-z0-9]`, whitespace
//! and `-` are dropped, whitespace runs become a single `-`, and repeated `-`
//! collapse. A slug never starts or ends with `-`, so one with no letter or
//! digit normalises to the empty string.

/// Normalise free text into a URL slug.
///
/// # Examples
/// ```
/// use backend::domain::normalise_slug;
///
/// assert_eq!(normalise_slug("  Pharmacy Stock: 2025 Guide! "), "pharmacy-stock-2025-guide");
/// assert_eq!(normalise_slug("a -- b"), "a-b");
/// ```
#[must_use]
pub fn normalise_slug(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
            continue;
        }
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit()) {
            continue;
        }
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(ch);
    }
    slug
}
