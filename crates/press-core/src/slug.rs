//! Slug generation and uniqueness resolution for permalinks.
//!
//! A slug is the final path segment of a post or page URL. `normalize`
//! turns free text into the canonical form, `ensure_unique` picks a free
//! value against the slugs already taken by the same content type. Both
//! are pure; the unique index on the slug column is what actually
//! enforces uniqueness under concurrent saves.

use std::collections::HashSet;

use uuid::Uuid;

/// Convert free text into a URL-safe slug.
///
/// Lower-cases the input, drops every character that is not an ASCII
/// alphanumeric, whitespace or hyphen, then collapses whitespace runs and
/// hyphen runs into single hyphens and trims hyphens at both ends.
///
/// The result matches `^[a-z0-9]+(-[a-z0-9]+)*$`, or is empty when the
/// input had no retainable characters (e.g. an all-emoji title).
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
        // anything else is stripped
    }

    slug
}

/// `normalize`, falling back to a generated identifier when the text has
/// no retainable characters. Use at the boundary where a slug is
/// mandatory.
pub fn normalize_or_generated(text: &str) -> String {
    let slug = normalize(text);
    if slug.is_empty() {
        generated()
    } else {
        slug
    }
}

/// A short generated slug for content whose title yields nothing usable.
pub fn generated() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("untitled-{}", &id[..8])
}

/// Resolve `base` against the set of slugs already in use.
///
/// Returns `base` unchanged when it is free; otherwise probes `base-2`,
/// `base-3`, ... and returns the first value not in `existing`.
/// Deterministic for a fixed set; storage is not consulted or mutated, so
/// the caller still has to handle a constraint violation if a concurrent
/// save wins the race.
pub fn ensure_unique(base: &str, existing: &HashSet<String>) -> String {
    if !existing.contains(base) {
        return base.to_string();
    }

    let mut counter = 2u64;
    loop {
        let candidate = format!("{base}-{counter}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Whether `slug` is already in canonical form.
pub fn is_valid(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_title_with_punctuation() {
        assert_eq!(
            normalize("10 Business Growth Strategies!"),
            "10-business-growth-strategies"
        );
    }

    #[test]
    fn normalize_collapses_whitespace_and_hyphens() {
        assert_eq!(normalize("Hello   --  World"), "hello-world");
        assert_eq!(normalize("  leading and trailing  "), "leading-and-trailing");
        assert_eq!(normalize("--already-hyphenated--"), "already-hyphenated");
    }

    #[test]
    fn normalize_strips_non_ascii_and_underscores() {
        assert_eq!(normalize("Café au Lait"), "caf-au-lait");
        assert_eq!(normalize("snake_case_title"), "snakecasetitle");
    }

    #[test]
    fn normalize_can_return_empty() {
        assert_eq!(normalize("🎉🎉🎉"), "");
        assert_eq!(normalize("???"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["Some Title Here", "a - b - c", "MiXeD CaSe 123"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn normalize_output_matches_pattern() {
        for input in ["Hello, World!", "  42  ", "a__b", "Ünïcödé Tïtle"] {
            let slug = normalize(input);
            if slug.is_empty() {
                continue;
            }
            assert!(is_valid(&slug), "{slug:?} is not canonical");
        }
    }

    #[test]
    fn fallback_kicks_in_for_empty_slugs() {
        let slug = normalize_or_generated("🎉");
        assert!(slug.starts_with("untitled-"));
        assert_eq!(slug.len(), "untitled-".len() + 8);
        assert!(is_valid(&slug));

        assert_eq!(normalize_or_generated("Real Title"), "real-title");
    }

    #[test]
    fn ensure_unique_returns_base_when_free() {
        assert_eq!(ensure_unique("hello-world", &HashSet::new()), "hello-world");
    }

    #[test]
    fn ensure_unique_probes_from_two() {
        let existing: HashSet<String> = ["hello-world"].iter().map(|s| s.to_string()).collect();
        assert_eq!(ensure_unique("hello-world", &existing), "hello-world-2");

        let existing: HashSet<String> = ["hello-world", "hello-world-2"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ensure_unique("hello-world", &existing), "hello-world-3");
    }

    #[test]
    fn ensure_unique_skips_holes() {
        let existing: HashSet<String> = ["post", "post-2", "post-4"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ensure_unique("post", &existing), "post-3");
    }

    #[test]
    fn validates_slug_shape() {
        assert!(is_valid("hello-world"));
        assert!(is_valid("a1"));
        assert!(!is_valid(""));
        assert!(!is_valid("-leading"));
        assert!(!is_valid("trailing-"));
        assert!(!is_valid("double--hyphen"));
        assert!(!is_valid("Upper-Case"));
        assert!(!is_valid("under_score"));
    }
}
