//! Normalization rules for words and meaning strings
//!
//! Words are compared under a lookup key (trimmed, lowercased) so that
//! "Apple" and " apple " land on the same entry while the stored surface
//! form keeps the casing of the first insert. Meanings travel as
//! slash-separated strings ("사과/과일") that are split, trimmed and
//! deduplicated preserving insertion order. Meaning comparison stays
//! case-sensitive; only the word key lowercases.

/// Compute the lookup key for a word: trimmed and lowercased
///
/// Used for identity and merging only, never for display.
pub fn lookup_key(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Split a raw slash-separated meaning string into clean fragments
///
/// Fragments are trimmed, empty ones dropped, and duplicates removed
/// keeping the first occurrence.
pub fn normalize_meanings(raw: &str) -> Vec<String> {
    let mut fragments: Vec<String> = Vec::new();
    for fragment in raw.split('/') {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        if !fragments.iter().any(|seen| seen == fragment) {
            fragments.push(fragment.to_string());
        }
    }
    fragments
}

/// Rejoin meaning fragments into the slash-separated display form
pub fn join_meanings(meanings: &[String]) -> String {
    meanings.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_key_trims_and_lowercases() {
        assert_eq!(lookup_key("  Apple "), "apple");
        assert_eq!(lookup_key("BANANA"), "banana");
        assert_eq!(lookup_key("apple"), "apple");
    }

    #[test]
    fn test_lookup_key_whitespace_only_is_empty() {
        assert_eq!(lookup_key("   "), "");
        assert_eq!(lookup_key(""), "");
    }

    #[test]
    fn test_normalize_meanings_splits_and_trims() {
        assert_eq!(
            normalize_meanings(" 사과 / 과일 "),
            vec!["사과".to_string(), "과일".to_string()]
        );
    }

    #[test]
    fn test_normalize_meanings_drops_empty_fragments() {
        assert_eq!(normalize_meanings("사과//과일/"), vec!["사과", "과일"]);
        assert_eq!(normalize_meanings(" / / "), Vec::<String>::new());
        assert_eq!(normalize_meanings(""), Vec::<String>::new());
    }

    #[test]
    fn test_normalize_meanings_dedup_keeps_first_occurrence() {
        assert_eq!(
            normalize_meanings("사과/과일/사과"),
            vec!["사과", "과일"]
        );
    }

    #[test]
    fn test_normalize_meanings_is_case_sensitive() {
        // Meanings keep their case; "Fruit" and "fruit" are distinct
        assert_eq!(normalize_meanings("Fruit/fruit"), vec!["Fruit", "fruit"]);
    }

    #[test]
    fn test_normalize_idempotent_over_join() {
        let raw = " 사과 //과일 / 사과/열매";
        let once = normalize_meanings(raw);
        let twice = normalize_meanings(&join_meanings(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_join_meanings() {
        let meanings = vec!["사과".to_string(), "과일".to_string()];
        assert_eq!(join_meanings(&meanings), "사과/과일");
        assert_eq!(join_meanings(&[]), "");
    }
}
