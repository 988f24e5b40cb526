//! Instructor name normalization and component extraction.
//!
//! Upstream data mixes "Last, First" and "First Last" forms, often in all
//! caps. Matching keys are generated for every plausible reading of a name so
//! that a search for "john smith" finds a section taught by "SMITH, JOHN".

use std::collections::HashSet;

/// Generate every normalized variant of an instructor name.
///
/// All variants are lowercased and trimmed. A comma form ("Last, First")
/// yields both "first last" and "last first"; a plain two-token form yields
/// the swapped order as well. The raw lowercased input is always included.
///
/// An empty or whitespace-only name yields an empty set.
pub fn normalize_variants(name: &str) -> HashSet<String> {
    let mut variants = HashSet::new();

    let raw = name.trim();
    if raw.is_empty() {
        return variants;
    }

    variants.insert(raw.to_lowercase());

    if let Some((last, first)) = raw.split_once(',') {
        let (last, first) = (last.trim(), first.trim());
        if !last.is_empty() && !first.is_empty() {
            variants.insert(format!("{first} {last}").to_lowercase());
            variants.insert(format!("{last} {first}").to_lowercase());
        }
    } else {
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.len() == 2 {
            variants.insert(format!("{} {}", tokens[1], tokens[0]).to_lowercase());
        }
    }

    variants
}

/// Split a name into its ordered components.
///
/// "Smith, John David" -> ["Smith", "John", "David"]; a comma-less name is
/// plain whitespace-split. Empty components are dropped.
pub fn extract_components(name: &str) -> Vec<String> {
    let mut components = Vec::new();

    if let Some((last, rest)) = name.split_once(',') {
        let last = last.trim();
        if !last.is_empty() {
            components.push(last.to_string());
        }
        components.extend(rest.split_whitespace().map(str::to_string));
    } else {
        components.extend(name.split_whitespace().map(str::to_string));
    }

    components
}

/// Lowercase and trim, the common comparison form.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Convert "Last, First" to "First Last", passing through anything else.
pub fn last_first_to_first_last(name: &str) -> String {
    match name.split_once(", ") {
        Some((last, first)) => format!("{first} {last}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn variants_comma_form() {
        assert_eq!(
            normalize_variants("Smith, John"),
            set(&["smith, john", "john smith", "smith john"])
        );
    }

    #[test]
    fn variants_all_caps_comma_form() {
        assert_eq!(
            normalize_variants("SMITH, JOHN"),
            set(&["smith, john", "john smith", "smith john"])
        );
    }

    #[test]
    fn variants_two_token_form() {
        assert_eq!(
            normalize_variants("Jane Doe"),
            set(&["jane doe", "doe jane"])
        );
    }

    #[test]
    fn variants_single_token() {
        assert_eq!(normalize_variants("Cher"), set(&["cher"]));
    }

    #[test]
    fn variants_three_tokens_no_swap() {
        // Only exactly-two-token names get the swapped form.
        assert_eq!(normalize_variants("Mary Jo Bang"), set(&["mary jo bang"]));
    }

    #[test]
    fn variants_comma_with_middle() {
        assert_eq!(
            normalize_variants("Smith, John David"),
            set(&["smith, john david", "john david smith", "smith john david"])
        );
    }

    #[test]
    fn variants_empty_input() {
        assert!(normalize_variants("").is_empty());
        assert!(normalize_variants("   ").is_empty());
    }

    #[test]
    fn variants_trims_whitespace() {
        assert_eq!(
            normalize_variants("  Smith, John  "),
            set(&["smith, john", "john smith", "smith john"])
        );
    }

    #[test]
    fn components_comma_form() {
        assert_eq!(
            extract_components("Smith, John David"),
            vec!["Smith", "John", "David"]
        );
    }

    #[test]
    fn components_plain_form() {
        assert_eq!(extract_components("John Smith"), vec!["John", "Smith"]);
    }

    #[test]
    fn components_empty() {
        assert!(extract_components("").is_empty());
    }

    #[test]
    fn components_comma_no_space() {
        assert_eq!(extract_components("Smith,John"), vec!["Smith", "John"]);
    }

    #[test]
    fn normalize_text_lowers_and_trims() {
        assert_eq!(normalize_text("  John SMITH "), "john smith");
    }

    #[test]
    fn last_first_conversion() {
        assert_eq!(last_first_to_first_last("Smith, John"), "John Smith");
        assert_eq!(last_first_to_first_last("John Smith"), "John Smith");
    }
}
