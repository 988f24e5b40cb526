//! Multi-strategy fuzzy string scoring on [0, 100].
//!
//! Each strategy tolerates a different distortion: `ratio` catches typos,
//! `partial_ratio` catches truncation, `token_sort_ratio` catches word
//! reordering, and `token_set_ratio` catches repeated or extra words. Taking
//! the maximum avoids penalizing a query for legitimate variation in any one
//! dimension.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// Full-string edit-distance ratio, scaled to an integer in [0, 100].
pub fn ratio(a: &str, b: &str) -> u32 {
    (normalized_levenshtein(a, b) * 100.0).round() as u32
}

/// Best score of the shorter string against every same-length substring
/// window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> u32 {
    if a.is_empty() || b.is_empty() {
        return ratio(a, b);
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    let longer_chars: Vec<char> = longer.chars().collect();
    let window = shorter.chars().count();

    let mut best = 0;
    for start in 0..=(longer_chars.len() - window) {
        let candidate: String = longer_chars[start..start + window].iter().collect();
        best = best.max(ratio(shorter, &candidate));
        if best == 100 {
            break;
        }
    }
    best
}

/// Edit-distance ratio after sorting whitespace-separated tokens, making the
/// comparison order-insensitive.
pub fn token_sort_ratio(a: &str, b: &str) -> u32 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Set-overlap-aware ratio: compares the shared token core against each
/// side's remainder, so extra or repeated words on one side don't drag the
/// score down.
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = join(tokens_a.intersection(&tokens_b).copied());
    let diff_ab = join(tokens_a.difference(&tokens_b).copied());
    let diff_ba = join(tokens_b.difference(&tokens_a).copied());

    let combined_ab = concat(&intersection, &diff_ab);
    let combined_ba = concat(&intersection, &diff_ba);

    ratio(&intersection, &combined_ab)
        .max(ratio(&intersection, &combined_ba))
        .max(ratio(&combined_ab, &combined_ba))
}

/// The best score across all four strategies.
pub fn best_score(query: &str, target: &str) -> u32 {
    ratio(query, target)
        .max(partial_ratio(query, target))
        .max(token_sort_ratio(query, target))
        .max(token_set_ratio(query, target))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflexivity() {
        for s in ["x", "smith", "intro to computer science", "198:111"] {
            assert_eq!(best_score(s, s), 100, "best_score({s:?}, {s:?})");
        }
    }

    #[test]
    fn ratio_detects_single_typo() {
        assert!(ratio("smith", "smyth") >= 75);
    }

    #[test]
    fn ratio_empty_vs_nonempty() {
        assert_eq!(ratio("", "smith"), 0);
    }

    #[test]
    fn partial_handles_truncation() {
        assert_eq!(partial_ratio("smith", "john smith"), 100);
        assert_eq!(partial_ratio("comput", "intro to computer science"), 100);
    }

    #[test]
    fn partial_symmetric_in_argument_order() {
        assert_eq!(
            partial_ratio("smith", "john smith"),
            partial_ratio("john smith", "smith")
        );
    }

    #[test]
    fn token_sort_handles_reordering() {
        assert_eq!(token_sort_ratio("smith john", "john smith"), 100);
    }

    #[test]
    fn token_set_handles_extra_words() {
        assert_eq!(
            token_set_ratio("computer science", "intro to computer science"),
            100
        );
    }

    #[test]
    fn token_set_disjoint_is_low() {
        assert!(token_set_ratio("history of art", "organic chemistry") < 50);
    }

    #[test]
    fn best_score_rescues_instructor_typo() {
        // One wrong letter in a full name should stay above the instructor
        // rescue threshold used by the search engine.
        assert!(best_score("jon smith", "john smith") >= 75);
    }

    #[test]
    fn best_score_unrelated_stays_low() {
        assert!(best_score("quantum physics", "intro to ceramics") < 70);
    }

    #[test]
    fn best_score_is_max_of_strategies() {
        let (q, t) = ("science computer", "computer science fundamentals");
        let expected = ratio(q, t)
            .max(partial_ratio(q, t))
            .max(token_sort_ratio(q, t))
            .max(token_set_ratio(q, t));
        assert_eq!(best_score(q, t), expected);
    }
}
