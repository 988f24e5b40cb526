//! Tiered fuzzy course search.
//!
//! A query is first classified: strings shaped like a specific course
//! reference ("cs 111", "198:111", "111") get precise code matching and skip
//! the general fuzzy pass entirely when anything precise hits, so a
//! structured query never drags in loosely similar courses. Free-text
//! queries fall through to fuzzy scoring over every descriptive field plus
//! the aggregated instructor names of each course.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::data::{fuzzy, names};
use crate::soc::types::CourseRecord;

/// Minimum general fuzzy score for a course to be included.
pub const DEFAULT_THRESHOLD: u32 = 70;

/// Lower bar for instructor-name fuzzy hits, rescuing single-typo searches.
const INSTRUCTOR_FUZZY_THRESHOLD: u32 = 75;

/// Common department abbreviations and their subject codes.
const DEPT_ABBREVIATIONS: [(&str, &str); 7] = [
    ("cs", "198"),
    ("math", "640"),
    ("bio", "119"),
    ("chem", "160"),
    ("phys", "750"),
    ("stat", "960"),
    ("econ", "220"),
];

fn resolve_abbreviation(token: &str) -> Option<&'static str> {
    DEPT_ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == token)
        .map(|(_, code)| *code)
}

fn is_abbreviation_key(token: &str) -> bool {
    DEPT_ABBREVIATIONS.iter().any(|(abbrev, _)| *abbrev == token)
}

/// A query that references a specific course rather than free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificQuery {
    /// Subject code, already resolved through the abbreviation table.
    /// `None` for a bare course-number query; may be empty for degenerate
    /// colon forms like ":111".
    pub subject: Option<String>,
    pub number: String,
}

/// Result of query classification, first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    Specific(SpecificQuery),
    FreeText,
}

/// Classify a lowercased query string.
pub fn classify(query: &str) -> QueryKind {
    let parts: Vec<&str> = query.split_whitespace().collect();

    if parts.len() == 2 {
        let (dept, number) = (parts[0], parts[1]);
        if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
            let subject = resolve_abbreviation(dept).unwrap_or(dept);
            return QueryKind::Specific(SpecificQuery {
                subject: Some(subject.to_string()),
                number: number.to_string(),
            });
        }
    } else if query.contains(':') {
        let parts: Vec<&str> = query.split(':').collect();
        if parts.len() == 2
            && !parts[1].is_empty()
            && parts[1].chars().all(|c| c.is_ascii_digit())
        {
            return QueryKind::Specific(SpecificQuery {
                subject: Some(parts[0].to_string()),
                number: parts[1].to_string(),
            });
        }
    } else if !query.is_empty() && query.chars().all(|c| c.is_ascii_digit()) {
        return QueryKind::Specific(SpecificQuery {
            subject: None,
            number: query.to_string(),
        });
    }

    QueryKind::FreeText
}

/// All normalized name variants across every section's instructors.
fn instructor_variants(course: &CourseRecord) -> HashSet<String> {
    let mut variants = HashSet::new();
    for section in &course.sections {
        for name in section.instructor_names() {
            variants.extend(names::normalize_variants(name));
        }
    }
    variants
}

/// Search and rank courses for a query.
///
/// Returns every raw record whose `courseString` matched, keys ordered by
/// descending score, records within a key in their original relative order.
/// `threshold` applies only to the general fuzzy tier.
pub fn search<'a>(
    courses: &[&'a CourseRecord],
    query: &str,
    threshold: u32,
) -> Vec<&'a CourseRecord> {
    let query = query.trim().to_lowercase();
    let kind = classify(&query);
    let specific = match &kind {
        QueryKind::Specific(s) => Some(s),
        QueryKind::FreeText => None,
    };

    // Raw records sharing a courseString form one logical course.
    let mut groups: HashMap<String, Vec<&'a CourseRecord>> = HashMap::new();

    let mut exact_matches: Vec<(u32, String)> = Vec::new();
    let mut high_relevance: Vec<(u32, String)> = Vec::new();
    let mut fuzzy_matches: Vec<(u32, String)> = Vec::new();

    for &course in courses {
        let course_string = course.course_string().to_lowercase();
        let subject = course.subject().to_lowercase();
        let course_number = course.course_number().to_lowercase();
        let title = course.title().to_lowercase();
        let subject_description = course.subject_description().to_lowercase();

        groups
            .entry(course_string.clone())
            .or_default()
            .push(course);

        if query == title {
            exact_matches.push((100, course_string));
            continue;
        }

        // A bare "cs" would otherwise fuzzy-match a pile of unrelated
        // subject codes and descriptions.
        if query == "cs" && subject != "198" {
            continue;
        }

        let instructors = instructor_variants(course);

        if instructors.contains(&query) {
            high_relevance.push((92, course_string.clone()));
        }

        if !instructors.is_empty() {
            let best = instructors
                .iter()
                .map(|name| fuzzy::best_score(&query, name))
                .max()
                .unwrap_or(0);
            if best >= INSTRUCTOR_FUZZY_THRESHOLD {
                fuzzy_matches.push((best, course_string.clone()));
            }
        }

        if let Some(sq) = specific {
            let query_subject = sq.subject.as_deref().unwrap_or_default();
            if !query_subject.is_empty()
                && subject == query_subject
                && course_number == sq.number
            {
                exact_matches.push((100, course_string));
                continue;
            } else if query_subject.is_empty() && course_number == sq.number {
                exact_matches.push((95, course_string));
                continue;
            } else if is_abbreviation_key(query_subject)
                && subject == "198"
                && course_number == sq.number
            {
                exact_matches.push((98, course_string));
                continue;
            } else if !query_subject.is_empty()
                && subject_description.contains(query_subject)
                && course_number == sq.number
            {
                high_relevance.push((90, course_string));
                continue;
            }
        }

        if query == course_string || query == format!("{subject}:{course_number}") {
            exact_matches.push((100, course_string));
            continue;
        }

        if query == course_number || query == subject {
            high_relevance.push((85, course_string));
            continue;
        }

        // Structured queries stop here: fuzzy matching against a precise
        // course reference only produces noise.
        if specific.is_some() {
            continue;
        }

        let instructors_joined = instructors.iter().cloned().collect::<Vec<_>>().join(" ");
        let max_score = [
            fuzzy::token_set_ratio(&query, &course_string),
            fuzzy::token_set_ratio(&query, &title),
            fuzzy::token_set_ratio(&query, &subject),
            fuzzy::token_set_ratio(&query, &course_number),
            fuzzy::token_set_ratio(&query, &subject_description),
            fuzzy::token_set_ratio(&query, &instructors_joined),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        if max_score >= threshold {
            fuzzy_matches.push((max_score, course_string));
        }
    }

    // Deduplicate by courseString, keeping first-seen ordering for ties.
    let mut order: Vec<String> = Vec::new();
    let mut scores: HashMap<String, u32> = HashMap::new();

    for (score, key) in exact_matches {
        if !scores.contains_key(&key) {
            order.push(key.clone());
        }
        scores.insert(key, score);
    }
    for (score, key) in high_relevance {
        match scores.get(&key) {
            None => {
                order.push(key.clone());
                scores.insert(key, score);
            }
            Some(&existing) if score > existing => {
                scores.insert(key, score);
            }
            Some(_) => {}
        }
    }
    if specific.is_none() || scores.is_empty() {
        for (score, key) in fuzzy_matches {
            match scores.get(&key) {
                None => {
                    order.push(key.clone());
                    scores.insert(key, score);
                }
                Some(&existing) if score > existing => {
                    scores.insert(key, score);
                }
                Some(_) => {}
            }
        }
    }

    let mut ranked: Vec<(u32, &String)> = order.iter().map(|key| (scores[key], key)).collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let mut matched: Vec<&'a CourseRecord> = Vec::new();
    for (_, key) in &ranked {
        if let Some(group) = groups.get(*key) {
            matched.extend(group.iter().copied());
        }
    }

    debug!(
        query = %query,
        unique = ranked.len(),
        records = matched.len(),
        "course search complete"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(json: &str) -> CourseRecord {
        serde_json::from_str(json).unwrap()
    }

    fn refs(courses: &[CourseRecord]) -> Vec<&CourseRecord> {
        courses.iter().collect()
    }

    fn fixture() -> Vec<CourseRecord> {
        vec![
            course(
                r#"{
                    "courseString": "01:198:111",
                    "subject": "198",
                    "courseNumber": "111",
                    "title": "Intro to CS",
                    "subjectDescription": "Computer Science",
                    "sections": [{
                        "instructors": [{"name": "SMITH, JOHN"}]
                    }]
                }"#,
            ),
            course(
                r#"{
                    "courseString": "01:640:111",
                    "subject": "640",
                    "courseNumber": "111",
                    "title": "Calculus Workshop",
                    "subjectDescription": "Mathematics",
                    "sections": [{
                        "instructors": [{"name": "GARCIA, MARIA"}]
                    }]
                }"#,
            ),
            course(
                r#"{
                    "courseString": "01:960:285",
                    "subject": "960",
                    "courseNumber": "285",
                    "title": "Intro Stat for Business",
                    "subjectDescription": "Statistics",
                    "sections": []
                }"#,
            ),
        ]
    }

    #[test]
    fn classify_abbreviated_subject_number() {
        assert_eq!(
            classify("cs 111"),
            QueryKind::Specific(SpecificQuery {
                subject: Some("198".into()),
                number: "111".into(),
            })
        );
    }

    #[test]
    fn classify_unknown_dept_keeps_literal() {
        assert_eq!(
            classify("computer 111"),
            QueryKind::Specific(SpecificQuery {
                subject: Some("computer".into()),
                number: "111".into(),
            })
        );
    }

    #[test]
    fn classify_colon_form() {
        assert_eq!(
            classify("198:111"),
            QueryKind::Specific(SpecificQuery {
                subject: Some("198".into()),
                number: "111".into(),
            })
        );
    }

    #[test]
    fn classify_bare_number() {
        assert_eq!(
            classify("111"),
            QueryKind::Specific(SpecificQuery {
                subject: None,
                number: "111".into(),
            })
        );
    }

    #[test]
    fn classify_free_text() {
        assert_eq!(classify("intro to computer science"), QueryKind::FreeText);
        assert_eq!(classify("comp sci"), QueryKind::FreeText);
        assert_eq!(classify(""), QueryKind::FreeText);
    }

    #[test]
    fn abbreviated_query_matches_only_resolved_subject() {
        // "cs 111" must hit 198:111 and never the 640:111 number twin.
        let courses = fixture();
        let results = search(&refs(&courses), "cs 111", DEFAULT_THRESHOLD);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].course_string(), "01:198:111");
    }

    #[test]
    fn bare_number_matches_every_subject() {
        let courses = fixture();
        let results = search(&refs(&courses), "111", DEFAULT_THRESHOLD);
        let keys: Vec<&str> = results.iter().map(|c| c.course_string()).collect();
        assert!(keys.contains(&"01:198:111"));
        assert!(keys.contains(&"01:640:111"));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn title_exact_match() {
        let courses = fixture();
        let results = search(&refs(&courses), "intro to cs", DEFAULT_THRESHOLD);
        assert_eq!(results[0].course_string(), "01:198:111");
    }

    #[test]
    fn course_string_exact_match() {
        let courses = fixture();
        let results = search(&refs(&courses), "01:960:285", DEFAULT_THRESHOLD);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].course_string(), "01:960:285");
    }

    #[test]
    fn subject_description_with_number_ranks_high() {
        let courses = fixture();
        let results = search(&refs(&courses), "computer 111", DEFAULT_THRESHOLD);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].course_string(), "01:198:111");
    }

    #[test]
    fn bare_subject_code_matches() {
        let courses = fixture();
        let results = search(&refs(&courses), "640", DEFAULT_THRESHOLD);
        // Classified as a bare number; no course numbered 640, but the
        // subject-code equality still catches it at the high tier.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].course_string(), "01:640:111");
    }

    #[test]
    fn instructor_exact_variant_match() {
        let courses = fixture();
        for q in ["john smith", "smith, john", "smith john"] {
            let results = search(&refs(&courses), q, DEFAULT_THRESHOLD);
            assert!(
                results
                    .iter()
                    .any(|c| c.course_string() == "01:198:111"),
                "query {q:?}"
            );
        }
    }

    #[test]
    fn instructor_typo_rescued_by_fuzzy() {
        let courses = fixture();
        let results = search(&refs(&courses), "jon smith", DEFAULT_THRESHOLD);
        assert!(results.iter().any(|c| c.course_string() == "01:198:111"));
    }

    #[test]
    fn bare_cs_never_matches_other_subjects() {
        let courses = fixture();
        let results = search(&refs(&courses), "cs", DEFAULT_THRESHOLD);
        assert!(results.iter().all(|c| c.subject() == "198"));
    }

    #[test]
    fn free_text_fuzzy_over_title() {
        let courses = fixture();
        let results = search(&refs(&courses), "calculus workshop", DEFAULT_THRESHOLD);
        assert!(results.iter().any(|c| c.course_string() == "01:640:111"));
    }

    #[test]
    fn same_key_records_grouped_in_original_order() {
        let mut courses = fixture();
        courses.push(course(
            r#"{
                "courseString": "01:198:111",
                "subject": "198",
                "courseNumber": "111",
                "title": "Intro to CS",
                "subjectDescription": "Computer Science",
                "sections": [{"number": "02"}]
            }"#,
        ));
        let results = search(&refs(&courses), "cs 111", DEFAULT_THRESHOLD);
        assert_eq!(results.len(), 2);
        assert!(results[0].sections[0].instructor_names().count() > 0);
        assert_eq!(results[1].sections[0].number(), "02");
    }

    #[test]
    fn structured_query_suppresses_fuzzy_tier() {
        let mut courses = fixture();
        // A course whose instructor name is fuzzily close to "cs 111".
        courses.push(course(
            r#"{
                "courseString": "01:730:101",
                "subject": "730",
                "courseNumber": "101",
                "title": "Logic",
                "subjectDescription": "Philosophy",
                "sections": [{"instructors": [{"name": "CS, ONE"}]}]
            }"#,
        ));
        let results = search(&refs(&courses), "cs 111", DEFAULT_THRESHOLD);
        assert!(results.iter().all(|c| c.course_string() == "01:198:111"));
    }

    #[test]
    fn ranking_is_descending_by_score() {
        let courses = vec![
            course(
                r#"{
                    "courseString": "01:082:101",
                    "subject": "082",
                    "courseNumber": "101",
                    "title": "Art History Survey",
                    "subjectDescription": "Art History",
                    "sections": []
                }"#,
            ),
            course(
                r#"{
                    "courseString": "01:082:105",
                    "subject": "082",
                    "courseNumber": "105",
                    "title": "History of Art and Design",
                    "subjectDescription": "Art History",
                    "sections": []
                }"#,
            ),
        ];
        let results = search(&refs(&courses), "art history survey", DEFAULT_THRESHOLD);
        assert!(!results.is_empty());
        // The exact title must outrank the partial token overlap.
        assert_eq!(results[0].course_string(), "01:082:101");
    }

    #[test]
    fn no_matches_is_empty_success() {
        let courses = fixture();
        let results = search(&refs(&courses), "underwater basket weaving", DEFAULT_THRESHOLD);
        assert!(results.is_empty());
    }
}
