//! The relevancy engine behind the candidate search endpoint.
//!
//! Given a free-text query it produces the normalized word list, scores each
//! candidate's name by word overlap, and returns the candidates ranked by
//! descending score. The whole pipeline is pure and in-memory; fetching the
//! pre-filtered candidate set is the repository's job.

use crate::error::RelevancyError;
use core_types::Candidate;
use std::collections::HashSet;

pub mod error;

/// Normalizes a raw query into its list of search words.
///
/// The query is trimmed and lowercased, then split on whitespace. Word order
/// and duplicates are preserved; deduplication is a scoring concern. A query
/// that is empty after trimming is rejected.
pub fn parse_query(raw: &str) -> Result<Vec<String>, RelevancyError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RelevancyError::EmptyQuery);
    }
    Ok(trimmed
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect())
}

/// Computes the relevancy score of a candidate name against the query words.
///
/// Each distinct word contributes 1 if it appears anywhere in the name
/// (case-insensitive substring), 0 otherwise. A word repeated in the query
/// still contributes at most 1: presence is checked, not frequency.
pub fn relevancy_score(name: &str, words: &[String]) -> u32 {
    let name = name.to_lowercase();
    let mut counted: HashSet<&str> = HashSet::with_capacity(words.len());
    words.iter().fold(0, |score, word| {
        if counted.insert(word.as_str()) && name.contains(word.as_str()) {
            score + 1
        } else {
            score
        }
    })
}

/// Scores, filters, and ranks candidates for a normalized word list.
///
/// Candidates matching none of the words are dropped. The sort is stable and
/// descending by score, so candidates with equal scores keep their incoming
/// (insertion) order.
pub fn rank(candidates: Vec<Candidate>, words: &[String]) -> Vec<Candidate> {
    // 1. Score
    let mut scored: Vec<(u32, Candidate)> = candidates
        .into_iter()
        .map(|candidate| (relevancy_score(&candidate.name, words), candidate))
        // 2. Filter: at least one word must match
        .filter(|(score, _)| *score > 0)
        .collect();

    tracing::debug!(words = words.len(), matched = scored.len(), "Ranking candidates.");

    // 3. Rank
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Gender;

    fn candidate(id: i64, name: &str) -> Candidate {
        Candidate {
            id,
            name: name.to_string(),
            age: 30,
            gender: Gender::Male,
            email: format!("candidate{id}@example.com"),
            phone_number: "9876543210".to_string(),
        }
    }

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn parse_query_trims_lowercases_and_splits() {
        let words = parse_query("  Ajay   Kumar Yadav ").unwrap();
        assert_eq!(words, vec!["ajay", "kumar", "yadav"]);
    }

    #[test]
    fn parse_query_keeps_duplicate_words() {
        let words = parse_query("ajay AJAY").unwrap();
        assert_eq!(words, vec!["ajay", "ajay"]);
    }

    #[test]
    fn parse_query_rejects_empty_and_whitespace_queries() {
        assert_eq!(parse_query("").unwrap_err(), RelevancyError::EmptyQuery);
        assert_eq!(parse_query("   \t ").unwrap_err(), RelevancyError::EmptyQuery);
    }

    #[test]
    fn score_counts_each_matching_word_once() {
        let words = parse_query("ajay kumar yadav").unwrap();
        assert_eq!(relevancy_score("Ajay Kumar Yadav", &words), 3);
        assert_eq!(relevancy_score("Ajay Kumar", &words), 2);
        assert_eq!(relevancy_score("Ramesh Yadav", &words), 1);
        assert_eq!(relevancy_score("Nobody Here", &words), 0);
    }

    #[test]
    fn duplicate_query_words_do_not_inflate_the_score() {
        let words = parse_query("ajay ajay ajay").unwrap();
        assert_eq!(relevancy_score("Ajay Kumar", &words), 1);
    }

    #[test]
    fn score_matches_substrings_not_whole_words() {
        let words = parse_query("user").unwrap();
        assert_eq!(relevancy_score("test user1", &words), 1);
    }

    #[test]
    fn rank_returns_all_candidates_matching_any_word() {
        let words = parse_query("test user").unwrap();
        let ranked = rank(
            vec![candidate(1, "test user"), candidate(2, "test user1")],
            &words,
        );
        assert_eq!(names(&ranked), vec!["test user", "test user1"]);
    }

    #[test]
    fn rank_drops_candidates_matching_no_word() {
        let words = parse_query("yadav").unwrap();
        let ranked = rank(
            vec![candidate(1, "Ajay Singh"), candidate(2, "Ramesh Yadav")],
            &words,
        );
        assert_eq!(names(&ranked), vec!["Ramesh Yadav"]);
    }

    #[test]
    fn rank_orders_by_score_with_insertion_order_tie_break() {
        let words = parse_query("Ajay Kumar Yadav").unwrap();
        let pool = vec![
            candidate(1, "Ajay Kumar Yadav"),
            candidate(2, "Ajay Kumar"),
            candidate(3, "Ajay Yadav"),
            candidate(4, "Kumar Yadav"),
            candidate(5, "Ramesh Yadav"),
            candidate(6, "Ajay Singh"),
        ];
        let ranked = rank(pool, &words);
        assert_eq!(
            names(&ranked),
            vec![
                "Ajay Kumar Yadav", // score 3
                "Ajay Kumar",       // score 2
                "Ajay Yadav",       // score 2, inserted before "Kumar Yadav"
                "Kumar Yadav",      // score 2
                "Ramesh Yadav",     // score 1
                "Ajay Singh",       // score 1
            ]
        );
    }
}
