/*!
 * Fuzzy subsequence scoring for interactive scheme selection
 */

/// Score how well `needle` matches `haystack`, ignoring case.
///
/// Returns 0.0 when `needle` is not an in-order subsequence of `haystack`.
/// Otherwise the score starts at 1.0 and each matched character adds
/// `1 / (previous_match + 1)`, so matches packed near the start of the
/// haystack outrank matches spread further along it.
pub fn score(needle: &str, haystack: &str) -> f64 {
    let haystack: Vec<char> = haystack.to_lowercase().chars().collect();
    let mut total = 1.0;
    let mut last_match = 0usize;
    let mut j = 0usize;

    for c in needle.to_lowercase().chars() {
        while j < haystack.len() && haystack[j] != c {
            j += 1;
        }
        if j >= haystack.len() {
            return 0.0;
        }
        total += 1.0 / (last_match as f64 + 1.0);
        last_match = j;
        j += 1;
    }

    total
}

/// Rank `candidates` against `query`, best first. Non-matching candidates
/// are dropped; equal scores are ordered by key.
pub fn rank<'a, T, F>(query: &str, candidates: &'a [T], key: F) -> Vec<(&'a T, f64)>
where
    F: Fn(&T) -> &str,
{
    let mut ranked: Vec<(&T, f64)> = candidates
        .iter()
        .map(|candidate| (candidate, score(query, key(candidate))))
        .filter(|(_, s)| *s > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| key(a.0).cmp(key(b.0))));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_matches() {
        assert!(score("f", "foo") > 0.0);
        assert_eq!(score("x", "foo"), 0.0);
        assert!(score("hl", "hello") > 0.0);
        assert!(score("hel", "hello") > score("ho", "hello"));
    }

    #[test]
    fn test_score_is_case_insensitive() {
        assert_eq!(score("HeL", "hello"), score("hel", "HELLO"));
        assert!(score("W", "wlan-home") > 0.0);
    }

    #[test]
    fn test_score_empty_inputs() {
        assert_eq!(score("", "anything"), 1.0);
        assert_eq!(score("", ""), 1.0);
        assert_eq!(score("a", ""), 0.0);
    }

    #[test]
    fn test_score_requires_order() {
        assert_eq!(score("oh", "ho"), 0.0);
        // each haystack position is consumed once
        assert_eq!(score("ll", "hel"), 0.0);
        assert!(score("ll", "hello") > 0.0);
    }

    #[test]
    fn test_score_exact_values() {
        // 1 + 1/1 + 1/(0+1) + 1/(1+1)
        assert_eq!(score("hel", "hello"), 3.5);
        // 1 + 1/1 + 1/(0+1)
        assert_eq!(score("ho", "hello"), 3.0);
    }

    #[test]
    fn test_rank_orders_and_filters() {
        let names = ["office", "home", "hotel-lobby", "cafe"];
        let ranked = rank("ho", &names, |n| *n);
        let order: Vec<&str> = ranked.iter().map(|(n, _)| **n).collect();
        assert_eq!(order, vec!["home", "hotel-lobby"]);
    }

    #[test]
    fn test_rank_empty_query_keeps_everything() {
        let names = ["b", "a"];
        let ranked = rank("", &names, |n| *n);
        assert_eq!(ranked.len(), 2);
        assert_eq!(*ranked[0].0, "a");
    }

    #[test]
    fn test_rank_ties_ordered_by_key() {
        let names = ["hotspot", "home"];
        let ranked = rank("ho", &names, |n| *n);
        let order: Vec<&str> = ranked.iter().map(|(n, _)| **n).collect();
        assert_eq!(order, vec!["home", "hotspot"]);
    }
}
