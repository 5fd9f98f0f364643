//! Edit-distance helpers for "did you mean" hints
//!
//! Both inputs are trimmed of surrounding whitespace before comparison.

/// Levenshtein distance between `a` and `b`, counted in characters.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.trim().chars().collect();
    let b: Vec<char> = b.trim().chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single rolling row of the DP table.
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
        }
    }
    row[b.len()]
}

/// The candidate nearest to `word`, if any lies within `max_distance`.
///
/// An exact match is not a suggestion and yields `None`. Ties go to the
/// earlier candidate.
pub fn closest<'a>(word: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    candidates
        .iter()
        .map(|candidate| (distance(word, candidate), *candidate))
        .filter(|(d, _)| *d > 0 && *d <= max_distance)
        .min_by_key(|(d, _)| *d)
        .map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_basics() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("int", "int"), 0);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn test_distance_trims_whitespace() {
        assert_eq!(distance("  int\n", "int"), 0);
        assert_eq!(distance("\tfloat ", "flaot"), 2);
    }

    #[test]
    fn test_distance_is_symmetric() {
        assert_eq!(distance("string", "strng"), distance("strng", "string"));
    }

    #[test]
    fn test_closest_picks_nearest() {
        let types = ["int", "float", "char", "string"];
        assert_eq!(closest("itn", &types, 2), Some("int"));
        assert_eq!(closest("flot", &types, 2), Some("float"));
        assert_eq!(closest("chr", &types, 2), Some("char"));
    }

    #[test]
    fn test_closest_respects_limit_and_exact_match() {
        let types = ["int", "float", "char", "string"];
        assert_eq!(closest("counter", &types, 2), None);
        assert_eq!(closest("int", &types, 2), None);
    }

    #[test]
    fn test_closest_tie_prefers_earlier() {
        assert_eq!(closest("ab", &["aa", "bb"], 1), Some("aa"));
    }
}
