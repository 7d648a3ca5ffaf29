//! Word-set Jaccard similarity used to pair edited sections with stored
//! records.

use std::collections::HashSet;

/// Lower-cased whitespace tokens.
pub fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// `|A ∩ B| / |A ∪ B|`. Two empty texts are identical (1.0).
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let shared = a.intersection(&b).count();
    let total = a.union(&b).count();
    shared as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jaccard_bounds() {
        assert_eq!(jaccard("a b c", "C B A"), 1.0);
        assert_eq!(jaccard("a b", "c d"), 0.0);
        assert_eq!(jaccard("", ""), 1.0);
        assert!((jaccard("a b c d", "a b c e") - 0.6).abs() < 1e-12);
    }

    #[test]
    fn small_edit_stays_above_default_threshold() {
        let before = "we decided to keep the sqlite store in wal mode for concurrent readers";
        let after = "we decided to keep the sqlite store in wal mode for many concurrent readers";
        assert!(jaccard(before, after) >= 0.7);
    }
}
