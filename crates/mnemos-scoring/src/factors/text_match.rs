/// Fraction of query tokens found as case-insensitive substrings of `text`.
///
/// Tokens are whitespace-delimited. An empty query matches nothing (0.0).
pub fn calculate(text: &str, query: &str) -> f64 {
    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let hits = tokens.iter().filter(|t| haystack.contains(t.as_str())).count();
    hits as f64 / tokens.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_token_fraction() {
        assert_eq!(calculate("Use Tokio for async", "tokio"), 1.0);
        assert_eq!(calculate("Use Tokio for async", "tokio rayon"), 0.5);
        assert_eq!(calculate("Use Tokio for async", "   "), 0.0);
        assert_eq!(calculate("", "tokio"), 0.0);
    }

    #[test]
    fn substring_not_word_match() {
        assert_eq!(calculate("asynchronous", "sync"), 1.0);
    }
}
