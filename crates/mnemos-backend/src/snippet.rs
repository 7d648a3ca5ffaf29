//! Snippet extraction around the first query match.

const ELLIPSIS: &str = "...";

/// Char index of the first case-insensitive occurrence of `needle`.
///
/// Lower-casing can expand a char (`İ` becomes two), so the comparison runs
/// over the folded haystack and maps the hit back to its source char.
fn find_ci(haystack: &[char], needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return None;
    }
    let (folded, origin): (Vec<char>, Vec<usize>) = haystack
        .iter()
        .enumerate()
        .flat_map(|(i, c)| c.to_lowercase().map(move |l| (l, i)))
        .unzip();
    folded
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|pos| origin[pos])
}

/// Where the window should be anchored: the whole query first, then the
/// first token that occurs.
fn anchor(chars: &[char], query: &str) -> Option<usize> {
    let query = query.trim();
    find_ci(chars, query).or_else(|| query.split_whitespace().find_map(|token| find_ci(chars, token)))
}

/// Cut a `before + after` character window out of `text`, starting
/// `before` characters ahead of the first match (or at the top if nothing
/// matches). Truncated edges are marked with `...`.
pub fn extract(text: &str, query: &str, before: usize, after: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let width = before + after;
    if chars.len() <= width {
        return text.to_string();
    }

    let start = anchor(&chars, query).map_or(0, |m| m.saturating_sub(before));
    let start = start.min(chars.len() - width);
    let end = start + width;

    let mut snippet = String::with_capacity(width + 2 * ELLIPSIS.len());
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_returned_whole() {
        assert_eq!(extract("tiny note", "note", 200, 500), "tiny note");
    }

    #[test]
    fn window_starts_before_the_match() {
        let text = format!("{}NEEDLE{}", "a".repeat(1000), "b".repeat(1000));
        let snippet = extract(&text, "needle", 200, 500);
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        let body = &snippet[3..snippet.len() - 3];
        assert_eq!(body.chars().count(), 700);
        assert_eq!(body.find("NEEDLE"), Some(200));
    }

    #[test]
    fn no_match_uses_leading_window() {
        let text = "x".repeat(1000);
        let snippet = extract(&text, "absent", 200, 500);
        assert!(!snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), 703);
    }

    #[test]
    fn match_near_the_end_keeps_full_width() {
        let text = format!("{}tail", "y".repeat(1000));
        let snippet = extract(&text, "TAIL", 200, 500);
        assert!(snippet.starts_with("..."));
        assert!(!snippet.ends_with("..."));
        assert!(snippet.ends_with("tail"));
        assert_eq!(snippet.chars().count(), 703);
    }

    #[test]
    fn falls_back_to_a_single_token() {
        let text = format!("{}rollback plan{}", "z".repeat(900), "z".repeat(900));
        let snippet = extract(&text, "database rollback", 10, 40);
        assert!(snippet.contains("rollback plan"), "{snippet}");
    }

    #[test]
    fn expanding_lowercase_does_not_shift_the_match() {
        let text = format!("{}İstanbul office{}", "İ".repeat(900), "q".repeat(900));
        let snippet = extract(&text, "İSTANBUL", 10, 40);
        assert!(snippet.contains("İstanbul office"), "{snippet}");
        assert_eq!(find_ci(&"İİ office".chars().collect::<Vec<_>>(), "OFFICE"), Some(3));
        assert_eq!(find_ci(&"İx".chars().collect::<Vec<_>>(), "İX"), Some(0));
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let text = "é".repeat(800);
        let snippet = extract(&text, "é", 200, 500);
        assert_eq!(snippet.chars().count(), 703);
    }
}
