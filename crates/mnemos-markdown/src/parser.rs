//! Split a Markdown file into candidate memory sections.

use std::sync::LazyLock;

use regex::Regex;

use mnemos_core::memory::{normalize_tags, MemoryType};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{2,3}\s+(.+?)\s*#*\s*$").unwrap());
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)#([\w-]+)").unwrap());

/// Heading keywords, checked in order; first hit wins.
const TYPE_KEYWORDS: &[(&[&str], MemoryType)] = &[
    (&["decision", "decided"], MemoryType::Decision),
    (&["todo", "task"], MemoryType::Todo),
    (&["preference", "like"], MemoryType::Preference),
    (&["summary", "overview"], MemoryType::Summary),
];

/// One section of a file, ready to become a memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSection {
    /// Heading text without hashes; `None` for a preamble or headingless file.
    pub heading: Option<String>,
    /// Heading line plus body, trimmed.
    pub content: String,
    pub tags: Vec<String>,
    pub memory_type: MemoryType,
}

/// Map heading keywords (then the path) to a memory type.
pub fn infer_type(heading: Option<&str>, path: &str) -> MemoryType {
    if let Some(heading) = heading {
        let lower = heading.to_lowercase();
        for (keywords, memory_type) in TYPE_KEYWORDS {
            if keywords.iter().any(|k| lower.contains(k)) {
                return *memory_type;
            }
        }
    }
    if path.to_lowercase().contains("archive") {
        MemoryType::Archive
    } else {
        MemoryType::Note
    }
}

fn heading_tags(heading: &str) -> Vec<String> {
    normalize_tags(HASHTAG_RE.captures_iter(heading).map(|c| c[1].to_string()))
}

/// Split `text` at level-2/3 headings. Text before the first heading forms
/// its own section; a file with no headings is one section. Sections
/// shorter than `min_chars` after trimming are dropped.
pub fn parse_sections(path: &str, text: &str, min_chars: usize) -> Vec<ParsedSection> {
    let mut raw: Vec<(Option<String>, Vec<&str>)> = vec![(None, Vec::new())];
    for line in text.lines() {
        if let Some(caps) = HEADING_RE.captures(line) {
            raw.push((Some(caps[1].to_string()), vec![line]));
        } else if let Some((_, lines)) = raw.last_mut() {
            lines.push(line);
        }
    }

    raw.into_iter()
        .filter_map(|(heading, lines)| {
            let content = lines.join("\n").trim().to_string();
            if content.chars().count() < min_chars {
                return None;
            }
            let tags = heading.as_deref().map(heading_tags).unwrap_or_default();
            let memory_type = infer_type(heading.as_deref(), path);
            Some(ParsedSection {
                heading,
                content,
                tags,
                memory_type,
            })
        })
        .collect()
}
