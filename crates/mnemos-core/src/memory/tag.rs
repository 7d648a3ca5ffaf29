use serde::{Deserialize, Serialize};

/// An entry in the tag catalogue.
///
/// `count` is the number of memories currently carrying the tag; the store
/// keeps it in step with the memory↔tag links on every tag-set change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub count: u64,
}

/// Normalize a tag set: trim, drop a leading `#`, lower-case, drop empties,
/// de-duplicate and sort.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = tags
        .into_iter()
        .map(|t| t.as_ref().trim().trim_start_matches('#').trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}
