use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::Memory;
use mnemos_core::traits::{Granularity, ISummaryGenerator};

/// Longest bullet kept per record, in characters.
const MAX_BULLET_CHARS: usize = 160;

/// Deterministic placeholder generator: a header line plus one bullet per
/// record, taken from its summary or first non-empty content line.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSummarizer;

impl HeuristicSummarizer {
    fn bullet(memory: &Memory) -> String {
        let source = memory
            .summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&memory.content);
        let line = source
            .lines()
            .map(|l| l.trim().trim_start_matches('#').trim())
            .find(|l| !l.is_empty())
            .unwrap_or_default();
        truncate_chars(line, MAX_BULLET_CHARS)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

impl ISummaryGenerator for HeuristicSummarizer {
    fn generate(&self, records: &[Memory], granularity: Granularity) -> MnemosResult<Option<String>> {
        if records.is_empty() {
            return Ok(None);
        }
        let header = match granularity {
            Granularity::Weekly => "Weekly summary",
            Granularity::Monthly => "Monthly summary",
        };
        let mut out = format!("{header} of {} memories", records.len());
        for record in records {
            out.push_str("\n- ");
            out.push_str(&Self::bullet(record));
        }
        Ok(Some(out))
    }
}
