//! Diff the Markdown tree against the store and apply add/update/remove.

use std::collections::HashSet;

use chrono::Duration;
use tracing::{debug, info, info_span, warn};

use mnemos_core::config::MarkdownConfig;
use mnemos_core::constants::LEVEL_ORIGINAL;
use mnemos_core::errors::MnemosResult;
use mnemos_core::memory::{Memory, MemoryUpdate, NewMemory};
use mnemos_core::models::ReconcileReport;
use mnemos_core::traits::{FileEntry, IFileTree, IMemoryStore};

use crate::parser::{parse_sections, ParsedSection};
use crate::similarity::jaccard;

/// Filesystem clocks are coarse; a file touched this close to the last
/// store write is always re-read.
const MTIME_SLACK_MS: i64 = 2_000;

/// Reconciliation settings; the store and tree are passed per call.
#[derive(Debug, Clone)]
pub struct Reconciler {
    min_section_chars: usize,
    similarity_threshold: f64,
}

impl Reconciler {
    pub fn new(config: &MarkdownConfig) -> Self {
        Self {
            min_section_chars: config.min_section_chars,
            similarity_threshold: config.similarity_threshold,
        }
    }

    /// One full pass: every listed file, then removal of records whose
    /// owned file is gone. A file that fails is counted and skipped.
    pub fn reconcile(&self, store: &dyn IMemoryStore, tree: &dyn IFileTree) -> MnemosResult<ReconcileReport> {
        let _span = info_span!("mnemos.reconcile").entered();
        let files = tree.list()?;
        let mut report = ReconcileReport::default();

        for file in &files {
            match self.reconcile_file(store, tree, file) {
                Ok(file_report) => report.merge(&file_report),
                Err(e) => {
                    warn!(path = %file.path, error = %e, "reconcile failed for file");
                    report.errors += 1;
                }
            }
        }

        let listed: HashSet<&str> = files.iter().map(|f| f.path.as_str()).collect();
        for path in store.source_paths()? {
            if listed.contains(path.as_str()) || !tree.owns(&path) {
                continue;
            }
            for record in store.list_by_source(&path)? {
                match store.delete(&record.id) {
                    Ok(true) => report.removed += 1,
                    Ok(false) => {}
                    Err(e) => {
                        warn!(id = %record.id, path = %path, error = %e, "failed to remove record");
                        report.errors += 1;
                    }
                }
            }
            debug!(path = %path, "file removed from tree");
        }

        info!(
            added = report.added,
            updated = report.updated,
            removed = report.removed,
            unchanged = report.unchanged,
            errors = report.errors,
            "reconcile complete"
        );
        Ok(report)
    }

    /// Reconcile a single file against the records stored for its path.
    pub fn reconcile_file(
        &self,
        store: &dyn IMemoryStore,
        tree: &dyn IFileTree,
        file: &FileEntry,
    ) -> MnemosResult<ReconcileReport> {
        let mut report = ReconcileReport::default();
        let existing = store.list_by_source(&file.path)?;

        if let Some(last_write) = existing.iter().map(|m| m.updated_at).max() {
            if file.modified + Duration::milliseconds(MTIME_SLACK_MS) < last_write {
                report.unchanged = existing.len();
                return Ok(report);
            }
        }

        let text = tree.read(&file.path)?;
        let sections = parse_sections(&file.path, &text, self.min_section_chars);

        // Sections folded into a monthly summary no longer have a record
        // but must not come back as new ones.
        let absorbed = store.absorbed_hashes(&file.path)?;

        let mut matched = vec![false; existing.len()];
        for section in &sections {
            let hash = Memory::compute_content_hash(&section.content);
            if let Some(i) = (0..existing.len()).find(|&i| !matched[i] && existing[i].content_hash == hash) {
                matched[i] = true;
                report.unchanged += 1;
                continue;
            }
            if absorbed.contains(&hash) {
                report.unchanged += 1;
                continue;
            }

            let best = (0..existing.len())
                .filter(|&i| !matched[i])
                .map(|i| (i, jaccard(&existing[i].content, &section.content)))
                .max_by(|a, b| a.1.total_cmp(&b.1));

            match best {
                Some((i, similarity)) if similarity >= self.similarity_threshold => {
                    matched[i] = true;
                    let update = MemoryUpdate {
                        content: Some(section.content.clone()),
                        memory_type: Some(section.memory_type),
                        tags: Some(section.tags.clone()),
                        ..Default::default()
                    };
                    if store.update(&existing[i].id, &update)?.is_some() {
                        debug!(id = %existing[i].id, similarity, "section edited");
                        report.updated += 1;
                    }
                }
                _ => {
                    store.create(&new_record(&file.path, section))?;
                    report.added += 1;
                }
            }
        }

        // Unmatched originals were deleted from the file; anything already
        // folded into a summary stays.
        for (record, _) in existing
            .iter()
            .zip(&matched)
            .filter(|(r, m)| !**m && r.compression_level == LEVEL_ORIGINAL)
        {
            if store.delete(&record.id)? {
                report.removed += 1;
            }
        }
        Ok(report)
    }
}

fn new_record(path: &str, section: &ParsedSection) -> NewMemory {
    NewMemory::new(section.content.clone(), path)
        .with_type(section.memory_type)
        .with_tags(&section.tags)
}
