//! Time buckets for grouping records by `created_at`.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};

use mnemos_core::memory::Memory;

/// ISO-8601 week key, e.g. `2026-W02`. Weeks start on Monday and week 1 is
/// the week holding the year's first Thursday, so the ISO year can differ
/// from the calendar year around New Year.
pub fn week_key(at: DateTime<Utc>) -> String {
    let week = at.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Calendar month key, e.g. `2026-01`.
pub fn month_key(at: DateTime<Utc>) -> String {
    format!("{}-{:02}", at.year(), at.month())
}

/// Group records by `key(created_at)`. Keys iterate in chronological order;
/// records keep their input order within a group.
pub fn group_by<F>(records: Vec<Memory>, key: F) -> BTreeMap<String, Vec<Memory>>
where
    F: Fn(DateTime<Utc>) -> String,
{
    let mut groups: BTreeMap<String, Vec<Memory>> = BTreeMap::new();
    for record in records {
        groups.entry(key(record.created_at)).or_default().push(record);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_week_uses_thursday_rule() {
        // 2026-01-01 is a Thursday: week 1 starts Monday 2025-12-29.
        let d = Utc.with_ymd_and_hms(2025, 12, 29, 0, 0, 0).unwrap();
        assert_eq!(week_key(d), "2026-W01");
        let d = Utc.with_ymd_and_hms(2026, 1, 4, 23, 59, 59).unwrap();
        assert_eq!(week_key(d), "2026-W01");
        let d = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(week_key(d), "2026-W02");
        // 2021-01-01 is a Friday: it belongs to the last week of 2020.
        let d = Utc.with_ymd_and_hms(2021, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(week_key(d), "2020-W53");
    }

    #[test]
    fn month_key_is_zero_padded() {
        let d = Utc.with_ymd_and_hms(2026, 3, 31, 23, 0, 0).unwrap();
        assert_eq!(month_key(d), "2026-03");
    }
}
