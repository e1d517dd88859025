//! Multi-record reads.
//!
//! A record that fails to load is reported next to the ones that did; it
//! never aborts the whole read.

use chrono::{Duration, NaiveDate};
use tracing::warn;

use super::{RecordFailure, RecordStore};
use crate::core::record::Record;
use crate::core::types::RecordId;
use crate::error::{Result, ValidationError};

/// Records loaded by a search, newest first, plus the ones that failed.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub failures: Vec<RecordFailure>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.failures.is_empty()
    }
}

impl RecordStore {
    /// Decrypt the given ids, collecting per-record failures.
    pub fn load_many<I>(&self, ids: I) -> LoadReport
    where
        I: IntoIterator<Item = RecordId>,
    {
        let mut report = LoadReport::default();

        for id in ids {
            let Some(entry) = self.index.lookup(&id) else {
                continue;
            };
            match self.read_record(&entry.relative_location) {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!(id = %id, location = %entry.relative_location, "failed to load record: {}", e);
                    report.failures.push(RecordFailure {
                        location: entry.relative_location.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        report.records.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(a.id()))
        });
        report
    }

    /// The `n` most recent records.
    pub fn list_recent(&self, n: usize) -> LoadReport {
        let ids = self
            .index
            .entries(true)
            .into_iter()
            .take(n)
            .map(|e| e.id.clone())
            .collect::<Vec<_>>();
        self.load_many(ids)
    }

    /// Records created on `date` (UTC).
    pub fn search_by_date(&self, date: NaiveDate) -> LoadReport {
        self.load_many(self.index.find_by_date(date))
    }

    /// Records created between `start` and `end`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRange` if `start` is after `end`.
    pub fn search_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<LoadReport> {
        if start > end {
            return Err(ValidationError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            }
            .into());
        }
        Ok(self.load_many(self.index.find_by_date_range(start, end)))
    }

    /// Records from the last `days` days, counting `today`.
    ///
    /// A window reaching past the earliest representable date covers
    /// everything up to `today`.
    pub fn search_last_days(&self, days: u32, today: NaiveDate) -> LoadReport {
        if days == 0 {
            return LoadReport::default();
        }
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days) - 1))
            .unwrap_or(NaiveDate::MIN);
        self.load_many(self.index.find_by_date_range(start, today))
    }

    pub fn search_by_tag(&self, tag: &str) -> LoadReport {
        self.load_many(self.index.find_by_tag(tag.trim()))
    }

    /// Records carrying every tag. An empty list matches nothing.
    pub fn search_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> LoadReport {
        let tags: Vec<&str> = tags.iter().map(|t| t.as_ref().trim()).collect();
        self.load_many(self.index.find_by_all_tags(tags.as_slice()))
    }
}
