//! In-memory search index.
//!
//! The primary map (`id -> IndexEntry`) is the source of truth; the date and
//! tag buckets are derived from it and only ever change through [`SearchIndex::add`]
//! and [`SearchIndex::remove`]. Only the primary map is persisted.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::constants;
use crate::core::types::{RecordId, Tag};
use crate::error::StoreError;

/// Searchable attributes of a record. Never carries content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    pub relative_location: String,
}

impl IndexEntry {
    /// Bucket key for date lookups: the UTC calendar day.
    pub fn date_key(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

#[derive(Serialize, Deserialize)]
struct IndexDocument {
    version: String,
    #[serde(default)]
    entries: BTreeMap<RecordId, IndexEntry>,
}

/// Id, date, and tag lookup over a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: BTreeMap<RecordId, IndexEntry>,
    by_date: BTreeMap<NaiveDate, BTreeSet<RecordId>>,
    by_tag: BTreeMap<Tag, BTreeSet<RecordId>>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from entries, e.g. after walking the store.
    pub fn from_entries<I: IntoIterator<Item = IndexEntry>>(entries: I) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.add(entry);
        }
        index
    }

    /// Insert or replace an entry.
    ///
    /// Any previous entry for the same id is removed first so no bucket keeps
    /// a stale association.
    pub fn add(&mut self, entry: IndexEntry) {
        self.remove(&entry.id);

        self.by_date
            .entry(entry.date_key())
            .or_default()
            .insert(entry.id.clone());
        for tag in &entry.tags {
            self.by_tag
                .entry(tag.clone())
                .or_default()
                .insert(entry.id.clone());
        }
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Remove an entry and its bucket memberships. No-op if absent.
    pub fn remove(&mut self, id: &str) -> Option<IndexEntry> {
        let entry = self.entries.remove(id)?;

        let day = entry.date_key();
        if let Some(ids) = self.by_date.get_mut(&day) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_date.remove(&day);
            }
        }
        for tag in &entry.tags {
            if let Some(ids) = self.by_tag.get_mut(tag) {
                ids.remove(id);
                if ids.is_empty() {
                    self.by_tag.remove(tag);
                }
            }
        }

        Some(entry)
    }

    pub fn lookup(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_date(&self, date: NaiveDate) -> BTreeSet<RecordId> {
        self.by_date.get(&date).cloned().unwrap_or_default()
    }

    /// Ids created on any day in `[start, end]`. Empty when `start > end`.
    pub fn find_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> BTreeSet<RecordId> {
        if start > end {
            return BTreeSet::new();
        }
        self.by_date
            .range(start..=end)
            .flat_map(|(_, ids)| ids.iter().cloned())
            .collect()
    }

    pub fn find_by_tag(&self, tag: &str) -> BTreeSet<RecordId> {
        self.by_tag.get(tag).cloned().unwrap_or_default()
    }

    /// Ids carrying every tag in `tags`. An empty tag list matches nothing.
    pub fn find_by_all_tags<S: AsRef<str>>(&self, tags: &[S]) -> BTreeSet<RecordId> {
        let mut tags = tags.iter();
        let Some(first) = tags.next() else {
            return BTreeSet::new();
        };

        let mut result = self.find_by_tag(first.as_ref());
        for tag in tags {
            if result.is_empty() {
                break;
            }
            match self.by_tag.get(tag.as_ref()) {
                Some(ids) => result.retain(|id| ids.contains(id)),
                None => result.clear(),
            }
        }
        result
    }

    /// Ids starting with `prefix`, in lexical order.
    pub fn ids_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a RecordId> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(|(id, _)| id)
            .take_while(move |id| id.starts_with(prefix))
    }

    /// All entries, newest first (or oldest first when `descending` is false).
    ///
    /// Ties on `created_at` are broken by id so the order is stable.
    pub fn entries(&self, descending: bool) -> Vec<&IndexEntry> {
        let mut out: Vec<&IndexEntry> = self.entries.values().collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        if descending {
            out.reverse();
        }
        out
    }

    /// All distinct tags with their record counts.
    pub fn tags(&self) -> Vec<(&str, usize)> {
        self.by_tag
            .iter()
            .map(|(tag, ids)| (tag.as_str(), ids.len()))
            .collect()
    }

    /// Serialize the primary map.
    pub fn to_json(&self) -> Result<Vec<u8>, StoreError> {
        let doc = IndexDocument {
            version: constants::INDEX_VERSION.to_string(),
            entries: self.entries.clone(),
        };
        serde_json::to_vec_pretty(&doc).map_err(StoreError::IndexParse)
    }

    /// Parse a persisted primary map and derive the buckets.
    ///
    /// An empty document (e.g. a truncated index) loads as an empty index.
    pub fn from_json(bytes: &[u8]) -> Result<Self, StoreError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }
        let doc: IndexDocument = serde_json::from_slice(bytes).map_err(StoreError::IndexParse)?;
        Ok(Self::from_entries(doc.entries.into_values()))
    }

    #[cfg(test)]
    pub(crate) fn buckets_consistent(&self) -> bool {
        let mut by_date: BTreeMap<NaiveDate, BTreeSet<RecordId>> = BTreeMap::new();
        let mut by_tag: BTreeMap<Tag, BTreeSet<RecordId>> = BTreeMap::new();
        for entry in self.entries.values() {
            by_date
                .entry(entry.date_key())
                .or_default()
                .insert(entry.id.clone());
            for tag in &entry.tags {
                by_tag.entry(tag.clone()).or_default().insert(entry.id.clone());
            }
        }
        by_date == self.by_date && by_tag == self.by_tag
    }
}
