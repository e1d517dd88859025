//! Versioned record model.
//!
//! A record is stored as JSON inside its ciphertext. Every schema version is
//! one variant of [`Record`]; decoding peeks at the `version` field first and
//! only then commits to a variant decoder, so older files stay readable when
//! new variants are added. Encoding always writes the current version.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::constants;
use crate::core::index::IndexEntry;
use crate::core::types::{RecordId, Tag};
use crate::error::RecordError;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// A stored entry, tagged by schema version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    V1(RecordV1),
}

/// Schema version 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordV1 {
    id: RecordId,
    created_at: DateTime<Utc>,
    tags: Vec<Tag>,
    relative_location: String,
    content: String,
}

#[derive(Deserialize)]
struct VersionProbe {
    #[serde(default)]
    version: Option<u32>,
}

#[derive(Serialize, Deserialize)]
struct RecordV1Wire {
    version: u32,
    #[serde(default)]
    id: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<Tag>,
    #[serde(default)]
    relative_location: String,
    #[serde(default)]
    content: String,
}

impl RecordV1 {
    fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        let wire: RecordV1Wire = serde_json::from_slice(bytes).map_err(RecordError::Parse)?;
        if wire.version != 1 {
            return Err(RecordError::UnsupportedVersion(wire.version));
        }
        if wire.id.trim().is_empty() {
            return Err(RecordError::InvalidRecord("record id is required"));
        }
        let created_at = wire
            .created_at
            .ok_or(RecordError::InvalidRecord("record date is required"))?;

        let relative_location = if wire.relative_location.is_empty() {
            relative_location(&created_at, &wire.id)
        } else {
            wire.relative_location
        };

        Ok(Self {
            id: wire.id,
            created_at,
            tags: normalize_tags(wire.tags),
            relative_location,
            content: wire.content,
        })
    }

    fn encode(&self) -> Result<Vec<u8>, RecordError> {
        let wire = RecordV1Wire {
            version: CURRENT_SCHEMA_VERSION,
            id: self.id.clone(),
            created_at: Some(self.created_at),
            tags: self.tags.clone(),
            relative_location: self.relative_location.clone(),
            content: self.content.clone(),
        };
        serde_json::to_vec_pretty(&wire).map_err(RecordError::Serialize)
    }
}

impl Record {
    /// Create a record at the current schema version.
    ///
    /// The storage location is fixed here from `created_at` and `id`.
    pub fn new(
        id: impl Into<RecordId>,
        created_at: DateTime<Utc>,
        content: impl Into<String>,
        tags: Vec<Tag>,
    ) -> Self {
        let id = id.into();
        Record::V1(RecordV1 {
            relative_location: relative_location(&created_at, &id),
            id,
            created_at,
            tags: normalize_tags(tags),
            content: content.into(),
        })
    }

    /// Decode a plaintext record.
    ///
    /// # Errors
    ///
    /// - `RecordError::UnsupportedVersion` for an unknown or missing version
    /// - `RecordError::InvalidRecord` when `id` or `created_at` is missing
    /// - `RecordError::Parse` for malformed JSON
    pub fn decode(bytes: &[u8]) -> Result<Self, RecordError> {
        let probe: VersionProbe = serde_json::from_slice(bytes).map_err(RecordError::Parse)?;

        match probe.version.unwrap_or(0) {
            1 => RecordV1::decode(bytes).map(Record::V1),
            other => Err(RecordError::UnsupportedVersion(other)),
        }
    }

    /// Encode at the current schema version.
    pub fn encode(&self) -> Result<Vec<u8>, RecordError> {
        self.to_current().encode()
    }

    /// Convert to the current schema variant.
    fn to_current(&self) -> RecordV1 {
        match self {
            Record::V1(r) => r.clone(),
        }
    }

    /// Replace content and tags, keeping id, date, and location.
    ///
    /// The result is always at the current schema version.
    pub fn with_changes(&self, content: impl Into<String>, tags: Vec<Tag>) -> Self {
        let mut current = self.to_current();
        current.content = content.into();
        current.tags = normalize_tags(tags);
        Record::V1(current)
    }

    /// Same record stored at `location` instead of its computed path.
    pub(crate) fn relocated(&self, location: &str) -> Self {
        let mut current = self.to_current();
        current.relative_location = location.to_string();
        Record::V1(current)
    }

    pub fn id(&self) -> &str {
        match self {
            Record::V1(r) => &r.id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Record::V1(r) => r.created_at,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        match self {
            Record::V1(r) => &r.tags,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Record::V1(r) => &r.content,
        }
    }

    /// Path of the ciphertext relative to the `entries/` directory.
    pub fn relative_location(&self) -> &str {
        match self {
            Record::V1(r) => &r.relative_location,
        }
    }

    pub fn schema_version(&self) -> u32 {
        match self {
            Record::V1(_) => 1,
        }
    }

    /// Version-agnostic projection stored in the search index.
    pub fn index_entry(&self) -> IndexEntry {
        IndexEntry {
            id: self.id().to_string(),
            created_at: self.created_at(),
            tags: self.tags().to_vec(),
            relative_location: self.relative_location().to_string(),
        }
    }
}

/// Storage location for a record: `{YYYY}/{MM}/{id}.age`, from the UTC date.
pub fn relative_location(created_at: &DateTime<Utc>, id: &str) -> String {
    format!(
        "{:04}/{:02}/{}.{}",
        created_at.year(),
        created_at.month(),
        id,
        constants::RECORD_EXT
    )
}

/// Trim tags, drop empty ones, and remove duplicates keeping first occurrence.
pub fn normalize_tags<I, S>(tags: I) -> Vec<Tag>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<Tag> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
