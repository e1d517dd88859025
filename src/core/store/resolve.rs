//! Id prefix resolution.

use crate::core::constants::MIN_PREFIX_LEN;
use crate::core::index::SearchIndex;
use crate::core::types::RecordId;
use crate::error::StoreError;

/// Resolve a full id or a unique prefix to a stored id.
///
/// An exact match always wins. Otherwise the input must be at least
/// [`MIN_PREFIX_LEN`] characters and prefix exactly one stored id.
///
/// # Errors
///
/// - `StoreError::PrefixTooShort` when a non-exact input is too short,
///   whether or not anything would match
/// - `StoreError::NotFound` when nothing matches
/// - `StoreError::AmbiguousPrefix` when several ids match
pub fn resolve_id(index: &SearchIndex, input: &str) -> Result<RecordId, StoreError> {
    let input = input.trim();
    if index.contains(input) {
        return Ok(input.to_string());
    }

    if input.chars().count() < MIN_PREFIX_LEN {
        return Err(StoreError::PrefixTooShort {
            prefix: input.to_string(),
            min: MIN_PREFIX_LEN,
        });
    }

    let mut matches = index.ids_with_prefix(input);
    let first = matches
        .next()
        .ok_or_else(|| StoreError::NotFound(input.to_string()))?
        .clone();
    let others = matches.count();
    if others > 0 {
        return Err(StoreError::AmbiguousPrefix {
            prefix: input.to_string(),
            matches: others + 1,
        });
    }

    Ok(first)
}
