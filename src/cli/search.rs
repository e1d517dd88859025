//! Search command.

use chrono::{NaiveDate, Utc};

use crate::cli::list::render;
use crate::cli::resolve::open_store;
use crate::error::{Result, ValidationError};

/// A parsed search request. Exactly one mode is chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    On(NaiveDate),
    Range { from: NaiveDate, to: NaiveDate },
    LastDays(u32),
    Tag(String),
    AllTags(Vec<String>),
}

impl Query {
    /// Build a query from the raw flags. `--to` defaults to today.
    pub fn from_args(
        on: Option<String>,
        from: Option<String>,
        to: Option<String>,
        last: Option<u32>,
        tag: Option<String>,
        tags: Option<Vec<String>>,
    ) -> Result<Self> {
        if let Some(on) = on {
            return Ok(Query::On(parse_date(&on)?));
        }
        if let Some(from) = from {
            let from = parse_date(&from)?;
            let to = match to {
                Some(to) => parse_date(&to)?,
                None => Utc::now().date_naive(),
            };
            if from > to {
                return Err(ValidationError::InvalidRange {
                    start: from.to_string(),
                    end: to.to_string(),
                }
                .into());
            }
            return Ok(Query::Range { from, to });
        }
        if let Some(days) = last {
            return Ok(Query::LastDays(days));
        }
        if let Some(tag) = tag {
            return Ok(Query::Tag(tag));
        }
        Ok(Query::AllTags(tags.unwrap_or_default()))
    }
}

/// Run a search against the store and print the results.
pub fn execute(store: Option<&str>, query: Query, json: bool) -> Result<()> {
    let store = open_store(store)?;

    let report = match &query {
        Query::On(date) => store.search_by_date(*date),
        Query::Range { from, to } => store.search_by_date_range(*from, *to)?,
        Query::LastDays(days) => store.search_last_days(*days, Utc::now().date_naive()),
        Query::Tag(tag) => store.search_by_tag(tag),
        Query::AllTags(tags) => store.search_by_tags(tags.as_slice()),
    };

    render(&report, json)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            input: input.to_string(),
        }
        .into()
    })
}
