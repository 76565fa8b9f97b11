//! Date parsing for schedule inputs.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::{SchedError, SchedResult};

/// Parse a date given as YYYY-MM-DD or M/D/YYYY.
pub fn parse_date(s: &str) -> SchedResult<NaiveDate> {
    let s = s.trim();

    let parsed = if s.contains('/') {
        NaiveDate::parse_from_str(s, "%m/%d/%Y")
    } else {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
    };

    parsed.map_err(|_| {
        SchedError::invalid(format!(
            "Invalid date '{}'. Expected YYYY-MM-DD or M/D/YYYY",
            s
        ))
    })
}

/// Parse a comma or whitespace separated list of dates.
/// An empty string yields an empty set.
pub fn parse_date_list(s: &str) -> SchedResult<BTreeSet<NaiveDate>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(parse_date)
        .collect()
}
