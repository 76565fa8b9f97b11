//! Meeting weekday parsing.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Deserializer};

use crate::error::{SchedError, SchedResult};

/// The weekdays a course meets on, sorted Monday-first with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeetingDays(Vec<Weekday>);

impl MeetingDays {
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut days: Vec<Weekday> = days.into_iter().collect();
        days.sort_by_key(|d| d.num_days_from_monday());
        days.dedup();
        MeetingDays(days)
    }

    /// Parse "Mon Wed", "monday,thursday" or the compact "MWF" / "TR" form.
    pub fn parse(input: &str) -> SchedResult<Self> {
        let s = input.replace(',', " ");
        let s = s.trim();

        let tokens: Vec<String> = if is_compact(s) {
            s.chars().map(String::from).collect()
        } else {
            s.split_whitespace().map(String::from).collect()
        };

        let days = tokens
            .iter()
            .map(|tok| {
                weekday_from_token(tok)
                    .ok_or_else(|| SchedError::invalid(format!("Unknown day '{}'", tok)))
            })
            .collect::<SchedResult<Vec<_>>>()?;

        Ok(MeetingDays::new(days))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }
}

/// A single run of 2-3 letters like "MWF" is read one letter per day,
/// except when it is itself a day name ("Mon", "Tue", "Th").
fn is_compact(s: &str) -> bool {
    !s.contains(char::is_whitespace)
        && s.chars().all(|c| c.is_ascii_alphabetic())
        && (2..=3).contains(&s.len())
        && weekday_from_token(s).is_none()
}

fn weekday_from_token(token: &str) -> Option<Weekday> {
    let day = match token.to_lowercase().as_str() {
        "m" | "mon" | "monday" => Weekday::Mon,
        "t" | "tu" | "tue" | "tues" | "tuesday" => Weekday::Tue,
        "w" | "wed" | "wednesday" => Weekday::Wed,
        "r" | "th" | "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
        "f" | "fri" | "friday" => Weekday::Fri,
        "sa" | "sat" | "saturday" => Weekday::Sat,
        "su" | "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

impl FromStr for MeetingDays {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeetingDays::parse(s)
    }
}

impl fmt::Display for MeetingDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", names.join(" "))
    }
}

impl<'de> Deserialize<'de> for MeetingDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        MeetingDays::parse(&s).map_err(serde::de::Error::custom)
    }
}
