//! Course schedule model and week enumeration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;

use crate::error::{SchedError, SchedResult};
use crate::weekday::MeetingDays;

/// Longest schedule accepted, in weeks (twenty years of classes).
pub const MAX_WEEKS: u32 = 1040;

/// How far the schedule runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSpan {
    /// A fixed number of weeks.
    Weeks(u32),
    /// Every week up to and including the one containing this date.
    Until(NaiveDate),
}

/// Where week windows are anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekAlignment {
    /// Week 1 starts on the start date.
    #[default]
    Start,
    /// Calendar weeks, Monday to Sunday. Week 1 contains the start date.
    Monday,
}

impl FromStr for WeekAlignment {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(WeekAlignment::Start),
            "monday" | "mon" => Ok(WeekAlignment::Monday),
            other => Err(SchedError::invalid(format!(
                "Unknown week alignment '{}'. Expected 'start' or 'monday'",
                other
            ))),
        }
    }
}

impl fmt::Display for WeekAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekAlignment::Start => write!(f, "start"),
            WeekAlignment::Monday => write!(f, "monday"),
        }
    }
}

/// One scheduled week: its 7-day window and the meetings inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekEntry {
    /// 1-based week index.
    pub number: u32,
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub meetings: Vec<NaiveDate>,
}

impl WeekEntry {
    /// Week number zero-padded to two digits ("01", "12", "104").
    pub fn id(&self) -> String {
        format!("{:02}", self.number)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }
}

/// A validated course schedule.
#[derive(Debug, Clone)]
pub struct CourseSchedule {
    start: NaiveDate,
    span: ScheduleSpan,
    meeting_days: MeetingDays,
    no_class: BTreeSet<NaiveDate>,
    alignment: WeekAlignment,
}

impl CourseSchedule {
    /// Build a schedule running for `weeks` weeks from `start`.
    ///
    /// `weeks` is signed so that zero and negative counts coming from user
    /// input surface as `InvalidConfiguration` rather than a parse failure.
    pub fn new(start: NaiveDate, weeks: i64, meeting_days: MeetingDays) -> SchedResult<Self> {
        if weeks < 1 {
            return Err(SchedError::invalid(format!(
                "Number of weeks must be at least 1, got {}",
                weeks
            )));
        }
        let weeks = u32::try_from(weeks)
            .ok()
            .filter(|w| *w <= MAX_WEEKS)
            .ok_or_else(|| {
                SchedError::invalid(format!(
                    "Number of weeks must be at most {}, got {}",
                    MAX_WEEKS, weeks
                ))
            })?;

        // The last window ends the day before start + 7 * weeks
        if start.checked_add_days(Days::new(7 * u64::from(weeks))).is_none() {
            return Err(SchedError::invalid(format!(
                "{} weeks from {} runs past the last supported date",
                weeks, start
            )));
        }

        Self::with_span(start, ScheduleSpan::Weeks(weeks), meeting_days)
    }

    /// Build a schedule running from `start` through `end`.
    pub fn until(start: NaiveDate, end: NaiveDate, meeting_days: MeetingDays) -> SchedResult<Self> {
        if end < start {
            return Err(SchedError::invalid(format!(
                "End date {} is before start date {}",
                end, start
            )));
        }

        let weeks = (end - start).num_days() / 7 + 1;
        if weeks > i64::from(MAX_WEEKS) {
            return Err(SchedError::invalid(format!(
                "{} to {} spans {} weeks, more than the maximum of {}",
                start, end, weeks, MAX_WEEKS
            )));
        }

        // The window containing `end` may run up to six days past it
        if end.checked_add_days(Days::new(6)).is_none() {
            return Err(SchedError::invalid(format!(
                "End date {} is too close to the last supported date",
                end
            )));
        }

        Self::with_span(start, ScheduleSpan::Until(end), meeting_days)
    }

    fn with_span(
        start: NaiveDate,
        span: ScheduleSpan,
        meeting_days: MeetingDays,
    ) -> SchedResult<Self> {
        if meeting_days.is_empty() {
            return Err(SchedError::invalid("At least one meeting day is required"));
        }

        Ok(CourseSchedule {
            start,
            span,
            meeting_days,
            no_class: BTreeSet::new(),
            alignment: WeekAlignment::default(),
        })
    }

    pub fn with_no_class(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.no_class.extend(dates);
        self
    }

    /// Fails when Monday alignment would start week 1 before the first
    /// supported date.
    pub fn with_alignment(mut self, alignment: WeekAlignment) -> SchedResult<Self> {
        self.alignment = alignment;
        if self.anchor().is_none() {
            return Err(SchedError::invalid(format!(
                "The Monday before {} is before the first supported date",
                self.start
            )));
        }
        Ok(self)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn span(&self) -> ScheduleSpan {
        self.span
    }

    pub fn meeting_days(&self) -> &MeetingDays {
        &self.meeting_days
    }

    pub fn alignment(&self) -> WeekAlignment {
        self.alignment
    }

    /// First day of week 1. `None` only when the Monday before `start`
    /// precedes the first supported date, which `with_alignment` rejects.
    fn anchor(&self) -> Option<NaiveDate> {
        match self.alignment {
            WeekAlignment::Start => Some(self.start),
            WeekAlignment::Monday => {
                let back = u64::from(self.start.weekday().num_days_from_monday());
                self.start.checked_sub_days(Days::new(back))
            }
        }
    }

    /// Enumerate every week of the schedule in order.
    pub fn weeks(&self) -> Vec<WeekEntry> {
        let mut weeks = Vec::new();
        let Some(anchor) = self.anchor() else {
            return weeks;
        };

        for number in 1..=MAX_WEEKS + 1 {
            let offset = Days::new(7 * (u64::from(number) - 1));
            let Some(first_day) = anchor.checked_add_days(offset) else {
                break;
            };

            let done = match self.span {
                ScheduleSpan::Weeks(n) => number > n,
                ScheduleSpan::Until(end) => first_day > end,
            };
            if done {
                break;
            }

            let Some(last_day) = first_day.checked_add_days(Days::new(6)) else {
                break;
            };
            let meetings = first_day
                .iter_days()
                .take(7)
                .filter(|d| self.is_meeting(*d))
                .collect();

            weeks.push(WeekEntry {
                number,
                first_day,
                last_day,
                meetings,
            });
        }

        weeks
    }

    fn is_meeting(&self, date: NaiveDate) -> bool {
        if !self.meeting_days.contains(date.weekday()) {
            return false;
        }
        if date < self.start || self.no_class.contains(&date) {
            return false;
        }
        match self.span {
            ScheduleSpan::Weeks(_) => true,
            ScheduleSpan::Until(end) => date <= end,
        }
    }
}
