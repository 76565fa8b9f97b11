//! Terminal rendering for schedule types using owo_colors.

use coursesched_core::{CourseSchedule, ScheduleSpan, WeekEntry};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for CourseSchedule {
    fn render(&self) -> String {
        let span = match self.span() {
            ScheduleSpan::Weeks(n) => format!("{} {}", n, pluralize("week", n as usize)),
            ScheduleSpan::Until(end) => format!("until {}", end),
        };

        format!(
            "{} from {}, {} ({}, weeks start on {})",
            "Schedule".bold(),
            self.start(),
            span,
            self.meeting_days(),
            self.alignment()
        )
    }
}

/// One week as a heading line plus an indented line per meeting.
pub fn render_week(week: &WeekEntry, date_format: &str) -> String {
    let mut lines = vec![format!(
        "{} {}",
        format!("Week {}", week.id()).bold(),
        format!("{} .. {}", week.first_day, week.last_day).dimmed()
    )];

    if week.meetings.is_empty() {
        lines.push(format!("   {}", "(no meetings)".dimmed()));
    }
    for date in &week.meetings {
        lines.push(format!("   {} {}", "-".green(), date.format(date_format)));
    }

    lines.join("\n")
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pluralizes() {
        assert_eq!(pluralize("week", 1), "week");
        assert_eq!(pluralize("week", 0), "weeks");
        assert_eq!(pluralize("meeting", 3), "meetings");
    }

    #[test]
    fn week_lists_each_meeting() {
        let week = WeekEntry {
            number: 2,
            first_day: ymd(2024, 1, 15),
            last_day: ymd(2024, 1, 21),
            meetings: vec![ymd(2024, 1, 15), ymd(2024, 1, 17)],
        };

        let out = render_week(&week, "%a %b %-d");

        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("Week 02"));
        assert!(out.contains("Mon Jan 15"));
        assert!(out.contains("Wed Jan 17"));
    }

    #[test]
    fn empty_week_says_so() {
        let week = WeekEntry {
            number: 1,
            first_day: ymd(2024, 1, 8),
            last_day: ymd(2024, 1, 14),
            meetings: Vec::new(),
        };

        assert!(render_week(&week, "%B %d").contains("(no meetings)"));
    }
}
