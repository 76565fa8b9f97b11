use anyhow::Result;
use coursesched_core::config::SchedConfig;
use owo_colors::OwoColorize;

use crate::render::{pluralize, render_week, Render};

pub fn run(config: &SchedConfig) -> Result<()> {
    let schedule = config.schedule()?;
    config.generator().validate()?;

    println!("{}", schedule.render());
    println!();

    let weeks = schedule.weeks();
    for week in &weeks {
        println!("{}", render_week(week, &config.formats.meeting_title));
    }

    let meetings: usize = weeks.iter().map(|w| w.meetings.len()).sum();
    println!(
        "\n{} {}, {} {}",
        weeks.len(),
        pluralize("week", weeks.len()),
        meetings,
        pluralize("meeting", meetings)
    );
    if let (Some(first), Some(last)) = (weeks.first(), weeks.last()) {
        let files = format!(
            "Files: {} .. {} + {}",
            config.layout.week_file_name(first),
            config.layout.week_file_name(last),
            config.layout.index_name
        );
        println!("{}", files.dimmed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursesched_core::layout::OutputLayout;
    use coursesched_core::MeetingDays;

    fn config() -> SchedConfig {
        SchedConfig {
            start: Some(chrono::NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()),
            weeks: Some(2),
            days: Some(MeetingDays::parse("Mon Wed").unwrap()),
            ..SchedConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_layout() {
        let config = SchedConfig {
            layout: OutputLayout {
                index_name: "../main.ptx".to_string(),
                ..OutputLayout::default()
            },
            ..config()
        };

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("index_name"));
    }

    #[test]
    fn rejects_time_only_meeting_format() {
        let mut config = config();
        config.formats.meeting_title = "%H:%M".to_string();

        assert!(run(&config).is_err());
    }
}
