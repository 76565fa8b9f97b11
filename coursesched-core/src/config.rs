//! Schedule configuration file.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use ::config::{Config, File, FileFormat};
use serde::{Deserialize, Deserializer};

use crate::dates::parse_date;
use crate::error::{SchedError, SchedResult};
use crate::generator::Generator;
use crate::layout::OutputLayout;
use crate::schedule::{CourseSchedule, WeekAlignment};
use crate::template::{DateFormats, Templates};
use crate::weekday::MeetingDays;

/// Configuration read from a `coursesched.toml`-style file.
///
/// Every schedule field is optional here so that command-line flags can
/// fill in or override what the file leaves out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchedConfig {
    #[serde(deserialize_with = "de_opt_date")]
    pub start: Option<NaiveDate>,
    pub weeks: Option<i64>,
    #[serde(deserialize_with = "de_opt_date")]
    pub end: Option<NaiveDate>,
    pub days: Option<MeetingDays>,
    #[serde(deserialize_with = "de_date_list")]
    pub no_class: Vec<NaiveDate>,
    pub align: Option<WeekAlignment>,
    pub output_dir: Option<PathBuf>,

    pub layout: OutputLayout,
    pub formats: DateFormats,
    pub templates: Templates,
}

impl SchedConfig {
    /// Default config location: ~/.config/coursesched/config.toml
    pub fn default_path() -> SchedResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedError::Config("Could not determine config directory".into()))?
            .join("coursesched");

        Ok(config_dir.join("config.toml"))
    }

    /// Load an explicit config file. The file must exist.
    pub fn load(path: &Path) -> SchedResult<Self> {
        if !path.exists() {
            return Err(SchedError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()
            .map_err(|e| SchedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedError::Config(e.to_string()))
    }

    /// Load the config at the default location, or an empty config if there
    /// is none.
    pub fn load_default() -> SchedResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            log::debug!("loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(SchedConfig::default())
        }
    }

    /// Parse config from TOML text.
    pub fn from_toml(content: &str) -> SchedResult<Self> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| SchedError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SchedError::Config(e.to_string()))
    }

    /// Build and validate the schedule described by this config.
    pub fn schedule(&self) -> SchedResult<CourseSchedule> {
        let start = self
            .start
            .ok_or_else(|| SchedError::invalid("A start date is required"))?;
        let days = self
            .days
            .clone()
            .ok_or_else(|| SchedError::invalid("Meeting days are required"))?;

        let schedule = match (self.weeks, self.end) {
            (Some(weeks), None) => CourseSchedule::new(start, weeks, days)?,
            (None, Some(end)) => CourseSchedule::until(start, end, days)?,
            (Some(_), Some(_)) => {
                return Err(SchedError::invalid(
                    "Set either a number of weeks or an end date, not both",
                ));
            }
            (None, None) => {
                return Err(SchedError::invalid(
                    "Either a number of weeks or an end date is required",
                ));
            }
        };

        schedule
            .with_no_class(self.no_class.iter().copied())
            .with_alignment(self.align.unwrap_or_default())
    }

    pub fn generator(&self) -> Generator {
        Generator::new(
            self.templates.clone(),
            self.formats.clone(),
            self.layout.clone(),
        )
    }

    /// Output directory with `~` expanded; the working directory by default.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned()),
            None => PathBuf::from("."),
        }
    }

    /// Write a config file with every option commented out.
    pub fn create_default_config(path: &Path) -> SchedResult<()> {
        let contents = "\
# coursesched configuration

# First day of the course (YYYY-MM-DD or M/D/YYYY):
# start = \"2026-03-12\"

# Either a number of weeks...
# weeks = 11
# ...or a last day of class:
# end = \"2026-06-02\"

# Meeting days, e.g. \"Mon Wed\", \"MWF\" or \"TR\":
# days = \"MWF\"

# Dates without class:
# no_class = [\"2026-03-27\", \"2026-04-10\"]

# Week windows start on the start date (\"start\") or on Mondays (\"monday\"):
# align = \"start\"

# Where files are written:
# output_dir = \"schedule\"

# [layout]
# week_prefix = \"week\"
# extension = \"ptx\"
# index_name = \"main.ptx\"

# [formats]
# range_title = \"%B %-d\"
# meeting_title = \"%B %d\"

# [templates]
# meeting = \"\"\"
#       <li>
#         <title>{date}</title>
#         <p>
#           Material
#         </p>
#       </li>
# \"\"\"
";

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SchedError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SchedError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn de_opt_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_date(&s).map_err(serde::de::Error::custom))
        .transpose()
}

fn de_date_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error> {
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|s| parse_date(s).map_err(serde::de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_full_config() {
        let config = SchedConfig::from_toml(
            r#"
            start = "3/12/2026"
            end = "2026-06-02"
            days = "TR"
            no_class = ["2026-03-26"]
            align = "monday"
            output_dir = "out"

            [layout]
            extension = "xml"

            [formats]
            meeting_title = "%a %b %-d"
            "#,
        )
        .unwrap();

        assert_eq!(config.start, Some(ymd(2026, 3, 12)));
        assert_eq!(config.end, Some(ymd(2026, 6, 2)));
        assert_eq!(
            config.days,
            Some(MeetingDays::new([Weekday::Tue, Weekday::Thu]))
        );
        assert_eq!(config.no_class, vec![ymd(2026, 3, 26)]);
        assert_eq!(config.align, Some(WeekAlignment::Monday));
        assert_eq!(config.layout.extension, "xml");
        assert_eq!(config.layout.week_prefix, "week");
        assert_eq!(config.formats.meeting_title, "%a %b %-d");
        assert_eq!(config.formats.range_title, "%B %-d");
        assert_eq!(config.output_dir(), PathBuf::from("out"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = SchedConfig::from_toml("").unwrap();
        assert!(config.start.is_none());
        assert_eq!(config.layout, OutputLayout::default());
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn bad_values_are_config_errors() {
        assert!(SchedConfig::from_toml("start = \"2026-02-30\"").is_err());
        assert!(SchedConfig::from_toml("days = \"Mon Funday\"").is_err());
        assert!(SchedConfig::from_toml("align = \"sunday\"").is_err());
    }

    #[test]
    fn schedule_requires_start_days_and_span() {
        let mut config = SchedConfig {
            start: Some(ymd(2024, 1, 8)),
            days: Some(MeetingDays::parse("Mon Wed").unwrap()),
            ..SchedConfig::default()
        };
        assert!(config.schedule().is_err());

        config.weeks = Some(2);
        assert_eq!(config.schedule().unwrap().weeks().len(), 2);

        config.end = Some(ymd(2024, 3, 1));
        assert!(config.schedule().is_err());

        config.weeks = None;
        assert!(config.schedule().is_ok());

        config.start = None;
        assert!(config.schedule().is_err());
    }

    #[test]
    fn schedule_rejects_zero_weeks() {
        let config = SchedConfig {
            start: Some(ymd(2024, 1, 8)),
            weeks: Some(0),
            days: Some(MeetingDays::parse("MW").unwrap()),
            ..SchedConfig::default()
        };
        assert!(matches!(
            config.schedule(),
            Err(SchedError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn schedule_rejects_spans_past_the_calendar() {
        let config = SchedConfig::from_toml(
            r#"
            start = "9999-12-27"
            weeks = 14000000
            days = "M"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.schedule(),
            Err(SchedError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        SchedConfig::create_default_config(&path).unwrap();
        let config = SchedConfig::load(&path).unwrap();

        assert!(config.start.is_none());
        assert!(config.weeks.is_none());
        assert_eq!(config.layout, OutputLayout::default());
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SchedConfig::load(&dir.path().join("nope.toml")),
            Err(SchedError::Config(_))
        ));
    }
}
