//! Schedule flags shared by `generate` and `preview`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use coursesched_core::config::SchedConfig;
use coursesched_core::dates::{parse_date, parse_date_list};
use coursesched_core::{MeetingDays, WeekAlignment};

#[derive(Args, Debug, Default)]
pub struct ScheduleArgs {
    /// Config file (default: ~/.config/coursesched/config.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First day of the course (YYYY-MM-DD or M/D/YYYY)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Number of weeks to generate
    #[arg(short, long, allow_negative_numbers = true, conflicts_with = "end")]
    pub weeks: Option<i64>,

    /// Last day of class, instead of a week count
    #[arg(short, long, conflicts_with = "weeks")]
    pub end: Option<String>,

    /// Meeting days (e.g. "Mon Wed", "MWF", "TR")
    #[arg(short, long)]
    pub days: Option<String>,

    /// Dates without class, comma separated
    #[arg(long)]
    pub no_class: Option<String>,

    /// Anchor week windows on the start date or on Mondays
    #[arg(long, value_name = "start|monday")]
    pub align: Option<String>,
}

impl ScheduleArgs {
    /// Load the config file, then apply flags on top of it.
    pub fn resolve(self) -> Result<SchedConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                SchedConfig::load(path)
                    .with_context(|| format!("Could not load config {}", path.display()))?
            }
            None => SchedConfig::load_default()?,
        };

        self.apply(&mut config)?;
        Ok(config)
    }

    fn apply(self, config: &mut SchedConfig) -> Result<()> {
        if let Some(start) = self.start {
            config.start = Some(parse_date(&start)?);
        }

        // A span given on the command line replaces the file's span entirely
        if let Some(weeks) = self.weeks {
            config.weeks = Some(weeks);
            config.end = None;
        }
        if let Some(end) = self.end {
            config.end = Some(parse_date(&end)?);
            config.weeks = None;
        }

        if let Some(days) = self.days {
            config.days = Some(MeetingDays::parse(&days)?);
        }
        if let Some(no_class) = self.no_class {
            config.no_class = parse_date_list(&no_class)?.into_iter().collect();
        }
        if let Some(align) = self.align {
            config.align = Some(align.parse::<WeekAlignment>()?);
        }

        Ok(())
    }
}
