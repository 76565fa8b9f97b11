//! Output file naming.

use serde::Deserialize;

use crate::error::{SchedError, SchedResult};
use crate::schedule::WeekEntry;

static DEFAULT_WEEK_PREFIX: &str = "week";
static DEFAULT_EXTENSION: &str = "ptx";
static DEFAULT_INDEX_NAME: &str = "main.ptx";

/// Naming convention for generated files: `{week_prefix}{NN}.{extension}`
/// per week, plus a single index file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputLayout {
    pub week_prefix: String,
    pub extension: String,
    pub index_name: String,
}

impl Default for OutputLayout {
    fn default() -> Self {
        OutputLayout {
            week_prefix: DEFAULT_WEEK_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

impl OutputLayout {
    pub fn week_file_name(&self, week: &WeekEntry) -> String {
        format!("{}{}.{}", self.week_prefix, week.id(), self.extension)
    }

    /// File names must be plain names inside the output directory, and the
    /// index must not collide with a week file.
    pub fn validate(&self) -> SchedResult<()> {
        for (field, value) in [
            ("week_prefix", &self.week_prefix),
            ("extension", &self.extension),
            ("index_name", &self.index_name),
        ] {
            if value.contains(&['/', '\\'][..]) {
                return Err(SchedError::invalid(format!(
                    "layout.{} must not contain path separators: '{}'",
                    field, value
                )));
            }
        }

        if self.index_name.is_empty() {
            return Err(SchedError::invalid("layout.index_name must not be empty"));
        }

        let week_shaped = self
            .index_name
            .strip_prefix(&self.week_prefix)
            .and_then(|rest| rest.strip_suffix(&format!(".{}", self.extension)))
            .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
        if week_shaped {
            return Err(SchedError::invalid(format!(
                "layout.index_name '{}' collides with week file names",
                self.index_name
            )));
        }

        Ok(())
    }
}
