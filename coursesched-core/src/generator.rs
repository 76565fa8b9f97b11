//! Rendering a schedule into files and writing them out.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{SchedError, SchedResult};
use crate::layout::OutputLayout;
use crate::schedule::{CourseSchedule, WeekEntry};
use crate::template::{DateFormats, Templates};

/// What a generated file is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Week(u32),
    Index,
}

/// A rendered output file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub kind: FileKind,
    /// File name relative to the output directory.
    pub name: String,
    pub contents: String,
}

/// Turns a schedule into week files plus an index file.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    pub templates: Templates,
    pub formats: DateFormats,
    pub layout: OutputLayout,
}

impl Generator {
    pub fn new(templates: Templates, formats: DateFormats, layout: OutputLayout) -> Self {
        Generator {
            templates,
            formats,
            layout,
        }
    }

    pub fn validate(&self) -> SchedResult<()> {
        self.formats.validate()?;
        self.layout.validate()
    }

    /// Render every file in write order: weeks first, index last.
    pub fn render(&self, schedule: &CourseSchedule) -> SchedResult<Vec<GeneratedFile>> {
        self.validate()?;

        let weeks = schedule.weeks();
        let mut files: Vec<GeneratedFile> = weeks.iter().map(|w| self.render_week(w)).collect();

        let index = self.templates.render_index(
            weeks
                .iter()
                .zip(&files)
                .map(|(week, file)| (week.id(), file.name.as_str())),
        );
        files.push(GeneratedFile {
            kind: FileKind::Index,
            name: self.layout.index_name.clone(),
            contents: index,
        });

        Ok(files)
    }

    fn render_week(&self, week: &WeekEntry) -> GeneratedFile {
        debug!(
            "week {} ({} .. {}): {} meeting(s)",
            week.number,
            week.first_day,
            week.last_day,
            week.meetings.len()
        );

        GeneratedFile {
            kind: FileKind::Week(week.number),
            name: self.layout.week_file_name(week),
            contents: self.templates.render_week(week, &self.formats),
        }
    }

    /// Render and write all files into `output_dir`, creating it if needed.
    /// Existing files are overwritten. `on_write` is called after each file
    /// lands on disk.
    ///
    /// Nothing is written if rendering fails. A failed write stops the run;
    /// files written before it are left in place.
    pub fn write(
        &self,
        schedule: &CourseSchedule,
        output_dir: &Path,
        mut on_write: impl FnMut(&Path),
    ) -> SchedResult<Vec<PathBuf>> {
        let files = self.render(schedule)?;

        std::fs::create_dir_all(output_dir).map_err(|e| SchedError::io(output_dir, e))?;

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            let path = output_dir.join(&file.name);
            std::fs::write(&path, &file.contents).map_err(|e| SchedError::io(&path, e))?;
            on_write(&path);
            written.push(path);
        }

        info!(
            "wrote {} files to {}",
            written.len(),
            output_dir.display()
        );

        Ok(written)
    }
}
