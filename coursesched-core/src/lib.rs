//! Core types for coursesched.
//!
//! This crate turns a course's start date, length and meeting days into a set
//! of boilerplate schedule files:
//! - `schedule` enumerates weeks and their meeting dates
//! - `template` and `layout` decide what each file contains and is called
//! - `generator` renders and writes the files
//! - `config` reads the TOML config file

pub mod config;
pub mod dates;
pub mod error;
pub mod generator;
pub mod layout;
pub mod schedule;
pub mod template;
pub mod weekday;

pub use error::{SchedError, SchedResult};
pub use generator::{FileKind, GeneratedFile, Generator};
pub use schedule::{CourseSchedule, ScheduleSpan, WeekAlignment, WeekEntry};
pub use weekday::MeetingDays;
