//! Boilerplate templates for week and index files.
//!
//! Templates are plain strings with `{name}` placeholders. Every template has
//! a default that produces PreTeXt markup; any of them can be replaced from
//! the config file. Placeholders a template doesn't know about are left as-is.
//!
//! | Template  | Placeholders                                                 |
//! |-----------|--------------------------------------------------------------|
//! | `week`    | `{week_id}`, `{week_number}`, `{range_start}`, `{range_end}`, `{meetings}` |
//! | `meeting` | `{date}`, `{weekday}`, `{iso_date}`                          |
//! | `index`   | `{includes}`                                                 |
//! | `include` | `{file}`, `{week_id}`                                        |

use std::fmt::Write;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::error::{SchedError, SchedResult};
use crate::schedule::WeekEntry;

pub const DEFAULT_WEEK_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<subsection xml:id="week-{week_id}">
  <title>{range_start} <ndash/> {range_end}</title>
  <p>
    <dl>
{meetings}    </dl>
  </p>
</subsection>"#;

pub const DEFAULT_MEETING_TEMPLATE: &str = r#"      <li>
        <title>{date}</title>
        <p>
          Material
        </p>
      </li>
"#;

pub const DEFAULT_INDEX_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<section xml:id="schedule" xmlns:xi="http://www.w3.org/2001/XInclude">
  <title>Schedule</title>
{includes}
  <conclusion>
    <warning>
      <p>
        The instructor reserves the right to modify the schedule as needed.
      </p>
    </warning>
  </conclusion>
</section>"#;

pub const DEFAULT_INCLUDE_TEMPLATE: &str = "  <xi:include href=\"{file}\"/>\n";

/// "March 9"
pub const DEFAULT_RANGE_TITLE_FORMAT: &str = "%B %-d";
/// "March 09"
pub const DEFAULT_MEETING_TITLE_FORMAT: &str = "%B %d";

/// chrono strftime formats used when substituting dates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DateFormats {
    /// Week range in the week title.
    pub range_title: String,
    /// Each meeting's title.
    pub meeting_title: String,
}

impl DateFormats {
    /// Reject strftime strings chrono can't render for a plain date, so
    /// formatting never fails halfway through a run. Time and zone
    /// specifiers (`%H`, `%Z`, ...) parse fine but have nothing to fill them.
    pub fn validate(&self) -> SchedResult<()> {
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();

        for (name, fmt) in [
            ("range_title", &self.range_title),
            ("meeting_title", &self.meeting_title),
        ] {
            let unparsable = StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error));
            if unparsable || write!(&mut String::new(), "{}", sample.format(fmt)).is_err() {
                return Err(SchedError::invalid(format!(
                    "Invalid {} date format '{}'",
                    name, fmt
                )));
            }
        }
        Ok(())
    }
}

impl Default for DateFormats {
    fn default() -> Self {
        DateFormats {
            range_title: DEFAULT_RANGE_TITLE_FORMAT.to_string(),
            meeting_title: DEFAULT_MEETING_TITLE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Templates {
    pub week: String,
    pub meeting: String,
    pub index: String,
    pub include: String,
}

impl Default for Templates {
    fn default() -> Self {
        Templates {
            week: DEFAULT_WEEK_TEMPLATE.to_string(),
            meeting: DEFAULT_MEETING_TEMPLATE.to_string(),
            index: DEFAULT_INDEX_TEMPLATE.to_string(),
            include: DEFAULT_INCLUDE_TEMPLATE.to_string(),
        }
    }
}

impl Templates {
    pub fn render_week(&self, week: &WeekEntry, formats: &DateFormats) -> String {
        let meetings: String = week
            .meetings
            .iter()
            .map(|d| self.render_meeting(*d, formats))
            .collect();

        substitute(
            &self.week,
            &[
                ("week_id", week.id()),
                ("week_number", week.number.to_string()),
                ("range_start", week.first_day.format(&formats.range_title).to_string()),
                ("range_end", week.last_day.format(&formats.range_title).to_string()),
                ("meetings", meetings),
            ],
        )
    }

    fn render_meeting(&self, date: NaiveDate, formats: &DateFormats) -> String {
        substitute(
            &self.meeting,
            &[
                ("date", date.format(&formats.meeting_title).to_string()),
                ("weekday", date.format("%A").to_string()),
                ("iso_date", date.to_string()),
            ],
        )
    }

    /// Render the index given (week id, file name) pairs in week order.
    pub fn render_index<'a>(&self, files: impl IntoIterator<Item = (String, &'a str)>) -> String {
        let includes: String = files
            .into_iter()
            .map(|(week_id, file)| {
                substitute(
                    &self.include,
                    &[("file", file.to_string()), ("week_id", week_id)],
                )
            })
            .collect();

        substitute(&self.index, &[("includes", includes)])
    }
}

/// Replace `{key}` markers in one left-to-right pass, so substituted values
/// are never rescanned.
fn substitute(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (v, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week() -> WeekEntry {
        WeekEntry {
            number: 3,
            first_day: ymd(2026, 3, 9),
            last_day: ymd(2026, 3, 15),
            meetings: vec![ymd(2026, 3, 9), ymd(2026, 3, 11)],
        }
    }

    #[test]
    fn substitute_replaces_known_keys() {
        let out = substitute("a {x} b {y}", &[("x", "1".into()), ("y", "2".into())]);
        assert_eq!(out, "a 1 b 2");
    }

    #[test]
    fn substitute_keeps_unknown_and_unbalanced_braces() {
        let out = substitute("{x} {nope} {", &[("x", "1".into())]);
        assert_eq!(out, "1 {nope} {");
    }

    #[test]
    fn substitute_does_not_rescan_values() {
        let out = substitute("{a}", &[("a", "{b}".into()), ("b", "bad".into())]);
        assert_eq!(out, "{b}");
    }

    #[test]
    fn default_week_renders_pretext() {
        let out = Templates::default().render_week(&week(), &DateFormats::default());

        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n"));
        assert!(out.contains("<subsection xml:id=\"week-03\">"));
        assert!(out.contains("<title>March 9 <ndash/> March 15</title>"));
        assert!(out.contains("<title>March 09</title>"));
        assert!(out.contains("<title>March 11</title>"));
        assert_eq!(out.matches("<li>").count(), 2);
        assert!(out.ends_with("</subsection>"));
    }

    #[test]
    fn week_without_meetings_keeps_structure() {
        let mut empty = week();
        empty.meetings.clear();
        let out = Templates::default().render_week(&empty, &DateFormats::default());

        assert!(out.contains("    <dl>\n    </dl>"));
        assert!(!out.contains("<li>"));
    }

    #[test]
    fn custom_templates_and_formats() {
        let templates = Templates {
            week: "# Week {week_number}\n{meetings}".to_string(),
            meeting: "- {weekday} {iso_date}\n".to_string(),
            ..Templates::default()
        };
        let formats = DateFormats {
            range_title: "%d.%m.".to_string(),
            ..DateFormats::default()
        };

        let out = templates.render_week(&week(), &formats);
        assert_eq!(out, "# Week 3\n- Monday 2026-03-09\n- Wednesday 2026-03-11\n");
    }

    #[test]
    fn validates_date_formats() {
        assert!(DateFormats::default().validate().is_ok());

        let bad = DateFormats {
            meeting_title: "%B %Q".to_string(),
            ..DateFormats::default()
        };
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("meeting_title"));
    }

    #[test]
    fn rejects_time_and_zone_specifiers() {
        for fmt in ["%B %d %H:%M", "%B %d %Z", "%I %p"] {
            let formats = DateFormats {
                meeting_title: fmt.to_string(),
                ..DateFormats::default()
            };
            assert!(
                matches!(formats.validate(), Err(SchedError::InvalidConfiguration(_))),
                "{fmt} should be rejected"
            );
        }

        let formats = DateFormats {
            range_title: "%H".to_string(),
            ..DateFormats::default()
        };
        let err = formats.validate().unwrap_err();
        assert!(err.to_string().contains("range_title"));
    }

    #[test]
    fn index_lists_includes_in_order() {
        let out = Templates::default().render_index([
            ("01".to_string(), "week01.ptx"),
            ("02".to_string(), "week02.ptx"),
        ]);

        let first = out.find("<xi:include href=\"week01.ptx\"/>").unwrap();
        let second = out.find("<xi:include href=\"week02.ptx\"/>").unwrap();
        assert!(first < second);
        assert!(out.contains("<section xml:id=\"schedule\""));
        assert!(out.ends_with("</section>"));
    }
}
