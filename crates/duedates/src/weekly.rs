//! Week-by-week view of assignments, for showing in a terminal.
use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Datelike, Days, NaiveTime, Utc};

use crate::Assignment;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Midnight on the Monday at or before `due`
pub fn week_start(due: DateTime<Utc>) -> DateTime<Utc> {
    let monday = due.date_naive() - Days::new(due.weekday().num_days_from_monday().into());
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Group assignments by the week they're due in, keyed by [`week_start`].
///
/// Each week's assignments are sorted by due date, whatever order they were given in.
pub fn group(assignments: &[Assignment]) -> BTreeMap<DateTime<Utc>, Vec<&Assignment>> {
    let mut weeks: BTreeMap<DateTime<Utc>, Vec<&Assignment>> = BTreeMap::new();
    for a in assignments {
        weeks.entry(week_start(a.due_date)).or_default().push(a);
    }

    for week in weeks.values_mut() {
        week.sort_by_key(|a| a.due_date);
    }

    weeks
}

/// A printable schedule of assignments, grouped by week
pub struct WeeklyReport<'a> {
    weeks: BTreeMap<DateTime<Utc>, Vec<&'a Assignment>>,
}

impl<'a> WeeklyReport<'a> {
    pub fn new(assignments: &'a [Assignment]) -> Self {
        Self {
            weeks: group(assignments),
        }
    }
}

impl fmt::Display for WeeklyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weeks.is_empty() {
            return writeln!(f, "No assignments found");
        }

        writeln!(f, "\nWeekly Assignment Schedule:")?;
        writeln!(f, "{}", "=".repeat(50))?;

        for (start, assignments) in &self.weeks {
            let end = *start + Days::new(6);
            writeln!(
                f,
                "\nWeek of {} - {}",
                start.format("%B %d"),
                end.format("%B %d")
            )?;
            writeln!(f, "{}", "-".repeat(50))?;

            for a in assignments {
                writeln!(f, "\nCourse: {}", a.course)?;
                writeln!(f, "Title: {}", a.title)?;
                writeln!(f, "Due: {}", a.due_date.format("%A, %B %d at %I:%M %p"))?;
                if a.points_possible != 0.0 {
                    writeln!(f, "Points: {}", a.points_possible)?;
                }
                let description = richtext::render_lines(&a.description).join(" ");
                if !description.is_empty() {
                    let preview: String = description
                        .chars()
                        .take(DESCRIPTION_PREVIEW_CHARS)
                        .collect();
                    writeln!(f, "Description: {}...", preview)?;
                }
                writeln!(f, "{}", "-".repeat(30))?;
            }
        }

        Ok(())
    }
}
