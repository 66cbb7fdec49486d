//! iCalendar output.
//!
//! Each assignment becomes one `VEVENT`, in the order given. Canvas only has a due time, so events
//! are given a nominal duration ([`CalendarOptions::event_duration`], an hour by default).
use std::{fmt, fs, path::Path};

use chrono::TimeDelta;
use icalendar::{Calendar, Component, Event, EventLike};
use log::{info, warn};
use thiserror::Error;

use crate::{Assignment, Result};

pub const DEFAULT_FILENAME: &str = "canvas_calendar.ics";
pub const DEFAULT_PRODID: &str = "-//Canvas Calendar//canvas-calendar//EN";

#[derive(Clone, Debug)]
pub struct CalendarOptions {
    pub product_id: String,
    pub event_duration: TimeDelta,
    /// Domain part of generated UIDs
    pub uid_domain: String,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            product_id: DEFAULT_PRODID.to_string(),
            event_duration: TimeDelta::hours(1),
            uid_domain: "canvas-calendar".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EventError {
    #[error("event end is out of range")]
    EndOutOfRange,
}

/// A generated calendar
#[derive(Debug)]
pub struct CalendarDocument {
    calendar: Calendar,
    product_id: String,
    events: usize,
    skipped: usize,
}

impl CalendarDocument {
    /// Number of events in the calendar
    pub fn events(&self) -> usize {
        self.events
    }

    /// Number of assignments that couldn't be made into events
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Write the calendar to `path`, replacing whatever is there.
    ///
    /// Nothing stops two runs writing the same path at once; callers need to serialise that.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes())?;
        info!("calendar saved as {}", path.display());

        Ok(())
    }
}

impl fmt::Display for CalendarDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&stamp_header(&self.calendar.to_string(), &self.product_id))
    }
}

/// Build a calendar with the default options
pub fn write(assignments: &[Assignment]) -> CalendarDocument {
    write_with(assignments, &CalendarOptions::default())
}

/// Build a calendar with one event per assignment.
///
/// An assignment that can't be turned into an event is logged and left out.
pub fn write_with(assignments: &[Assignment], options: &CalendarOptions) -> CalendarDocument {
    let mut calendar = Calendar::new();
    let mut skipped = 0;
    for a in assignments {
        match build_event(a, options) {
            Ok(event) => {
                calendar.push(event);
            }
            Err(e) => {
                warn!("error creating calendar event for {}: {}", a.title, e);
                skipped += 1;
            }
        }
    }

    CalendarDocument {
        calendar: calendar.done(),
        product_id: options.product_id.clone(),
        events: assignments.len() - skipped,
        skipped,
    }
}

fn build_event(a: &Assignment, options: &CalendarOptions) -> Result<Event, EventError> {
    let end = a
        .due_date
        .checked_add_signed(options.event_duration)
        .ok_or(EventError::EndOutOfRange)?;

    let mut event = Event::new();
    event
        .summary(&format!("{}: {}", a.course, a.title))
        .starts(a.due_date)
        .ends(end)
        .description(&event_description(a));

    // Stable UIDs let calendar apps update events in place when the feed is re-imported
    if let Some(id) = &a.id {
        event.uid(&format!("canvas-assignment-{}@{}", id, options.uid_domain));
    }
    if let Some(url) = &a.url {
        event.add_property("URL", url);
    }

    Ok(event.done())
}

/// The text put in each event's `DESCRIPTION`
pub fn event_description(a: &Assignment) -> String {
    let mut description = format!(
        "Course: {}\nAssignment: {}\nPoints Possible: {}",
        a.course, a.title, a.points_possible
    );

    let text = richtext::render(&a.description);
    if !text.is_empty() {
        description.push_str("\n\nDescription: ");
        description.push_str(&text);
    }

    description
}

/// Replace the header `icalendar` writes with our own `VERSION` and `PRODID`.
fn stamp_header(ics: &str, product_id: &str) -> String {
    let mut out = String::with_capacity(ics.len());
    for line in ics.lines() {
        if line.starts_with("VERSION:") || line.starts_with("PRODID:") {
            continue;
        }

        out.push_str(line);
        out.push_str("\r\n");

        if line == "BEGIN:VCALENDAR" {
            out.push_str("VERSION:2.0\r\n");
            out.push_str("PRODID:");
            out.push_str(product_id);
            out.push_str("\r\n");
        }
    }

    out
}
