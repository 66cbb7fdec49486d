//! Turning raw Canvas records into [`Assignment`]s.
use canvas_client::assignment::RawAssignment;
use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

use crate::{Assignment, AssignmentWindow};

/// Why a record didn't make it into the output
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("no due date")]
    NoDueDate,

    #[error("couldn't parse due date {:?}", .0)]
    MalformedDueDate(String),

    #[error("due {} is before the window starts", .0)]
    BeforeWindow(DateTime<Utc>),

    #[error("assignment has no name")]
    MissingTitle,

    #[error("course has no id")]
    MissingCourseId,

    #[error("couldn't fetch the course's assignments: {}", .0)]
    CourseFetch(#[source] canvas_client::Error),
}

impl SkipReason {
    /// Whether this is just a record we don't want, rather than something going wrong
    pub fn is_expected(&self) -> bool {
        matches!(self, SkipReason::NoDueDate | SkipReason::BeforeWindow(_))
    }
}

/// Normalise one raw assignment from the course called `course_name`.
pub fn normalize(
    raw: &RawAssignment,
    course_name: &str,
    window: &AssignmentWindow,
) -> Result<Assignment, SkipReason> {
    let due_at = raw
        .due_at
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(SkipReason::NoDueDate)?;

    let due_date = parse_due_date(due_at)?;
    if !window.contains(&due_date) {
        return Err(SkipReason::BeforeWindow(due_date));
    }

    let title = raw
        .name
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .ok_or(SkipReason::MissingTitle)?;

    Ok(Assignment {
        course: course_name.to_string(),
        title: title.to_string(),
        due_date,
        description: raw.description.clone().unwrap_or_default(),
        points_possible: raw.points_possible.unwrap_or(0.0),
        id: raw.id.clone(),
        url: raw.html_url.clone(),
    })
}

/// Parse a Canvas timestamp (`2025-04-10T23:59:00Z`, or with an offset) into UTC, dropping any
/// fractional seconds.
pub fn parse_due_date(s: &str) -> Result<DateTime<Utc>, SkipReason> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc).trunc_subsecs(0))
        .map_err(|_| SkipReason::MalformedDueDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn window() -> AssignmentWindow {
        AssignmentWindow::starting(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap())
    }

    fn raw(name: &str, due_at: Option<&str>) -> RawAssignment {
        RawAssignment {
            name: Some(name.to_string()),
            due_at: due_at.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let a = normalize(&raw("HW1", Some("2025-04-10T23:59:00Z")), "CS101", &window()).unwrap();

        assert_eq!(a.course, "CS101");
        assert_eq!(a.title, "HW1");
        assert_eq!(a.due_date, Utc.with_ymd_and_hms(2025, 4, 10, 23, 59, 0).unwrap());
        assert_eq!(a.description, "");
        assert_eq!(a.points_possible, 0.0);
        assert_eq!(a.id, None);
    }

    #[test]
    fn test_keeps_fields() {
        let r = RawAssignment {
            id: Some("7".into()),
            description: Some("<p>Essay</p>".to_string()),
            points_possible: Some(25.0),
            html_url: Some("https://canvas.example.edu/courses/1/assignments/7".to_string()),
            ..raw("Essay", Some("2025-05-01T12:00:00Z"))
        };
        let a = normalize(&r, "ENG200", &window()).unwrap();

        assert_eq!(a.description, "<p>Essay</p>");
        assert_eq!(a.points_possible, 25.0);
        assert_eq!(a.id, Some("7".into()));
        assert_eq!(
            a.url.as_deref(),
            Some("https://canvas.example.edu/courses/1/assignments/7")
        );
    }

    #[test]
    fn test_no_due_date() {
        assert!(matches!(
            normalize(&raw("Reading", None), "CS101", &window()),
            Err(SkipReason::NoDueDate)
        ));
        assert!(matches!(
            normalize(&raw("Reading", Some("")), "CS101", &window()),
            Err(SkipReason::NoDueDate)
        ));
    }

    #[test]
    fn test_malformed_due_date() {
        match normalize(&raw("HW", Some("next tuesday")), "CS101", &window()) {
            Err(SkipReason::MalformedDueDate(s)) => assert_eq!(s, "next tuesday"),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn test_before_window() {
        assert!(matches!(
            normalize(&raw("Old", Some("2025-03-31T23:59:59Z")), "CS101", &window()),
            Err(SkipReason::BeforeWindow(_))
        ));
    }

    #[test]
    fn test_window_is_inclusive() {
        let a = normalize(&raw("Edge", Some("2025-04-01T00:00:00Z")), "CS101", &window()).unwrap();

        assert_eq!(a.due_date, window().start());
    }

    #[test]
    fn test_offsets_become_utc() {
        let a = normalize(&raw("HW", Some("2025-04-02T01:30:00+02:00")), "CS101", &window())
            .unwrap();

        assert_eq!(a.due_date, Utc.with_ymd_and_hms(2025, 4, 1, 23, 30, 0).unwrap());
    }

    #[test]
    fn test_subseconds_are_dropped() {
        let a = normalize(&raw("HW", Some("2025-04-02T10:00:00.750Z")), "CS101", &window())
            .unwrap();

        assert_eq!(a.due_date, Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_missing_title() {
        let r = RawAssignment {
            name: None,
            due_at: Some("2025-04-10T23:59:00Z".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            normalize(&r, "CS101", &window()),
            Err(SkipReason::MissingTitle)
        ));
    }

    #[test]
    fn test_expected_reasons() {
        assert!(SkipReason::NoDueDate.is_expected());
        assert!(!SkipReason::MalformedDueDate("x".to_string()).is_expected());
    }
}
