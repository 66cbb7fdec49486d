//! JSON view of assignments, with due dates as ISO-8601 strings.
use std::io::Write;

use crate::{Assignment, Result};

pub fn to_json(assignments: &[Assignment]) -> Result<String> {
    Ok(serde_json::to_string(assignments)?)
}

pub fn to_json_pretty(assignments: &[Assignment]) -> Result<String> {
    Ok(serde_json::to_string_pretty(assignments)?)
}

pub fn write_json<W: Write>(writer: W, assignments: &[Assignment]) -> Result<()> {
    Ok(serde_json::to_writer(writer, assignments)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_shape() {
        let assignments = vec![Assignment {
            course: "CS102".to_string(),
            title: "Quiz1".to_string(),
            due_date: Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap(),
            description: String::new(),
            points_possible: 5.0,
            id: Some("42".into()),
            url: None,
        }];

        let value: serde_json::Value = serde_json::from_str(&to_json(&assignments).unwrap()).unwrap();

        assert_eq!(
            value,
            json!([{
                "course": "CS102",
                "title": "Quiz1",
                "due_date": "2025-04-01T09:00:00Z",
                "description": "",
                "points_possible": 5.0,
                "id": "42"
            }])
        );
    }

    #[test]
    fn test_reads_back() {
        let assignments = vec![Assignment {
            course: "CS101".to_string(),
            title: "HW1".to_string(),
            due_date: Utc.with_ymd_and_hms(2025, 4, 10, 23, 59, 0).unwrap(),
            description: "<p>hi</p>".to_string(),
            points_possible: 0.0,
            id: None,
            url: Some("https://canvas.example.edu/courses/1/assignments/2".to_string()),
        }];

        let mut out = vec![];
        write_json(&mut out, &assignments).unwrap();
        let back: Vec<Assignment> = serde_json::from_slice(&out).unwrap();

        assert_eq!(back, assignments);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error() {
        let assignments = vec![Assignment {
            course: "CS101".to_string(),
            title: "HW1".to_string(),
            due_date: Utc.with_ymd_and_hms(2025, 4, 10, 23, 59, 0).unwrap(),
            description: String::new(),
            points_possible: 0.0,
            id: None,
            url: None,
        }];

        let err = write_json(BrokenPipe, &assignments).unwrap_err();

        assert!(matches!(err, Error::Json(_)));
    }
}
