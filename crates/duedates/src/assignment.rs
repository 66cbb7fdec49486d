use canvas_client::Id;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// An assignment with a due date, ready to be put on a calendar
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Name of the course it belongs to
    pub course: String,
    pub title: String,
    /// Always UTC, to the second
    pub due_date: DateTime<Utc>,
    /// Canvas rich content (HTML). Empty if there isn't one.
    pub description: String,
    pub points_possible: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The earliest due date we care about. Anything due before this is left out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssignmentWindow {
    start: DateTime<Utc>,
}

impl AssignmentWindow {
    /// 2025-04-01T00:00:00Z, the start of the Spring 2025 term
    pub const DEFAULT_START_TIMESTAMP: i64 = 1_743_465_600;

    pub fn starting(start: DateTime<Utc>) -> Self {
        Self { start }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn contains(&self, due: &DateTime<Utc>) -> bool {
        *due >= self.start
    }
}

impl Default for AssignmentWindow {
    fn default() -> Self {
        Self::starting(
            DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(Self::DEFAULT_START_TIMESTAMP),
        )
    }
}
