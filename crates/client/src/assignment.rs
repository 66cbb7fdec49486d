use serde::Deserialize;

use crate::{Client, Id, Result};

/// An assignment, as Canvas returns it.
///
/// Nothing is parsed beyond what serde has to, so that one odd record can be dealt with on its own
/// instead of failing the whole listing.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawAssignment {
    pub id: Option<Id>,
    pub name: Option<String>,

    /// ISO-8601 due timestamp, eg. `2025-04-10T23:59:00Z`. Null when the assignment has no due date.
    pub due_at: Option<String>,

    /// The assignment body. This is Canvas rich content (HTML).
    pub description: Option<String>,

    pub points_possible: Option<f64>,

    /// Link to the assignment in the Canvas web UI
    pub html_url: Option<String>,
}

impl Client {
    /// Assignments belonging to the given course
    pub fn course_assignments(&self, course_id: &Id) -> Result<Vec<RawAssignment>> {
        self.list(&format!("courses/{}/assignments", course_id))
    }
}
