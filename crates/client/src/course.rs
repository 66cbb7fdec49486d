use serde::Deserialize;

use crate::{Client, Id, Result};

pub const UNKNOWN_COURSE: &str = "Unknown Course";

#[derive(Clone, Debug, Deserialize)]
pub struct Course {
    /// Canvas has been seen to leave this out for restricted enrollments.
    pub id: Option<Id>,
    /// Missing for courses the user can no longer access (eg. concluded terms).
    pub name: Option<String>,
}

impl Course {
    /// The course's display name, or a placeholder if Canvas didn't give us one
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_COURSE)
    }
}

impl Client {
    /// Courses the current user is enrolled in
    pub fn courses(&self) -> Result<Vec<Course>> {
        self.list("courses")
    }
}
