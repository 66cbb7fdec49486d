//! Turns the assignments on a Canvas account into a calendar.
//!
//! Courses are fetched, each course's assignments are normalised and filtered into [`Assignment`]s,
//! and the result is ordered by due date. From there it can be written out as an iCalendar document
//! ([`calendar`]), a JSON list ([`json`]), or a week-by-week schedule ([`weekly`]).
pub mod aggregate;
mod assignment;
pub mod calendar;
pub mod json;
pub mod normalize;
pub mod weekly;

pub use aggregate::{collect, collect_from, Collection, Skip, Source};
pub use assignment::{Assignment, AssignmentWindow};
pub use normalize::{normalize, SkipReason};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] canvas_client::Error),

    /// Everything was fetched fine, there just wasn't anything due.
    #[error("no assignments found")]
    NoAssignmentsFound,

    #[error("io error: {}", .0)]
    Io(#[from] std::io::Error),

    #[error("serde error: {}", .0)]
    Json(#[from] serde_json::Error),
}
