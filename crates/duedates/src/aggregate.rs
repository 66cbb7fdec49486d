//! Collecting assignments across every course.
use canvas_client::{assignment::RawAssignment, course::Course, Client, Credential, Id};
use log::{debug, info, trace, warn};

use crate::{normalize, Assignment, AssignmentWindow, Error, Result, SkipReason};

/// Somewhere courses and their assignments can be fetched from
pub trait Source {
    fn courses(&self) -> canvas_client::Result<Vec<Course>>;
    fn assignments(&self, course: &Id) -> canvas_client::Result<Vec<RawAssignment>>;
}

impl Source for Client {
    fn courses(&self) -> canvas_client::Result<Vec<Course>> {
        Client::courses(self)
    }

    fn assignments(&self, course: &Id) -> canvas_client::Result<Vec<RawAssignment>> {
        self.course_assignments(course)
    }
}

/// A record of something that was left out, and why
#[derive(Debug)]
pub struct Skip {
    pub course: String,
    /// `None` if the whole course was skipped
    pub assignment: Option<String>,
    pub reason: SkipReason,
}

/// The result of a collection run
#[derive(Debug, Default)]
pub struct Collection {
    /// Ordered by due date, earliest first
    pub assignments: Vec<Assignment>,
    pub skipped: Vec<Skip>,
}

impl Collection {
    /// Courses whose assignments couldn't be fetched
    pub fn failed_courses(&self) -> impl Iterator<Item = &Skip> {
        self.skipped.iter().filter(|s| {
            matches!(
                s.reason,
                SkipReason::CourseFetch(_) | SkipReason::MissingCourseId
            )
        })
    }

    /// The assignments, or [`Error::NoAssignmentsFound`] if there aren't any
    pub fn into_non_empty(self) -> Result<Vec<Assignment>> {
        if self.assignments.is_empty() {
            Err(Error::NoAssignmentsFound)
        } else {
            Ok(self.assignments)
        }
    }
}

/// Collect assignments from the Canvas instance the credentials are for.
pub fn collect(creds: Credential, window: &AssignmentWindow) -> Result<Collection> {
    let client = Client::new(creds)?;
    collect_from(&client, window)
}

/// Collect every assignment due within `window`, across all courses.
///
/// Only failing to list the courses is an error. A course whose assignments can't be fetched is
/// skipped, as is any assignment that doesn't normalise.
pub fn collect_from(source: &impl Source, window: &AssignmentWindow) -> Result<Collection> {
    let courses = source.courses()?;
    info!("found {} courses", courses.len());

    let mut collection = Collection::default();
    for course in &courses {
        let Some(id) = &course.id else {
            warn!("course {} has no id, skipping it", course.name());
            collection.skipped.push(Skip {
                course: course.name().to_string(),
                assignment: None,
                reason: SkipReason::MissingCourseId,
            });
            continue;
        };

        match source.assignments(id) {
            Ok(raw) => {
                let (assignments, skipped) = normalize_course(course, &raw, window);
                debug!(
                    "course {}: {} assignments, {} skipped",
                    course.name(),
                    assignments.len(),
                    skipped.len()
                );
                collection.assignments.extend(assignments);
                collection.skipped.extend(skipped);
            }
            Err(e) => {
                warn!(
                    "error fetching assignments for course {}: {}",
                    course.name(),
                    e
                );
                collection.skipped.push(Skip {
                    course: course.name().to_string(),
                    assignment: None,
                    reason: SkipReason::CourseFetch(e),
                });
            }
        }
    }

    collection.assignments.sort_by_key(|a| a.due_date);
    info!(
        "collected {} assignments due from {}",
        collection.assignments.len(),
        window.start()
    );

    Ok(collection)
}

fn normalize_course(
    course: &Course,
    raw: &[RawAssignment],
    window: &AssignmentWindow,
) -> (Vec<Assignment>, Vec<Skip>) {
    let mut assignments = vec![];
    let mut skipped = vec![];
    for r in raw {
        match normalize(r, course.name(), window) {
            Ok(a) => assignments.push(a),
            Err(reason) => {
                if reason.is_expected() {
                    trace!("skipping {:?} in {}: {}", r.name, course.name(), reason);
                } else {
                    warn!("skipping {:?} in {}: {}", r.name, course.name(), reason);
                }
                skipped.push(Skip {
                    course: course.name().to_string(),
                    assignment: r.name.clone(),
                    reason,
                });
            }
        }
    }

    (assignments, skipped)
}
