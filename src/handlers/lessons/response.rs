//! Lesson response DTOs
//!
//! The engine's verdict types serialize directly into the wire format.

pub use coursegate_rules::availability::LessonAvailability as AvailabilityResponse;
pub use coursegate_rules::deadline::SubmissionEligibility as HomeworkEligibilityResponse;

pub use crate::services::prerequisite_service::PrerequisiteCheck as PrerequisitesResponse;
