//! The single verdict returned for a lesson.

use chrono::{DateTime, Utc};
use coursegate_common::LessonId;
use serde::Serialize;

use crate::drip::DripVerdict;
use crate::reason::{DripReason, LockReason};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonAvailability {
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<LockReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_lesson_id: Option<LessonId>,
    pub is_late: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_deadline: Option<DateTime<Utc>>,
}

impl LessonAvailability {
    pub fn available() -> Self {
        Self {
            is_available: true,
            reason: None,
            available_date: None,
            required_lesson_id: None,
            is_late: false,
            soft_deadline: None,
            hard_deadline: None,
        }
    }

    pub fn locked(reason: impl Into<LockReason>) -> Self {
        Self {
            is_available: false,
            reason: Some(reason.into()),
            ..Self::available()
        }
    }

    pub fn locked_until(reason: impl Into<LockReason>, date: Option<DateTime<Utc>>) -> Self {
        Self {
            available_date: date,
            ..Self::locked(reason)
        }
    }

    pub fn prerequisites_not_met(required_lesson_id: LessonId) -> Self {
        Self {
            required_lesson_id: Some(required_lesson_id),
            ..Self::locked(LockReason::PrerequisitesNotMet)
        }
    }

    /// Carry the deadline information of a drip verdict.
    pub fn with_deadlines(mut self, verdict: &DripVerdict) -> Self {
        self.is_late = verdict.is_late;
        self.soft_deadline = verdict.soft_deadline;
        self.hard_deadline = verdict.hard_deadline;
        self
    }
}

impl From<&DripVerdict> for LessonAvailability {
    fn from(verdict: &DripVerdict) -> Self {
        let base = match verdict.reason {
            None if verdict.available => Self::available(),
            reason => Self::locked_until(
                reason.unwrap_or(DripReason::DripLocked),
                verdict.available_at,
            ),
        };
        base.with_deadlines(verdict)
    }
}
