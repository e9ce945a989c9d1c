//! Homework submission deadlines.

use serde::Serialize;

use crate::availability::LessonAvailability;
use crate::drip::DripVerdict;
use crate::reason::{DripReason, LockReason, SubmitBlockReason};

/// What the deadline tracker needs to know about a lesson verdict.
pub trait ReleaseOutcome {
    fn is_available(&self) -> bool;
    fn hard_deadline_passed(&self) -> bool;
    fn is_late(&self) -> bool;
}

impl ReleaseOutcome for DripVerdict {
    fn is_available(&self) -> bool {
        self.available
    }

    fn hard_deadline_passed(&self) -> bool {
        self.reason == Some(DripReason::HardDeadlinePassed)
    }

    fn is_late(&self) -> bool {
        self.is_late
    }
}

impl ReleaseOutcome for LessonAvailability {
    fn is_available(&self) -> bool {
        self.is_available
    }

    fn hard_deadline_passed(&self) -> bool {
        self.reason == Some(LockReason::HardDeadlinePassed)
    }

    fn is_late(&self) -> bool {
        self.is_late
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEligibility {
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SubmitBlockReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_late: Option<bool>,
}

pub struct DeadlineTracker;

impl DeadlineTracker {
    pub fn can_submit_homework<O: ReleaseOutcome + ?Sized>(outcome: &O) -> SubmissionEligibility {
        if !outcome.is_available() {
            let reason = if outcome.hard_deadline_passed() {
                SubmitBlockReason::HardDeadlinePassed
            } else {
                SubmitBlockReason::LessonNotAvailable
            };
            return SubmissionEligibility {
                can_submit: false,
                reason: Some(reason),
                is_late: None,
            };
        }

        SubmissionEligibility {
            can_submit: true,
            reason: None,
            is_late: Some(outcome.is_late()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_deadline_blocks_with_its_reason() {
        let verdict = DripVerdict {
            available: false,
            reason: Some(DripReason::HardDeadlinePassed),
            ..DripVerdict::open()
        };
        let result = DeadlineTracker::can_submit_homework(&verdict);
        assert!(!result.can_submit);
        assert_eq!(result.reason, Some(SubmitBlockReason::HardDeadlinePassed));
    }

    #[test]
    fn test_other_locks_report_lesson_not_available() {
        let locked = LessonAvailability::locked(LockReason::NotEnrolled);
        let result = DeadlineTracker::can_submit_homework(&locked);
        assert_eq!(result.reason, Some(SubmitBlockReason::LessonNotAvailable));

        let drip = DripVerdict {
            available: false,
            reason: Some(DripReason::DripLocked),
            ..DripVerdict::open()
        };
        let result = DeadlineTracker::can_submit_homework(&drip);
        assert_eq!(result.reason, Some(SubmitBlockReason::LessonNotAvailable));
    }

    #[test]
    fn test_available_carries_lateness() {
        let late = LessonAvailability {
            is_late: true,
            ..LessonAvailability::available()
        };
        let result = DeadlineTracker::can_submit_homework(&late);
        assert!(result.can_submit);
        assert_eq!(result.is_late, Some(true));

        let on_time = DeadlineTracker::can_submit_homework(&DripVerdict::open());
        assert_eq!(on_time.is_late, Some(false));
    }
}
