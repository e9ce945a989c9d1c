//! Closed reason codes reported with every negative decision.
//!
//! The string forms are consumed by the player UI and the curator tools.

use serde::{Deserialize, Serialize};

macro_rules! reason_strings {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Why a learner falls outside a module's audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityReason {
    RestrictedManually,
    TariffMismatch,
    TrackMismatch,
    GroupMismatch,
}

reason_strings!(EligibilityReason {
    RestrictedManually => "restricted_manually",
    TariffMismatch => "tariff_mismatch",
    TrackMismatch => "track_mismatch",
    GroupMismatch => "group_mismatch",
});

/// Why a drip rule keeps a lesson closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DripReason {
    DripLocked,
    HardDeadlinePassed,
}

reason_strings!(DripReason {
    DripLocked => "drip_locked",
    HardDeadlinePassed => "hard_deadline_passed",
});

/// Why a lesson is not available to a learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    NotEnrolled,
    EnrollmentNotActive,
    EnrollmentExpired,
    RestrictedManually,
    TariffMismatch,
    TrackMismatch,
    GroupMismatch,
    DripLocked,
    HardDeadlinePassed,
    PrerequisitesNotMet,
}

reason_strings!(LockReason {
    NotEnrolled => "not_enrolled",
    EnrollmentNotActive => "enrollment_not_active",
    EnrollmentExpired => "enrollment_expired",
    RestrictedManually => "restricted_manually",
    TariffMismatch => "tariff_mismatch",
    TrackMismatch => "track_mismatch",
    GroupMismatch => "group_mismatch",
    DripLocked => "drip_locked",
    HardDeadlinePassed => "hard_deadline_passed",
    PrerequisitesNotMet => "prerequisites_not_met",
});

impl From<EligibilityReason> for LockReason {
    fn from(reason: EligibilityReason) -> Self {
        match reason {
            EligibilityReason::RestrictedManually => Self::RestrictedManually,
            EligibilityReason::TariffMismatch => Self::TariffMismatch,
            EligibilityReason::TrackMismatch => Self::TrackMismatch,
            EligibilityReason::GroupMismatch => Self::GroupMismatch,
        }
    }
}

impl From<DripReason> for LockReason {
    fn from(reason: DripReason) -> Self {
        match reason {
            DripReason::DripLocked => Self::DripLocked,
            DripReason::HardDeadlinePassed => Self::HardDeadlinePassed,
        }
    }
}

/// Outcome reported by the module access inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleAccessReason {
    Ok,
    TariffMismatch,
    TrackMismatch,
    GroupMismatch,
    TimeLocked,
    RestrictedManually,
}

reason_strings!(ModuleAccessReason {
    Ok => "ok",
    TariffMismatch => "tariff_mismatch",
    TrackMismatch => "track_mismatch",
    GroupMismatch => "group_mismatch",
    TimeLocked => "time_locked",
    RestrictedManually => "restricted_manually",
});

impl From<EligibilityReason> for ModuleAccessReason {
    fn from(reason: EligibilityReason) -> Self {
        match reason {
            EligibilityReason::RestrictedManually => Self::RestrictedManually,
            EligibilityReason::TariffMismatch => Self::TariffMismatch,
            EligibilityReason::TrackMismatch => Self::TrackMismatch,
            EligibilityReason::GroupMismatch => Self::GroupMismatch,
        }
    }
}

/// Why homework cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitBlockReason {
    HardDeadlinePassed,
    LessonNotAvailable,
}

reason_strings!(SubmitBlockReason {
    HardDeadlinePassed => "hard_deadline_passed",
    LessonNotAvailable => "lesson_not_available",
});

/// Why the stop-lesson gate before a lesson is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerequisiteReason {
    PreviousHomeworkRequired,
}

reason_strings!(PrerequisiteReason {
    PreviousHomeworkRequired => "previous_homework_required",
});
