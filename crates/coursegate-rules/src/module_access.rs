//! Per-learner module access inspection for curators.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::{AccessOverrides, AudienceContext, LearnerProfile, ModuleAudience};
use crate::eligibility::EligibilityFilter;
use crate::reason::{EligibilityReason, ModuleAccessReason};
use crate::schedule::{ModuleSchedule, ScheduleContext, ScheduleVerdict, TrackSettings};
use coursegate_common::ModuleId;

/// Everything needed to decide module access for one learner.
#[derive(Debug, Clone, Copy)]
pub struct ModuleAccessContext<'a> {
    pub module_id: ModuleId,
    pub audience: &'a ModuleAudience,
    pub schedule: &'a ModuleSchedule,
    pub track_settings: &'a TrackSettings,
    pub learner: &'a LearnerProfile,
    pub overrides: &'a AccessOverrides,
    pub track_definition_completed_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAccess {
    pub is_accessible: bool,
    pub reason: ModuleAccessReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ModuleAccess {
    fn granted(details: Option<String>) -> Self {
        Self {
            is_accessible: true,
            reason: ModuleAccessReason::Ok,
            unlock_date: None,
            details,
        }
    }

    fn denied(reason: ModuleAccessReason, details: impl Into<String>) -> Self {
        Self {
            is_accessible: false,
            reason,
            unlock_date: None,
            details: Some(details.into()),
        }
    }
}

/// Forced modules open first, then the audience filters, then the schedule.
pub fn check_module_access(ctx: &ModuleAccessContext<'_>) -> ModuleAccess {
    if ctx.overrides.forced_module_ids.contains(&ctx.module_id) {
        return ModuleAccess::granted(Some("Opened manually".to_string()));
    }

    let audience_ctx = AudienceContext {
        module_id: ctx.module_id,
        lesson_id: None,
        audience: ctx.audience,
        learner: ctx.learner,
        overrides: ctx.overrides,
    };
    let eligibility = EligibilityFilter::is_eligible(&audience_ctx);
    if let Some(reason) = eligibility.reason {
        let details = match reason {
            EligibilityReason::RestrictedManually => "Module restricted by an administrator",
            EligibilityReason::TariffMismatch => "Tariff does not include this module",
            EligibilityReason::TrackMismatch => "Module is not part of the learner's track",
            EligibilityReason::GroupMismatch => "Learner is not in an allowed group",
        };
        return ModuleAccess::denied(reason.into(), details);
    }

    let schedule = ctx
        .schedule
        .for_track(ctx.track_settings, ctx.learner.track.as_deref());
    let verdict = schedule.evaluate(&ScheduleContext {
        now: ctx.now,
        learner: ctx.learner,
        audience: ctx.audience,
        track_definition_completed_at: ctx.track_definition_completed_at,
    });

    match verdict {
        ScheduleVerdict::Open => ModuleAccess::granted(None),
        ScheduleVerdict::NoEligibleGroup => ModuleAccess::denied(
            ModuleAccessReason::GroupMismatch,
            "No eligible group for a group-start schedule",
        ),
        ScheduleVerdict::Locked {
            unlock_date,
            details,
        } => ModuleAccess {
            is_accessible: false,
            reason: ModuleAccessReason::TimeLocked,
            unlock_date,
            details: details.or_else(|| Some("Module opens later".to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{OpenAfterEvent, RelativeOpening, TrackScheduleOverride};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    struct Fixture {
        module_id: Uuid,
        audience: ModuleAudience,
        schedule: ModuleSchedule,
        track_settings: TrackSettings,
        learner: LearnerProfile,
        overrides: AccessOverrides,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                module_id: Uuid::new_v4(),
                audience: ModuleAudience::unrestricted(),
                schedule: ModuleSchedule::default(),
                track_settings: TrackSettings::new(),
                learner: LearnerProfile::new(Uuid::new_v4()),
                overrides: AccessOverrides::default(),
            }
        }

        fn check(&self, now: DateTime<Utc>) -> ModuleAccess {
            check_module_access(&ModuleAccessContext {
                module_id: self.module_id,
                audience: &self.audience,
                schedule: &self.schedule,
                track_settings: &self.track_settings,
                learner: &self.learner,
                overrides: &self.overrides,
                track_definition_completed_at: None,
                now,
            })
        }
    }

    #[test]
    fn test_unrestricted_module_is_ok() {
        let access = Fixture::new().check(utc(2024, 1, 1));
        assert!(access.is_accessible);
        assert_eq!(access.reason, ModuleAccessReason::Ok);
    }

    #[test]
    fn test_audience_failure_reports_first_reason() {
        let mut f = Fixture::new();
        f.audience = ModuleAudience::unrestricted()
            .with_tariffs(["pro"])
            .with_tracks(["backend"]);
        f.learner = f.learner.clone().with_tariff("basic");

        let access = f.check(utc(2024, 1, 1));
        assert!(!access.is_accessible);
        assert_eq!(access.reason, ModuleAccessReason::TariffMismatch);
        assert!(access.details.is_some());
    }

    #[test]
    fn test_time_locked_reports_unlock_date() {
        let mut f = Fixture::new();
        f.schedule.open_at = Some(utc(2024, 2, 1));

        let access = f.check(utc(2024, 1, 15));
        assert_eq!(access.reason, ModuleAccessReason::TimeLocked);
        assert_eq!(access.unlock_date, Some(utc(2024, 2, 1)));

        assert!(f.check(utc(2024, 2, 1)).is_accessible);
    }

    #[test]
    fn test_track_override_applies_to_learner_track() {
        let mut f = Fixture::new();
        f.schedule.open_at = Some(utc(2024, 6, 1));
        f.track_settings.insert(
            "fast".to_string(),
            TrackScheduleOverride {
                open_at: Some(utc(2024, 3, 1)),
                ..TrackScheduleOverride::default()
            },
        );

        assert_eq!(f.check(utc(2024, 4, 1)).reason, ModuleAccessReason::TimeLocked);

        f.learner = f.learner.clone().with_track("fast");
        assert!(f.check(utc(2024, 4, 1)).is_accessible);
    }

    #[test]
    fn test_group_start_without_group_is_group_mismatch() {
        let mut f = Fixture::new();
        f.schedule.open_after = Some(RelativeOpening {
            event: OpenAfterEvent::GroupStartDate,
            amount: None,
            unit: None,
        });

        let access = f.check(utc(2024, 1, 1));
        assert_eq!(access.reason, ModuleAccessReason::GroupMismatch);
    }

    #[test]
    fn test_forced_module_bypasses_filters_and_schedule() {
        let mut f = Fixture::new();
        f.audience = ModuleAudience::unrestricted().with_tariffs(["pro"]);
        f.schedule.open_at = Some(utc(2030, 1, 1));
        f.overrides.restricted_module_ids.insert(f.module_id);
        f.overrides.forced_module_ids.insert(f.module_id);

        let access = f.check(utc(2024, 1, 1));
        assert!(access.is_accessible);
        assert_eq!(access.reason, ModuleAccessReason::Ok);
    }
}
