//! Audience eligibility filter.
//!
//! Each dimension (manual restriction, tariff, track, group) is its own
//! specification. When several fail at once, the reported reason is the first
//! failure in a fixed order, so the same input always yields the same reason.

use serde::Serialize;

use crate::context::AudienceContext;
use crate::operators::Spec;
use crate::reason::EligibilityReason;
use crate::specification::Specification;

/// The lesson is not listed in the enrollment's restricted lessons.
pub struct LessonNotRestricted;

impl Specification<AudienceContext<'_>> for LessonNotRestricted {
    fn is_satisfied_by(&self, ctx: &AudienceContext<'_>) -> bool {
        ctx.lesson_id
            .is_none_or(|lesson_id| !ctx.overrides.restricted_lesson_ids.contains(&lesson_id))
    }
}

/// The module is not listed in the enrollment's restricted modules.
pub struct ModuleNotRestricted;

impl Specification<AudienceContext<'_>> for ModuleNotRestricted {
    fn is_satisfied_by(&self, ctx: &AudienceContext<'_>) -> bool {
        !ctx.overrides.restricted_module_ids.contains(&ctx.module_id)
    }
}

/// An administrator opened the module for this enrollment.
pub struct ModuleForced;

impl Specification<AudienceContext<'_>> for ModuleForced {
    fn is_satisfied_by(&self, ctx: &AudienceContext<'_>) -> bool {
        ctx.overrides.forced_module_ids.contains(&ctx.module_id)
    }
}

/// The learner's tariff is allowed (or the module allows every tariff).
pub struct TariffAllowed;

impl Specification<AudienceContext<'_>> for TariffAllowed {
    fn is_satisfied_by(&self, ctx: &AudienceContext<'_>) -> bool {
        let allowed = &ctx.audience.allowed_tariffs;
        allowed.is_empty()
            || ctx
                .learner
                .tariff
                .as_ref()
                .is_some_and(|tariff| allowed.contains(tariff))
    }
}

/// The learner's track is allowed (or the module allows every track).
pub struct TrackAllowed;

impl Specification<AudienceContext<'_>> for TrackAllowed {
    fn is_satisfied_by(&self, ctx: &AudienceContext<'_>) -> bool {
        let allowed = &ctx.audience.allowed_tracks;
        allowed.is_empty()
            || ctx
                .learner
                .track
                .as_ref()
                .is_some_and(|track| allowed.contains(track))
    }
}

/// The learner belongs to at least one allowed group.
pub struct GroupAllowed;

impl Specification<AudienceContext<'_>> for GroupAllowed {
    fn is_satisfied_by(&self, ctx: &AudienceContext<'_>) -> bool {
        let allowed = &ctx.audience.allowed_group_ids;
        allowed.is_empty()
            || ctx
                .learner
                .memberships
                .iter()
                .any(|m| allowed.contains(&m.group_id))
    }
}

/// Result of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<EligibilityReason>,
}

impl Eligibility {
    pub fn eligible() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    pub fn denied(reason: EligibilityReason) -> Self {
        Self {
            eligible: false,
            reason: Some(reason),
        }
    }
}

/// Decides whether a learner belongs to a module's audience.
pub struct EligibilityFilter;

impl EligibilityFilter {
    /// Check the module (and optionally one of its lessons) for a learner.
    ///
    /// A restricted lesson stays closed even when its module is forced open or
    /// passes every filter.
    pub fn is_eligible(ctx: &AudienceContext<'_>) -> Eligibility {
        let module_filters =
            Spec(ModuleNotRestricted) & Spec(TariffAllowed) & Spec(TrackAllowed) & Spec(GroupAllowed);
        let admitted = Spec(LessonNotRestricted) & (Spec(ModuleForced) | module_filters);

        if admitted.is_satisfied_by(ctx) {
            return Eligibility::eligible();
        }

        Eligibility::denied(Self::first_failure(ctx).unwrap_or(EligibilityReason::RestrictedManually))
    }

    /// First failing dimension, in reporting order.
    fn first_failure(ctx: &AudienceContext<'_>) -> Option<EligibilityReason> {
        if !LessonNotRestricted.is_satisfied_by(ctx) {
            return Some(EligibilityReason::RestrictedManually);
        }

        let ordered: [(&dyn Specification<AudienceContext<'_>>, EligibilityReason); 4] = [
            (&ModuleNotRestricted, EligibilityReason::RestrictedManually),
            (&TariffAllowed, EligibilityReason::TariffMismatch),
            (&TrackAllowed, EligibilityReason::TrackMismatch),
            (&GroupAllowed, EligibilityReason::GroupMismatch),
        ];

        ordered
            .into_iter()
            .find(|(spec, _)| !spec.is_satisfied_by(ctx))
            .map(|(_, reason)| reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AccessOverrides, LearnerProfile, ModuleAudience};
    use uuid::Uuid;

    struct Fixture {
        module_id: Uuid,
        audience: ModuleAudience,
        learner: LearnerProfile,
        overrides: AccessOverrides,
    }

    impl Fixture {
        fn new(audience: ModuleAudience, learner: LearnerProfile) -> Self {
            Self {
                module_id: Uuid::new_v4(),
                audience,
                learner,
                overrides: AccessOverrides::default(),
            }
        }

        fn check(&self, lesson_id: Option<Uuid>) -> Eligibility {
            EligibilityFilter::is_eligible(&AudienceContext {
                module_id: self.module_id,
                lesson_id,
                audience: &self.audience,
                learner: &self.learner,
                overrides: &self.overrides,
            })
        }
    }

    fn learner() -> LearnerProfile {
        LearnerProfile::new(Uuid::new_v4())
    }

    #[test]
    fn test_unrestricted_module_admits_everyone() {
        let fixture = Fixture::new(ModuleAudience::unrestricted(), learner());
        assert_eq!(fixture.check(None), Eligibility::eligible());
    }

    #[test]
    fn test_tariff_mismatch() {
        let fixture = Fixture::new(
            ModuleAudience::unrestricted().with_tariffs(["VR", "LR"]),
            learner().with_tariff("SR"),
        );
        assert_eq!(
            fixture.check(None),
            Eligibility::denied(EligibilityReason::TariffMismatch)
        );
    }

    #[test]
    fn test_missing_tariff_fails_restricted_module() {
        let fixture = Fixture::new(ModuleAudience::unrestricted().with_tariffs(["VR"]), learner());
        assert_eq!(fixture.check(None).reason, Some(EligibilityReason::TariffMismatch));
    }

    #[test]
    fn test_tariff_reported_before_track() {
        let fixture = Fixture::new(
            ModuleAudience::unrestricted()
                .with_tariffs(["VR"])
                .with_tracks(["design"]),
            learner().with_tariff("SR").with_track("marketing"),
        );
        for _ in 0..10 {
            assert_eq!(fixture.check(None).reason, Some(EligibilityReason::TariffMismatch));
        }
    }

    #[test]
    fn test_group_membership_is_set_intersection() {
        let wanted = Uuid::new_v4();
        let audience = ModuleAudience::unrestricted().with_groups([wanted, Uuid::new_v4()]);

        let outsider = Fixture::new(audience.clone(), learner().with_group(Uuid::new_v4(), None));
        assert_eq!(outsider.check(None).reason, Some(EligibilityReason::GroupMismatch));

        let member = Fixture::new(
            audience,
            learner().with_group(Uuid::new_v4(), None).with_group(wanted, None),
        );
        assert!(member.check(None).eligible);
    }

    #[test]
    fn test_manual_restriction_comes_first() {
        let mut fixture = Fixture::new(
            ModuleAudience::unrestricted().with_tariffs(["VR"]),
            learner().with_tariff("SR"),
        );
        fixture.overrides.restricted_module_ids.insert(fixture.module_id);
        assert_eq!(
            fixture.check(None).reason,
            Some(EligibilityReason::RestrictedManually)
        );
    }

    #[test]
    fn test_restricted_lesson_overrides_module_eligibility() {
        let lesson_id = Uuid::new_v4();
        let mut fixture = Fixture::new(ModuleAudience::unrestricted(), learner());
        fixture.overrides.restricted_lesson_ids.insert(lesson_id);

        assert!(fixture.check(None).eligible);
        assert!(fixture.check(Some(Uuid::new_v4())).eligible);
        assert_eq!(
            fixture.check(Some(lesson_id)),
            Eligibility::denied(EligibilityReason::RestrictedManually)
        );
    }

    #[test]
    fn test_forced_module_bypasses_module_filters_only() {
        let lesson_id = Uuid::new_v4();
        let mut fixture = Fixture::new(
            ModuleAudience::unrestricted().with_tariffs(["VR"]),
            learner().with_tariff("SR"),
        );
        fixture.overrides.forced_module_ids.insert(fixture.module_id);
        fixture.overrides.restricted_module_ids.insert(fixture.module_id);

        assert!(fixture.check(None).eligible);

        fixture.overrides.restricted_lesson_ids.insert(lesson_id);
        assert_eq!(
            fixture.check(Some(lesson_id)).reason,
            Some(EligibilityReason::RestrictedManually)
        );
    }
}
