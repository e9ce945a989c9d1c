//! Lesson availability orchestration
//!
//! Checks run in a fixed order and the first failure is the answer:
//! enrollment, audience, module schedule, drip rule, stop-lesson gate.

use chrono::{DateTime, Utc};
use coursegate_common::{LessonId, UserId};
use coursegate_rules::availability::LessonAvailability;
use coursegate_rules::context::{AudienceContext, ModuleAudience};
use coursegate_rules::drip::{DripContext, RuleEvaluator};
use coursegate_rules::eligibility::EligibilityFilter;
use coursegate_rules::reason::LockReason;
use coursegate_rules::schedule::{ScheduleContext, ScheduleVerdict, TrackSettings};
use tracing::{debug, error};

use crate::{
    error::{AppError, AppResult},
    models::{Learner, Lesson, Module},
    services::PrerequisiteService,
    store::Store,
};

/// Availability service
pub struct AvailabilityService;

impl AvailabilityService {
    /// Availability of a lesson right now
    pub async fn check_lesson_availability(
        store: &dyn Store,
        evaluator: &RuleEvaluator,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> AppResult<LessonAvailability> {
        Self::check_lesson_availability_at(store, evaluator, user_id, lesson_id, Utc::now()).await
    }

    /// Availability of a lesson at `now`; the same inputs always give the same verdict
    pub async fn check_lesson_availability_at(
        store: &dyn Store,
        evaluator: &RuleEvaluator,
        user_id: &UserId,
        lesson_id: &LessonId,
        now: DateTime<Utc>,
    ) -> AppResult<LessonAvailability> {
        let lesson = store
            .lesson(lesson_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson {lesson_id}")))?;
        let module = store
            .module(&lesson.module_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Module {}", lesson.module_id)))?;
        store
            .course(&module.course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course {}", module.course_id)))?;

        let availability = Self::evaluate(store, evaluator, user_id, &lesson, &module, now).await?;

        if let Some(reason) = availability.reason {
            debug!(
                user_id = %user_id,
                lesson_id = %lesson_id,
                reason = %reason,
                "Lesson locked"
            );
        }

        Ok(availability)
    }

    async fn evaluate(
        store: &dyn Store,
        evaluator: &RuleEvaluator,
        user_id: &UserId,
        lesson: &Lesson,
        module: &Module,
        now: DateTime<Utc>,
    ) -> AppResult<LessonAvailability> {
        let Some(enrollment) = store.enrollment(user_id, &module.course_id).await? else {
            return Ok(LessonAvailability::locked(LockReason::NotEnrolled));
        };
        if !enrollment.is_active() {
            return Ok(LessonAvailability::locked(LockReason::EnrollmentNotActive));
        }
        if enrollment.is_expired_at(now) {
            return Ok(LessonAvailability::locked(LockReason::EnrollmentExpired));
        }

        let learner = store
            .learner(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Learner {user_id}")))?;

        let overrides = enrollment.overrides();
        let audience = module.audience();
        let eligibility = EligibilityFilter::is_eligible(&AudienceContext {
            module_id: module.id,
            lesson_id: Some(lesson.id),
            audience: &audience,
            learner: &learner.profile,
            overrides: &overrides,
        });
        if let Some(reason) = eligibility.reason {
            return Ok(LessonAvailability::locked(reason));
        }

        if !overrides.forced_module_ids.contains(&module.id) {
            match Self::module_schedule(module, &audience, &learner, now) {
                ScheduleVerdict::Open => {}
                ScheduleVerdict::Locked { unlock_date, .. } => {
                    return Ok(LessonAvailability::locked_until(LockReason::DripLocked, unlock_date));
                }
                ScheduleVerdict::NoEligibleGroup => {
                    return Ok(LessonAvailability::locked(LockReason::GroupMismatch));
                }
            }
        }

        let policy = match lesson.release_policy() {
            Ok(policy) => policy,
            Err(e) => {
                error!(lesson_id = %lesson.id, error = %e, "Stored drip rule could not be decoded");
                return Ok(LessonAvailability::locked(LockReason::DripLocked));
            }
        };

        let previous = PrerequisiteService::previous_of(store, lesson).await?;

        let previous_completed_at = match (&previous, policy.needs_previous_completion()) {
            (Some(previous), true) => store
                .progress(user_id, &previous.id)
                .await?
                .and_then(|p| p.completed_at()),
            _ => None,
        };

        let verdict = evaluator.evaluate(
            &policy,
            &DripContext {
                enrollment_start: enrollment.start_date,
                previous_completed_at,
                now,
            },
        );
        if !verdict.available {
            return Ok(LessonAvailability::from(&verdict));
        }

        let gate = PrerequisiteService::gate_for(store, user_id, previous.as_ref()).await?;
        if let Some(blocking) = gate.blocking_lesson_id {
            return Ok(LessonAvailability::prerequisites_not_met(blocking).with_deadlines(&verdict));
        }

        Ok(LessonAvailability::available().with_deadlines(&verdict))
    }

    /// Module-level schedule for this learner, with their track's override applied
    pub(crate) fn module_schedule(
        module: &Module,
        audience: &ModuleAudience,
        learner: &Learner,
        now: DateTime<Utc>,
    ) -> ScheduleVerdict {
        let settings = Self::track_settings(module);
        module
            .schedule()
            .for_track(&settings, learner.profile.track.as_deref())
            .evaluate(&ScheduleContext {
                now,
                learner: &learner.profile,
                audience,
                track_definition_completed_at: learner.track_definition_completed_at,
            })
    }

    /// Per-track overrides; unreadable settings fall back to the base schedule
    pub(crate) fn track_settings(module: &Module) -> TrackSettings {
        module.track_settings().unwrap_or_else(|e| {
            error!(module_id = %module.id, error = %e, "Track settings could not be decoded");
            TrackSettings::new()
        })
    }
}
