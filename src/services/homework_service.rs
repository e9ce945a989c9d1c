//! Homework submission eligibility

use chrono::{DateTime, Utc};
use coursegate_common::{LessonId, UserId};
use coursegate_rules::deadline::{DeadlineTracker, SubmissionEligibility};
use coursegate_rules::drip::RuleEvaluator;

use crate::{error::AppResult, services::AvailabilityService, store::Store};

/// Homework service
pub struct HomeworkService;

impl HomeworkService {
    pub async fn can_submit_homework(
        store: &dyn Store,
        evaluator: &RuleEvaluator,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> AppResult<SubmissionEligibility> {
        Self::can_submit_homework_at(store, evaluator, user_id, lesson_id, Utc::now()).await
    }

    pub async fn can_submit_homework_at(
        store: &dyn Store,
        evaluator: &RuleEvaluator,
        user_id: &UserId,
        lesson_id: &LessonId,
        now: DateTime<Utc>,
    ) -> AppResult<SubmissionEligibility> {
        let availability =
            AvailabilityService::check_lesson_availability_at(store, evaluator, user_id, lesson_id, now).await?;

        Ok(DeadlineTracker::can_submit_homework(&availability))
    }
}
