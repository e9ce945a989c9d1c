//! Stop-lesson gate resolution

use coursegate_common::{LessonId, UserId};
use coursegate_rules::curriculum::{last, preceding};
use coursegate_rules::reason::PrerequisiteReason;
use serde::Serialize;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::{Lesson, Module},
    store::Store,
};

/// Whether the gate in front of a lesson is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateStatus {
    pub satisfied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_lesson_id: Option<LessonId>,
}

impl GateStatus {
    fn open() -> Self {
        Self {
            satisfied: true,
            blocking_lesson_id: None,
        }
    }

    fn blocked_by(lesson_id: LessonId) -> Self {
        Self {
            satisfied: false,
            blocking_lesson_id: Some(lesson_id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteCheck {
    pub is_unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PrerequisiteReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_lesson_id: Option<LessonId>,
}

impl From<GateStatus> for PrerequisiteCheck {
    fn from(gate: GateStatus) -> Self {
        Self {
            is_unlocked: gate.satisfied,
            reason: gate
                .blocking_lesson_id
                .map(|_| PrerequisiteReason::PreviousHomeworkRequired),
            required_lesson_id: gate.blocking_lesson_id,
        }
    }
}

/// Prerequisite service
pub struct PrerequisiteService;

impl PrerequisiteService {
    /// The lesson a learner takes right before `lesson_id`
    pub async fn resolve_previous(store: &dyn Store, lesson_id: &LessonId) -> AppResult<Option<Lesson>> {
        let lesson = store
            .lesson(lesson_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lesson {lesson_id}")))?;

        Self::previous_of(store, &lesson).await
    }

    /// Previous lesson in the same module, else the last lesson of the
    /// previous sibling module. The walk never goes further back: an empty
    /// sibling module means there is no previous lesson.
    pub(crate) async fn previous_of(store: &dyn Store, lesson: &Lesson) -> AppResult<Option<Lesson>> {
        let lessons = store.module_lessons(&lesson.module_id).await?;
        if let Some(previous) = preceding(&lessons, lesson.order_index) {
            return Ok(Some(previous.clone()));
        }

        let module = store
            .module(&lesson.module_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Module {}", lesson.module_id)))?;

        let siblings: Vec<Module> = store
            .course_modules(&module.course_id)
            .await?
            .into_iter()
            .filter(|m| m.parent_id == module.parent_id && m.id != module.id)
            .collect();

        let Some(previous_module) = preceding(&siblings, module.order_index) else {
            return Ok(None);
        };

        let previous_lessons = store.module_lessons(&previous_module.id).await?;
        Ok(last(&previous_lessons).cloned())
    }

    pub async fn is_gate_satisfied(
        store: &dyn Store,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> AppResult<GateStatus> {
        let previous = Self::resolve_previous(store, lesson_id).await?;
        Self::gate_for(store, user_id, previous.as_ref()).await
    }

    /// Gate check once the previous lesson is known
    pub(crate) async fn gate_for(
        store: &dyn Store,
        user_id: &UserId,
        previous: Option<&Lesson>,
    ) -> AppResult<GateStatus> {
        let Some(previous) = previous.filter(|l| l.is_stop_lesson) else {
            return Ok(GateStatus::open());
        };

        let approved = store
            .latest_submission(user_id, &previous.id)
            .await?
            .is_some_and(|s| s.is_approved());

        if approved {
            Ok(GateStatus::open())
        } else {
            debug!(user_id = %user_id, stop_lesson_id = %previous.id, "Stop-lesson gate closed");
            Ok(GateStatus::blocked_by(previous.id))
        }
    }

    pub async fn check_prerequisites(
        store: &dyn Store,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> AppResult<PrerequisiteCheck> {
        Self::is_gate_satisfied(store, user_id, lesson_id)
            .await
            .map(PrerequisiteCheck::from)
    }
}
