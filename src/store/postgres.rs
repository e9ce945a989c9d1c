//! PostgreSQL-backed store.

use async_trait::async_trait;
use coursegate_common::{CourseId, LessonId, ModuleId, UserId};
use sqlx::PgPool;

use crate::{
    db::repositories::{
        CurriculumRepository, EnrollmentRepository, HomeworkRepository, LearnerRepository,
        ProgressRepository,
    },
    error::AppResult,
    models::{Course, Enrollment, HomeworkSubmission, Learner, Lesson, LessonProgress, Module},
};

use super::{CurriculumStore, LearnerStore, MoveCheck};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CurriculumStore for PgStore {
    async fn course(&self, id: &CourseId) -> AppResult<Option<Course>> {
        CurriculumRepository::find_course(&self.pool, id).await
    }

    async fn module(&self, id: &ModuleId) -> AppResult<Option<Module>> {
        CurriculumRepository::find_module(&self.pool, id).await
    }

    async fn course_modules(&self, course_id: &CourseId) -> AppResult<Vec<Module>> {
        CurriculumRepository::list_modules(&self.pool, course_id).await
    }

    async fn lesson(&self, id: &LessonId) -> AppResult<Option<Lesson>> {
        CurriculumRepository::find_lesson(&self.pool, id).await
    }

    async fn module_lessons(&self, module_id: &ModuleId) -> AppResult<Vec<Lesson>> {
        CurriculumRepository::list_lessons(&self.pool, module_id).await
    }

    async fn course_lessons(&self, course_id: &CourseId) -> AppResult<Vec<Lesson>> {
        CurriculumRepository::list_course_lessons(&self.pool, course_id).await
    }

    async fn move_module(
        &self,
        id: &ModuleId,
        parent_id: Option<&ModuleId>,
        check: &MoveCheck<'_>,
    ) -> AppResult<Module> {
        CurriculumRepository::move_module(&self.pool, id, parent_id, check).await
    }
}

#[async_trait]
impl LearnerStore for PgStore {
    async fn enrollment(&self, user_id: &UserId, course_id: &CourseId) -> AppResult<Option<Enrollment>> {
        EnrollmentRepository::find(&self.pool, user_id, course_id).await
    }

    async fn learner(&self, user_id: &UserId) -> AppResult<Option<Learner>> {
        LearnerRepository::find(&self.pool, user_id).await
    }

    async fn progress(&self, user_id: &UserId, lesson_id: &LessonId) -> AppResult<Option<LessonProgress>> {
        ProgressRepository::find(&self.pool, user_id, lesson_id).await
    }

    async fn latest_submission(
        &self,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> AppResult<Option<HomeworkSubmission>> {
        HomeworkRepository::find_latest(&self.pool, user_id, lesson_id).await
    }
}
