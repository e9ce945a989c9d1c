//! Read access to curriculum and learner state.
//!
//! Services depend on these traits rather than on the pool so that the same
//! logic runs against PostgreSQL and the in-memory store used in tests.

pub mod postgres;

use async_trait::async_trait;
use coursegate_common::{CourseId, LessonId, ModuleId, UserId};

use crate::{
    error::AppResult,
    models::{Course, Enrollment, HomeworkSubmission, Learner, Lesson, LessonProgress, Module},
};

pub use postgres::PgStore;

#[async_trait]
pub trait CurriculumStore: Send + Sync {
    async fn course(&self, id: &CourseId) -> AppResult<Option<Course>>;

    async fn module(&self, id: &ModuleId) -> AppResult<Option<Module>>;

    async fn course_modules(&self, course_id: &CourseId) -> AppResult<Vec<Module>>;

    async fn lesson(&self, id: &LessonId) -> AppResult<Option<Lesson>>;

    async fn module_lessons(&self, module_id: &ModuleId) -> AppResult<Vec<Lesson>>;

    async fn course_lessons(&self, course_id: &CourseId) -> AppResult<Vec<Lesson>>;

    /// Re-parent a module. `check` sees the course's modules as they are at
    /// write time, and no other move in the course runs between the check
    /// and the write.
    async fn move_module(
        &self,
        id: &ModuleId,
        parent_id: Option<&ModuleId>,
        check: &MoveCheck<'_>,
    ) -> AppResult<Module>;
}

/// Validation run against a course's modules before a move is written.
pub type MoveCheck<'a> = dyn Fn(&[Module]) -> AppResult<()> + Send + Sync + 'a;

#[async_trait]
pub trait LearnerStore: Send + Sync {
    async fn enrollment(&self, user_id: &UserId, course_id: &CourseId) -> AppResult<Option<Enrollment>>;

    async fn learner(&self, user_id: &UserId) -> AppResult<Option<Learner>>;

    async fn progress(&self, user_id: &UserId, lesson_id: &LessonId) -> AppResult<Option<LessonProgress>>;

    /// Most recent submission; older ones are ignored
    async fn latest_submission(
        &self,
        user_id: &UserId,
        lesson_id: &LessonId,
    ) -> AppResult<Option<HomeworkSubmission>>;
}

/// Both halves of the store.
pub trait Store: CurriculumStore + LearnerStore {}

impl<T: CurriculumStore + LearnerStore> Store for T {}
