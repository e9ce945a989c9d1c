//! Lesson progress repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::LessonProgress};

/// Repository for lesson progress reads
pub struct ProgressRepository;

impl ProgressRepository {
    pub async fn find(pool: &PgPool, user_id: &Uuid, lesson_id: &Uuid) -> AppResult<Option<LessonProgress>> {
        let progress = sqlx::query_as::<_, LessonProgress>(
            r#"
            SELECT user_id, lesson_id, status, completed_at
            FROM lesson_progress
            WHERE user_id = $1 AND lesson_id = $2
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_optional(pool)
        .await?;

        Ok(progress)
    }
}
