//! Homework submission repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::HomeworkSubmission};

/// Repository for homework submissions
pub struct HomeworkRepository;

impl HomeworkRepository {
    /// Most recent submission of a user for a lesson
    pub async fn find_latest(
        pool: &PgPool,
        user_id: &Uuid,
        lesson_id: &Uuid,
    ) -> AppResult<Option<HomeworkSubmission>> {
        let submission = sqlx::query_as::<_, HomeworkSubmission>(
            r#"
            SELECT id, user_id, lesson_id, status, submitted_at, reviewed_at
            FROM homework_submissions
            WHERE user_id = $1 AND lesson_id = $2
            ORDER BY submitted_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_optional(pool)
        .await?;

        Ok(submission)
    }
}
