//! Enrollment repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Enrollment};

/// Repository for enrollment lookups
pub struct EnrollmentRepository;

impl EnrollmentRepository {
    /// Find the enrollment of a user in a course
    pub async fn find(pool: &PgPool, user_id: &Uuid, course_id: &Uuid) -> AppResult<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"SELECT * FROM enrollments WHERE user_id = $1 AND course_id = $2"#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

        Ok(enrollment)
    }
}
