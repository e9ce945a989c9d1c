//! Learner repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{GroupMembershipRow, Learner, LearnerRow},
};

/// Repository for learner profiles and group memberships
pub struct LearnerRepository;

impl LearnerRepository {
    /// Load a learner with their group memberships
    pub async fn find(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<Learner>> {
        let row = sqlx::query_as::<_, LearnerRow>(
            r#"
            SELECT user_id, tariff, track, track_definition_completed_at
            FROM learners
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let memberships = sqlx::query_as::<_, GroupMembershipRow>(
            r#"
            SELECT gm.group_id, g.start_date
            FROM group_members gm
            JOIN groups g ON g.id = gm.group_id
            WHERE gm.user_id = $1
            ORDER BY g.start_date NULLS LAST, gm.group_id
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(Some(Learner::from_rows(row, memberships)))
    }
}
