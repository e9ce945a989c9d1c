//! Homework submission model

use chrono::{DateTime, Utc};
use coursegate_common::HomeworkStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct HomeworkSubmission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl HomeworkSubmission {
    pub fn is_approved(&self) -> bool {
        HomeworkStatus::parse(&self.status) == Some(HomeworkStatus::Approved)
    }
}
