//! Lesson progress model (read only)

use chrono::{DateTime, Utc};
use coursegate_common::ProgressStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonProgress {
    pub user_id: Uuid,
    pub lesson_id: Uuid,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
}

impl LessonProgress {
    /// Completion instant, if the lesson is completed
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match ProgressStatus::parse(&self.status) {
            Some(ProgressStatus::Completed) => self.completed_at,
            _ => None,
        }
    }
}
