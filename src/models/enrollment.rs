//! Enrollment model

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use coursegate_common::EnrollmentStatus;
use coursegate_rules::context::AccessOverrides;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Enrollment database model. One row per (user, course).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub status: String,
    pub start_date: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub restricted_module_ids: Vec<Uuid>,
    pub restricted_lesson_ids: Vec<Uuid>,
    pub forced_module_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Unknown status strings count as not active
    pub fn is_active(&self) -> bool {
        EnrollmentStatus::parse(&self.status) == Some(EnrollmentStatus::Active)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }

    pub fn overrides(&self) -> AccessOverrides {
        AccessOverrides {
            restricted_module_ids: self.restricted_module_ids.iter().copied().collect::<HashSet<_>>(),
            restricted_lesson_ids: self.restricted_lesson_ids.iter().copied().collect(),
            forced_module_ids: self.forced_module_ids.iter().copied().collect(),
        }
    }
}
