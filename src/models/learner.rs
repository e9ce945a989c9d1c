//! Learner profile models

use chrono::{DateTime, Utc};
use coursegate_rules::context::LearnerProfile;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Learner attributes row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LearnerRow {
    pub user_id: Uuid,
    pub tariff: Option<String>,
    pub track: Option<String>,
    pub track_definition_completed_at: Option<DateTime<Utc>>,
}

/// Group membership joined with the group's start date
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GroupMembershipRow {
    pub group_id: Uuid,
    pub start_date: Option<DateTime<Utc>>,
}

/// A learner as the policy engine sees them.
#[derive(Debug, Clone)]
pub struct Learner {
    pub profile: LearnerProfile,
    /// When the learner's track was assigned
    pub track_definition_completed_at: Option<DateTime<Utc>>,
}

impl Learner {
    pub fn from_rows(row: LearnerRow, memberships: Vec<GroupMembershipRow>) -> Self {
        let mut profile = LearnerProfile::new(row.user_id);
        profile.tariff = row.tariff;
        profile.track = row.track;
        for membership in memberships {
            profile = profile.with_group(membership.group_id, membership.start_date);
        }

        Self {
            profile,
            track_definition_completed_at: row.track_definition_completed_at,
        }
    }
}
