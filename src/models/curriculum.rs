//! Course, module and lesson models

use chrono::{DateTime, Utc};
use coursegate_rules::context::ModuleAudience;
use coursegate_rules::curriculum::{ModuleNode, Ordered};
use coursegate_rules::rule::{ReleasePolicy, RuleDecodeError};
use coursegate_rules::schedule::{
    ModuleSchedule, OpenAfterEvent, OpenAfterUnit, RelativeOpening, TrackSettings,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Course database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Module database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Module {
    pub id: Uuid,
    pub course_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub title: String,
    pub order_index: i32,
    pub allowed_tariffs: Vec<String>,
    pub allowed_tracks: Vec<String>,
    pub allowed_group_ids: Vec<Uuid>,
    pub open_at: Option<DateTime<Utc>>,
    pub open_after_event: Option<String>,
    pub open_after_amount: Option<i32>,
    pub open_after_unit: Option<String>,
    pub track_settings: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    pub fn audience(&self) -> ModuleAudience {
        ModuleAudience::unrestricted()
            .with_tariffs(self.allowed_tariffs.iter().cloned())
            .with_tracks(self.allowed_tracks.iter().cloned())
            .with_groups(self.allowed_group_ids.iter().copied())
    }

    /// Base schedule, before per-track overrides.
    pub fn schedule(&self) -> ModuleSchedule {
        let open_after = self
            .open_after_event
            .as_deref()
            .and_then(OpenAfterEvent::parse)
            .map(|event| RelativeOpening {
                event,
                amount: self.open_after_amount.and_then(|n| u32::try_from(n).ok()),
                unit: self.open_after_unit.as_deref().and_then(OpenAfterUnit::parse),
            });

        ModuleSchedule {
            open_at: self.open_at,
            open_after,
        }
    }

    pub fn track_settings(&self) -> Result<TrackSettings, serde_json::Error> {
        match &self.track_settings {
            None | Some(serde_json::Value::Null) => Ok(TrackSettings::new()),
            Some(raw) => serde_json::from_value(raw.clone()),
        }
    }

    pub fn node(&self) -> ModuleNode {
        ModuleNode {
            id: self.id,
            parent_id: self.parent_id,
            order_index: self.order_index,
        }
    }
}

impl Ordered for Module {
    fn order_index(&self) -> i32 {
        self.order_index
    }
}

/// Lesson database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub order_index: i32,
    pub is_stop_lesson: bool,
    pub lesson_type: String,
    pub drip_rule: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

impl Lesson {
    pub fn release_policy(&self) -> Result<ReleasePolicy, RuleDecodeError> {
        ReleasePolicy::from_stored(self.drip_rule.as_ref())
    }
}

impl Ordered for Lesson {
    fn order_index(&self) -> i32 {
        self.order_index
    }
}
