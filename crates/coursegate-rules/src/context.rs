//! Context types for access evaluation.
//!
//! Contexts carry everything a specification needs, already loaded; nothing
//! here reaches into a store.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use coursegate_common::{GroupId, LessonId, ModuleId, UserId};
use serde::{Deserialize, Serialize};

/// A learner's membership in a cohort group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub group_id: GroupId,
    /// Cohort start, used by `group_start_date` module schedules
    pub start_date: Option<DateTime<Utc>>,
}

/// The learner attributes access policies filter on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub user_id: UserId,
    pub tariff: Option<String>,
    pub track: Option<String>,
    pub memberships: Vec<GroupMembership>,
}

impl LearnerProfile {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    pub fn with_tariff(mut self, tariff: impl Into<String>) -> Self {
        self.tariff = Some(tariff.into());
        self
    }

    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    pub fn with_group(mut self, group_id: GroupId, start_date: Option<DateTime<Utc>>) -> Self {
        self.memberships.push(GroupMembership {
            group_id,
            start_date,
        });
        self
    }
}

/// Who a module is meant for. Empty sets mean "everyone".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAudience {
    pub allowed_tariffs: BTreeSet<String>,
    pub allowed_tracks: BTreeSet<String>,
    pub allowed_group_ids: BTreeSet<GroupId>,
}

impl ModuleAudience {
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn with_tariffs<I, S>(mut self, tariffs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tariffs = tariffs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tracks<I, S>(mut self, tracks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tracks = tracks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = GroupId>) -> Self {
        self.allowed_group_ids = groups.into_iter().collect();
        self
    }
}

/// Per-enrollment manual overrides set by administrators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessOverrides {
    pub restricted_module_ids: HashSet<ModuleId>,
    pub restricted_lesson_ids: HashSet<LessonId>,
    /// Modules opened regardless of audience and schedule
    pub forced_module_ids: HashSet<ModuleId>,
}

/// Everything an audience check looks at.
#[derive(Debug, Clone, Copy)]
pub struct AudienceContext<'a> {
    pub module_id: ModuleId,
    pub lesson_id: Option<LessonId>,
    pub audience: &'a ModuleAudience,
    pub learner: &'a LearnerProfile,
    pub overrides: &'a AccessOverrides,
}
