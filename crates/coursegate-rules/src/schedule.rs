//! Module release schedules.
//!
//! A module may open at an absolute instant (`openAt`), some time after a
//! learner event (`openAfterEvent` + amount/unit), or both. Per-track settings
//! can replace either part for learners on that track.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::context::{LearnerProfile, ModuleAudience};

/// Learner event a module opening is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenAfterEvent {
    TrackDefinitionCompleted,
    GroupStartDate,
}

impl OpenAfterEvent {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "track_definition_completed" => Some(Self::TrackDefinitionCompleted),
            "group_start_date" => Some(Self::GroupStartDate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenAfterUnit {
    Days,
    Weeks,
    Months,
}

impl OpenAfterUnit {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "days" => Some(Self::Days),
            "weeks" => Some(Self::Weeks),
            "months" => Some(Self::Months),
            _ => None,
        }
    }
}

/// "Open N units after event".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeOpening {
    pub event: OpenAfterEvent,
    pub amount: Option<u32>,
    pub unit: Option<OpenAfterUnit>,
}

impl RelativeOpening {
    /// Opening instant for an event at `base`. Without a positive amount and
    /// a unit the module opens with the event itself.
    pub fn opening_from(&self, base: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (amount, unit) = match (self.amount, self.unit) {
            (Some(amount), Some(unit)) if amount > 0 => (amount, unit),
            _ => return Some(base),
        };

        match unit {
            OpenAfterUnit::Days => base.checked_add_signed(Duration::try_days(i64::from(amount))?),
            OpenAfterUnit::Weeks => {
                base.checked_add_signed(Duration::try_weeks(i64::from(amount))?)
            }
            OpenAfterUnit::Months => base.checked_add_months(Months::new(amount)),
        }
    }
}

/// Per-track replacement of a module's schedule, as stored in `trackSettings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackScheduleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_after_event: Option<OpenAfterEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_after_amount: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_after_unit: Option<OpenAfterUnit>,
}

/// Track name to schedule override.
pub type TrackSettings = HashMap<String, TrackScheduleOverride>;

/// When a module opens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSchedule {
    pub open_at: Option<DateTime<Utc>>,
    pub open_after: Option<RelativeOpening>,
}

/// Inputs for schedule evaluation.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleContext<'a> {
    pub now: DateTime<Utc>,
    pub learner: &'a LearnerProfile,
    pub audience: &'a ModuleAudience,
    pub track_definition_completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleVerdict {
    Open,
    /// Closed; `unlock_date` is unknown while the triggering event is pending
    Locked {
        unlock_date: Option<DateTime<Utc>>,
        details: Option<String>,
    },
    /// `group_start_date` schedule, but the learner is in no eligible group
    NoEligibleGroup,
}

impl ScheduleVerdict {
    fn locked(unlock_date: Option<DateTime<Utc>>) -> Self {
        Self::Locked {
            unlock_date,
            details: None,
        }
    }
}

impl ModuleSchedule {
    /// The schedule as seen by a learner on `track`.
    pub fn for_track(&self, settings: &TrackSettings, track: Option<&str>) -> ModuleSchedule {
        let Some(ovr) = track.and_then(|t| settings.get(t)) else {
            return self.clone();
        };

        let mut effective = self.clone();
        if ovr.open_at.is_some() {
            effective.open_at = ovr.open_at;
        }
        if let Some(event) = ovr.open_after_event {
            effective.open_after = Some(RelativeOpening {
                event,
                amount: ovr.open_after_amount,
                unit: ovr.open_after_unit,
            });
        }
        effective
    }

    pub fn evaluate(&self, ctx: &ScheduleContext<'_>) -> ScheduleVerdict {
        if let Some(open_at) = self.open_at {
            if ctx.now < open_at {
                return ScheduleVerdict::locked(Some(open_at));
            }
        }

        let Some(opening) = self.open_after else {
            return ScheduleVerdict::Open;
        };

        match opening.event {
            OpenAfterEvent::TrackDefinitionCompleted => {
                let Some(completed_at) = ctx.track_definition_completed_at else {
                    return ScheduleVerdict::Locked {
                        unlock_date: None,
                        details: Some("Waiting for track definition".to_string()),
                    };
                };
                match opening.opening_from(completed_at) {
                    Some(open) if ctx.now >= open => ScheduleVerdict::Open,
                    open => ScheduleVerdict::locked(open),
                }
            }
            OpenAfterEvent::GroupStartDate => Self::evaluate_group_start(&opening, ctx),
        }
    }

    /// Open as soon as any eligible group's opening has passed; otherwise
    /// report the earliest future opening.
    fn evaluate_group_start(opening: &RelativeOpening, ctx: &ScheduleContext<'_>) -> ScheduleVerdict {
        let allowed = &ctx.audience.allowed_group_ids;
        let eligible: Vec<_> = ctx
            .learner
            .memberships
            .iter()
            .filter(|m| allowed.is_empty() || allowed.contains(&m.group_id))
            .collect();

        if eligible.is_empty() {
            return ScheduleVerdict::NoEligibleGroup;
        }

        let mut earliest: Option<DateTime<Utc>> = None;
        for membership in eligible {
            let Some(start) = membership.start_date else {
                continue;
            };
            let Some(open) = opening.opening_from(start) else {
                continue;
            };
            if ctx.now >= open {
                return ScheduleVerdict::Open;
            }
            earliest = Some(earliest.map_or(open, |e| e.min(open)));
        }

        ScheduleVerdict::locked(earliest)
    }
}
