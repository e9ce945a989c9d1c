//! Persisted drip rule representation.
//!
//! Lessons store their release rule as a JSON blob keyed by a `type`
//! discriminator:
//!
//! ```json
//! { "type": "after_start", "days": 5, "softDeadline": "2024-02-01", "hardDeadline": "2024-02-10" }
//! ```
//!
//! Absent optional fields stay absent on the way back out.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::calendar::PlatformCalendar;

/// A calendar date or an instant as written by the curriculum editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleDate {
    /// `YYYY-MM-DD`, a day in the platform zone
    Day(NaiveDate),
    /// RFC 3339 timestamp
    Instant(RuleInstant),
}

/// An RFC 3339 timestamp that keeps the exact text it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInstant {
    at: DateTime<FixedOffset>,
    text: String,
}

impl RuleInstant {
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self {
            at,
            text: at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl RuleDate {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::Day(date));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|at| {
                Self::Instant(RuleInstant {
                    at,
                    text: s.to_owned(),
                })
            })
            .ok()
    }

    pub fn instant(at: DateTime<FixedOffset>) -> Self {
        Self::Instant(RuleInstant::new(at))
    }

    /// Start of the platform day this date falls on.
    pub fn day_start(&self, calendar: &PlatformCalendar) -> DateTime<Utc> {
        match self {
            Self::Day(date) => calendar.day_start(*date),
            Self::Instant(instant) => calendar.start_of_day(instant.at.with_timezone(&Utc)),
        }
    }
}

impl std::fmt::Display for RuleDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Instant(instant) => f.write_str(instant.as_str()),
        }
    }
}

impl Serialize for RuleDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RuleDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RuleDate::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid rule date: {raw:?}")))
    }
}

/// Deadline fields: `null`, missing and empty strings all mean "no deadline".
fn optional_rule_date<'de, D>(deserializer: D) -> Result<Option<RuleDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => RuleDate::parse(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid deadline: {raw:?}"))),
    }
}

/// What opens a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DripTrigger {
    /// N days after the start of the enrollment day
    AfterStart { days: u32 },
    /// At the start of a fixed day
    OnDate { date: RuleDate },
    /// Some hours after the previous lesson was completed
    AfterPreviousCompleted {
        #[serde(
            rename = "delayHours",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        delay_hours: Option<u32>,
    },
}

/// A drip rule with its optional submission deadlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DripRule {
    #[serde(flatten)]
    pub trigger: DripTrigger,
    /// Past this day, homework is accepted but marked late
    #[serde(
        rename = "softDeadline",
        default,
        deserialize_with = "optional_rule_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub soft_deadline: Option<RuleDate>,
    /// From this day on, the lesson is closed for good
    #[serde(
        rename = "hardDeadline",
        default,
        deserialize_with = "optional_rule_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub hard_deadline: Option<RuleDate>,
}

impl DripRule {
    pub fn new(trigger: DripTrigger) -> Self {
        Self {
            trigger,
            soft_deadline: None,
            hard_deadline: None,
        }
    }

    pub fn after_start(days: u32) -> Self {
        Self::new(DripTrigger::AfterStart { days })
    }

    pub fn on_date(date: RuleDate) -> Self {
        Self::new(DripTrigger::OnDate { date })
    }

    pub fn after_previous_completed(delay_hours: Option<u32>) -> Self {
        Self::new(DripTrigger::AfterPreviousCompleted { delay_hours })
    }

    pub fn with_soft_deadline(mut self, date: RuleDate) -> Self {
        self.soft_deadline = Some(date);
        self
    }

    pub fn with_hard_deadline(mut self, date: RuleDate) -> Self {
        self.hard_deadline = Some(date);
        self
    }
}

/// Stored drip rule that could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("invalid drip rule: {0}")]
pub struct RuleDecodeError(#[from] serde_json::Error);

/// How a lesson is released. A lesson without a rule is explicitly
/// `Unrestricted`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    #[default]
    Unrestricted,
    Drip(DripRule),
}

impl ReleasePolicy {
    /// Decode the stored blob; `None` and JSON `null` mean no rule.
    pub fn from_stored(value: Option<&Value>) -> Result<Self, RuleDecodeError> {
        match value {
            None | Some(Value::Null) => Ok(Self::Unrestricted),
            Some(value) => Ok(Self::Drip(DripRule::deserialize(value)?)),
        }
    }

    /// Encode back to the stored blob.
    pub fn to_stored(&self) -> Result<Option<Value>, RuleDecodeError> {
        match self {
            Self::Unrestricted => Ok(None),
            Self::Drip(rule) => Ok(Some(serde_json::to_value(rule)?)),
        }
    }

    /// Whether evaluation needs the previous lesson's completion time.
    pub fn needs_previous_completion(&self) -> bool {
        matches!(
            self,
            Self::Drip(DripRule {
                trigger: DripTrigger::AfterPreviousCompleted { .. },
                ..
            })
        )
    }
}

impl From<Option<DripRule>> for ReleasePolicy {
    fn from(rule: Option<DripRule>) -> Self {
        rule.map_or(Self::Unrestricted, Self::Drip)
    }
}
