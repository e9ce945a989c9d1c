//! Drip rule evaluation.
//!
//! `RuleEvaluator::evaluate` is a pure function of the release policy and the
//! temporal context; it is shared by lesson availability and homework
//! submission checks.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::calendar::{checked_add_days, checked_add_hours, PlatformCalendar};
use crate::reason::DripReason;
use crate::rule::{DripRule, DripTrigger, ReleasePolicy};

/// Temporal inputs for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DripContext {
    pub enrollment_start: DateTime<Utc>,
    /// Completion time of the previous lesson, if it is completed
    pub previous_completed_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
}

/// When a trigger opens the lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {
    At(DateTime<Utc>),
    /// Depends on a learner action that has not happened yet
    Pending,
}

/// Verdict of a drip rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DripVerdict {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DripReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_at: Option<DateTime<Utc>>,
    pub is_late: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hard_deadline: Option<DateTime<Utc>>,
}

impl DripVerdict {
    pub fn open() -> Self {
        Self {
            available: true,
            reason: None,
            available_at: None,
            is_late: false,
            soft_deadline: None,
            hard_deadline: None,
        }
    }
}

/// Evaluates drip rules against the platform calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator {
    calendar: PlatformCalendar,
}

impl RuleEvaluator {
    pub fn new(calendar: PlatformCalendar) -> Self {
        Self { calendar }
    }

    /// Decide whether the lesson is open at `ctx.now`.
    ///
    /// The hard deadline is checked first and dominates every trigger.
    pub fn evaluate(&self, policy: &ReleasePolicy, ctx: &DripContext) -> DripVerdict {
        let rule = match policy {
            ReleasePolicy::Unrestricted => return DripVerdict::open(),
            ReleasePolicy::Drip(rule) => rule,
        };

        let soft_deadline = rule.soft_deadline.as_ref().map(|d| d.day_start(&self.calendar));
        let hard_deadline = rule.hard_deadline.as_ref().map(|d| d.day_start(&self.calendar));

        let mut verdict = DripVerdict {
            soft_deadline,
            hard_deadline,
            ..DripVerdict::open()
        };

        if hard_deadline.is_some_and(|deadline| ctx.now >= deadline) {
            verdict.available = false;
            verdict.reason = Some(DripReason::HardDeadlinePassed);
            return verdict;
        }

        verdict.is_late = soft_deadline.is_some_and(|deadline| ctx.now >= deadline);

        match self.unlock_time(rule, ctx) {
            Unlock::At(at) if ctx.now < at => {
                verdict.available = false;
                verdict.reason = Some(DripReason::DripLocked);
                verdict.available_at = Some(at);
            }
            Unlock::Pending => {
                verdict.available = false;
                verdict.reason = Some(DripReason::DripLocked);
            }
            Unlock::At(_) => {}
        }

        verdict
    }

    /// The instant the rule's trigger is satisfied.
    pub fn unlock_time(&self, rule: &DripRule, ctx: &DripContext) -> Unlock {
        let at = match &rule.trigger {
            DripTrigger::AfterStart { days } => {
                checked_add_days(self.calendar.start_of_day(ctx.enrollment_start), *days)
            }
            DripTrigger::OnDate { date } => Some(date.day_start(&self.calendar)),
            DripTrigger::AfterPreviousCompleted { delay_hours } => match ctx.previous_completed_at {
                Some(completed_at) => checked_add_hours(completed_at, delay_hours.unwrap_or(0)),
                None => return Unlock::Pending,
            },
        };

        // Beyond the representable range the lesson never opens.
        at.map_or(Unlock::Pending, Unlock::At)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleDate;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> RuleDate {
        RuleDate::Day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn ctx(now: DateTime<Utc>) -> DripContext {
        DripContext {
            enrollment_start: utc(2024, 1, 1, 15),
            previous_completed_at: None,
            now,
        }
    }

    fn drip(rule: DripRule) -> ReleasePolicy {
        ReleasePolicy::Drip(rule)
    }

    #[test]
    fn test_unrestricted_is_open() {
        let verdict = RuleEvaluator::default().evaluate(&ReleasePolicy::Unrestricted, &ctx(utc(2000, 1, 1, 0)));
        assert_eq!(verdict, DripVerdict::open());
    }

    #[test]
    fn test_after_start_scenario() {
        let evaluator = RuleEvaluator::default();
        let policy = drip(DripRule::after_start(5));

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 1, 5, 0)));
        assert!(!verdict.available);
        assert_eq!(verdict.reason, Some(DripReason::DripLocked));
        assert_eq!(verdict.available_at, Some(utc(2024, 1, 6, 0)));

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 1, 6, 0)));
        assert!(verdict.available);
        assert_eq!(verdict.reason, None);
    }

    #[test]
    fn test_after_start_is_a_monotonic_step() {
        let evaluator = RuleEvaluator::default();
        for days in [0u32, 1, 5, 30] {
            let policy = drip(DripRule::after_start(days));
            let unlock = utc(2024, 1, 1, 0) + Duration::days(i64::from(days));
            let mut now = utc(2023, 12, 30, 0);
            while now < unlock + Duration::days(3) {
                let verdict = evaluator.evaluate(&policy, &ctx(now));
                assert_eq!(verdict.available, now >= unlock, "days={days} now={now}");
                now += Duration::hours(5);
            }
            assert!(!evaluator.evaluate(&policy, &ctx(unlock - Duration::seconds(1))).available);
            assert!(evaluator.evaluate(&policy, &ctx(unlock)).available);
        }
    }

    #[test]
    fn test_on_date_truncates_to_day() {
        let evaluator = RuleEvaluator::default();
        let policy = drip(DripRule::on_date(RuleDate::instant(utc(2024, 3, 10, 18).fixed_offset())));

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 3, 9, 23)));
        assert_eq!(verdict.available_at, Some(utc(2024, 3, 10, 0)));
        assert!(!verdict.available);

        assert!(evaluator.evaluate(&policy, &ctx(utc(2024, 3, 10, 1))).available);
    }

    #[test]
    fn test_hard_deadline_dominates() {
        let evaluator = RuleEvaluator::default();
        let policy = drip(DripRule::after_start(5).with_hard_deadline(day(2024, 2, 1)));

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 2, 2, 0)));
        assert!(!verdict.available);
        assert_eq!(verdict.reason, Some(DripReason::HardDeadlinePassed));
        assert_eq!(verdict.available_at, None);
        assert_eq!(verdict.hard_deadline, Some(utc(2024, 2, 1, 0)));

        // Day granularity: the very start of the deadline day is already closed.
        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 2, 1, 0)));
        assert_eq!(verdict.reason, Some(DripReason::HardDeadlinePassed));

        // Stays closed forever afterwards.
        for months in 1..24 {
            let now = utc(2024, 2, 1, 0) + Duration::days(30 * months);
            assert!(!evaluator.evaluate(&policy, &ctx(now)).available);
        }

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 1, 31, 23)));
        assert!(verdict.available);
    }

    #[test]
    fn test_soft_deadline_marks_late_without_blocking() {
        let evaluator = RuleEvaluator::default();
        let policy = drip(
            DripRule::after_start(0)
                .with_soft_deadline(day(2024, 1, 10))
                .with_hard_deadline(day(2024, 1, 20)),
        );

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 1, 9, 12)));
        assert!(verdict.available);
        assert!(!verdict.is_late);

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2024, 1, 10, 0)));
        assert!(verdict.available);
        assert!(verdict.is_late);
        assert_eq!(verdict.soft_deadline, Some(utc(2024, 1, 10, 0)));
    }

    #[test]
    fn test_after_previous_completed_without_completion() {
        let evaluator = RuleEvaluator::default();
        let policy = drip(DripRule::after_previous_completed(Some(12)));

        let verdict = evaluator.evaluate(&policy, &ctx(utc(2030, 1, 1, 0)));
        assert!(!verdict.available);
        assert_eq!(verdict.reason, Some(DripReason::DripLocked));
        assert_eq!(verdict.available_at, None);
    }

    #[test]
    fn test_after_previous_completed_opens_exactly_after_delay() {
        let evaluator = RuleEvaluator::default();
        let completed_at = Utc.with_ymd_and_hms(2024, 1, 3, 10, 17, 42).unwrap();

        for hours in [0u32, 1, 24, 49] {
            let policy = drip(DripRule::after_previous_completed(Some(hours)));
            let unlock = completed_at + Duration::hours(i64::from(hours));
            let at = |now| DripContext {
                previous_completed_at: Some(completed_at),
                ..ctx(now)
            };

            let before = evaluator.evaluate(&policy, &at(unlock - Duration::seconds(1)));
            if hours > 0 {
                assert!(!before.available);
                assert_eq!(before.available_at, Some(unlock));
            }
            assert!(evaluator.evaluate(&policy, &at(unlock)).available);
        }
    }

    #[test]
    fn test_missing_delay_means_no_delay() {
        let evaluator = RuleEvaluator::default();
        let completed_at = utc(2024, 1, 3, 10);
        let verdict = evaluator.evaluate(
            &drip(DripRule::after_previous_completed(None)),
            &DripContext {
                previous_completed_at: Some(completed_at),
                ..ctx(completed_at)
            },
        );
        assert!(verdict.available);
    }

    #[test]
    fn test_platform_offset_shifts_day_boundary() {
        // UTC+3: enrollment at 2024-01-01T22:00Z is 2024-01-02 locally.
        let evaluator = RuleEvaluator::new(PlatformCalendar::from_offset_minutes(180).unwrap());
        let policy = drip(DripRule::after_start(1));
        let context = DripContext {
            enrollment_start: utc(2024, 1, 1, 22),
            previous_completed_at: None,
            now: utc(2024, 1, 2, 20),
        };

        let verdict = evaluator.evaluate(&policy, &context);
        assert!(!verdict.available);
        assert_eq!(verdict.available_at, Some(utc(2024, 1, 2, 21)));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let evaluator = RuleEvaluator::default();
        let policy = drip(DripRule::after_start(3).with_soft_deadline(day(2024, 1, 2)));
        let context = ctx(utc(2024, 1, 3, 8));
        assert_eq!(evaluator.evaluate(&policy, &context), evaluator.evaluate(&policy, &context));
    }
}
