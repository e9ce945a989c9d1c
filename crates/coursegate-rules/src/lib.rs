//! Content-unlocking rules for the course-delivery platform.
//!
//! Every evaluator in this crate is synchronous and pure: callers load the
//! curriculum, enrollment and learner state first, then ask for a verdict at
//! an explicit `now`.
//!
//! # Example
//!
//! ```ignore
//! use coursegate_rules::prelude::*;
//!
//! let evaluator = RuleEvaluator::new(PlatformCalendar::utc());
//! let verdict = evaluator.evaluate(&ReleasePolicy::Drip(DripRule::after_start(3)), &ctx);
//! if !verdict.available {
//!     // verdict.reason, verdict.available_at
//! }
//! ```

pub mod specification;
pub mod operators;
pub mod calendar;
pub mod rule;
pub mod reason;
pub mod context;
pub mod drip;
pub mod eligibility;
pub mod schedule;
pub mod availability;
pub mod deadline;
pub mod module_access;
pub mod curriculum;

/// Prelude module - import everything you need with `use coursegate_rules::prelude::*`
pub mod prelude {
    pub use crate::specification::{Specification, And, Or, Not, AlwaysTrue, AlwaysFalse};
    pub use crate::operators::Spec;
    pub use crate::calendar::PlatformCalendar;
    pub use crate::rule::{DripRule, DripTrigger, ReleasePolicy, RuleDate, RuleDecodeError, RuleInstant};
    pub use crate::reason::*;
    pub use crate::context::{AccessOverrides, AudienceContext, GroupMembership, LearnerProfile, ModuleAudience};
    pub use crate::drip::{DripContext, DripVerdict, RuleEvaluator, Unlock};
    pub use crate::eligibility::{Eligibility, EligibilityFilter};
    pub use crate::schedule::{
        ModuleSchedule, OpenAfterEvent, OpenAfterUnit, RelativeOpening, ScheduleContext, ScheduleVerdict,
        TrackScheduleOverride, TrackSettings,
    };
    pub use crate::availability::LessonAvailability;
    pub use crate::deadline::{DeadlineTracker, ReleaseOutcome, SubmissionEligibility};
    pub use crate::module_access::{check_module_access, ModuleAccess, ModuleAccessContext};
    pub use crate::curriculum::{last, preceding, CurriculumError, CurriculumTree, ModuleNode, Ordered};
}
