//! `&`, `|` and `!` for specifications.
//!
//! ```ignore
//! let module_filters = Spec(TariffAllowed) & Spec(TrackAllowed) & Spec(GroupAllowed);
//! let admitted = Spec(LessonNotRestricted) & (Spec(ModuleForced) | module_filters);
//! ```

use crate::specification::{And, Not, Or, Specification};
use std::ops::{BitAnd, BitOr, Not as StdNot};

/// Operator-composable wrapper around a specification.
#[derive(Debug, Clone, Copy)]
pub struct Spec<S>(pub S);

impl<A, B> BitAnd<Spec<B>> for Spec<A> {
    type Output = Spec<And<A, B>>;

    fn bitand(self, rhs: Spec<B>) -> Self::Output {
        Spec(And(self.0, rhs.0))
    }
}

impl<A, B> BitOr<Spec<B>> for Spec<A> {
    type Output = Spec<Or<A, B>>;

    fn bitor(self, rhs: Spec<B>) -> Self::Output {
        Spec(Or(self.0, rhs.0))
    }
}

impl<A> StdNot for Spec<A> {
    type Output = Spec<Not<A>>;

    fn not(self) -> Self::Output {
        Spec(Not(self.0))
    }
}

impl<Ctx, S> Specification<Ctx> for Spec<S>
where
    Ctx: ?Sized,
    S: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.is_satisfied_by(ctx)
    }
}
