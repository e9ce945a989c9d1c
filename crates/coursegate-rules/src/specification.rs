//! Core Specification trait and combinators.
//!
//! Policy checks never touch a data store, so specifications here are
//! evaluated synchronously.

/// Core specification trait for composable access rules.
///
/// The Specification Pattern allows complex access policies to be composed
/// from simple, reusable predicates.
pub trait Specification<Ctx: ?Sized>: Send + Sync {
    /// Check if the specification is satisfied by the given context.
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool;

    /// Combine this specification with another using AND logic.
    fn and<S: Specification<Ctx>>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Combine this specification with another using OR logic.
    fn or<S: Specification<Ctx>>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    /// Negate this specification.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

/// AND combinator for specifications.
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(pub A, pub B);

impl<Ctx, A, B> Specification<Ctx> for And<A, B>
where
    Ctx: ?Sized,
    A: Specification<Ctx>,
    B: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.is_satisfied_by(ctx) && self.1.is_satisfied_by(ctx)
    }
}

/// OR combinator for specifications.
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(pub A, pub B);

impl<Ctx, A, B> Specification<Ctx> for Or<A, B>
where
    Ctx: ?Sized,
    A: Specification<Ctx>,
    B: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        self.0.is_satisfied_by(ctx) || self.1.is_satisfied_by(ctx)
    }
}

/// NOT combinator for specifications.
#[derive(Debug, Clone, Copy)]
pub struct Not<A>(pub A);

impl<Ctx, A> Specification<Ctx> for Not<A>
where
    Ctx: ?Sized,
    A: Specification<Ctx>,
{
    fn is_satisfied_by(&self, ctx: &Ctx) -> bool {
        !self.0.is_satisfied_by(ctx)
    }
}

/// A specification that always returns true.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysTrue;

impl<Ctx: ?Sized> Specification<Ctx> for AlwaysTrue {
    fn is_satisfied_by(&self, _ctx: &Ctx) -> bool {
        true
    }
}

/// A specification that always returns false.
#[derive(Debug, Clone, Copy)]
pub struct AlwaysFalse;

impl<Ctx: ?Sized> Specification<Ctx> for AlwaysFalse {
    fn is_satisfied_by(&self, _ctx: &Ctx) -> bool {
        false
    }
}
