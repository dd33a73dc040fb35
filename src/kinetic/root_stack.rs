//! Ordered root stacks.
//!
//! A root stack presents the roots of one function over a search interval as
//! a stack: `top()` is the next root to be consumed and `pop()` advances past
//! it. Kernels supply their own implementations; [`ExplicitRootStack`] covers
//! the case where the roots are already known.

use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;

/// Pop-from-top sequence of roots of a single function.
///
/// `top()` returns `None` on an empty stack and `pop()` on an empty stack is a
/// no-op; callers are expected to check [`RootStack::is_empty`] first.
pub trait RootStack: fmt::Display {
    /// Root representation; roots of one function are totally ordered.
    type Root: Clone + PartialOrd + fmt::Debug;

    /// The root that will be consumed next.
    fn top(&self) -> Option<&Self::Root>;

    /// Consume the current top root.
    fn pop(&mut self);

    fn is_empty(&self) -> bool;

    /// Numeric approximation of the current top root, for diagnostics only.
    fn estimate(&self) -> f64;
}

/// Root stack over an explicit list of roots, highest root on top.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplicitRootStack<R> {
    // ascending, so the highest root sits at the end of the vector
    roots: Vec<R>,
}

impl<R> ExplicitRootStack<R>
where
    R: Clone + PartialOrd + fmt::Debug,
{
    /// Keep the roots lying in `(lb, ub]`, ordered so the highest is on top.
    ///
    /// Roots that do not compare with the bounds (e.g. `NaN`) are dropped.
    pub fn from_roots(roots: impl IntoIterator<Item = R>, lb: &R, ub: &R) -> Self {
        let mut roots: Vec<R> = roots
            .into_iter()
            .filter(|r| r > lb && r <= ub)
            .collect();
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Self { roots }
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Remaining roots in pop order.
    pub fn remaining(&self) -> impl Iterator<Item = &R> {
        self.roots.iter().rev()
    }
}

impl<R> Default for ExplicitRootStack<R> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<R> RootStack for ExplicitRootStack<R>
where
    R: Clone + PartialOrd + fmt::Debug + ToPrimitive,
{
    type Root = R;

    fn top(&self) -> Option<&R> {
        self.roots.last()
    }

    fn pop(&mut self) {
        self.roots.pop();
    }

    fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    fn estimate(&self) -> f64 {
        self.roots
            .last()
            .map_or(f64::INFINITY, |r| r.to_f64().unwrap_or(f64::NAN))
    }
}

impl<R: fmt::Debug> fmt::Display for ExplicitRootStack<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.roots.iter().rev()).finish()
    }
}

/// Iterator draining a root stack top-first.
#[derive(Debug)]
pub struct Roots<S> {
    stack: S,
}

impl<S: RootStack> Iterator for Roots<S> {
    type Item = S::Root;

    fn next(&mut self) -> Option<Self::Item> {
        let root = self.stack.top()?.clone();
        self.stack.pop();
        Some(root)
    }
}

/// Convenience extensions for every [`RootStack`].
pub trait RootStackExt: RootStack + Sized {
    /// Consume the stack, yielding `top()` before each `pop()`.
    fn into_roots(self) -> Roots<Self> {
        Roots { stack: self }
    }
}

impl<S: RootStack> RootStackExt for S {}
