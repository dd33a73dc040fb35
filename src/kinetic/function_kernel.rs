//! Function kernel: the capability bundle root handling is written against.

use super::root_stack::RootStack;
use crate::polynomial::Sign;
use std::fmt;

/// Capabilities a kinetic function kernel supplies.
///
/// The kernel owns the arithmetic: functions and roots are opaque to the rest
/// of the crate, which only needs a root stack per function, an even
/// multiplicity test for roots and an exact sign oracle between two roots.
pub trait FunctionKernel {
    /// Certificate function type (e.g. a polynomial in time).
    type Function: fmt::Debug;
    /// Root representation shared by the kernel's root stacks.
    type Root: Clone + PartialOrd + fmt::Debug;
    /// Root stack produced by [`FunctionKernel::root_stack`].
    type RootStack: RootStack<Root = Self::Root>;
    /// Predicate returned by [`FunctionKernel::is_even_multiplicity`].
    type IsEvenMultiplicity: Fn(&Self::Root) -> bool;

    /// Roots of `f` in the search interval `[lb, ub]`.
    fn root_stack(&self, f: &Self::Function, lb: &Self::Root, ub: &Self::Root) -> Self::RootStack;

    /// Predicate telling whether a root of `f` has even multiplicity.
    fn is_even_multiplicity(&self, f: &Self::Function) -> Self::IsEvenMultiplicity;

    /// Sign of `f` strictly between two consecutive roots `lb < ub`.
    fn sign_between_roots(&self, lb: &Self::Root, ub: &Self::Root, f: &Self::Function) -> Sign;
}
