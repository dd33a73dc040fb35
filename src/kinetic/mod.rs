//! Root handling for kinetic data structures.
//!
//! Kinetic simulations schedule events at the roots of certificate functions.
//! A [`FunctionKernel`] supplies, for each function, a [`RootStack`] of its
//! roots in a time window; [`HandleDegeneracyKernel`] decorates such a kernel
//! so that its stacks become [`DegenerateRootStack`]s, which repair the
//! lower-bound and even-multiplicity degeneracies of root isolation.

pub mod degeneracy;
pub mod function_kernel;
pub mod root_stack;

pub use degeneracy::{DegenerateRootStack, HandleDegeneracyKernel};
pub use function_kernel::FunctionKernel;
pub use root_stack::{ExplicitRootStack, RootStack, RootStackExt, Roots};
