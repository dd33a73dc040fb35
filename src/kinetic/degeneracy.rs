//! Degeneracy handling around the root stacks of a function kernel.
//!
//! Root isolation can miss a root sitting exactly on the lower bound of the
//! search interval, and it reports an even-multiplicity root as a single
//! entry. [`DegenerateRootStack`] repairs both on top of any kernel root
//! stack:
//!
//! - if `f` is negative between `lb` and the first reported root, `lb` itself
//!   is surfaced as an extra root before anything else;
//! - an even-multiplicity root is reported twice, i.e. it takes two `pop()`
//!   calls before the wrapped stack advances.
//!
//! [`HandleDegeneracyKernel`] installs the wrapper by decorating a kernel's
//! root-stack factory and delegating everything else.
//!
//! ```rust
//! use mesh_kinetic::kinetic::{
//!     DegenerateRootStack, ExplicitRootStack, FunctionKernel, RootStack, RootStackExt,
//! };
//! use mesh_kinetic::polynomial::Sign;
//!
//! struct Scripted;
//!
//! impl FunctionKernel for Scripted {
//!     type Function = Vec<f64>;
//!     type Root = f64;
//!     type RootStack = ExplicitRootStack<f64>;
//!     type IsEvenMultiplicity = Box<dyn Fn(&f64) -> bool>;
//!
//!     fn root_stack(&self, f: &Vec<f64>, lb: &f64, ub: &f64) -> Self::RootStack {
//!         ExplicitRootStack::from_roots(f.iter().copied(), lb, ub)
//!     }
//!     fn is_even_multiplicity(&self, _f: &Vec<f64>) -> Self::IsEvenMultiplicity {
//!         Box::new(|r| *r == 3.0)
//!     }
//!     fn sign_between_roots(&self, _lb: &f64, _ub: &f64, _f: &Vec<f64>) -> Sign {
//!         Sign::Negative
//!     }
//! }
//!
//! let stack = DegenerateRootStack::new(&vec![5.0, 3.0, 1.0], &0.0, &6.0, &Scripted);
//! assert!(stack.has_extra());
//! let roots: Vec<f64> = stack.into_roots().collect();
//! assert_eq!(roots, vec![0.0, 5.0, 3.0, 3.0, 1.0]);
//! ```

use super::function_kernel::FunctionKernel;
use super::root_stack::RootStack;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshKineticError;
use crate::polynomial::Sign;
use std::fmt;

/// Root stack that hides the lower-bound and even-multiplicity degeneracies
/// of the wrapped kernel root stack.
pub struct DegenerateRootStack<K: FunctionKernel> {
    solver: K::RootStack,
    extra_root: Option<K::Root>,
    one_even: bool,
    is_even: K::IsEvenMultiplicity,
}

impl<K: FunctionKernel> DegenerateRootStack<K> {
    /// Wrap the kernel's root stack for `f` on `[lb, ub]`.
    ///
    /// The wrapped stack's top root must lie strictly above `lb`; this is only
    /// checked in builds with invariant checking enabled (see
    /// [`DegenerateRootStack::try_new`] for an always-checked variant).
    pub fn new(f: &K::Function, lb: &K::Root, ub: &K::Root, kernel: &K) -> Self {
        let solver = kernel.root_stack(f, lb, ub);
        crate::debug_invariants!(
            check_top_above(&solver, lb),
            "DegenerateRootStack::new precondition"
        );
        Self::from_parts(f, lb, solver, kernel)
    }

    /// Like [`DegenerateRootStack::new`], but reports a top root at or below
    /// `lb` as [`MeshKineticError::RootNotAboveLowerBound`].
    pub fn try_new(
        f: &K::Function,
        lb: &K::Root,
        ub: &K::Root,
        kernel: &K,
    ) -> Result<Self, MeshKineticError> {
        let solver = kernel.root_stack(f, lb, ub);
        check_top_above(&solver, lb)?;
        Ok(Self::from_parts(f, lb, solver, kernel))
    }

    fn from_parts(f: &K::Function, lb: &K::Root, solver: K::RootStack, kernel: &K) -> Self {
        let extra_root = match solver.top() {
            Some(top) if kernel.sign_between_roots(lb, top, f) == Sign::Negative => {
                log::debug!("Degeneracy for {f:?} between {lb:?} and {top:?}");
                Some(lb.clone())
            }
            _ => None,
        };
        Self {
            solver,
            extra_root,
            one_even: false,
            is_even: kernel.is_even_multiplicity(f),
        }
    }

    /// True while the lower bound is pending as an extra root.
    #[inline]
    pub fn has_extra(&self) -> bool {
        self.extra_root.is_some()
    }

    /// True after the first of the two pops of an even-multiplicity root.
    #[inline]
    pub fn one_even(&self) -> bool {
        self.one_even
    }

    /// The wrapped kernel root stack.
    pub fn wrapped(&self) -> &K::RootStack {
        &self.solver
    }
}

fn check_top_above<S: RootStack>(solver: &S, lb: &S::Root) -> Result<(), MeshKineticError> {
    match solver.top() {
        Some(top) if top <= lb => Err(MeshKineticError::RootNotAboveLowerBound {
            top: format!("{top:?}"),
            lower_bound: format!("{lb:?}"),
        }),
        _ => Ok(()),
    }
}

impl<K: FunctionKernel> RootStack for DegenerateRootStack<K> {
    type Root = K::Root;

    fn top(&self) -> Option<&K::Root> {
        match &self.extra_root {
            Some(root) => Some(root),
            None => self.solver.top(),
        }
    }

    fn pop(&mut self) {
        if self.extra_root.take().is_some() {
            return;
        }
        let even_top = self.solver.top().is_some_and(|top| (self.is_even)(top));
        if !self.one_even && even_top {
            self.one_even = true;
        } else {
            self.solver.pop();
            self.one_even = false;
        }
    }

    fn is_empty(&self) -> bool {
        self.extra_root.is_none() && self.solver.is_empty()
    }

    fn estimate(&self) -> f64 {
        self.solver.estimate()
    }
}

impl<K: FunctionKernel> fmt::Display for DegenerateRootStack<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.solver, f)
    }
}

impl<K: FunctionKernel> fmt::Debug for DegenerateRootStack<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DegenerateRootStack")
            .field("solver", &format_args!("{}", self.solver))
            .field("extra_root", &self.extra_root)
            .field("one_even", &self.one_even)
            .finish()
    }
}

impl<K: FunctionKernel> DebugInvariants for DegenerateRootStack<K> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "DegenerateRootStack");
    }

    fn validate_invariants(&self) -> Result<(), MeshKineticError> {
        if self.extra_root.is_some() && self.one_even {
            return Err(MeshKineticError::InconsistentRootStack(
                "extra root pending while an even root is half consumed",
            ));
        }
        if self.one_even && self.solver.is_empty() {
            return Err(MeshKineticError::InconsistentRootStack(
                "even root half consumed on an empty stack",
            ));
        }
        Ok(())
    }
}

/// Kernel decorator whose root stacks are [`DegenerateRootStack`]s.
///
/// Everything except the root-stack factory is delegated to the wrapped
/// kernel.
#[derive(Clone, Debug, Default)]
pub struct HandleDegeneracyKernel<K> {
    inner: K,
}

impl<K: FunctionKernel> HandleDegeneracyKernel<K> {
    pub fn new(inner: K) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &K {
        &self.inner
    }

    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<K: FunctionKernel> FunctionKernel for HandleDegeneracyKernel<K> {
    type Function = K::Function;
    type Root = K::Root;
    type RootStack = DegenerateRootStack<K>;
    type IsEvenMultiplicity = K::IsEvenMultiplicity;

    fn root_stack(&self, f: &K::Function, lb: &K::Root, ub: &K::Root) -> Self::RootStack {
        DegenerateRootStack::new(f, lb, ub, &self.inner)
    }

    fn is_even_multiplicity(&self, f: &K::Function) -> Self::IsEvenMultiplicity {
        self.inner.is_even_multiplicity(f)
    }

    fn sign_between_roots(&self, lb: &K::Root, ub: &K::Root, f: &K::Function) -> Sign {
        self.inner.sign_between_roots(lb, ub, f)
    }
}
