//! Geometry utilities for mesh-kinetic.
//!
//! This module provides vector helpers, the bounded-sphere predicate used by
//! Delaunay relaxation, and basic triangle quality metrics.

pub mod predicates;
pub mod quality;
pub mod vector;

pub use vector::Point3;
