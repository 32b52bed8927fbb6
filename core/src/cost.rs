//! Cost algebras and edge cost evaluators.
//!
//! An algebra supplies zero, addition and a total order over a cost type so
//! the engines stay generic over integers, floats or custom semirings.
//! `add` must be associative and monotone under `compare`
//! (`a <= b` implies `a + c <= b + c`).

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::graph::{EdgeId, Graph, Relationship};
use crate::view::Direction;

pub trait CostAlgebra {
    type Cost: Clone + Debug;

    fn zero() -> Self::Cost;

    fn add(a: &Self::Cost, b: &Self::Cost) -> Self::Cost;

    fn compare(a: &Self::Cost, b: &Self::Cost) -> Ordering;

    /// Whether `cost` orders below zero.
    fn is_negative(cost: &Self::Cost) -> bool {
        Self::compare(cost, &Self::zero()) == Ordering::Less
    }
}

/// Unit-increment hop counts. Fixed algebra of the BFS engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct HopAlgebra;

impl CostAlgebra for HopAlgebra {
    type Cost = u32;

    fn zero() -> u32 {
        0
    }

    fn add(a: &u32, b: &u32) -> u32 {
        a.saturating_add(*b)
    }

    fn compare(a: &u32, b: &u32) -> Ordering {
        a.cmp(b)
    }
}

/// Signed integer costs. Addition saturates instead of wrapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerAlgebra;

impl CostAlgebra for IntegerAlgebra {
    type Cost = i64;

    fn zero() -> i64 {
        0
    }

    fn add(a: &i64, b: &i64) -> i64 {
        a.saturating_add(*b)
    }

    fn compare(a: &i64, b: &i64) -> Ordering {
        a.cmp(b)
    }
}

/// Floating-point costs.
///
/// Ordinary values compare numerically (so `-0.0 == 0.0`); NaN falls back to
/// IEEE total ordering. NaN edge costs are rejected like negative ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatAlgebra;

impl CostAlgebra for FloatAlgebra {
    type Cost = f64;

    fn zero() -> f64 {
        0.0
    }

    fn add(a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn compare(a: &f64, b: &f64) -> Ordering {
        a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
    }

    fn is_negative(cost: &f64) -> bool {
        cost.is_nan() || *cost < 0.0
    }
}

/// Maps a traversed relationship to its cost.
///
/// Must be a pure function of its inputs: the engine may ask for the same
/// edge more than once across relaxation attempts.
pub trait CostEvaluator<R, C> {
    fn cost(&self, relationship: R, direction: Direction) -> C;
}

impl<R, C, F> CostEvaluator<R, C> for F
where
    F: Fn(R, Direction) -> C,
{
    fn cost(&self, relationship: R, direction: Direction) -> C {
        self(relationship, direction)
    }
}

/// Every edge costs one.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCost;

impl<R> CostEvaluator<R, u32> for UnitCost {
    fn cost(&self, _: R, _: Direction) -> u32 {
        1
    }
}

impl<R> CostEvaluator<R, i64> for UnitCost {
    fn cost(&self, _: R, _: Direction) -> i64 {
        1
    }
}

impl<R> CostEvaluator<R, f64> for UnitCost {
    fn cost(&self, _: R, _: Direction) -> f64 {
        1.0
    }
}

/// Reads the stored `weight` of a [`Graph`] relationship, regardless of
/// traversal direction.
#[derive(Clone, Copy)]
pub struct EdgeWeight<'g>(pub &'g Graph);

impl CostEvaluator<EdgeId, f64> for EdgeWeight<'_> {
    fn cost(&self, relationship: EdgeId, _: Direction) -> f64 {
        self.0
            .relationship(relationship)
            .map(|r| r.weight)
            .unwrap_or(Relationship::DEFAULT_WEIGHT)
    }
}
