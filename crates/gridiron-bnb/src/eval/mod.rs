// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Bound evaluation for the branch-and-bound engine.
//!
//! `BoundEvaluator` decouples the solver from a particular bounding
//! strategy. The solver calls `upper_bound` at every node before expanding
//! its children and prunes the branch when no completion can beat the
//! incumbent. `None` represents an infeasible branch: some unfilled slot has
//! no remaining candidate at all.

use crate::state::SearchState;
use gridiron_model::{model::LineupModel, points::Points};

pub mod projection;
pub mod unbounded;

pub use projection::ProjectionBound;
pub use unbounded::UnboundedEvaluator;

/// A strategy for bounding the best achievable completion of a partial
/// assignment.
///
/// Implementations must be **admissible**: `estimate_remaining` may never
/// underestimate the projection the unfilled slots can still contribute.
/// Overestimates only cost search time; an underestimate would let the
/// solver prune an optimal branch.
pub trait BoundEvaluator {
    /// Returns the name of the bound evaluator.
    fn name(&self) -> &str;

    /// Computes an optimistic estimate of the projection the unfilled slots
    /// can still contribute, or `None` if some unfilled slot has no feasible
    /// candidate left.
    fn estimate_remaining(&mut self, model: &LineupModel, state: &SearchState) -> Option<Points>;

    /// Computes the total upper bound for the current branch: the projection
    /// already banked plus the optimistic remainder.
    ///
    /// Returns `None` if the branch is infeasible.
    fn upper_bound(&mut self, model: &LineupModel, state: &SearchState) -> Option<Points> {
        let remaining = self.estimate_remaining(model, state)?;
        Some(state.total_points().saturating_add(remaining))
    }
}

impl std::fmt::Debug for dyn BoundEvaluator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundEvaluator({})", self.name())
    }
}

impl std::fmt::Display for dyn BoundEvaluator + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoundEvaluator({})", self.name())
    }
}
