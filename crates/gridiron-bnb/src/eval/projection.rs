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

//! # Per-Slot Projection Bound
//!
//! The engine's admissible bound. For each unfilled slot it takes the
//! highest-projection candidate that is still eligible, unused,
//! salary-feasible, and team-cap-feasible against the *current* aggregates,
//! and sums those optimistic picks.
//!
//! This is a relaxation: the same candidate may be counted for two different
//! unfilled slots, and the salary-cap interaction between future picks is
//! ignored. Both properties can only inflate the estimate, which is exactly
//! what makes it an upper bound. The per-slot lookup scans the eligibility
//! list the model sorted by descending projection, so the typical cost is
//! one probe per unfilled slot.

use crate::{eval::BoundEvaluator, state::SearchState};
use gridiron_model::{index::SlotIndex, model::LineupModel, points::Points};

/// The admissible per-slot relaxation bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionBound;

impl ProjectionBound {
    /// Creates a new projection bound.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl BoundEvaluator for ProjectionBound {
    fn name(&self) -> &str {
        "ProjectionBound"
    }

    fn estimate_remaining(&mut self, model: &LineupModel, state: &SearchState) -> Option<Points> {
        let mut total = Points::ZERO;

        for slot_index in state.num_filled()..model.num_slots() {
            let slot = SlotIndex::new(slot_index);
            let mut best: Option<Points> = None;

            for &candidate in model.eligible_candidates(slot) {
                if state.is_used(candidate) {
                    continue;
                }
                if state.used_salary() + model.salary(candidate) > model.salary_cap() {
                    continue;
                }
                if let Some(cap) = model.max_per_team() {
                    if state.team_count(model.team(candidate)) >= cap {
                        continue;
                    }
                }
                // The list is sorted by descending projection, so the first
                // feasible candidate is the best one.
                best = Some(model.points(candidate));
                break;
            }

            total = total.saturating_add(best?);
        }

        Some(total)
    }
}
