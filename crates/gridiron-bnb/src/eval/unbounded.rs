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

//! The trivial bound: every branch looks infinitely promising, so nothing
//! is ever pruned on bounds. Useless for performance, invaluable for
//! testing: a sound bound must never change which lineup the search finds,
//! only how fast it finds it, and comparing runs against this evaluator
//! asserts exactly that.

use crate::{eval::BoundEvaluator, state::SearchState};
use gridiron_model::{model::LineupModel, points::Points};

/// A bound evaluator that disables bound pruning entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundedEvaluator;

impl UnboundedEvaluator {
    /// Creates a new unbounded evaluator.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl BoundEvaluator for UnboundedEvaluator {
    fn name(&self) -> &str {
        "UnboundedEvaluator"
    }

    fn estimate_remaining(&mut self, _model: &LineupModel, _state: &SearchState) -> Option<Points> {
        Some(Points::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_model::roster::{Candidate, Position, RosterConfig, SlotSpec};

    #[test]
    fn test_always_saturates_to_max() {
        let pool = vec![Candidate::new(
            1,
            "A",
            "KC",
            "BUF",
            Position::Qb,
            8_000,
            24.0,
        )];
        let config = RosterConfig::new(
            8_000,
            vec![SlotSpec::new("QB", vec![Position::Qb], 1)],
        );
        let model = LineupModel::build(pool, config).unwrap();
        let state = SearchState::for_model(&model);
        let mut evaluator = UnboundedEvaluator::new();

        assert_eq!(
            evaluator.estimate_remaining(&model, &state),
            Some(Points::MAX)
        );
        assert_eq!(evaluator.upper_bound(&model, &state), Some(Points::MAX));
    }
}
