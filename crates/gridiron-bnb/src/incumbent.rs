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

//! The incumbent backing seam of the branch-and-bound solver.
//!
//! A search session keeps its own best lineup; the `IncumbentStore` decides
//! whether that best is also shared with other workers. `LocalIncumbent`
//! backs the standalone single-threaded solver; `SharedIncumbentAdapter`
//! connects a session to a `gridiron_search::SharedIncumbent` so parallel
//! workers tighten each other's pruning bound and compete to install the
//! globally best lineup.

use gridiron_model::solution::Lineup;
use gridiron_search::incumbent::SharedIncumbent;

/// The backing store a search session publishes incumbents to.
pub trait IncumbentStore {
    /// The objective bound (raw milli-points) the session should start
    /// from. `i64::MIN` means "no incumbent known yet."
    fn initial_points(&self) -> i64;

    /// Folds any externally known bound into `current`, returning the
    /// tighter (larger) of the two.
    fn tighten(&self, current: i64) -> i64;

    /// Offers a complete feasible lineup to the store.
    fn on_solution_found(&self, lineup: &Lineup);
}

/// A no-op store for standalone, single-threaded solves.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalIncumbent;

impl LocalIncumbent {
    /// Creates a new local store.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl IncumbentStore for LocalIncumbent {
    #[inline(always)]
    fn initial_points(&self) -> i64 {
        i64::MIN
    }

    #[inline(always)]
    fn tighten(&self, current: i64) -> i64 {
        current
    }

    #[inline(always)]
    fn on_solution_found(&self, _lineup: &Lineup) {}
}

/// Adapts a `SharedIncumbent` to the store seam for parallel solves.
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a> {
    inner: &'a SharedIncumbent,
}

impl<'a> SharedIncumbentAdapter<'a> {
    /// Creates an adapter around the shared incumbent.
    #[inline]
    pub fn new(inner: &'a SharedIncumbent) -> Self {
        Self { inner }
    }
}

impl IncumbentStore for SharedIncumbentAdapter<'_> {
    #[inline(always)]
    fn initial_points(&self) -> i64 {
        self.inner.best_points_raw()
    }

    #[inline(always)]
    fn tighten(&self, current: i64) -> i64 {
        current.max(self.inner.best_points_raw())
    }

    #[inline(always)]
    fn on_solution_found(&self, lineup: &Lineup) {
        self.inner.try_install(lineup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_model::{
        index::CandidateIndex,
        model::LineupModel,
        roster::{Candidate, Position, RosterConfig, SlotSpec},
    };

    fn lineup() -> Lineup {
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
        Lineup::from_assignment(&model, &[CandidateIndex::new(0)])
    }

    #[test]
    fn test_local_store_is_inert() {
        let store = LocalIncumbent::new();
        assert_eq!(store.initial_points(), i64::MIN);
        assert_eq!(store.tighten(42), 42);
        store.on_solution_found(&lineup());
    }

    #[test]
    fn test_shared_adapter_tightens_and_installs() {
        let shared = SharedIncumbent::new();
        let adapter = SharedIncumbentAdapter::new(&shared);

        assert_eq!(adapter.initial_points(), i64::MIN);
        assert_eq!(adapter.tighten(100), 100);

        adapter.on_solution_found(&lineup());
        assert_eq!(shared.best_points_raw(), 24_000);
        assert_eq!(adapter.initial_points(), 24_000);
        // A stale local bound tightens up to the shared one.
        assert_eq!(adapter.tighten(0), 24_000);
        assert_eq!(adapter.tighten(30_000), 30_000);
    }
}
