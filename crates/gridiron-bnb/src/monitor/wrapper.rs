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

//! Adapts a generic `SearchMonitor` (deadline, step budget, interrupt,
//! composite) into the engine's `TreeSearchMonitor` interface. The
//! tree-level hooks the generic layer does not know about stay no-ops.

use crate::{monitor::TreeSearchMonitor, state::SearchState, stats::BnbSolverStatistics};
use gridiron_model::{model::LineupModel, solution::Lineup};
use gridiron_search::monitor::search_monitor::{SearchCommand, SearchMonitor};

/// Wraps a generic search monitor as a tree-search monitor.
#[derive(Debug)]
pub struct MonitorWrapper<S> {
    inner: S,
}

impl<S> MonitorWrapper<S>
where
    S: SearchMonitor,
{
    /// Wraps the given monitor.
    #[inline]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Unwraps the inner monitor.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> TreeSearchMonitor for MonitorWrapper<S>
where
    S: SearchMonitor,
{
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn on_enter_search(&mut self, model: &LineupModel, _stats: &BnbSolverStatistics) {
        self.inner.on_enter_search(model);
    }

    fn on_exit_search(&mut self, _stats: &BnbSolverStatistics) {
        self.inner.on_exit_search();
    }

    #[inline(always)]
    fn on_step(&mut self, _state: &SearchState, _stats: &BnbSolverStatistics) {
        self.inner.on_step();
    }

    fn on_solution_found(&mut self, lineup: &Lineup, _stats: &BnbSolverStatistics) {
        self.inner.on_solution_found(lineup);
    }

    #[inline(always)]
    fn search_command(&self, _state: &SearchState, _stats: &BnbSolverStatistics) -> SearchCommand {
        self.inner.search_command()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_model::roster::{Candidate, Position, RosterConfig, SlotSpec};
    use gridiron_search::monitor::node_limit::NodeLimitMonitor;

    #[test]
    fn test_wrapper_delegates_steps_and_command() {
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
        let stats = BnbSolverStatistics::default();

        let mut wrapper = MonitorWrapper::new(NodeLimitMonitor::new(2));
        assert_eq!(wrapper.name(), "NodeLimitMonitor");
        wrapper.on_enter_search(&model, &stats);

        assert_eq!(
            wrapper.search_command(&state, &stats),
            SearchCommand::Continue
        );
        wrapper.on_step(&state, &stats);
        wrapper.on_step(&state, &stats);
        assert!(matches!(
            wrapper.search_command(&state, &stats),
            SearchCommand::Terminate(_)
        ));
        assert_eq!(wrapper.into_inner().steps(), 2);
    }
}
