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

use crate::monitor::TreeSearchMonitor;

/// A monitor that observes nothing and never terminates the search. The
/// default choice for silent, full-speed solves.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOperationMonitor;

impl NoOperationMonitor {
    /// Creates a new no-op monitor.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl TreeSearchMonitor for NoOperationMonitor {
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::SearchState, stats::BnbSolverStatistics};
    use gridiron_model::{
        model::LineupModel,
        roster::{Candidate, Position, RosterConfig, SlotSpec},
    };
    use gridiron_search::monitor::search_monitor::SearchCommand;

    #[test]
    fn test_never_terminates() {
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

        let monitor = NoOperationMonitor::new();
        assert_eq!(monitor.name(), "NoOperationMonitor");
        assert_eq!(
            monitor.search_command(&state, &stats),
            SearchCommand::Continue
        );
    }
}
