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

//! Step-budget monitor: terminates the search after a fixed number of
//! search steps. Unlike a wall-clock deadline this budget is deterministic,
//! which makes truncated runs reproducible.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use gridiron_model::{model::LineupModel, solution::Lineup};

/// A monitor that terminates the search after `budget` steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    budget: u64,
    steps: u64,
}

impl NodeLimitMonitor {
    /// Creates a monitor with the given step budget.
    #[inline]
    pub fn new(budget: u64) -> Self {
        Self { budget, steps: 0 }
    }

    /// Returns the number of steps observed so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl SearchMonitor for NodeLimitMonitor {
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &LineupModel) {
        self.steps = 0;
    }

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _lineup: &Lineup) {}

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.steps >= self.budget {
            return SearchCommand::Terminate("step budget exhausted".to_string());
        }
        SearchCommand::Continue
    }
}
