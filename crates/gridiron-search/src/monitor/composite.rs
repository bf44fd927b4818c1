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

//! Fan-out monitor: broadcasts every callback to a list of child monitors
//! and terminates as soon as any child requests it. The parallel facade
//! stacks an interrupt monitor, a deadline monitor, and a step-budget
//! monitor per worker through this type.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use gridiron_model::{model::LineupModel, solution::Lineup};

/// A monitor that delegates to an ordered list of child monitors.
#[derive(Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + Send + 'a>>,
}

impl<'a> CompositeMonitor<'a> {
    /// Creates an empty composite monitor.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a child monitor. Children are polled in insertion order.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + Send + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Returns the number of child monitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Whether this composite has no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl SearchMonitor for CompositeMonitor<'_> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, model: &LineupModel) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(model);
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search();
        }
    }

    fn on_solution_found(&mut self, lineup: &Lineup) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(lineup);
        }
    }

    #[inline(always)]
    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCommand(SearchCommand);

    impl SearchMonitor for FixedCommand {
        fn name(&self) -> &str {
            "FixedCommand"
        }
        fn on_enter_search(&mut self, _model: &LineupModel) {}
        fn on_exit_search(&mut self) {}
        fn on_solution_found(&mut self, _lineup: &Lineup) {}
        fn on_step(&mut self) {}
        fn search_command(&self) -> SearchCommand {
            self.0.clone()
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_first_terminate_wins() {
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(FixedCommand(SearchCommand::Continue));
        composite.add_monitor(FixedCommand(SearchCommand::Terminate("a".into())));
        composite.add_monitor(FixedCommand(SearchCommand::Terminate("b".into())));
        assert_eq!(composite.len(), 3);
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("a".into())
        );
    }

    #[test]
    fn test_all_continue() {
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(FixedCommand(SearchCommand::Continue));
        composite.add_monitor(FixedCommand(SearchCommand::Continue));
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }
}
