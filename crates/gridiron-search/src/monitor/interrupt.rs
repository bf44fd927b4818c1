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

//! External interrupt monitor: terminates the search when a shared flag is
//! raised. Parallel workers share one flag so a deadline hit in any worker
//! stops the whole fleet.

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use gridiron_model::{model::LineupModel, solution::Lineup};
use std::sync::atomic::{AtomicBool, Ordering};

/// A monitor that terminates the search when the shared stop flag is set.
#[derive(Debug)]
pub struct InterruptMonitor<'a> {
    stop: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    /// Creates a monitor watching the given stop flag.
    #[inline]
    pub fn new(stop: &'a AtomicBool) -> Self {
        Self { stop }
    }
}

impl SearchMonitor for InterruptMonitor<'_> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _model: &LineupModel) {}

    fn on_exit_search(&mut self) {}

    fn on_solution_found(&mut self, _lineup: &Lineup) {}

    #[inline(always)]
    fn on_step(&mut self) {}

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.stop.load(Ordering::Relaxed) {
            return SearchCommand::Terminate("external interrupt".to_string());
        }
        SearchCommand::Continue
    }
}
