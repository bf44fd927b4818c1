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

//! Progress-table logging monitor.
//!
//! Prints a periodic, fixed-width progress line with the search's vital
//! signs. Clock reads are throttled with a step bitmask so the monitor adds
//! no measurable overhead to full-speed solves.

use crate::{monitor::TreeSearchMonitor, state::SearchState, stats::BnbSolverStatistics};
use gridiron_model::{model::LineupModel, points::Points, solution::Lineup};
use std::time::{Duration, Instant};

/// A monitor that prints a progress table while the search runs.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_points: Option<Points>,
}

impl LogMonitor {
    /// Creates a monitor that logs at most once per `log_interval`, probing
    /// the clock whenever `steps & clock_check_mask == 0`.
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best_points: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<12} | {:<10} | {:<14}",
            "Elapsed", "Nodes", "Depth", "Best Points", "Used Salary", "Backtracks", "Pruned (Bound)"
        );
        println!("{}", "-".repeat(96));
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_points_str = match self.best_points {
            Some(points) => format!("{points}"),
            None => "-".to_string(),
        };

        println!(
            "{:<9} | {:<14} | {:<7} | {:<14} | {:<12} | {:<10} | {:<14}",
            format!("{:.1}s", elapsed),
            stats.nodes_explored,
            state.num_filled(),
            best_points_str,
            state.used_salary(),
            stats.backtracks,
            stats.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, model: &LineupModel, _stats: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_points = None;
        println!(
            "Searching {} slots over {} candidates (search space {})",
            model.num_slots(),
            model.num_candidates(),
            model.complexity()
        );
        self.print_header();
    }

    fn on_exit_search(&mut self, stats: &BnbSolverStatistics) {
        println!("{stats}");
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState, stats: &BnbSolverStatistics) {
        if stats.steps & self.clock_check_mask != 0 {
            return;
        }
        if self.last_log_time.elapsed() >= self.log_interval {
            self.log_line(state, stats);
        }
    }

    fn on_solution_found(&mut self, lineup: &Lineup, _stats: &BnbSolverStatistics) {
        self.best_points = Some(lineup.total_points());
    }
}
