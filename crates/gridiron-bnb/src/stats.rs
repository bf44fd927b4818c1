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

use gridiron_model::index::SlotIndex;

/// Counters collected by one branch-and-bound search session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BnbSolverStatistics {
    /// Number of search steps (loop iterations).
    pub steps: u64,
    /// Number of nodes entered via a decision.
    pub nodes_explored: u64,
    /// Number of candidate decisions generated.
    pub decisions_generated: u64,
    /// Branches pruned because their bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Branches pruned because a slot had no feasible candidate left.
    pub prunings_infeasible: u64,
    /// Branches pruned because a stack/bring-back rule became unsatisfiable.
    pub prunings_correlation: u64,
    /// Number of backtracks.
    pub backtracks: u64,
    /// Number of incumbent improvements found by this session.
    pub solutions_found: u64,
    /// The deepest assignment reached.
    pub max_depth: u64,

    dead_ends: Vec<u64>,
    total_time: std::time::Duration,
}

impl BnbSolverStatistics {
    /// Sizes the per-slot dead-end histogram. Idempotent.
    #[inline]
    pub fn ensure_slots(&mut self, num_slots: usize) {
        if self.dead_ends.len() < num_slots {
            self.dead_ends.resize(num_slots, 0);
        }
    }

    /// The per-slot dead-end histogram, indexed by slot.
    #[inline]
    pub fn dead_ends(&self) -> &[u64] {
        &self.dead_ends
    }

    /// The total wall-clock time of the session.
    #[inline]
    pub fn total_time(&self) -> std::time::Duration {
        self.total_time
    }

    #[inline(always)]
    pub fn on_step(&mut self) {
        self.steps += 1;
    }

    #[inline(always)]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored += 1;
    }

    #[inline(always)]
    pub fn on_decision_generated(&mut self) {
        self.decisions_generated += 1;
    }

    #[inline(always)]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound += 1;
    }

    #[inline(always)]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible += 1;
    }

    #[inline(always)]
    pub fn on_pruning_correlation(&mut self) {
        self.prunings_correlation += 1;
    }

    #[inline(always)]
    pub fn on_backtrack(&mut self) {
        self.backtracks += 1;
    }

    #[inline(always)]
    pub fn on_solution_found(&mut self) {
        self.solutions_found += 1;
    }

    #[inline(always)]
    pub fn on_depth_update(&mut self, depth: u64) {
        if depth > self.max_depth {
            self.max_depth = depth;
        }
    }

    /// Records a dead end at the given slot.
    #[inline]
    pub fn on_dead_end(&mut self, slot: SlotIndex) {
        debug_assert!(
            slot.get() < self.dead_ends.len(),
            "called `BnbSolverStatistics::on_dead_end` with slot index out of bounds: the len is {} but the index is {}",
            self.dead_ends.len(),
            slot.get()
        );
        self.dead_ends[slot.get()] += 1;
    }

    /// Records the total session duration.
    #[inline]
    pub fn set_total_time(&mut self, total_time: std::time::Duration) {
        self.total_time = total_time;
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Branch-and-Bound Statistics:")?;
        writeln!(f, "  Steps: {}", self.steps)?;
        writeln!(f, "  Nodes Explored: {}", self.nodes_explored)?;
        writeln!(f, "  Decisions Generated: {}", self.decisions_generated)?;
        writeln!(f, "  Pruned (Bound): {}", self.prunings_bound)?;
        writeln!(f, "  Pruned (Infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Pruned (Correlation): {}", self.prunings_correlation)?;
        writeln!(f, "  Backtracks: {}", self.backtracks)?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(
            f,
            "  Total Time (secs): {:.3}",
            self.total_time.as_secs_f64()
        )
    }
}
