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

//! # Orchestrated Lineup Solver
//!
//! A high-level facade that runs the branch-and-bound engine serially or
//! across worker threads, manages a shared incumbent, and enforces global
//! termination criteria via pluggable monitors (time limit, step budget,
//! external interrupt).
//!
//! ## Parallel mode
//!
//! The parallel mode partitions the top-level branches of the first (most
//! constrained) slot round-robin across `N` workers. Each worker owns its
//! private search state and runs `solve_with_fixed_and_incumbent` per root
//! candidate: it only *reads* the shared incumbent bound for pruning and
//! *writes* through the incumbent's short critical section when it finds a
//! strictly better complete lineup. No other mutable state is shared.
//!
//! Because the engine keeps equal-bound branches alive and every install
//! goes through the deterministic lineup total order, an exhausted parallel
//! run returns exactly the lineup the serial run returns, regardless of
//! thread interleaving.

use gridiron_bnb::{
    bnb::{BnbSolver, FixedAssignment},
    eval::{ProjectionBound, UnboundedEvaluator},
    monitor::MonitorWrapper,
    result::{BnbSolverOutcome, BnbTerminationReason},
};
use gridiron_model::{
    index::{CandidateIndex, SlotIndex},
    model::LineupModel,
    solution::Lineup,
};
use gridiron_search::{
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor, node_limit::NodeLimitMonitor,
        time_limit::TimeLimitMonitor,
    },
    result::SolverOutcome,
    stats::SolverStatisticsBuilder,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// The high-level lineup solver.
///
/// Limits left unset here fall back to the model configuration's
/// `deadline_ms` and `workers` fields.
#[derive(Debug, Clone)]
pub struct Solver {
    workers: Option<usize>,
    deadline: Option<Duration>,
    node_budget: Option<u64>,
    use_bound: bool,
}

impl Solver {
    /// Solves the model and returns the aggregated outcome.
    pub fn solve(&self, model: &LineupModel) -> SolverOutcome {
        let start = Instant::now();
        let deadline = self
            .deadline
            .or(model.config().deadline_ms.map(Duration::from_millis));
        let workers = self
            .workers
            .or(model.config().workers)
            .unwrap_or(1)
            .max(1);

        if workers <= 1 {
            self.solve_serial(model, deadline, start)
        } else {
            self.solve_parallel(model, deadline, workers, start)
        }
    }

    fn solve_serial(
        &self,
        model: &LineupModel,
        deadline: Option<Duration>,
        start: Instant,
    ) -> SolverOutcome {
        let mut monitor = CompositeMonitor::new();
        if let Some(limit) = deadline {
            monitor.add_monitor(TimeLimitMonitor::new(limit));
        }
        if let Some(budget) = self.node_budget {
            monitor.add_monitor(NodeLimitMonitor::new(budget));
        }

        let mut solver = BnbSolver::new();
        let outcome = if self.use_bound {
            solver.solve(model, &mut ProjectionBound::new(), MonitorWrapper::new(monitor))
        } else {
            solver.solve(
                model,
                &mut UnboundedEvaluator::new(),
                MonitorWrapper::new(monitor),
            )
        };

        let unfillable = match outcome.reason() {
            BnbTerminationReason::InfeasibilityProven => {
                unfillable_slot_names(model, outcome.statistics().dead_ends())
            }
            _ => Vec::new(),
        };
        let statistics = SolverStatisticsBuilder::new()
            .solutions_found(outcome.statistics().solutions_found)
            .steps(outcome.statistics().steps)
            .used_threads(1)
            .unfillable_slots(unfillable)
            .solve_duration(start.elapsed())
            .build();

        match (outcome.reason().clone(), outcome.lineup().cloned()) {
            (BnbTerminationReason::OptimalityProven, Some(lineup)) => {
                SolverOutcome::optimal(lineup, statistics)
            }
            (BnbTerminationReason::Aborted(reason), Some(lineup)) => {
                SolverOutcome::feasible(lineup, reason, statistics)
            }
            (BnbTerminationReason::Aborted(reason), None) => {
                SolverOutcome::unknown(reason, statistics)
            }
            (_, _) => SolverOutcome::infeasible(statistics),
        }
    }

    fn solve_parallel(
        &self,
        model: &LineupModel,
        deadline: Option<Duration>,
        workers: usize,
        start: Instant,
    ) -> SolverOutcome {
        let first_slot = SlotIndex::new(0);
        let roots: Vec<CandidateIndex> = model.eligible_candidates(first_slot).to_vec();
        let incumbent = SharedIncumbent::new();
        let stop = AtomicBool::new(false);
        let node_budget = self.node_budget;
        let use_bound = self.use_bound;

        let reports: Vec<WorkerReport> = std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            for worker_index in 0..workers {
                let incumbent = &incumbent;
                let stop = &stop;
                let roots = &roots;
                handles.push(scope.spawn(move || {
                    run_worker(
                        model,
                        roots,
                        worker_index,
                        workers,
                        deadline,
                        start,
                        node_budget,
                        use_bound,
                        incumbent,
                        stop,
                    )
                }));
            }
            handles
                .into_iter()
                .map(|handle| handle.join().expect("solver worker thread panicked"))
                .collect()
        });

        let all_exhausted = reports.iter().all(|report| report.exhausted_all);
        let abort_reason = reports
            .iter()
            .find_map(|report| report.aborted.clone())
            .unwrap_or_else(|| "external interrupt".to_string());
        let best = incumbent.snapshot();

        let mut dead_ends = vec![0u64; model.num_slots()];
        for report in &reports {
            for (slot, count) in report.dead_ends.iter().enumerate() {
                dead_ends[slot] += count;
            }
        }
        let unfillable = if best.is_none() && all_exhausted {
            unfillable_slot_names(model, &dead_ends)
        } else {
            Vec::new()
        };

        let statistics = SolverStatisticsBuilder::new()
            .solutions_found(reports.iter().map(|r| r.solutions_found).sum())
            .steps(reports.iter().map(|r| r.steps).sum())
            .used_threads(workers)
            .unfillable_slots(unfillable)
            .solve_duration(start.elapsed())
            .build();

        match (best, all_exhausted) {
            (Some(lineup), true) => SolverOutcome::optimal(lineup, statistics),
            (Some(lineup), false) => SolverOutcome::feasible(lineup, abort_reason, statistics),
            (None, true) => SolverOutcome::infeasible(statistics),
            (None, false) => SolverOutcome::unknown(abort_reason, statistics),
        }
    }
}

/// What one worker brings back from its share of the root partition.
struct WorkerReport {
    aborted: Option<String>,
    solutions_found: u64,
    steps: u64,
    dead_ends: Vec<u64>,
    exhausted_all: bool,
}

#[allow(clippy::too_many_arguments)]
fn run_worker(
    model: &LineupModel,
    roots: &[CandidateIndex],
    worker_index: usize,
    workers: usize,
    deadline: Option<Duration>,
    start: Instant,
    node_budget: Option<u64>,
    use_bound: bool,
    incumbent: &SharedIncumbent,
    stop: &AtomicBool,
) -> WorkerReport {
    let first_slot = SlotIndex::new(0);
    let mut report = WorkerReport {
        aborted: None,
        solutions_found: 0,
        steps: 0,
        dead_ends: vec![0; model.num_slots()],
        exhausted_all: true,
    };
    let mut solver = BnbSolver::new();

    for root in (worker_index..roots.len()).step_by(workers) {
        if stop.load(Ordering::Relaxed) {
            report.aborted.get_or_insert("external interrupt".to_string());
            report.exhausted_all = false;
            break;
        }

        let mut monitor = CompositeMonitor::new();
        monitor.add_monitor(InterruptMonitor::new(stop));
        if let Some(limit) = deadline {
            match limit.checked_sub(start.elapsed()) {
                Some(remaining) if !remaining.is_zero() => {
                    monitor.add_monitor(TimeLimitMonitor::new(remaining));
                }
                _ => {
                    report.aborted.get_or_insert("time limit reached".to_string());
                    report.exhausted_all = false;
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
            }
        }
        if let Some(budget) = node_budget {
            monitor.add_monitor(NodeLimitMonitor::new(budget));
        }

        let fixed = [FixedAssignment::new(first_slot, roots[root])];
        let outcome = if use_bound {
            solver.solve_with_fixed_and_incumbent(
                model,
                &mut ProjectionBound::new(),
                MonitorWrapper::new(monitor),
                &fixed,
                incumbent,
            )
        } else {
            solver.solve_with_fixed_and_incumbent(
                model,
                &mut UnboundedEvaluator::new(),
                MonitorWrapper::new(monitor),
                &fixed,
                incumbent,
            )
        };

        merge_outcome(&mut report, &outcome);
        if let BnbTerminationReason::Aborted(reason) = outcome.reason() {
            report.aborted.get_or_insert(reason.clone());
            report.exhausted_all = false;
            // A wall-clock expiry is global; wind the other workers down.
            if reason.contains("time limit") {
                stop.store(true, Ordering::Relaxed);
            }
            if reason.contains("external interrupt") {
                break;
            }
        }
    }

    report
}

fn merge_outcome(report: &mut WorkerReport, outcome: &BnbSolverOutcome) {
    report.solutions_found += outcome.statistics().solutions_found;
    report.steps += outcome.statistics().steps;
    for (slot, &count) in outcome.statistics().dead_ends().iter().enumerate() {
        report.dead_ends[slot] += count;
    }
}

/// The names of the slots that hit dead ends, in slot order, deduplicated.
fn unfillable_slot_names(model: &LineupModel, dead_ends: &[u64]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (index, &count) in dead_ends.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let name = model.slot_name(SlotIndex::new(index)).to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Builder for the high-level `Solver`.
#[derive(Debug, Clone)]
pub struct SolverBuilder {
    workers: Option<usize>,
    deadline: Option<Duration>,
    node_budget: Option<u64>,
    use_bound: bool,
}

impl Default for SolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverBuilder {
    /// Creates a builder with no limits, bounding enabled, and limits
    /// otherwise sourced from the model configuration.
    #[inline]
    pub fn new() -> Self {
        Self {
            workers: None,
            deadline: None,
            node_budget: None,
            use_bound: true,
        }
    }

    /// Overrides the worker-thread count.
    #[inline]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Overrides the wall-clock deadline.
    #[inline]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deterministic step budget per search.
    #[inline]
    pub fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.node_budget = Some(node_budget);
        self
    }

    /// Disables bound pruning. The search still returns the same optimum,
    /// just slower; this switch exists for soundness testing.
    #[inline]
    pub fn without_bound(mut self) -> Self {
        self.use_bound = false;
        self
    }

    /// Builds the solver.
    #[inline]
    pub fn build(self) -> Solver {
        Solver {
            workers: self.workers,
            deadline: self.deadline,
            node_budget: self.node_budget,
            use_bound: self.use_bound,
        }
    }
}

/// Pretty-prints a lineup against its model for logs and examples.
pub fn describe_lineup(model: &LineupModel, lineup: &Lineup) -> String {
    let mut out = String::new();
    for (index, &candidate) in lineup.candidates().iter().enumerate() {
        let slot = SlotIndex::new(index);
        let record = model.candidate(candidate);
        out.push_str(&format!(
            "{:<6} {} ({}, {}) {} / {}\n",
            model.slot_name(slot),
            record.name,
            record.team,
            record.position,
            record.salary,
            record.projected_points,
        ));
    }
    out.push_str(&format!(
        "total salary {} / projection {}\n",
        lineup.total_salary(),
        lineup.total_points()
    ));
    out
}
