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

//! Tree-search monitors: the engine-level observation layer.
//!
//! Where `gridiron_search::monitor` carries generic termination signals,
//! these monitors see the search tree itself: descents, backtracks, prune
//! reasons, and computed bounds. `MonitorWrapper` adapts any generic search
//! monitor into this richer interface, which is how deadline and interrupt
//! monitors reach the engine.

use crate::{decision::Decision, state::SearchState, stats::BnbSolverStatistics};
use gridiron_model::{model::LineupModel, points::Points, solution::Lineup};
use gridiron_search::monitor::search_monitor::SearchCommand;

pub mod log;
pub mod no_op;
pub mod wrapper;

pub use log::LogMonitor;
pub use no_op::NoOperationMonitor;
pub use wrapper::MonitorWrapper;

/// Why a branch was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneReason {
    /// The branch's upper bound cannot beat the incumbent.
    BoundDominated,
    /// A slot has no feasible candidate left.
    Infeasible,
    /// A stack/bring-back rule can no longer be satisfied in this branch.
    CorrelationUnsatisfiable,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::CorrelationUnsatisfiable => write!(f, "CorrelationUnsatisfiable"),
        }
    }
}

/// Observes a branch-and-bound session.
///
/// Every hook has a no-op default so implementations only override what
/// they care about; `search_command` defaults to `Continue`.
pub trait TreeSearchMonitor {
    /// A short human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Called once before the session starts exploring.
    fn on_enter_search(&mut self, _model: &LineupModel, _stats: &BnbSolverStatistics) {}

    /// Called once after the session has terminated.
    fn on_exit_search(&mut self, _stats: &BnbSolverStatistics) {}

    /// Called on every search step.
    fn on_step(&mut self, _state: &SearchState, _stats: &BnbSolverStatistics) {}

    /// Called after a decision was applied and the search descended.
    fn on_descend(
        &mut self,
        _state: &SearchState,
        _decision: Decision,
        _stats: &BnbSolverStatistics,
    ) {
    }

    /// Called after the search backtracked out of a node.
    fn on_backtrack(&mut self, _state: &SearchState, _stats: &BnbSolverStatistics) {}

    /// Called when a branch is abandoned.
    fn on_prune(
        &mut self,
        _state: &SearchState,
        _reason: PruneReason,
        _stats: &BnbSolverStatistics,
    ) {
    }

    /// Called after the bound evaluator produced an upper bound for a node.
    fn on_bound_computed(
        &mut self,
        _state: &SearchState,
        _bound: Points,
        _stats: &BnbSolverStatistics,
    ) {
    }

    /// Called whenever the session improves its best lineup.
    fn on_solution_found(&mut self, _lineup: &Lineup, _stats: &BnbSolverStatistics) {}

    /// Polled once per step; returning `Terminate` aborts the session.
    fn search_command(&self, _state: &SearchState, _stats: &BnbSolverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
