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

use crate::stats::BnbSolverStatistics;
use gridiron_model::solution::Lineup;
use gridiron_search::result::SolverResult;

/// Why a branch-and-bound session stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BnbTerminationReason {
    /// The session exhausted its subtree with an incumbent in hand.
    OptimalityProven,
    /// The session exhausted its subtree without ever completing a lineup.
    InfeasibilityProven,
    /// A monitor terminated the session early.
    Aborted(String),
}

impl std::fmt::Display for BnbTerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BnbTerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            BnbTerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            BnbTerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The outcome of one branch-and-bound session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverOutcome {
    result: SolverResult,
    reason: BnbTerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    /// An exhausted session with an incumbent: the subtree optimum.
    #[inline]
    pub fn optimal(lineup: Lineup, statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(lineup),
            reason: BnbTerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// An exhausted session that never completed a lineup.
    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            reason: BnbTerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// A session terminated by a monitor, carrying its best-so-far lineup
    /// when one exists.
    #[inline]
    pub fn aborted<R>(
        lineup: Option<Lineup>,
        reason: R,
        statistics: BnbSolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match lineup {
            Some(lineup) => SolverResult::Feasible(lineup),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            reason: BnbTerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the qualitative result.
    #[inline]
    pub fn result(&self) -> &SolverResult {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn reason(&self) -> &BnbTerminationReason {
        &self.reason
    }

    /// Returns the session statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Whether this session proved its subtree's optimum.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    /// Whether this session carries any lineup.
    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolverResult::Optimal(_) | SolverResult::Feasible(_)
        )
    }

    /// Returns the carried lineup, if any.
    #[inline]
    pub fn lineup(&self) -> Option<&Lineup> {
        match &self.result {
            SolverResult::Optimal(lineup) | SolverResult::Feasible(lineup) => Some(lineup),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BnbSolverOutcome(result: {}, reason: {})",
            self.result, self.reason
        )
    }
}
