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

use crate::stats::SolverStatistics;
use gridiron_model::solution::Lineup;

/// The qualitative result of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// We have proven that no feasible lineup exists.
    Infeasible,
    /// We have found a lineup and proven its optimality.
    Optimal(Lineup),
    /// We have found a feasible lineup, but not proven its optimality.
    Feasible(Lineup),
    /// The solver terminated without finding a lineup and without proving
    /// infeasibility.
    Unknown,
}

impl std::fmt::Display for SolverResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(lineup) => {
                write!(f, "Optimal(points={})", lineup.total_points())
            }
            SolverResult::Feasible(lineup) => {
                write!(f, "Feasible(points={})", lineup.total_points())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the solver stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a lineup.
    OptimalityProven,
    /// The solver proved that no feasible lineup exists.
    InfeasibilityProven,
    /// The solver aborted due to a search limit (time, steps, interrupt).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The complete outcome of a solve: the result, the termination reason, and
/// run statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    result: SolverResult,
    reason: TerminationReason,
    statistics: SolverStatistics,
}

impl SolverOutcome {
    /// An optimality-proven outcome.
    #[inline]
    pub fn optimal(lineup: Lineup, statistics: SolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(lineup),
            reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// A best-effort outcome: a feasible lineup without an optimality proof.
    #[inline]
    pub fn feasible<R>(lineup: Lineup, reason: R, statistics: SolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Feasible(lineup),
            reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// A proven-infeasible outcome.
    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// An aborted outcome with no lineup found.
    #[inline]
    pub fn unknown<R>(reason: R, statistics: SolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Unknown,
            reason: TerminationReason::Aborted(reason.into()),
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
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    /// Returns the run statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Whether the outcome carries a proven-optimal lineup.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    /// Whether the outcome carries a feasible (unproven) lineup.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    /// Whether the outcome is proven infeasible.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    /// Whether the outcome carries any lineup at all.
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

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverOutcome(result: {}, reason: {})",
            self.result, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_model::{
        index::CandidateIndex,
        model::LineupModel,
        roster::{Candidate, Position, RosterConfig, SlotSpec},
    };

    fn lineup() -> Lineup {
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
        Lineup::from_assignment(&model, &[CandidateIndex::new(0)])
    }

    #[test]
    fn test_optimal_outcome() {
        let outcome = SolverOutcome::optimal(lineup(), SolverStatistics::default());
        assert!(outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(outcome.reason(), &TerminationReason::OptimalityProven);
        assert!(outcome.lineup().is_some());
    }

    #[test]
    fn test_feasible_outcome_records_reason() {
        let outcome = SolverOutcome::feasible(
            lineup(),
            "time limit reached",
            SolverStatistics::default(),
        );
        assert!(outcome.is_feasible());
        assert!(!outcome.is_optimal());
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("time limit reached".to_string())
        );
    }

    #[test]
    fn test_infeasible_and_unknown_carry_no_lineup() {
        let infeasible = SolverOutcome::infeasible(SolverStatistics::default());
        assert!(infeasible.is_infeasible());
        assert!(infeasible.lineup().is_none());

        let unknown = SolverOutcome::unknown("interrupted", SolverStatistics::default());
        assert!(!unknown.has_solution());
        assert!(unknown.lineup().is_none());
    }

    #[test]
    fn test_display() {
        let outcome = SolverOutcome::infeasible(SolverStatistics::default());
        assert_eq!(
            format!("{outcome}"),
            "SolverOutcome(result: Infeasible, reason: Infeasibility Proven)"
        );
    }
}
