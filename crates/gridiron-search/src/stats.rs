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

/// Statistics collected during the solving process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatistics {
    /// Number of incumbent improvements found during the solving process.
    pub solutions_found: u64,
    /// Number of search steps (node visits) across all workers.
    pub steps: u64,
    /// Number of threads used during the solving process.
    pub used_threads: usize,
    /// Roster slots that hit dead ends during an exhaustive search. Empty
    /// unless infeasibility was proven; these are the binding constraints.
    pub unfillable_slots: Vec<String>,
    /// Total duration of the solving process.
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Solutions Found: {}", self.solutions_found)?;
        writeln!(f, "  Steps: {}", self.steps)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        if !self.unfillable_slots.is_empty() {
            writeln!(f, "  Unfillable Slots: {}", self.unfillable_slots.join(", "))?;
        }
        writeln!(
            f,
            "  Solve Duration (secs): {:.3}",
            self.solve_duration.as_secs_f64()
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatisticsBuilder {
    statistics: SolverStatistics,
}

impl SolverStatisticsBuilder {
    /// Creates a new builder with zeroed statistics and one thread.
    #[inline]
    pub fn new() -> Self {
        Self {
            statistics: SolverStatistics {
                used_threads: 1,
                ..SolverStatistics::default()
            },
        }
    }

    /// Sets the number of incumbent improvements found.
    #[inline]
    pub fn solutions_found(mut self, solutions_found: u64) -> Self {
        self.statistics.solutions_found = solutions_found;
        self
    }

    /// Sets the number of search steps.
    #[inline]
    pub fn steps(mut self, steps: u64) -> Self {
        self.statistics.steps = steps;
        self
    }

    /// Sets the number of threads used.
    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.statistics.used_threads = used_threads;
        self
    }

    /// Sets the binding-slot diagnostics of a proven-infeasible run.
    #[inline]
    pub fn unfillable_slots(mut self, unfillable_slots: Vec<String>) -> Self {
        self.statistics.unfillable_slots = unfillable_slots;
        self
    }

    /// Sets the total solve duration.
    #[inline]
    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.statistics.solve_duration = solve_duration;
        self
    }

    /// Builds the `SolverStatistics` instance.
    #[inline]
    pub fn build(self) -> SolverStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builder_defaults() {
        let stats = SolverStatisticsBuilder::new().build();
        assert_eq!(stats.solutions_found, 0);
        assert_eq!(stats.used_threads, 1);
        assert!(stats.unfillable_slots.is_empty());
        assert_eq!(stats.solve_duration, Duration::ZERO);
    }

    #[test]
    fn test_builder_sets_fields() {
        let stats = SolverStatisticsBuilder::new()
            .solutions_found(3)
            .steps(1_234)
            .used_threads(4)
            .unfillable_slots(vec!["QB".to_string()])
            .solve_duration(Duration::from_millis(250))
            .build();
        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.steps, 1_234);
        assert_eq!(stats.used_threads, 4);
        assert_eq!(stats.unfillable_slots, vec!["QB".to_string()]);
        assert_eq!(stats.solve_duration, Duration::from_millis(250));
    }

    #[test]
    fn test_display_mentions_unfillable_slots_only_when_present() {
        let stats = SolverStatisticsBuilder::new().build();
        assert!(!format!("{stats}").contains("Unfillable"));

        let stats = SolverStatisticsBuilder::new()
            .unfillable_slots(vec!["QB".to_string(), "FLEX".to_string()])
            .build();
        assert!(format!("{stats}").contains("Unfillable Slots: QB, FLEX"));
    }
}
