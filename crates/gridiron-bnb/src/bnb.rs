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

//! Branch-and-bound solver for salary-cap lineup optimization.
//!
//! This module implements a stateful search engine that explores feasible
//! candidate-to-slot assignments while pruning suboptimal branches using an
//! admissible bound and an incumbent lineup. The `BnbSolver` accepts fixed
//! assignments when solving partitions of the search space, which is how the
//! parallel facade splits the top-level branches across workers, and can
//! synchronize its incumbent with other solver instances through a shared
//! store.
//!
//! A search session object encapsulates per-run state, statistics, and
//! timing. Slots are explored in the model's static most-constrained-first
//! order and candidates in descending projection order, so strong incumbents
//! appear early and the bound starts pruning immediately. Branches whose
//! upper bound is *strictly below* the incumbent objective are abandoned;
//! equal-bound branches stay alive so that point ties resolve through the
//! deterministic (salary, id-tuple) order instead of through discovery
//! order. That rule is what makes serial and parallel runs return
//! byte-identical results.
//!
//! Stack and bring-back rules are verified at every leaf; in addition, a
//! branch is abandoned as soon as one of those rules becomes provably
//! unsatisfiable (the QB is fixed, the rule is still open, and either no
//! unfilled slot admits a pass catcher or no affordable one remains).

use crate::{
    decision::Decision,
    eval::BoundEvaluator,
    incumbent::{IncumbentStore, LocalIncumbent, SharedIncumbentAdapter},
    monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use gridiron_model::{
    index::{CandidateIndex, SlotIndex},
    model::LineupModel,
    roster::PositionSet,
    solution::Lineup,
};
use gridiron_search::{
    incumbent::SharedIncumbent, monitor::search_monitor::SearchCommand,
};
use smallvec::SmallVec;

/// Pins a candidate into a slot before the search starts.
///
/// Fixed assignments must target the slot-order prefix (slot `0`, then `1`,
/// and so on); the parallel facade uses a single root assignment per subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAssignment {
    /// The slot to pin.
    pub slot: SlotIndex,
    /// The candidate to pin into it.
    pub candidate: CandidateIndex,
}

impl FixedAssignment {
    /// Creates a new fixed assignment.
    #[inline]
    pub fn new(slot: SlotIndex, candidate: CandidateIndex) -> Self {
        Self { slot, candidate }
    }
}

/// An exact branch-and-bound solver over a `LineupModel`.
///
/// The solver itself is stateless between runs; each `solve` call creates a
/// fresh search session that owns the mutable search state.
#[derive(Debug, Clone, Copy, Default)]
pub struct BnbSolver;

impl BnbSolver {
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Solves the model as a standalone, single-threaded search.
    #[inline]
    pub fn solve<E, M>(
        &mut self,
        model: &LineupModel,
        evaluator: &mut E,
        monitor: M,
    ) -> BnbSolverOutcome
    where
        E: BoundEvaluator,
        M: TreeSearchMonitor,
    {
        self.solve_internal(model, &[], evaluator, monitor, LocalIncumbent::new())
    }

    /// Solves the model while synchronizing the best known lineup through a
    /// shared incumbent. The session reads the shared bound for pruning and
    /// offers every improvement it finds.
    #[inline]
    pub fn solve_with_incumbent<E, M>(
        &mut self,
        model: &LineupModel,
        evaluator: &mut E,
        monitor: M,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        E: BoundEvaluator,
        M: TreeSearchMonitor,
    {
        self.solve_internal(
            model,
            &[],
            evaluator,
            monitor,
            SharedIncumbentAdapter::new(incumbent),
        )
    }

    /// Solves the subtree obtained by pinning the given assignments into the
    /// slot-order prefix.
    #[inline]
    pub fn solve_with_fixed<E, M>(
        &mut self,
        model: &LineupModel,
        evaluator: &mut E,
        monitor: M,
        fixed: &[FixedAssignment],
    ) -> BnbSolverOutcome
    where
        E: BoundEvaluator,
        M: TreeSearchMonitor,
    {
        self.solve_internal(model, fixed, evaluator, monitor, LocalIncumbent::new())
    }

    /// Solves a pinned subtree while synchronizing through a shared
    /// incumbent. This is the worker entry point of the parallel mode.
    #[inline]
    pub fn solve_with_fixed_and_incumbent<E, M>(
        &mut self,
        model: &LineupModel,
        evaluator: &mut E,
        monitor: M,
        fixed: &[FixedAssignment],
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        E: BoundEvaluator,
        M: TreeSearchMonitor,
    {
        self.solve_internal(
            model,
            fixed,
            evaluator,
            monitor,
            SharedIncumbentAdapter::new(incumbent),
        )
    }

    #[inline(always)]
    fn solve_internal<E, M, I>(
        &mut self,
        model: &LineupModel,
        fixed: &[FixedAssignment],
        evaluator: &mut E,
        mut monitor: M,
        store: I,
    ) -> BnbSolverOutcome
    where
        E: BoundEvaluator,
        M: TreeSearchMonitor,
        I: IncumbentStore,
    {
        let session = BnbSearchSession::new(model, fixed, evaluator, &mut monitor, store);
        session.run()
    }
}

/// A search session: the per-run state of one branch-and-bound exploration.
struct BnbSearchSession<'a, E, M, I> {
    model: &'a LineupModel,
    fixed: &'a [FixedAssignment],
    evaluator: &'a mut E,
    monitor: &'a mut M,
    incumbent: I,
    state: SearchState,
    /// The rank chosen at each filled depth; consulted by the same-spec
    /// symmetry break.
    ranks: Vec<usize>,
    /// The session's pruning bound as raw milli-points.
    best_points: i64,
    best_lineup: Option<Lineup>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, E, M, I> BnbSearchSession<'a, E, M, I>
where
    E: BoundEvaluator,
    M: TreeSearchMonitor,
    I: IncumbentStore,
{
    fn new(
        model: &'a LineupModel,
        fixed: &'a [FixedAssignment],
        evaluator: &'a mut E,
        monitor: &'a mut M,
        incumbent: I,
    ) -> Self {
        let best_points = incumbent.initial_points();
        let mut stats = BnbSolverStatistics::default();
        stats.ensure_slots(model.num_slots());

        Self {
            model,
            fixed,
            evaluator,
            monitor,
            incumbent,
            state: SearchState::for_model(model),
            ranks: vec![0; model.num_slots()],
            best_points,
            best_lineup: None,
            stats,
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the session to completion (or termination) and builds the
    /// outcome.
    fn run(mut self) -> BnbSolverOutcome {
        self.monitor.on_enter_search(self.model, &self.stats);

        if !self.initialize() {
            return self.finish(Err(None));
        }

        let exploration = self.explore();
        self.finish(match exploration {
            Ok(()) => Ok(()),
            Err(reason) => Err(Some(reason)),
        })
    }

    /// Applies the fixed assignments. Returns `false` when the pinned
    /// subtree is structurally empty (ineligible, symmetry-excluded, or
    /// constraint-violating prefix).
    fn initialize(&mut self) -> bool {
        for (depth, fixed) in self.fixed.iter().enumerate() {
            debug_assert_eq!(
                fixed.slot.get(),
                depth,
                "fixed assignments must target the slot-order prefix"
            );

            let slot = fixed.slot;
            let rank = match self
                .model
                .eligible_candidates(slot)
                .iter()
                .position(|&c| c == fixed.candidate)
            {
                Some(rank) => rank,
                // Not eligible for this slot at all.
                None => return false,
            };

            // Same-spec symmetry: a fixed prefix must respect the strictly
            // increasing rank rule, or its subtree duplicates another one.
            if depth > 0
                && self.model.slot_spec(slot) == self.model.slot_spec(SlotIndex::new(depth - 1))
                && rank <= self.ranks[depth - 1]
            {
                return false;
            }

            if Decision::try_new(self.model, &self.state, slot, rank).is_none() {
                return false;
            }

            self.state.apply(self.model, fixed.candidate);
            self.ranks[depth] = rank;
            self.stats.on_node_explored();
            self.stats.on_depth_update(self.state.num_filled() as u64);
        }
        true
    }

    /// The recursive depth-first exploration. `Err` carries the monitor's
    /// termination reason.
    fn explore(&mut self) -> Result<(), String> {
        self.best_points = self.incumbent.tighten(self.best_points);
        self.stats.on_step();
        self.monitor.on_step(&self.state, &self.stats);
        if let SearchCommand::Terminate(reason) =
            self.monitor.search_command(&self.state, &self.stats)
        {
            return Err(reason);
        }

        if self.state.is_complete() {
            self.handle_complete_solution();
            return Ok(());
        }

        if !self.correlation_feasible() {
            self.stats.on_pruning_correlation();
            self.monitor.on_prune(
                &self.state,
                PruneReason::CorrelationUnsatisfiable,
                &self.stats,
            );
            return Ok(());
        }

        // Bound check before expanding any children.
        match self.evaluator.upper_bound(self.model, &self.state) {
            None => {
                let slot = self.first_unfillable_slot();
                self.stats.on_dead_end(slot);
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
                return Ok(());
            }
            Some(bound) => {
                self.monitor.on_bound_computed(&self.state, bound, &self.stats);
                if bound.raw() < self.best_points {
                    self.stats.on_pruning_bound();
                    self.monitor
                        .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
                    return Ok(());
                }
            }
        }

        let slot = self.state.next_slot();
        let start_rank = self.start_rank(slot);
        let mut decisions: SmallVec<[Decision; 32]> = SmallVec::new();
        for rank in start_rank..self.model.eligible_candidates(slot).len() {
            if let Some(decision) = Decision::try_new(self.model, &self.state, slot, rank) {
                decisions.push(decision);
                self.stats.on_decision_generated();
            }
        }

        if decisions.is_empty() {
            self.stats.on_dead_end(slot);
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
            return Ok(());
        }

        for decision in decisions {
            let depth = self.state.num_filled();
            let token = self.state.apply(self.model, decision.candidate());
            self.ranks[depth] = decision.rank();
            self.stats.on_node_explored();
            self.stats.on_depth_update(self.state.num_filled() as u64);
            self.monitor.on_descend(&self.state, decision, &self.stats);

            let result = self.explore();

            self.state.undo(self.model, token);
            self.stats.on_backtrack();
            self.monitor.on_backtrack(&self.state, &self.stats);

            result?;
        }

        Ok(())
    }

    /// The first rank the next slot may take: strictly past the previous
    /// instance's rank when both slots expand the same spec.
    #[inline]
    fn start_rank(&self, slot: SlotIndex) -> usize {
        let depth = slot.get();
        if depth > 0
            && self.model.slot_spec(slot) == self.model.slot_spec(SlotIndex::new(depth - 1))
        {
            self.ranks[depth - 1] + 1
        } else {
            0
        }
    }

    /// Leaf handling: verify the correlation rules, then offer the lineup to
    /// the incumbent.
    fn handle_complete_solution(&mut self) {
        if self.model.enforce_qb_stack()
            && self.state.qb_team().is_some()
            && !self.state.stack_satisfied()
        {
            self.stats.on_pruning_correlation();
            self.monitor.on_prune(
                &self.state,
                PruneReason::CorrelationUnsatisfiable,
                &self.stats,
            );
            return;
        }
        if self.model.enforce_bringback()
            && self.state.qb_opponent().is_some()
            && !self.state.bringback_satisfied()
        {
            self.stats.on_pruning_correlation();
            self.monitor.on_prune(
                &self.state,
                PruneReason::CorrelationUnsatisfiable,
                &self.stats,
            );
            return;
        }

        let lineup = Lineup::from_assignment(self.model, self.state.assigned());
        debug_assert_eq!(
            lineup.total_salary(),
            self.state.used_salary(),
            "state aggregates must agree with the assembled lineup"
        );
        debug_assert!(lineup.total_salary() <= self.model.salary_cap());

        let improves = match &self.best_lineup {
            Some(best) => lineup.is_better_than(best),
            None => true,
        };
        if !improves {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return;
        }

        self.best_points = self.best_points.max(lineup.total_points().raw());
        self.incumbent.on_solution_found(&lineup);
        self.stats.on_solution_found();
        self.monitor.on_solution_found(&lineup, &self.stats);
        self.best_lineup = Some(lineup);
    }

    /// Whether the open stack/bring-back obligations can still be met.
    ///
    /// The checks are necessary conditions, so a `false` proves the branch
    /// dead: a rule is open, and either no unfilled slot admits a pass
    /// catcher or the required team has no affordable, cap-compatible pass
    /// catcher left.
    fn correlation_feasible(&self) -> bool {
        if self.model.enforce_qb_stack() && !self.state.stack_satisfied() {
            if let Some(team) = self.state.qb_team() {
                if !self.can_still_add_pass_catcher(team) {
                    return false;
                }
            }
        }
        if self.model.enforce_bringback() && !self.state.bringback_satisfied() {
            if let Some(opponent) = self.state.qb_opponent() {
                if !self.can_still_add_pass_catcher(opponent) {
                    return false;
                }
            }
        }
        true
    }

    fn can_still_add_pass_catcher(&self, team: gridiron_model::index::TeamIndex) -> bool {
        let any_open_slot = (self.state.num_filled()..self.model.num_slots()).any(|index| {
            self.model
                .slot_eligible(SlotIndex::new(index))
                .intersects(PositionSet::PASS_CATCHERS)
        });
        if !any_open_slot {
            return false;
        }
        if let Some(cap) = self.model.max_per_team() {
            if self.state.team_count(team) >= cap {
                return false;
            }
        }
        self.model.pass_catchers_on(team).iter().any(|&candidate| {
            !self.state.is_used(candidate)
                && self.state.used_salary() + self.model.salary(candidate)
                    <= self.model.salary_cap()
        })
    }

    /// Diagnostic attribution for a `None` bound: the first unfilled slot
    /// with no feasible candidate against the current aggregates.
    fn first_unfillable_slot(&self) -> SlotIndex {
        for index in self.state.num_filled()..self.model.num_slots() {
            let slot = SlotIndex::new(index);
            let feasible = self.model.eligible_candidates(slot).iter().any(|&c| {
                !self.state.is_used(c)
                    && self.state.used_salary() + self.model.salary(c) <= self.model.salary_cap()
                    && self
                        .model
                        .max_per_team()
                        .is_none_or(|cap| self.state.team_count(self.model.team(c)) < cap)
            });
            if !feasible {
                return slot;
            }
        }
        self.state.next_slot()
    }

    /// Builds the outcome. `Ok(())` means the subtree was exhausted;
    /// `Err(Some(reason))` means a monitor aborted the run;
    /// `Err(None)` means the fixed prefix was structurally empty.
    fn finish(mut self, exploration: Result<(), Option<String>>) -> BnbSolverOutcome {
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        match exploration {
            Ok(()) => match self.best_lineup {
                Some(lineup) => BnbSolverOutcome::optimal(lineup, self.stats),
                None => BnbSolverOutcome::infeasible(self.stats),
            },
            Err(Some(reason)) => BnbSolverOutcome::aborted(self.best_lineup, reason, self.stats),
            Err(None) => BnbSolverOutcome::infeasible(self.stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        eval::{ProjectionBound, UnboundedEvaluator},
        monitor::{MonitorWrapper, NoOperationMonitor},
    };
    use gridiron_model::roster::{Candidate, Position, RosterConfig, SlotSpec};
    use gridiron_search::monitor::node_limit::NodeLimitMonitor;
    use gridiron_search::result::SolverResult;

    fn candidate(
        id: i64,
        team: &str,
        opponent: &str,
        position: Position,
        salary: i64,
        projection: f64,
    ) -> Candidate {
        Candidate::new(id, format!("P{id}"), team, opponent, position, salary, projection)
    }

    fn solve(model: &LineupModel) -> BnbSolverOutcome {
        BnbSolver::new().solve(model, &mut ProjectionBound::new(), NoOperationMonitor::new())
    }

    /// Exhaustive reference search: no bounding, no symmetry breaking, full
    /// constraint verification at every leaf.
    fn brute_force(model: &LineupModel) -> Option<Lineup> {
        fn recurse(model: &LineupModel, state: &mut SearchState, best: &mut Option<Lineup>) {
            if state.is_complete() {
                if model.enforce_qb_stack()
                    && state.qb_team().is_some()
                    && !state.stack_satisfied()
                {
                    return;
                }
                if model.enforce_bringback()
                    && state.qb_opponent().is_some()
                    && !state.bringback_satisfied()
                {
                    return;
                }
                let lineup = Lineup::from_assignment(model, state.assigned());
                let improves = best
                    .as_ref()
                    .map_or(true, |current| lineup.is_better_than(current));
                if improves {
                    *best = Some(lineup);
                }
                return;
            }
            let slot = state.next_slot();
            for rank in 0..model.eligible_candidates(slot).len() {
                if let Some(decision) = Decision::try_new(model, state, slot, rank) {
                    let token = state.apply(model, decision.candidate());
                    recurse(model, state, best);
                    state.undo(model, token);
                }
            }
        }

        let mut state = SearchState::for_model(model);
        let mut best = None;
        recurse(model, &mut state, &mut best);
        best
    }

    fn assert_matches_brute_force(model: &LineupModel) {
        let outcome = solve(model);
        match brute_force(model) {
            Some(expected) => {
                let lineup = outcome.lineup().expect("engine must find a lineup");
                assert!(outcome.is_optimal());
                assert_eq!(lineup.total_points(), expected.total_points());
                assert_eq!(lineup.total_salary(), expected.total_salary());
                assert_eq!(lineup.id_key(), expected.id_key());
            }
            None => {
                assert_eq!(outcome.result(), &SolverResult::Infeasible);
            }
        }
    }

    #[test]
    fn test_single_qb_slot_picks_best_under_cap() {
        // The concrete scenario from the engine's acceptance checklist:
        // three QBs, cap 8000, roster {QB x 1}. The 8000-salary QB fits the
        // cap exactly and scores highest, so it must win.
        let pool = vec![
            candidate(1, "KC", "BUF", Position::Qb, 8_000, 24.0),
            candidate(2, "BUF", "KC", Position::Qb, 7_500, 22.0),
            candidate(3, "SF", "DAL", Position::Qb, 7_000, 20.0),
        ];
        let config = RosterConfig::new(
            8_000,
            vec![SlotSpec::new("QB", vec![Position::Qb], 1)],
        );
        let model = LineupModel::build(pool, config).unwrap();

        let outcome = solve(&model);
        assert!(outcome.is_optimal());
        let lineup = outcome.lineup().unwrap();
        assert_eq!(lineup.total_salary(), 8_000);
        assert_eq!(lineup.total_points().as_f64(), 24.0);
        assert_eq!(lineup.id_key(), &[1]);
    }

    fn flex_model(enforce_stack: bool, enforce_bringback: bool) -> LineupModel {
        let pool = vec![
            candidate(1, "KC", "BUF", Position::Qb, 7_000, 22.0),
            candidate(2, "BUF", "KC", Position::Qb, 6_500, 21.0),
            candidate(3, "KC", "BUF", Position::Wr, 6_000, 17.0),
            candidate(4, "BUF", "KC", Position::Wr, 5_500, 16.0),
            candidate(5, "SF", "DAL", Position::Wr, 5_000, 15.0),
            candidate(6, "SF", "DAL", Position::Rb, 6_000, 18.0),
            candidate(7, "DAL", "SF", Position::Rb, 5_500, 14.0),
            candidate(8, "KC", "BUF", Position::Te, 4_000, 11.0),
            candidate(9, "DAL", "SF", Position::Te, 3_500, 9.0),
        ];
        let config = RosterConfig::new(
            24_000,
            vec![
                SlotSpec::new("QB", vec![Position::Qb], 1),
                SlotSpec::new("RB", vec![Position::Rb], 1),
                SlotSpec::new("WR", vec![Position::Wr], 1),
                SlotSpec::new(
                    "FLEX",
                    vec![Position::Rb, Position::Wr, Position::Te],
                    1,
                ),
            ],
        )
        .with_qb_stack(enforce_stack)
        .with_bringback(enforce_bringback);
        LineupModel::build(pool, config).unwrap()
    }

    /// Asserts the full feasibility contract of a returned lineup: cap
    /// respected, every occupant eligible for its slot, no candidate twice,
    /// and no team over the per-team limit.
    fn verify_lineup(model: &LineupModel, lineup: &Lineup) {
        assert!(lineup.total_salary() <= model.salary_cap());
        assert_eq!(lineup.num_slots(), model.num_slots());

        let mut seen = std::collections::HashSet::new();
        let mut team_counts = vec![0u32; model.num_teams()];
        for (index, &candidate) in lineup.candidates().iter().enumerate() {
            let slot = SlotIndex::new(index);
            assert!(
                model.slot_eligible(slot).contains(model.position(candidate)),
                "candidate {} is not eligible for slot {}",
                model.candidate(candidate).id,
                model.slot_name(slot)
            );
            assert!(
                seen.insert(candidate),
                "candidate {} appears twice",
                model.candidate(candidate).id
            );
            team_counts[model.team(candidate).get()] += 1;
        }
        if let Some(cap) = model.max_per_team() {
            assert!(team_counts.iter().all(|&count| count <= cap));
        }
    }

    #[test]
    fn test_flex_roster_matches_brute_force() {
        assert_matches_brute_force(&flex_model(false, false));
    }

    #[test]
    fn test_returned_lineups_satisfy_every_constraint() {
        for (stack, bringback) in [(false, false), (true, false), (true, true)] {
            let model = flex_model(stack, bringback);
            let outcome = solve(&model);
            verify_lineup(&model, outcome.lineup().expect("feasible model"));
        }
    }

    #[test]
    fn test_stack_constraint_matches_brute_force() {
        assert_matches_brute_force(&flex_model(true, false));
    }

    #[test]
    fn test_bringback_constraint_matches_brute_force() {
        assert_matches_brute_force(&flex_model(true, true));
    }

    #[test]
    fn test_stack_constraint_changes_optimum() {
        let unconstrained = solve(&flex_model(false, false));
        let stacked = solve(&flex_model(true, false));
        let free_points = unconstrained.lineup().unwrap().total_points();
        let stacked_points = stacked.lineup().unwrap().total_points();
        assert!(stacked_points <= free_points);

        // The stacked optimum must actually contain a KC pass catcher next
        // to the KC QB (or use the BUF QB with a BUF pass catcher).
        let model = flex_model(true, false);
        let outcome = solve(&model);
        let lineup = outcome.lineup().unwrap();
        let qb = lineup
            .candidates()
            .iter()
            .copied()
            .find(|&c| model.position(c) == Position::Qb)
            .unwrap();
        let has_stack_mate = lineup.candidates().iter().any(|&c| {
            model.position(c).is_pass_catcher() && model.team(c) == model.team(qb)
        });
        assert!(has_stack_mate);
    }

    #[test]
    fn test_bringback_lineup_contains_opposing_pass_catcher() {
        let model = flex_model(true, true);
        let outcome = solve(&model);
        let lineup = outcome.lineup().unwrap();
        let qb = lineup
            .candidates()
            .iter()
            .copied()
            .find(|&c| model.position(c) == Position::Qb)
            .unwrap();
        let has_bringback = lineup.candidates().iter().any(|&c| {
            model.position(c).is_pass_catcher() && model.team(c) == model.opponent(qb)
        });
        assert!(has_bringback);
    }

    #[test]
    fn test_same_spec_slots_pick_distinct_candidates() {
        let pool = vec![
            candidate(1, "KC", "BUF", Position::Rb, 6_000, 20.0),
            candidate(2, "SF", "DAL", Position::Rb, 5_500, 18.0),
            candidate(3, "DAL", "SF", Position::Rb, 5_000, 15.0),
        ];
        let config = RosterConfig::new(
            12_000,
            vec![SlotSpec::new("RB", vec![Position::Rb], 2)],
        );
        let model = LineupModel::build(pool, config).unwrap();

        let outcome = solve(&model);
        assert!(outcome.is_optimal());
        let lineup = outcome.lineup().unwrap();
        // The two best backs fit the cap together (6000 + 5500).
        assert_eq!(lineup.id_key(), &[1, 2]);
        assert_eq!(lineup.total_salary(), 11_500);
    }

    #[test]
    fn test_team_cap_forces_diversification() {
        let pool = vec![
            candidate(1, "KC", "BUF", Position::Rb, 5_000, 20.0),
            candidate(2, "KC", "BUF", Position::Rb, 5_000, 19.0),
            candidate(3, "SF", "DAL", Position::Rb, 5_000, 10.0),
        ];
        let config = RosterConfig::new(
            20_000,
            vec![SlotSpec::new("RB", vec![Position::Rb], 2)],
        )
        .with_max_per_team(1);
        let model = LineupModel::build(pool, config).unwrap();

        let outcome = solve(&model);
        let lineup = outcome.lineup().unwrap();
        // Without the cap the two KC backs would win.
        assert_eq!(lineup.id_key(), &[1, 3]);
        assert_matches_brute_force(&model);
    }

    #[test]
    fn test_bounded_and_unbounded_find_identical_results() {
        for (stack, bringback) in [(false, false), (true, false), (true, true)] {
            let model = flex_model(stack, bringback);

            let bounded = BnbSolver::new().solve(
                &model,
                &mut ProjectionBound::new(),
                NoOperationMonitor::new(),
            );
            let unbounded = BnbSolver::new().solve(
                &model,
                &mut UnboundedEvaluator::new(),
                NoOperationMonitor::new(),
            );

            assert_eq!(
                bounded.lineup(),
                unbounded.lineup(),
                "bounding must never change the optimum (stack={stack}, bringback={bringback})"
            );
            // The bound only saves work.
            assert!(
                bounded.statistics().nodes_explored
                    <= unbounded.statistics().nodes_explored
            );
        }
    }

    #[test]
    fn test_deterministic_repeat_solves() {
        let model = flex_model(true, true);
        let first = solve(&model);
        let second = solve(&model);
        assert_eq!(first.lineup(), second.lineup());
        assert_eq!(first.result(), second.result());
    }

    #[test]
    fn test_infeasible_salary_cap_reports_binding_slot() {
        let pool = vec![
            candidate(1, "KC", "BUF", Position::Qb, 8_000, 24.0),
            candidate(2, "SF", "DAL", Position::Rb, 7_000, 20.0),
        ];
        let config = RosterConfig::new(
            10_000,
            vec![
                SlotSpec::new("QB", vec![Position::Qb], 1),
                SlotSpec::new("RB", vec![Position::Rb], 1),
            ],
        );
        let model = LineupModel::build(pool, config).unwrap();

        let outcome = solve(&model);
        assert_eq!(outcome.result(), &SolverResult::Infeasible);
        assert!(
            outcome.statistics().dead_ends().iter().sum::<u64>() > 0,
            "an exhausted infeasible search must record dead ends"
        );
    }

    #[test]
    fn test_step_budget_aborts_with_unknown() {
        let model = flex_model(false, false);
        let monitor = MonitorWrapper::new(NodeLimitMonitor::new(0));
        let outcome =
            BnbSolver::new().solve(&model, &mut ProjectionBound::new(), monitor);
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert!(matches!(
            outcome.reason(),
            crate::result::BnbTerminationReason::Aborted(_)
        ));
    }

    #[test]
    fn test_fixed_root_restricts_subtree() {
        let model = flex_model(false, false);
        // Slot 0 is the QB slot (fewest eligibles). Pin the weaker QB.
        assert_eq!(model.slot_name(SlotIndex::new(0)), "QB");
        let weaker_qb = model.eligible_candidates(SlotIndex::new(0))[1];

        let outcome = BnbSolver::new().solve_with_fixed(
            &model,
            &mut ProjectionBound::new(),
            NoOperationMonitor::new(),
            &[FixedAssignment::new(SlotIndex::new(0), weaker_qb)],
        );
        let lineup = outcome.lineup().unwrap();
        assert_eq!(lineup.candidate_for_slot(SlotIndex::new(0)), weaker_qb);

        // The full search beats (or ties) any pinned subtree.
        let full = solve(&model);
        assert!(
            full.lineup().unwrap().total_points() >= lineup.total_points()
        );
    }

    #[test]
    fn test_fixed_root_candidate_of_wrong_position_is_infeasible() {
        let model = flex_model(false, false);
        // An RB pinned into the QB slot: structurally empty subtree.
        let rb = (0..model.num_candidates())
            .map(CandidateIndex::new)
            .find(|&c| model.position(c) == Position::Rb)
            .unwrap();
        let outcome = BnbSolver::new().solve_with_fixed(
            &model,
            &mut ProjectionBound::new(),
            NoOperationMonitor::new(),
            &[FixedAssignment::new(SlotIndex::new(0), rb)],
        );
        assert_eq!(outcome.result(), &SolverResult::Infeasible);
    }

    #[test]
    fn test_shared_incumbent_receives_best_lineup() {
        let model = flex_model(false, false);
        let shared = SharedIncumbent::new();
        let outcome = BnbSolver::new().solve_with_incumbent(
            &model,
            &mut ProjectionBound::new(),
            NoOperationMonitor::new(),
            &shared,
        );
        assert!(outcome.is_optimal());
        let snapshot = shared.snapshot().unwrap();
        assert_eq!(Some(&snapshot), outcome.lineup());
    }

    #[test]
    fn test_randomized_instances_match_brute_force() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let teams = [("KC", "BUF"), ("BUF", "KC"), ("SF", "DAL"), ("DAL", "SF")];
        let positions = [Position::Qb, Position::Rb, Position::Wr, Position::Te];

        for seed in 0..12u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pool = Vec::new();
            // Guarantee one QB and one RB so the shape is fillable.
            pool.push(candidate(0, "KC", "BUF", Position::Qb, 6_000, 21.0));
            pool.push(candidate(1, "SF", "DAL", Position::Rb, 5_500, 17.5));
            for id in 2..12i64 {
                let (team, opponent) = teams[rng.random_range(0..teams.len())];
                let position = positions[rng.random_range(0..positions.len())];
                let salary = rng.random_range(3..=9) * 1_000;
                let projection = rng.random_range(50..250) as f64 / 10.0;
                pool.push(candidate(id, team, opponent, position, salary, projection));
            }

            let config = RosterConfig::new(
                16_000,
                vec![
                    SlotSpec::new("QB", vec![Position::Qb], 1),
                    SlotSpec::new("RB", vec![Position::Rb], 1),
                    SlotSpec::new(
                        "FLEX",
                        vec![Position::Rb, Position::Wr, Position::Te],
                        1,
                    ),
                ],
            )
            .with_max_per_team(2)
            .with_qb_stack(seed % 2 == 0);

            let model = LineupModel::build(pool, config).unwrap();
            assert_matches_brute_force(&model);
        }
    }
}
