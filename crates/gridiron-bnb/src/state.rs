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

//! Search state management for the branch-and-bound engine.
//!
//! This module provides `SearchState`, a compact, mutable container for
//! tracking the incremental assignment of candidates to roster slots during
//! search. Slots are filled strictly in the model's static order, so the
//! filled slots are always the prefix `[0, num_filled)`.
//!
//! Key responsibilities:
//! - Maintain the used-candidate set and per-slot occupants.
//! - Track the running aggregates the constraint checks need: spent salary,
//!   total projection, per-team counts, the selected QB's team and opponent,
//!   and whether the stack/bring-back correlation rules are already
//!   satisfied.
//! - Provide exact `apply`/`undo` pairs. `undo` consumes the token returned
//!   by the matching `apply` and restores the state bit for bit; the
//!   recursion owns exactly one state and never aliases aggregates across
//!   branches.
//!
//! Invariants (debug-checked):
//! - `num_filled <= num_slots`, and undo only ever removes the most recently
//!   applied candidate.
//! - Correlation latches only hold meaning while a QB is selected; they are
//!   false otherwise.

use fixedbitset::FixedBitSet;
use gridiron_model::{
    index::{CandidateIndex, SlotIndex, TeamIndex},
    model::LineupModel,
    points::Points,
    roster::Position,
};

/// The undo token returned by `SearchState::apply`.
///
/// Holds the pieces of state an undo cannot re-derive: whether this apply
/// selected the QB, and the correlation latches before the apply.
#[derive(Debug, Clone, Copy)]
pub struct AppliedDecision {
    candidate: CandidateIndex,
    set_qb: bool,
    prev_stack: bool,
    prev_bringback: bool,
}

/// A compact, mutable container holding the incremental search state of one
/// branch-and-bound session.
#[derive(Debug, Clone)]
pub struct SearchState {
    // Heap-managed fields grouped first.
    used: FixedBitSet,
    slot_candidates: Vec<CandidateIndex>,
    team_counts: Vec<u32>,

    // 8-aligned scalars.
    used_salary: i64,
    total_points: Points,

    // Small fields at the end.
    num_filled: usize,
    qb_team: Option<TeamIndex>,
    qb_opponent: Option<TeamIndex>,
    stack_satisfied: bool,
    bringback_satisfied: bool,
}

impl SearchState {
    /// Creates an empty state sized for the given model.
    pub fn for_model(model: &LineupModel) -> Self {
        Self {
            used: FixedBitSet::with_capacity(model.num_candidates()),
            slot_candidates: vec![CandidateIndex::new(0); model.num_slots()],
            team_counts: vec![0; model.num_teams()],
            used_salary: 0,
            total_points: Points::ZERO,
            num_filled: 0,
            qb_team: None,
            qb_opponent: None,
            stack_satisfied: false,
            bringback_satisfied: false,
        }
    }

    /// Returns the number of filled slots.
    #[inline]
    pub fn num_filled(&self) -> usize {
        self.num_filled
    }

    /// Returns the number of roster slots this state was sized for.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.slot_candidates.len()
    }

    /// Whether every slot is filled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_filled == self.slot_candidates.len()
    }

    /// The next slot to fill.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when the state is already complete.
    #[inline]
    pub fn next_slot(&self) -> SlotIndex {
        debug_assert!(
            !self.is_complete(),
            "called `SearchState::next_slot` on a complete state"
        );
        SlotIndex::new(self.num_filled)
    }

    /// The occupants of the filled slot prefix, in model slot order.
    #[inline]
    pub fn assigned(&self) -> &[CandidateIndex] {
        &self.slot_candidates[..self.num_filled]
    }

    /// Whether a candidate is already part of the partial assignment.
    #[inline]
    pub fn is_used(&self, candidate: CandidateIndex) -> bool {
        self.used.contains(candidate.get())
    }

    /// The salary spent by the partial assignment.
    #[inline]
    pub fn used_salary(&self) -> i64 {
        self.used_salary
    }

    /// The total projection of the partial assignment.
    #[inline]
    pub fn total_points(&self) -> Points {
        self.total_points
    }

    /// How many selected candidates play for the given team.
    #[inline]
    pub fn team_count(&self, team: TeamIndex) -> u32 {
        self.team_counts[team.get()]
    }

    /// The selected QB's team, if a QB has been selected.
    #[inline]
    pub fn qb_team(&self) -> Option<TeamIndex> {
        self.qb_team
    }

    /// The selected QB's opposing team, if a QB has been selected.
    #[inline]
    pub fn qb_opponent(&self) -> Option<TeamIndex> {
        self.qb_opponent
    }

    /// Whether a same-team pass catcher accompanies the selected QB.
    #[inline]
    pub fn stack_satisfied(&self) -> bool {
        self.stack_satisfied
    }

    /// Whether an opposing-team pass catcher accompanies the selected QB.
    #[inline]
    pub fn bringback_satisfied(&self) -> bool {
        self.bringback_satisfied
    }

    /// Assigns `candidate` to the next slot and updates every aggregate.
    /// Returns the token the matching `undo` needs.
    ///
    /// The first QB applied becomes "the selected QB" for correlation
    /// purposes; applying it re-derives the latches from the already
    /// selected pass catchers, because the QB slot is not necessarily
    /// ordered first.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when the state is complete or the candidate is
    /// already used.
    pub fn apply(&mut self, model: &LineupModel, candidate: CandidateIndex) -> AppliedDecision {
        debug_assert!(
            !self.is_complete(),
            "called `SearchState::apply` on a complete state"
        );
        debug_assert!(
            !self.is_used(candidate),
            "called `SearchState::apply` with already used candidate: {}",
            candidate
        );

        let mut token = AppliedDecision {
            candidate,
            set_qb: false,
            prev_stack: self.stack_satisfied,
            prev_bringback: self.bringback_satisfied,
        };

        self.used.set(candidate.get(), true);
        self.slot_candidates[self.num_filled] = candidate;
        self.num_filled += 1;
        self.used_salary += model.salary(candidate);
        self.total_points = self.total_points.saturating_add(model.points(candidate));
        self.team_counts[model.team(candidate).get()] += 1;

        let position = model.position(candidate);
        if position == Position::Qb && self.qb_team.is_none() {
            token.set_qb = true;
            let team = model.team(candidate);
            let opponent = model.opponent(candidate);
            self.qb_team = Some(team);
            self.qb_opponent = Some(opponent);
            // Pass catchers may already be on the roster.
            self.stack_satisfied = false;
            self.bringback_satisfied = false;
            for &selected in self.slot_candidates[..self.num_filled].iter() {
                if !model.position(selected).is_pass_catcher() {
                    continue;
                }
                if model.team(selected) == team {
                    self.stack_satisfied = true;
                }
                if model.team(selected) == opponent {
                    self.bringback_satisfied = true;
                }
            }
        } else if position.is_pass_catcher() {
            if self.qb_team == Some(model.team(candidate)) {
                self.stack_satisfied = true;
            }
            if self.qb_opponent == Some(model.team(candidate)) {
                self.bringback_satisfied = true;
            }
        }

        token
    }

    /// Reverts the most recent `apply`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds when the token does not match the most recent
    /// apply.
    pub fn undo(&mut self, model: &LineupModel, token: AppliedDecision) {
        debug_assert!(
            self.num_filled > 0,
            "called `SearchState::undo` on an empty state"
        );
        debug_assert_eq!(
            self.slot_candidates[self.num_filled - 1], token.candidate,
            "called `SearchState::undo` with a token that is not the most recent apply"
        );

        let candidate = token.candidate;
        self.num_filled -= 1;
        self.used.set(candidate.get(), false);
        self.used_salary -= model.salary(candidate);
        self.total_points = self.total_points.saturating_sub(model.points(candidate));
        self.team_counts[model.team(candidate).get()] -= 1;

        if token.set_qb {
            self.qb_team = None;
            self.qb_opponent = None;
        }
        self.stack_satisfied = token.prev_stack;
        self.bringback_satisfied = token.prev_bringback;
    }
}
