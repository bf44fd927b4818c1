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

use crate::state::SearchState;
use gridiron_model::{
    index::{CandidateIndex, SlotIndex},
    model::LineupModel,
};

/// A decision to assign a candidate to a roster slot.
///
/// `rank` is the candidate's position in the slot's eligibility list (which
/// is sorted by descending projection). The search iterates decisions in
/// rank order, so stronger candidates are tried first and good incumbents
/// appear early.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decision {
    slot: SlotIndex,
    candidate: CandidateIndex,
    rank: usize,
}

impl Decision {
    /// Tries to create a decision assigning the candidate at `rank` of the
    /// slot's eligibility list, given the current search state.
    ///
    /// Position eligibility is implied by list membership; the remaining
    /// feasibility checks are performed here: the candidate must be unused,
    /// must fit under the salary cap, and must not push its team past the
    /// per-team limit.
    ///
    /// # Symmetry
    ///
    /// Symmetry refers to a situation where different sequences of decisions
    /// lead to the same lineup. Slot instances expanded from one spec (the
    /// two `RB` spots, say) are interchangeable: filling them with the pair
    /// `(a, b)` or `(b, a)` produces the same roster. To avoid exploring
    /// both orders, the search only generates decisions whose rank strictly
    /// exceeds the rank chosen for the previous instance of the same spec;
    /// callers pass that lower bound as the starting rank when iterating.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `slot` is out of bounds.
    #[inline]
    pub fn try_new(
        model: &LineupModel,
        state: &SearchState,
        slot: SlotIndex,
        rank: usize,
    ) -> Option<Self> {
        debug_assert!(
            slot.get() < model.num_slots(),
            "called `Decision::try_new` with slot index out of bounds: the len is {} but the index is {}",
            model.num_slots(),
            slot.get()
        );

        let candidates = model.eligible_candidates(slot);
        let candidate = *candidates.get(rank)?;

        if state.is_used(candidate) {
            return None;
        }
        if state.used_salary() + model.salary(candidate) > model.salary_cap() {
            return None;
        }
        if let Some(cap) = model.max_per_team() {
            if state.team_count(model.team(candidate)) >= cap {
                return None;
            }
        }

        Some(Decision {
            slot,
            candidate,
            rank,
        })
    }

    /// The slot this decision fills.
    #[inline]
    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    /// The candidate this decision selects.
    #[inline]
    pub fn candidate(&self) -> CandidateIndex {
        self.candidate
    }

    /// The candidate's rank in the slot's eligibility list.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decision(slot: {}, candidate: {}, rank: {})",
            self.slot, self.candidate, self.rank
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_model::roster::{Candidate, Position, RosterConfig, SlotSpec};

    fn model(max_per_team: Option<u32>) -> LineupModel {
        let pool = vec![
            Candidate::new(1, "A", "KC", "BUF", Position::Rb, 8_000, 22.0),
            Candidate::new(2, "B", "KC", "BUF", Position::Rb, 6_000, 18.0),
            Candidate::new(3, "C", "SF", "DAL", Position::Rb, 4_000, 12.0),
        ];
        let mut config = RosterConfig::new(
            10_000,
            vec![SlotSpec::new("RB", vec![Position::Rb], 2)],
        );
        config.max_per_team = max_per_team;
        LineupModel::build(pool, config).unwrap()
    }

    #[test]
    fn test_generates_in_rank_order() {
        let model = model(None);
        let state = SearchState::for_model(&model);
        let slot = SlotIndex::new(0);

        // Ranks follow descending projection: id 1, id 2, id 3.
        let d0 = Decision::try_new(&model, &state, slot, 0).unwrap();
        assert_eq!(model.candidate(d0.candidate()).id, 1);
        let d2 = Decision::try_new(&model, &state, slot, 2).unwrap();
        assert_eq!(model.candidate(d2.candidate()).id, 3);
        assert!(Decision::try_new(&model, &state, slot, 3).is_none());
    }

    #[test]
    fn test_rejects_used_candidate() {
        let model = model(None);
        let mut state = SearchState::for_model(&model);
        let slot = SlotIndex::new(0);

        let d0 = Decision::try_new(&model, &state, slot, 0).unwrap();
        state.apply(&model, d0.candidate());
        assert!(Decision::try_new(&model, &state, SlotIndex::new(1), 0).is_none());
        assert!(Decision::try_new(&model, &state, SlotIndex::new(1), 1).is_some());
    }

    #[test]
    fn test_rejects_over_cap_candidate() {
        let model = model(None);
        let mut state = SearchState::for_model(&model);

        // Salary 8000 used; only the 4000 candidate would bust the 10000 cap.
        let d0 = Decision::try_new(&model, &state, SlotIndex::new(0), 0).unwrap();
        state.apply(&model, d0.candidate());

        assert!(Decision::try_new(&model, &state, SlotIndex::new(1), 1).is_none());
        assert!(Decision::try_new(&model, &state, SlotIndex::new(1), 2).is_none());
    }

    #[test]
    fn test_rejects_team_cap_violation() {
        let model = model(Some(1));
        let mut state = SearchState::for_model(&model);

        // id 2 (KC, 6000) first keeps the cap reachable but exhausts KC.
        let d = Decision::try_new(&model, &state, SlotIndex::new(0), 1).unwrap();
        state.apply(&model, d.candidate());

        // id 1 is also KC: blocked by the team cap, not the salary cap.
        assert!(Decision::try_new(&model, &state, SlotIndex::new(1), 0).is_none());
        // id 3 (SF) is fine.
        assert!(Decision::try_new(&model, &state, SlotIndex::new(1), 2).is_some());
    }
}
