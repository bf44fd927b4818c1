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

use crate::{
    index::{CandidateIndex, SlotIndex},
    model::LineupModel,
    points::Points,
};

/// A complete feasible lineup.
///
/// This struct uses a Structure of Arrays (SoA) layout: index `i` of
/// `candidates` holds the occupant of model slot `i` (the model's search
/// order). The sorted candidate-id tuple is precomputed because it is the
/// final key of the deterministic tie-break order and gets compared on every
/// incumbent installation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lineup {
    /// The occupant of each slot, in model slot order.
    candidates: Vec<CandidateIndex>,
    /// Sum of the occupants' salaries.
    total_salary: i64,
    /// Sum of the occupants' fixed-point projections.
    total_points: Points,
    /// The occupants' candidate ids, sorted ascending.
    id_key: Vec<i64>,
}

impl Lineup {
    /// Builds a lineup from a complete slot assignment, computing the
    /// aggregate salary, projection, and id key from the model.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` does not cover every model slot.
    pub fn from_assignment(model: &LineupModel, candidates: &[CandidateIndex]) -> Self {
        assert_eq!(
            candidates.len(),
            model.num_slots(),
            "called Lineup::from_assignment with an incomplete assignment: {} of {} slots",
            candidates.len(),
            model.num_slots()
        );

        let mut total_salary = 0i64;
        let mut total_points = Points::ZERO;
        let mut id_key = Vec::with_capacity(candidates.len());
        for &candidate in candidates {
            total_salary += model.salary(candidate);
            total_points = total_points.saturating_add(model.points(candidate));
            id_key.push(model.candidate(candidate).id);
        }
        id_key.sort_unstable();

        Self {
            candidates: candidates.to_vec(),
            total_salary,
            total_points,
            id_key,
        }
    }

    /// Returns the occupant of a specific slot.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of bounds.
    #[inline]
    pub fn candidate_for_slot(&self, slot: SlotIndex) -> CandidateIndex {
        let index = slot.get();
        debug_assert!(
            index < self.num_slots(),
            "called `Lineup::candidate_for_slot` with slot index out of bounds: the len is {} but the index is {}",
            self.num_slots(),
            index
        );

        self.candidates[index]
    }

    /// Returns the occupants of all slots, in model slot order.
    #[inline]
    pub fn candidates(&self) -> &[CandidateIndex] {
        &self.candidates
    }

    /// Returns the number of slots in this lineup.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.candidates.len()
    }

    /// Returns the total salary spent.
    #[inline]
    pub fn total_salary(&self) -> i64 {
        self.total_salary
    }

    /// Returns the total projected points.
    #[inline]
    pub fn total_points(&self) -> Points {
        self.total_points
    }

    /// Returns the sorted candidate-id tuple.
    #[inline]
    pub fn id_key(&self) -> &[i64] {
        &self.id_key
    }

    /// The deterministic total order over complete lineups: higher projected
    /// points win; equal projections prefer the lower total salary; exact
    /// ties fall back to the lexicographically smaller sorted id tuple.
    ///
    /// Every incumbent update goes through this comparison, which is what
    /// makes the engine's output reproducible across runs, slot orders, and
    /// thread interleavings.
    pub fn is_better_than(&self, other: &Lineup) -> bool {
        match self.total_points.cmp(&other.total_points) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => match self.total_salary.cmp(&other.total_salary) {
                std::cmp::Ordering::Less => true,
                std::cmp::Ordering::Greater => false,
                std::cmp::Ordering::Equal => self.id_key < other.id_key,
            },
        }
    }
}

impl std::fmt::Display for Lineup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lineup Summary")?;
        writeln!(f, "   Total Points: {}", self.total_points)?;
        writeln!(f, "   Total Salary: {}", self.total_salary)?;
        writeln!(f)?;
        writeln!(f, "   {:<6} | {:<16}", "Slot", "Candidate")?;
        writeln!(f, "   {:-<6}-+-{:-<16}", "", "")?;
        for (i, candidate) in self.candidates.iter().enumerate() {
            writeln!(f, "   {:<6} | {:<16}", i, candidate.get())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Candidate, Position, RosterConfig, SlotSpec};

    fn model() -> LineupModel {
        let pool = vec![
            Candidate::new(10, "A", "KC", "BUF", Position::Qb, 8_000, 24.0),
            Candidate::new(11, "B", "BUF", "KC", Position::Qb, 7_000, 20.0),
            Candidate::new(12, "C", "KC", "BUF", Position::Wr, 6_000, 15.0),
            Candidate::new(13, "D", "BUF", "KC", Position::Wr, 5_500, 15.0),
            Candidate::new(14, "E", "KC", "BUF", Position::Wr, 6_000, 15.0),
        ];
        let config = RosterConfig::new(
            30_000,
            vec![
                SlotSpec::new("QB", vec![Position::Qb], 1),
                SlotSpec::new("WR", vec![Position::Wr], 1),
            ],
        );
        LineupModel::build(pool, config).unwrap()
    }

    #[test]
    fn test_from_assignment_aggregates() {
        let model = model();
        let lineup =
            Lineup::from_assignment(&model, &[CandidateIndex::new(0), CandidateIndex::new(2)]);
        assert_eq!(lineup.total_salary(), 14_000);
        assert_eq!(lineup.total_points(), Points::from_f64(39.0).unwrap());
        assert_eq!(lineup.id_key(), &[10, 12]);
        assert_eq!(lineup.num_slots(), 2);
        assert_eq!(lineup.candidate_for_slot(SlotIndex::new(0)).get(), 0);
    }

    #[test]
    #[should_panic(expected = "incomplete assignment")]
    fn test_from_assignment_panics_on_wrong_len() {
        let model = model();
        let _ = Lineup::from_assignment(&model, &[CandidateIndex::new(0)]);
    }

    #[test]
    fn test_order_prefers_higher_points() {
        let model = model();
        // 24 + 15 = 39 beats 20 + 15 = 35, despite the higher salary.
        let better =
            Lineup::from_assignment(&model, &[CandidateIndex::new(0), CandidateIndex::new(2)]);
        let worse =
            Lineup::from_assignment(&model, &[CandidateIndex::new(1), CandidateIndex::new(2)]);
        assert!(better.is_better_than(&worse));
        assert!(!worse.is_better_than(&better));
    }

    #[test]
    fn test_order_breaks_point_ties_by_salary_then_ids() {
        let model = model();
        // Equal points (24 + 15), unequal salary: 13_500 vs 14_000.
        let cheaper =
            Lineup::from_assignment(&model, &[CandidateIndex::new(0), CandidateIndex::new(3)]);
        let pricier =
            Lineup::from_assignment(&model, &[CandidateIndex::new(0), CandidateIndex::new(2)]);
        assert!(cheaper.is_better_than(&pricier));
        assert!(!pricier.is_better_than(&cheaper));

        // Equal points and equal salary: {10, 12} vs {10, 14} (both WRs cost
        // 6000 and project 15.0); the smaller id tuple wins.
        let low_ids =
            Lineup::from_assignment(&model, &[CandidateIndex::new(0), CandidateIndex::new(2)]);
        let high_ids =
            Lineup::from_assignment(&model, &[CandidateIndex::new(0), CandidateIndex::new(4)]);
        assert!(low_ids.is_better_than(&high_ids));
        assert!(!high_ids.is_better_than(&low_ids));
    }

    #[test]
    fn test_order_is_irreflexive() {
        let model = model();
        let lineup =
            Lineup::from_assignment(&model, &[CandidateIndex::new(0), CandidateIndex::new(2)]);
        assert!(!lineup.is_better_than(&lineup.clone()));
    }
}
