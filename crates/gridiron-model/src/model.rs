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

//! # Constraint Model
//!
//! `LineupModel` is the immutable, pre-validated problem description consumed
//! by the search engine. `LineupModel::build` is the constraint-model builder:
//! it validates the roster configuration against the candidate pool, interns
//! team codes, lays the candidates out in a flat structure-of-arrays arena,
//! precomputes every grouping the search needs (per position, per team, per
//! slot), and orders the roster slots most-constrained-first so the search
//! fails early on the tightest slots.
//!
//! All grouping structures hold `CandidateIndex` values into the arena, never
//! copies of candidate data. Per-slot eligibility lists are sorted once by
//! descending projection (candidate id as the deterministic tie key); the
//! bounding function and the branching order both reuse that single sort.
//!
//! Construction is a pure function over its inputs: no I/O, no mutation of
//! the pool, and a model that never changes after `build` returns.

use crate::{
    index::{CandidateIndex, SlotIndex, TeamIndex},
    points::Points,
    roster::{Candidate, ConfigError, Position, PositionSet, RosterConfig},
};
use rustc_hash::{FxHashMap, FxHashSet};

/// The error type for constraint-model construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The configuration or a candidate record is malformed.
    Config(ConfigError),
    /// A mandatory slot has fewer eligible candidates than its count; no
    /// search could ever fill it.
    InsufficientCandidates {
        /// The slot that cannot be filled.
        slot: String,
        /// How many candidates the slot requires.
        required: usize,
        /// How many eligible candidates the pool offers.
        available: usize,
    },
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Config(err) => write!(f, "invalid configuration: {err}"),
            ModelError::InsufficientCandidates {
                slot,
                required,
                available,
            } => write!(
                f,
                "slot '{slot}' requires {required} candidates but the pool offers {available}"
            ),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Config(err) => Some(err),
            ModelError::InsufficientCandidates { .. } => None,
        }
    }
}

impl From<ConfigError> for ModelError {
    fn from(err: ConfigError) -> Self {
        ModelError::Config(err)
    }
}

/// Represents the theoretical search-space size of a lineup instance.
///
/// The tree explored by the engine has at most the product of the per-slot
/// eligibility counts as leaves. That product overflows any integer type for
/// realistic slates, so the value is stored in logarithmic space (base 10).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    log_val: f64,
}

impl Complexity {
    /// Calculates the complexity from the per-slot eligible-candidate counts.
    pub fn new<I>(slot_pool_sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut log_val = 0.0;
        for size in slot_pool_sizes {
            if size > 0 {
                log_val += (size as f64).log10();
            }
        }
        Complexity { log_val }
    }

    /// Returns the percentage of the search space covered by the given node
    /// count, or `None` when the space is too large to represent as `f64`.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }
        let total = 10.0_f64.powf(self.log_val);
        if total == 0.0 {
            return None;
        }
        Some((nodes_explored as f64 / total) * 100.0)
    }

    /// Returns the order of magnitude of the search-space size.
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa of the search-space size.
    #[inline]
    pub fn mantissa(&self) -> f64 {
        10.0_f64.powf(self.log_val - self.log_val.floor())
    }

    /// Returns the raw base-10 logarithm.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// One concrete roster spot, expanded from a `SlotSpec` with `count > 1`.
#[derive(Debug, Clone)]
struct SlotInstance {
    /// Display name, shared with the originating spec.
    name: String,
    /// Index of the originating spec in the configuration's declaration
    /// order. Instances of one spec are interchangeable; the search breaks
    /// that symmetry by spec index.
    spec: usize,
    /// Eligibility bitmask, cached off the spec.
    eligible: PositionSet,
}

/// The immutable constraint model for one lineup-optimization run.
#[derive(Debug, Clone)]
pub struct LineupModel {
    // Candidate arena. The wire records are kept for reporting; the hot
    // columns are mirrored into flat arrays indexed by `CandidateIndex`.
    candidates: Vec<Candidate>,
    salaries: Vec<i64>,
    points: Vec<Points>,
    positions: Vec<Position>,
    teams: Vec<TeamIndex>,
    opponents: Vec<TeamIndex>,

    // Interned team table.
    team_names: Vec<String>,

    // Grouping indices into the arena.
    by_position: Vec<Vec<CandidateIndex>>,
    by_team: Vec<Vec<CandidateIndex>>,
    pass_catchers_by_team: Vec<Vec<CandidateIndex>>,

    // Slot instances in search order (most-constrained-first), and the
    // per-spec eligibility lists sorted by (points desc, id asc).
    slots: Vec<SlotInstance>,
    spec_eligibles: Vec<Vec<CandidateIndex>>,

    config: RosterConfig,
}

impl LineupModel {
    /// Builds a validated constraint model from a candidate pool and a
    /// roster configuration.
    ///
    /// Fails fast with `ModelError::Config` on structural problems and with
    /// `ModelError::InsufficientCandidates` when a slot could never be
    /// filled; neither error ever reaches the search loop.
    pub fn build(pool: Vec<Candidate>, config: RosterConfig) -> Result<LineupModel, ModelError> {
        config.validate()?;

        // Candidate-level validation and fixed-point conversion.
        let mut seen_ids: FxHashSet<i64> = FxHashSet::default();
        let mut points = Vec::with_capacity(pool.len());
        for candidate in &pool {
            if !seen_ids.insert(candidate.id) {
                return Err(ConfigError::DuplicateCandidate { id: candidate.id }.into());
            }
            if candidate.salary <= 0 {
                return Err(ConfigError::NonPositiveSalary {
                    id: candidate.id,
                    salary: candidate.salary,
                }
                .into());
            }
            let projection = Points::from_f64(candidate.projected_points)
                .ok_or(ConfigError::InvalidProjection { id: candidate.id })?;
            points.push(projection);
        }

        // Team interning. Opponent codes are interned too so bring-back
        // checks resolve even when the opposing roster is absent from the
        // pool.
        let mut team_lookup: FxHashMap<String, TeamIndex> = FxHashMap::default();
        let mut team_names: Vec<String> = Vec::new();
        let intern = |code: &str,
                          lookup: &mut FxHashMap<String, TeamIndex>,
                          names: &mut Vec<String>|
         -> TeamIndex {
            if let Some(&index) = lookup.get(code) {
                return index;
            }
            let index = TeamIndex::new(names.len());
            lookup.insert(code.to_string(), index);
            names.push(code.to_string());
            index
        };
        let mut teams = Vec::with_capacity(pool.len());
        let mut opponents = Vec::with_capacity(pool.len());
        for candidate in &pool {
            teams.push(intern(&candidate.team, &mut team_lookup, &mut team_names));
            opponents.push(intern(&candidate.opponent, &mut team_lookup, &mut team_names));
        }

        let salaries: Vec<i64> = pool.iter().map(|c| c.salary).collect();
        let positions: Vec<Position> = pool.iter().map(|c| c.position).collect();

        // Grouping indices.
        let mut by_position: Vec<Vec<CandidateIndex>> =
            vec![Vec::new(); Position::ALL.len()];
        let mut by_team: Vec<Vec<CandidateIndex>> = vec![Vec::new(); team_names.len()];
        let mut pass_catchers_by_team: Vec<Vec<CandidateIndex>> =
            vec![Vec::new(); team_names.len()];
        for (i, candidate) in pool.iter().enumerate() {
            let index = CandidateIndex::new(i);
            by_position[candidate.position as usize].push(index);
            by_team[teams[i].get()].push(index);
            if candidate.position.is_pass_catcher() {
                pass_catchers_by_team[teams[i].get()].push(index);
            }
        }

        // Per-spec eligibility lists, sorted by (points desc, id asc) once;
        // branching and bounding both reuse this order.
        let mut spec_eligibles: Vec<Vec<CandidateIndex>> =
            Vec::with_capacity(config.slots.len());
        for spec in &config.slots {
            let eligible = spec.eligible_set();
            let mut list: Vec<CandidateIndex> = (0..pool.len())
                .map(CandidateIndex::new)
                .filter(|c| eligible.contains(positions[c.get()]))
                .collect();
            list.sort_by(|a, b| {
                points[b.get()]
                    .cmp(&points[a.get()])
                    .then_with(|| pool[a.get()].id.cmp(&pool[b.get()].id))
            });
            if list.len() < spec.count {
                return Err(ModelError::InsufficientCandidates {
                    slot: spec.name.clone(),
                    required: spec.count,
                    available: list.len(),
                });
            }
            spec_eligibles.push(list);
        }

        // Most-constrained-slot-first ordering: ascending eligible count,
        // declaration order as the stable tie key. Instances of one spec
        // stay adjacent so the rank-based symmetry break applies.
        let mut spec_order: Vec<usize> = (0..config.slots.len()).collect();
        spec_order.sort_by_key(|&s| (spec_eligibles[s].len(), s));

        let mut slots = Vec::with_capacity(config.roster_size);
        for &s in &spec_order {
            let spec = &config.slots[s];
            for _ in 0..spec.count {
                slots.push(SlotInstance {
                    name: spec.name.clone(),
                    spec: s,
                    eligible: spec.eligible_set(),
                });
            }
        }
        debug_assert_eq!(
            slots.len(),
            config.roster_size,
            "slot expansion must produce exactly the roster size"
        );

        Ok(LineupModel {
            candidates: pool,
            salaries,
            points,
            positions,
            teams,
            opponents,
            team_names,
            by_position,
            by_team,
            pass_catchers_by_team,
            slots,
            spec_eligibles,
            config,
        })
    }

    /// Returns the number of candidates in the arena.
    #[inline]
    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    /// Returns the number of roster slots.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of interned teams.
    #[inline]
    pub fn num_teams(&self) -> usize {
        self.team_names.len()
    }

    /// Returns the salary cap.
    #[inline]
    pub fn salary_cap(&self) -> i64 {
        self.config.salary_cap
    }

    /// Returns the per-team roster limit, if one is configured.
    #[inline]
    pub fn max_per_team(&self) -> Option<u32> {
        self.config.max_per_team
    }

    /// Whether a same-team QB/pass-catcher stack is required.
    #[inline]
    pub fn enforce_qb_stack(&self) -> bool {
        self.config.enforce_qb_stack
    }

    /// Whether an opposing-team bring-back pass catcher is required.
    #[inline]
    pub fn enforce_bringback(&self) -> bool {
        self.config.enforce_bringback
    }

    /// Returns the originating configuration.
    #[inline]
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Returns the complexity of the model's search space.
    pub fn complexity(&self) -> Complexity {
        Complexity::new(
            self.slots
                .iter()
                .map(|slot| self.spec_eligibles[slot.spec].len()),
        )
    }

    /// Returns the wire record of a candidate.
    ///
    /// # Panics
    ///
    /// Panics if `candidate` is out of bounds.
    #[inline]
    pub fn candidate(&self, candidate: CandidateIndex) -> &Candidate {
        &self.candidates[candidate.get()]
    }

    /// Returns the salary of a candidate.
    #[inline]
    pub fn salary(&self, candidate: CandidateIndex) -> i64 {
        self.salaries[candidate.get()]
    }

    /// Returns the fixed-point projection of a candidate.
    #[inline]
    pub fn points(&self, candidate: CandidateIndex) -> Points {
        self.points[candidate.get()]
    }

    /// Returns the position of a candidate.
    #[inline]
    pub fn position(&self, candidate: CandidateIndex) -> Position {
        self.positions[candidate.get()]
    }

    /// Returns the interned team of a candidate.
    #[inline]
    pub fn team(&self, candidate: CandidateIndex) -> TeamIndex {
        self.teams[candidate.get()]
    }

    /// Returns the interned opposing team of a candidate.
    #[inline]
    pub fn opponent(&self, candidate: CandidateIndex) -> TeamIndex {
        self.opponents[candidate.get()]
    }

    /// Returns the team code for an interned team index.
    #[inline]
    pub fn team_name(&self, team: TeamIndex) -> &str {
        &self.team_names[team.get()]
    }

    /// Returns the display name of a slot.
    #[inline]
    pub fn slot_name(&self, slot: SlotIndex) -> &str {
        &self.slots[slot.get()].name
    }

    /// Returns the eligibility bitmask of a slot.
    #[inline]
    pub fn slot_eligible(&self, slot: SlotIndex) -> PositionSet {
        self.slots[slot.get()].eligible
    }

    /// Returns the declaration index of the spec a slot was expanded from.
    /// Slots sharing a spec are interchangeable.
    #[inline]
    pub fn slot_spec(&self, slot: SlotIndex) -> usize {
        self.slots[slot.get()].spec
    }

    /// Returns the eligible candidates for a slot, sorted by descending
    /// projection with candidate id as the tie key.
    #[inline]
    pub fn eligible_candidates(&self, slot: SlotIndex) -> &[CandidateIndex] {
        &self.spec_eligibles[self.slots[slot.get()].spec]
    }

    /// Returns the candidates playing a given position.
    #[inline]
    pub fn candidates_at(&self, position: Position) -> &[CandidateIndex] {
        &self.by_position[position as usize]
    }

    /// Returns the candidates on a given team.
    #[inline]
    pub fn candidates_on(&self, team: TeamIndex) -> &[CandidateIndex] {
        &self.by_team[team.get()]
    }

    /// Returns the WR/TE candidates on a given team, the ones that can
    /// satisfy stack and bring-back rules.
    #[inline]
    pub fn pass_catchers_on(&self, team: TeamIndex) -> &[CandidateIndex] {
        &self.pass_catchers_by_team[team.get()]
    }
}
