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

//! # Roster Input Types
//!
//! The value types a caller hands to the model builder: player positions,
//! position sets for slot eligibility, candidate records, slot specifications,
//! and the roster configuration with its validation rules. These mirror the
//! external wire contract (camelCase JSON) and stay free of any search-time
//! machinery.

use serde::{Deserialize, Serialize};

/// A player position.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Qb,
    #[serde(rename = "RB")]
    Rb,
    #[serde(rename = "WR")]
    Wr,
    #[serde(rename = "TE")]
    Te,
    #[serde(rename = "K")]
    K,
    #[serde(rename = "DST")]
    Dst,
}

impl Position {
    /// All positions, in canonical order.
    pub const ALL: [Position; 6] = [
        Position::Qb,
        Position::Rb,
        Position::Wr,
        Position::Te,
        Position::K,
        Position::Dst,
    ];

    /// The bit this position occupies in a `PositionSet`.
    #[inline(always)]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Whether this position is a pass catcher (WR or TE), the positions
    /// that satisfy stacking and bring-back correlation rules.
    #[inline(always)]
    pub const fn is_pass_catcher(self) -> bool {
        matches!(self, Position::Wr | Position::Te)
    }

    /// The canonical abbreviation, as it appears on the wire.
    pub const fn abbrev(self) -> &'static str {
        match self {
            Position::Qb => "QB",
            Position::Rb => "RB",
            Position::Wr => "WR",
            Position::Te => "TE",
            Position::K => "K",
            Position::Dst => "DST",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QB" => Ok(Position::Qb),
            "RB" => Ok(Position::Rb),
            "WR" => Ok(Position::Wr),
            "TE" => Ok(Position::Te),
            "K" => Ok(Position::K),
            "DST" => Ok(Position::Dst),
            other => Err(format!("unknown position: {other}")),
        }
    }
}

/// A set of positions, stored as a bitmask.
///
/// Slot eligibility is the hot membership query of the whole engine, so the
/// set compiles down to a single byte and a mask test.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PositionSet(u8);

impl PositionSet {
    /// The empty set.
    pub const EMPTY: PositionSet = PositionSet(0);

    /// The pass-catcher set (WR | TE) used by correlation rules.
    pub const PASS_CATCHERS: PositionSet =
        PositionSet(Position::Wr.bit() | Position::Te.bit());

    /// Creates a set containing exactly one position.
    #[inline(always)]
    pub const fn only(position: Position) -> Self {
        PositionSet(position.bit())
    }

    /// Creates a set from a slice of positions.
    pub fn from_slice(positions: &[Position]) -> Self {
        let mut mask = 0u8;
        for p in positions {
            mask |= p.bit();
        }
        PositionSet(mask)
    }

    /// Returns a copy of this set with `position` added.
    #[inline(always)]
    pub const fn with(self, position: Position) -> Self {
        PositionSet(self.0 | position.bit())
    }

    /// Whether `position` is a member of this set.
    #[inline(always)]
    pub const fn contains(&self, position: Position) -> bool {
        self.0 & position.bit() != 0
    }

    /// Whether this set shares at least one position with `other`.
    #[inline(always)]
    pub const fn intersects(&self, other: PositionSet) -> bool {
        self.0 & other.0 != 0
    }

    /// The number of positions in this set.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether this set is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the member positions in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|p| self.contains(*p))
    }
}

impl std::fmt::Debug for PositionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PositionSet{{")?;
        for (i, p) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, "}}")
    }
}

impl std::fmt::Display for PositionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, p) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{p}")?;
        }
        Ok(())
    }
}

/// A candidate player, as supplied by the pool provider.
///
/// Immutable once loaded. The model builder interns teams and converts the
/// projection to fixed point; this struct stays on the wire representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Unique candidate id within the slate.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// The candidate's team code (e.g. "KC").
    pub team: String,
    /// The opposing team code in this slate.
    #[serde(rename = "opponentTeam")]
    pub opponent: String,
    /// Roster position.
    pub position: Position,
    /// Salary in contest currency units.
    pub salary: i64,
    /// Projected fantasy points.
    pub projected_points: f64,
}

impl Candidate {
    /// Creates a new candidate record.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        team: impl Into<String>,
        opponent: impl Into<String>,
        position: Position,
        salary: i64,
        projected_points: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team: team.into(),
            opponent: opponent.into(),
            position,
            salary,
            projected_points,
        }
    }
}

/// One slot specification of the roster shape (e.g. `RB x 2`, `FLEX x 1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSpec {
    /// Display name of the slot (e.g. "QB", "FLEX").
    pub name: String,
    /// The positions eligible to occupy this slot.
    #[serde(rename = "eligiblePositions")]
    pub eligible_positions: Vec<Position>,
    /// How many instances of this slot the roster carries.
    pub count: usize,
}

impl SlotSpec {
    /// Creates a new slot specification.
    pub fn new(name: impl Into<String>, eligible_positions: Vec<Position>, count: usize) -> Self {
        Self {
            name: name.into(),
            eligible_positions,
            count,
        }
    }

    /// The eligibility bitmask of this slot.
    #[inline]
    pub fn eligible_set(&self) -> PositionSet {
        PositionSet::from_slice(&self.eligible_positions)
    }
}

/// The full roster configuration for a contest.
///
/// # Examples
///
/// ```
/// use gridiron_model::roster::{Position, RosterConfig, SlotSpec};
///
/// let config = RosterConfig::new(
///     50_000,
///     vec![
///         SlotSpec::new("QB", vec![Position::Qb], 1),
///         SlotSpec::new("RB", vec![Position::Rb], 2),
///     ],
/// )
/// .with_max_per_team(3)
/// .with_qb_stack(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterConfig {
    /// Total salary budget.
    pub salary_cap: i64,
    /// Number of roster spots; must equal the sum of all slot counts.
    pub roster_size: usize,
    /// The roster shape, in presentation order.
    pub slots: Vec<SlotSpec>,
    /// Maximum number of players from a single team, if limited.
    #[serde(default)]
    pub max_per_team: Option<u32>,
    /// Require at least one same-team WR/TE alongside the selected QB.
    #[serde(default)]
    pub enforce_qb_stack: bool,
    /// Require at least one WR/TE from the team opposing the selected QB.
    #[serde(default)]
    pub enforce_bringback: bool,
    /// Wall-clock budget for the search, in milliseconds.
    #[serde(default)]
    pub deadline_ms: Option<u64>,
    /// Worker threads for the parallel search mode. `None` or `Some(1)` runs
    /// the deterministic single-threaded search.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl RosterConfig {
    /// Creates a configuration with the given cap and roster shape. The
    /// roster size is derived from the slot counts.
    pub fn new(salary_cap: i64, slots: Vec<SlotSpec>) -> Self {
        let roster_size = slots.iter().map(|s| s.count).sum();
        Self {
            salary_cap,
            roster_size,
            slots,
            max_per_team: None,
            enforce_qb_stack: false,
            enforce_bringback: false,
            deadline_ms: None,
            workers: None,
        }
    }

    pub fn with_max_per_team(mut self, max_per_team: u32) -> Self {
        self.max_per_team = Some(max_per_team);
        self
    }

    pub fn with_qb_stack(mut self, enforce: bool) -> Self {
        self.enforce_qb_stack = enforce;
        self
    }

    pub fn with_bringback(mut self, enforce: bool) -> Self {
        self.enforce_bringback = enforce;
        self
    }

    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Validates the configuration.
    ///
    /// Checks the structural invariants that must hold before any candidate
    /// pool is even considered: a positive cap, a non-empty roster shape with
    /// positive slot counts and non-empty eligibility sets, slot counts that
    /// sum to the roster size, and a positive team cap when one is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.salary_cap <= 0 {
            return Err(ConfigError::NonPositiveSalaryCap {
                salary_cap: self.salary_cap,
            });
        }
        if self.slots.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        for slot in &self.slots {
            if slot.count == 0 {
                return Err(ConfigError::ZeroSlotCount {
                    slot: slot.name.clone(),
                });
            }
            if slot.eligible_set().is_empty() {
                return Err(ConfigError::EmptyEligibility {
                    slot: slot.name.clone(),
                });
            }
        }
        let total: usize = self.slots.iter().map(|s| s.count).sum();
        if total != self.roster_size {
            return Err(ConfigError::SlotCountMismatch {
                roster_size: self.roster_size,
                slot_total: total,
            });
        }
        if self.max_per_team == Some(0) {
            return Err(ConfigError::ZeroTeamCap);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

/// The error type for malformed roster configurations and candidate records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The salary cap must be a positive integer.
    NonPositiveSalaryCap { salary_cap: i64 },
    /// The roster shape contains no slots.
    EmptyRoster,
    /// A slot was declared with `count == 0`.
    ZeroSlotCount { slot: String },
    /// A slot was declared with an empty eligibility set.
    EmptyEligibility { slot: String },
    /// The slot counts do not sum to the declared roster size.
    SlotCountMismatch { roster_size: usize, slot_total: usize },
    /// `max_per_team` was set to zero.
    ZeroTeamCap,
    /// `workers` was set to zero.
    ZeroWorkers,
    /// Two candidates share the same id.
    DuplicateCandidate { id: i64 },
    /// A candidate carries a non-positive salary.
    NonPositiveSalary { id: i64, salary: i64 },
    /// A candidate carries a NaN or infinite projection.
    InvalidProjection { id: i64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveSalaryCap { salary_cap } => {
                write!(f, "salary cap must be positive, got {salary_cap}")
            }
            ConfigError::EmptyRoster => write!(f, "roster shape contains no slots"),
            ConfigError::ZeroSlotCount { slot } => {
                write!(f, "slot '{slot}' has a count of zero")
            }
            ConfigError::EmptyEligibility { slot } => {
                write!(f, "slot '{slot}' has an empty eligibility set")
            }
            ConfigError::SlotCountMismatch {
                roster_size,
                slot_total,
            } => write!(
                f,
                "slot counts sum to {slot_total} but roster size is {roster_size}"
            ),
            ConfigError::ZeroTeamCap => write!(f, "maxPerTeam must be positive when set"),
            ConfigError::ZeroWorkers => write!(f, "workers must be positive when set"),
            ConfigError::DuplicateCandidate { id } => {
                write!(f, "duplicate candidate id {id}")
            }
            ConfigError::NonPositiveSalary { id, salary } => {
                write!(f, "candidate {id} has non-positive salary {salary}")
            }
            ConfigError::InvalidProjection { id } => {
                write!(f, "candidate {id} has a non-finite projection")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
