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

//! The result formatter: converts a solver outcome into the wire-contract
//! `LineupResult` callers receive.
//!
//! Rows are sorted by `(slot name, candidate id)` for stable presentation; a
//! deadline-truncated run is a *successful* result with `optimal: false`,
//! while proven infeasibility and empty aborts surface as failures with a
//! diagnostic error string (including the binding slots when the search
//! proved them).

use gridiron_model::{index::SlotIndex, model::LineupModel, roster::Position, solution::Lineup};
use gridiron_search::result::{SolverOutcome, SolverResult, TerminationReason};
use serde::{Deserialize, Serialize};

/// One selected player in the lineup report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupEntry {
    /// The slot this player occupies.
    pub slot: String,
    /// The candidate's id.
    pub candidate_id: i64,
    /// Display name.
    pub name: String,
    /// Team code.
    pub team: String,
    /// Roster position.
    pub position: Position,
    /// Salary.
    pub salary: i64,
    /// Projected fantasy points.
    pub projected_points: f64,
}

/// The constraint settings echoed back with every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsEcho {
    /// The salary cap the lineup was optimized under.
    pub salary_cap: i64,
    /// The roster size.
    pub roster_size: usize,
    /// The per-team limit, if one was set.
    pub max_per_team: Option<u32>,
    /// Whether a QB stack was required.
    pub enforce_qb_stack: bool,
    /// Whether a bring-back was required.
    pub enforce_bringback: bool,
}

/// The wire-contract result of a lineup optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupResult {
    /// Whether a feasible lineup is being returned.
    pub success: bool,
    /// The selected players, sorted by `(slot, candidateId)`. Empty on
    /// failure.
    pub lineup: Vec<LineupEntry>,
    /// Total salary spent. Zero on failure.
    pub total_salary: i64,
    /// Total projected points. Zero on failure.
    pub total_projection: f64,
    /// The salary cap in force.
    pub salary_cap: i64,
    /// Whether the lineup is proven optimal (as opposed to the best found
    /// before a deadline or budget truncated the search).
    pub optimal: bool,
    /// The failure diagnostic, `null` on success.
    pub error: Option<String>,
    /// The constraint settings in force.
    pub settings: SettingsEcho,
}

impl LineupResult {
    /// Builds the report for an outcome produced over the given model.
    pub fn from_outcome(model: &LineupModel, outcome: &SolverOutcome) -> Self {
        let settings = SettingsEcho {
            salary_cap: model.salary_cap(),
            roster_size: model.num_slots(),
            max_per_team: model.max_per_team(),
            enforce_qb_stack: model.enforce_qb_stack(),
            enforce_bringback: model.enforce_bringback(),
        };

        match outcome.result() {
            SolverResult::Optimal(lineup) => {
                Self::success(model, lineup, true, settings)
            }
            SolverResult::Feasible(lineup) => {
                Self::success(model, lineup, false, settings)
            }
            SolverResult::Infeasible => {
                let binding = &outcome.statistics().unfillable_slots;
                let error = if binding.is_empty() {
                    "no feasible lineup under the configured constraints".to_string()
                } else {
                    format!(
                        "no feasible lineup under the configured constraints (binding slots: {})",
                        binding.join(", ")
                    )
                };
                Self::failure(model, error, settings)
            }
            SolverResult::Unknown => {
                let error = match outcome.reason() {
                    TerminationReason::Aborted(reason) => {
                        format!("search aborted before any lineup was found: {reason}")
                    }
                    reason => format!("search ended without a lineup: {reason}"),
                };
                Self::failure(model, error, settings)
            }
        }
    }

    fn success(
        model: &LineupModel,
        lineup: &Lineup,
        optimal: bool,
        settings: SettingsEcho,
    ) -> Self {
        let mut entries: Vec<LineupEntry> = lineup
            .candidates()
            .iter()
            .enumerate()
            .map(|(index, &candidate)| {
                let record = model.candidate(candidate);
                LineupEntry {
                    slot: model.slot_name(SlotIndex::new(index)).to_string(),
                    candidate_id: record.id,
                    name: record.name.clone(),
                    team: record.team.clone(),
                    position: record.position,
                    salary: record.salary,
                    projected_points: record.projected_points,
                }
            })
            .collect();
        entries.sort_by(|a, b| a.slot.cmp(&b.slot).then(a.candidate_id.cmp(&b.candidate_id)));

        Self {
            success: true,
            lineup: entries,
            total_salary: lineup.total_salary(),
            total_projection: lineup.total_points().as_f64(),
            salary_cap: model.salary_cap(),
            optimal,
            error: None,
            settings,
        }
    }

    fn failure(model: &LineupModel, error: String, settings: SettingsEcho) -> Self {
        Self {
            success: false,
            lineup: Vec::new(),
            total_salary: 0,
            total_projection: 0.0,
            salary_cap: model.salary_cap(),
            optimal: false,
            error: Some(error),
            settings,
        }
    }
}
