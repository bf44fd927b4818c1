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

//! # gridiron-solver
//!
//! The high-level entry point of the gridiron lineup optimizer. Build a
//! `LineupModel` from a candidate pool and roster configuration (or load one
//! with `gridiron_model::loading`), then:
//!
//! ```
//! use gridiron_model::{
//!     model::LineupModel,
//!     roster::{Candidate, Position, RosterConfig, SlotSpec},
//! };
//! use gridiron_solver::{report::LineupResult, solver::SolverBuilder};
//!
//! let pool = vec![
//!     Candidate::new(1, "QB One", "KC", "BUF", Position::Qb, 8_000, 24.0),
//!     Candidate::new(2, "QB Two", "BUF", "KC", Position::Qb, 7_500, 22.0),
//! ];
//! let config = RosterConfig::new(
//!     8_000,
//!     vec![SlotSpec::new("QB", vec![Position::Qb], 1)],
//! );
//! let model = LineupModel::build(pool, config).unwrap();
//!
//! let outcome = SolverBuilder::new().build().solve(&model);
//! let report = LineupResult::from_outcome(&model, &outcome);
//! assert!(report.success && report.optimal);
//! assert_eq!(report.total_salary, 8_000);
//! ```

pub mod report;
pub mod solver;
