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

//! Slate loader for the lineup-optimization domain.
//!
//! This module turns JSON slate documents into a validated `LineupModel`,
//! mapping candidate records and the roster configuration into the compact
//! layout consumed by the solvers.
//!
//! The document shape matches the external wire contract: a `candidates`
//! array of player records and a `config` object holding the salary cap,
//! roster shape, and constraint settings, all in camelCase. The loader
//! accepts any `Read`, a file path, or a string slice, making it convenient
//! to integrate with benchmarks, tests, and tooling. Validation happens in
//! `LineupModel::build`, so a document that parses but describes an
//! unsatisfiable roster still fails with a descriptive error before any
//! search is attempted.

use crate::{
    model::{LineupModel, ModelError},
    roster::{Candidate, RosterConfig},
};
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::Path};

/// The error type for the slate loading process.
#[derive(Debug)]
pub enum SlateLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The document is not valid JSON or does not match the wire contract.
    Json(serde_json::Error),
    /// The document parsed but fails model validation.
    Model(ModelError),
}

impl std::fmt::Display for SlateLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlateLoaderError::Io(err) => write!(f, "failed to read slate: {err}"),
            SlateLoaderError::Json(err) => write!(f, "failed to parse slate: {err}"),
            SlateLoaderError::Model(err) => write!(f, "invalid slate: {err}"),
        }
    }
}

impl std::error::Error for SlateLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SlateLoaderError::Io(err) => Some(err),
            SlateLoaderError::Json(err) => Some(err),
            SlateLoaderError::Model(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SlateLoaderError {
    fn from(err: std::io::Error) -> Self {
        SlateLoaderError::Io(err)
    }
}

impl From<serde_json::Error> for SlateLoaderError {
    fn from(err: serde_json::Error) -> Self {
        SlateLoaderError::Json(err)
    }
}

impl From<ModelError> for SlateLoaderError {
    fn from(err: ModelError) -> Self {
        SlateLoaderError::Model(err)
    }
}

/// A parsed slate document: the candidate pool plus the roster
/// configuration, exactly as supplied by the pool provider and the
/// configuration source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlateDocument {
    /// The candidate pool.
    pub candidates: Vec<Candidate>,
    /// The roster configuration.
    pub config: RosterConfig,
}

impl SlateDocument {
    /// Parses a slate document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SlateLoaderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a slate document from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SlateLoaderError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Parses a slate document from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SlateLoaderError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Consumes the document and builds the validated constraint model.
    pub fn into_model(self) -> Result<LineupModel, SlateLoaderError> {
        Ok(LineupModel::build(self.candidates, self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::ConfigError;

    const SLATE: &str = r#"{
        "candidates": [
            {"id": 1, "name": "QB One", "team": "KC", "opponentTeam": "BUF",
             "position": "QB", "salary": 8000, "projectedPoints": 24.0},
            {"id": 2, "name": "RB One", "team": "SF", "opponentTeam": "DAL",
             "position": "RB", "salary": 7000, "projectedPoints": 20.5}
        ],
        "config": {
            "salaryCap": 20000,
            "rosterSize": 2,
            "slots": [
                {"name": "QB", "eligiblePositions": ["QB"], "count": 1},
                {"name": "RB", "eligiblePositions": ["RB"], "count": 1}
            ],
            "maxPerTeam": 3,
            "enforceQbStack": false,
            "enforceBringback": false,
            "deadlineMs": 5000
        }
    }"#;

    #[test]
    fn test_parse_slate_document() {
        let doc = SlateDocument::from_json_str(SLATE).unwrap();
        assert_eq!(doc.candidates.len(), 2);
        assert_eq!(doc.config.salary_cap, 20_000);
        assert_eq!(doc.config.max_per_team, Some(3));
        assert_eq!(doc.config.deadline_ms, Some(5_000));
        assert_eq!(doc.config.workers, None);
    }

    #[test]
    fn test_optional_fields_default() {
        let doc = SlateDocument::from_json_str(
            r#"{
                "candidates": [],
                "config": {
                    "salaryCap": 100,
                    "rosterSize": 1,
                    "slots": [{"name": "QB", "eligiblePositions": ["QB"], "count": 1}]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.config.max_per_team, None);
        assert!(!doc.config.enforce_qb_stack);
        assert!(!doc.config.enforce_bringback);
    }

    #[test]
    fn test_into_model() {
        let model = SlateDocument::from_json_str(SLATE)
            .unwrap()
            .into_model()
            .unwrap();
        assert_eq!(model.num_candidates(), 2);
        assert_eq!(model.num_slots(), 2);
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let err = SlateDocument::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SlateLoaderError::Json(_)));
    }

    #[test]
    fn test_unknown_position_is_a_json_error() {
        let err = SlateDocument::from_json_str(
            r#"{
                "candidates": [
                    {"id": 1, "name": "X", "team": "KC", "opponentTeam": "BUF",
                     "position": "LB", "salary": 1, "projectedPoints": 1.0}
                ],
                "config": {
                    "salaryCap": 100,
                    "rosterSize": 1,
                    "slots": [{"name": "QB", "eligiblePositions": ["QB"], "count": 1}]
                }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SlateLoaderError::Json(_)));
    }

    #[test]
    fn test_invalid_model_is_a_model_error() {
        // No QB in the pool for a QB slot.
        let err = SlateDocument::from_json_str(
            r#"{
                "candidates": [
                    {"id": 1, "name": "X", "team": "KC", "opponentTeam": "BUF",
                     "position": "RB", "salary": 100, "projectedPoints": 1.0}
                ],
                "config": {
                    "salaryCap": 100,
                    "rosterSize": 1,
                    "slots": [{"name": "QB", "eligiblePositions": ["QB"], "count": 1}]
                }
            }"#,
        )
        .unwrap()
        .into_model()
        .unwrap_err();
        assert!(matches!(
            err,
            SlateLoaderError::Model(ModelError::InsufficientCandidates { .. })
        ));
    }

    #[test]
    fn test_zero_cap_is_a_config_error() {
        let err = SlateDocument::from_json_str(
            r#"{
                "candidates": [],
                "config": {
                    "salaryCap": 0,
                    "rosterSize": 1,
                    "slots": [{"name": "QB", "eligiblePositions": ["QB"], "count": 1}]
                }
            }"#,
        )
        .unwrap()
        .into_model()
        .unwrap_err();
        assert!(matches!(
            err,
            SlateLoaderError::Model(ModelError::Config(
                ConfigError::NonPositiveSalaryCap { .. }
            ))
        ));
    }
}
