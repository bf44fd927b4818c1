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

//! # Shared Incumbent (Best Lineup Holder)
//!
//! A concurrent container for the best lineup discovered so far during
//! search. It exposes a fast, lock-free objective bound via an atomic and
//! stores the actual `Lineup` behind a `Mutex` as the source of truth.
//! Designed for exact search pipelines where multiple workers propose
//! improvements.
//!
//! ## Motivation
//!
//! - Fast heuristic checks: a cheap atomic bound short-circuits attempts to
//!   install obviously worse candidates without locking, and gives the
//!   pruning test a one-load read.
//! - Correctness by locking: the authoritative incumbent is protected by a
//!   `Mutex`, and the comparison under the lock is the full deterministic
//!   total order (points, then salary, then the sorted id tuple), not just
//!   the objective. Ties therefore resolve to the same winner no matter
//!   which worker found which lineup first.
//! - Simple sentinel: `best_points_raw` starts at `i64::MIN`, meaning "no
//!   incumbent yet." The engine maximizes, and no real projection reaches
//!   the sentinel.

use gridiron_model::{points::Points, solution::Lineup};
use std::sync::{atomic::AtomicI64, Mutex};

/// A concurrent holder for the best (incumbent) lineup found during search.
///
/// This structure maintains:
/// - an `AtomicI64` objective bound (raw milli-points) for fast, lock-free
///   reads, and
/// - a `Mutex<Option<Lineup>>` for the actual lineup, which is the source of
///   truth.
///
/// Concurrency and memory ordering:
/// - The bound is loaded/stored with `Ordering::Relaxed`. This is sufficient
///   because it serves as a heuristic to short-circuit work; all
///   correctness-sensitive state (the lineup and its tie-break key) is
///   synchronized via the `Mutex`.
#[derive(Debug)]
pub struct SharedIncumbent {
    /// Objective of the incumbent lineup as raw milli-points, for atomic
    /// access. `i64::MIN` means "no lineup installed yet."
    best_points: AtomicI64,

    /// The incumbent lineup, protected by a mutex for safe concurrent
    /// access.
    lineup: Mutex<Option<Lineup>>,
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SharedIncumbent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incumbent(best_points: {})",
            Points::from_raw(self.best_points_raw())
        )
    }
}

impl SharedIncumbent {
    /// Creates a new shared incumbent with no lineup installed.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            best_points: AtomicI64::new(i64::MIN),
            lineup: Mutex::new(None),
        }
    }

    /// Returns the current best objective as raw milli-points. `i64::MIN`
    /// means no incumbent has been installed yet.
    #[inline]
    pub fn best_points_raw(&self) -> i64 {
        self.best_points.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Returns a snapshot of the current incumbent lineup, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Lineup> {
        let guard = self.lineup.lock().unwrap();
        guard.clone()
    }

    /// Attempts to install the given candidate lineup as the new incumbent.
    /// Returns `true` if the candidate was installed, `false` otherwise.
    ///
    /// The fast path rejects candidates whose objective is strictly below
    /// the atomic bound; candidates at or above it are compared against the
    /// mutex-held lineup with the full deterministic total order, so a
    /// point-tie can still win on salary or id tuple.
    pub fn try_install(&self, candidate: &Lineup) -> bool {
        let candidate_points = candidate.total_points().raw();
        if candidate_points < self.best_points_raw() {
            return false;
        }

        let mut guard = self.lineup.lock().unwrap();
        // Another worker might have updated the lineup while we were waiting
        // for the lock. Compare against the *actual* lineup in the mutex,
        // not the atomic hint read earlier.
        if let Some(current) = guard.as_ref() {
            if !candidate.is_better_than(current) {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        self.best_points
            .store(candidate_points, std::sync::atomic::Ordering::Relaxed);

        true
    }
}
