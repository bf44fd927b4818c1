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

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use gridiron_bnb::{
    bnb::BnbSolver,
    eval::{ProjectionBound, UnboundedEvaluator},
    monitor::NoOperationMonitor,
};
use gridiron_model::{
    model::LineupModel,
    roster::{Candidate, Position, RosterConfig, SlotSpec},
};

/// A synthetic slate with deterministic pseudo-random salaries and
/// projections: `teams` games, a handful of players per position per team.
fn synthetic_model(stack: bool) -> LineupModel {
    let teams = [
        ("KC", "BUF"),
        ("BUF", "KC"),
        ("SF", "DAL"),
        ("DAL", "SF"),
        ("PHI", "NYG"),
        ("NYG", "PHI"),
    ];

    let mut pool = Vec::new();
    let mut id = 0i64;
    let push = |pool: &mut Vec<Candidate>,
                    id: &mut i64,
                    team: &str,
                    opponent: &str,
                    position: Position,
                    salary: i64,
                    projection: f64| {
        pool.push(Candidate::new(
            *id,
            format!("P{id}"),
            team,
            opponent,
            position,
            salary,
            projection,
        ));
        *id += 1;
    };

    for (t, (team, opponent)) in teams.into_iter().enumerate() {
        let t = t as i64;
        push(&mut pool, &mut id, team, opponent, Position::Qb, 6_000 + t * 300, 20.0 + t as f64);
        for k in 0..3i64 {
            push(
                &mut pool,
                &mut id,
                team,
                opponent,
                Position::Rb,
                4_500 + t * 200 + k * 400,
                11.0 + (t * 2 + k) as f64 * 0.9,
            );
            push(
                &mut pool,
                &mut id,
                team,
                opponent,
                Position::Wr,
                4_000 + t * 250 + k * 500,
                10.0 + (t + k * 2) as f64 * 1.1,
            );
        }
        push(&mut pool, &mut id, team, opponent, Position::Te, 3_000 + t * 150, 7.0 + t as f64 * 0.8);
        push(&mut pool, &mut id, team, opponent, Position::Dst, 2_500 + t * 100, 6.0 + t as f64 * 0.5);
    }

    let config = RosterConfig::new(
        50_000,
        vec![
            SlotSpec::new("QB", vec![Position::Qb], 1),
            SlotSpec::new("RB", vec![Position::Rb], 2),
            SlotSpec::new("WR", vec![Position::Wr], 3),
            SlotSpec::new("TE", vec![Position::Te], 1),
            SlotSpec::new(
                "FLEX",
                vec![Position::Rb, Position::Wr, Position::Te],
                1,
            ),
            SlotSpec::new("DST", vec![Position::Dst], 1),
        ],
    )
    .with_max_per_team(3)
    .with_qb_stack(stack);

    LineupModel::build(pool, config).unwrap()
}

fn bench_bounded_solve(c: &mut Criterion) {
    let model = synthetic_model(false);
    c.bench_function("bnb_solve_projection_bound", |b| {
        b.iter_batched(
            || (BnbSolver::new(), ProjectionBound::new()),
            |(mut solver, mut evaluator)| {
                solver.solve(&model, &mut evaluator, NoOperationMonitor::new())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_stacked_solve(c: &mut Criterion) {
    let model = synthetic_model(true);
    c.bench_function("bnb_solve_with_stack", |b| {
        b.iter_batched(
            || (BnbSolver::new(), ProjectionBound::new()),
            |(mut solver, mut evaluator)| {
                solver.solve(&model, &mut evaluator, NoOperationMonitor::new())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_unbounded_small(c: &mut Criterion) {
    // The unbounded search is exponential; bench it on a reduced shape.
    let mut model = synthetic_model(false);
    let config = RosterConfig::new(
        20_000,
        vec![
            SlotSpec::new("QB", vec![Position::Qb], 1),
            SlotSpec::new("RB", vec![Position::Rb], 1),
            SlotSpec::new("WR", vec![Position::Wr], 1),
        ],
    );
    let pool: Vec<Candidate> = (0..model.num_candidates())
        .map(|i| model.candidate(gridiron_model::index::CandidateIndex::new(i)).clone())
        .take(18)
        .collect();
    model = LineupModel::build(pool, config).unwrap();

    c.bench_function("bnb_solve_unbounded_small", |b| {
        b.iter_batched(
            || (BnbSolver::new(), UnboundedEvaluator::new()),
            |(mut solver, mut evaluator)| {
                solver.solve(&model, &mut evaluator, NoOperationMonitor::new())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_bounded_solve,
    bench_stacked_solve,
    bench_unbounded_small
);
criterion_main!(benches);
