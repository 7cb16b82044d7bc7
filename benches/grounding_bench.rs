//! Criterion benchmarks for rule anchoring.
//!
//! Uses synthetic states with random value domains to measure the cost of
//! linearisation and aggregation independent of any dialogue domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use u_anchor::anchor::{AnchoredRule, GroundingConfig, GroundingRunner};
use u_anchor::domain::{Assignment, Value, ValueDomain};
use u_anchor::error::RuleError;
use u_anchor::rules::{Effect, Rule, RuleKind, RuleOutput};
use u_anchor::state::DialogueState;

// ===========================================================================
// Parity rule: sums integer inputs and writes the parity to `out`
// ===========================================================================

struct ParityRule {
    id: String,
    inputs: BTreeSet<String>,
}

impl Rule for ParityRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn input_variables(&self) -> BTreeSet<String> {
        self.inputs.clone()
    }

    fn output_variables(&self) -> BTreeSet<String> {
        ["out".to_string()].into()
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Probability
    }

    fn evaluate(&self, input: &Assignment) -> Result<RuleOutput, RuleError> {
        let sum: i64 = input
            .iter()
            .map(|(_, v)| match v {
                Value::Int(i) => *i,
                _ => 0,
            })
            .sum();
        let effect = Effect::new().with("out", sum % 2 == 0);
        Ok(RuleOutput::new(self.kind()).with_effect(effect, [format!("theta_{}", sum % 5)]))
    }
}

fn random_state(rng: &mut StdRng, vars: usize, max_values: i64) -> DialogueState {
    (0..vars).fold(DialogueState::new(), |state, i| {
        let n = rng.random_range(2..=max_values);
        state.with_node(format!("v{i}"), 0..n)
    })
}

fn parity_rule(id: usize, vars: usize) -> ParityRule {
    ParityRule {
        id: format!("parity_{id}"),
        inputs: (0..vars).map(|i| format!("v{i}")).collect(),
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_linearise(c: &mut Criterion) {
    let mut group = c.benchmark_group("linearise");
    group.sample_size(20);

    for &vars in &[2usize, 4, 6] {
        let mut domain = ValueDomain::new();
        for i in 0..vars {
            domain.add_values(format!("v{i}"), 0..4i64);
        }
        group.bench_with_input(BenchmarkId::from_parameter(vars), &domain, |b, d| {
            b.iter(|| black_box(d.linearise()))
        });
    }
    group.finish();
}

fn bench_anchor_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchor_single");
    group.sample_size(20);

    let mut rng = StdRng::seed_from_u64(42);
    for &vars in &[2usize, 4, 6] {
        let state = random_state(&mut rng, vars, 5);
        let rule = parity_rule(0, vars);
        let config = GroundingConfig::unbounded();
        group.bench_with_input(
            BenchmarkId::from_parameter(vars),
            &(rule, state, config),
            |b, (r, s, c)| {
                b.iter(|| {
                    let anchored = AnchoredRule::with_config(black_box(r), black_box(s), c);
                    black_box(anchored.map(|a| a.effects().len()))
                })
            },
        );
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchor_batch");
    group.sample_size(10);

    let mut rng = StdRng::seed_from_u64(7);
    let state = random_state(&mut rng, 5, 4);
    let rules: Vec<ParityRule> = (0..64).map(|i| parity_rule(i, 1 + i % 5)).collect();

    for parallel in [false, true] {
        let config = GroundingConfig::default().with_parallel(parallel);
        let label = if parallel { "parallel" } else { "sequential" };
        group.bench_function(label, |b| {
            b.iter(|| {
                let result = GroundingRunner::run(black_box(&rules), &state, &config);
                black_box(result.map(|r| r.relevant))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_linearise, bench_anchor_single, bench_batch);
criterion_main!(benches);
