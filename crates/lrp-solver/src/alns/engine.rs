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

//! The annealing driver: weighted (destroy, repair) sampling, simulated
//! annealing acceptance, segment-based weight adaption and a periodic
//! local-search sweep.

use crate::{
    alns::params::AlnsParams,
    err::ConfigError,
    eval::{CostPhases, objective},
    search::{destroy::RemovalOp, local::LocalOp, registry, repair::InsertionOp},
    state::solution::Solution,
};
use rand::{
    Rng,
    distr::{Distribution, weighted::WeightedIndex},
};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::{debug, info};

/// Weights never fall below this, so no operator starves out entirely.
const WEIGHT_FLOOR: f64 = 1e-2;

/// One configured annealing engine. Catalogs are resolved up front, so an
/// unknown operator name fails construction rather than a run.
#[derive(Debug)]
pub struct Alns {
    params: AlnsParams,
    destroy: Vec<RemovalOp>,
    repair: Vec<InsertionOp>,
    local: Vec<LocalOp>,
}

/// Per-catalog adaptive bookkeeping for one run.
struct WeightTable {
    weights: Vec<f64>,
    scores: Vec<f64>,
    used: Vec<u64>,
}

impl WeightTable {
    fn new(n: usize) -> Self {
        Self {
            weights: vec![1.0; n],
            scores: vec![0.0; n],
            used: vec![0; n],
        }
    }

    fn sample(&self, rng: &mut ChaCha8Rng) -> usize {
        WeightedIndex::new(self.weights.iter().cloned())
            .expect("weights are positive and finite")
            .sample(rng)
    }

    fn reward(&mut self, ix: usize, score: f64) {
        self.scores[ix] += score;
    }

    /// Blend the segment's average score into the weights and reset.
    fn roll_segment(&mut self, reaction: f64) {
        for ix in 0..self.weights.len() {
            if self.used[ix] > 0 {
                let mean = self.scores[ix] / self.used[ix] as f64;
                self.weights[ix] =
                    (reaction * mean + (1.0 - reaction) * self.weights[ix]).max(WEIGHT_FLOOR);
            }
            self.scores[ix] = 0.0;
            self.used[ix] = 0;
        }
    }
}

impl Alns {
    pub fn new(params: AlnsParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let destroy = params
            .destroy_ops
            .iter()
            .map(|name| registry::destroy(name))
            .collect::<Result<Vec<_>, _>>()?;
        let repair = params
            .repair_ops
            .iter()
            .map(|name| registry::repair(name))
            .collect::<Result<Vec<_>, _>>()?;
        let local = params
            .local_ops
            .iter()
            .map(|name| registry::local(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            params,
            destroy,
            repair,
            local,
        })
    }

    #[inline]
    pub fn params(&self) -> &AlnsParams {
        &self.params
    }

    /// Anneals from `initial` and returns the best-seen solution after
    /// every iteration (plus one entry per local-search improvement), so
    /// callers can plot convergence. The sequence is non-increasing in
    /// objective.
    pub fn run<'p>(&self, rng: &mut ChaCha8Rng, initial: &Solution<'p>) -> Vec<Solution<'p>> {
        let p = &self.params;
        let num_customers = initial.customers().len() as f64;
        let z_initial = objective(initial, CostPhases::ALL);

        let mut current = initial.clone();
        let mut z_cur = z_initial;
        let mut best = initial.clone();
        let mut z_best = z_initial;

        let mut temp = p.start_ratio * z_initial / (1.0 / p.start_accept).ln();
        let temp_floor = p.floor_ratio * z_initial / (1.0 / p.floor_accept).ln();

        let mut destroy_stats = WeightTable::new(self.destroy.len());
        let mut repair_stats = WeightTable::new(self.repair.len());

        let mut seen: HashSet<u64> = HashSet::new();
        seen.insert(initial.state_key());

        let mut out = Vec::with_capacity(p.iterations);

        info!(
            iterations = p.iterations,
            destroy = self.destroy.len(),
            repair = self.repair.len(),
            local = self.local.len(),
            objective = z_initial,
            "Starting annealing run"
        );

        for iter in 0..p.iterations {
            let di = destroy_stats.sample(rng);
            let ri = repair_stats.sample(rng);
            destroy_stats.used[di] += 1;
            repair_stats.used[ri] += 1;

            let eta = rng.random::<f64>();
            let lo = (p.removal_min as f64).min(p.removal_min_share * num_customers);
            let hi = (p.removal_max as f64).min(p.removal_max_share * num_customers);
            let q = (((1.0 - eta) * lo + eta * hi).floor() as usize).max(1);

            let mut trial = current.clone();
            self.destroy[di].apply(rng, q, &mut trial);
            self.repair[ri].apply(rng, &mut trial);
            let z_new = objective(&trial, CostPhases::ALL);
            let key = trial.state_key();

            if z_new < z_best {
                destroy_stats.reward(di, p.score_best);
                repair_stats.reward(ri, p.score_best);
                seen.insert(key);
                current = trial;
                z_cur = z_new;
                best = current.clone();
                z_best = z_new;
                debug!(iteration = iter, objective = z_best, "New global best");
            } else if z_new < z_cur {
                if seen.insert(key) {
                    destroy_stats.reward(di, p.score_improve);
                    repair_stats.reward(ri, p.score_improve);
                }
                current = trial;
                z_cur = z_new;
            } else {
                let prob = (-(z_new - z_cur) / temp.max(1e-12)).exp();
                if rng.random::<f64>() < prob {
                    if seen.insert(key) {
                        destroy_stats.reward(di, p.score_accept);
                        repair_stats.reward(ri, p.score_accept);
                    }
                    current = trial;
                    z_cur = z_new;
                }
            }

            temp = (temp * p.cooling).max(temp_floor);
            out.push(best.clone());

            if (iter + 1) % p.segment == 0 {
                destroy_stats.roll_segment(p.reaction);
                repair_stats.roll_segment(p.reaction);
                debug!(iteration = iter, temperature = temp, "Segment rolled");
            }

            if p.local_search_cadence > 0
                && (iter + 1) % p.local_search_cadence == 0
                && !self.local.is_empty()
            {
                for op in &self.local {
                    op.apply(rng, p.local_search_budget, &mut current);
                }
                z_cur = objective(&current, CostPhases::ALL);
                if z_cur < z_best {
                    z_best = z_cur;
                    best = current.clone();
                    seen.insert(best.state_key());
                    out.push(best.clone());
                    debug!(iteration = iter, objective = z_best, "Local search improved best");
                }
            }
        }

        info!(
            objective = z_best,
            improvement = z_initial - z_best,
            states_seen = seen.len(),
            "Annealing run finished"
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::{InitMethod, initial_solution};
    use crate::state::audit::audit;
    use crate::{eval, testutil};
    use rand::SeedableRng;

    fn quick_params(iterations: usize) -> AlnsParams {
        AlnsParams {
            iterations,
            segment: 4,
            local_search_cadence: 0,
            local_search_budget: 0,
            destroy_ops: vec!["random_customer".into()],
            repair_ops: vec!["best".into()],
            local_ops: vec![],
            ..AlnsParams::default()
        }
    }

    #[test]
    fn test_unknown_operator_fails_construction() {
        let mut p = quick_params(10);
        p.destroy_ops = vec!["bogus".into()];
        assert!(Alns::new(p).is_err());
    }

    #[test]
    fn test_best_sequence_is_monotone_and_final_state_sound() {
        let inst = testutil::ring_instance(10, 2, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        let s0 = initial_solution(&mut rng, &inst, InitMethod::Cluster).unwrap();
        let z0 = objective(&s0, CostPhases::ALL);

        let engine = Alns::new(quick_params(60)).unwrap();
        let bests = engine.run(&mut rng, &s0);
        assert_eq!(bests.len(), 60);

        let mut prev = f64::INFINITY;
        for b in &bests {
            let z = objective(b, CostPhases::ALL);
            assert!(z <= prev + 1e-9);
            prev = z;
        }
        let last = bests.last().unwrap();
        assert!(objective(last, CostPhases::ALL) <= z0);
        assert!(eval::is_feasible(last));
        audit(last).unwrap();
    }

    #[test]
    fn test_equal_seeds_reproduce_the_run() {
        let inst = testutil::ring_instance(8, 2, 4.0);
        let engine = Alns::new(quick_params(40)).unwrap();

        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let s0 = initial_solution(&mut rng, &inst, InitMethod::ClarkeWright).unwrap();
            engine
                .run(&mut rng, &s0)
                .iter()
                .map(|s| s.vectorize())
                .collect::<Vec<_>>()
        };

        assert_eq!(run(77), run(77));
    }

    #[test]
    fn test_full_catalog_run_stays_sound() {
        let inst = testutil::ring_instance(12, 2, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let s0 = initial_solution(&mut rng, &inst, InitMethod::Regret2).unwrap();
        let params = AlnsParams {
            iterations: 30,
            segment: 4,
            local_search_cadence: 10,
            local_search_budget: 10,
            ..AlnsParams::default()
        };
        let engine = Alns::new(params).unwrap();
        let bests = engine.run(&mut rng, &s0);
        assert!(!bests.is_empty());
        let last = bests.last().unwrap();
        audit(last).unwrap();
        assert_eq!(last.num_open(), 0);
    }
}
