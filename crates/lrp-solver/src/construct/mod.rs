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

//! Initial-solution builders. Each method starts from an empty state and
//! must place every customer; a builder that cannot is surfaced as an
//! error, not papered over.

mod cluster;
mod cw;
mod nn;

use crate::{
    err::{ConfigError, InfeasibleInitialError, SolverError},
    search::repair::{InsertionOp, ranked_positions},
    state::{route::RouteRef, solution::Solution},
};
use lrp_model::prelude::Instance;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMethod {
    ClarkeWright,
    NearestNeighbor,
    Random,
    Regret2,
    Regret3,
    Cluster,
}

impl InitMethod {
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "cw" => Ok(InitMethod::ClarkeWright),
            "nn" => Ok(InitMethod::NearestNeighbor),
            "random" => Ok(InitMethod::Random),
            "regret2" => Ok(InitMethod::Regret2),
            "regret3" => Ok(InitMethod::Regret3),
            "cluster" => Ok(InitMethod::Cluster),
            _ => Err(ConfigError::UnknownMethod {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitMethod::ClarkeWright => "cw",
            InitMethod::NearestNeighbor => "nn",
            InitMethod::Random => "random",
            InitMethod::Regret2 => "regret2",
            InitMethod::Regret3 => "regret3",
            InitMethod::Cluster => "cluster",
        }
    }
}

impl std::fmt::Display for InitMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Builds a starting solution with the chosen method.
pub fn initial_solution<'p>(
    rng: &mut ChaCha8Rng,
    instance: &'p Instance,
    method: InitMethod,
) -> Result<Solution<'p>, SolverError> {
    let mut s = Solution::new(instance);
    match method {
        InitMethod::ClarkeWright => cw::build(&mut s),
        InitMethod::NearestNeighbor => nn::build(&mut s),
        InitMethod::Random => random_build(rng, &mut s),
        InitMethod::Regret2 => InsertionOp::Regret { k: 2 }.apply(rng, &mut s),
        InitMethod::Regret3 => InsertionOp::Regret { k: 3 }.apply(rng, &mut s),
        InitMethod::Cluster => cluster::build(&mut s),
    }
    s.collect_slots();

    let open = s.num_open();
    if open > 0 {
        return Err(InfeasibleInitialError::new(method.name(), open).into());
    }
    debug!(method = method.name(), "Constructed initial solution");
    Ok(s)
}

/// Customers in random order, each at its cheapest position.
fn random_build(rng: &mut ChaCha8Rng, s: &mut Solution<'_>) {
    let mut order: Vec<usize> = (0..s.customers().len()).collect();
    order.shuffle(rng);
    for c in order {
        s.open_slots();
        let ranked = ranked_positions(s, c, 1, None);
        let Some(&(_, (tail, head, r))) = ranked.first() else {
            return;
        };
        s.insert_customer(c, tail, head, r);
    }
}

/// Greedy customer-to-depot buckets: nearest depot with spare planned
/// capacity, falling back to the nearest outright.
pub(crate) fn assign_to_depots(s: &Solution<'_>) -> Vec<Vec<usize>> {
    let inst = s.instance();
    let mut planned = vec![0.0; inst.num_depots()];
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); inst.num_depots()];
    for c in 0..inst.num_customers() {
        let demand = inst.customer(c).demand();
        let mut order: Vec<usize> = (0..inst.num_depots()).collect();
        order.sort_by(|&a, &b| {
            let da = inst.distance(c, inst.depot_node(a));
            let db = inst.distance(c, inst.depot_node(b));
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        let chosen = order
            .iter()
            .copied()
            .find(|&d| planned[d] + demand <= inst.depot(d).capacity())
            .unwrap_or(order[0]);
        planned[chosen] += demand;
        buckets[chosen].push(c);
    }
    buckets
}

/// Materializes visit sequences as routes at depot `d`, opening routes and
/// vehicles within the fleet bounds and overloading the final route only
/// when every slot is exhausted.
pub(crate) fn place_sequences(s: &mut Solution<'_>, d: usize, sequences: &[Vec<usize>]) {
    for seq in sequences {
        if seq.is_empty() {
            continue;
        }
        let mut target: Option<RouteRef> = None;
        for v in 0..s.depot(d).vehicles().len() {
            let vs = &s.depot(d).vehicles()[v];
            if vs.routes().len() < vs.max_routes() {
                target = Some(s.spawn_route(d, v));
                break;
            }
        }
        if target.is_none() {
            let fleet = s.instance().depot(d).fleet();
            for class in 0..fleet.len() {
                let materialized = s
                    .depot(d)
                    .vehicles()
                    .iter()
                    .filter(|w| w.class() == class)
                    .count();
                if materialized < fleet[class].count() {
                    let nv = s.spawn_vehicle(d, class);
                    target = Some(s.spawn_route(d, nv));
                    break;
                }
            }
        }
        let r = match target {
            Some(r) => r,
            None => {
                let v = s.depot(d).vehicles().len() - 1;
                let slot = s.depot(d).vehicles()[v].routes().len() - 1;
                RouteRef::new(d, v, slot)
            }
        };
        let mut tail = s.route(r).last();
        for &c in seq {
            s.insert_customer(c, tail, None, r);
            tail = Some(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::audit::audit;
    use crate::{eval, testutil};
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1234)
    }

    #[test]
    fn test_parse_accepts_the_published_methods() {
        for name in ["cw", "nn", "random", "regret2", "regret3", "cluster"] {
            assert_eq!(InitMethod::parse(name).unwrap().name(), name);
        }
        assert!(matches!(
            InitMethod::parse("savings"),
            Err(ConfigError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn test_every_method_places_every_customer() {
        let inst = testutil::ring_instance(12, 2, 4.0);
        for method in [
            InitMethod::ClarkeWright,
            InitMethod::NearestNeighbor,
            InitMethod::Random,
            InitMethod::Regret2,
            InitMethod::Regret3,
            InitMethod::Cluster,
        ] {
            let s = initial_solution(&mut rng(), &inst, method).unwrap();
            assert_eq!(s.num_open(), 0, "{method} left customers open");
            audit(&s).unwrap();
        }
    }

    #[test]
    fn test_methods_yield_feasible_starts_on_roomy_instances() {
        let inst = testutil::ring_instance(10, 2, 6.0);
        for method in [InitMethod::ClarkeWright, InitMethod::Cluster, InitMethod::Regret3] {
            let s = initial_solution(&mut rng(), &inst, method).unwrap();
            assert!(eval::is_feasible(&s), "{method} produced infeasible start");
        }
    }

    #[test]
    fn test_assign_to_depots_respects_capacity_when_possible() {
        let inst = testutil::ring_instance(8, 2, 4.0);
        let s = Solution::new(&inst);
        let buckets = assign_to_depots(&s);
        let total: usize = buckets.iter().map(|b| b.len()).sum();
        assert_eq!(total, 8);
        for (d, b) in buckets.iter().enumerate() {
            let load: f64 = b.iter().map(|&c| inst.customer(c).demand()).sum();
            assert!(load <= inst.depot(d).capacity() + 1e-9);
        }
    }
}
