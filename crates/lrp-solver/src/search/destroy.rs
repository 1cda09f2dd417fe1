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

//! Removal operators: one engine over four targets (customer, route,
//! vehicle, depot) times three policies (random, related, worst). Each call
//! opens at least `q` customers, stopping early only when the eligible set
//! runs dry.

use crate::{
    eval::{CostPhases, objective},
    relate,
    state::{route::RouteRef, solution::Solution},
};
use rand::{Rng, seq::IteratorRandom};
use rand_chacha::ChaCha8Rng;

const NOISE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalTarget {
    Customer,
    Route,
    Vehicle,
    Depot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPolicy {
    Random,
    Related,
    Worst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalOp {
    pub target: RemovalTarget,
    pub policy: RemovalPolicy,
}

impl RemovalOp {
    pub fn new(target: RemovalTarget, policy: RemovalPolicy) -> Self {
        Self { target, policy }
    }

    pub fn name(&self) -> &'static str {
        use {RemovalPolicy::*, RemovalTarget::*};
        match (self.target, self.policy) {
            (Customer, Random) => "random_customer",
            (Customer, Related) => "related_customer",
            (Customer, Worst) => "worst_customer",
            (Route, Random) => "random_route",
            (Route, Related) => "related_route",
            (Route, Worst) => "worst_route",
            (Vehicle, Random) => "random_vehicle",
            (Vehicle, Related) => "related_vehicle",
            (Vehicle, Worst) => "worst_vehicle",
            (Depot, Random) => "random_depot",
            (Depot, Related) => "related_depot",
            (Depot, Worst) => "worst_depot",
        }
    }

    /// Opens at least `q` customers.
    pub fn apply(&self, rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
        s.refresh_route_refs();
        match (self.target, self.policy) {
            (RemovalTarget::Customer, RemovalPolicy::Random) => random_customers(rng, q, s),
            (RemovalTarget::Customer, RemovalPolicy::Related) => related_customers(rng, q, s),
            (RemovalTarget::Customer, RemovalPolicy::Worst) => worst_customers(rng, q, s),
            (RemovalTarget::Route, RemovalPolicy::Random) => random_routes(rng, q, s),
            (RemovalTarget::Route, RemovalPolicy::Related) => related_routes(rng, q, s),
            (RemovalTarget::Route, RemovalPolicy::Worst) => worst_routes(q, s),
            (RemovalTarget::Vehicle, RemovalPolicy::Random) => random_vehicles(rng, q, s),
            (RemovalTarget::Vehicle, RemovalPolicy::Related) => related_vehicles(rng, q, s),
            (RemovalTarget::Vehicle, RemovalPolicy::Worst) => worst_vehicles(q, s),
            (RemovalTarget::Depot, RemovalPolicy::Random) => random_depots(rng, q, s),
            (RemovalTarget::Depot, RemovalPolicy::Related) => related_depots(rng, q, s),
            (RemovalTarget::Depot, RemovalPolicy::Worst) => worst_depots(q, s),
        }
        s.refresh_route_refs();
    }
}

fn assigned_customers(s: &Solution<'_>) -> Vec<usize> {
    (0..s.customers().len())
        .filter(|&c| !s.customer(c).is_open())
        .collect()
}

/// Opens every customer of route `r`; returns how many it opened.
fn empty_route(s: &mut Solution<'_>, r: RouteRef) -> usize {
    let chain: Vec<usize> = s.route_customers(r).collect();
    for c in &chain {
        s.remove_customer(*c);
    }
    chain.len()
}

fn empty_vehicle(s: &mut Solution<'_>, d: usize, v: usize) -> usize {
    let mut opened = 0;
    for slot in 0..s.depot(d).vehicles()[v].routes().len() {
        opened += empty_route(s, RouteRef::new(d, v, slot));
    }
    opened
}

fn empty_depot(s: &mut Solution<'_>, d: usize) -> usize {
    let mut opened = 0;
    for v in 0..s.depot(d).vehicles().len() {
        opened += empty_vehicle(s, d, v);
    }
    opened
}

fn random_customers(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let mut pool = assigned_customers(s);
    let mut opened = 0;
    while opened < q && !pool.is_empty() {
        let at = rng.random_range(0..pool.len());
        let c = pool.swap_remove(at);
        s.remove_customer(c);
        opened += 1;
    }
}

fn related_customers(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let pool = assigned_customers(s);
    let Some(&pivot) = pool.iter().choose(rng) else {
        return;
    };
    let mut scored: Vec<(f64, usize)> = pool
        .iter()
        .map(|&c| (relate::customers(s, pivot, c), c))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    for (_, c) in scored.into_iter().take(q) {
        s.remove_customer(c);
    }
}

/// Repeatedly removes the customer whose removal saves the most objective
/// (with multiplicative noise), rescanning only the route the last victim
/// left until that route runs dry.
fn worst_customers(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let mut scan = assigned_customers(s);
    let mut opened = 0;
    while opened < q {
        if scan.is_empty() {
            scan = assigned_customers(s);
            if scan.is_empty() {
                return;
            }
        }
        let z_now = objective(s, CostPhases::ALL);
        let mut best: Option<(f64, usize)> = None;
        for &c in &scan {
            let (tail, head, r) = s.remove_customer(c);
            let saving = (z_now - objective(s, CostPhases::ALL))
                * (1.0 + rng.random_range(-NOISE..NOISE));
            s.insert_customer(c, tail, head, r);
            if best.is_none_or(|(w, _)| saving > w) {
                best = Some((saving, c));
            }
        }
        let (_, victim) = best.expect("scan set is non-empty");
        let route = s.customer(victim).route();
        s.remove_customer(victim);
        opened += 1;
        scan = s.route_customers(route).collect();
    }
}

fn random_routes(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let mut opened = 0;
    while opened < q {
        let ops = s.operational_route_refs();
        let Some(&r) = ops.iter().choose(rng) else {
            return;
        };
        opened += empty_route(s, r);
    }
}

fn related_routes(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let ops = s.operational_route_refs();
    let Some(&pivot) = ops.iter().choose(rng) else {
        return;
    };
    let mut scored: Vec<(f64, RouteRef)> =
        ops.iter().map(|&r| (relate::routes(s, pivot, r), r)).collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut opened = 0;
    for (_, r) in scored {
        if opened >= q {
            break;
        }
        opened += empty_route(s, r);
    }
}

fn worst_routes(q: usize, s: &mut Solution<'_>) {
    let ops = s.operational_route_refs();
    let mut scored: Vec<(f64, RouteRef)> = ops
        .iter()
        .map(|&r| {
            let capacity = s.depot(r.depot).vehicles()[r.vehicle].capacity();
            (s.route(r).utilization(capacity), r)
        })
        .collect();
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut opened = 0;
    for (_, r) in scored {
        if opened >= q {
            break;
        }
        opened += empty_route(s, r);
    }
}

fn operational_vehicles(s: &Solution<'_>) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for d in s.depots() {
        for v in d.vehicles() {
            if v.is_operational() {
                out.push((d.index(), v.index()));
            }
        }
    }
    out
}

fn random_vehicles(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let mut opened = 0;
    while opened < q {
        let ops = operational_vehicles(s);
        let Some(&(d, v)) = ops.iter().choose(rng) else {
            return;
        };
        opened += empty_vehicle(s, d, v);
    }
}

fn related_vehicles(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let ops = operational_vehicles(s);
    let Some(&pivot) = ops.iter().choose(rng) else {
        return;
    };
    let mut scored: Vec<(f64, (usize, usize))> = ops
        .iter()
        .map(|&v| (relate::vehicles(s, pivot, v), v))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut opened = 0;
    for (_, (d, v)) in scored {
        if opened >= q {
            break;
        }
        opened += empty_vehicle(s, d, v);
    }
}

fn worst_vehicles(q: usize, s: &mut Solution<'_>) {
    let ops = operational_vehicles(s);
    let mut scored: Vec<(f64, (usize, usize))> = ops
        .iter()
        .map(|&(d, v)| (s.depot(d).vehicles()[v].utilization(), (d, v)))
        .collect();
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut opened = 0;
    for (_, (d, v)) in scored {
        if opened >= q {
            break;
        }
        opened += empty_vehicle(s, d, v);
    }
}

fn random_depots(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let mut opened = 0;
    while opened < q {
        let ops: Vec<usize> = (0..s.depots().len())
            .filter(|&d| s.depot(d).is_operational())
            .collect();
        let Some(&d) = ops.iter().choose(rng) else {
            return;
        };
        opened += empty_depot(s, d);
    }
}

/// Pivot on a *closed* depot and pull the customers most related to it, so
/// a follow-up repair can consider opening that depot. Falls back to an
/// arbitrary depot when every depot is already operational.
fn related_depots(rng: &mut ChaCha8Rng, q: usize, s: &mut Solution<'_>) {
    let closed: Vec<usize> = (0..s.depots().len())
        .filter(|&d| !s.depot(d).is_operational())
        .collect();
    let pivot = match closed.iter().choose(rng) {
        Some(&d) => d,
        None => match (0..s.depots().len()).choose(rng) {
            Some(d) => d,
            None => return,
        },
    };
    let mut scored: Vec<(f64, usize)> = assigned_customers(s)
        .into_iter()
        .map(|c| (relate::customer_depot(s, c, pivot), c))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    for (_, c) in scored.into_iter().take(q) {
        s.remove_customer(c);
    }
}

fn worst_depots(q: usize, s: &mut Solution<'_>) {
    let mut scored: Vec<(f64, usize)> = (0..s.depots().len())
        .filter(|&d| s.depot(d).is_operational())
        .map(|d| (s.depot(d).utilization(), d))
        .collect();
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut opened = 0;
    for (_, d) in scored {
        if opened >= q {
            break;
        }
        opened += empty_depot(s, d);
    }
}
