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

//! Local search: each operator burns a budget of random attempts and keeps
//! only strictly improving moves. Every mutation goes through the state
//! mutators, so the solution stays consistent whether a move is kept or
//! rolled back.

use crate::{
    eval::{CostPhases, objective},
    search::repair::{ranked_positions, ranked_positions_in},
    state::{route::RouteRef, solution::Solution},
};
use rand::{Rng, seq::IteratorRandom};
use rand_chacha::ChaCha8Rng;

const MIN_GAIN: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalOp {
    Move,
    IntraOpt,
    InterOpt,
    Split,
    SwapCustomers,
    SwapDepots,
}

impl LocalOp {
    pub fn name(&self) -> &'static str {
        match self {
            LocalOp::Move => "move",
            LocalOp::IntraOpt => "intra_opt",
            LocalOp::InterOpt => "inter_opt",
            LocalOp::Split => "split",
            LocalOp::SwapCustomers => "swap_customers",
            LocalOp::SwapDepots => "swap_depots",
        }
    }

    /// Runs up to `budget` attempts; returns whether any improved.
    pub fn apply(&self, rng: &mut ChaCha8Rng, budget: usize, s: &mut Solution<'_>) -> bool {
        let mut improved = false;
        for _ in 0..budget {
            let z_before = objective(s, CostPhases::ALL);
            let snapshot = s.clone();
            let mutated = match self {
                LocalOp::Move => try_move(rng, s),
                LocalOp::IntraOpt => try_intra_opt(rng, s),
                LocalOp::InterOpt => try_inter_opt(rng, s),
                LocalOp::Split => try_split(rng, s),
                LocalOp::SwapCustomers => try_swap_customers(rng, s),
                LocalOp::SwapDepots => try_swap_depots(rng, s),
            };
            if !mutated {
                continue;
            }
            if objective(s, CostPhases::ALL) + MIN_GAIN < z_before {
                improved = true;
            } else {
                *s = snapshot;
            }
        }
        improved
    }
}

fn assigned(s: &Solution<'_>) -> Vec<usize> {
    (0..s.customers().len())
        .filter(|&c| !s.customer(c).is_open())
        .collect()
}

/// Tears a route's chain down and relinks it in `order`.
fn rebuild_route(s: &mut Solution<'_>, r: RouteRef, order: &[usize]) {
    let chain: Vec<usize> = s.route_customers(r).collect();
    for c in chain {
        s.remove_customer(c);
    }
    let mut tail = None;
    for &c in order {
        s.insert_customer(c, tail, None, r);
        tail = Some(c);
    }
}

/// Splices customer `c` into route `r` so it ends up at chain index `at`.
fn insert_at(s: &mut Solution<'_>, r: RouteRef, at: usize, c: usize) {
    let chain: Vec<usize> = s.route_customers(r).collect();
    let tail = if at == 0 { None } else { Some(chain[at - 1]) };
    let head = chain.get(at).copied();
    s.insert_customer(c, tail, head, r);
}

/// Relocate one customer to a random position anywhere.
fn try_move(rng: &mut ChaCha8Rng, s: &mut Solution<'_>) -> bool {
    let Some(&c) = assigned(s).iter().choose(rng) else {
        return false;
    };
    s.remove_customer(c);
    let routes = s.route_refs();
    let r = routes[rng.random_range(0..routes.len())];
    let points = s.insertion_points(r);
    let (tail, head) = points[rng.random_range(0..points.len())];
    s.insert_customer(c, tail, head, r);
    true
}

/// Reverse a random subsegment of one route.
fn try_intra_opt(rng: &mut ChaCha8Rng, s: &mut Solution<'_>) -> bool {
    let candidates: Vec<RouteRef> = s
        .operational_route_refs()
        .into_iter()
        .filter(|&r| s.route(r).count() >= 2)
        .collect();
    let Some(&r) = candidates.iter().choose(rng) else {
        return false;
    };
    let mut chain: Vec<usize> = s.route_customers(r).collect();
    let i = rng.random_range(0..chain.len() - 1);
    let j = rng.random_range(i + 1..chain.len());
    chain[i..=j].reverse();
    rebuild_route(s, r, &chain);
    true
}

/// Swap the tails of two routes after random cut points.
fn try_inter_opt(rng: &mut ChaCha8Rng, s: &mut Solution<'_>) -> bool {
    let ops = s.operational_route_refs();
    if ops.len() < 2 {
        return false;
    }
    let a = ops[rng.random_range(0..ops.len())];
    let b = loop {
        let b = ops[rng.random_range(0..ops.len())];
        if b != a {
            break b;
        }
    };
    let chain_a: Vec<usize> = s.route_customers(a).collect();
    let chain_b: Vec<usize> = s.route_customers(b).collect();
    let cut_a = rng.random_range(0..=chain_a.len());
    let cut_b = rng.random_range(0..=chain_b.len());

    let mut new_a: Vec<usize> = chain_a[..cut_a].to_vec();
    new_a.extend_from_slice(&chain_b[cut_b..]);
    let mut new_b: Vec<usize> = chain_b[..cut_b].to_vec();
    new_b.extend_from_slice(&chain_a[cut_a..]);

    for &c in chain_a.iter().chain(chain_b.iter()) {
        s.remove_customer(c);
    }
    let mut tail = None;
    for &c in &new_a {
        s.insert_customer(c, tail, None, a);
        tail = Some(c);
    }
    tail = None;
    for &c in &new_b {
        s.insert_customer(c, tail, None, b);
        tail = Some(c);
    }
    true
}

/// Close one route and redistribute its customers at their cheapest
/// positions.
fn try_split(rng: &mut ChaCha8Rng, s: &mut Solution<'_>) -> bool {
    let ops = s.operational_route_refs();
    let Some(&r) = ops.iter().choose(rng) else {
        return false;
    };
    let chain: Vec<usize> = s.route_customers(r).collect();
    for &c in &chain {
        s.remove_customer(c);
    }
    for &c in &chain {
        s.open_slots();
        let ranked = ranked_positions(s, c, 1, None);
        let Some(&(_, (tail, head, target))) = ranked.first() else {
            return true;
        };
        s.insert_customer(c, tail, head, target);
    }
    s.collect_slots();
    true
}

/// Exchange the chain positions of two customers.
fn try_swap_customers(rng: &mut ChaCha8Rng, s: &mut Solution<'_>) -> bool {
    let pool = assigned(s);
    if pool.len() < 2 {
        return false;
    }
    let a = pool[rng.random_range(0..pool.len())];
    let b = loop {
        let b = pool[rng.random_range(0..pool.len())];
        if b != a {
            break b;
        }
    };
    let ra = s.customer(a).route();
    let rb = s.customer(b).route();

    if ra == rb {
        let mut chain: Vec<usize> = s.route_customers(ra).collect();
        let ia = chain.iter().position(|&c| c == a).expect("a is in its route");
        let ib = chain.iter().position(|&c| c == b).expect("b is in its route");
        chain.swap(ia, ib);
        rebuild_route(s, ra, &chain);
    } else {
        let ia = s
            .route_customers(ra)
            .position(|c| c == a)
            .expect("a is in its route");
        let ib = s
            .route_customers(rb)
            .position(|c| c == b)
            .expect("b is in its route");
        s.remove_customer(a);
        s.remove_customer(b);
        insert_at(s, rb, ib, a);
        insert_at(s, ra, ia, b);
    }
    true
}

/// Move every customer of one depot to another depot's routes, opening and
/// closing facilities in the process.
fn try_swap_depots(rng: &mut ChaCha8Rng, s: &mut Solution<'_>) -> bool {
    if s.depots().len() < 2 {
        return false;
    }
    let sources: Vec<usize> = (0..s.depots().len())
        .filter(|&d| s.depot(d).is_operational())
        .collect();
    let Some(&from) = sources.iter().choose(rng) else {
        return false;
    };
    let to = loop {
        let to = rng.random_range(0..s.depots().len());
        if to != from {
            break to;
        }
    };

    let mut moved = Vec::new();
    for v in 0..s.depot(from).vehicles().len() {
        for slot in 0..s.depot(from).vehicles()[v].routes().len() {
            moved.extend(s.route_customers(RouteRef::new(from, v, slot)));
        }
    }
    for &c in &moved {
        s.remove_customer(c);
    }
    for &c in &moved {
        s.open_slots();
        let target_routes: Vec<RouteRef> = s
            .route_refs()
            .into_iter()
            .filter(|r| r.depot == to)
            .collect();
        let ranked = ranked_positions_in(s, c, &target_routes, 1, None);
        let Some(&(_, (tail, head, target))) = ranked.first() else {
            return true;
        };
        s.insert_customer(c, tail, head, target);
    }
    s.collect_slots();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::repair::InsertionOp;
    use crate::state::audit::audit;
    use crate::testutil;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    fn shuffled_solution(inst: &lrp_model::prelude::Instance) -> Solution<'_> {
        // A deliberately bad assignment: neighbors pairwise interleaved
        // (1, 0, 3, 2, ...), so a single subsegment reversal pays off.
        let mut s = Solution::new(inst);
        let r = s.spawn_route(0, 0);
        let mut order = Vec::new();
        let mut c = 0;
        while c + 1 < inst.num_customers() {
            order.push(c + 1);
            order.push(c);
            c += 2;
        }
        if c < inst.num_customers() {
            order.push(c);
        }
        let mut tail = None;
        for c in order {
            s.insert_customer(c, tail, None, r);
            tail = Some(c);
        }
        s
    }

    #[test]
    fn test_operators_never_lose_customers_nor_corrupt_state() {
        let inst = testutil::ring_instance(10, 2, 4.0);
        for op in [
            LocalOp::Move,
            LocalOp::IntraOpt,
            LocalOp::InterOpt,
            LocalOp::Split,
            LocalOp::SwapCustomers,
            LocalOp::SwapDepots,
        ] {
            let mut s = Solution::new(&inst);
            InsertionOp::Best { perturb: false }.apply(&mut rng(), &mut s);
            let mut r = rng();
            op.apply(&mut r, 20, &mut s);
            assert_eq!(s.num_open(), 0, "{} dropped customers", op.name());
            audit(&s).unwrap();
        }
    }

    #[test]
    fn test_improving_moves_are_kept_and_worsening_rolled_back() {
        let inst = testutil::line_instance(6, 1);
        let mut s = shuffled_solution(&inst);
        let z0 = objective(&s, CostPhases::ALL);
        let mut r = rng();
        let improved = LocalOp::IntraOpt.apply(&mut r, 50, &mut s);
        let z1 = objective(&s, CostPhases::ALL);
        assert!(z1 <= z0);
        assert!(improved, "reversed line route must admit a 2-opt gain");
        audit(&s).unwrap();
    }

    #[test]
    fn test_move_relocates_customers_for_gain() {
        let inst = testutil::line_instance(5, 1);
        let mut s = shuffled_solution(&inst);
        let z0 = objective(&s, CostPhases::ALL);
        let mut r = rng();
        LocalOp::Move.apply(&mut r, 100, &mut s);
        assert!(objective(&s, CostPhases::ALL) <= z0);
        assert_eq!(s.num_open(), 0);
        audit(&s).unwrap();
    }

    #[test]
    fn test_swap_customers_handles_same_route_adjacency() {
        let inst = testutil::line_instance(4, 1);
        let mut s = shuffled_solution(&inst);
        let mut r = rng();
        LocalOp::SwapCustomers.apply(&mut r, 40, &mut s);
        assert_eq!(s.num_open(), 0);
        audit(&s).unwrap();
    }

    #[test]
    fn test_swap_depots_moves_load_between_facilities() {
        let inst = testutil::ring_instance(8, 2, 8.0);
        let mut s = Solution::new(&inst);
        InsertionOp::Best { perturb: false }.apply(&mut rng(), &mut s);
        let mut r = rng();
        LocalOp::SwapDepots.apply(&mut r, 10, &mut s);
        assert_eq!(s.num_open(), 0);
        audit(&s).unwrap();
    }
}
