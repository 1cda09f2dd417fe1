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

//! Insertion operators: re-place every open customer.
//!
//! Candidate positions are priced by a one-step try-and-undo through the
//! state mutators (insert, evaluate with penalties on, remove again), so
//! the score is always the true objective of the would-be solution.

use crate::{
    eval::{CostPhases, objective},
    state::{route::RouteRef, solution::Solution},
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

/// A splice target: tail, head, route.
pub(crate) type Position = (Option<usize>, Option<usize>, RouteRef);

const NOISE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionOp {
    Best { perturb: bool },
    Greedy { perturb: bool },
    Regret { k: usize },
}

impl InsertionOp {
    pub fn name(&self) -> &'static str {
        match self {
            InsertionOp::Best { perturb: false } => "best",
            InsertionOp::Best { perturb: true } => "best_perturb",
            InsertionOp::Greedy { perturb: false } => "greedy",
            InsertionOp::Greedy { perturb: true } => "greedy_perturb",
            InsertionOp::Regret { k: 2 } => "regret2",
            InsertionOp::Regret { .. } => "regret3",
        }
    }

    /// Inserts until no customer is open (or no route exists to take one).
    pub fn apply(&self, rng: &mut ChaCha8Rng, s: &mut Solution<'_>) {
        match *self {
            InsertionOp::Best { perturb } => best(rng, s, perturb),
            InsertionOp::Greedy { perturb } => greedy(rng, s, perturb),
            InsertionOp::Regret { k } => regret(rng, s, k),
        }
        s.collect_slots();
    }
}

/// The `k` cheapest positions for `c` over `routes`, ascending by cost.
pub(crate) fn ranked_positions_in(
    s: &mut Solution<'_>,
    c: usize,
    routes: &[RouteRef],
    k: usize,
    mut noise: Option<&mut ChaCha8Rng>,
) -> SmallVec<[(f64, Position); 4]> {
    let mut out: SmallVec<[(f64, Position); 4]> = SmallVec::new();
    for &r in routes {
        for (tail, head) in s.insertion_points(r) {
            s.insert_customer(c, tail, head, r);
            let mut z = objective(s, CostPhases::ALL);
            s.remove_customer(c);
            if let Some(rng) = noise.as_deref_mut() {
                z *= 1.0 + rng.random_range(-NOISE..NOISE);
            }
            let at = out.partition_point(|(w, _)| *w <= z);
            if at < k {
                out.insert(at, (z, (tail, head, r)));
                if out.len() > k {
                    out.truncate(k);
                }
            }
        }
    }
    out
}

pub(crate) fn ranked_positions(
    s: &mut Solution<'_>,
    c: usize,
    k: usize,
    noise: Option<&mut ChaCha8Rng>,
) -> SmallVec<[(f64, Position); 4]> {
    let routes = s.route_refs();
    ranked_positions_in(s, c, &routes, k, noise)
}

/// Per customer in index order: insert at its cheapest position.
fn best(rng: &mut ChaCha8Rng, s: &mut Solution<'_>, perturb: bool) {
    loop {
        s.open_slots();
        let Some(c) = s.open_customers().next() else {
            break;
        };
        let noise = perturb.then_some(&mut *rng);
        let ranked = ranked_positions(s, c, 1, noise);
        let Some(&(_, (tail, head, r))) = ranked.first() else {
            break;
        };
        s.insert_customer(c, tail, head, r);
    }
}

/// Per round: commit the globally cheapest (customer, position) pair.
fn greedy(rng: &mut ChaCha8Rng, s: &mut Solution<'_>, perturb: bool) {
    loop {
        s.open_slots();
        let open: Vec<usize> = s.open_customers().collect();
        if open.is_empty() {
            break;
        }
        let mut winner: Option<(f64, usize, Position)> = None;
        for c in open {
            let noise = perturb.then_some(&mut *rng);
            let ranked = ranked_positions(s, c, 1, noise);
            if let Some(&(z, pos)) = ranked.first()
                && winner.as_ref().is_none_or(|(w, _, _)| z < *w)
            {
                winner = Some((z, c, pos));
            }
        }
        let Some((_, c, (tail, head, r))) = winner else {
            break;
        };
        s.insert_customer(c, tail, head, r);
    }
}

/// Per round: insert the customer with the largest regret (the summed cost
/// gap between its best position and its `k - 1` runners-up) at its best
/// position. Customers with fewer than `k` placements rank by the gaps they
/// do have.
fn regret(rng: &mut ChaCha8Rng, s: &mut Solution<'_>, k: usize) {
    let _ = rng;
    loop {
        s.open_slots();
        let open: Vec<usize> = s.open_customers().collect();
        if open.is_empty() {
            break;
        }
        let mut winner: Option<(f64, f64, usize, Position)> = None;
        for c in open {
            let ranked = ranked_positions(s, c, k, None);
            let Some(&(z_best, pos)) = ranked.first() else {
                continue;
            };
            let regret: f64 = ranked.iter().skip(1).map(|(z, _)| z - z_best).sum();
            let better = match &winner {
                None => true,
                // Maximum regret first; break ties on the cheaper insertion.
                Some((wr, wz, _, _)) => regret > *wr || (regret == *wr && z_best < *wz),
            };
            if better {
                winner = Some((regret, z_best, c, pos));
            }
        }
        let Some((_, _, c, (tail, head, r))) = winner else {
            break;
        };
        s.insert_customer(c, tail, head, r);
    }
}
