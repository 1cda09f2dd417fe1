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

//! Cross-module invariants: every operator sequence must leave the state
//! consistent with a from-scratch recomputation.

mod common;

use lrp_solver::prelude::*;
use lrp_solver::relate;
use lrp_solver::search::{destroy::RemovalOp, registry, repair::InsertionOp};
use lrp_solver::state::audit::audit;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn test_remove_then_reinsert_restores_solution() {
    let inst = common::lrp_instance(12, 3);
    let mut r = rng(3);
    let mut s = initial_solution(&mut r, &inst, InitMethod::Regret2).unwrap();
    let before = s.clone();

    for c in 0..inst.num_customers() {
        let (tail, head, route) = s.remove_customer(c);
        s.insert_customer(c, tail, head, route);
        assert_eq!(s.vectorize(), before.vectorize());
        audit(&s).unwrap();
    }
    // Aggregates survive the full sweep within float tolerance.
    for (d_after, d_before) in s.depots().iter().zip(before.depots()) {
        assert_eq!(d_after.count(), d_before.count());
        assert!((d_after.load() - d_before.load()).abs() < 1e-9);
        assert!((d_after.length() - d_before.length()).abs() < 1e-9);
    }
}

#[test]
fn test_customer_conservation_across_destroy_repair_cycles() {
    let inst = common::lrp_instance(16, 4);
    let mut r = rng(11);
    let mut s = initial_solution(&mut r, &inst, InitMethod::Cluster).unwrap();

    for (cycle, destroy_name) in registry::DESTROY_OPERATORS.iter().enumerate() {
        let destroy = registry::destroy(destroy_name).unwrap();
        destroy.apply(&mut r, 4, &mut s);
        let open = s.num_open();
        let closed = inst.num_customers() - open;
        assert_eq!(open + closed, inst.num_customers());
        audit(&s).unwrap();

        let repair = registry::repair(registry::REPAIR_OPERATORS[cycle % 6]).unwrap();
        repair.apply(&mut r, &mut s);
        assert_eq!(s.num_open(), 0, "{destroy_name} cycle left customers open");
        audit(&s).unwrap();
    }
}

#[test]
fn test_collect_slots_is_idempotent_after_search_traffic() {
    let inst = common::lrp_instance(10, 2);
    let mut r = rng(23);
    let mut s = initial_solution(&mut r, &inst, InitMethod::NearestNeighbor).unwrap();

    RemovalOp::new(
        lrp_solver::search::destroy::RemovalTarget::Route,
        lrp_solver::search::destroy::RemovalPolicy::Random,
    )
    .apply(&mut r, 3, &mut s);
    InsertionOp::Greedy { perturb: false }.apply(&mut r, &mut s);

    s.collect_slots();
    let once = s.vectorize();
    let routes_once = s.route_refs().len();
    s.collect_slots();
    assert_eq!(s.vectorize(), once);
    assert_eq!(s.route_refs().len(), routes_once);
    audit(&s).unwrap();
}

#[test]
fn test_objective_nonnegative_and_feasibility_matches_violations() {
    let inst = common::lrp_instance(14, 3);
    let mut r = rng(31);
    let mut s = initial_solution(&mut r, &inst, InitMethod::ClarkeWright).unwrap();

    assert!(objective(&s, CostPhases::ALL) >= 0.0);
    if is_feasible(&s) {
        assert_eq!(lrp_solver::eval::violations(&s), 0.0);
    }

    // Punch a hole: open customers must flip feasibility and violations
    // together.
    let destroy = registry::destroy("random_customer").unwrap();
    destroy.apply(&mut r, 3, &mut s);
    assert!(!is_feasible(&s));
    assert!(lrp_solver::eval::violations(&s) > 0.0);
    assert!(objective(&s, CostPhases::ALL) >= 0.0);
}

#[test]
fn test_relatedness_edge_values() {
    let inst = common::lrp_instance(8, 2);
    let mut r = rng(41);
    let s = initial_solution(&mut r, &inst, InitMethod::Regret3).unwrap();

    assert_eq!(relate::customers(&s, 3, 3), f64::INFINITY);

    let mut with_empty = s.clone();
    let refs = with_empty.route_refs();
    let first = refs[0];
    // Empty one route, then pair it with an operational one.
    let chain: Vec<usize> = with_empty.route_customers(first).collect();
    for c in chain {
        with_empty.remove_customer(c);
    }
    let operational = with_empty
        .operational_route_refs()
        .first()
        .copied()
        .expect("some route still serves customers");
    assert_eq!(
        relate::routes(&with_empty, first, operational),
        f64::NEG_INFINITY
    );
}

#[test]
fn test_vectorize_partitions_all_customers_once() {
    let inst = common::lrp_instance(15, 3);
    let mut r = rng(53);
    let s = initial_solution(&mut r, &inst, InitMethod::Random).unwrap();

    let v = s.vectorize();
    assert_eq!(v.len(), inst.num_depots());
    let mut seen = vec![false; inst.num_customers()];
    for (d, seq) in v.iter().enumerate() {
        assert_eq!(seq[0], inst.depot_node(d));
        for &c in &seq[1..] {
            assert!(c < inst.num_customers());
            assert!(!seen[c], "customer {c} listed twice");
            seen[c] = true;
        }
    }
    assert!(seen.into_iter().all(|b| b));
}
