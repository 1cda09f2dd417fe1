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

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lrp_model::common::{CustomerId, DepotId, TimeWindow, VehicleTypeId};
use lrp_model::prelude::*;
use lrp_solver::prelude::*;
use lrp_solver::search::repair::InsertionOp;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ring_instance(c: usize, d: usize) -> Instance {
    let customers: Vec<Customer> = (0..c)
        .map(|i| {
            let a = (i as f64) / (c as f64) * std::f64::consts::TAU;
            Customer::new(
                CustomerId::new(i),
                10.0 * a.cos(),
                10.0 * a.sin(),
                1.0,
                0.0,
                TimeWindow::unbounded(),
            )
            .unwrap()
        })
        .collect();
    let depots: Vec<Depot> = (0..d)
        .map(|j| {
            let a = (j as f64 + 0.5) / (d as f64) * std::f64::consts::TAU;
            let class = VehicleClass::new(
                VehicleTypeId::new(0),
                3,
                8.0,
                f64::INFINITY,
                1.0,
                0.0,
                0.0,
                0.0,
                f64::INFINITY,
                4,
                1.0,
                0.0,
                10.0,
            )
            .unwrap();
            Depot::new(
                DepotId::new(j),
                4.0 * a.cos(),
                4.0 * a.sin(),
                c as f64,
                0.1,
                50.0,
                false,
                0.0,
                1.0,
                TimeWindow::unbounded(),
                vec![class],
            )
            .unwrap()
        })
        .collect();
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("bench-ring", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}

fn bench_mutator_roundtrip(crit: &mut Criterion) {
    let inst = ring_instance(50, 2);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut s = Solution::new(&inst);
    InsertionOp::Best { perturb: false }.apply(&mut rng, &mut s);
    assert_eq!(s.num_open(), 0);

    crit.bench_function("remove_insert_roundtrip_50c", |b| {
        b.iter(|| {
            let (tail, head, r) = s.remove_customer(25);
            s.insert_customer(25, tail, head, r);
        })
    });
}

fn bench_best_repair_from_empty(crit: &mut Criterion) {
    let inst = ring_instance(30, 2);
    crit.bench_function("best_repair_30c_from_empty", |b| {
        b.iter_batched(
            || (ChaCha8Rng::seed_from_u64(2), Solution::new(&inst)),
            |(mut rng, mut s)| {
                InsertionOp::Best { perturb: false }.apply(&mut rng, &mut s);
                s
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_mutator_roundtrip, bench_best_repair_from_empty);
criterion_main!(benches);
