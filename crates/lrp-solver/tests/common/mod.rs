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

//! Shared synthetic instances for the integration tests.

use lrp_model::common::{CustomerId, DepotId, TimeWindow, VehicleTypeId};
use lrp_model::prelude::*;

/// A travelling-salesman-shaped instance: one depot, one effectively
/// unconstrained vehicle, customers scattered deterministically.
pub fn tsp_instance(c: usize) -> Instance {
    let customers: Vec<Customer> = (0..c)
        .map(|i| {
            // Deterministic pseudo-scatter on a coarse lattice.
            let x = ((i * 37) % 19) as f64;
            let y = ((i * 59) % 23) as f64;
            Customer::new(CustomerId::new(i), x, y, 1.0, 0.0, TimeWindow::unbounded()).unwrap()
        })
        .collect();
    let class = VehicleClass::new(
        VehicleTypeId::new(0),
        1,
        1e9,
        f64::INFINITY,
        1.0,
        0.0,
        0.0,
        0.0,
        f64::INFINITY,
        1,
        1.0,
        0.0,
        0.0,
    )
    .unwrap();
    let depots = vec![
        Depot::new(
            DepotId::new(0),
            9.0,
            11.0,
            1e9,
            0.0,
            0.0,
            true,
            0.0,
            1.0,
            TimeWindow::unbounded(),
            vec![class],
        )
        .unwrap(),
    ];
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("tsp-lattice", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}

/// A location-routing-shaped instance: `c` customers on two rings, `d`
/// capacitated depots, capacity-bound vehicles with working-hour limits.
pub fn lrp_instance(c: usize, d: usize) -> Instance {
    let customers: Vec<Customer> = (0..c)
        .map(|i| {
            let a = (i as f64) / (c as f64) * std::f64::consts::TAU;
            let radius = if i % 2 == 0 { 12.0 } else { 7.0 };
            Customer::new(
                CustomerId::new(i),
                radius * a.cos(),
                radius * a.sin(),
                1.0 + (i % 3) as f64,
                0.1,
                TimeWindow::new(0.0, 500.0).unwrap(),
            )
            .unwrap()
        })
        .collect();
    let total_demand: f64 = customers.iter().map(|c| c.demand()).sum();
    let depots: Vec<Depot> = (0..d)
        .map(|j| {
            let a = (j as f64 + 0.5) / (d as f64) * std::f64::consts::TAU;
            let class = VehicleClass::new(
                VehicleTypeId::new(0),
                3,
                12.0,
                1e6,
                1.0,
                0.0,
                0.1,
                0.2,
                400.0,
                3,
                1.0,
                0.1,
                15.0,
            )
            .unwrap();
            Depot::new(
                DepotId::new(j),
                5.0 * a.cos(),
                5.0 * a.sin(),
                total_demand,
                0.05,
                60.0,
                false,
                0.0,
                1.0,
                TimeWindow::new(0.0, 1000.0).unwrap(),
                vec![class],
            )
            .unwrap()
        })
        .collect();
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("lrp-rings", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}
