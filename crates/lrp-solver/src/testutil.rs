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

//! Synthetic instances for unit tests.

use lrp_model::common::{CustomerId, DepotId, TimeWindow, VehicleTypeId};
use lrp_model::prelude::*;

fn vehicle_class(capacity: f64, count: usize) -> VehicleClass {
    VehicleClass::new(
        VehicleTypeId::new(0),
        count,
        capacity,
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
    .unwrap()
}

fn depot_at(ix: usize, x: f64, y: f64, capacity: f64, window: TimeWindow) -> Depot {
    Depot::new(
        DepotId::new(ix),
        x,
        y,
        capacity,
        0.0,
        100.0,
        false,
        0.0,
        1.0,
        window,
        vec![vehicle_class(1e6, 2)],
    )
    .unwrap()
}

/// `c` unit-demand customers at x = 1..=c on the x-axis, `d` depots at the
/// origin and below it. Unbounded windows, effectively uncapacitated.
pub fn line_instance(c: usize, d: usize) -> Instance {
    let customers: Vec<Customer> = (0..c)
        .map(|i| {
            Customer::new(
                CustomerId::new(i),
                (i + 1) as f64,
                0.0,
                1.0,
                0.0,
                TimeWindow::unbounded(),
            )
            .unwrap()
        })
        .collect();
    let depots: Vec<Depot> = (0..d)
        .map(|j| depot_at(j, 0.0, -(j as f64), 1e9, TimeWindow::unbounded()))
        .collect();
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("line", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}

/// Like [`line_instance`] but every customer shares the window
/// `[open, close]` and the depot closes at `close + 100`.
pub fn windowed_line_instance(c: usize, d: usize, open: f64, close: f64) -> Instance {
    let window = TimeWindow::new(open, close).unwrap();
    let customers: Vec<Customer> = (0..c)
        .map(|i| {
            Customer::new(CustomerId::new(i), (i + 1) as f64, 0.0, 1.0, 0.0, window).unwrap()
        })
        .collect();
    let depots: Vec<Depot> = (0..d)
        .map(|j| {
            depot_at(
                j,
                0.0,
                -(j as f64),
                1e9,
                TimeWindow::new(0.0, close + 100.0).unwrap(),
            )
        })
        .collect();
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("windowed", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}

/// One depot whose vehicles run a single route of capacity 2, fleet bound
/// 3. Two unit-demand insertions saturate a vehicle.
pub fn tight_instance(c: usize) -> Instance {
    let customers: Vec<Customer> = (0..c)
        .map(|i| {
            Customer::new(
                CustomerId::new(i),
                (i + 1) as f64,
                0.0,
                1.0,
                0.0,
                TimeWindow::unbounded(),
            )
            .unwrap()
        })
        .collect();
    let class = VehicleClass::new(
        VehicleTypeId::new(0),
        3,
        2.0,
        f64::INFINITY,
        1.0,
        0.0,
        0.0,
        0.0,
        f64::INFINITY,
        1,
        1.0,
        0.0,
        10.0,
    )
    .unwrap();
    let depots = vec![
        Depot::new(
            DepotId::new(0),
            0.0,
            0.0,
            1e9,
            0.0,
            100.0,
            false,
            0.0,
            1.0,
            TimeWindow::unbounded(),
            vec![class],
        )
        .unwrap(),
    ];
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("tight", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}

/// Two depots, the second mandatory, two customers near the first.
pub fn mandatory_instance() -> Instance {
    let customers = vec![
        Customer::new(CustomerId::new(0), 1.0, 0.0, 1.0, 0.0, TimeWindow::unbounded()).unwrap(),
        Customer::new(CustomerId::new(1), 2.0, 0.0, 1.0, 0.0, TimeWindow::unbounded()).unwrap(),
    ];
    let depots = vec![
        depot_at(0, 0.0, 0.0, 1e9, TimeWindow::unbounded()),
        Depot::new(
            DepotId::new(1),
            20.0,
            0.0,
            1e9,
            0.0,
            75.0,
            true,
            0.0,
            1.0,
            TimeWindow::unbounded(),
            vec![vehicle_class(1e6, 2)],
        )
        .unwrap(),
    ];
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("mandatory", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}

/// A tightly capacitated multi-depot instance: `c` unit-demand customers on
/// a ring, `d` depots spread around it, vehicle capacity `cap` per route.
pub fn ring_instance(c: usize, d: usize, cap: f64) -> Instance {
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
            Depot::new(
                DepotId::new(j),
                4.0 * a.cos(),
                4.0 * a.sin(),
                (c as f64).max(4.0),
                0.1,
                50.0,
                false,
                0.0,
                1.0,
                TimeWindow::unbounded(),
                vec![vehicle_class(cap, 3)],
            )
            .unwrap()
        })
        .collect();
    let mut points: Vec<(f64, f64)> = customers.iter().map(|c| (c.x(), c.y())).collect();
    points.extend(depots.iter().map(|d| (d.x(), d.y())));
    Instance::new("ring", customers, depots, ArcMatrix::euclidean(&points)).unwrap()
}
