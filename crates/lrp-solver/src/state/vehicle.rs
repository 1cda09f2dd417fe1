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

use crate::state::route::Route;
use lrp_model::prelude::VehicleClass;

/// One materialized vehicle at a depot: its class parameters, its ordered
/// routes, and the aggregates rolled up from them.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub(crate) depot: usize,
    pub(crate) index: usize,
    /// Index of this vehicle's class within the depot fleet.
    pub(crate) class: usize,
    pub(crate) capacity: f64,
    pub(crate) range: f64,
    pub(crate) speed: f64,
    pub(crate) fuel_time: f64,
    pub(crate) load_time: f64,
    pub(crate) stop_time: f64,
    pub(crate) max_shift: f64,
    pub(crate) max_routes: usize,
    pub(crate) cost_per_distance: f64,
    pub(crate) cost_per_time: f64,
    pub(crate) fixed_cost: f64,
    pub(crate) routes: Vec<Route>,
    pub(crate) count: usize,
    pub(crate) load: f64,
    pub(crate) length: f64,
    pub(crate) t_start: f64,
    pub(crate) t_end: f64,
    pub(crate) slack: f64,
}

impl VehicleState {
    pub(crate) fn from_class(
        depot: usize,
        index: usize,
        class: usize,
        spec: &VehicleClass,
        depot_open: f64,
        depot_close: f64,
    ) -> Self {
        Self {
            depot,
            index,
            class,
            capacity: spec.capacity(),
            range: spec.range(),
            speed: spec.speed(),
            fuel_time: spec.fuel_time(),
            load_time: spec.load_time(),
            stop_time: spec.stop_time(),
            max_shift: spec.max_shift(),
            max_routes: spec.max_routes(),
            cost_per_distance: spec.cost_per_distance(),
            cost_per_time: spec.cost_per_time(),
            fixed_cost: spec.fixed_cost(),
            routes: Vec::new(),
            count: 0,
            load: 0.0,
            length: 0.0,
            t_start: depot_open,
            t_end: depot_open,
            slack: depot_close - depot_open,
        }
    }

    #[inline]
    pub fn depot(&self) -> usize {
        self.depot
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn class(&self) -> usize {
        self.class
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.range
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn stop_time(&self) -> f64 {
        self.stop_time
    }

    #[inline]
    pub fn max_shift(&self) -> f64 {
        self.max_shift
    }

    #[inline]
    pub fn max_routes(&self) -> usize {
        self.max_routes
    }

    #[inline]
    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    #[inline]
    pub fn cost_per_time(&self) -> f64 {
        self.cost_per_time
    }

    #[inline]
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    #[inline]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn load(&self) -> f64 {
        self.load
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    #[inline]
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    #[inline]
    pub fn slack(&self) -> f64 {
        self.slack
    }

    #[inline]
    pub fn is_operational(&self) -> bool {
        self.count > 0
    }

    #[inline]
    pub fn shift(&self) -> f64 {
        self.t_end - self.t_start
    }

    /// Load as a fraction of the total capacity across the vehicle's routes.
    #[inline]
    pub fn utilization(&self) -> f64 {
        let total = self.routes.len() as f64 * self.capacity;
        if total.is_finite() && total > 0.0 {
            self.load / total
        } else {
            0.0
        }
    }

    /// Demand-weighted centroid over operational routes.
    pub fn centroid(&self) -> (f64, f64) {
        if self.load <= 0.0 {
            return (0.0, 0.0);
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for r in &self.routes {
            cx += r.load * r.cx;
            cy += r.load * r.cy;
        }
        (cx / self.load, cy / self.load)
    }
}
