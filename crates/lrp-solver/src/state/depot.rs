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

use crate::state::vehicle::VehicleState;
use lrp_model::prelude::Depot;

/// One depot in the search state: static facility attributes plus the
/// vehicles materialized at it and the rolled-up aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct DepotState {
    pub(crate) index: usize,
    pub(crate) node: usize,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) capacity: f64,
    pub(crate) cost_per_load: f64,
    pub(crate) fixed_cost: f64,
    pub(crate) mandatory: bool,
    pub(crate) share_min: f64,
    pub(crate) share_max: f64,
    pub(crate) window_open: f64,
    pub(crate) window_close: f64,
    pub(crate) vehicles: Vec<VehicleState>,
    pub(crate) count: usize,
    pub(crate) load: f64,
    pub(crate) length: f64,
    pub(crate) slack: f64,
}

impl DepotState {
    pub(crate) fn from_spec(index: usize, node: usize, spec: &Depot) -> Self {
        let window_open = spec.window().open();
        let window_close = spec.window().close();
        let vehicles = spec
            .fleet()
            .iter()
            .enumerate()
            .map(|(class, vc)| {
                VehicleState::from_class(index, class, class, vc, window_open, window_close)
            })
            .collect();
        Self {
            index,
            node,
            x: spec.x(),
            y: spec.y(),
            capacity: spec.capacity(),
            cost_per_load: spec.cost_per_load(),
            fixed_cost: spec.fixed_cost(),
            mandatory: spec.mandatory(),
            share_min: spec.share_min(),
            share_max: spec.share_max(),
            window_open,
            window_close,
            vehicles,
            count: 0,
            load: 0.0,
            length: 0.0,
            slack: window_close - window_open,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn node(&self) -> usize {
        self.node
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[inline]
    pub fn cost_per_load(&self) -> f64 {
        self.cost_per_load
    }

    #[inline]
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    #[inline]
    pub fn mandatory(&self) -> bool {
        self.mandatory
    }

    #[inline]
    pub fn share_min(&self) -> f64 {
        self.share_min
    }

    #[inline]
    pub fn share_max(&self) -> f64 {
        self.share_max
    }

    #[inline]
    pub fn window_open(&self) -> f64 {
        self.window_open
    }

    #[inline]
    pub fn window_close(&self) -> f64 {
        self.window_close
    }

    #[inline]
    pub fn vehicles(&self) -> &[VehicleState] {
        &self.vehicles
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
    pub fn slack(&self) -> f64 {
        self.slack
    }

    #[inline]
    pub fn is_operational(&self) -> bool {
        self.count > 0
    }

    /// Load as a fraction of the depot capacity.
    #[inline]
    pub fn utilization(&self) -> f64 {
        if self.capacity.is_finite() && self.capacity > 0.0 {
            self.load / self.capacity
        } else {
            0.0
        }
    }
}
