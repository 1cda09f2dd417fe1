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

use crate::{
    common::{DepotId, TimeWindow},
    problem::{err::AttributeError, vehicle::VehicleClass},
};

/// A candidate depot: a capacitated facility with an operating window, cost
/// coefficients, an optional must-open flag, bounds on the share of
/// customers it may serve, and a fleet of vehicle classes.
#[derive(Debug, Clone, PartialEq)]
pub struct Depot {
    id: DepotId,
    x: f64,
    y: f64,
    capacity: f64,
    /// Cost per unit of demand handled through this depot.
    cost_per_load: f64,
    fixed_cost: f64,
    mandatory: bool,
    share_min: f64,
    share_max: f64,
    window: TimeWindow,
    fleet: Vec<VehicleClass>,
}

impl Depot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DepotId,
        x: f64,
        y: f64,
        capacity: f64,
        cost_per_load: f64,
        fixed_cost: f64,
        mandatory: bool,
        share_min: f64,
        share_max: f64,
        window: TimeWindow,
        fleet: Vec<VehicleClass>,
    ) -> Result<Self, AttributeError> {
        let entity = || format!("{id}");
        if !x.is_finite() || !y.is_finite() {
            return Err(AttributeError::new(entity(), "coordinates", x));
        }
        if !(capacity > 0.0) {
            return Err(AttributeError::new(entity(), "capacity", capacity));
        }
        for (name, v) in [("cost_per_load", cost_per_load), ("fixed_cost", fixed_cost)] {
            if !v.is_finite() || v < 0.0 {
                return Err(AttributeError::new(entity(), name, v));
            }
        }
        if !(0.0..=1.0).contains(&share_min) {
            return Err(AttributeError::new(entity(), "share_min", share_min));
        }
        if !(0.0..=1.0).contains(&share_max) || share_max < share_min {
            return Err(AttributeError::new(entity(), "share_max", share_max));
        }
        Ok(Self {
            id,
            x,
            y,
            capacity,
            cost_per_load,
            fixed_cost,
            mandatory,
            share_min,
            share_max,
            window,
            fleet,
        })
    }

    #[inline]
    pub fn id(&self) -> DepotId {
        self.id
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
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    #[inline]
    pub fn fleet(&self) -> &[VehicleClass] {
        &self.fleet
    }
}
