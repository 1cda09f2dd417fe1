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

use crate::{common::VehicleTypeId, problem::err::AttributeError};

/// A class of identical vehicles stationed at one depot.
///
/// `count` is the fleet size of this class; the solver materializes
/// individual vehicles on demand up to that bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleClass {
    id: VehicleTypeId,
    count: usize,
    capacity: f64,
    range: f64,
    speed: f64,
    /// Time to restore one unit of tank fraction before departure.
    fuel_time: f64,
    /// Loading time per unit of carried demand.
    load_time: f64,
    /// Fixed service overhead per customer stop.
    stop_time: f64,
    /// Maximum working duration of one vehicle.
    max_shift: f64,
    /// Maximum number of routes one vehicle may run.
    max_routes: usize,
    cost_per_distance: f64,
    cost_per_time: f64,
    fixed_cost: f64,
}

impl VehicleClass {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: VehicleTypeId,
        count: usize,
        capacity: f64,
        range: f64,
        speed: f64,
        fuel_time: f64,
        load_time: f64,
        stop_time: f64,
        max_shift: f64,
        max_routes: usize,
        cost_per_distance: f64,
        cost_per_time: f64,
        fixed_cost: f64,
    ) -> Result<Self, AttributeError> {
        let entity = || format!("{id}");
        if count == 0 {
            return Err(AttributeError::new(entity(), "count", 0.0));
        }
        if !(capacity > 0.0) {
            return Err(AttributeError::new(entity(), "capacity", capacity));
        }
        if !(range > 0.0) {
            return Err(AttributeError::new(entity(), "range", range));
        }
        if !(speed > 0.0) || !speed.is_finite() {
            return Err(AttributeError::new(entity(), "speed", speed));
        }
        if max_routes == 0 {
            return Err(AttributeError::new(entity(), "max_routes", 0.0));
        }
        for (name, v) in [
            ("fuel_time", fuel_time),
            ("load_time", load_time),
            ("stop_time", stop_time),
            ("cost_per_distance", cost_per_distance),
            ("cost_per_time", cost_per_time),
            ("fixed_cost", fixed_cost),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(AttributeError::new(entity(), name, v));
            }
        }
        if !(max_shift > 0.0) {
            return Err(AttributeError::new(entity(), "max_shift", max_shift));
        }
        Ok(Self {
            id,
            count,
            capacity,
            range,
            speed,
            fuel_time,
            load_time,
            stop_time,
            max_shift,
            max_routes,
            cost_per_distance,
            cost_per_time,
            fixed_cost,
        })
    }

    #[inline]
    pub fn id(&self) -> VehicleTypeId {
        self.id
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
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
    pub fn fuel_time(&self) -> f64 {
        self.fuel_time
    }

    #[inline]
    pub fn load_time(&self) -> f64 {
        self.load_time
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
}
