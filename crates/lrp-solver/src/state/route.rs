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

/// Address of a route inside a solution: depot index, vehicle index within
/// the depot, route slot within the vehicle.
///
/// [`RouteRef::NULL`] is the singleton sentinel an unassigned customer
/// points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteRef {
    pub depot: usize,
    pub vehicle: usize,
    pub slot: usize,
}

impl RouteRef {
    pub const NULL: RouteRef = RouteRef {
        depot: usize::MAX,
        vehicle: usize::MAX,
        slot: usize::MAX,
    };

    #[inline]
    pub fn new(depot: usize, vehicle: usize, slot: usize) -> Self {
        Self {
            depot,
            vehicle,
            slot,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl std::fmt::Display for RouteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "Route(-)")
        } else {
            write!(f, "Route({}/{}/{})", self.depot, self.vehicle, self.slot)
        }
    }
}

/// One vehicle tour: an intrusive doubly-linked chain of customer indices
/// anchored at `first`/`last`, with every aggregate the evaluator reads
/// kept incrementally up to date. `None` endpoints stand for the depot.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub(crate) depot: usize,
    pub(crate) vehicle: usize,
    pub(crate) slot: usize,
    pub(crate) first: Option<usize>,
    pub(crate) last: Option<usize>,
    pub(crate) count: usize,
    pub(crate) load: f64,
    pub(crate) length: f64,
    pub(crate) cx: f64,
    pub(crate) cy: f64,
    pub(crate) t_init: f64,
    pub(crate) t_start: f64,
    pub(crate) t_end: f64,
    pub(crate) fuel_init: f64,
    pub(crate) fuel_start: f64,
    pub(crate) fuel_end: f64,
    pub(crate) slack: f64,
}

impl Route {
    pub(crate) fn new(depot: usize, vehicle: usize, slot: usize, t_init: f64, fuel_init: f64) -> Self {
        Self {
            depot,
            vehicle,
            slot,
            first: None,
            last: None,
            count: 0,
            load: 0.0,
            length: 0.0,
            cx: 0.0,
            cy: 0.0,
            t_init,
            t_start: t_init,
            t_end: t_init,
            fuel_init,
            fuel_start: fuel_init,
            fuel_end: fuel_init,
            slack: f64::INFINITY,
        }
    }

    #[inline]
    pub fn rref(&self) -> RouteRef {
        RouteRef::new(self.depot, self.vehicle, self.slot)
    }

    #[inline]
    pub fn is_operational(&self) -> bool {
        self.count > 0
    }

    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.first
    }

    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.last
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
    pub fn centroid(&self) -> (f64, f64) {
        (self.cx, self.cy)
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

    /// Load as a fraction of the given vehicle capacity.
    #[inline]
    pub fn utilization(&self, capacity: f64) -> f64 {
        if capacity.is_finite() && capacity > 0.0 {
            self.load / capacity
        } else {
            0.0
        }
    }
}
