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
    common::{CustomerId, TimeWindow},
    problem::err::AttributeError,
};

/// A delivery customer: a demand, a service duration and a delivery window
/// at a planar location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Customer {
    id: CustomerId,
    x: f64,
    y: f64,
    demand: f64,
    service_time: f64,
    window: TimeWindow,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        x: f64,
        y: f64,
        demand: f64,
        service_time: f64,
        window: TimeWindow,
    ) -> Result<Self, AttributeError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(AttributeError::new(format!("{id}"), "coordinates", x));
        }
        if !demand.is_finite() || demand < 0.0 {
            return Err(AttributeError::new(format!("{id}"), "demand", demand));
        }
        if !service_time.is_finite() || service_time < 0.0 {
            return Err(AttributeError::new(
                format!("{id}"),
                "service_time",
                service_time,
            ));
        }
        Ok(Self {
            id,
            x,
            y,
            demand,
            service_time,
            window,
        })
    }

    #[inline]
    pub fn id(&self) -> CustomerId {
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
    pub fn demand(&self) -> f64 {
        self.demand
    }

    #[inline]
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    #[inline]
    pub fn window(&self) -> TimeWindow {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_demand() {
        let w = TimeWindow::unbounded();
        let c = Customer::new(CustomerId::new(1), 0.0, 0.0, -3.0, 0.0, w);
        assert!(c.is_err());
        assert_eq!(c.unwrap_err().attribute(), "demand");
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let w = TimeWindow::unbounded();
        assert!(Customer::new(CustomerId::new(1), f64::NAN, 0.0, 1.0, 0.0, w).is_err());
    }

    #[test]
    fn test_accessors_roundtrip() {
        let w = TimeWindow::new(2.0, 9.0).unwrap();
        let c = Customer::new(CustomerId::new(4), 1.5, -2.5, 10.0, 0.5, w).unwrap();
        assert_eq!(c.id(), CustomerId::new(4));
        assert_eq!(c.x(), 1.5);
        assert_eq!(c.y(), -2.5);
        assert_eq!(c.demand(), 10.0);
        assert_eq!(c.service_time(), 0.5);
        assert_eq!(c.window().open(), 2.0);
    }
}
