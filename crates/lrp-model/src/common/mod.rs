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

use crate::problem::err::WindowError;

pub trait IdentifierMarkerName: Copy {
    const NAME: &'static str;
}

#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> &I {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerIdentifierMarker;

impl IdentifierMarkerName for CustomerIdentifierMarker {
    const NAME: &'static str = "CustomerId";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepotIdentifierMarker;

impl IdentifierMarkerName for DepotIdentifierMarker {
    const NAME: &'static str = "DepotId";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleTypeIdentifierMarker;

impl IdentifierMarkerName for VehicleTypeIdentifierMarker {
    const NAME: &'static str = "VehicleTypeId";
}

pub type CustomerId = Identifier<usize, CustomerIdentifierMarker>;
pub type DepotId = Identifier<usize, DepotIdentifierMarker>;
pub type VehicleTypeId = Identifier<usize, VehicleTypeIdentifierMarker>;

/// A service window `[open, close]`. `close` may be `f64::INFINITY` for
/// instances without time constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    open: f64,
    close: f64,
}

impl TimeWindow {
    #[inline]
    pub fn new(open: f64, close: f64) -> Result<Self, WindowError> {
        if !open.is_finite() || close.is_nan() || open > close {
            return Err(WindowError::new(open, close));
        }
        Ok(Self { open, close })
    }

    /// The unconstrained window `[0, +inf)`.
    #[inline]
    pub fn unbounded() -> Self {
        Self {
            open: 0.0,
            close: f64::INFINITY,
        }
    }

    #[inline]
    pub fn open(&self) -> f64 {
        self.open
    }

    #[inline]
    pub fn close(&self) -> f64 {
        self.close
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.close - self.open
    }

    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.open <= t && t <= self.close
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.open, self.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display_uses_marker_name() {
        let c = CustomerId::new(7);
        let d = DepotId::new(2);
        assert_eq!(format!("{c}"), "CustomerId(7)");
        assert_eq!(format!("{d}"), "DepotId(2)");
    }

    #[test]
    fn test_window_rejects_inverted_and_nan() {
        assert!(TimeWindow::new(5.0, 4.0).is_err());
        assert!(TimeWindow::new(f64::NAN, 1.0).is_err());
        assert!(TimeWindow::new(0.0, f64::NAN).is_err());
        assert!(TimeWindow::new(f64::INFINITY, f64::INFINITY).is_err());
    }

    #[test]
    fn test_window_accepts_unbounded_close() {
        let w = TimeWindow::new(3.0, f64::INFINITY).unwrap();
        assert!(w.contains(1e12));
        assert!(!w.contains(2.9));
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let w = TimeWindow::new(1.0, 2.0).unwrap();
        assert!(w.contains(1.0));
        assert!(w.contains(2.0));
        assert!(!w.contains(2.0 + 1e-9));
    }
}
