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

use crate::state::route::RouteRef;
use lrp_model::prelude::Customer;

/// Live per-customer search state: the static attributes copied out of the
/// instance for cache locality, plus the chain links and visit times the
/// mutators maintain.
///
/// A customer is *open* while it points at [`RouteRef::NULL`]; open
/// customers carry infinite visit times.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerState {
    pub(crate) node: usize,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) demand: f64,
    pub(crate) service_time: f64,
    pub(crate) window_open: f64,
    pub(crate) window_close: f64,
    pub(crate) route: RouteRef,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
    pub(crate) arrival: f64,
    pub(crate) departure: f64,
}

impl CustomerState {
    pub(crate) fn from_spec(node: usize, spec: &Customer) -> Self {
        Self {
            node,
            x: spec.x(),
            y: spec.y(),
            demand: spec.demand(),
            service_time: spec.service_time(),
            window_open: spec.window().open(),
            window_close: spec.window().close(),
            route: RouteRef::NULL,
            prev: None,
            next: None,
            arrival: f64::INFINITY,
            departure: f64::INFINITY,
        }
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
    pub fn demand(&self) -> f64 {
        self.demand
    }

    #[inline]
    pub fn service_time(&self) -> f64 {
        self.service_time
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
    pub fn route(&self) -> RouteRef {
        self.route
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.route.is_null()
    }

    #[inline]
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    #[inline]
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    #[inline]
    pub fn arrival(&self) -> f64 {
        self.arrival
    }

    #[inline]
    pub fn departure(&self) -> f64 {
        self.departure
    }
}
