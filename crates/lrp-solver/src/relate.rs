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

//! Relatedness: a positive similarity scalar used as a sampling key by the
//! "related" removal family. Higher means more similar. Self-pairs score
//! `+inf`; pairs touching a non-operational route or vehicle score `-inf`
//! so they are never picked.

use crate::state::{route::RouteRef, solution::Solution};

/// Absolute difference that treats two equal infinities as zero distance.
#[inline]
fn absdiff(a: f64, b: f64) -> f64 {
    if a == b { 0.0 } else { (a - b).abs() }
}

#[inline]
fn indicator(p: bool) -> f64 {
    if p { 1.0 } else { 0.0 }
}

/// Similarity of two customers: shared assignment context over spatial and
/// temporal distance.
pub fn customers(s: &Solution<'_>, a: usize, b: usize) -> f64 {
    if a == b {
        return f64::INFINITY;
    }
    let ca = s.customer(a);
    let cb = s.customer(b);
    let (ra, rb) = (ca.route(), cb.route());
    let same_depot = !ra.is_null() && !rb.is_null() && ra.depot == rb.depot;
    let same_vehicle = same_depot && ra.vehicle == rb.vehicle;
    let same_route = same_vehicle && ra.slot == rb.slot;

    let num = (ca.demand() - cb.demand()).abs()
        + 1.0
        + indicator(same_depot)
        + indicator(same_vehicle)
        + indicator(same_route);
    let den = s.instance().distance(a, b)
        + absdiff(ca.window_open(), cb.window_open())
        + absdiff(ca.window_close(), cb.window_close());
    num / den
}

/// Similarity of a customer to a depot.
pub fn customer_depot(s: &Solution<'_>, c: usize, d: usize) -> f64 {
    let cs = s.customer(c);
    let assigned_here = !cs.route().is_null() && cs.route().depot == d;
    let num = 1.0 + indicator(assigned_here);
    num / s.instance().distance(c, s.depot(d).node())
}

/// Similarity of two routes: centroid and schedule proximity, with bonuses
/// for sharing a depot or vehicle.
pub fn routes(s: &Solution<'_>, a: RouteRef, b: RouteRef) -> f64 {
    let ra = s.route(a);
    let rb = s.route(b);
    if !ra.is_operational() || !rb.is_operational() {
        return f64::NEG_INFINITY;
    }
    if a == b {
        return f64::INFINITY;
    }
    let same_depot = a.depot == b.depot;
    let same_vehicle = same_depot && a.vehicle == b.vehicle;

    let (ax, ay) = ra.centroid();
    let (bx, by) = rb.centroid();
    let num = (ra.load() - rb.load()).abs()
        + 1.0
        + indicator(same_depot)
        + indicator(same_vehicle);
    let den = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
        + absdiff(ra.t_start(), rb.t_start())
        + absdiff(ra.t_end(), rb.t_end());
    num / den
}

/// Similarity of two vehicles, by demand-weighted centroids.
pub fn vehicles(s: &Solution<'_>, a: (usize, usize), b: (usize, usize)) -> f64 {
    let va = &s.depot(a.0).vehicles()[a.1];
    let vb = &s.depot(b.0).vehicles()[b.1];
    if !va.is_operational() || !vb.is_operational() {
        return f64::NEG_INFINITY;
    }
    if a == b {
        return f64::INFINITY;
    }
    let (ax, ay) = va.centroid();
    let (bx, by) = vb.centroid();
    let num = (va.load() - vb.load()).abs() + 1.0 + indicator(a.0 == b.0);
    let den = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
        + absdiff(va.t_start(), vb.t_start())
        + absdiff(va.t_end(), vb.t_end());
    num / den
}
