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

//! Objective and feasibility over the cached aggregates.
//!
//! Everything here is a single pass over state the mutators maintain; no
//! chain is ever re-walked.

use crate::state::solution::Solution;

const EPS: f64 = 1e-9;

/// Which cost terms [`objective`] sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostPhases {
    pub fixed: bool,
    pub operational: bool,
    pub penalty: bool,
}

impl CostPhases {
    pub const ALL: CostPhases = CostPhases {
        fixed: true,
        operational: true,
        penalty: true,
    };

    pub const NO_PENALTY: CostPhases = CostPhases {
        fixed: true,
        operational: true,
        penalty: false,
    };
}

impl Default for CostPhases {
    fn default() -> Self {
        Self::ALL
    }
}

#[inline]
fn pos(v: f64) -> f64 {
    if v > 0.0 { v } else { 0.0 }
}

fn fixed_cost(s: &Solution<'_>) -> f64 {
    let mut z = 0.0;
    for d in s.depots() {
        if d.is_operational() {
            z += d.fixed_cost();
        }
        for v in d.vehicles() {
            if v.is_operational() {
                z += v.fixed_cost();
            }
        }
    }
    z
}

fn operational_cost(s: &Solution<'_>) -> f64 {
    let mut z = 0.0;
    for d in s.depots() {
        z += d.load() * d.cost_per_load();
        for v in d.vehicles() {
            z += v.length() * v.cost_per_distance();
            z += v.shift() * v.cost_per_time();
        }
    }
    z
}

/// Total constraint-violation magnitude: absolute overflow amounts, plus
/// lost demand for unserved customers.
pub fn violations(s: &Solution<'_>) -> f64 {
    let num_customers = s.customers().len() as f64;
    let mut p = 0.0;

    for d in s.depots() {
        if d.is_operational() {
            p += pos(d.share_min() * num_customers - d.count() as f64);
            p += pos(d.count() as f64 - d.share_max() * num_customers);
        } else if d.mandatory() {
            p += d.fixed_cost();
        }
        p += pos(d.load() - d.capacity());

        for v in d.vehicles() {
            for r in v.routes() {
                p += pos(r.load() - v.capacity());
                p += pos(r.length() - v.range());
            }
            p += pos(d.window_open() - v.t_start());
            p += pos(v.t_end() - d.window_close());
            p += pos(v.shift() - v.max_shift());
        }
    }

    for c in s.customers() {
        if c.is_open() {
            p += c.demand();
        } else {
            p += pos(c.arrival() - c.window_close());
        }
    }

    p
}

/// The weighted objective. Violations are priced, not rejected: the penalty
/// term is scaled by a power of ten above the fixed-plus-operational base so
/// an infeasible solution never outranks a feasible one of equal base cost.
pub fn objective(s: &Solution<'_>, phases: CostPhases) -> f64 {
    let fixed = fixed_cost(s);
    let operational = operational_cost(s);

    let mut z = 0.0;
    if phases.fixed {
        z += fixed;
    }
    if phases.operational {
        z += operational;
    }
    if phases.penalty {
        let base = fixed + operational;
        let scale = if base > 1.0 {
            10f64.powi(base.log10().ceil() as i32)
        } else {
            1.0
        };
        z += violations(s) * scale;
    }
    z
}

/// Strict predicate form of the violation terms.
#[inline]
pub fn is_feasible(s: &Solution<'_>) -> bool {
    violations(s) <= EPS
}
