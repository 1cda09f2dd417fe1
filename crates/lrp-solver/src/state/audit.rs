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

use crate::state::{route::RouteRef, solution::Solution};

const EPS: f64 = 1e-9;

/// A cached aggregate or chain pointer that disagrees with a from-scratch
/// recomputation. Any of these indicates a mutator bug and is fatal to the
/// run that detects it.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditError {
    ChainCount {
        route: RouteRef,
        cached: usize,
        actual: usize,
    },
    BrokenLink {
        customer: usize,
    },
    RouteRefMismatch {
        customer: usize,
        cached: RouteRef,
        actual: RouteRef,
    },
    DuplicateVisit {
        customer: usize,
    },
    OpenCustomerState {
        customer: usize,
    },
    RouteAggregate {
        route: RouteRef,
        field: &'static str,
        cached: f64,
        actual: f64,
    },
    VehicleAggregate {
        depot: usize,
        vehicle: usize,
        field: &'static str,
        cached: f64,
        actual: f64,
    },
    DepotAggregate {
        depot: usize,
        field: &'static str,
        cached: f64,
        actual: f64,
    },
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::ChainCount {
                route,
                cached,
                actual,
            } => write!(f, "{route}: cached count {cached}, chain has {actual}."),
            AuditError::BrokenLink { customer } => {
                write!(f, "Customer {customer}: inconsistent chain links.")
            }
            AuditError::RouteRefMismatch {
                customer,
                cached,
                actual,
            } => write!(
                f,
                "Customer {customer}: cached route {cached}, actually in {actual}."
            ),
            AuditError::DuplicateVisit { customer } => {
                write!(f, "Customer {customer} appears in more than one chain.")
            }
            AuditError::OpenCustomerState { customer } => write!(
                f,
                "Open customer {customer} still carries links or finite times."
            ),
            AuditError::RouteAggregate {
                route,
                field,
                cached,
                actual,
            } => write!(f, "{route}: {field} cached {cached}, recomputed {actual}."),
            AuditError::VehicleAggregate {
                depot,
                vehicle,
                field,
                cached,
                actual,
            } => write!(
                f,
                "Vehicle {depot}/{vehicle}: {field} cached {cached}, recomputed {actual}."
            ),
            AuditError::DepotAggregate {
                depot,
                field,
                cached,
                actual,
            } => write!(
                f,
                "Depot {depot}: {field} cached {cached}, recomputed {actual}."
            ),
        }
    }
}

impl std::error::Error for AuditError {}

#[inline]
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS
}

/// Recomputes every cached aggregate and chain relation from scratch and
/// compares against the caches the mutators maintain.
pub fn audit(s: &Solution<'_>) -> Result<(), AuditError> {
    let mut seen = vec![false; s.customers().len()];

    for d in s.depots() {
        let mut d_count = 0usize;
        let mut d_load = 0.0;
        let mut d_length = 0.0;

        for v in d.vehicles() {
            let mut v_count = 0usize;
            let mut v_load = 0.0;
            let mut v_length = 0.0;

            for r in v.routes() {
                let rref = r.rref();
                let mut count = 0usize;
                let mut load = 0.0;
                let mut length = 0.0;
                let mut sx = 0.0;
                let mut sy = 0.0;

                let mut prev: Option<usize> = None;
                let mut cur = r.first();
                while let Some(ci) = cur {
                    let cs = s.customer(ci);
                    if seen[ci] {
                        return Err(AuditError::DuplicateVisit { customer: ci });
                    }
                    seen[ci] = true;
                    if cs.prev() != prev {
                        return Err(AuditError::BrokenLink { customer: ci });
                    }
                    if cs.route() != rref {
                        return Err(AuditError::RouteRefMismatch {
                            customer: ci,
                            cached: cs.route(),
                            actual: rref,
                        });
                    }
                    let prev_node = prev.unwrap_or(d.node());
                    length += s.instance().distance(prev_node, ci);
                    load += cs.demand();
                    sx += cs.x();
                    sy += cs.y();
                    count += 1;
                    prev = Some(ci);
                    cur = cs.next();
                }
                if r.last() != prev {
                    return Err(AuditError::ChainCount {
                        route: rref,
                        cached: r.count(),
                        actual: count,
                    });
                }
                if count > 0 {
                    length += s.instance().distance(prev.unwrap(), d.node());
                }

                if count != r.count() {
                    return Err(AuditError::ChainCount {
                        route: rref,
                        cached: r.count(),
                        actual: count,
                    });
                }
                for (field, cached, actual) in [
                    ("load", r.load(), load),
                    ("length", r.length(), length),
                    (
                        "centroid_x",
                        r.centroid().0,
                        if count > 0 { sx / count as f64 } else { 0.0 },
                    ),
                    (
                        "centroid_y",
                        r.centroid().1,
                        if count > 0 { sy / count as f64 } else { 0.0 },
                    ),
                ] {
                    if !close(cached, actual) {
                        return Err(AuditError::RouteAggregate {
                            route: rref,
                            field,
                            cached,
                            actual,
                        });
                    }
                }

                v_count += count;
                v_load += load;
                v_length += length;
            }

            if v_count != v.count() {
                return Err(AuditError::VehicleAggregate {
                    depot: d.index(),
                    vehicle: v.index(),
                    field: "count",
                    cached: v.count() as f64,
                    actual: v_count as f64,
                });
            }
            for (field, cached, actual) in
                [("load", v.load(), v_load), ("length", v.length(), v_length)]
            {
                if !close(cached, actual) {
                    return Err(AuditError::VehicleAggregate {
                        depot: d.index(),
                        vehicle: v.index(),
                        field,
                        cached,
                        actual,
                    });
                }
            }

            d_count += v_count;
            d_load += v_load;
            d_length += v_length;
        }

        if d_count != d.count() {
            return Err(AuditError::DepotAggregate {
                depot: d.index(),
                field: "count",
                cached: d.count() as f64,
                actual: d_count as f64,
            });
        }
        for (field, cached, actual) in
            [("load", d.load(), d_load), ("length", d.length(), d_length)]
        {
            if !close(cached, actual) {
                return Err(AuditError::DepotAggregate {
                    depot: d.index(),
                    field,
                    cached,
                    actual,
                });
            }
        }
    }

    for (ci, cs) in s.customers().iter().enumerate() {
        if cs.is_open() {
            if seen[ci]
                || cs.prev().is_some()
                || cs.next().is_some()
                || cs.arrival().is_finite()
                || cs.departure().is_finite()
            {
                return Err(AuditError::OpenCustomerState { customer: ci });
            }
        } else if !seen[ci] {
            return Err(AuditError::RouteRefMismatch {
                customer: ci,
                cached: cs.route(),
                actual: RouteRef::NULL,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn test_audit_accepts_freshly_mutated_state() {
        let inst = testutil::line_instance(3, 1);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        s.insert_customer(2, Some(0), None, r);
        s.insert_customer(1, Some(0), Some(2), r);
        audit(&s).unwrap();
        s.remove_customer(2);
        audit(&s).unwrap();
    }

    #[test]
    fn test_audit_detects_corrupted_load() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        s.depots[0].vehicles[0].routes[0].load += 1.0;
        assert!(matches!(
            audit(&s),
            Err(AuditError::RouteAggregate { field: "load", .. })
        ));
    }

    #[test]
    fn test_audit_detects_dangling_route_ref() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        s.customers[0].route = RouteRef::new(0, 0, 7);
        assert!(matches!(
            audit(&s),
            Err(AuditError::RouteRefMismatch { customer: 0, .. })
        ));
    }

    #[test]
    fn test_audit_detects_stale_open_customer() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst);
        s.customers[1].arrival = 3.0;
        assert!(matches!(
            audit(&s),
            Err(AuditError::OpenCustomerState { customer: 1 })
        ));
    }
}
