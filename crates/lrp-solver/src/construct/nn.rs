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

//! Nearest-neighbor growth: always append the open customer closest to some
//! route end, preferring appends that keep the route within capacity.

use crate::state::{route::RouteRef, solution::Solution};

pub(crate) fn build(s: &mut Solution<'_>) {
    loop {
        s.open_slots();
        let open: Vec<usize> = s.open_customers().collect();
        if open.is_empty() {
            return;
        }

        let mut fitting: Option<(f64, usize, RouteRef)> = None;
        let mut fallback: Option<(f64, usize, RouteRef)> = None;
        for r in s.route_refs() {
            let route = s.route(r);
            let end_node = route.last().unwrap_or(s.depot(r.depot).node());
            let capacity = s.depot(r.depot).vehicles()[r.vehicle].capacity();
            let load = route.load();
            for &c in &open {
                let dist = s.instance().distance(end_node, c);
                let fits = load + s.customer(c).demand() <= capacity;
                let slot = (dist, c, r);
                if fits {
                    if fitting.as_ref().is_none_or(|(w, _, _)| dist < *w) {
                        fitting = Some(slot);
                    }
                } else if fallback.as_ref().is_none_or(|(w, _, _)| dist < *w) {
                    fallback = Some(slot);
                }
            }
        }

        // When nothing fits, overload the nearest end and let the next
        // slot-opening pass react to the pressure.
        let Some((_, c, r)) = fitting.or(fallback) else {
            return;
        };
        let tail = s.route(r).last();
        s.insert_customer(c, tail, None, r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::audit::audit;
    use crate::testutil;

    #[test]
    fn test_visits_line_in_order() {
        let inst = testutil::line_instance(4, 1);
        let mut s = Solution::new(&inst);
        build(&mut s);
        assert_eq!(s.num_open(), 0);
        // Nearest-neighbor from the depot at the origin walks x ascending.
        let r = s.operational_route_refs()[0];
        let chain: Vec<usize> = s.route_customers(r).collect();
        assert_eq!(chain, vec![0, 1, 2, 3]);
        audit(&s).unwrap();
    }

    #[test]
    fn test_splits_when_capacity_binds() {
        let inst = testutil::tight_instance(4);
        let mut s = Solution::new(&inst);
        build(&mut s);
        assert_eq!(s.num_open(), 0);
        for r in s.operational_route_refs() {
            assert!(s.route(r).load() <= 2.0 + 1e-9);
        }
        audit(&s).unwrap();
    }
}
