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

use crate::state::{
    customer::CustomerState,
    depot::DepotState,
    route::{Route, RouteRef},
    vehicle::VehicleState,
};
use lrp_model::prelude::Instance;
use std::hash::{Hash, Hasher};

/// The search state: arena-stored customers and depots (depots own
/// vehicles, vehicles own routes), with every aggregate the evaluator reads
/// maintained incrementally by [`insert_customer`](Solution::insert_customer)
/// and [`remove_customer`](Solution::remove_customer).
///
/// Cloning produces the per-iteration trial copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<'p> {
    instance: &'p Instance,
    time_tracking: bool,
    pub(crate) customers: Vec<CustomerState>,
    pub(crate) depots: Vec<DepotState>,
}

/// Forward iterator over the customer indices of one route chain.
pub struct RouteCustomers<'s> {
    customers: &'s [CustomerState],
    cur: Option<usize>,
}

impl Iterator for RouteCustomers<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let c = self.cur?;
        self.cur = self.customers[c].next;
        Some(c)
    }
}

impl<'p> Solution<'p> {
    /// An empty solution over `instance`: all customers open, one vehicle
    /// per fleet class at each depot, no routes yet.
    pub fn new(instance: &'p Instance) -> Self {
        let customers = instance
            .customers()
            .iter()
            .enumerate()
            .map(|(ix, spec)| CustomerState::from_spec(ix, spec))
            .collect();
        let depots = instance
            .depots()
            .iter()
            .enumerate()
            .map(|(ix, spec)| DepotState::from_spec(ix, instance.depot_node(ix), spec))
            .collect();
        Self {
            instance,
            time_tracking: true,
            customers,
            depots,
        }
    }

    /// Disables or re-enables visit-time propagation for this run.
    pub fn with_time_tracking(mut self, yes: bool) -> Self {
        self.time_tracking = yes;
        self
    }

    #[inline]
    pub fn time_tracking(&self) -> bool {
        self.time_tracking
    }

    #[inline]
    pub fn instance(&self) -> &'p Instance {
        self.instance
    }

    #[inline]
    pub fn customers(&self) -> &[CustomerState] {
        &self.customers
    }

    #[inline]
    pub fn customer(&self, ix: usize) -> &CustomerState {
        &self.customers[ix]
    }

    #[inline]
    pub fn depots(&self) -> &[DepotState] {
        &self.depots
    }

    #[inline]
    pub fn depot(&self, ix: usize) -> &DepotState {
        &self.depots[ix]
    }

    #[inline]
    pub fn route(&self, r: RouteRef) -> &Route {
        &self.depots[r.depot].vehicles[r.vehicle].routes[r.slot]
    }

    #[inline]
    pub fn route_customers(&self, r: RouteRef) -> RouteCustomers<'_> {
        RouteCustomers {
            customers: &self.customers,
            cur: self.route(r).first,
        }
    }

    /// Indices of customers not currently assigned to any route.
    pub fn open_customers(&self) -> impl Iterator<Item = usize> + '_ {
        self.customers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_open())
            .map(|(ix, _)| ix)
    }

    #[inline]
    pub fn num_open(&self) -> usize {
        self.customers.iter().filter(|c| c.is_open()).count()
    }

    /// All route addresses, in depot/vehicle/slot order.
    pub fn route_refs(&self) -> Vec<RouteRef> {
        let mut out = Vec::new();
        for d in &self.depots {
            for v in &d.vehicles {
                for r in &v.routes {
                    out.push(r.rref());
                }
            }
        }
        out
    }

    /// Route addresses of routes currently serving at least one customer.
    pub fn operational_route_refs(&self) -> Vec<RouteRef> {
        let mut out = self.route_refs();
        out.retain(|r| self.route(*r).is_operational());
        out
    }

    /// Every insertion point of route `r` as `(tail, head)` pairs, depot
    /// endpoints encoded as `None`.
    pub fn insertion_points(&self, r: RouteRef) -> Vec<(Option<usize>, Option<usize>)> {
        let route = self.route(r);
        let mut out = Vec::with_capacity(route.count + 1);
        let mut tail = None;
        let mut head = route.first;
        loop {
            out.push((tail, head));
            match head {
                Some(h) => {
                    tail = Some(h);
                    head = self.customers[h].next;
                }
                None => break,
            }
        }
        out
    }

    /// Splices customer `c` between `tail` and `head` in route `r` and
    /// updates every cached aggregate. `tail`/`head` must genuinely flank
    /// the insertion point; `None` stands for the depot endpoint.
    pub fn insert_customer(
        &mut self,
        c: usize,
        tail: Option<usize>,
        head: Option<usize>,
        r: RouteRef,
    ) {
        debug_assert!(!r.is_null());
        debug_assert!(self.customers[c].is_open(), "customer {c} is not open");

        let (demand, x, y) = {
            let cs = &self.customers[c];
            (cs.demand, cs.x, cs.y)
        };
        let depot_node = self.depots[r.depot].node;
        let tail_node = tail.unwrap_or(depot_node);
        let head_node = head.unwrap_or(depot_node);
        let delta_len = self.instance.distance(tail_node, c)
            + self.instance.distance(c, head_node)
            - self.instance.distance(tail_node, head_node);

        {
            let route = &self.depots[r.depot].vehicles[r.vehicle].routes[r.slot];
            match tail {
                Some(t) => debug_assert_eq!(self.customers[t].next, head),
                None => debug_assert_eq!(route.first, head),
            }
            match head {
                Some(h) => debug_assert_eq!(self.customers[h].prev, tail),
                None => debug_assert_eq!(route.last, tail),
            }
        }

        if let Some(t) = tail {
            self.customers[t].next = Some(c);
        }
        if let Some(h) = head {
            self.customers[h].prev = Some(c);
        }
        {
            let route = &mut self.depots[r.depot].vehicles[r.vehicle].routes[r.slot];
            if tail.is_none() {
                route.first = Some(c);
            }
            if head.is_none() {
                route.last = Some(c);
            }
            route.count += 1;
            route.load += demand;
            route.length += delta_len;
            let n = route.count as f64;
            route.cx += (x - route.cx) / n;
            route.cy += (y - route.cy) / n;
        }
        {
            let v = &mut self.depots[r.depot].vehicles[r.vehicle];
            v.count += 1;
            v.load += demand;
            v.length += delta_len;
        }
        {
            let d = &mut self.depots[r.depot];
            d.count += 1;
            d.load += demand;
            d.length += delta_len;
        }
        {
            let cs = &mut self.customers[c];
            cs.route = r;
            cs.prev = tail;
            cs.next = head;
        }

        if self.time_tracking {
            self.propagate(r.depot, r.vehicle, r.slot);
        } else {
            let cs = &mut self.customers[c];
            cs.arrival = 0.0;
            cs.departure = 0.0;
        }
    }

    /// Unsplices customer `c` from its route, restoring it to the open
    /// state, and returns the `(tail, head, route)` it occupied so a caller
    /// can undo the removal with an exact inverse insert.
    pub fn remove_customer(&mut self, c: usize) -> (Option<usize>, Option<usize>, RouteRef) {
        let (r, tail, head, demand, x, y) = {
            let cs = &self.customers[c];
            (cs.route, cs.prev, cs.next, cs.demand, cs.x, cs.y)
        };
        debug_assert!(!r.is_null(), "customer {c} is not assigned");

        let depot_node = self.depots[r.depot].node;
        let tail_node = tail.unwrap_or(depot_node);
        let head_node = head.unwrap_or(depot_node);
        let delta_len = self.instance.distance(tail_node, c)
            + self.instance.distance(c, head_node)
            - self.instance.distance(tail_node, head_node);

        if let Some(t) = tail {
            self.customers[t].next = head;
        }
        if let Some(h) = head {
            self.customers[h].prev = tail;
        }
        {
            let route = &mut self.depots[r.depot].vehicles[r.vehicle].routes[r.slot];
            if tail.is_none() {
                route.first = head;
            }
            if head.is_none() {
                route.last = tail;
            }
            route.count -= 1;
            route.load -= demand;
            route.length -= delta_len;
            if route.count == 0 {
                route.cx = 0.0;
                route.cy = 0.0;
            } else {
                let n = route.count as f64;
                route.cx = (route.cx * (n + 1.0) - x) / n;
                route.cy = (route.cy * (n + 1.0) - y) / n;
            }
        }
        {
            let v = &mut self.depots[r.depot].vehicles[r.vehicle];
            v.count -= 1;
            v.load -= demand;
            v.length -= delta_len;
        }
        {
            let d = &mut self.depots[r.depot];
            d.count -= 1;
            d.load -= demand;
            d.length -= delta_len;
        }
        {
            let cs = &mut self.customers[c];
            cs.route = RouteRef::NULL;
            cs.prev = None;
            cs.next = None;
            cs.arrival = f64::INFINITY;
            cs.departure = f64::INFINITY;
        }

        if self.time_tracking {
            self.propagate(r.depot, r.vehicle, r.slot);
        }
        (tail, head, r)
    }

    /// Re-times every route of vehicle `(d, v)` from `from_slot` on (route
    /// starts chain causally through the vehicle), then reruns the backward
    /// slack pass over the whole vehicle.
    pub(crate) fn propagate(&mut self, d: usize, v: usize, from_slot: usize) {
        if !self.time_tracking {
            return;
        }
        let instance = self.instance;
        let depot_node = self.depots[d].node;
        let depot_open = self.depots[d].window_open;
        let depot_close = self.depots[d].window_close;
        let (speed, range, fuel_time, load_time, stop_time) = {
            let vs = &self.depots[d].vehicles[v];
            (vs.speed, vs.range, vs.fuel_time, vs.load_time, vs.stop_time)
        };

        let num_routes = self.depots[d].vehicles[v].routes.len();
        for slot in from_slot..num_routes {
            let (t_init, fuel_init) = if slot == 0 {
                (depot_open, 1.0)
            } else {
                let prev = &self.depots[d].vehicles[v].routes[slot - 1];
                (prev.t_end, prev.fuel_end)
            };
            let (first, length, load, count) = {
                let r = &self.depots[d].vehicles[v].routes[slot];
                (r.first, r.length, r.load, r.count)
            };

            if count == 0 {
                let r = &mut self.depots[d].vehicles[v].routes[slot];
                r.t_init = t_init;
                r.fuel_init = fuel_init;
                r.t_start = t_init;
                r.t_end = t_init;
                r.fuel_start = fuel_init;
                r.fuel_end = fuel_init;
                continue;
            }

            // Refuel just enough to cover the route, then load.
            let need = if range.is_finite() { length / range } else { 0.0 };
            let fuel_start = fuel_init + (need - fuel_init).max(0.0);
            let t_start = t_init + fuel_time * (fuel_start - fuel_init) + load_time * load;

            let mut prev_node = depot_node;
            let mut t_depart = t_start;
            let mut cur = first;
            while let Some(ci) = cur {
                let travel = instance.distance(prev_node, ci) / speed;
                let cs = &mut self.customers[ci];
                cs.arrival = t_depart + travel;
                let begin = cs.arrival + stop_time;
                let ready = if begin < cs.window_open {
                    cs.window_open
                } else {
                    begin
                };
                cs.departure = ready + cs.service_time;
                t_depart = cs.departure;
                prev_node = ci;
                cur = cs.next;
            }
            let t_end = t_depart + instance.distance(prev_node, depot_node) / speed;

            let r = &mut self.depots[d].vehicles[v].routes[slot];
            r.t_init = t_init;
            r.fuel_init = fuel_init;
            r.t_start = t_start;
            r.t_end = t_end;
            r.fuel_start = fuel_start;
            r.fuel_end = fuel_start - need;
        }

        {
            let vs = &mut self.depots[d].vehicles[v];
            vs.t_start = depot_open;
            vs.t_end = vs.routes.last().map_or(depot_open, |r| r.t_end);
        }

        // Backward pass: the largest uniform delay that keeps every
        // remaining visit inside its window, capped by the depot close.
        let mut slack = depot_close - self.depots[d].vehicles[v].t_end;
        for slot in (0..num_routes).rev() {
            let mut cur = self.depots[d].vehicles[v].routes[slot].last;
            while let Some(ci) = cur {
                let cs = &self.customers[ci];
                let margin = cs.window_close - cs.arrival - stop_time;
                if margin < slack {
                    slack = margin;
                }
                cur = cs.prev;
            }
            self.depots[d].vehicles[v].routes[slot].slack = slack;
        }
        self.depots[d].vehicles[v].slack = slack;

        let depot_slack = self.depots[d]
            .vehicles
            .iter()
            .map(|vs| vs.slack)
            .fold(f64::INFINITY, f64::min);
        self.depots[d].slack = depot_slack;
    }

    /// A fresh empty route may be opened on `(d, v)` only while the vehicle
    /// still has slot budget, carries no other empty route, is inside its
    /// working window, the depot has spare capacity, and some pressure
    /// signal says an extra route could be useful.
    pub fn can_add_route(&self, d: usize, v: usize) -> bool {
        let dep = &self.depots[d];
        let vs = &dep.vehicles[v];
        vs.routes.len() < vs.max_routes
            && vs.routes.iter().all(|r| r.count > 0)
            && vs.t_end <= dep.window_close
            && vs.t_end - vs.t_start <= vs.max_shift
            && dep.load < dep.capacity
            && (vs.count == 0
                || vs.routes.iter().any(|r| r.load > vs.capacity)
                || self.depots.iter().any(|dd| dd.load > dd.capacity))
    }

    /// A fresh vehicle of `class` may be materialized at `d` only while no
    /// empty vehicle of the same class already idles there, the fleet bound
    /// is not exhausted, the depot has spare capacity, and some existing
    /// vehicle is saturated on load or working time.
    pub fn can_add_vehicle(&self, d: usize, class: usize) -> bool {
        let dep = &self.depots[d];
        let fleet_bound = self.instance.depot(d).fleet()[class].count();
        !dep.vehicles
            .iter()
            .any(|w| w.class == class && w.count == 0)
            && dep.load < dep.capacity
            && dep.vehicles.iter().filter(|w| w.class == class).count() < fleet_bound
            && dep.vehicles.iter().any(|w| {
                w.load >= w.max_routes as f64 * w.capacity || w.t_end - w.t_start >= w.max_shift
            })
    }

    #[inline]
    pub fn can_delete_route(&self, r: RouteRef) -> bool {
        !self.route(r).is_operational()
    }

    pub fn can_delete_vehicle(&self, d: usize, v: usize) -> bool {
        let dep = &self.depots[d];
        let vs = &dep.vehicles[v];
        !vs.is_operational()
            && dep
                .vehicles
                .iter()
                .enumerate()
                .any(|(wi, w)| wi != v && w.class == vs.class)
    }

    /// Appends an empty route to `(d, v)` inheriting the causal clock and
    /// tank of the vehicle's last route. Construction-time primitive; the
    /// search itself goes through [`open_slots`](Solution::open_slots).
    pub(crate) fn spawn_route(&mut self, d: usize, v: usize) -> RouteRef {
        let depot_open = self.depots[d].window_open;
        let vs = &mut self.depots[d].vehicles[v];
        let slot = vs.routes.len();
        let (t_init, fuel_init) = match vs.routes.last() {
            Some(p) => (p.t_end, p.fuel_end),
            None => (depot_open, 1.0),
        };
        vs.routes.push(Route::new(d, v, slot, t_init, fuel_init));
        RouteRef::new(d, v, slot)
    }

    /// Materializes one more vehicle of `class` at depot `d`.
    pub(crate) fn spawn_vehicle(&mut self, d: usize, class: usize) -> usize {
        let instance = self.instance;
        let spec = &instance.depot(d).fleet()[class];
        let dep = &mut self.depots[d];
        let index = dep.vehicles.len();
        let vs = VehicleState::from_class(d, index, class, spec, dep.window_open, dep.window_close);
        dep.vehicles.push(vs);
        index
    }

    /// Pre-insertion hook: offers the insertion operators speculative empty
    /// routes and vehicles wherever the conservative predicates allow.
    pub fn open_slots(&mut self) {
        for d in 0..self.depots.len() {
            let existing = self.depots[d].vehicles.len();
            for v in 0..existing {
                if self.can_add_route(d, v) {
                    self.spawn_route(d, v);
                }
                let class = self.depots[d].vehicles[v].class;
                if self.can_add_vehicle(d, class) {
                    let nv = self.spawn_vehicle(d, class);
                    self.spawn_route(d, nv);
                }
            }
        }
    }

    /// Post-insertion hook: garbage-collects non-operational routes and
    /// redundant empty vehicles, renumbers the survivors densely, refreshes
    /// every customer's cached route address and re-times all vehicles.
    pub fn collect_slots(&mut self) {
        for d in 0..self.depots.len() {
            for v in 0..self.depots[d].vehicles.len() {
                let vs = &mut self.depots[d].vehicles[v];
                if vs.routes.iter().any(|r| r.count == 0) {
                    vs.routes.retain(|r| r.count > 0);
                    for (slot, r) in vs.routes.iter_mut().enumerate() {
                        r.slot = slot;
                    }
                }
            }

            let n = self.depots[d].vehicles.len();
            let mut keep = vec![true; n];
            for v in 0..n {
                let vs = &self.depots[d].vehicles[v];
                if vs.count == 0 {
                    let has_twin = self.depots[d]
                        .vehicles
                        .iter()
                        .enumerate()
                        .any(|(wi, w)| wi != v && keep[wi] && w.class == vs.class);
                    if has_twin {
                        keep[v] = false;
                    }
                }
            }
            if keep.iter().any(|k| !k) {
                let mut flags = keep.into_iter();
                self.depots[d].vehicles.retain(|_| flags.next().unwrap());
            }
            for (vi, vs) in self.depots[d].vehicles.iter_mut().enumerate() {
                vs.index = vi;
                for r in vs.routes.iter_mut() {
                    r.depot = d;
                    r.vehicle = vi;
                }
            }
        }

        self.refresh_route_refs();
        if self.time_tracking {
            for d in 0..self.depots.len() {
                for v in 0..self.depots[d].vehicles.len() {
                    self.propagate(d, v, 0);
                }
            }
        }
    }

    /// Rewrites every assigned customer's cached route address from the
    /// actual chains. Removal operators run this before and after a batch.
    pub fn refresh_route_refs(&mut self) {
        for d in 0..self.depots.len() {
            for v in 0..self.depots[d].vehicles.len() {
                for slot in 0..self.depots[d].vehicles[v].routes.len() {
                    let rref = RouteRef::new(d, v, slot);
                    let mut cur = self.depots[d].vehicles[v].routes[slot].first;
                    while let Some(ci) = cur {
                        self.customers[ci].route = rref;
                        cur = self.customers[ci].next;
                    }
                }
            }
        }
    }

    /// Canonical per-depot visit sequences: the depot node index followed by
    /// its customers in route order. Basis for hashing and tests.
    pub fn vectorize(&self) -> Vec<Vec<usize>> {
        self.depots
            .iter()
            .map(|d| {
                let mut seq = vec![d.node];
                for v in &d.vehicles {
                    for r in &v.routes {
                        let mut cur = r.first;
                        while let Some(ci) = cur {
                            seq.push(ci);
                            cur = self.customers[ci].next;
                        }
                    }
                }
                seq
            })
            .collect()
    }

    /// Stable per-process key of the visit structure.
    pub fn state_key(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.vectorize().hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn test_insert_links_chain_and_aggregates() {
        let inst = testutil::line_instance(3, 1);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);

        s.insert_customer(0, None, None, r);
        s.insert_customer(1, Some(0), None, r);
        s.insert_customer(2, Some(0), Some(1), r);

        // Chain is depot -> 0 -> 2 -> 1 -> depot.
        let chain: Vec<usize> = s.route_customers(r).collect();
        assert_eq!(chain, vec![0, 2, 1]);
        let route = s.route(r);
        assert_eq!(route.count, 3);
        assert_eq!(route.load, 3.0);
        assert_eq!(s.depot(0).count(), 3);
        assert_eq!(s.depot(0).load(), 3.0);
        assert!(!s.customer(0).is_open());
        assert_eq!(s.customer(2).prev(), Some(0));
        assert_eq!(s.customer(2).next(), Some(1));
    }

    #[test]
    fn test_remove_is_exact_inverse_of_insert() {
        let inst = testutil::line_instance(3, 1);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        s.insert_customer(1, Some(0), None, r);

        let before = s.clone();
        s.insert_customer(2, Some(0), Some(1), r);
        let (tail, head, rref) = s.remove_customer(2);
        assert_eq!((tail, head, rref), (Some(0), Some(1), r));

        assert_eq!(s.vectorize(), before.vectorize());
        let (a, b) = (s.route(r), before.route(r));
        assert_eq!(a.count, b.count);
        assert!((a.load - b.load).abs() < 1e-9);
        assert!((a.length - b.length).abs() < 1e-9);
        assert!((a.cx - b.cx).abs() < 1e-12);
        assert!((a.cy - b.cy).abs() < 1e-12);
        assert!((a.t_end - b.t_end).abs() < 1e-12);
        assert!(s.customer(2).is_open());
        assert!(s.customer(2).arrival().is_infinite());
    }

    #[test]
    fn test_route_times_follow_travel_and_service() {
        // Customers at x = 1, 2, 3 with unit speed and no overheads: the
        // vehicle arrives at 1, 2, 3 and returns at 6.
        let inst = testutil::line_instance(3, 1);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        s.insert_customer(1, Some(0), None, r);
        s.insert_customer(2, Some(1), None, r);

        assert!((s.customer(0).arrival() - 1.0).abs() < 1e-12);
        assert!((s.customer(1).arrival() - 2.0).abs() < 1e-12);
        assert!((s.customer(2).arrival() - 3.0).abs() < 1e-12);
        assert!((s.route(r).t_end - 6.0).abs() < 1e-12);
        assert!((s.depot(0).vehicles()[0].t_end() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_waiting_respects_window_open() {
        let inst = testutil::windowed_line_instance(2, 1, 10.0, 100.0);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        // Arrival at 1.0 is before the window opens at 10.0; departure waits.
        assert!((s.customer(0).arrival() - 1.0).abs() < 1e-12);
        assert!((s.customer(0).departure() - 10.0).abs() < 1e-12);
        // Slack is limited by the tightest remaining window.
        assert!(s.route(r).slack() <= 100.0 - 1.0);
    }

    #[test]
    fn test_later_routes_inherit_clock_causally() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst);
        let r0 = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r0);
        let r1 = s.spawn_route(0, 0);
        s.insert_customer(1, None, None, r1);

        let first = s.route(r0).clone();
        let second = s.route(r1).clone();
        assert!((second.t_init - first.t_end).abs() < 1e-12);
        assert!((second.fuel_init - first.fuel_end).abs() < 1e-12);
    }

    #[test]
    fn test_open_slots_offers_route_for_empty_vehicle() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst);
        assert!(s.depot(0).vehicles()[0].routes().is_empty());
        s.open_slots();
        assert_eq!(s.depot(0).vehicles()[0].routes().len(), 1);
        // A second call adds nothing: the empty route blocks another.
        s.open_slots();
        assert_eq!(s.depot(0).vehicles()[0].routes().len(), 1);
    }

    #[test]
    fn test_collect_slots_drops_empty_route_and_is_idempotent() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst);
        let r0 = s.spawn_route(0, 0);
        let _r1 = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r0);

        s.collect_slots();
        assert_eq!(s.depot(0).vehicles()[0].routes().len(), 1);
        let after_one = s.clone();
        s.collect_slots();
        assert_eq!(s, after_one);
    }

    #[test]
    fn test_collect_slots_removes_speculative_empty_vehicle() {
        // A saturated vehicle makes the pre-insertion hook materialize a
        // second vehicle; leaving it unused must garbage-collect it again.
        let inst = testutil::tight_instance(3);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        s.insert_customer(1, Some(0), None, r);
        assert_eq!(s.depot(0).vehicles().len(), 1);

        s.open_slots();
        assert_eq!(s.depot(0).vehicles().len(), 2);

        s.collect_slots();
        assert_eq!(s.depot(0).vehicles().len(), 1);
        assert!(s.depot(0).vehicles()[0].is_operational());
    }

    #[test]
    fn test_time_tracking_off_skips_propagation() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst).with_time_tracking(false);
        let r = s.spawn_route(0, 0);
        s.insert_customer(0, None, None, r);
        assert_eq!(s.customer(0).arrival(), 0.0);
        assert_eq!(s.customer(0).departure(), 0.0);
        assert_eq!(s.depot(0).vehicles()[0].t_end(), 0.0);
        s.remove_customer(0);
        assert!(s.customer(0).arrival().is_infinite());
    }

    #[test]
    fn test_vectorize_lists_depot_then_customers() {
        let inst = testutil::line_instance(2, 1);
        let mut s = Solution::new(&inst);
        let r = s.spawn_route(0, 0);
        s.insert_customer(1, None, None, r);
        s.insert_customer(0, Some(1), None, r);
        let v = s.vectorize();
        assert_eq!(v, vec![vec![2, 1, 0]]);
    }

    #[test]
    fn test_state_key_tracks_visit_structure() {
        let inst = testutil::line_instance(2, 1);
        let mut a = Solution::new(&inst);
        let mut b = Solution::new(&inst);
        let ra = a.spawn_route(0, 0);
        let rb = b.spawn_route(0, 0);
        a.insert_customer(0, None, None, ra);
        b.insert_customer(0, None, None, rb);
        assert_eq!(a.state_key(), b.state_key());
        b.insert_customer(1, Some(0), None, rb);
        assert_ne!(a.state_key(), b.state_key());
    }
}
