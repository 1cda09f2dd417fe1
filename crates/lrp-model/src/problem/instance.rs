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

use crate::problem::{arcs::ArcMatrix, customer::Customer, depot::Depot, err::InstanceError};
use std::collections::BTreeSet;

/// A routing instance: customers, candidate depots with their fleets, and
/// the arc matrix over the node union.
///
/// Node index space: customer `i` is node `i`, depot `j` is node
/// `num_customers() + j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    name: String,
    customers: Vec<Customer>,
    depots: Vec<Depot>,
    arcs: ArcMatrix,
}

impl Instance {
    pub fn new(
        name: impl Into<String>,
        customers: Vec<Customer>,
        depots: Vec<Depot>,
        arcs: ArcMatrix,
    ) -> Result<Self, InstanceError> {
        if customers.is_empty() {
            return Err(InstanceError::NoCustomers);
        }
        if depots.is_empty() {
            return Err(InstanceError::NoDepots);
        }

        let mut seen = BTreeSet::new();
        for c in &customers {
            if !seen.insert(*c.id().value()) {
                return Err(InstanceError::DuplicateCustomer(c.id()));
            }
        }
        seen.clear();
        for d in &depots {
            if !seen.insert(*d.id().value()) {
                return Err(InstanceError::DuplicateDepot(d.id()));
            }
            if d.fleet().is_empty() {
                return Err(InstanceError::NoFleet(d.id()));
            }
        }

        let nodes = customers.len() + depots.len();
        if arcs.nodes() != nodes {
            return Err(InstanceError::ArcDimension {
                expected: nodes,
                actual: arcs.nodes() * arcs.nodes(),
            });
        }

        Ok(Self {
            name: name.into(),
            customers,
            depots,
            arcs,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    #[inline]
    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.customers.len() + self.depots.len()
    }

    #[inline]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    #[inline]
    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    #[inline]
    pub fn customer(&self, ix: usize) -> &Customer {
        &self.customers[ix]
    }

    #[inline]
    pub fn depot(&self, ix: usize) -> &Depot {
        &self.depots[ix]
    }

    /// Node index of depot `ix`.
    #[inline]
    pub fn depot_node(&self, ix: usize) -> usize {
        self.customers.len() + ix
    }

    #[inline]
    pub fn arcs(&self) -> &ArcMatrix {
        &self.arcs
    }

    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.arcs.length(from, to)
    }

    /// Total customer demand.
    #[inline]
    pub fn total_demand(&self) -> f64 {
        self.customers.iter().map(|c| c.demand()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{CustomerId, DepotId, TimeWindow, VehicleTypeId};
    use crate::problem::vehicle::VehicleClass;

    fn customer(ix: usize, x: f64, y: f64) -> Customer {
        Customer::new(CustomerId::new(ix), x, y, 1.0, 0.0, TimeWindow::unbounded()).unwrap()
    }

    fn depot(ix: usize, x: f64, y: f64) -> Depot {
        let fleet = vec![
            VehicleClass::new(
                VehicleTypeId::new(0),
                1,
                10.0,
                1e6,
                1.0,
                0.0,
                0.0,
                0.0,
                1e6,
                4,
                1.0,
                0.0,
                0.0,
            )
            .unwrap(),
        ];
        Depot::new(
            DepotId::new(ix),
            x,
            y,
            100.0,
            0.0,
            10.0,
            false,
            0.0,
            1.0,
            TimeWindow::unbounded(),
            fleet,
        )
        .unwrap()
    }

    #[test]
    fn test_node_index_space_puts_depots_after_customers() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (5.0, 5.0)];
        let inst = Instance::new(
            "t",
            vec![customer(0, 0.0, 0.0), customer(1, 1.0, 0.0)],
            vec![depot(0, 5.0, 5.0)],
            ArcMatrix::euclidean(&pts),
        )
        .unwrap();
        assert_eq!(inst.num_nodes(), 3);
        assert_eq!(inst.depot_node(0), 2);
        assert!((inst.distance(0, 2) - 50f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_arc_dimension_mismatch() {
        let r = Instance::new(
            "t",
            vec![customer(0, 0.0, 0.0)],
            vec![depot(0, 1.0, 1.0)],
            ArcMatrix::euclidean(&[(0.0, 0.0)]),
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (5.0, 5.0)];
        let r = Instance::new(
            "t",
            vec![customer(3, 0.0, 0.0), customer(3, 1.0, 0.0)],
            vec![depot(0, 5.0, 5.0)],
            ArcMatrix::euclidean(&pts),
        );
        assert!(matches!(r, Err(InstanceError::DuplicateCustomer(_))));
    }

    #[test]
    fn test_total_demand_sums_customers() {
        let pts = [(0.0, 0.0), (1.0, 0.0), (5.0, 5.0)];
        let inst = Instance::new(
            "t",
            vec![customer(0, 0.0, 0.0), customer(1, 1.0, 0.0)],
            vec![depot(0, 5.0, 5.0)],
            ArcMatrix::euclidean(&pts),
        )
        .unwrap();
        assert_eq!(inst.total_demand(), 2.0);
    }
}
