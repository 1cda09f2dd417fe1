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

//! Cluster-first, route-second: customers bucket to their nearest depot
//! with spare capacity, each bucket is chained nearest-neighbor, and the
//! chain is cut into routes wherever vehicle capacity binds.

use crate::construct::{assign_to_depots, place_sequences};
use crate::state::solution::Solution;

pub(crate) fn build(s: &mut Solution<'_>) {
    let buckets = assign_to_depots(s);
    for (d, bucket) in buckets.into_iter().enumerate() {
        if bucket.is_empty() {
            continue;
        }
        let ordered = chain_nearest(s, d, bucket);
        let sequences = cut_by_capacity(s, d, &ordered);
        place_sequences(s, d, &sequences);
    }
}

fn chain_nearest(s: &Solution<'_>, d: usize, mut pool: Vec<usize>) -> Vec<usize> {
    let inst = s.instance();
    let mut at = s.depot(d).node();
    let mut ordered = Vec::with_capacity(pool.len());
    while !pool.is_empty() {
        let (ix, _) = pool
            .iter()
            .enumerate()
            .map(|(ix, &c)| (ix, inst.distance(at, c)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .expect("pool is non-empty");
        let c = pool.swap_remove(ix);
        ordered.push(c);
        at = c;
    }
    ordered
}

fn cut_by_capacity(s: &Solution<'_>, d: usize, ordered: &[usize]) -> Vec<Vec<usize>> {
    let capacity = s.depot(d).vehicles()[0].capacity();
    let mut sequences = Vec::new();
    let mut current = Vec::new();
    let mut load = 0.0;
    for &c in ordered {
        let demand = s.instance().customer(c).demand();
        if !current.is_empty() && load + demand > capacity {
            sequences.push(std::mem::take(&mut current));
            load = 0.0;
        }
        current.push(c);
        load += demand;
    }
    if !current.is_empty() {
        sequences.push(current);
    }
    sequences
}
