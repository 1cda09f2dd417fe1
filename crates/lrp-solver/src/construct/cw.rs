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

//! Clarke-Wright savings, per depot: every customer starts in a singleton
//! tour, then tour ends are joined in descending savings order while the
//! merged load still fits one vehicle.

use crate::construct::{assign_to_depots, place_sequences};
use crate::state::solution::Solution;

pub(crate) fn build(s: &mut Solution<'_>) {
    let buckets = assign_to_depots(s);
    for (d, bucket) in buckets.into_iter().enumerate() {
        if bucket.is_empty() {
            continue;
        }
        let sequences = merge_by_savings(s, d, &bucket);
        place_sequences(s, d, &sequences);
    }
}

fn merge_by_savings(s: &Solution<'_>, d: usize, bucket: &[usize]) -> Vec<Vec<usize>> {
    let inst = s.instance();
    let depot_node = s.depot(d).node();
    let capacity = s.depot(d).vehicles()[0].capacity();

    let mut seqs: Vec<Option<Vec<usize>>> = bucket.iter().map(|&c| Some(vec![c])).collect();
    let mut loads: Vec<f64> = bucket.iter().map(|&c| inst.customer(c).demand()).collect();
    let mut seq_of: std::collections::HashMap<usize, usize> = bucket
        .iter()
        .enumerate()
        .map(|(ix, &c)| (c, ix))
        .collect();

    // Savings for serving j right after i instead of two depot returns.
    let mut savings: Vec<(f64, usize, usize)> = Vec::new();
    for &i in bucket {
        for &j in bucket {
            if i == j {
                continue;
            }
            let gain = inst.distance(i, depot_node) + inst.distance(depot_node, j)
                - inst.distance(i, j);
            savings.push((gain, i, j));
        }
    }
    savings.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    for (_, i, j) in savings {
        let si = seq_of[&i];
        let sj = seq_of[&j];
        if si == sj {
            continue;
        }
        let (Some(a), Some(b)) = (&seqs[si], &seqs[sj]) else {
            continue;
        };
        // Join only tail-of-a to head-of-b, within capacity.
        if *a.last().expect("sequences are non-empty") != i || b[0] != j {
            continue;
        }
        if loads[si] + loads[sj] > capacity {
            continue;
        }
        let b = seqs[sj].take().expect("checked above");
        for &c in &b {
            seq_of.insert(c, si);
        }
        loads[si] += loads[sj];
        seqs[si].as_mut().expect("checked above").extend(b);
    }

    seqs.into_iter().flatten().collect()
}
