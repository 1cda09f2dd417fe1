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

use crate::problem::err::InstanceError;

/// Dense arc-length matrix over all nodes, row-major, read-only after load.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcMatrix {
    nodes: usize,
    lengths: Vec<f64>,
}

impl ArcMatrix {
    /// Builds from a flat row-major buffer of `nodes * nodes` lengths.
    pub fn from_flat(nodes: usize, lengths: Vec<f64>) -> Result<Self, InstanceError> {
        if lengths.len() != nodes * nodes {
            return Err(InstanceError::ArcDimension {
                expected: nodes,
                actual: lengths.len(),
            });
        }
        for (k, &l) in lengths.iter().enumerate() {
            if !(l >= 0.0) {
                return Err(InstanceError::NegativeArc {
                    from: k / nodes,
                    to: k % nodes,
                    length: l,
                });
            }
        }
        Ok(Self { nodes, lengths })
    }

    /// Euclidean lengths over planar node positions.
    pub fn euclidean(points: &[(f64, f64)]) -> Self {
        let nodes = points.len();
        let mut lengths = vec![0.0; nodes * nodes];
        for (i, &(xi, yi)) in points.iter().enumerate() {
            for (j, &(xj, yj)) in points.iter().enumerate() {
                lengths[i * nodes + j] = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
            }
        }
        Self { nodes, lengths }
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    #[inline]
    pub fn length(&self, from: usize, to: usize) -> f64 {
        debug_assert!(from < self.nodes && to < self.nodes);
        self.lengths[from * self.nodes + to]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_checks_dimensions() {
        assert!(ArcMatrix::from_flat(2, vec![0.0; 3]).is_err());
        assert!(ArcMatrix::from_flat(2, vec![0.0; 4]).is_ok());
    }

    #[test]
    fn test_from_flat_rejects_negative_lengths() {
        let m = ArcMatrix::from_flat(2, vec![0.0, 1.0, -1.0, 0.0]);
        match m {
            Err(InstanceError::NegativeArc { from, to, .. }) => {
                assert_eq!((from, to), (1, 0));
            }
            other => panic!("expected NegativeArc, got {other:?}"),
        }
    }

    #[test]
    fn test_euclidean_matches_hand_computation() {
        let m = ArcMatrix::euclidean(&[(0.0, 0.0), (3.0, 4.0)]);
        assert_eq!(m.length(0, 1), 5.0);
        assert_eq!(m.length(1, 0), 5.0);
        assert_eq!(m.length(0, 0), 0.0);
    }

    #[test]
    fn test_asymmetric_lengths_are_preserved() {
        let m = ArcMatrix::from_flat(2, vec![0.0, 2.0, 7.0, 0.0]).unwrap();
        assert_eq!(m.length(0, 1), 2.0);
        assert_eq!(m.length(1, 0), 7.0);
    }
}
