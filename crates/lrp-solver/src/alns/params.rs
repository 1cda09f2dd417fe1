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

use crate::{err::ConfigError, search::registry};
use serde::{Deserialize, Serialize};

/// The full parameter record of one annealing run. Serializable so a JSON
/// file can override the defaults field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlnsParams {
    /// Total iterations.
    pub iterations: usize,
    /// Iterations per scoring segment.
    pub segment: usize,
    /// Run local search every this many iterations (0 disables it).
    pub local_search_cadence: usize,
    /// Attempt budget per local-search operator per visit.
    pub local_search_budget: usize,
    /// Removal operator catalog (must be non-empty).
    pub destroy_ops: Vec<String>,
    /// Insertion operator catalog (must be non-empty).
    pub repair_ops: Vec<String>,
    /// Local-search operator catalog (may be empty).
    pub local_ops: Vec<String>,
    /// Reward for finding a new global best.
    pub score_best: f64,
    /// Reward for improving the current solution with an unseen state.
    pub score_improve: f64,
    /// Reward for an accepted, unseen, non-improving state.
    pub score_accept: f64,
    /// Start temperature as a share of the initial objective...
    pub start_ratio: f64,
    /// ...such that a move this much worse is accepted with this probability.
    pub start_accept: f64,
    /// Temperature floor, same parameterization.
    pub floor_ratio: f64,
    pub floor_accept: f64,
    /// Geometric cooling factor, strictly inside (0, 1).
    pub cooling: f64,
    /// Absolute bounds on the per-iteration removal size.
    pub removal_min: usize,
    pub removal_max: usize,
    /// Relative bounds on the removal size as shares of the customer count.
    pub removal_min_share: f64,
    pub removal_max_share: f64,
    /// Reaction factor blending segment scores into operator weights.
    pub reaction: f64,
}

impl Default for AlnsParams {
    fn default() -> Self {
        Self {
            iterations: 1000,
            segment: 10,
            local_search_cadence: 250,
            local_search_budget: 100,
            destroy_ops: registry::DESTROY_OPERATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            repair_ops: registry::REPAIR_OPERATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            local_ops: registry::LOCAL_OPERATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            score_best: 33.0,
            score_improve: 9.0,
            score_accept: 13.0,
            start_ratio: 0.05,
            start_accept: 0.5,
            floor_ratio: 0.01,
            floor_accept: 0.01,
            cooling: 0.9975,
            removal_min: 2,
            removal_max: 60,
            removal_min_share: 0.1,
            removal_max_share: 0.4,
            reaction: 0.7,
        }
    }
}

impl AlnsParams {
    /// Checks every domain constraint; the engine refuses to build from a
    /// record that fails any of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn domain(
            ok: bool,
            param: &'static str,
            value: f64,
            expected: &'static str,
        ) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::OutOfDomain {
                    param,
                    value,
                    expected,
                })
            }
        }

        domain(self.iterations >= 1, "iterations", self.iterations as f64, ">= 1")?;
        domain(self.segment >= 1, "segment", self.segment as f64, ">= 1")?;
        domain(
            self.cooling > 0.0 && self.cooling < 1.0,
            "cooling",
            self.cooling,
            "0 < cooling < 1",
        )?;
        domain(
            self.start_accept > 0.0 && self.start_accept < 1.0,
            "start_accept",
            self.start_accept,
            "0 < start_accept < 1",
        )?;
        domain(
            self.floor_accept > 0.0 && self.floor_accept < 1.0,
            "floor_accept",
            self.floor_accept,
            "0 < floor_accept < 1",
        )?;
        domain(self.start_ratio > 0.0, "start_ratio", self.start_ratio, "> 0")?;
        domain(self.floor_ratio >= 0.0, "floor_ratio", self.floor_ratio, ">= 0")?;
        domain(
            self.removal_min_share > 0.0 && self.removal_min_share <= self.removal_max_share,
            "removal_min_share",
            self.removal_min_share,
            "0 < min <= max",
        )?;
        domain(
            self.removal_max_share <= 1.0,
            "removal_max_share",
            self.removal_max_share,
            "<= 1",
        )?;
        domain(
            self.removal_min <= self.removal_max,
            "removal_min",
            self.removal_min as f64,
            "min <= max",
        )?;
        domain(
            (0.0..=1.0).contains(&self.reaction),
            "reaction",
            self.reaction,
            "0 <= reaction <= 1",
        )?;
        for (name, v) in [
            ("score_best", self.score_best),
            ("score_improve", self.score_improve),
            ("score_accept", self.score_accept),
        ] {
            domain(v >= 0.0, name, v, ">= 0")?;
        }

        if self.destroy_ops.is_empty() {
            return Err(ConfigError::EmptyCatalog { kind: "destroy" });
        }
        if self.repair_ops.is_empty() {
            return Err(ConfigError::EmptyCatalog { kind: "repair" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        AlnsParams::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_cooling_outside_unit_interval() {
        let mut p = AlnsParams::default();
        p.cooling = 1.0;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::OutOfDomain { param: "cooling", .. })
        ));
    }

    #[test]
    fn test_rejects_empty_destroy_catalog() {
        let mut p = AlnsParams::default();
        p.destroy_ops.clear();
        assert!(matches!(
            p.validate(),
            Err(ConfigError::EmptyCatalog { kind: "destroy" })
        ));
    }

    #[test]
    fn test_empty_local_catalog_is_allowed() {
        let mut p = AlnsParams::default();
        p.local_ops.clear();
        p.validate().unwrap();
    }

    #[test]
    fn test_rejects_inverted_removal_shares() {
        let mut p = AlnsParams::default();
        p.removal_min_share = 0.5;
        p.removal_max_share = 0.2;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_roundtrips_through_json() {
        let p = AlnsParams::default();
        let text = serde_json::to_string(&p).unwrap();
        let back: AlnsParams = serde_json::from_str(&text).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let back: AlnsParams = serde_json::from_str(r#"{"iterations": 77}"#).unwrap();
        assert_eq!(back.iterations, 77);
        assert_eq!(back.segment, AlnsParams::default().segment);
    }
}
