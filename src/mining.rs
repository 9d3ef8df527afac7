/// A labeled point handed to the mining collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// Discovers co-located label pairs in a point set
///
/// Input is a set of labeled points, a neighborhood radius, and a minimum
/// prevalence threshold; output is an ordered list of discovered pairs.
pub trait ColocationMiner {
    fn mine(
        &self,
        points: &[LabeledPoint],
        radius: f64,
        min_prevalence: f64,
    ) -> Vec<(String, String)>;
}

/// Placeholder miner that keeps the integration contract stable
///
/// Always returns the fixed pair `("A", "B")` regardless of input, so callers
/// can be wired up before a real miner exists. Because no real mining
/// semantics are defined yet, the fixed output can mask integration defects
/// until a real implementation is substituted.
pub struct StubMiner;

impl ColocationMiner for StubMiner {
    fn mine(
        &self,
        _points: &[LabeledPoint],
        _radius: f64,
        _min_prevalence: f64,
    ) -> Vec<(String, String)> {
        vec![("A".to_string(), "B".to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_returns_the_fixed_pair() {
        let points = vec![LabeledPoint {
            x: 1.0,
            y: 2.0,
            label: "C".to_string(),
        }];
        let pairs = StubMiner.mine(&points, 2.0, 0.2);
        assert_eq!(pairs, vec![("A".to_string(), "B".to_string())]);

        let empty = StubMiner.mine(&[], 0.0, 0.0);
        assert_eq!(empty.len(), 1, "output shape is independent of input");
    }
}
