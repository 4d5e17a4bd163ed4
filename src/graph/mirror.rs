use crate::core::claim::Claim;
use crate::core::counterparty::CounterpartyId;
use crate::graph::claim_graph::ClaimGraph;
use std::collections::BTreeMap;

/// A claim graph extended with the negative reciprocal of every claim.
///
/// For each stored claim `a -> b` of weight `w`, the mirror also holds
/// `b -> a` with weight `-w`, so the mirrored weight matrix is antisymmetric.
/// It is a deep copy: nothing done to the mirror reaches the source graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MirroredGraph {
    counterparty_count: usize,
    weights: BTreeMap<(CounterpartyId, CounterpartyId), f64>,
}

impl MirroredGraph {
    pub fn from_graph(graph: &ClaimGraph) -> Self {
        let mut weights = BTreeMap::new();
        for claim in graph.claims() {
            weights.insert((claim.from(), claim.to()), claim.weight());
        }
        for claim in graph.claims() {
            weights
                .entry((claim.to(), claim.from()))
                .or_insert(-claim.weight());
        }
        Self {
            counterparty_count: graph.counterparty_count(),
            weights,
        }
    }

    pub fn counterparty_count(&self) -> usize {
        self.counterparty_count
    }

    /// Number of directed entries, positive and negative.
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Signed weight of cell (from, to); zero where no entry exists.
    pub fn weight(&self, from: CounterpartyId, to: CounterpartyId) -> f64 {
        self.weights.get(&(from, to)).copied().unwrap_or(0.0)
    }

    /// Signed exposures of `party` towards every counterparty it faces, by creditor id.
    pub fn outgoing(&self, party: CounterpartyId) -> Vec<Claim> {
        self.weights
            .range((party, CounterpartyId::new(0))..=(party, CounterpartyId::new(usize::MAX)))
            .map(|(&(from, to), &weight)| Claim::new(from, to, weight))
            .collect()
    }

    /// Row sum of the mirrored matrix for `party`.
    pub fn row_sum(&self, party: CounterpartyId) -> f64 {
        self.outgoing(party).iter().map(Claim::weight).sum()
    }

    /// Signed weights of the strict upper triangle (i < j), zeros included.
    pub fn upper_triangle(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.counterparty_count;
        (0..n).flat_map(move |i| {
            (i + 1..n).map(move |j| self.weight(CounterpartyId::new(i), CounterpartyId::new(j)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_is_antisymmetric() {
        let mut graph = ClaimGraph::new();
        let a = graph.add_counterparty();
        let b = graph.add_counterparty();
        let c = graph.add_counterparty();
        graph.add_claim(a, b, 10.0);
        graph.add_claim(c, b, 4.0);

        let mirror = graph.mirrored();
        assert_eq!(mirror.edge_count(), 2 * graph.claim_count());
        assert_eq!(mirror.weight(a, b), 10.0);
        assert_eq!(mirror.weight(b, a), -10.0);
        assert_eq!(mirror.weight(b, c), -4.0);
        assert_eq!(mirror.weight(a, c), 0.0);
    }

    #[test]
    fn test_mirror_is_independent() {
        let mut graph = ClaimGraph::new();
        let a = graph.add_counterparty();
        let b = graph.add_counterparty();
        graph.add_claim(a, b, 10.0);

        let mirror = graph.mirrored();
        graph.add_claim(b, a, 10.0);

        assert!(graph.is_empty());
        assert_eq!(mirror.weight(a, b), 10.0);
    }

    #[test]
    fn test_outgoing_and_row_sum() {
        let mut graph = ClaimGraph::new();
        let a = graph.add_counterparty();
        let b = graph.add_counterparty();
        let c = graph.add_counterparty();
        graph.add_claim(a, b, 10.0);
        graph.add_claim(c, a, 3.0);

        let mirror = graph.mirrored();
        let out = mirror.outgoing(a);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].to(), b);
        assert_eq!(out[1].weight(), -3.0);
        assert_eq!(mirror.row_sum(a), 7.0);
    }
}
