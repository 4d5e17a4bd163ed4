use crate::core::claim::Claim;
use crate::core::counterparty::CounterpartyId;
use crate::core::error::{NettingError, Result};
use crate::graph::claim_graph::ClaimGraph;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Portable form of a [`ClaimGraph`].
///
/// ```json
/// { "Nodes": [0, 1, 2], "Edges": [{ "f": 0, "t": 1, "v": 10.0 }] }
/// ```
///
/// The order of `Nodes` defines the ids assigned on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    #[serde(rename = "Nodes")]
    pub nodes: Vec<CounterpartyId>,
    #[serde(rename = "Edges")]
    pub edges: Vec<Claim>,
}

impl GraphPayload {
    pub fn from_graph(graph: &ClaimGraph) -> Self {
        Self {
            nodes: graph.counterparties().collect(),
            edges: graph.claims().copied().collect(),
        }
    }

    /// Rebuild a graph, assigning fresh sequential ids in `nodes` order and
    /// replaying each edge through [`ClaimGraph::add_claim`].
    pub fn into_graph(self) -> Result<ClaimGraph> {
        let mut graph = ClaimGraph::new();
        let mut remap: HashMap<CounterpartyId, CounterpartyId> = HashMap::new();
        for node in &self.nodes {
            let fresh = graph.add_counterparty();
            if remap.insert(*node, fresh).is_some() {
                return Err(NettingError::Decode(format!("duplicate node id {}", node)));
            }
        }

        for edge in &self.edges {
            let lookup = |id: CounterpartyId| {
                remap.get(&id).copied().ok_or_else(|| {
                    NettingError::Decode(format!("edge references unknown node {}", id))
                })
            };
            let (from, to) = (lookup(edge.from())?, lookup(edge.to())?);
            if edge.weight() <= 0.0 {
                warn!("decoded edge {} -> {} has non-positive weight {}", from, to, edge.weight());
            }
            graph.add_claim(from, to, edge.weight());
        }
        Ok(graph)
    }
}

/// Serialize a graph to its JSON payload bytes.
///
/// Fails on a non-finite weight, which JSON cannot carry back.
pub fn encode(graph: &ClaimGraph) -> Result<Vec<u8>> {
    if let Some(claim) = graph.claims().find(|claim| !claim.weight().is_finite()) {
        return Err(NettingError::Encode(serde::ser::Error::custom(format!(
            "claim {} -> {} has non-finite weight {}",
            claim.from(),
            claim.to(),
            claim.weight()
        ))));
    }
    serde_json::to_vec(&GraphPayload::from_graph(graph)).map_err(NettingError::Encode)
}

/// Rebuild a graph from payload bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<ClaimGraph> {
    let payload: GraphPayload =
        serde_json::from_slice(bytes).map_err(|e| NettingError::Decode(e.to_string()))?;
    payload.into_graph()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn id(index: usize) -> CounterpartyId {
        CounterpartyId::new(index)
    }

    #[test]
    fn test_encode_shape() {
        let mut graph = ClaimGraph::with_counterparties(3);
        graph.add_claim(id(0), id(1), 10.0);
        graph.add_claim(id(2), id(1), 2.5);

        let bytes = encode(&graph).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["Nodes"], serde_json::json!([0, 1, 2]));
        assert_eq!(json["Edges"][1], serde_json::json!({ "f": 2, "t": 1, "v": 2.5 }));
    }

    #[test]
    fn test_round_trip() {
        let mut graph = ClaimGraph::with_counterparties(4);
        graph.add_claim(id(0), id(1), 10.0);
        graph.add_claim(id(1), id(2), 7.25);
        graph.add_claim(id(3), id(0), 1.0);

        let decoded = decode(&encode(&graph).unwrap()).unwrap();
        assert_eq!(decoded, graph);
    }

    #[test]
    fn test_round_trip_full_precision_weights() {
        let weights = [
            192.185_541_705_570_22,
            0.1 + 0.2,
            1.0 / 3.0,
            987_654_321.123_456_7,
            f64::MIN_POSITIVE,
            1e308,
        ];
        for weight in weights {
            let mut graph = ClaimGraph::with_counterparties(2);
            graph.add_claim(id(0), id(1), weight);
            let decoded = decode(&encode(&graph).unwrap()).unwrap();
            assert_eq!(decoded.weight(id(0), id(1)), Some(weight));
        }

        let mut rng = StdRng::seed_from_u64(11);
        let mut graph = ClaimGraph::with_counterparties(40);
        for from in 0..40 {
            for to in (from + 1)..40 {
                graph.add_claim(id(from), id(to), rng.gen_range(1e-6..1e9));
            }
        }
        assert_eq!(decode(&encode(&graph).unwrap()).unwrap(), graph);
    }

    #[test]
    fn test_encode_rejects_non_finite_weight() {
        let mut graph = ClaimGraph::with_counterparties(2);
        graph.add_claim(id(0), id(1), 5.0);
        graph.reduce_claim(id(0), id(1), f64::NEG_INFINITY);
        assert!(matches!(encode(&graph), Err(NettingError::Encode(_))));
    }

    #[test]
    fn test_decode_reassigns_ids_in_listed_order() {
        let payload = br#"{"Nodes":[7,3],"Edges":[{"f":3,"t":7,"v":5.0}]}"#;
        let graph = decode(payload).unwrap();
        assert_eq!(graph.counterparty_count(), 2);
        assert_eq!(graph.weight(id(1), id(0)), Some(5.0));
    }

    #[test]
    fn test_decode_consolidates_edges() {
        let payload = br#"{"Nodes":[0,1],"Edges":[
            {"f":0,"t":1,"v":5.0},
            {"f":1,"t":0,"v":8.0},
            {"f":0,"t":0,"v":3.0}
        ]}"#;
        let graph = decode(payload).unwrap();
        assert_eq!(graph.claim_count(), 1);
        assert_eq!(graph.weight(id(1), id(0)), Some(3.0));
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        assert!(matches!(decode(b"not json"), Err(NettingError::Decode(_))));
        assert!(matches!(decode(br#"{"Nodes":[0]}"#), Err(NettingError::Decode(_))));
        assert!(matches!(
            decode(br#"{"Nodes":[0,0],"Edges":[]}"#),
            Err(NettingError::Decode(_))
        ));
        assert!(matches!(
            decode(br#"{"Nodes":[0,1],"Edges":[{"f":0,"t":5,"v":1.0}]}"#),
            Err(NettingError::Decode(_))
        ));
    }
}
