use crate::core::counterparty::CounterpartyId;
use serde::{Deserialize, Serialize};

/// A directed claim: `from` owes `to` the amount `weight`.
///
/// Claims stored in a [`ClaimGraph`](crate::graph::claim_graph::ClaimGraph)
/// always carry a positive weight. Exposures read from a mirrored view use the
/// same triple with a negative weight for the implicit reciprocal side.
///
/// Serializes as `{"f": .., "t": .., "v": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "f")]
    from: CounterpartyId,
    #[serde(rename = "t")]
    to: CounterpartyId,
    #[serde(rename = "v")]
    weight: f64,
}

impl Claim {
    pub fn new(from: CounterpartyId, to: CounterpartyId, weight: f64) -> Self {
        Self { from, to, weight }
    }

    pub fn from(&self) -> CounterpartyId {
        self.from
    }

    pub fn to(&self) -> CounterpartyId {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub(crate) fn weight_mut(&mut self) -> &mut f64 {
        &mut self.weight
    }
}
