use crate::core::claim::Claim;
use crate::core::counterparty::CounterpartyId;
use crate::graph::claim_graph::ClaimGraph;
use crate::graph::mirror::MirroredGraph;
use serde::{Deserialize, Serialize};

/// Norm value reported when the table has fewer than two counterparties.
pub const UNDEFINED_NORM: f64 = -1.0;

/// Absolute tolerance used when checking that net positions sum to zero.
pub const BALANCE_TOLERANCE: f64 = 1e-6;

/// Net position of every counterparty, indexed by id.
///
/// Positive means net payer, negative means net receiver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetPositionVector(Vec<f64>);

impl NetPositionVector {
    pub fn get(&self, party: CounterpartyId) -> Option<f64> {
        self.0.get(party.index()).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Whether the positions sum to zero within [`BALANCE_TOLERANCE`].
    pub fn is_balanced(&self) -> bool {
        self.sum().abs() <= BALANCE_TOLERANCE
    }
}

/// Summary payload of a netting table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureStats {
    pub number_of_counter_parties: usize,
    /// Half the mirrored edge count, i.e. the number of consolidated claims.
    pub number_of_claims: usize,
    pub metric_l1: f64,
    pub metric_l2: f64,
    /// Always zero up to floating error.
    pub sum_of_h: f64,
}

/// Exposure metrics derived from a mirrored snapshot of a [`ClaimGraph`].
///
/// The snapshot is taken at construction; later changes to the graph are not
/// reflected.
#[derive(Debug, Clone)]
pub struct ExposureMetrics {
    mirror: MirroredGraph,
}

impl ExposureMetrics {
    pub fn of(graph: &ClaimGraph) -> Self {
        Self {
            mirror: graph.mirrored(),
        }
    }

    pub fn mirror(&self) -> &MirroredGraph {
        &self.mirror
    }

    /// Row sums of the mirrored matrix.
    pub fn net_positions(&self) -> NetPositionVector {
        NetPositionVector(
            (0..self.mirror.counterparty_count())
                .map(|i| self.mirror.row_sum(CounterpartyId::new(i)))
                .collect(),
        )
    }

    /// Mean absolute pairwise exposure over the upper triangle.
    pub fn l1_norm(&self) -> f64 {
        match self.pair_count() {
            Some(pairs) => self.mirror.upper_triangle().map(f64::abs).sum::<f64>() / pairs,
            None => UNDEFINED_NORM,
        }
    }

    /// Root-mean-square pairwise exposure over the upper triangle.
    pub fn l2_norm(&self) -> f64 {
        match self.pair_count() {
            Some(pairs) => {
                let squares: f64 = self.mirror.upper_triangle().map(|w| w * w).sum();
                (squares / pairs).sqrt()
            }
            None => UNDEFINED_NORM,
        }
    }

    /// Mirrored exposures of one counterparty, ordered by the other side's id.
    pub fn claims_for(&self, party: CounterpartyId) -> Vec<Claim> {
        self.mirror.outgoing(party)
    }

    pub fn stats(&self) -> ExposureStats {
        ExposureStats {
            number_of_counter_parties: self.mirror.counterparty_count(),
            number_of_claims: self.mirror.edge_count() / 2,
            metric_l1: self.l1_norm(),
            metric_l2: self.l2_norm(),
            sum_of_h: self.net_positions().sum(),
        }
    }

    /// N * (N - 1) / 2, or `None` below two counterparties.
    fn pair_count(&self) -> Option<f64> {
        let n = self.mirror.counterparty_count();
        (n >= 2).then(|| (n * (n - 1)) as f64 / 2.0)
    }
}

impl std::fmt::Display for ExposureMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.mirror.counterparty_count();
        let positions = self.net_positions();
        writeln!(f)?;
        for j in 0..n {
            let row = CounterpartyId::new(j);
            for i in 0..n {
                write!(f, "{:>9.0} ", self.mirror.weight(row, CounterpartyId::new(i)))?;
            }
            writeln!(f, " | {:>9.0} ", positions.as_slice()[j])?;
        }
        writeln!(
            f,
            "L1 norm: {:>9.2}, L2 norm: {:>9.2} ",
            self.l1_norm(),
            self.l2_norm()
        )
    }
}
