use crate::graph::claim_graph::ClaimGraph;
use crate::graph::cycle_detection::find_cycles;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Outcome of one cancellation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancellationReport {
    /// Cycles enumerated against the graph before the pass started.
    pub cycles_found: usize,
    /// Cycles whose bottleneck was subtracted from every edge.
    pub cycles_cancelled: usize,
    /// Cycles left alone because an earlier cancellation already exhausted one of their edges.
    pub cycles_skipped: usize,
    /// Gross exposure removed: the sum of bottleneck times cycle length.
    pub volume_cancelled: f64,
    /// Claims dropped at the end of the pass because they reached zero.
    pub claims_removed: usize,
}

impl std::fmt::Display for CancellationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of cycles in graph: {}", self.cycles_found)?;
        writeln!(f, "{} cycles were skipped.", self.cycles_skipped)?;
        writeln!(f, "Cycles cancelled:  {}", self.cycles_cancelled)?;
        writeln!(f, "Volume cancelled:  {:.2}", self.volume_cancelled)?;
        writeln!(f, "Claims removed:    {}", self.claims_removed)
    }
}

/// Multilateral compression by debt-cycle cancellation.
pub struct CycleCanceller;

impl CycleCanceller {
    /// Cancel debt cycles in place, preserving every net position.
    ///
    /// # Algorithm
    ///
    /// 1. Enumerate all elementary cycles once, against the graph as it is now.
    /// 2. Walk them in emission order. For each cycle take the smallest current
    ///    edge weight; if it is already zero (or an edge is gone) skip the cycle,
    ///    otherwise subtract it from every edge of the cycle.
    /// 3. Remove every claim that reached zero.
    ///
    /// Each node on a cycle loses the same amount on its outgoing edge as on
    /// its incoming one, so net positions do not move. This is a single pass:
    /// cycles are not re-enumerated while weights change.
    pub fn optimize(graph: &mut ClaimGraph) -> CancellationReport {
        let cycles = find_cycles(graph);
        let mut report = CancellationReport {
            cycles_found: cycles.len(),
            ..Default::default()
        };

        for cycle in &cycles {
            let bottleneck = match cycle.bottleneck(graph) {
                Some(weight) if weight > 0.0 => weight,
                _ => {
                    trace!("skipping exhausted cycle {:?}", cycle.counterparties());
                    report.cycles_skipped += 1;
                    continue;
                }
            };

            for (from, to) in cycle.edges() {
                graph.reduce_claim(from, to, bottleneck);
            }
            report.cycles_cancelled += 1;
            report.volume_cancelled += bottleneck * cycle.len() as f64;
        }

        report.claims_removed = graph.remove_exhausted();
        debug!(
            "cancellation pass: {} cycles found, {} cancelled, {} skipped, {} claims removed",
            report.cycles_found, report.cycles_cancelled, report.cycles_skipped, report.claims_removed
        );
        report
    }
}
