use netting_table::core::counterparty::CounterpartyId;
use netting_table::format::codec::{decode, encode};
use netting_table::graph::claim_graph::ClaimGraph;
use netting_table::graph::cycle_detection::find_cycles;
use proptest::prelude::*;
use std::collections::HashSet;

const TOLERANCE: f64 = 1e-6;

/// Generate a random claim amount in whole cents, occasionally zero so some cells stay empty.
fn arb_cell() -> BoxedStrategy<f64> {
    prop_oneof![
        1 => Just(0.0),
        3 => (1u32..100_000u32).prop_map(|cents| f64::from(cents) / 100.0),
    ]
    .boxed()
}

/// Generate an arbitrary finite positive amount carrying full `f64` precision.
fn arb_precise_cell() -> BoxedStrategy<f64> {
    prop_oneof![
        1 => Just(0.0),
        3 => 1e-6f64..1e9,
    ]
    .boxed()
}

/// Generate a random N x N claim matrix, 2 <= N <= 6 (small enough to keep cycle counts sane).
fn arb_matrix(cell: BoxedStrategy<f64>) -> impl Strategy<Value = ClaimGraph> {
    (2usize..=6)
        .prop_flat_map(move |n| {
            prop::collection::vec(cell.clone(), n * n).prop_map(move |cells| (n, cells))
        })
        .prop_map(|(n, cells)| {
            let mut graph = ClaimGraph::with_counterparties(n);
            for j in 0..n {
                for i in 0..n {
                    graph.add_claim(CounterpartyId::new(j), CounterpartyId::new(i), cells[i + j * n]);
                }
            }
            graph
        })
}

fn arb_graph() -> impl Strategy<Value = ClaimGraph> {
    arb_matrix(arb_cell())
}

fn arb_precise_graph() -> impl Strategy<Value = ClaimGraph> {
    arb_matrix(arb_precise_cell())
}

/// Absolute tolerance for sums over `graph`, widened for large gross volumes.
fn tolerance_for(graph: &ClaimGraph) -> f64 {
    TOLERANCE.max(graph.gross_total() * 1e-12)
}

/// Every elementary cycle, found by exhaustive DFS rooted at its smallest member.
fn all_cycles_by_search(graph: &ClaimGraph) -> Vec<Vec<CounterpartyId>> {
    fn extend(
        adjacency: &[Vec<CounterpartyId>],
        start: CounterpartyId,
        path: &mut Vec<CounterpartyId>,
        found: &mut Vec<Vec<CounterpartyId>>,
    ) {
        let last = path[path.len() - 1];
        for &next in &adjacency[last.index()] {
            if next == start {
                found.push(path.clone());
            } else if next > start && !path.contains(&next) {
                path.push(next);
                extend(adjacency, start, path, found);
                path.pop();
            }
        }
    }

    let adjacency = graph.successors();
    let mut found = Vec::new();
    for start in graph.counterparties() {
        extend(&adjacency, start, &mut vec![start], &mut found);
    }
    found.sort();
    found
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Net positions always sum to zero.
    //
    // Every claim is a payable for one side and a receivable for the
    // other, before and after any number of cancellation passes.
    // ===================================================================
    #[test]
    fn positions_always_balance(mut graph in arb_graph(), passes in 0usize..3) {
        prop_assert!(graph.exposure().net_positions().is_balanced());
        for _ in 0..passes {
            graph.optimize();
            prop_assert!(graph.exposure().net_positions().is_balanced());
        }
    }

    #[test]
    fn precise_positions_always_balance(mut graph in arb_precise_graph(), passes in 0usize..3) {
        let tolerance = tolerance_for(&graph);
        prop_assert!(graph.exposure().net_positions().sum().abs() <= tolerance);
        for _ in 0..passes {
            graph.optimize();
            prop_assert!(graph.exposure().net_positions().sum().abs() <= tolerance);
        }
    }

    // ===================================================================
    // INVARIANT 2: Cancellation never moves a net position.
    // ===================================================================
    #[test]
    fn optimize_preserves_net_positions(mut graph in arb_precise_graph()) {
        let tolerance = tolerance_for(&graph);
        let before = graph.exposure().net_positions();
        graph.optimize();
        let after = graph.exposure().net_positions();

        prop_assert_eq!(before.len(), after.len());
        for (b, a) in before.as_slice().iter().zip(after.as_slice()) {
            prop_assert!((b - a).abs() <= tolerance, "position moved from {} to {}", b, a);
        }
    }

    // ===================================================================
    // INVARIANT 3: Gross exposure never increases.
    // ===================================================================
    #[test]
    fn optimize_never_increases_norms(mut graph in arb_precise_graph()) {
        let tolerance = tolerance_for(&graph);
        let before = graph.exposure();
        graph.optimize();
        let after = graph.exposure();

        prop_assert!(after.l1_norm() <= before.l1_norm() + tolerance);
        prop_assert!(after.l2_norm() <= before.l2_norm() + tolerance);
        prop_assert!(graph.claims().all(|claim| claim.weight() > 0.0));
    }

    // ===================================================================
    // INVARIANT 4: A single pass leaves no cycle behind, and every
    // enumerated cycle is either cancelled or skipped.
    // ===================================================================
    #[test]
    fn single_pass_removes_all_cycles(mut graph in arb_graph()) {
        let report = graph.optimize();
        prop_assert_eq!(report.cycles_found, report.cycles_cancelled + report.cycles_skipped);
        prop_assert!(find_cycles(&graph).is_empty());
    }

    // ===================================================================
    // INVARIANT 5: Cycle enumeration reports each elementary cycle once,
    // rooted at its smallest member, along existing claims.
    // ===================================================================
    #[test]
    fn cycles_are_elementary_and_unique(graph in arb_graph()) {
        let cycles = find_cycles(&graph);
        let mut seen = HashSet::new();
        for cycle in &cycles {
            prop_assert!(cycle.len() >= 3);
            let members: HashSet<_> = cycle.counterparties().iter().collect();
            prop_assert_eq!(members.len(), cycle.len());
            prop_assert!(cycle.bottleneck(&graph).is_some());
            prop_assert!(seen.insert(cycle.counterparties().to_vec()));
        }
        prop_assert_eq!(cycles, find_cycles(&graph));
    }

    #[test]
    fn cycle_enumeration_is_complete(graph in arb_graph()) {
        let mut enumerated: Vec<Vec<CounterpartyId>> = find_cycles(&graph)
            .iter()
            .map(|cycle| cycle.counterparties().to_vec())
            .collect();
        enumerated.sort();
        prop_assert_eq!(enumerated, all_cycles_by_search(&graph));
    }

    // ===================================================================
    // INVARIANT 6: Opposite claims of equal size cancel out.
    // ===================================================================
    #[test]
    fn equal_opposite_claims_cancel(value in 0.01f64..1e9) {
        let mut graph = ClaimGraph::with_counterparties(2);
        let (a, b) = (CounterpartyId::new(0), CounterpartyId::new(1));
        graph.add_claim(a, b, value);
        graph.add_claim(b, a, value);
        prop_assert!(graph.claim_between(a, b).is_none());
    }

    // ===================================================================
    // INVARIANT 7: Encoding then decoding reproduces the graph.
    // ===================================================================
    #[test]
    fn codec_round_trip(graph in arb_graph()) {
        let bytes = encode(&graph).unwrap();
        let restored = decode(&bytes).unwrap();
        prop_assert_eq!(restored, graph);
    }

    #[test]
    fn codec_round_trip_full_precision(graph in arb_precise_graph()) {
        let bytes = encode(&graph).unwrap();
        let restored = decode(&bytes).unwrap();
        prop_assert_eq!(restored, graph);
    }
}
