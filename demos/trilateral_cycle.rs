//! Trilateral cycle detection and compression example.
//!
//! Demonstrates how the engine finds debt cycles, how overlapping cycles
//! interact within a single pass, and how the result travels as JSON.

use netting_table::graph::scc::find_sccs;
use netting_table::prelude::*;

fn main() {
    println!("╔════════════════════════════════════════════╗");
    println!("║  netting-table: Trilateral Cycle Detection ║");
    println!("╚════════════════════════════════════════════╝\n");

    let mut graph = ClaimGraph::with_counterparties(4);
    let id = CounterpartyId::new;

    println!("Claims:");
    println!("  0 → 1: 100");
    println!("  1 → 2: 80");
    println!("  2 → 0: 120");
    println!("  1 → 3: 40");
    println!("  3 → 0: 30\n");

    graph.add_claim(id(0), id(1), 100.0);
    graph.add_claim(id(1), id(2), 80.0);
    graph.add_claim(id(2), id(0), 120.0);
    graph.add_claim(id(1), id(3), 40.0);
    graph.add_claim(id(3), id(0), 30.0);

    println!("━━━ Strongly Connected Components ━━━\n");
    for (i, scc) in find_sccs(&graph).iter().enumerate() {
        let members: Vec<String> = scc.counterparties.iter().map(|p| p.to_string()).collect();
        println!(
            "  SCC {}: [{}] — nettable: {}",
            i,
            members.join(", "),
            scc.is_nettable()
        );
    }
    println!();

    println!("━━━ Debt Cycles ━━━\n");
    for (i, cycle) in find_cycles(&graph).iter().enumerate() {
        let members: Vec<String> = cycle.counterparties().iter().map(|p| p.to_string()).collect();
        println!("  Cycle {}: {} → (back to start)", i, members.join(" → "));
        if let Some(bottleneck) = cycle.bottleneck(&graph) {
            println!("    Bottleneck: {}", bottleneck);
        }
    }
    println!();

    println!("━━━ Cancellation ━━━\n");
    let before = graph.exposure().net_positions();
    let report = CycleCanceller::optimize(&mut graph);
    let after = graph.exposure().net_positions();
    print!("{}", report);
    println!("  H before: {:?}", before.as_slice());
    println!("  H after:  {:?}\n", after.as_slice());

    println!("━━━ Payload ━━━\n");
    match encode(&graph) {
        Ok(bytes) => println!("  {}", String::from_utf8_lossy(&bytes)),
        Err(e) => eprintln!("  {}", e),
    }
}
