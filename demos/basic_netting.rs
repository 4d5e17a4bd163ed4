//! Basic consolidation and cycle cancellation example.
//!
//! Demonstrates how a netting table consolidates opposing claims and then
//! compresses a debt cycle without moving any net position.

use netting_table::prelude::*;

fn main() {
    println!("╔═════════════════════════════════════════╗");
    println!("║  netting-table: Basic Netting Example   ║");
    println!("╚═════════════════════════════════════════╝\n");

    // --- Scenario 1: Bilateral consolidation ---
    println!("━━━ Scenario 1: Bilateral Consolidation ━━━\n");

    let mut graph = ClaimGraph::new();
    let bank_a = graph.add_counterparty();
    let bank_b = graph.add_counterparty();

    graph.add_claim(bank_a, bank_b, 100.0);
    graph.add_claim(bank_b, bank_a, 65.0);

    println!("  A owes B 100, B owes A 65");
    println!("  Stored claims:   {}", graph.claim_count());
    println!("  A -> B:          {:?}", graph.weight(bank_a, bank_b));
    println!("  B -> A:          {:?}\n", graph.weight(bank_b, bank_a));

    // --- Scenario 2: Multilateral cycle ---
    println!("━━━ Scenario 2: Multilateral Cycle ━━━\n");

    let bank_c = graph.add_counterparty();
    graph.add_claim(bank_b, bank_c, 50.0);
    graph.add_claim(bank_c, bank_a, 20.0);

    let before = graph.exposure();
    print!("{}", before);

    let report = graph.optimize();
    print!("\n{}", report);

    let after = graph.exposure();
    print!("{}", after);

    println!("\n━━━ Interpretation ━━━\n");
    println!("  The cycle A → B → C → A carried at least 20 in every leg.");
    println!("  Cancelling it removes {:.0} of gross exposure while every", report.volume_cancelled);
    println!("  row sum (H) stays where it was.");
}
