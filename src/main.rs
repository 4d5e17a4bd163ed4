//! netting-table CLI
//!
//! Run debt-cycle cancellation on a claim matrix from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Optimize a whitespace-separated N x N claim matrix
//! netting-table optimize --input matrix.txt
//!
//! # Output as JSON
//! netting-table optimize --input matrix.txt --format json
//!
//! # List debt cycles
//! netting-table cycles --input matrix.txt
//!
//! # Generate a random matrix for testing
//! netting-table generate --parties 10 --density 0.3
//! ```

use netting_table::core::counterparty::CounterpartyId;
use netting_table::core::error::NettingError;
use netting_table::format::codec::GraphPayload;
use netting_table::format::matrix::{load_matrix, to_matrix_text};
use netting_table::graph::claim_graph::ClaimGraph;
use netting_table::graph::cycle_detection::find_cycles;
use netting_table::graph::scc::find_sccs;
use netting_table::optimization::cancellation::CancellationReport;
use netting_table::optimization::exposure::ExposureStats;
use netting_table::simulation::stress_test::{generate_random_graph, MatrixConfig};
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"netting-table — multilateral netting by debt-cycle cancellation

USAGE:
    netting-table <COMMAND> [OPTIONS]

COMMANDS:
    optimize    Cancel debt cycles in a claim matrix and report exposures
    cycles      List strongly connected components and debt cycles
    stats       Print the exposure stats payload as JSON
    claims      Print the mirrored claims of one counterparty as JSON
    generate    Generate a random claim matrix (for testing)
    help        Show this message

OPTIONS (optimize, cycles, stats, claims):
    --input <FILE>        Path to a whitespace-separated N x N matrix
    --format <FORMAT>     Output format for optimize: text (default) or json
    --counterparty <ID>   Counterparty id (claims only)

OPTIONS (generate):
    --parties <N>         Number of counterparties (default: 10)
    --density <P>         Probability of a claim per ordered pair (default: 0.3)
    --seed <N>            Seed for a reproducible matrix
    --output <FILE>       Write to file instead of stdout

EXAMPLES:
    netting-table optimize --input matrix.txt
    netting-table optimize --input matrix.txt --format json
    netting-table claims --input matrix.txt --counterparty 2
    netting-table generate --parties 20 --density 0.5 --output matrix.txt"#
    );
}

#[derive(Default)]
struct Options {
    input: Option<String>,
    format: String,
    counterparty: Option<usize>,
    parties: Option<usize>,
    density: Option<f64>,
    seed: Option<u64>,
    output: Option<String>,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| fail(format!("{} requires a valid value", flag)))
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        format: "text".to_string(),
        ..Default::default()
    };
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        i += 1;
        let value = args.get(i);
        match flag {
            "--input" => options.input = Some(parse_value(flag, value)),
            "--format" => options.format = parse_value(flag, value),
            "--counterparty" => options.counterparty = Some(parse_value(flag, value)),
            "--parties" => options.parties = Some(parse_value(flag, value)),
            "--density" => options.density = Some(parse_value(flag, value)),
            "--seed" => options.seed = Some(parse_value(flag, value)),
            "--output" => options.output = Some(parse_value(flag, value)),
            _ => fail(format!("unknown option: {}", flag)),
        }
        i += 1;
    }
    options
}

/// Load the `--input` matrix; a missing flag prints usage and exits cleanly.
fn load_input(options: &Options) -> ClaimGraph {
    let Some(path) = options.input.as_deref() else {
        print_usage();
        process::exit(0);
    };
    load_matrix(path).unwrap_or_else(|e| fail(e))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(NettingError::Encode(e)))
}

#[derive(serde::Serialize)]
struct OptimizeOutput {
    before: ExposureStats,
    report: CancellationReport,
    after: ExposureStats,
    graph: GraphPayload,
}

fn cmd_optimize(args: &[String]) {
    let options = parse_options(args);
    let mut graph = load_input(&options);
    let before = graph.exposure();
    let report = graph.optimize();
    let after = graph.exposure();

    if options.format == "json" {
        let output = OptimizeOutput {
            before: before.stats(),
            report,
            after: after.stats(),
            graph: GraphPayload::from_graph(&graph),
        };
        println!("{}", to_json(&output));
    } else {
        println!("Input table has {} counterparties.", graph.counterparty_count());
        print!("{}", before);
        print!("{}", report);
        print!("{}", after);
    }
}

fn cmd_cycles(args: &[String]) {
    let options = parse_options(args);
    let graph = load_input(&options);

    for (i, scc) in find_sccs(&graph).iter().filter(|s| s.is_nettable()).enumerate() {
        let members: Vec<String> = scc.counterparties.iter().map(|p| p.to_string()).collect();
        println!("Component {}: [{}]", i, members.join(", "));
    }

    let cycles = find_cycles(&graph);
    if cycles.is_empty() {
        println!("No cycles detected.");
        return;
    }
    for (i, cycle) in cycles.iter().enumerate() {
        let members: Vec<String> = cycle.counterparties().iter().map(|p| p.to_string()).collect();
        println!("  Cycle {}: {} → (back to start)", i, members.join(" → "));
        if let Some(bottleneck) = cycle.bottleneck(&graph) {
            println!("    Bottleneck: {:.2}", bottleneck);
        }
    }
    println!("\nTotal cycles: {}", cycles.len());
}

fn cmd_stats(args: &[String]) {
    let options = parse_options(args);
    let graph = load_input(&options);
    println!("{}", to_json(&graph.exposure().stats()));
}

fn cmd_claims(args: &[String]) {
    let options = parse_options(args);
    let graph = load_input(&options);
    let party = CounterpartyId::new(
        options
            .counterparty
            .unwrap_or_else(|| fail("--counterparty <ID> is required")),
    );
    if !graph.contains(party) {
        fail(format!("unknown counterparty {}", party));
    }
    println!("{}", to_json(&graph.exposure().claims_for(party)));
}

fn cmd_generate(args: &[String]) {
    let options = parse_options(args);
    let defaults = MatrixConfig::default();
    let config = MatrixConfig {
        counterparty_count: options.parties.unwrap_or(defaults.counterparty_count),
        density: options.density.unwrap_or(defaults.density),
        seed: options.seed,
        ..defaults
    };

    let graph = generate_random_graph(&config);
    let text = to_matrix_text(&graph);

    if let Some(path) = options.output {
        fs::write(&path, &text).unwrap_or_else(|e| {
            fail(NettingError::Io {
                path: path.clone().into(),
                source: e,
            })
        });
        eprintln!(
            "Generated {} claims across {} counterparties → {}",
            graph.claim_count(),
            graph.counterparty_count(),
            path
        );
    } else {
        print!("{}", text);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "optimize" => cmd_optimize(rest),
        "cycles" => cmd_cycles(rest),
        "stats" => cmd_stats(rest),
        "claims" => cmd_claims(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
