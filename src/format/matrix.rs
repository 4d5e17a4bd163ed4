//! Whitespace-separated claim matrices.
//!
//! A file holds a row-major N x N matrix of floats, N = floor(sqrt(token count));
//! trailing tokens past N * N are ignored. Cell (j, i) > 0 means j owes i.

use crate::core::counterparty::CounterpartyId;
use crate::core::error::{NettingError, Result};
use crate::graph::claim_graph::ClaimGraph;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Parse every whitespace-separated token as an `f64`.
pub fn parse_values(input: &str) -> Result<Vec<f64>> {
    input
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| NettingError::InputFormat {
                token: token.to_string(),
                position,
            })
        })
        .collect()
}

/// Largest N with N * N <= `count`.
pub fn matrix_dimension(count: usize) -> usize {
    let mut n = (count as f64).sqrt() as usize;
    while n * n > count {
        n -= 1;
    }
    while (n + 1) * (n + 1) <= count {
        n += 1;
    }
    n
}

/// Build a graph from row-major matrix values; non-positive cells are skipped.
pub fn graph_from_values(values: &[f64]) -> ClaimGraph {
    let n = matrix_dimension(values.len());
    if values.len() > n * n {
        debug!("ignoring {} trailing matrix tokens", values.len() - n * n);
    }

    let mut graph = ClaimGraph::with_counterparties(n);
    for j in 0..n {
        for i in 0..n {
            let weight = values[i + j * n];
            if weight > 0.0 {
                graph.add_claim(CounterpartyId::new(j), CounterpartyId::new(i), weight);
            }
        }
    }
    graph
}

pub fn parse_matrix(input: &str) -> Result<ClaimGraph> {
    Ok(graph_from_values(&parse_values(input)?))
}

/// Read and parse a matrix file.
pub fn load_matrix(path: impl AsRef<Path>) -> Result<ClaimGraph> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| NettingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_matrix(&content)?;
    info!(
        "loaded {} counterparties and {} claims from {}",
        graph.counterparty_count(),
        graph.claim_count(),
        path.display()
    );
    Ok(graph)
}

/// Render a graph as a row-major matrix, one row per line.
pub fn to_matrix_text(graph: &ClaimGraph) -> String {
    let n = graph.counterparty_count();
    let rows: Vec<String> = (0..n)
        .map(|j| {
            (0..n)
                .map(|i| {
                    graph
                        .weight(CounterpartyId::new(j), CounterpartyId::new(i))
                        .unwrap_or(0.0)
                        .to_string()
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    if rows.is_empty() {
        String::new()
    } else {
        format!("{}\n", rows.join("\n"))
    }
}
