//! Claim graph, its mirrored view, strongly connected components, cycle enumeration.

pub mod claim_graph;
pub mod cycle_detection;
pub mod mirror;
pub mod scc;
