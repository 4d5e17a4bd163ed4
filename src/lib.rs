//! # netting-table
//!
//! Multilateral netting of bilateral claims.
//!
//! Given a matrix of gross obligations between counterparties, this crate
//! cancels value around closed chains of debt, producing a smaller set of
//! claims while leaving every counterparty's net position unchanged.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: counterparty ids, claims, errors
//! - **graph** — Consolidated claim graph, mirrored view, SCCs, cycle enumeration
//! - **optimization** — Cycle cancellation and exposure metrics
//! - **format** — JSON graph payload and whitespace claim matrices
//! - **simulation** — Random claim networks for stress testing

pub mod core;
pub mod format;
pub mod graph;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::claim::Claim;
    pub use crate::core::counterparty::CounterpartyId;
    pub use crate::core::error::{NettingError, Result};
    pub use crate::format::codec::{decode, encode};
    pub use crate::graph::claim_graph::ClaimGraph;
    pub use crate::graph::cycle_detection::{find_cycles, ClaimCycle};
    pub use crate::optimization::cancellation::{CancellationReport, CycleCanceller};
    pub use crate::optimization::exposure::{ExposureMetrics, ExposureStats, NetPositionVector};
}
