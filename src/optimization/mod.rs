//! Cycle cancellation and exposure metrics.

pub mod cancellation;
pub mod exposure;
