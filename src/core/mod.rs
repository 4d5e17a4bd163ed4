//! Foundational types: counterparty handles, claims, errors.

pub mod claim;
pub mod counterparty;
pub mod error;
