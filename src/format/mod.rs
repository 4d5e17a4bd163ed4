//! Interchange formats: the JSON graph payload and plain-text claim matrices.

pub mod codec;
pub mod matrix;
