//! Random claim networks for stress testing and benchmarks.
