//! Benchmarks for the stream adapters live in `src/bench.rs`.
