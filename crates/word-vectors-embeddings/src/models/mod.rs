//! Embedding model implementations.

pub mod bert;
