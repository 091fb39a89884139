//! Tests for the BERT encoder, run against a tiny deterministic checkpoint.

mod helpers;

mod loading;
