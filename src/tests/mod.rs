//! Test modules for the rollback crate.

pub mod support;
