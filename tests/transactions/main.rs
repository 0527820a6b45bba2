//! End-to-end transaction tests for the rollback executor.
//!
//! These exercise the public API only, with commands that mark their
//! progress in a shared state record so rollback is observable from the
//! outside.


mod batch;
