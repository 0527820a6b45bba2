//! Error types for transaction execution.
//!
//! Errors fall into two categories, kept distinct by design:
//! - **Caller-usage errors** (`EmptyTransaction`, `MixedModes`): a
//!   programming mistake, reported immediately and never recorded on the
//!   executor.
//! - **Transaction failures** (`CommandFailed`, `AlreadyFailed`): the
//!   runtime outcome of a failed transaction. Only a failed `apply`
//!   decides the outcome; undo failures are collected separately as
//!   [`UndoError`] diagnostics.

use thiserror::Error;

/// Errors surfaced by [`Executor`](crate::Executor) calls.
#[derive(Debug, Error)]
pub enum Error {
    /// `run()` was called with no registered commands.
    #[error("transaction is empty: no commands registered")]
    EmptyTransaction,

    /// Batch registration and one-at-a-time execution were mixed on the
    /// same executor instance.
    #[error("cannot mix register/run and step on the same executor")]
    MixedModes,

    /// A command's `apply` failed. Returned exactly once, by the call
    /// that observed the failure, after the unwind completed.
    #[error("command `{command}` failed: {cause}")]
    CommandFailed {
        /// Name of the failing command.
        command: String,
        /// The error returned by the command's `apply`.
        cause: anyhow::Error,
    },

    /// The executor already failed and permanently refuses further work.
    #[error("executor already failed on command `{command}`")]
    AlreadyFailed {
        /// Name of the command that originally failed.
        command: String,
    },
}

/// A secondary failure: an `undo` that itself failed during unwind.
///
/// Diagnostic only. Accumulated on the executor in occurrence order and
/// never propagated as the transaction outcome.
#[derive(Debug, Error)]
#[error("undo of command `{command}` failed: {cause}")]
pub struct UndoError {
    /// Name of the command whose undo failed.
    pub command: String,
    /// The error returned by the command's `undo`.
    pub cause: anyhow::Error,
}
