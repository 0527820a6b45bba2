//! The reversible-operation capability.
//!
//! Every operation sequenced by an [`Executor`](crate::Executor)
//! implements [`Command`]: a forward effect (`apply`) and a best-effort
//! reversal (`undo`). The executor is the only caller of either method
//! and serializes all calls; commands never run concurrently within one
//! executor.

/// A reversible operation.
///
/// Implementations are opaque to the executor: it knows nothing about a
/// command beyond this capability and the [`name`](Command::name) it
/// reports for diagnostics. Command errors are [`anyhow::Error`] because
/// failure causes are caller-defined and the executor treats them as
/// opaque payloads.
///
/// # Contract
///
/// - `apply` performs the forward effect. On failure it makes no
///   guarantee about partial effects; reversing whatever happened is
///   `undo`'s job.
/// - `undo` must be callable after either a successful or a failed
///   `apply`, and should best-effort restore the prior state. The
///   executor calls it at most once per command.
/// - An `undo` failure never becomes the transaction outcome; the
///   executor records it and keeps unwinding.
pub trait Command {
    /// Perform the forward effect.
    fn apply(&mut self) -> anyhow::Result<()>;

    /// Reverse the effect of `apply`, including partial effects left
    /// behind by a failed `apply`.
    fn undo(&mut self) -> anyhow::Result<()>;

    /// Identity used in logs, diagnostics and the failure latch.
    ///
    /// Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
