//! Observability hooks for transaction execution.
//!
//! The executor reports every transition two ways: through the `tracing`
//! facade under the `rollback::txn` target, and through an injected
//! [`Observer`] for callers that want structured events in-process (test
//! harnesses, audit trails, progress reporting). The default observer is
//! [`NoopObserver`]; there is no process-wide shared sink.

use crate::Command;

/// Which undo an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoPhase {
    /// The failing command's own undo, attempted before the unwind.
    Failing,
    /// A previously applied command popped off the done stack.
    Unwind,
}

/// Structured-event sink for executor transitions.
///
/// All methods have empty default bodies; implement only what you need.
/// The executor owns its observer and invokes it synchronously, in the
/// same order the underlying command calls happen.
pub trait Observer {
    /// A command's `apply` is about to run.
    fn on_apply(&mut self, _command: &dyn Command) {}

    /// A command's `apply` succeeded; it joined the done stack.
    fn on_applied(&mut self, _command: &dyn Command) {}

    /// A command's `apply` failed; the unwind is about to begin.
    fn on_apply_failed(&mut self, _command: &dyn Command, _error: &anyhow::Error) {}

    /// A command's `undo` is about to run.
    fn on_undo(&mut self, _command: &dyn Command, _phase: UndoPhase) {}

    /// A command's `undo` failed; the failure is recorded and the unwind
    /// continues.
    fn on_undo_failed(&mut self, _command: &dyn Command, _phase: UndoPhase, _error: &anyhow::Error) {
    }
}

/// The default observer: ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}
