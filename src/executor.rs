//! The executor: ordered execution with reverse-order rollback.
//!
//! [`Executor`] owns a queue of pending commands (batch mode), a LIFO
//! stack of applied commands (the done stack), a one-shot failure latch
//! and the list of secondary errors collected while unwinding. All
//! execution is synchronous and strictly sequential; LIFO reversal is
//! only well-defined for a sequential history, so no parallel path
//! exists.

use tracing::{debug, error, warn};

use crate::observer::{NoopObserver, Observer, UndoPhase};
use crate::{Command, Error, Result, UndoError};

/// Which API family the executor has been committed to.
///
/// Set by the first `register` or `step` call; conflicting calls are a
/// caller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Batch,
    Step,
}

/// The transactional command executor.
///
/// An executor drives exactly one logical transaction and is then
/// discarded; there is no reset or reuse operation. It is driven either
/// in **batch** mode ([`register`](Self::register) everything, then
/// [`run`](Self::run)) or **one-at-a-time** ([`step`](Self::step)); the
/// two modes cannot be mixed on one instance and share the same failure
/// latch.
///
/// # Failure Semantics
///
/// The first `apply` failure latches the executor as failed: the failing
/// command is undone, then every previously applied command is undone in
/// reverse order, and every later `run`/`step` call returns
/// [`Error::AlreadyFailed`] without touching its argument. Undo failures
/// are collected via [`undo_errors`](Self::undo_errors) and never change
/// the outcome.
///
/// # Thread Safety
///
/// An executor is owned and driven by a single logical transaction
/// thread; it is not meant for shared concurrent use.
///
/// # Example
///
/// ```ignore
/// use rollback::{Executor, Error};
///
/// let mut txn = Executor::new();
/// txn.register(CreateRecord::new(&db, "users/alice"))?;
/// txn.register(ReserveQuota::new(&quota, 1))?;
/// txn.register(SendWelcomeMail::new(&mailer, "alice"))?;
///
/// match txn.run() {
///     Ok(()) => println!("provisioned"),
///     Err(Error::CommandFailed { command, cause }) => {
///         // Record creation and quota reservation have been undone.
///         eprintln!("provisioning failed at {command}: {cause}");
///         for undo_err in txn.undo_errors() {
///             eprintln!("  while rolling back: {undo_err}");
///         }
///     }
///     Err(other) => return Err(other.into()),
/// }
/// ```
pub struct Executor {
    /// Commands registered but not yet run (batch mode only).
    queue: Vec<Box<dyn Command>>,
    /// Done stack: commands whose `apply` succeeded, in apply order.
    applied: Vec<Box<dyn Command>>,
    /// One-shot latch holding the first command whose `apply` failed.
    /// Never cleared once set.
    failed: Option<Box<dyn Command>>,
    /// Secondary errors from `undo` calls, in occurrence order.
    undo_errors: Vec<UndoError>,
    mode: Option<Mode>,
    observer: Box<dyn Observer>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor {
    /// Create an executor with the default no-op observer.
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }

    /// Create an executor that reports every transition to `observer`.
    pub fn with_observer(observer: impl Observer + 'static) -> Self {
        Self {
            queue: Vec::new(),
            applied: Vec::new(),
            failed: None,
            undo_errors: Vec::new(),
            mode: None,
            observer: Box::new(observer),
        }
    }

    // =========================================================================
    // Registration & execution
    // =========================================================================

    /// Append `cmd` to the batch queue.
    ///
    /// May be called any number of times before [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MixedModes`] if this executor is already driven
    /// through [`step`](Self::step).
    pub fn register(&mut self, cmd: impl Command + 'static) -> Result<()> {
        self.enter(Mode::Batch)?;
        self.queue.push(Box::new(cmd));
        Ok(())
    }

    /// Run every registered command in registration order.
    ///
    /// Stops at the first failure; by the time the error is returned the
    /// unwind has already completed. Commands after the failing one are
    /// never invoked.
    ///
    /// # Errors
    ///
    /// - [`Error::MixedModes`] if this executor is in step mode.
    /// - [`Error::AlreadyFailed`] if a previous call latched a failure.
    /// - [`Error::EmptyTransaction`] if nothing was registered.
    /// - [`Error::CommandFailed`] carrying the primary cause when a
    ///   command's `apply` fails.
    pub fn run(&mut self) -> Result<()> {
        self.enter(Mode::Batch)?;
        if let Some(cmd) = &self.failed {
            warn!(
                target: "rollback::txn",
                command = cmd.name(),
                "run refused: executor already failed"
            );
            return Err(Error::AlreadyFailed {
                command: cmd.name().to_string(),
            });
        }
        if self.queue.is_empty() {
            return Err(Error::EmptyTransaction);
        }

        // Commands move out of the queue as they run; on failure the
        // remainder is dropped unexecuted.
        let queue = std::mem::take(&mut self.queue);
        for cmd in queue {
            self.apply_one(cmd)?;
        }
        Ok(())
    }

    /// Execute `cmd` immediately, outside any batch.
    ///
    /// Alternative to [`register`](Self::register)/[`run`](Self::run) for
    /// callers that build commands incrementally (e.g. when constructing
    /// a command is itself costly). One-shot: once any step has failed,
    /// subsequent calls return [`Error::AlreadyFailed`] without calling
    /// `apply` or `undo` on `cmd`.
    ///
    /// # Errors
    ///
    /// - [`Error::MixedModes`] if this executor is in batch mode.
    /// - [`Error::AlreadyFailed`] if a previous step latched a failure.
    /// - [`Error::CommandFailed`] carrying the primary cause when `cmd`'s
    ///   `apply` fails.
    pub fn step(&mut self, cmd: impl Command + 'static) -> Result<()> {
        self.enter(Mode::Step)?;
        if let Some(failed) = &self.failed {
            warn!(
                target: "rollback::txn",
                command = failed.name(),
                "step short-circuit: executor already failed"
            );
            return Err(Error::AlreadyFailed {
                command: failed.name().to_string(),
            });
        }
        self.apply_one(Box::new(cmd))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Whether any command's `apply` has failed.
    pub fn has_failed(&self) -> bool {
        self.failed.is_some()
    }

    /// The command whose `apply` failed first, if any.
    ///
    /// The identity is stable for the executor's lifetime, no matter how
    /// many further calls are refused.
    pub fn failed_command(&self) -> Option<&dyn Command> {
        self.failed.as_deref()
    }

    /// Secondary errors collected from `undo` calls during unwind, in
    /// occurrence order: the failing command's own undo first, then the
    /// done stack in pop order. Only grows; never reset.
    pub fn undo_errors(&self) -> &[UndoError] {
        &self.undo_errors
    }

    /// Number of commands currently on the done stack.
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Number of registered commands not yet run.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    // =========================================================================
    // Core procedure
    // =========================================================================

    /// Commit to `mode`, rejecting calls from the other API family.
    fn enter(&mut self, mode: Mode) -> Result<()> {
        match self.mode {
            None => {
                self.mode = Some(mode);
                Ok(())
            }
            Some(current) if current == mode => Ok(()),
            Some(_) => Err(Error::MixedModes),
        }
    }

    /// Apply a single command; on failure, undo it and unwind the done
    /// stack before returning.
    fn apply_one(&mut self, mut cmd: Box<dyn Command>) -> Result<()> {
        debug!(target: "rollback::txn", command = cmd.name(), "applying command");
        self.observer.on_apply(&*cmd);

        match cmd.apply() {
            Ok(()) => {
                debug!(target: "rollback::txn", command = cmd.name(), "command applied");
                self.observer.on_applied(&*cmd);
                self.applied.push(cmd);
                Ok(())
            }
            Err(cause) => {
                let command = cmd.name().to_string();
                error!(
                    target: "rollback::txn",
                    command = %command,
                    error = %cause,
                    "command failed, unwinding done stack"
                );
                self.observer.on_apply_failed(&*cmd, &cause);

                // The failing command is undone first, then everything
                // that succeeded before it, newest first.
                self.undo_one(&mut *cmd, UndoPhase::Failing);
                self.unwind();

                self.failed = Some(cmd);
                Err(Error::CommandFailed { command, cause })
            }
        }
    }

    /// Pop and undo every applied command, newest first. Individual undo
    /// failures are recorded and never stop the unwind; every applied
    /// command gets exactly one undo call.
    fn unwind(&mut self) {
        while let Some(mut cmd) = self.applied.pop() {
            self.undo_one(&mut *cmd, UndoPhase::Unwind);
        }
    }

    /// Undo a single command, recording (never propagating) its failure.
    fn undo_one(&mut self, cmd: &mut dyn Command, phase: UndoPhase) {
        debug!(
            target: "rollback::txn",
            command = cmd.name(),
            phase = ?phase,
            "undoing command"
        );
        self.observer.on_undo(&*cmd, phase);

        if let Err(cause) = cmd.undo() {
            error!(
                target: "rollback::txn",
                command = cmd.name(),
                phase = ?phase,
                error = %cause,
                "undo failed"
            );
            self.observer.on_undo_failed(&*cmd, phase, &cause);
            self.undo_errors.push(UndoError {
                command: cmd.name().to_string(),
                cause,
            });
        }
    }
}
