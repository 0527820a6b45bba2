//! # Rollback
//!
//! A transactional command executor: run a sequence of reversible
//! commands so that if any command fails, every previously succeeded
//! command in the sequence is undone in reverse order, restoring the
//! system to its prior logical state.
//!
//! The crate provides:
//! - [`Command`] - The reversible-operation capability (`apply`/`undo`)
//! - [`Executor`] - Ordered execution, failure latch, reverse unwind
//! - [`Observer`] - Injected sink for structured execution events
//!
//! ## Quick Start
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use rollback::{Command, Executor};
//!
//! struct Incr(Rc<Cell<i32>>);
//!
//! impl Command for Incr {
//!     fn apply(&mut self) -> anyhow::Result<()> {
//!         self.0.set(self.0.get() + 1);
//!         Ok(())
//!     }
//!
//!     fn undo(&mut self) -> anyhow::Result<()> {
//!         self.0.set(self.0.get() - 1);
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> rollback::Result<()> {
//! let counter = Rc::new(Cell::new(0));
//!
//! let mut txn = Executor::new();
//! txn.register(Incr(counter.clone()))?;
//! txn.register(Incr(counter.clone()))?;
//! txn.run()?;
//!
//! assert_eq!(counter.get(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Modes
//!
//! | Mode | API | Use Case |
//! |------|-----|----------|
//! | **Batch** | [`Executor::register`] + [`Executor::run`] | All commands known up front |
//! | **One-at-a-time** | [`Executor::step`] | Commands expensive to construct |
//!
//! The two modes are mutually exclusive on a given executor and share the
//! same one-shot failure latch: once a command fails, the executor undoes
//! everything it ran and permanently refuses further work. An executor is
//! a single-use object; retry means building a new executor with new
//! commands.
//!
//! ## Rollback Semantics
//!
//! Undo calls happen in exact reverse order of successful applies, with
//! the failing command undone first. Undo failures never change the
//! transaction outcome; they accumulate as diagnostics on the executor
//! (see [`Executor::undo_errors`]).

#![warn(missing_docs)]

mod command;
mod error;
mod executor;
mod observer;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API
// =============================================================================

pub use command::Command;
pub use error::{Error, UndoError};
pub use executor::Executor;
pub use observer::{NoopObserver, Observer, UndoPhase};

/// Result type for executor operations.
pub type Result<T> = std::result::Result<T, Error>;
