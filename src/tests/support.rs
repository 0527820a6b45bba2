//! Shared command doubles for the executor tests.
//!
//! [`Probe`] records every `apply`/`undo` call into a shared journal and
//! can be told to fail either call, which is enough to express all the
//! ordering and accumulation scenarios.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;

use crate::Command;

/// Journal of apply/undo calls, shared by a set of probes.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Create an empty journal.
pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Snapshot the journal contents.
pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

/// A command that records its calls and fails on demand.
pub struct Probe {
    label: String,
    fail_apply: bool,
    fail_undo: bool,
    journal: Journal,
}

impl Probe {
    pub fn new(label: impl Into<String>, journal: &Journal) -> Self {
        Self {
            label: label.into(),
            fail_apply: false,
            fail_undo: false,
            journal: journal.clone(),
        }
    }

    pub fn fail_apply(mut self) -> Self {
        self.fail_apply = true;
        self
    }

    pub fn fail_undo(mut self) -> Self {
        self.fail_undo = true;
        self
    }

    fn record(&self, call: &str) {
        self.journal
            .borrow_mut()
            .push(format!("{}:{call}", self.label));
    }
}

impl Command for Probe {
    fn apply(&mut self) -> anyhow::Result<()> {
        if self.fail_apply {
            self.record("apply-failed");
            return Err(anyhow!("{} apply failed", self.label));
        }
        self.record("apply");
        Ok(())
    }

    fn undo(&mut self) -> anyhow::Result<()> {
        if self.fail_undo {
            self.record("undo-failed");
            return Err(anyhow!("{} undo failed", self.label));
        }
        self.record("undo");
        Ok(())
    }

    fn name(&self) -> &str {
        &self.label
    }
}
