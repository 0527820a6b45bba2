//! Batch-mode scenarios: register everything, then run once.

use crate::common::*;
use rollback::{Error, Executor};

#[test]
fn run_marks_both_commands_success() {
    let st = state();
    let mut txn = Executor::new();
    txn.register(CmdA(st.clone())).unwrap();
    txn.register(CmdB(st.clone())).unwrap();

    assert!(txn.run().is_ok());

    assert_eq!(st.borrow().a, Some("success"));
    assert_eq!(st.borrow().b, Some("success"));
    assert!(!txn.has_failed());
}

#[test]
fn run_failure_rolls_back_earlier_command() {
    let st = state();
    let mut txn = Executor::new();
    txn.register(CmdA(st.clone())).unwrap();
    txn.register(CmdBFail(st.clone())).unwrap();

    let err = txn.run().unwrap_err();
    assert!(matches!(err, Error::CommandFailed { .. }));

    // Both the failing command and its predecessor were undone.
    assert_eq!(st.borrow().a, Some("undone"));
    assert_eq!(st.borrow().b, Some("undone"));
    assert_eq!(txn.failed_command().unwrap().name(), "cmd-b-fail");
}

#[test]
fn run_immediate_failure_leaves_later_command_untouched() {
    let st = state();
    let mut txn = Executor::new();
    txn.register(CmdAFail(st.clone())).unwrap();
    txn.register(CmdB(st.clone())).unwrap();

    assert!(txn.run().is_err());

    assert_eq!(st.borrow().a, Some("undone"));
    assert_eq!(st.borrow().b, None);
    assert_eq!(txn.failed_command().unwrap().name(), "cmd-a-fail");
}

#[test]
fn empty_run_is_a_distinct_caller_error() {
    let mut txn = Executor::new();
    let err = txn.run().unwrap_err();

    assert!(matches!(err, Error::EmptyTransaction));
    assert!(!txn.has_failed());
    assert!(txn.undo_errors().is_empty());
}
