// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Behavior of the slot annotation functions across a propagating error.

use std::error::Error;

use errwrap::{BoxError, CapturePolicy, StackError, TRACE_LIMIT, stack_count};

fn address(error: &(dyn Error + 'static)) -> *const () {
    std::ptr::from_ref(error).cast::<()>()
}

fn assert_message_with_one_stack(error: &BoxError, expected: &str) {
    assert_eq!(error.to_string(), expected);
    assert_eq!(stack_count(&**error), 1);
}

#[test]
fn noop_on_success() {
    let mut slot: Option<BoxError> = None;
    errwrap::wrap!(&mut slot, "open({})", "a.txt");
    errwrap::wrap_stack!(&mut slot, "load config");
    assert!(slot.is_none());

    let mut result: Result<&str, BoxError> = Ok("contents");
    errwrap::wrap_stack!(&mut result, "load config");
    assert_eq!(result.unwrap(), "contents");
}

#[test]
fn message_chaining() {
    let mut slot: Option<BoxError> = Some("file not found".into());

    errwrap::wrap!(&mut slot, "open({})", "a.txt");
    insta::assert_snapshot!(slot.as_ref().unwrap().to_string(), @"open(a.txt): file not found");

    errwrap::wrap!(&mut slot, "load config");
    insta::assert_snapshot!(slot.unwrap().to_string(), @"load config: open(a.txt): file not found");
}

#[test]
fn unwrap_fidelity() {
    let original: BoxError = Box::new(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
    let original_address = address(&*original);

    let mut slot = Some(original);
    errwrap::wrap!(&mut slot, "open(a.txt)");
    errwrap::wrap_stack!(&mut slot, "read config");
    errwrap::wrap_stack!(&mut slot, "load config");
    errwrap::wrap!(&mut slot, "start");
    let error = slot.unwrap();

    let root = errwrap::root_cause(&*error);
    assert_eq!(address(root), original_address);
    assert_eq!(root.downcast_ref::<std::io::Error>().unwrap().kind(), std::io::ErrorKind::NotFound);

    // owned unwrapping hands back the very same allocation
    let mut current = error;
    let mut hops = 0;
    let recovered = loop {
        match errwrap::unwrap(current) {
            Ok(inner) => {
                current = inner;
                hops += 1;
            }
            Err(innermost) => break innermost,
        }
    };
    assert_eq!(hops, 5);
    assert_eq!(address(&*recovered), original_address);
}

#[test]
fn single_stack_capture() {
    let mut result: Result<(), BoxError> = Err("disk full".into());
    errwrap::wrap_stack!(&mut result, "write block {}", 7);
    errwrap::wrap_stack!(&mut result, "flush");
    errwrap::wrap_stack!(&mut result, "close");

    let error = result.unwrap_err();
    assert_message_with_one_stack(&error, "close: flush: write block 7: disk full");
}

#[test]
fn single_stack_capture_mixed_order() {
    let mut result: Result<(), BoxError> = Err("disk full".into());
    errwrap::wrap!(&mut result, "one");
    errwrap::wrap_stack!(&mut result, "two");
    errwrap::wrap!(&mut result, "three");
    errwrap::wrap_stack!(&mut result, "four");
    errwrap::wrap_stack!(&mut result, "five");

    let error = result.unwrap_err();
    assert_eq!(stack_count(&*error), 1);

    // the snapshot sits right below the first stack-preserving annotation
    let messages: Vec<String> = errwrap::chain(&*error).map(ToString::to_string).collect();
    assert_eq!(messages[3], "two: one: disk full");
    assert!(errwrap::chain(&*error).nth(4).unwrap().downcast_ref::<StackError>().is_some());
}

#[test]
fn stack_then_plain_matches_plain_twice() {
    let mut stacked: Option<BoxError> = Some("timeout".into());
    errwrap::wrap_stack!(&mut stacked, "connect({})", "db:5432");
    errwrap::wrap!(&mut stacked, "open pool");

    let mut plain: Option<BoxError> = Some("timeout".into());
    errwrap::wrap!(&mut plain, "connect({})", "db:5432");
    errwrap::wrap!(&mut plain, "open pool");

    let stacked = stacked.unwrap();
    let plain = plain.unwrap();
    assert_eq!(stacked.to_string(), plain.to_string());
    assert_eq!(stack_count(&*stacked), 1);
    assert_eq!(stack_count(&*plain), 0);
}

fn deep(depth: usize) -> Result<(), BoxError> {
    if depth == 0 {
        let mut result: Result<(), BoxError> = Err("bottom".into());
        errwrap::wrap_stack!(&mut result, "depth 0");
        return result;
    }

    let mut result = deep(depth - 1);
    errwrap::wrap_stack!(&mut result, "depth {depth}");
    result
}

#[test]
#[cfg_attr(miri, ignore)]
fn trace_bound_on_deep_stack() {
    let error = deep(200).unwrap_err();
    assert_eq!(stack_count(&*error), 1);

    let stack = errwrap::find_stack(&*error).unwrap();
    assert!(stack.stack().len() <= TRACE_LIMIT);
    assert!(error.to_string().starts_with("depth 200: depth 199: "));
    assert!(error.to_string().ends_with("depth 1: depth 0: bottom"));
}

#[test]
fn rendering_never_includes_trace() {
    let error = StackError::new("");
    assert_eq!(error.to_string(), "");

    let error = StackError::builder().capture_policy(CapturePolicy::Never).build("");
    assert_eq!(error.to_string(), "");

    let error = StackError::new("connection reset");
    assert_eq!(error.to_string(), "connection reset");
    assert_eq!(format!("{error:#}"), "connection reset");
}

#[test]
fn add_hides_source() {
    let mut result: Result<(), BoxError> = Err(Box::new(std::io::Error::other("eof")));
    errwrap::add!(&mut result, "read header of {}", "a.bin");

    let error = result.unwrap_err();
    assert_eq!(error.to_string(), "read header of a.bin: eof");
    assert!(error.source().is_none());
    assert!(errwrap::find::<std::io::Error>(&*error).is_none());
}

#[test]
fn errors_cross_threads() {
    let error = std::thread::spawn(|| {
        let mut result: Result<(), BoxError> = Err("worker failed".into());
        errwrap::wrap_stack!(&mut result, "job {}", 3);
        result
    })
    .join()
    .unwrap()
    .unwrap_err();

    let mut slot = Some(error);
    errwrap::wrap_stack!(&mut slot, "scheduler");
    assert_message_with_one_stack(&slot.unwrap(), "scheduler: job 3: worker failed");
}
