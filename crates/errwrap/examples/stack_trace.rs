// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates that repeated `wrap_stack!` calls capture a single stack snapshot.

use errwrap::BoxError;

fn level3() -> Result<(), BoxError> {
    let mut result: Result<(), BoxError> = Err("error at deepest level".into());
    errwrap::wrap_stack!(&mut result, "level3");
    result
}

fn level2() -> Result<(), BoxError> {
    let mut result = level3();
    errwrap::wrap_stack!(&mut result, "level2");
    result
}

fn level1() -> Result<(), BoxError> {
    let mut result = level2();
    errwrap::wrap_stack!(&mut result, "level1");
    result
}

fn main() {
    let err = level1().unwrap_err();

    println!("Error: {err}\n");
    println!("Stack snapshots in chain: {}", errwrap::stack_count(&*err));

    if let Some(stack) = errwrap::find_stack(&*err) {
        println!("Captured at level3:\n{}", String::from_utf8_lossy(stack.stack()));
    }
}
