// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates context accumulating as an error propagates through several functions.

use errwrap::BoxError;

fn open(path: &str) -> Result<String, BoxError> {
    let mut result = std::fs::read_to_string(path).map_err(BoxError::from);
    errwrap::wrap!(&mut result, "open({path})");
    result
}

fn load_config(path: &str) -> Result<String, BoxError> {
    let mut result = open(path);
    errwrap::wrap!(&mut result, "load config");
    result
}

fn main() {
    let err = load_config("missing.toml").unwrap_err();
    println!("Error: {err}");

    for (depth, cause) in errwrap::chain(&*err).enumerate() {
        println!("  {depth}: {cause}");
    }
}
