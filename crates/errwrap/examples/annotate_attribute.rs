// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Demonstrates the attribute macros annotating every exit path of a function.

use errwrap::BoxError;

#[errwrap::annotate("parse port {text:?}")]
fn parse_port(text: &str) -> Result<u16, BoxError> {
    if text.is_empty() {
        return Err("empty input".into());
    }
    Ok(text.parse()?)
}

#[errwrap::annotate_stack("connect({host}:{port})")]
fn connect(host: &str, port: &str) -> Result<(), BoxError> {
    let port = parse_port(port)?;
    println!("connecting to {host}:{port}");
    Ok(())
}

fn main() {
    for port in ["8080", "", "http"] {
        match connect("localhost", port) {
            Ok(()) => println!("connected"),
            Err(err) => println!("Error: {err} (stack captured: {})", errwrap::has_stack(&*err)),
        }
    }
}
