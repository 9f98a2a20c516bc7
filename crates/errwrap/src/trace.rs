// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Bounded stack capture.

use std::fmt::{self, Write};
use std::sync::OnceLock;

use crate::CapturePolicy;

/// Upper bound, in bytes, on the size of a captured stack trace.
pub const TRACE_LIMIT: usize = 16 * 1024;

/// Captures the calling thread's stack according to `policy`, keeping at most `limit` bytes.
///
/// `limit` is clamped to [`TRACE_LIMIT`]. Frames are walked and symbolized one at a time and
/// the walk stops as soon as the byte budget is spent, so the work done is bounded by the
/// limit rather than by the depth of the stack. Truncation happens on a UTF-8 character
/// boundary, so the returned bytes are always valid UTF-8. A platform that cannot walk the
/// stack produces an empty trace.
pub(crate) fn capture(policy: CapturePolicy, limit: usize) -> Box<[u8]> {
    let enabled = match policy {
        CapturePolicy::Forced => true,
        CapturePolicy::Auto => enabled_by_env(),
        CapturePolicy::Never => false,
    };
    if !enabled {
        return Box::default();
    }

    let (trace, frames) = walk(limit.min(TRACE_LIMIT));

    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "errwrap.stack_captured",
        tracing::Level::TRACE,
        errwrap.trace.len = trace.len(),
        errwrap.trace.frames = frames,
        errwrap.trace.policy = ?policy,
    );
    #[cfg(not(any(feature = "logs", test)))]
    let _ = frames;

    trace
}

/// Mirrors the standard library's reading of `RUST_LIB_BACKTRACE` and `RUST_BACKTRACE`.
#[cfg_attr(test, mutants::skip)] // the environment is read once per process
fn enabled_by_env() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();

    *ENABLED.get_or_init(|| {
        std::env::var_os("RUST_LIB_BACKTRACE")
            .or_else(|| std::env::var_os("RUST_BACKTRACE"))
            .is_some_and(|value| value != "0")
    })
}

/// Renders the calling thread's frames into at most `limit` bytes.
///
/// Returns the rendered text and the number of frames visited.
fn walk(limit: usize) -> (Box<[u8]>, usize) {
    if limit == 0 {
        return (Box::default(), 0);
    }

    let mut out = Bounded::new(limit);
    let mut frames = 0;

    backtrace::trace(|frame| {
        let index = frames;
        frames += 1;

        let mut full = false;
        let mut resolved = false;
        backtrace::resolve_frame(frame, |symbol| {
            resolved = true;
            if full {
                return;
            }
            full = write_symbol(&mut out, index, symbol).is_err();
        });

        if !resolved {
            full = writeln!(out, "{index:>4}: {:?}", frame.ip()).is_err();
        }

        !full
    });

    (out.into_bytes(), frames)
}

fn write_symbol(out: &mut Bounded, index: usize, symbol: &backtrace::Symbol) -> fmt::Result {
    match symbol.name() {
        Some(name) => writeln!(out, "{index:>4}: {name:#}")?,
        None => writeln!(out, "{index:>4}: <unknown>")?,
    }

    if let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) {
        writeln!(out, "             at {}:{line}", file.display())?;
    }

    Ok(())
}

/// A `fmt::Write` sink that refuses to grow past its limit.
///
/// The write that crosses the limit keeps the longest prefix ending on a character boundary
/// and then fails, which stops any `write!` in progress.
#[derive(Debug)]
struct Bounded {
    text: String,
    limit: usize,
}

impl Bounded {
    fn new(limit: usize) -> Self {
        Self {
            text: String::with_capacity(limit.min(1024)),
            limit,
        }
    }

    fn into_bytes(self) -> Box<[u8]> {
        self.text.into_bytes().into_boxed_slice()
    }
}

impl Write for Bounded {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit.saturating_sub(self.text.len());
        if s.len() <= room {
            self.text.push_str(s);
            return Ok(());
        }

        let end = floor_char_boundary(s, room);
        self.text.push_str(&s[..end]);
        Err(fmt::Error)
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }

    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
