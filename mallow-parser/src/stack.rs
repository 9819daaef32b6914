// mallow-parser - Stack growth for deep recursion
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Stack safety for the recursive parts of the reader, printer and evaluator.
//!
//! Recursion depth in Mallow follows the data and the program, not the host.
//! `stacker` moves onto a fresh heap-allocated segment when the current stack
//! runs low, so the caller's thread size does not decide how deep we can go.

/// Minimum stack space to keep available before recursing.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is low.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
