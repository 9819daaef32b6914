// mallow-core - Host capabilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The outside world as seen by the core library.
//!
//! Output and file reads go through a [`Host`] so an embedder (or a test)
//! can capture output and serve files without touching the process.

use std::io::{self, Write};

/// Output and file access used by `prn`, `println` and `slurp`.
pub trait Host {
    /// Write one line of output. The line does not include the newline.
    fn write_line(&self, line: &str);

    /// Read a whole file as text.
    fn read_file(&self, path: &str) -> io::Result<String>;
}

/// Host backed by stdout and the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdHost;

impl Host for StdHost {
    fn write_line(&self, line: &str) {
        let mut out = io::stdout().lock();
        // A closed stdout is not an evaluation error
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }

    fn read_file(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
