// src/exit.rs
//! Process exit codes for `springscope`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SpringscopeExit {
    /// Scan completed with every file and class processed.
    Success = 0,
    /// Fatal error (no sources, bad config, unwritable output).
    Error = 1,
    /// Scan completed, but some files, classes or batches failed.
    PartialScan = 2,
}

impl SpringscopeExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for SpringscopeExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
