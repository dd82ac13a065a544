//! Exit codes following sysexits.h conventions.
//!
//! These codes give scripts a way to distinguish "cover not recognized"
//! (a normal outcome) from unreadable inputs and real failures.

#![allow(dead_code)] // Constants may be used in future or for documentation

/// Successful execution (a cover was recognized, or the command completed).
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// No catalog entry within the distance threshold.
/// Maps to EX_DATAERR from sysexits.h.
pub const NO_MATCH: i32 = 65;

/// Cannot open or decode an input file (photo, catalog, media map).
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// I/O error (cannot write the catalog output).
/// Maps to EX_IOERR from sysexits.h.
pub const IO_ERROR: i32 = 74;

/// The exit code classified from a command's error.
pub struct ExitCode {
    pub code: i32,
}

impl ExitCode {
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");

        // Classify error by inspecting the chain
        let code = if message.contains("not recognized") {
            NO_MATCH
        } else if message.contains("Failed to read")
            || message.contains("Failed to decode")
            || message.contains("catalog error")
        {
            INPUT_ERROR
        } else if message.contains("Failed to write") {
            IO_ERROR
        } else {
            GENERAL_ERROR
        };

        Self { code }
    }
}
