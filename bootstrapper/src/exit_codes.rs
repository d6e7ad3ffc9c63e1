//! Stable exit codes for the bootstrapper binary.
//!
//! A failing child process that reported its own non-zero code has that code
//! propagated instead of [`FAILURE`].

/// Every stage completed.
pub const OK: i32 = 0;
/// Internal error, or a child process that ended without an exit code.
pub const FAILURE: i32 = 1;
