//! Two-stage bootstrap of the Re build tool.
//!
//! Starting from nothing but `git`, CMake and Ninja, the pipeline clones the
//! `bootstrap` branch of Re, builds and installs it into a local prefix, then
//! uses that bootstrap copy to build and deploy the full tool from the main
//! branch.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure path derivation and file rendering. No I/O.
//! - **[`io`]**: Side-effecting operations (child processes, git, the operator
//!   console, settings files, the filesystem). Isolated behind traits where tests
//!   need to substitute them.
//!
//! Stage modules ([`acquire`], [`bootstrap`], [`fixer`], [`deploy`], [`gate`])
//! combine the two, and [`pipeline`] chains them in order.

pub mod acquire;
pub mod bootstrap;
pub mod config;
pub mod core;
pub mod deploy;
pub mod error;
pub mod exit_codes;
pub mod fixer;
pub mod gate;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod platform;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
