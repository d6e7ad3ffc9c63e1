//! I/O adapters for the bootstrap stages.

pub mod fs;
pub mod git;
pub mod operator;
pub mod process;
pub mod settings;
