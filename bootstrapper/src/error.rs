//! Fatal error taxonomy for a bootstrap run.
//!
//! Stages return `anyhow::Result` and attach context as errors bubble up. The
//! variants here sit at the bottom of those chains so the binary can pick an
//! exit code with [`exit_code_for`].

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A child process ran and exited unsuccessfully.
    #[error("command `{}` failed with {}", render_command(.program, .args), render_code(.code))]
    CommandFailed {
        program: String,
        args: Vec<String>,
        /// `None` when the child was terminated by a signal.
        code: Option<i32>,
    },

    /// A child process could not be started at all.
    #[error("failed to launch `{}`", render_command(.program, .args))]
    CommandLaunch {
        program: String,
        args: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write deploy configuration {}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Operator input ended before a required answer was given.
    #[error("no operator input available for: {prompt}")]
    InputClosed { prompt: String },
}

impl BootstrapError {
    /// Exit code the process should end with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => exit_codes::FAILURE,
        }
    }
}

/// Find the exit code for an error chain.
///
/// The first [`BootstrapError`] in the chain decides; anything else is a
/// generic failure.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<BootstrapError>())
        .map_or(exit_codes::FAILURE, BootstrapError::exit_code)
}

fn render_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        return program.to_string();
    }
    format!("{program} {}", args.join(" "))
}

fn render_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
