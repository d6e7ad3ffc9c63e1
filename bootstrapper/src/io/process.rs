//! Fail-fast child process execution with inherited standard streams.
//!
//! The operator watches clone and build progress live, so nothing is captured:
//! the child writes straight to our stdout/stderr and we only look at its exit
//! status.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, error, instrument, warn};

use crate::error::BootstrapError;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Working directory; `None` runs in the current directory.
    pub workdir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            workdir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// Error for this command exiting with `code`.
    pub fn failed(&self, code: Option<i32>) -> BootstrapError {
        BootstrapError::CommandFailed {
            program: self.program_name(),
            args: self.arg_strings(),
            code,
        }
    }

    fn launch_failed(&self, source: std::io::Error) -> BootstrapError {
        BootstrapError::CommandLaunch {
            program: self.program_name(),
            args: self.arg_strings(),
            source,
        }
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Abstraction over child process execution.
///
/// Stages only ever need "run this to completion or fail", which lets tests
/// swap in a scripted runner that records commands instead of spawning them.
pub trait ProcessRunner {
    /// Run `spec` to completion. Any non-zero exit is an error.
    fn run(&self, spec: &CommandSpec) -> Result<(), BootstrapError>;
}

/// Runner that spawns real processes sharing our standard streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct InheritedRunner;

impl ProcessRunner for InheritedRunner {
    #[instrument(skip_all, fields(command = %spec, workdir = ?spec.workdir))]
    fn run(&self, spec: &CommandSpec) -> Result<(), BootstrapError> {
        let mut cmd = spec.to_command();
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!("spawning child process");
        let status = match cmd.status() {
            Ok(status) => status,
            Err(e) => {
                error!(err = %e, "failed to spawn command");
                return Err(spec.launch_failed(e));
            }
        };

        if !status.success() {
            warn!(exit_code = ?status.code(), "command failed");
            return Err(spec.failed(status.code()));
        }
        debug!("command finished");
        Ok(())
    }
}
