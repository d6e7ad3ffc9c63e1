//! Git commands issued by the bootstrapper.
//!
//! Only cloning is needed. Commands are built here and handed to a
//! [`ProcessRunner`](crate::io::process::ProcessRunner) so tests can observe
//! them without a network.

use std::path::Path;

use crate::io::process::CommandSpec;

const GIT: &str = "git";

/// `git clone <url> --recursive --branch <branch> <dest>`.
///
/// Submodules are always fetched; the bootstrap build vendors its
/// dependencies through them.
pub fn clone_command(repo_url: &str, branch: &str, dest: &Path) -> CommandSpec {
    CommandSpec::new(GIT)
        .arg("clone")
        .arg(repo_url)
        .arg("--recursive")
        .arg("--branch")
        .arg(branch)
        .arg(dest)
}

/// True if `spec` is a clone produced by [`clone_command`].
#[cfg(any(test, feature = "test-support"))]
pub fn is_clone(spec: &CommandSpec) -> bool {
    spec.program == Path::new(GIT) && spec.args.first().is_some_and(|arg| arg == "clone")
}
