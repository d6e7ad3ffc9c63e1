//! Source acquisition: clone a branch once, reuse it on every later run.
//!
//! Presence of the target directory is the whole check. An existing directory
//! is trusted as-is; it is never pulled, and never compared against the
//! requested branch.
//!
//! Clones land in a `<dir>.partial` staging directory first and are renamed
//! into place only after `git` succeeds, so a failed or interrupted clone never
//! leaves behind a directory the presence check would mistake for a finished
//! one. Stale staging directories are wiped before the next attempt.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument};

use crate::io::fs::remove_dir_if_present;
use crate::io::git::clone_command;
use crate::io::process::ProcessRunner;

const STAGING_SUFFIX: &str = ".partial";

/// What to acquire and where.
#[derive(Debug, Clone, Copy)]
pub struct SourceRequest<'a> {
    /// Human-readable name for progress output ("bootstrap", "main").
    pub label: &'a str,
    pub dir: &'a Path,
    pub repo_url: &'a str,
    pub branch: &'a str,
}

/// How the source tree came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// The directory was already there and was reused untouched.
    Existing,
    /// The directory was cloned during this call.
    Cloned,
}

/// The presence predicate: does `dir` count as already acquired?
pub fn source_present(dir: &Path) -> bool {
    dir.exists()
}

/// Staging directory a clone of `dir` is written to before it is moved into place.
pub fn staging_dir(dir: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .ok_or_else(|| anyhow!("source directory {} has no final component", dir.display()))?;
    let mut staged = OsString::from(name);
    staged.push(STAGING_SUFFIX);
    Ok(dir.with_file_name(staged))
}

/// Ensure `request.dir` exists, cloning it if absent.
#[instrument(skip_all, fields(label = request.label, dir = %request.dir.display(), branch = request.branch))]
pub fn acquire_source<R: ProcessRunner>(runner: &R, request: &SourceRequest<'_>) -> Result<Acquisition> {
    if source_present(request.dir) {
        info!("using existing sources");
        println!(
            " * Using existing Re {} sources from {}",
            request.label,
            request.dir.display()
        );
        return Ok(Acquisition::Existing);
    }

    println!(
        " * Downloading Re {} sources from {}@{}",
        request.label, request.repo_url, request.branch
    );
    let staging = staging_dir(request.dir)?;
    remove_dir_if_present(&staging).context("remove stale partial clone")?;

    let clone = clone_command(request.repo_url, request.branch, &staging);
    runner
        .run(&clone)
        .with_context(|| format!("clone {} sources", request.label))?;

    debug!(staging = %staging.display(), "moving clone into place");
    std::fs::rename(&staging, request.dir).with_context(|| {
        format!(
            "move {} to {}",
            staging.display(),
            request.dir.display()
        )
    })?;
    info!("cloned sources");
    Ok(Acquisition::Cloned)
}
