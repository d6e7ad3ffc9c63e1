//! Deployment driver: point the main sources at the bootstrap toolchain and let
//! the bootstrapped tool build and install itself.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::deploy_config::{DeployConfig, FILE_NAME};
use crate::io::fs::write_replacing;
use crate::io::process::{CommandSpec, ProcessRunner};

/// Everything the deploy stage needs.
#[derive(Debug, Clone)]
pub struct DeployRequest<'a> {
    pub main_src_dir: &'a Path,
    /// Bootstrapped tool binary.
    pub tool_path: &'a Path,
    pub config: DeployConfig,
}

/// Path of the deploy configuration inside `main_src_dir`.
pub fn deploy_config_path(main_src_dir: &Path) -> PathBuf {
    main_src_dir.join(FILE_NAME)
}

/// Replace the deploy configuration file with `config`.
pub fn write_deploy_config(main_src_dir: &Path, config: &DeployConfig) -> Result<PathBuf> {
    let path = deploy_config_path(main_src_dir);
    write_replacing(&path, &config.render())?;
    info!(path = %path.display(), arch = ?config.arch, "wrote deploy configuration");
    Ok(path)
}

/// `<tool> do deploy`, run from the main source tree.
pub fn deploy_command(tool_path: &Path, main_src_dir: &Path) -> CommandSpec {
    CommandSpec::new(tool_path)
        .args(["do", "deploy"])
        .current_dir(main_src_dir)
}

/// Write the deploy configuration, then run the self-deploy.
#[instrument(skip_all, fields(main_src_dir = %request.main_src_dir.display()))]
pub fn run_deploy<R: ProcessRunner>(runner: &R, request: &DeployRequest<'_>) -> Result<()> {
    println!(" * Setting up build parameters");
    write_deploy_config(request.main_src_dir, &request.config)?;

    println!(" * Building the latest Re");
    let cmd = deploy_command(request.tool_path, request.main_src_dir);
    runner.run(&cmd).context("deploy with bootstrapped tool")?;
    Ok(())
}
