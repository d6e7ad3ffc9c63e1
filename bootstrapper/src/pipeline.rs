//! The bootstrap pipeline: every stage, in order, stopping at the first error.
//!
//! ```text
//! confirm -> prepare output -> acquire bootstrap -> build bootstrap
//!         -> fix permissions -> acquire main -> deploy
//! ```
//!
//! Nothing is resumed or rolled back. A rerun starts from the top and only
//! skips work whose directories are already present.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use crate::acquire::{Acquisition, SourceRequest, acquire_source};
use crate::bootstrap::build_bootstrap;
use crate::config::RunConfig;
use crate::core::deploy_config::DeployConfig;
use crate::core::layout::BootstrapLayout;
use crate::deploy::{DeployRequest, run_deploy};
use crate::fixer::{FixOutcome, make_executable};
use crate::gate::{confirm_start, resolve_arch};
use crate::io::fs::{canonical, ensure_dir_canonical};
use crate::io::operator::Operator;
use crate::io::process::ProcessRunner;
use crate::platform::Platform;

/// Named pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Confirm,
    PrepareOutput,
    AcquireBootstrap,
    BuildBootstrap,
    FixPermissions,
    AcquireMain,
    Deploy,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Confirm => "confirm",
            Stage::PrepareOutput => "prepare-output",
            Stage::AcquireBootstrap => "acquire-bootstrap",
            Stage::BuildBootstrap => "build-bootstrap",
            Stage::FixPermissions => "fix-permissions",
            Stage::AcquireMain => "acquire-main",
            Stage::Deploy => "deploy",
        }
    }

    /// Run `f` as this stage: traced, and with the stage named in any error.
    fn run<T>(self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let span = info_span!("stage", name = self.name());
        let _enter = span.enter();
        debug!("stage started");
        let out = f().with_context(|| format!("stage {self}"))?;
        debug!("stage finished");
        Ok(out)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Absolute path the product was deployed to.
    pub out_dir: PathBuf,
    pub bootstrap_sources: Acquisition,
    pub main_sources: Acquisition,
    pub permissions: FixOutcome,
    pub arch: Option<String>,
}

/// Run every stage for `cfg`.
pub fn run_pipeline<R, O>(
    cfg: &RunConfig,
    runner: &R,
    operator: &mut O,
    platform: &Platform,
) -> Result<PipelineOutcome>
where
    R: ProcessRunner,
    O: Operator + ?Sized,
{
    debug!(?cfg, ?platform, "resolved configuration");

    Stage::Confirm.run(|| confirm_start(cfg, &mut *operator))?;

    let out_dir = Stage::PrepareOutput.run(|| ensure_dir_canonical(&cfg.out_dir))?;
    println!("{}", out_dir.display());

    let bootstrap_sources = Stage::AcquireBootstrap.run(|| {
        acquire_source(
            runner,
            &SourceRequest {
                label: "bootstrap",
                dir: &cfg.bootstrap_src_dir,
                repo_url: &cfg.repo_url,
                branch: &cfg.bootstrap_branch,
            },
        )
    })?;
    let bootstrap_dir = canonical(&cfg.bootstrap_src_dir)?;
    let layout = BootstrapLayout::new(bootstrap_dir, &cfg.installed_prefix, platform);

    Stage::BuildBootstrap
        .run(|| build_bootstrap(runner, &layout, &cfg.installed_prefix, &cfg.build))?;

    let permissions =
        Stage::FixPermissions.run(|| make_executable(&layout.generator_path, platform))?;

    let main_sources = Stage::AcquireMain.run(|| {
        acquire_source(
            runner,
            &SourceRequest {
                label: "main",
                dir: &cfg.main_src_dir,
                repo_url: &cfg.repo_url,
                branch: &cfg.main_branch,
            },
        )
    })?;

    let arch = Stage::Deploy.run(|| {
        let arch = resolve_arch(cfg, &mut *operator)?;
        let request = DeployRequest {
            main_src_dir: &cfg.main_src_dir,
            tool_path: &layout.tool_path,
            config: DeployConfig {
                deploy_path: out_dir.clone(),
                dependency_root: layout.dependency_root.clone(),
                arch: arch.clone(),
            },
        };
        run_deploy(runner, &request)?;
        Ok(arch)
    })?;

    info!(out_dir = %out_dir.display(), "bootstrap complete");
    print_report(&out_dir);

    Ok(PipelineOutcome {
        out_dir,
        bootstrap_sources,
        main_sources,
        permissions,
        arch,
    })
}

fn print_report(out_dir: &std::path::Path) {
    println!(" * Re has successfully been built and installed to:");
    println!("     {}", out_dir.display());
    println!();
    println!(
        " * You should set up symlinks and/or PATH entries for the directory above, or move all of its contents"
    );
    println!(
        "   somewhere else and do the same to wherever you moved it to, to start building projects with Re."
    );
    println!();
    println!("   Enjoy using Re!");
    println!();
}
