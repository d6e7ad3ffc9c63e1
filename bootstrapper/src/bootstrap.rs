//! Bootstrap builder: generate, build, install.
//!
//! Runs CMake three times inside `<bootstrap sources>/out`. Each step must exit
//! successfully before the next one starts; install copies artifacts the build
//! step produced.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::layout::BootstrapLayout;
use crate::io::fs::ensure_dir;
use crate::io::process::{CommandSpec, ProcessRunner};
use crate::io::settings::BuildSettings;

const CMAKE: &str = "cmake";

/// One of the three bootstrap build steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Generate,
    Build,
    Install,
}

impl BuildStep {
    pub const ALL: [BuildStep; 3] = [BuildStep::Generate, BuildStep::Build, BuildStep::Install];

    fn progress(self) -> &'static str {
        match self {
            BuildStep::Generate => "Generating CMake files",
            BuildStep::Build => "Building the bootstrap source",
            BuildStep::Install => "Installing the bootstrap source",
        }
    }

    /// The CMake invocation for this step, run from the build directory.
    pub fn command(self, build_dir: &Path, prefix: &Path, build: &BuildSettings) -> CommandSpec {
        let cmd = CommandSpec::new(CMAKE);
        let cmd = match self {
            BuildStep::Generate => cmd.args([
                "..".to_string(),
                "-G".to_string(),
                build.generator.clone(),
                format!("-DCMAKE_BUILD_TYPE={}", build.build_type),
            ]),
            BuildStep::Build => cmd.args(["--build", "."]),
            BuildStep::Install => cmd.args(["--install", ".", "--prefix"]).arg(prefix),
        };
        cmd.current_dir(build_dir)
    }
}

/// Build and install the bootstrap toolchain described by `layout`.
///
/// `prefix` is passed to `cmake --install` as given; CMake resolves it against
/// the build directory, so binaries land in `layout.bin_dir`.
#[instrument(skip_all, fields(build_dir = %layout.build_dir.display()))]
pub fn build_bootstrap<R: ProcessRunner>(
    runner: &R,
    layout: &BootstrapLayout,
    prefix: &Path,
    build: &BuildSettings,
) -> Result<()> {
    ensure_dir(&layout.build_dir)?;

    for step in BuildStep::ALL {
        println!(" * {}", step.progress());
        info!(?step, "running bootstrap build step");
        let cmd = step.command(&layout.build_dir, prefix, build);
        runner
            .run(&cmd)
            .with_context(|| format!("bootstrap build step {step:?}"))?;
    }
    Ok(())
}
