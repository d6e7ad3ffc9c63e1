//! Bootstrap Re from source.
//!
//! Clones the `bootstrap` branch, builds and installs it with CMake + Ninja,
//! then uses that copy to build and deploy the latest Re from the main branch.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use bootstrapper::config::{Overrides, RunConfig};
use bootstrapper::error::exit_code_for;
use bootstrapper::io::operator::ConsoleOperator;
use bootstrapper::io::process::InheritedRunner;
use bootstrapper::io::settings::{DEFAULT_SETTINGS_FILE, load_settings};
use bootstrapper::logging;
use bootstrapper::pipeline::run_pipeline;
use bootstrapper::platform::Platform;

#[derive(Parser)]
#[command(
    name = "bootstrapper",
    version,
    about = "Installs Re from scratch",
    after_help = "Enjoy using Re!"
)]
struct Cli {
    /// Run unattended: no confirmation, no prompts.
    #[arg(long)]
    auto: bool,

    /// Target architecture (x86, x64, ...). Empty lets Re pick.
    #[arg(long)]
    arch: Option<String>,

    /// Where the bootstrap sources live (cloned if missing).
    #[arg(long, alias = "bootstrap_src_dir", value_name = "PATH")]
    bootstrap_src_dir: Option<PathBuf>,

    /// Where the main sources live (cloned if missing).
    #[arg(long, alias = "main_src_dir", value_name = "PATH")]
    main_src_dir: Option<PathBuf>,

    #[arg(long, alias = "repo_url", value_name = "URL")]
    repo_url: Option<String>,

    #[arg(long, alias = "main_branch", value_name = "NAME")]
    main_branch: Option<String>,

    #[arg(long, alias = "bootstrap_branch", value_name = "NAME")]
    bootstrap_branch: Option<String>,

    /// Install prefix for the bootstrap build, relative to its build directory.
    #[arg(long, alias = "installed_prefix", value_name = "NAME")]
    installed_prefix: Option<PathBuf>,

    /// Where the finished Re is deployed.
    #[arg(long, alias = "out_dir", value_name = "PATH")]
    out_dir: Option<PathBuf>,

    /// Settings file (TOML). Defaults to `bootstrapper.toml` if present.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            auto: self.auto,
            arch: self.arch.clone(),
            bootstrap_src_dir: self.bootstrap_src_dir.clone(),
            main_src_dir: self.main_src_dir.clone(),
            repo_url: self.repo_url.clone(),
            main_branch: self.main_branch.clone(),
            bootstrap_branch: self.bootstrap_branch.clone(),
            installed_prefix: self.installed_prefix.clone(),
            out_dir: self.out_dir.clone(),
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;
    let mut operator = ConsoleOperator::stdio();
    let outcome = run_pipeline(&cfg, &InheritedRunner, &mut operator, &Platform::current())?;
    debug!(?outcome, "pipeline finished");
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let (path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };
    let settings = load_settings(&path, required)?;
    RunConfig::resolve(settings, cli.overrides())
}
