//! The immutable configuration for one bootstrap run.
//!
//! Built once at startup from three layers, lowest precedence first: the named
//! defaults below, the optional settings file, and command-line flags.

use std::path::PathBuf;

use anyhow::{Result, anyhow};

use crate::io::settings::{BuildSettings, Settings};

pub const DEFAULT_BOOTSTRAP_SRC_DIR: &str = "re-bootstrap-source";
pub const DEFAULT_MAIN_SRC_DIR: &str = "./re-main";
pub const DEFAULT_REPO_URL: &str = "https://github.com/osdeverr/rebs.git";
pub const DEFAULT_MAIN_BRANCH: &str = "main";
pub const DEFAULT_BOOTSTRAP_BRANCH: &str = "bootstrap";
pub const DEFAULT_INSTALLED_PREFIX: &str = "re-bootstrap-installed";
pub const DEFAULT_OUT_DIR: &str = "re-latest-build";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub auto: bool,
    pub arch: Option<String>,
    pub bootstrap_src_dir: Option<PathBuf>,
    pub main_src_dir: Option<PathBuf>,
    pub repo_url: Option<String>,
    pub main_branch: Option<String>,
    pub bootstrap_branch: Option<String>,
    pub installed_prefix: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

/// Parameters for one pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Never wait on the operator.
    pub auto: bool,
    /// Target architecture; `None` means prompt (interactive) or tool default.
    pub arch: Option<String>,
    pub bootstrap_src_dir: PathBuf,
    pub main_src_dir: PathBuf,
    pub repo_url: String,
    pub main_branch: String,
    pub bootstrap_branch: String,
    /// Install prefix, relative to the bootstrap build-output directory.
    pub installed_prefix: PathBuf,
    pub out_dir: PathBuf,
    pub build: BuildSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            auto: false,
            arch: None,
            bootstrap_src_dir: PathBuf::from(DEFAULT_BOOTSTRAP_SRC_DIR),
            main_src_dir: PathBuf::from(DEFAULT_MAIN_SRC_DIR),
            repo_url: DEFAULT_REPO_URL.to_string(),
            main_branch: DEFAULT_MAIN_BRANCH.to_string(),
            bootstrap_branch: DEFAULT_BOOTSTRAP_BRANCH.to_string(),
            installed_prefix: PathBuf::from(DEFAULT_INSTALLED_PREFIX),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            build: BuildSettings::default(),
        }
    }
}

impl RunConfig {
    /// Layer `settings` and then `overrides` over the defaults.
    pub fn resolve(settings: Settings, overrides: Overrides) -> Result<Self> {
        let defaults = RunConfig::default();
        let arch = overrides.arch.or(settings.arch);
        let cfg = RunConfig {
            auto: overrides.auto || settings.auto.unwrap_or(defaults.auto),
            arch: arch.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()),
            bootstrap_src_dir: overrides
                .bootstrap_src_dir
                .or(settings.bootstrap_src_dir)
                .unwrap_or(defaults.bootstrap_src_dir),
            main_src_dir: overrides
                .main_src_dir
                .or(settings.main_src_dir)
                .unwrap_or(defaults.main_src_dir),
            repo_url: overrides
                .repo_url
                .or(settings.repo_url)
                .unwrap_or(defaults.repo_url),
            main_branch: overrides
                .main_branch
                .or(settings.main_branch)
                .unwrap_or(defaults.main_branch),
            bootstrap_branch: overrides
                .bootstrap_branch
                .or(settings.bootstrap_branch)
                .unwrap_or(defaults.bootstrap_branch),
            installed_prefix: overrides
                .installed_prefix
                .or(settings.installed_prefix)
                .unwrap_or(defaults.installed_prefix),
            out_dir: overrides
                .out_dir
                .or(settings.out_dir)
                .unwrap_or(defaults.out_dir),
            build: settings.build,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.repo_url.trim().is_empty() {
            return Err(anyhow!("repo_url must not be empty"));
        }
        if self.main_branch.trim().is_empty() {
            return Err(anyhow!("main_branch must not be empty"));
        }
        if self.bootstrap_branch.trim().is_empty() {
            return Err(anyhow!("bootstrap_branch must not be empty"));
        }
        if self.installed_prefix.as_os_str().is_empty() {
            return Err(anyhow!("installed_prefix must not be empty"));
        }
        for (name, dir) in [
            ("bootstrap_src_dir", &self.bootstrap_src_dir),
            ("main_src_dir", &self.main_src_dir),
            ("out_dir", &self.out_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(anyhow!("{name} must not be empty"));
            }
        }
        self.build.validate()
    }
}
