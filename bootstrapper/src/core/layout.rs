//! Canonical paths inside a bootstrap source tree.

use std::path::{Path, PathBuf};

use crate::platform::Platform;

/// Name of the build-output directory created inside the bootstrap sources.
pub const BUILD_DIR_NAME: &str = "out";
/// The tool being bootstrapped.
pub const TOOL_NAME: &str = "re";
/// Build-file generator bundled with the bootstrap install.
pub const GENERATOR_TOOL_NAME: &str = "ninja";

/// All paths derived from a bootstrap source tree and install prefix name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapLayout {
    pub build_dir: PathBuf,
    /// `bin` under the install prefix, which is resolved against `build_dir`.
    pub bin_dir: PathBuf,
    /// The bootstrapped tool binary.
    pub tool_path: PathBuf,
    /// The auxiliary build-file generator binary.
    pub generator_path: PathBuf,
    /// Dependency root the full build resolves third-party packages from.
    pub dependency_root: PathBuf,
}

impl BootstrapLayout {
    pub fn new(source_dir: impl Into<PathBuf>, prefix_name: &Path, platform: &Platform) -> Self {
        let source_dir: PathBuf = source_dir.into();
        let build_dir = source_dir.join(BUILD_DIR_NAME);
        let bin_dir = build_dir.join(prefix_name).join("bin");
        Self {
            build_dir: build_dir.clone(),
            tool_path: bin_dir.join(platform.exe_name(TOOL_NAME)),
            generator_path: bin_dir.join(platform.exe_name(GENERATOR_TOOL_NAME)),
            bin_dir,
            dependency_root: build_dir.join("_deps").join("vcpkg-src"),
        }
    }
}
