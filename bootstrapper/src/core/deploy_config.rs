//! Rendering of the user deploy configuration (`re.user.yml`).

use std::path::{Path, PathBuf};

/// File name of the deploy configuration inside the main source tree.
pub const FILE_NAME: &str = "re.user.yml";

pub const DEPLOY_PATH_KEY: &str = "re-dev-deploy-path";
pub const DEPENDENCY_ROOT_KEY: &str = "vcpkg-root-path";
pub const ARCH_KEY: &str = "arch";

/// Values written to the deploy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub deploy_path: PathBuf,
    pub dependency_root: PathBuf,
    /// Omitted from the file when `None`; the tool then picks its default.
    pub arch: Option<String>,
}

impl DeployConfig {
    /// Render the file body: one `key: value` per line, trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, DEPLOY_PATH_KEY, &display(&self.deploy_path));
        push_line(&mut out, DEPENDENCY_ROOT_KEY, &display(&self.dependency_root));
        if let Some(arch) = &self.arch {
            push_line(&mut out, ARCH_KEY, arch);
        }
        out
    }
}

fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push_str(": ");
    out.push_str(value);
    out.push('\n');
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(arch: Option<&str>) -> DeployConfig {
        DeployConfig {
            deploy_path: PathBuf::from("/opt/re-latest-build"),
            dependency_root: PathBuf::from("/src/boot/out/_deps/vcpkg-src"),
            arch: arch.map(str::to_string),
        }
    }

    #[test]
    fn renders_two_lines_without_arch() {
        assert_eq!(
            config(None).render(),
            "re-dev-deploy-path: /opt/re-latest-build\n\
             vcpkg-root-path: /src/boot/out/_deps/vcpkg-src\n"
        );
    }

    #[test]
    fn renders_arch_as_third_line() {
        let rendered = config(Some("x64")).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "arch: x64");
    }
}
