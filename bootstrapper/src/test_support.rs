//! Test-only collaborators: scripted processes, a scripted operator, and a
//! scratch workspace laid out like a real bootstrap run.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::config::RunConfig;
use crate::core::layout::BootstrapLayout;
use crate::error::BootstrapError;
use crate::io::git::is_clone;
use crate::io::operator::Operator;
use crate::io::process::{CommandSpec, ProcessRunner};
use crate::platform::Platform;

/// Process runner that records commands and replays scripted exit codes.
///
/// Exit codes are consumed in order; once the script runs out every command
/// succeeds. A `git clone` creates its destination directory whatever its
/// scripted exit code, the way a real clone that dies halfway does.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    exit_codes: RefCell<VecDeque<i32>>,
    commands: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn with_exit_codes(codes: impl IntoIterator<Item = i32>) -> Self {
        Self {
            exit_codes: RefCell::new(codes.into_iter().collect()),
            commands: RefCell::new(Vec::new()),
        }
    }

    /// Every command run so far, in order.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.borrow().clone()
    }

    /// Commands rendered as display strings.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn clone_count(&self) -> usize {
        self.commands.borrow().iter().filter(|c| is_clone(c)).count()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<(), BootstrapError> {
        self.commands.borrow_mut().push(spec.clone());
        if is_clone(spec)
            && let Some(dest) = spec.args.last()
        {
            let dest = resolve(spec, Path::new(dest));
            fs::create_dir_all(&dest).expect("simulate clone destination");
        }
        let code = self.exit_codes.borrow_mut().pop_front().unwrap_or(0);
        if code == 0 {
            Ok(())
        } else {
            Err(spec.failed(Some(code)))
        }
    }
}

fn resolve(spec: &CommandSpec, path: &Path) -> PathBuf {
    match &spec.workdir {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

/// Operator with canned answers that records everything shown to it.
#[derive(Debug, Default)]
pub struct ScriptedOperator {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedOperator {
    /// An operator whose input is already closed.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Answers are consumed by confirmations and questions alike.
    pub fn answering<S: Into<String>>(answers: impl IntoIterator<Item = S>) -> Self {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Banners and questions shown so far.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    fn next_answer(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            BootstrapError::InputClosed {
                prompt: prompt.trim().to_string(),
            }
            .into()
        })
    }
}

impl Operator for ScriptedOperator {
    fn confirm(&mut self, banner: &str) -> Result<()> {
        self.next_answer(banner).map(|_| ())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        self.next_answer(question)
    }
}

/// Scratch directory with every run path pointed inside it.
pub struct Workspace {
    temp: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: tempfile::tempdir().context("create tempdir")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Unattended configuration with all directories inside the workspace.
    pub fn config(&self) -> RunConfig {
        let root = self.path();
        RunConfig {
            auto: true,
            bootstrap_src_dir: root.join("re-bootstrap-source"),
            main_src_dir: root.join("re-main"),
            out_dir: root.join("re-latest-build"),
            ..RunConfig::default()
        }
    }

    /// Layout the pipeline will derive for `cfg` on `platform`.
    pub fn layout(&self, cfg: &RunConfig, platform: &Platform) -> Result<BootstrapLayout> {
        let source = fs::canonicalize(&cfg.bootstrap_src_dir)
            .with_context(|| format!("resolve {}", cfg.bootstrap_src_dir.display()))?;
        Ok(BootstrapLayout::new(source, &cfg.installed_prefix, platform))
    }

    /// Pre-seed the bootstrap sources with an installed toolchain, as left by
    /// an earlier run. Binaries are written without execute bits.
    pub fn seed_bootstrap(&self, cfg: &RunConfig, platform: &Platform) -> Result<BootstrapLayout> {
        fs::create_dir_all(&cfg.bootstrap_src_dir).context("create bootstrap sources")?;
        let layout = self.layout(cfg, platform)?;
        fs::create_dir_all(&layout.bin_dir).context("create bin dir")?;
        for binary in [&layout.tool_path, &layout.generator_path] {
            fs::write(binary, "#!/bin/sh\n")
                .with_context(|| format!("write {}", binary.display()))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(binary, fs::Permissions::from_mode(0o644))
                    .with_context(|| format!("chmod {}", binary.display()))?;
            }
        }
        Ok(layout)
    }
}
