//! Interactive confirmation gate and architecture prompt.
//!
//! Both are skipped entirely in unattended mode.

use anyhow::Result;
use tracing::debug;

use crate::config::RunConfig;
use crate::io::operator::Operator;

pub const BANNER: &str = "
 * Re Build System - Bootstrapper
   This will download, build and install the latest version of Re.

 NOTE: This tool builds and installs Re from scratch.
       If your system has an official Re release, consider downloading it instead.

 NOTE: PLEASE make sure CMake and Ninja are available in your PATH before proceeding!
       The build requires those two to be present.

 Press ENTER to continue bootstrapping Re or CTRL+C to quit... ";

pub const ARCH_QUESTION: &str =
    " > Which architecture do you want to build Re for? (x86/x64/etc, leave empty for default): ";

/// Block until the operator confirms, unless running unattended.
pub fn confirm_start<O: Operator + ?Sized>(cfg: &RunConfig, operator: &mut O) -> Result<()> {
    if cfg.auto {
        debug!("unattended, skipping confirmation");
        return Ok(());
    }
    operator.confirm(BANNER)
}

/// Decide the target architecture.
///
/// A configured architecture wins. Otherwise an interactive run asks the
/// operator; an empty answer, like an unattended run, leaves it to the tool.
pub fn resolve_arch<O: Operator + ?Sized>(cfg: &RunConfig, operator: &mut O) -> Result<Option<String>> {
    if let Some(arch) = &cfg.arch {
        return Ok(Some(arch.clone()));
    }
    if cfg.auto {
        return Ok(None);
    }
    let answer = operator.ask(ARCH_QUESTION)?;
    Ok(Some(answer).filter(|a| !a.is_empty()))
}
