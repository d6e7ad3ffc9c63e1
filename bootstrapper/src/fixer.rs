//! Restore execute permission on the bundled build-file generator.
//!
//! Clones and archive extraction do not always carry the execute bit along.
//! Without it the installed `ninja` cannot be launched by the deploy step, so
//! this runs before deployment wherever the loader checks execute bits.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::platform::Platform;

/// What the fixer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// Platform ignores execute bits; nothing was touched.
    Skipped,
    /// Mode on disk after the fix.
    Applied { mode: u32 },
}

/// Copy read bits onto execute bits for `path`, if `platform` cares.
#[instrument(skip_all, fields(path = %path.display(), exec_bits = platform.exec_bits))]
pub fn make_executable(path: &Path, platform: &Platform) -> Result<FixOutcome> {
    if !platform.exec_bits {
        debug!("platform ignores execute bits");
        return Ok(FixOutcome::Skipped);
    }
    apply(path)
}

#[cfg(unix)]
fn apply(path: &Path) -> Result<FixOutcome> {
    use crate::core::permissions::exec_mode_from_read;
    use crate::io::fs::update_mode;

    let mode = update_mode(path, exec_mode_from_read)?;
    Ok(FixOutcome::Applied { mode })
}

#[cfg(not(unix))]
fn apply(path: &Path) -> Result<FixOutcome> {
    debug!(path = %path.display(), "no POSIX modes on this host");
    Ok(FixOutcome::Skipped)
}
