//! Host platform capabilities, resolved once at startup.

/// What the host platform needs from installed binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Whether the loader honors POSIX execute bits.
    pub exec_bits: bool,
    /// Suffix appended to executable file names (`.exe` on Windows).
    pub exe_suffix: &'static str,
}

impl Platform {
    /// Capabilities of the platform this binary was compiled for.
    pub fn current() -> Self {
        Self {
            exec_bits: cfg!(unix),
            exe_suffix: std::env::consts::EXE_SUFFIX,
        }
    }

    pub fn posix() -> Self {
        Self {
            exec_bits: true,
            exe_suffix: "",
        }
    }

    pub fn windows() -> Self {
        Self {
            exec_bits: false,
            exe_suffix: ".exe",
        }
    }

    /// File name of the executable `stem` on this platform.
    pub fn exe_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.exe_suffix)
    }
}
