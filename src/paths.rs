//! Path resolution for a release
//!
//! Everything here is computed, nothing touches the filesystem.

use std::path::{Path, PathBuf};

use crate::error::{AptVenvError, Result};

/// Application directory name under each platform base directory
pub const APP_NAME: &str = "apt-venv";

/// Directories created under the sandbox root, mirroring apt's runtime layout
pub const DATA_SUBDIRS: [&str; 6] = [
    "var/log/apt",
    "var/lib/apt/lists/partial",
    "var/cache/apt/archives/partial",
    "etc/apt/apt.conf.d",
    "etc/apt/preferences.d",
    "var/lib/dpkg",
];

/// Host files linked into the sandbox so apt trusts the same keys
pub const TRUSTED_LINKS: [&str; 2] = ["etc/apt/trusted.gpg", "etc/apt/trusted.gpg.d"];

/// Name of the fake privilege-escalation shim in `bin/`
pub const FAKE_SU_NAME: &str = "__apt-venv_fake_su";

/// Names linked to the shim in `bin/`
pub const FAKE_SU_LINKS: [&str; 2] = ["sudo", "su"];

/// Per-application config, cache and data roots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirs {
    pub config: PathBuf,
    pub cache: PathBuf,
    pub data: PathBuf,
}

impl BaseDirs {
    pub fn new(config: PathBuf, cache: PathBuf, data: PathBuf) -> Self {
        Self {
            config,
            cache,
            data,
        }
    }

    /// Platform standard directories (`$XDG_CONFIG_HOME/apt-venv`, ...)
    pub fn from_platform() -> Result<Self> {
        let config = dirs::config_dir().ok_or(AptVenvError::NoBaseDirectory("config"))?;
        let cache = dirs::cache_dir().ok_or(AptVenvError::NoBaseDirectory("cache"))?;
        let data = dirs::data_dir().ok_or(AptVenvError::NoBaseDirectory("data"))?;

        Ok(Self {
            config: config.join(APP_NAME),
            cache: cache.join(APP_NAME),
            data: data.join(APP_NAME),
        })
    }

    /// Lay out all three roots under a single directory
    pub fn under(root: &Path) -> Self {
        Self {
            config: root.join("config").join(APP_NAME),
            cache: root.join("cache").join(APP_NAME),
            data: root.join("data").join(APP_NAME),
        }
    }
}

/// Every path belonging to one release's environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPaths {
    pub config_path: PathBuf,
    pub cache_path: PathBuf,
    /// Sandbox root standing in for `/`
    pub data_path: PathBuf,
    pub bashrc: PathBuf,
    pub sourceslist: PathBuf,
    pub aptconf: PathBuf,
}

impl EnvPaths {
    pub fn resolve(release: &str, base: &BaseDirs) -> Self {
        let config_path = base.config.join(release);
        let cache_path = base.cache.join(release);
        let data_path = base.data.join(release);

        Self {
            bashrc: config_path.join("bash.rc"),
            sourceslist: config_path.join("sources.list"),
            aptconf: config_path.join("apt.conf"),
            config_path,
            cache_path,
            data_path,
        }
    }

    /// A path inside the sandbox root, `rel` given without a leading slash
    pub fn in_data(&self, rel: &str) -> PathBuf {
        self.data_path.join(rel)
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.in_data("bin")
    }

    pub fn fake_su(&self) -> PathBuf {
        self.bin_dir().join(FAKE_SU_NAME)
    }

    pub fn dpkg_status(&self) -> PathBuf {
        self.in_data("var/lib/dpkg/status")
    }

    /// Where apt looks for sources.list inside the sandbox
    pub fn sandbox_sourceslist(&self) -> PathBuf {
        self.in_data("etc/apt/sources.list")
    }

    /// Files whose joint presence means the environment exists
    pub fn markers(&self) -> [&Path; 3] {
        [&self.bashrc, &self.aptconf, &self.sourceslist]
    }

    /// Base directories removed on delete
    pub fn base_dirs(&self) -> [&Path; 3] {
        [&self.config_path, &self.cache_path, &self.data_path]
    }
}
