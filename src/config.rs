//! Configuration loading
//!
//! The configuration is a JSON object read from a short, ordered list of
//! files. Every file that exists is parsed and merged into the result by
//! top-level key, later files winning. Only the `distributions` key is
//! interpreted:
//!
//! ```json
//! {
//!   "distributions": {
//!     "ubuntu": {
//!       "releases": ["bionic", "focal"],
//!       "sourceslist": "deb http://archive.ubuntu.com/ubuntu %(release)s main"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::error::{AptVenvError, Result};

/// System-wide configuration file
pub const SYSTEM_CONFIG: &str = "/etc/apt-venv.conf";

/// File name of the per-user configuration, inside the user config directory
pub const USER_CONFIG_NAME: &str = "apt-venv.conf";

/// One package-ecosystem family and the releases it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default)]
    pub releases: Vec<String>,
    /// sources.list template, `%(release)s` is substituted
    pub sourceslist: String,
}

/// Loaded, immutable configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    distributions: BTreeMap<String, Distribution>,
}

impl Config {
    /// Build a configuration directly from distributions
    pub fn new(distributions: BTreeMap<String, Distribution>) -> Self {
        Self { distributions }
    }

    /// Default search path: the system file, then the user file
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(SYSTEM_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join(USER_CONFIG_NAME));
        }
        locations
    }

    /// Read and merge every existing file in `locations`, in order
    pub fn load<P: AsRef<Path>>(locations: &[P]) -> Result<Self> {
        let mut merged = Map::new();
        let mut distributions_origin: Option<PathBuf> = None;

        for location in locations {
            let path = location.as_ref();
            let Some(object) = read_config_file(path)? else {
                trace!("config {} not present, skipping", path.display());
                continue;
            };
            debug!("loaded config {}", path.display());

            if object.contains_key("distributions") {
                distributions_origin = Some(path.to_path_buf());
            }
            merged.extend(object);
        }

        match (merged.remove("distributions"), distributions_origin) {
            (Some(value), Some(path)) => {
                let distributions = serde_json::from_value(value)
                    .map_err(|source| AptVenvError::Config { path, source })?;
                Ok(Self { distributions })
            }
            _ => {
                warn!("no distributions configured");
                Ok(Self::default())
            }
        }
    }

    /// Parse a single JSON document, mostly useful for tests and embedding
    pub fn from_json_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            distributions: BTreeMap<String, Distribution>,
        }

        let document: Document = serde_json::from_str(content)?;
        Ok(Self {
            distributions: document.distributions,
        })
    }

    /// All distributions, ordered by name
    pub fn distributions(&self) -> &BTreeMap<String, Distribution> {
        &self.distributions
    }

    pub fn distribution(&self, name: &str) -> Option<&Distribution> {
        self.distributions.get(name)
    }

    /// Name of the distribution owning `release`
    pub fn distro_for(&self, release: &str) -> Result<&str> {
        self.lookup(release).map(|(name, _)| name)
    }

    /// Find the distribution owning `release`.
    ///
    /// Distributions are scanned in name order and the last one listing the
    /// release wins. Ownership by several distributions is logged.
    pub fn lookup(&self, release: &str) -> Result<(&str, &Distribution)> {
        let claimants: Vec<(&str, &Distribution)> = self
            .distributions
            .iter()
            .filter(|(_, distribution)| distribution.releases.iter().any(|r| r == release))
            .map(|(name, distribution)| (name.as_str(), distribution))
            .collect();

        if claimants.len() > 1 {
            let names: Vec<&str> = claimants.iter().map(|(name, _)| *name).collect();
            warn!(
                "release {} is listed by several distributions ({}), using {}",
                release,
                names.join(", "),
                names[names.len() - 1]
            );
        }

        claimants
            .last()
            .copied()
            .ok_or_else(|| self.release_not_found(release))
    }

    /// The "please specify one of" error for `release`
    pub fn release_not_found(&self, release: &str) -> AptVenvError {
        AptVenvError::ReleaseNotFound {
            message: self.release_not_found_message(release),
        }
    }

    fn release_not_found_message(&self, release: &str) -> String {
        let base = if release.is_empty() {
            "No release declared. ".to_string()
        } else {
            format!("Release \"{}\" not valid. ", release)
        };

        let all_releases: Vec<String> = self
            .distributions
            .iter()
            .map(|(name, distribution)| {
                format!(" [{}] {}", name, distribution.releases.join(" - "))
            })
            .collect();

        format!("{}Please specify one of:\n{}", base, all_releases.join("\n"))
    }
}

/// Returns `None` when the file does not exist
fn read_config_file(path: &Path) -> Result<Option<Map<String, Value>>> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(AptVenvError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let object = serde_json::from_slice(&content).map_err(|source| AptVenvError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(object))
}
