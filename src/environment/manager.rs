//! Entry point owning the configuration and base directories
//!
//! The EnvironmentManager hands out `Environment` values by release and
//! reports on every release the configuration knows about.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::Environment;
use crate::config::Config;
use crate::error::Result;
use crate::paths::BaseDirs;

/// One configured release and whether its sandbox exists
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseStatus {
    pub distro: String,
    pub release: String,
    pub exists: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct EnvironmentManager {
    config: Config,
    base: BaseDirs,
}

impl EnvironmentManager {
    pub fn new(config: Config, base: BaseDirs) -> Self {
        Self { config, base }
    }

    /// Manager over the platform's standard directories
    pub fn from_platform(config: Config) -> Result<Self> {
        Ok(Self::new(config, BaseDirs::from_platform()?))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn base_dirs(&self) -> &BaseDirs {
        &self.base
    }

    /// Resolve a release, failing with the list of valid ones
    pub fn environment(&self, release: &str) -> Result<Environment> {
        Environment::new(release, &self.config, &self.base)
    }

    /// Every configured release, ordered by distribution.
    ///
    /// A release listed by several distributions is reported under each, but
    /// only the one `environment()` would pick can show as existing.
    pub fn list(&self) -> Vec<ReleaseStatus> {
        let mut statuses = Vec::new();

        for (distro, distribution) in self.config.distributions() {
            for release in &distribution.releases {
                let owned = self.config.distro_for(release).ok() == Some(distro.as_str());
                let updated_at = if owned {
                    self.environment(release).ok().and_then(|env| env.updated_at())
                } else {
                    None
                };

                statuses.push(ReleaseStatus {
                    distro: distro.clone(),
                    release: release.clone(),
                    exists: updated_at.is_some(),
                    updated_at,
                });
            }
        }

        statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"{"distributions":{
        "ubuntu":{
            "releases":["bionic","focal"],
            "sourceslist":"deb http://archive.ubuntu.com/ubuntu %(release)s main"
        },
        "debian":{
            "releases":["bookworm"],
            "sourceslist":"deb http://deb.debian.org/debian %(release)s main"
        }
    }}"#;

    fn manager(temp: &TempDir) -> EnvironmentManager {
        EnvironmentManager::new(
            Config::from_json_str(CONFIG).unwrap(),
            BaseDirs::under(temp.path()),
        )
    }

    #[test]
    fn test_manager_environment() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        assert_eq!(manager.environment("bookworm").unwrap().distro(), "debian");
        assert!(manager.environment("xenial").is_err());
        assert!(manager.environment("").is_err());
    }

    #[test]
    fn test_manager_list() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);
        manager.environment("focal").unwrap().create().unwrap();

        let list = manager.list();
        let names: Vec<&str> = list.iter().map(|s| s.release.as_str()).collect();
        assert_eq!(names, ["bookworm", "bionic", "focal"]);

        let focal = list.iter().find(|s| s.release == "focal").unwrap();
        assert!(focal.exists);
        assert!(focal.updated_at.is_some());
        assert!(list.iter().filter(|s| s.release != "focal").all(|s| !s.exists));
    }
}
