//! A single release's sandbox and its lifecycle

use std::fs;
use std::path::{Component, Path};
use std::process::ExitStatus;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::shell::{shell_command, UPDATE_COMMAND};
use crate::config::Config;
use crate::error::{AptVenvError, Result};
use crate::paths::{BaseDirs, EnvPaths};
use crate::scaffold;
use crate::templates;

/// An apt sandbox bound to one release.
///
/// The value is cheap and recomputed per invocation; only the files it
/// manages persist. Two processes operating on the same release are not
/// synchronized, so a concurrent create and delete can interleave.
#[derive(Debug, Clone)]
pub struct Environment {
    release: String,
    distro: String,
    sourceslist_template: String,
    paths: EnvPaths,
}

impl Environment {
    /// Resolve `release` against the configuration. Fails when no
    /// distribution lists it, or when it is not a single path component.
    pub fn new(release: &str, config: &Config, base: &BaseDirs) -> Result<Self> {
        check_release_name(release, config)?;
        let (distro, distribution) = config.lookup(release)?;

        Ok(Self {
            release: release.to_string(),
            distro: distro.to_string(),
            sourceslist_template: distribution.sourceslist.clone(),
            paths: EnvPaths::resolve(release, base),
        })
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn distro(&self) -> &str {
        &self.distro
    }

    pub fn paths(&self) -> &EnvPaths {
        &self.paths
    }

    /// True when bash.rc, apt.conf and sources.list are all regular files
    pub fn exists(&self) -> bool {
        let result = self.paths.markers().iter().all(|marker| marker.is_file());
        debug!("checking {}: {}", self.release, result);
        result
    }

    /// Last write of bash.rc, if the environment exists. Every `create`
    /// rewrites it, so this is the last refresh.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        if !self.exists() {
            return None;
        }
        let modified = fs::metadata(&self.paths.bashrc).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(modified))
    }

    /// Build (or rebuild) the whole sandbox. Safe on an existing one.
    pub fn create(&self) -> Result<()> {
        debug!("creating {}", self.release);
        scaffold::create_base(&self.paths)?;
        scaffold::create_bin(&self.paths)?;
        self.create_apt_conf()?;
        self.create_sources_list()?;
        self.create_bashrc()
    }

    fn create_apt_conf(&self) -> Result<()> {
        let content = templates::render_apt_conf(&self.paths)?;
        scaffold::write_file(&self.paths.aptconf, &content)
    }

    fn create_sources_list(&self) -> Result<()> {
        let content = templates::render_sources_list(&self.sourceslist_template, &self.release)?;
        scaffold::write_file(&self.paths.sourceslist, &content)?;
        scaffold::replace_symlink(&self.paths.sourceslist, &self.paths.sandbox_sourceslist())
    }

    fn create_bashrc(&self) -> Result<()> {
        let content = templates::render_bashrc(&self.paths, &self.release)?;
        scaffold::write_file(&self.paths.bashrc, &content)
    }

    /// Open a shell inside the sandbox, creating it first if needed.
    ///
    /// Blocks until the shell exits. Its status is handed back for the
    /// caller to report and is never treated as an error here.
    pub fn run(&self, command: Option<&str>) -> Result<ExitStatus> {
        if !self.exists() {
            self.create()?;
        }

        let mut shell = shell_command(&self.paths.bashrc, command);
        debug!("running {:?}", shell);
        let status = shell.status()?;
        debug!("shell for {} exited with {}", self.release, status);
        Ok(status)
    }

    pub fn update(&self) -> Result<ExitStatus> {
        self.run(Some(UPDATE_COMMAND))
    }

    /// Remove the config, cache and data directories. Missing ones are skipped.
    pub fn delete(&self) -> Result<()> {
        debug!("deleting {}", self.release);
        for dir in self.paths.base_dirs() {
            if dir.is_dir() {
                trace!("deleting dir {}", dir.display());
                fs::remove_dir_all(dir)?;
            }
        }
        Ok(())
    }
}

/// The release names one directory under each base dir, nothing else
fn check_release_name(release: &str, config: &Config) -> Result<()> {
    if release.is_empty() {
        return Err(config.release_not_found(release));
    }

    let mut components = Path::new(release).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == release => Ok(()),
        _ => Err(AptVenvError::InvalidRelease(release.to_string())),
    }
}
