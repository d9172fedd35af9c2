//! apt-venv - per-release apt sandboxes
//!
//! An environment is an alternative root for apt (state, cache, logs and
//! configuration) plus a bash.rc that points `APT_CONFIG` at it, so
//! `apt-get update`/`install` inside the sandbox shell never touch the host
//! package database.
//!
//! # Example
//!
//! ```no_run
//! use apt_venv::{BaseDirs, Config, EnvironmentManager};
//!
//! let config = Config::load(&Config::default_locations()).unwrap();
//! let manager = EnvironmentManager::new(config, BaseDirs::from_platform().unwrap());
//! let env = manager.environment("bookworm").unwrap();
//! env.create().unwrap();
//! env.update().unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod output;
pub mod paths;
pub mod scaffold;
pub mod templates;

pub use config::{Config, Distribution};
pub use environment::{Environment, EnvironmentManager, ReleaseStatus};
pub use error::{AptVenvError, Result};
pub use output::{format_output, OutputFormat, Report};
pub use paths::{BaseDirs, EnvPaths};
