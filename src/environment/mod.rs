//! Environment lifecycle
//!
//! Each environment is an apt sandbox bound to one release, with:
//! - its own apt.conf, sources.list and bash.rc
//! - a sandbox root holding apt's state, cache and logs
//! - a shell session that points apt at that root

mod manager;
mod shell;
mod types;

pub use manager::{EnvironmentManager, ReleaseStatus};
pub use shell::{shell_command, SHELL, UPDATE_COMMAND};
pub use types::Environment;
