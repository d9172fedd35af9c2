//! Output formatting

use std::path::PathBuf;

use serde::Serialize;

use crate::environment::{Environment, ReleaseStatus};
use crate::output::human::format_human;
use crate::output::json::format_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Where one release lives on disk and whether it is materialized
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentInfo {
    pub release: String,
    pub distro: String,
    pub exists: bool,
    pub config_path: PathBuf,
    pub cache_path: PathBuf,
    pub data_path: PathBuf,
}

impl From<&Environment> for EnvironmentInfo {
    fn from(env: &Environment) -> Self {
        let paths = env.paths();
        Self {
            release: env.release().to_string(),
            distro: env.distro().to_string(),
            exists: env.exists(),
            config_path: paths.config_path.clone(),
            cache_path: paths.cache_path.clone(),
            data_path: paths.data_path.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Report {
    Releases(Vec<ReleaseStatus>),
    Environment(EnvironmentInfo),
}

pub fn format_output(report: &Report, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_human(report),
        OutputFormat::Json => format_json(report),
    }
}
