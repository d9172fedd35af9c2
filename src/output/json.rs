//! JSON output formatting

use crate::output::formatter::Report;
use serde_json::{json, Value};

pub fn format_json(report: &Report) -> String {
    let data: Value = match report {
        Report::Releases(releases) => json!({ "releases": releases }),
        Report::Environment(info) => serde_json::to_value(info).unwrap_or(json!(null)),
    };

    serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
}
