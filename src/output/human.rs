//! Human-readable output formatting

use crate::output::formatter::Report;

pub fn format_human(report: &Report) -> String {
    match report {
        Report::Releases(releases) => {
            if releases.is_empty() {
                return "No distributions configured".to_string();
            }
            let mut output = format!(
                "{:<12} {:<16} {:<8} {}\n",
                "DISTRO", "RELEASE", "STATUS", "UPDATED"
            );
            output.push_str(&"-".repeat(56));
            output.push('\n');
            for status in releases {
                output.push_str(&format!(
                    "{:<12} {:<16} {:<8} {}\n",
                    status.distro,
                    status.release,
                    if status.exists { "created" } else { "-" },
                    status
                        .updated_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string())
                ));
            }
            output
        }
        Report::Environment(info) => {
            let state = if info.exists { "exists" } else { "not created" };
            format!(
                "{} ({}): {}\n  \
                 config: {}\n  \
                 cache:  {}\n  \
                 data:   {}",
                info.release,
                info.distro,
                state,
                info.config_path.display(),
                info.cache_path.display(),
                info.data_path.display()
            )
        }
    }
}
