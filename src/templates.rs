//! Built-in templates and `%(name)s` rendering

use std::path::Path;

use crate::error::{AptVenvError, Result};
use crate::paths::EnvPaths;

/// Passthrough for sudo/su: drop leading options and run the command as-is
pub const FAKE_SU: &str = r#"#!/bin/sh
# apt-venv: privilege escalation is a no-op inside the sandbox
while [ $# -gt 0 ]; do
    case "$1" in
        --) shift; break ;;
        -c) shift; exec /bin/sh -c "$@" ;;
        -u|-g|-p|-C) shift 2 ;;
        -*) shift ;;
        *) break ;;
    esac
done
[ $# -eq 0 ] && exec "${SHELL:-/bin/sh}"
exec "$@"
"#;

/// Redirects every apt state, cache and configuration root into `data_path`
pub const APT_CONF: &str = r#"// generated by apt-venv
Dir "%(data_path)s/";
Dir::State "%(data_path)s/var/lib/apt/";
Dir::State::Lists "%(data_path)s/var/lib/apt/lists/";
Dir::State::status "%(data_path)s/var/lib/dpkg/status";
Dir::Cache "%(data_path)s/var/cache/apt/";
Dir::Cache::Archives "%(data_path)s/var/cache/apt/archives/";
Dir::Etc "%(data_path)s/etc/apt/";
Dir::Etc::SourceList "%(data_path)s/etc/apt/sources.list";
Dir::Etc::SourceParts "%(data_path)s/etc/apt/sources.list.d/";
Dir::Etc::Parts "%(data_path)s/etc/apt/apt.conf.d/";
Dir::Etc::Preferences "%(data_path)s/etc/apt/preferences";
Dir::Etc::PreferencesParts "%(data_path)s/etc/apt/preferences.d/";
Dir::Etc::Trusted "%(data_path)s/etc/apt/trusted.gpg";
Dir::Etc::TrustedParts "%(data_path)s/etc/apt/trusted.gpg.d/";
Dir::Log "%(data_path)s/var/log/apt/";
Debug::NoLocking "true";
"#;

pub const BASH_RC: &str = r#"# generated by apt-venv
[ -f "$HOME/.bashrc" ] && . "$HOME/.bashrc"

export APT_VENV="%(release)s"
export APT_CONFIG="%(aptconf)s"
export APT_VENV_DATA="%(data_path)s"
export APT_VENV_CACHE="%(cache_path)s"
export PATH="%(data_path)s/bin:$PATH"
export PS1="(apt-venv %(release)s) $PS1"
"#;

/// Substitute `%(name)s` directives; `%%` renders as `%`
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let directive = &rest[pos + 1..];

        if let Some(after) = directive.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }

        let Some(body) = directive.strip_prefix('(') else {
            return Err(AptVenvError::Template(format!(
                "unsupported directive at byte {} of {:?}",
                template.len() - rest.len() + pos,
                template
            )));
        };
        let Some(close) = body.find(")s") else {
            return Err(AptVenvError::Template(format!(
                "unterminated placeholder in {:?}",
                template
            )));
        };

        let name = &body[..close];
        let value = vars
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| AptVenvError::Template(format!("unknown placeholder %({})s", name)))?;
        out.push_str(value);
        rest = &body[close + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Paths are written into shell and apt syntax, so they must be UTF-8
fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| AptVenvError::Template(format!("path {:?} is not valid UTF-8", path)))
}

pub fn render_apt_conf(paths: &EnvPaths) -> Result<String> {
    render(APT_CONF, &[("data_path", path_str(&paths.data_path)?)])
}

pub fn render_sources_list(template: &str, release: &str) -> Result<String> {
    render(template, &[("release", release)])
}

pub fn render_bashrc(paths: &EnvPaths, release: &str) -> Result<String> {
    render(
        BASH_RC,
        &[
            ("aptconf", path_str(&paths.aptconf)?),
            ("data_path", path_str(&paths.data_path)?),
            ("cache_path", path_str(&paths.cache_path)?),
            ("release", release),
        ],
    )
}
