//! Sandbox shell invocation

use std::path::Path;
use std::process::Command;

/// Shell used for sandbox sessions; bash.rc is written for it
pub const SHELL: &str = "bash";

/// One-shot command behind `update`
pub const UPDATE_COMMAND: &str = "apt-get update";

/// `bash --rcfile <bashrc>` for an interactive session, or
/// `bash -c "source <bashrc> ; <command>"` for a one-shot command
pub fn shell_command(bashrc: &Path, command: Option<&str>) -> Command {
    let mut shell = Command::new(SHELL);
    match command {
        Some(command) => {
            shell
                .arg("-c")
                .arg(format!("source {} ; {}", quote(&bashrc.to_string_lossy()), command));
        }
        None => {
            shell.arg("--rcfile").arg(bashrc);
        }
    }
    shell
}

/// Single-quote for POSIX shells
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
