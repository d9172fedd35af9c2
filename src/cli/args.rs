//! CLI argument parsing

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "apt-venv")]
#[command(
    author,
    version,
    about = "Per-release apt sandboxes that never touch the host",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Configuration file(s) to read instead of the default locations
    #[arg(long = "config", global = true, env = "APT_VENV_CONFIG", value_delimiter = ':')]
    pub config: Vec<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Create (or refresh) the environment for a release
    Create {
        release: String,
    },

    /// Delete the environment for a release
    Delete {
        release: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Run `apt-get update` inside the environment
    Update {
        release: String,
    },

    /// Open a shell in the environment, or run a single command in it
    Run {
        release: String,

        /// Command to run instead of an interactive shell
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Check whether the environment for a release exists
    Exists {
        release: String,
    },

    /// List configured releases and their environments
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_collects_command_words() {
        let args = Args::parse_from(["apt-venv", "run", "bionic", "apt-cache", "policy", "vim"]);
        match args.command {
            SubCommand::Run { release, command } => {
                assert_eq!(release, "bionic");
                assert_eq!(command, ["apt-cache", "policy", "vim"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = Args::parse_from([
            "apt-venv", "-vv", "--json", "--config", "/tmp/a.conf", "list",
        ]);
        assert_eq!(args.verbose, 2);
        assert!(args.json);
        assert_eq!(args.config, [PathBuf::from("/tmp/a.conf")]);
    }

    #[test]
    fn test_config_is_repeatable() {
        let args = Args::parse_from([
            "apt-venv", "list", "--config", "/a.conf", "--config", "/b.conf",
        ]);
        assert_eq!(args.config, [PathBuf::from("/a.conf"), PathBuf::from("/b.conf")]);
    }
}
