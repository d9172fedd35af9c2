//! apt-venv CLI - apt sandboxes per release

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use apt_venv::cli::{Args, SubCommand};
use apt_venv::output::EnvironmentInfo;
use apt_venv::{format_output, Config, EnvironmentManager, OutputFormat, Report};
use clap::Parser;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise -v is debug and -vv is trace
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,apt_venv=debug",
        _ => "warn,apt_venv=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let locations = if args.config.is_empty() {
        Config::default_locations()
    } else {
        args.config.clone()
    };
    let config = Config::load(&locations).context("loading configuration")?;
    let manager = EnvironmentManager::from_platform(config)?;
    debug!("base directories: {:?}", manager.base_dirs());

    let output_format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match args.command {
        SubCommand::Create { release } => {
            let env = manager.environment(&release)?;
            env.create()
                .with_context(|| format!("creating environment {}", release))?;
            println!(
                "Created {} ({}) in {}",
                env.release(),
                env.distro(),
                env.paths().data_path.display()
            );
            Ok(ExitCode::SUCCESS)
        }

        SubCommand::Delete { release, yes } => {
            let env = manager.environment(&release)?;
            if !yes && !confirm(&format!("Delete environment {}?", release))? {
                eprintln!("Aborted");
                return Ok(ExitCode::FAILURE);
            }
            env.delete()
                .with_context(|| format!("deleting environment {}", release))?;
            println!("Deleted {}", release);
            Ok(ExitCode::SUCCESS)
        }

        SubCommand::Update { release } => {
            let env = manager.environment(&release)?;
            forward_interrupts()?;
            let status = env
                .update()
                .with_context(|| format!("updating environment {}", release))?;
            Ok(exit_code(status.code()))
        }

        SubCommand::Run { release, command } => {
            let env = manager.environment(&release)?;
            let command = command.join(" ");
            let command = (!command.is_empty()).then_some(command.as_str());
            forward_interrupts()?;
            let status = env
                .run(command)
                .with_context(|| format!("running shell in environment {}", release))?;
            Ok(exit_code(status.code()))
        }

        SubCommand::Exists { release } => {
            let env = manager.environment(&release)?;
            let info = EnvironmentInfo::from(&env);
            let exists = info.exists;
            println!("{}", format_output(&Report::Environment(info), &output_format));
            Ok(if exists {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        SubCommand::List => {
            let report = Report::Releases(manager.list());
            println!("{}", format_output(&report, &output_format));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Ctrl-C belongs to the sandbox shell; keep this process waiting on it
fn forward_interrupts() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {}).context("installing interrupt handler")
}

/// Killed-by-signal shells have no code and count as failure
fn exit_code(code: Option<i32>) -> ExitCode {
    match code {
        Some(0) => ExitCode::SUCCESS,
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        None => ExitCode::FAILURE,
    }
}

/// Needs a terminal; scripts pass `--yes` instead
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("failed to get user confirmation (use --yes when not on a terminal)")
}
