//! Binary entry point for the `pgraph` replay tool.
#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use partial_graph::cli::replay::{
    demo_script, load_script, render_json, render_text, run_script, CliError, ReplayOptions,
    Script,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pgraph",
    version,
    about = "Replay operations against a partially persistent graph",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "Tracing filter used when RUST_LOG is unset"
    )]
    log: String,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Output format for the replay report"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the built-in walkthrough.
    Demo,
    /// Replay a TOML operation script.
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        #[arg(long, help = "Abort on the first failing operation")]
        strict: bool,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let (script, opts): (Script, ReplayOptions) = match &cli.command {
        Command::Demo => (demo_script(), ReplayOptions::default()),
        Command::Replay { script, strict } => (
            load_script(script)?,
            ReplayOptions {
                stop_on_error: *strict,
            },
        ),
    };
    let report = run_script(&script, opts)?;
    match cli.format {
        OutputFormat::Text => Ok(render_text(&report)),
        OutputFormat::Json => render_json(&report).map(|json| json + "\n"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log);
    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
