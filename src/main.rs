use anyhow::Result;
use campaign_split::{output::OutputFormat, Config, Pipeline};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Split campaign CSV archives into client, campaign and economics tables"
)]
struct Args {
    /// YAML config file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory holding the *.zip archives [default: files/input]
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory the tables are written to [default: files/output]
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output file format [default: csv]
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_filter = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // the error chain is reported once, through the log
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("run aborted: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // ─── 2) resolve config ───────────────────────────────────────────
    let mut config = match &args.config {
        Some(path) => Config::from_yaml_file(path)?,
        None => Config::default(),
    };
    if let Some(input) = args.input {
        config.input_dir = input;
    }
    if let Some(output) = args.output {
        config.output_dir = output;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    info!(?config, "startup");

    // ─── 3) run ──────────────────────────────────────────────────────
    let summary = Pipeline::new(config).run()?;
    info!(
        archives = summary.archives,
        entries = summary.entries,
        skipped = summary.skipped_entries,
        "wrote {} table(s)",
        summary.written.len()
    );
    Ok(())
}
