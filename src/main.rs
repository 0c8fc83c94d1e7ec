use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logistix_slab_sync::config::{DEFAULT_CONFIG_FILE, DEFAULT_DOWNLOAD_PATH, Settings};
use logistix_slab_sync::io::download;
use logistix_slab_sync::io::rates::{ExchangeRateGateway, FixedRate, HttpRateGateway};
use logistix_slab_sync::sync::{self, RunOptions};
use logistix_slab_sync::{Result, ToolError};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Update(args) => execute_update(args),
    }
}

fn execute_update(args: UpdateArgs) -> Result<()> {
    let settings = Settings::load(&args.config)?;
    let client = download::http_client()?;

    let source = match args.source {
        Some(path) if !path.exists() => return Err(ToolError::MissingInput(path)),
        Some(path) => path,
        None => {
            let destination = PathBuf::from(DEFAULT_DOWNLOAD_PATH);
            sync::download_price_list(&client, &settings, &destination)?;
            destination
        }
    };

    let options = RunOptions {
        source,
        project: args
            .project
            .unwrap_or_else(|| settings.project_file_path.clone()),
        output: args.output,
        dry_run: args.dry_run,
    };

    let gateway: Box<dyn ExchangeRateGateway> = match args.rate {
        Some(rate) if rate > 0.0 => Box::new(FixedRate(rate)),
        Some(rate) => {
            return Err(ToolError::InvalidConfig(format!(
                "--rate must be positive, got {rate}"
            )));
        }
        None => Box::new(HttpRateGateway::from_settings(client, &settings)),
    };

    let report = sync::update_project(&settings, &options, gateway.as_ref())?;
    info!(
        keys = ?report.eligible_keys,
        updated = report.updates.len(),
        local = report.price.rounded_local,
        foreign = report.price.rounded_foreign,
        fallback_rate = report.rate.is_fallback(),
        "run complete"
    );
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Derive the slab price from a published price list and write it into a planning workbook."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recompute the slab price and update the project workbook.
    Update(UpdateArgs),
}

#[derive(clap::Args)]
struct UpdateArgs {
    /// Settings file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Use a local price list instead of downloading `DownloadUrl`.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Project workbook; defaults to `ProjectFilePath` from the settings.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Save to this file instead of overwriting the project.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Skip the live lookup and convert with this rate.
    #[arg(long)]
    rate: Option<f64>,

    /// Compute and log the updates without saving.
    #[arg(long)]
    dry_run: bool,
}
