use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::{info, instrument, warn};

use crate::logistix::slab::config::Settings;
use crate::logistix::slab::constraints::{self, EligibleKeys};
use crate::logistix::slab::error::{Result, ToolError};
use crate::logistix::slab::extract;
use crate::logistix::slab::io::download;
use crate::logistix::slab::io::excel_read;
use crate::logistix::slab::io::excel_write;
use crate::logistix::slab::io::rates::{ExchangeRateGateway, RateOrigin, RateQuote};
use crate::logistix::slab::model::{AggregatePrice, SheetRef};
use crate::logistix::slab::pricing;
use crate::logistix::slab::reconcile::{self, CellUpdate, EXPRESSIONS_SHEET};

/// Files touched by a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Local copy of the price list.
    pub source: PathBuf,
    /// Planning workbook to read.
    pub project: PathBuf,
    /// Where to save the result; the project file itself when `None`.
    pub output: Option<PathBuf>,
    /// Compute and log everything but never save.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn destination(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.project)
    }
}

/// What a run computed and changed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub eligible_keys: EligibleKeys,
    pub price: AggregatePrice,
    pub rate: RateQuote,
    pub updates: Vec<CellUpdate>,
    pub saved_to: Option<PathBuf>,
}

/// Downloads the configured price list to `destination`.
pub fn download_price_list(client: &Client, settings: &Settings, destination: &Path) -> Result<()> {
    let url = settings
        .download_url
        .as_deref()
        .ok_or_else(|| ToolError::InvalidConfig("DownloadUrl is not set".into()))?;
    download::download_file(client, url, destination)
}

/// Derives the slab price from the price list and writes it into the
/// project workbook.
///
/// Both project sheets are checked and the price list is fully read before
/// the rate lookup; nothing is saved unless every step succeeds and at
/// least one cell changed.
#[instrument(
    level = "info",
    skip_all,
    fields(source = %options.source.display(), project = %options.project.display())
)]
pub fn update_project(
    settings: &Settings,
    options: &RunOptions,
    gateway: &dyn ExchangeRateGateway,
) -> Result<RunReport> {
    let mut project = excel_read::read_workbook(&options.project)?;
    let eligible_keys = constraints::eligible_keys(&project)?;
    project.sheet(&SheetRef::name(EXPRESSIONS_SHEET))?;

    let samples = {
        let source = excel_read::read_workbook(&options.source)?;
        extract::extract_prices(&source, &settings.excel_settings)?
    };
    if samples.is_empty() {
        warn!("no price data found for updating the project");
        return Err(ToolError::EmptyInput);
    }
    info!(sample_count = samples.len(), "read price list");

    let rate = gateway.fetch_rate();
    match &rate.origin {
        RateOrigin::Live => info!(rate = rate.rate, "using live exchange rate"),
        RateOrigin::Fallback { reason } => {
            warn!(rate = rate.rate, %reason, "falling back to default exchange rate")
        }
    }

    let price = pricing::compute_aggregate(&samples, settings.pricing.coefficient, rate.rate)?;
    info!(
        mean_local = price.mean_local,
        rounded_local = price.rounded_local,
        rounded_foreign = price.rounded_foreign,
        "computed slab price"
    );

    let updates = reconcile::apply_prices(&mut project, &eligible_keys, &price)?;
    info!(updated = updates.len(), "reconciled linear expressions");

    let saved_to = if options.dry_run {
        info!("dry run, project left unchanged");
        None
    } else if !project.is_dirty() {
        info!("no cells changed, project left unchanged");
        None
    } else {
        let destination = options.destination();
        excel_write::write_workbook(destination, &project)?;
        info!(path = %destination.display(), "project file updated");
        Some(destination.to_path_buf())
    };

    Ok(RunReport {
        eligible_keys,
        price,
        rate,
        updates,
        saved_to,
    })
}
