//! Settings loaded once at start-up and passed by reference to each stage.
//!
//! The on-disk format is the JSON `appsettings.json` layout with PascalCase
//! keys. Every pipeline stage receives only the section it needs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::logistix::slab::error::{Result, ToolError};
use crate::logistix::slab::model::SheetRef;

/// File name looked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";
/// Where the downloaded price list is stored.
pub const DEFAULT_DOWNLOAD_PATH: &str = "downloaded_file.xlsx";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settings {
    /// Price list location. Optional when a local file is supplied instead.
    #[serde(default)]
    pub download_url: Option<String>,
    pub project_file_path: PathBuf,
    /// Endpoint answering `{"rates": {"<currency>": <number>}}`.
    #[serde(default)]
    pub exchange_rate_api_url: Option<String>,
    pub excel_settings: ExcelSettings,
    #[serde(default)]
    pub pricing: PricingSettings,
}

/// Layout of the price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExcelSettings {
    /// 1-based sheet position.
    #[serde(default = "default_sheet_number")]
    pub sheet_number: usize,
    /// 1-based column holding the price.
    pub price_column: usize,
    /// Used rows dropped before the marker search starts.
    #[serde(default)]
    pub skip_rows: usize,
    /// Text whose presence in column 1 starts extraction.
    pub search_string: String,
}

impl ExcelSettings {
    pub fn sheet(&self) -> SheetRef {
        SheetRef::Index(self.sheet_number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PricingSettings {
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
    /// Used whenever the live rate cannot be obtained.
    #[serde(default = "default_exchange_rate")]
    pub default_exchange_rate: f64,
    /// Key looked up under `rates` in the exchange-rate payload.
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            coefficient: default_coefficient(),
            default_exchange_rate: default_exchange_rate(),
            quote_currency: default_quote_currency(),
        }
    }
}

fn default_sheet_number() -> usize {
    1
}

fn default_coefficient() -> f64 {
    0.63
}

fn default_exchange_rate() -> f64 {
    90.0
}

fn default_quote_currency() -> String {
    "RUB".to_string()
}

impl Settings {
    /// Reads and validates the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn from_json(source: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let excel = &self.excel_settings;
        if excel.sheet_number == 0 {
            return Err(invalid("ExcelSettings.SheetNumber is 1-based and cannot be 0"));
        }
        if excel.price_column == 0 {
            return Err(invalid("ExcelSettings.PriceColumn is 1-based and cannot be 0"));
        }
        if excel.search_string.is_empty() {
            return Err(invalid("ExcelSettings.SearchString must not be empty"));
        }

        let pricing = &self.pricing;
        if !pricing.coefficient.is_finite() {
            return Err(invalid("Pricing.Coefficient must be a finite number"));
        }
        if !(pricing.default_exchange_rate.is_finite() && pricing.default_exchange_rate > 0.0) {
            return Err(invalid("Pricing.DefaultExchangeRate must be positive"));
        }
        if pricing.quote_currency.trim().is_empty() {
            return Err(invalid("Pricing.QuoteCurrency must not be empty"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> ToolError {
    ToolError::InvalidConfig(message.to_string())
}
