//! Exchange-rate lookup.
//!
//! The pipeline only depends on [`ExchangeRateGateway`]. Lookups never fail
//! from the caller's point of view: any transport or payload problem yields
//! the configured default rate, tagged as a fallback so it can be reported.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::logistix::slab::config::Settings;
use crate::logistix::slab::error::{Result, ToolError};

/// Where a rate came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RateOrigin {
    Live,
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateQuote {
    /// Units of local currency per unit of foreign currency.
    pub rate: f64,
    pub origin: RateOrigin,
}

impl RateQuote {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, RateOrigin::Fallback { .. })
    }
}

pub trait ExchangeRateGateway {
    fn fetch_rate(&self) -> RateQuote;
}

/// A rate pinned by the caller, e.g. from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRate(pub f64);

impl ExchangeRateGateway for FixedRate {
    fn fetch_rate(&self) -> RateQuote {
        RateQuote {
            rate: self.0,
            origin: RateOrigin::Live,
        }
    }
}

/// Reads `rates.<currency>` from a JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateGateway {
    client: Client,
    url: Option<String>,
    currency: String,
    default_rate: f64,
}

impl HttpRateGateway {
    pub fn new(
        client: Client,
        url: Option<String>,
        currency: impl Into<String>,
        default_rate: f64,
    ) -> Self {
        Self {
            client,
            url,
            currency: currency.into(),
            default_rate,
        }
    }

    pub fn from_settings(client: Client, settings: &Settings) -> Self {
        Self::new(
            client,
            settings.exchange_rate_api_url.clone(),
            settings.pricing.quote_currency.clone(),
            settings.pricing.default_exchange_rate,
        )
    }

    fn lookup(&self) -> Result<f64> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| ToolError::RateFetch("no exchange rate URL configured".into()))?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| ToolError::RateFetch(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::RateFetch(format!("server answered {status}")));
        }

        let body = response
            .text()
            .map_err(|err| ToolError::RateFetch(err.to_string()))?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|err| ToolError::RateFetch(err.to_string()))?;

        let rate = payload
            .get("rates")
            .and_then(|rates| rates.get(&self.currency))
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                ToolError::RateFetch(format!("payload has no numeric rates.{}", self.currency))
            })?;

        if rate.is_finite() && rate > 0.0 {
            Ok(rate)
        } else {
            Err(ToolError::RateFetch(format!("unusable rate {rate}")))
        }
    }
}

impl ExchangeRateGateway for HttpRateGateway {
    fn fetch_rate(&self) -> RateQuote {
        match self.lookup() {
            Ok(rate) => {
                debug!(rate, currency = %self.currency, "live exchange rate");
                RateQuote {
                    rate,
                    origin: RateOrigin::Live,
                }
            }
            Err(error) => RateQuote {
                rate: self.default_rate,
                origin: RateOrigin::Fallback {
                    reason: error.to_string(),
                },
            },
        }
    }
}
