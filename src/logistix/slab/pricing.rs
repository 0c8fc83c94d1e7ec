//! Pure arithmetic turning price samples into the values written back to
//! the project workbook.

use crate::logistix::slab::error::{Result, ToolError};
use crate::logistix::slab::model::{AggregatePrice, PriceSample};

/// Running sum and count; the only aggregates the calculation needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleStats {
    pub sum: f64,
    pub count: usize,
}

impl SampleStats {
    pub fn push(&mut self, sample: PriceSample) {
        self.sum += sample.value;
        self.count += 1;
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl FromIterator<PriceSample> for SampleStats {
    fn from_iter<I: IntoIterator<Item = PriceSample>>(iter: I) -> Self {
        let mut stats = SampleStats::default();
        for sample in iter {
            stats.push(sample);
        }
        stats
    }
}

/// Rounds to the nearest integer, ties to even (`2.5 -> 2`, `3.5 -> 4`).
pub fn round_price(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Derives the representative price.
///
/// The mean is a plain unweighted average of the samples. The adjusted local
/// price is the mean times `coefficient`; the foreign price divides the
/// adjusted (unrounded) local price by `exchange_rate`.
pub fn compute_aggregate(
    samples: &[PriceSample],
    coefficient: f64,
    exchange_rate: f64,
) -> Result<AggregatePrice> {
    let stats: SampleStats = samples.iter().copied().collect();
    let mean_local = stats.mean().ok_or(ToolError::EmptyInput)?;

    if exchange_rate.is_nan() || exchange_rate <= 0.0 {
        return Err(ToolError::DivisionByZero {
            rate: exchange_rate,
        });
    }

    let adjusted_local = mean_local * coefficient;
    let converted_foreign = adjusted_local / exchange_rate;

    Ok(AggregatePrice {
        mean_local,
        adjusted_local,
        converted_foreign,
        rounded_local: round_price(adjusted_local),
        rounded_foreign: round_price(converted_foreign),
    })
}
