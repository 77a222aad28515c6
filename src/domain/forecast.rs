//! Monthly donation trend and a naive next-month forecast.
//!
//! The forecast is a baseline, not a model: it is the mean of the most recent
//! `window` monthly counts, rounded to the nearest integer (ties to even). No
//! seasonality, no trend extrapolation, no confidence interval.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Number of trailing months averaged by default.
pub const DEFAULT_FORECAST_WINDOW: usize = 3;

/// Count of listings whose expiry falls in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM` key.
    pub month: String,
    pub donations: u64,
}

/// A forecast together with the months it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaiveForecast {
    pub value: u64,
    pub mean: f64,
    pub months_used: Vec<MonthlyCount>,
}

/// Group dates by calendar month and count them, oldest month first.
#[must_use]
pub fn monthly_trend<I>(dates: I) -> Vec<MonthlyCount>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for date in dates {
        *buckets.entry((date.year(), date.month())).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|((year, month), donations)| MonthlyCount {
            month: format!("{year:04}-{month:02}"),
            donations,
        })
        .collect()
}

/// Mean of the last `window` counts, or `None` for an empty series.
///
/// Shorter series average whatever is available. A `window` of zero is
/// treated as one.
#[must_use]
pub fn naive_forecast(series: &[MonthlyCount], window: usize) -> Option<NaiveForecast> {
    if series.is_empty() {
        return None;
    }

    let window = window.max(1).min(series.len());
    let tail = &series[series.len() - window..];
    let total: u64 = tail.iter().map(|m| m.donations).sum();
    let mean = total as f64 / tail.len() as f64;

    Some(NaiveForecast {
        value: mean.round_ties_even() as u64,
        mean,
        months_used: tail.to_vec(),
    })
}
