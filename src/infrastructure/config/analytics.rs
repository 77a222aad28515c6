//! Analytics tuning configuration.

use serde::{Deserialize, Serialize};

use crate::application::insights::InsightsOptions;
use crate::domain::forecast::DEFAULT_FORECAST_WINDOW;
use crate::domain::insight::{DEFAULT_NEAR_EXPIRY_DAYS, DEFAULT_TOP_FOODS};
use crate::domain::risk::DEFAULT_RISK_TOP_N;

/// `[analytics]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Rows kept in the waste-risk ranking.
    pub risk_top_n: usize,
    /// Near-expiry horizon in days, inclusive.
    pub near_expiry_days: i64,
    /// Months averaged by the naive forecast.
    pub forecast_window: usize,
    pub top_foods: usize,
}

impl AnalyticsConfig {
    /// Insights options for an optional city filter.
    #[must_use]
    pub fn insights_options(&self, city: Option<String>) -> InsightsOptions {
        InsightsOptions {
            city,
            risk_top_n: self.risk_top_n,
            near_expiry_days: self.near_expiry_days,
            forecast_window: self.forecast_window,
            top_foods: self.top_foods,
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_top_n: DEFAULT_RISK_TOP_N,
            near_expiry_days: DEFAULT_NEAR_EXPIRY_DAYS,
            forecast_window: DEFAULT_FORECAST_WINDOW,
            top_foods: DEFAULT_TOP_FOODS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_domain_constants() {
        let options = AnalyticsConfig::default().insights_options(None);
        assert_eq!(options, InsightsOptions::default());
    }

    #[test]
    fn city_is_carried_into_options() {
        let options = AnalyticsConfig::default().insights_options(Some("Pune".into()));
        assert_eq!(options.city.as_deref(), Some("Pune"));
    }
}
