use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::errors::ForecastError;

/// What to do with boundary buckets that hold fewer points than a full window
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartialBucketPolicy {
    /// Aggregate whatever points fall in the bucket
    #[serde(rename = "keep")]
    Keep,
    /// Leave incomplete buckets out of the aggregated series
    #[serde(rename = "drop")]
    Drop,
}

impl FromStr for PartialBucketPolicy {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" => Ok(PartialBucketPolicy::Keep),
            "drop" => Ok(PartialBucketPolicy::Drop),
            other => Err(ForecastError::config(format!(
                "partial bucket policy must be 'keep' or 'drop', got '{}'",
                other
            ))),
        }
    }
}

/// Configuration for aggregation behavior
#[derive(Clone, Debug)]
pub struct AggregatorsConfig {
    pub partial_buckets: PartialBucketPolicy,
    /// Allowed difference between recomputed and summed bucket energy before a drift warning
    pub energy_tolerance_mwh: f64,
}

impl Default for AggregatorsConfig {
    fn default() -> Self {
        Self {
            partial_buckets: PartialBucketPolicy::Keep,
            energy_tolerance_mwh: 1e-6,
        }
    }
}

impl AggregatorsConfig {
    pub fn new(partial_buckets: PartialBucketPolicy, energy_tolerance_mwh: f64) -> Self {
        Self {
            partial_buckets,
            energy_tolerance_mwh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("keep".parse::<PartialBucketPolicy>().unwrap(), PartialBucketPolicy::Keep);
        assert_eq!(" Drop ".parse::<PartialBucketPolicy>().unwrap(), PartialBucketPolicy::Drop);
        assert!("discard".parse::<PartialBucketPolicy>().is_err());
    }
}
