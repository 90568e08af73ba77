use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::forecast::{QuantileBand, Resolution};

pub const DATA_TIMEZONE: &str = "UTC";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PayloadMetadata {
    pub location: String,
    pub forecast_timestamp: String,
    pub forecast_horizon_days: u32,
    pub available_resolutions: Vec<Resolution>,
    pub data_timezone: String,
    pub display_timezone: String,
    pub display_timezone_name: String,
    pub timezone_notice: String,
}

/// Percentile keys as exposed to API consumers
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyBands {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl From<QuantileBand> for UncertaintyBands {
    fn from(band: QuantileBand) -> Self {
        Self {
            p10: band.p10,
            p25: band.p25,
            p50: band.p50,
            p75: band.p75,
            p90: band.p90,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiPoint {
    /// ISO 8601, UTC
    pub timestamp: String,
    pub production_kw: f64,
    pub uncertainty_bands: UncertaintyBands,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub energy_kwh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub energy_uncertainty_bands: Option<UncertaintyBands>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResolutionPayload {
    pub resolution_minutes: u32,
    pub data_points: usize,
    pub data: Vec<ApiPoint>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Payload {
    pub metadata: PayloadMetadata,
    pub forecasts: BTreeMap<Resolution, ResolutionPayload>,
}
