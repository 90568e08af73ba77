use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ForecastQuality {
    High,
    Medium,
    Low,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ForecastPeriod {
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration_hours: f64,
    pub duration_days: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CapacityAnalysis {
    pub capacity_kw: f64,
    pub peak_production_kw: f64,
    pub average_production_kw: f64,
    pub capacity_factor: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EnergyAnalysis {
    pub total_energy_kwh: f64,
    pub daily_average_kwh: f64,
    pub peak_day_kwh: f64,
    pub energy_p10_kwh: f64,
    pub energy_p90_kwh: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UncertaintyAnalysis {
    pub average_uncertainty_kw: f64,
    pub relative_uncertainty_pct: f64,
    pub max_uncertainty_kw: f64,
    pub uncertainty_range_kwh: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct OperationalInsights {
    pub producing_hours: f64,
    pub non_producing_hours: f64,
    pub peak_production_time: Option<String>,
    pub generation_efficiency: f64,
    pub forecast_quality: Option<ForecastQuality>,
}

/// Point-in-time snapshot of one location's forecast, identified by `report_timestamp`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub location: String,
    pub report_timestamp: String,
    pub forecast_period: ForecastPeriod,
    pub capacity_analysis: CapacityAnalysis,
    pub energy_analysis: EnergyAnalysis,
    pub uncertainty_analysis: UncertaintyAnalysis,
    pub operational_insights: OperationalInsights,
}
