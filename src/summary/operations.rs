use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::forecast::{ForecastSeries, Location, Resolution, TimeSeriesPoint};
use crate::summary::config::SummaryConfig;
use crate::summary::types::{
    CapacityAnalysis, EnergyAnalysis, ForecastPeriod, ForecastQuality, OperationalInsights, SummaryReport,
    UncertaintyAnalysis,
};
use crate::utils::commons::{mean, round_to, write_json_pretty};
use crate::utils::errors::ForecastResult;

/// Summarize one aggregated series, normally the hourly one.
///
/// Energy figures integrate power over each interval, so on an hourly series a kW value counts
/// as the same number of kWh. An empty series produces zeros and no timestamps.
pub fn summarize(
    series: &ForecastSeries,
    location: &Location,
    generated_at: DateTime<Utc>,
    config: &SummaryConfig,
) -> SummaryReport {
    if series.resolution() != Resolution::OneHour {
        warn!("Summarizing a {} series, hourly is expected", series.resolution());
    }

    let hours = series.resolution().hours();
    let points = series.points();
    let power: Vec<f64> = points.iter().map(|p| p.production_kw).collect();
    let spreads: Vec<f64> = points.iter().map(|p| p.quantiles.spread()).collect();

    let duration_hours = match (series.first(), series.last()) {
        (Some(first), Some(last)) => {
            (last.timestamp - first.timestamp + series.resolution().duration()).num_minutes() as f64 / 60.0
        }
        _ => 0.0,
    };
    let duration_days = duration_hours / 24.0;

    let pw = |v: f64| round_to(v, config.power_decimals);
    let en = |v: f64| round_to(v, config.energy_decimals);

    let peak = points
        .iter()
        .fold(None, |best: Option<&TimeSeriesPoint>, p| match best {
            Some(b) if b.production_kw >= p.production_kw => Some(b),
            _ => Some(p),
        });
    let peak_production_kw = peak.map(|p| p.production_kw).unwrap_or(0.0);
    let average_production_kw = mean(&power);

    let capacity_kw = location.capacity_kw.unwrap_or(0.0);
    let capacity_factor = if capacity_kw > 0.0 {
        average_production_kw / capacity_kw
    } else {
        0.0
    };

    let total_energy_kwh = power.iter().sum::<f64>() * hours;
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for point in points {
        *daily.entry(point.timestamp.date_naive()).or_default() += point.production_kw * hours;
    }
    let peak_day_kwh = daily.values().copied().reduce(f64::max).unwrap_or(0.0);
    let daily_average_kwh = if duration_days > 0.0 {
        total_energy_kwh / duration_days
    } else {
        0.0
    };

    let average_uncertainty_kw = mean(&spreads);
    let relative_uncertainty =
        average_uncertainty_kw / (average_production_kw + config.relative_uncertainty_epsilon_kw);

    let producing = power.iter().filter(|kw| **kw > config.producing_threshold_kw).count();
    let producing_hours = producing as f64 * hours;

    SummaryReport {
        location: location.key.clone(),
        report_timestamp: generated_at.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        forecast_period: ForecastPeriod {
            start: series.first().map(|p| iso(p.timestamp)),
            end: series.last().map(|p| iso(p.timestamp)),
            duration_hours,
            duration_days,
        },
        capacity_analysis: CapacityAnalysis {
            capacity_kw: pw(capacity_kw),
            peak_production_kw: pw(peak_production_kw),
            average_production_kw: pw(average_production_kw),
            capacity_factor: pw(capacity_factor),
        },
        energy_analysis: EnergyAnalysis {
            total_energy_kwh: en(total_energy_kwh),
            daily_average_kwh: en(daily_average_kwh),
            peak_day_kwh: en(peak_day_kwh),
            energy_p10_kwh: en(points.iter().map(|p| p.quantiles.p10).sum::<f64>() * hours),
            energy_p90_kwh: en(points.iter().map(|p| p.quantiles.p90).sum::<f64>() * hours),
        },
        uncertainty_analysis: UncertaintyAnalysis {
            average_uncertainty_kw: pw(average_uncertainty_kw),
            relative_uncertainty_pct: en(relative_uncertainty * 100.0),
            max_uncertainty_kw: pw(spreads.iter().copied().reduce(f64::max).unwrap_or(0.0)),
            uncertainty_range_kwh: en(spreads.iter().sum::<f64>() * hours),
        },
        operational_insights: OperationalInsights {
            producing_hours,
            non_producing_hours: (points.len() - producing) as f64 * hours,
            peak_production_time: peak.map(|p| iso(p.timestamp)),
            generation_efficiency: if points.is_empty() {
                0.0
            } else {
                pw(producing as f64 / points.len() as f64)
            },
            forecast_quality: (!points.is_empty()).then(|| quality_label(relative_uncertainty, config)),
        },
    }
}

pub fn quality_label(relative_uncertainty: f64, config: &SummaryConfig) -> ForecastQuality {
    if relative_uncertainty < config.high_quality_threshold {
        ForecastQuality::High
    } else if relative_uncertainty < config.medium_quality_threshold {
        ForecastQuality::Medium
    } else {
        ForecastQuality::Low
    }
}

fn iso(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}

pub fn export_json_summary(report: &SummaryReport, path: &Path) -> ForecastResult<PathBuf> {
    write_json_pretty(report, path)?;
    info!("Summary report exported to: {}", path.display());
    Ok(path.to_path_buf())
}
