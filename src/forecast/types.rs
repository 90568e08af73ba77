use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::forecast::resolution::Resolution;
use crate::utils::errors::{ForecastError, ForecastResult};

/// Forecast distribution at the five reported percentiles
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct QuantileBand {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl QuantileBand {
    pub fn new(p10: f64, p25: f64, p50: f64, p75: f64, p90: f64) -> Self {
        Self { p10, p25, p50, p75, p90 }
    }

    /// p90 - p10
    pub fn spread(&self) -> f64 {
        self.p90 - self.p10
    }

    pub fn values(&self) -> [f64; 5] {
        [self.p10, self.p25, self.p50, self.p75, self.p90]
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            p10: f(self.p10),
            p25: f(self.p25),
            p50: f(self.p50),
            p75: f(self.p75),
            p90: f(self.p90),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.values().iter().all(|v| v.is_finite())
    }

    /// Column-wise reduction over a set of bands
    pub fn reduce(bands: &[QuantileBand], f: impl Fn(&[f64]) -> f64) -> Self {
        let column = |pick: fn(&QuantileBand) -> f64| -> f64 {
            let values: Vec<f64> = bands.iter().map(pick).collect();
            f(&values)
        };

        Self {
            p10: column(|b| b.p10),
            p25: column(|b| b.p25),
            p50: column(|b| b.p50),
            p75: column(|b| b.p75),
            p90: column(|b| b.p90),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub production_kw: f64,
    pub quantiles: QuantileBand,
    /// Integrated energy over the point's interval, in MWh
    pub energy_mwh: Option<f64>,
    pub energy_quantiles_mwh: Option<QuantileBand>,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, production_kw: f64, quantiles: QuantileBand) -> Self {
        Self {
            timestamp,
            production_kw,
            quantiles,
            energy_mwh: None,
            energy_quantiles_mwh: None,
        }
    }

    pub fn with_energy(mut self, energy_mwh: f64, quantiles_mwh: Option<QuantileBand>) -> Self {
        self.energy_mwh = Some(energy_mwh);
        self.energy_quantiles_mwh = quantiles_mwh;
        self
    }

    fn schema(&self) -> Option<SeriesSchema> {
        match (self.energy_mwh, self.energy_quantiles_mwh) {
            (None, None) => Some(SeriesSchema::PowerOnly),
            (Some(_), None) => Some(SeriesSchema::WithHeadlineEnergy),
            (Some(_), Some(_)) => Some(SeriesSchema::WithEnergy),
            (None, Some(_)) => None,
        }
    }

    fn is_finite(&self) -> bool {
        self.production_kw.is_finite()
            && self.quantiles.is_finite()
            && self.energy_mwh.map(f64::is_finite).unwrap_or(true)
            && self.energy_quantiles_mwh.map(|q| q.is_finite()).unwrap_or(true)
    }
}

/// Which integrated-energy fields a series carries. Decided once when the series is built.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSchema {
    PowerOnly,
    /// Headline energy only, as recomputed for buckets aggregated from power-only input
    WithHeadlineEnergy,
    /// Headline energy plus the five energy quantiles
    WithEnergy,
}

impl SeriesSchema {
    /// Schema of a series aggregated from this one. Coarser buckets always carry headline energy.
    pub fn aggregated(self) -> Self {
        match self {
            SeriesSchema::WithEnergy => SeriesSchema::WithEnergy,
            SeriesSchema::PowerOnly | SeriesSchema::WithHeadlineEnergy => SeriesSchema::WithHeadlineEnergy,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SeriesMetadata {
    pub location: Option<String>,
    pub forecast_timestamp: Option<DateTime<Utc>>,
    pub resolution_minutes: Option<u32>,
}

/// Gapless, strictly increasing forecast points at a fixed spacing.
///
/// Fields are private so every series in the system has passed `ForecastSeries::new`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    resolution: Resolution,
    schema: SeriesSchema,
    metadata: SeriesMetadata,
    points: Vec<TimeSeriesPoint>,
}

impl ForecastSeries {
    pub fn new(
        resolution: Resolution,
        points: Vec<TimeSeriesPoint>,
        metadata: SeriesMetadata,
    ) -> ForecastResult<Self> {
        let schema = match points.first() {
            Some(p) => p.schema().ok_or_else(|| {
                ForecastError::data_integrity(format!("energy quantiles without energy_mwh at {}", p.timestamp))
            })?,
            None => SeriesSchema::PowerOnly,
        };

        if let Some(declared) = metadata.resolution_minutes {
            if declared != resolution.minutes() {
                return Err(ForecastError::data_integrity(format!(
                    "declared resolution of {} minutes does not match {} spacing",
                    declared, resolution
                )));
            }
        }

        for point in &points {
            if !point.is_finite() {
                return Err(ForecastError::data_integrity(format!(
                    "non-finite value at {}",
                    point.timestamp
                )));
            }
            if point.schema() != Some(schema) {
                return Err(ForecastError::data_integrity(format!(
                    "energy fields present on some points but not others (first mismatch at {})",
                    point.timestamp
                )));
            }
        }

        let spacing = resolution.duration();
        for pair in points.windows(2) {
            let (prev, next) = (pair[0].timestamp, pair[1].timestamp);
            if next == prev {
                return Err(ForecastError::data_integrity(format!("duplicate timestamp {}", next)));
            }
            if next < prev {
                return Err(ForecastError::data_integrity(format!(
                    "timestamps out of order: {} after {}",
                    next, prev
                )));
            }
            if next - prev != spacing {
                return Err(ForecastError::data_integrity(format!(
                    "gap between {} and {} (expected {} spacing)",
                    prev, next, resolution
                )));
            }
        }

        Ok(Self {
            resolution,
            schema,
            metadata,
            points,
        })
    }

    pub fn empty(resolution: Resolution, schema: SeriesSchema, metadata: SeriesMetadata) -> Self {
        Self {
            resolution,
            schema,
            metadata,
            points: Vec::new(),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn schema(&self) -> SeriesSchema {
        self.schema
    }

    /// Headline energy present on every point
    pub fn has_energy(&self) -> bool {
        self.schema != SeriesSchema::PowerOnly
    }

    pub fn has_energy_quantiles(&self) -> bool {
        self.schema == SeriesSchema::WithEnergy
    }

    pub fn metadata(&self) -> &SeriesMetadata {
        &self.metadata
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TimeSeriesPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }
}

/// Aggregated series keyed by resolution, iterated finest to coarsest
pub type ResolutionMap = BTreeMap<Resolution, ForecastSeries>;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::{Duration, TimeZone};

    pub fn start_of(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    /// Bell-shaped daytime production with a symmetric uncertainty band
    pub fn solar_profile(timestamp: DateTime<Utc>) -> f64 {
        use chrono::Timelike;
        let hour = timestamp.hour() as f64 + timestamp.minute() as f64 / 60.0;
        if !(5.0..19.0).contains(&hour) {
            return 0.0;
        }
        let x = (hour - 12.0) / 7.0;
        (1.0 - x * x) * 8000.0
    }

    pub fn point_at(timestamp: DateTime<Utc>, production_kw: f64) -> TimeSeriesPoint {
        TimeSeriesPoint::new(
            timestamp,
            production_kw,
            QuantileBand::new(
                production_kw * 0.8,
                production_kw * 0.9,
                production_kw,
                production_kw * 1.1,
                production_kw * 1.2,
            ),
        )
    }

    /// Energy consistent with power held over the point's interval
    pub fn with_consistent_energy(point: TimeSeriesPoint, resolution: Resolution) -> TimeSeriesPoint {
        let to_mwh = |kw: f64| kw / 1000.0 * resolution.hours();
        let energy_mwh = to_mwh(point.production_kw);
        let quantiles_mwh = point.quantiles.map(to_mwh);
        point.with_energy(energy_mwh, Some(quantiles_mwh))
    }

    pub fn base_series(start: DateTime<Utc>, count: usize, with_energy: bool) -> ForecastSeries {
        let resolution = Resolution::FifteenMinutes;
        let points = (0..count)
            .map(|i| {
                let ts = start + Duration::minutes(15 * i as i64);
                let point = point_at(ts, solar_profile(ts));
                if with_energy {
                    with_consistent_energy(point, resolution)
                } else {
                    point
                }
            })
            .collect();

        let metadata = SeriesMetadata {
            location: Some("butimanu".to_string()),
            forecast_timestamp: Some(start - Duration::hours(6)),
            resolution_minutes: Some(15),
        };

        ForecastSeries::new(resolution, points, metadata).unwrap()
    }

    pub fn hourly_series(start: DateTime<Utc>, values: &[f64]) -> ForecastSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| point_at(start + Duration::hours(i as i64), *v))
            .collect();
        ForecastSeries::new(Resolution::OneHour, points, SeriesMetadata::default()).unwrap()
    }
}
