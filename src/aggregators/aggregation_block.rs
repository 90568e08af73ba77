use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::{debug, warn};

use crate::forecast::{ForecastSeries, QuantileBand, Resolution, SeriesSchema, TimeSeriesPoint};
use crate::utils::commons::mean;
use crate::utils::errors::{ForecastError, ForecastResult};

/*
 * Mechanic:
 * - every timestamp maps to the start of the calendar bucket containing it, counted in whole
 *   bucket widths from UTC midnight (widths all divide a day, so buckets never straddle midnight)
 * - consecutive points sharing a bucket start form one AggregationBlock
 * - a block reduces to a single point: mean for power and quantiles, sum for energy quantiles,
 *   and headline energy recomputed from the mean power over the bucket width
 */

/// Start of the calendar-aligned bucket of width `resolution` containing `timestamp`
pub fn bucket_start(timestamp: DateTime<Utc>, resolution: Resolution) -> DateTime<Utc> {
    let midnight = timestamp.date_naive().and_time(NaiveTime::MIN).and_utc();
    let width = resolution.minutes() as i64;
    let minute_of_day = (timestamp - midnight).num_minutes();

    midnight + Duration::minutes(minute_of_day / width * width)
}

#[derive(Clone, Debug)]
pub struct AggregationBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub index: u64,
    pub resolution: Resolution,
    /// Number of source points a complete bucket holds
    pub expected_points: usize,
    pub points: Vec<TimeSeriesPoint>,
}

impl AggregationBlock {
    /// Split a series into consecutive calendar buckets of `resolution`
    pub fn partition(series: &ForecastSeries, resolution: Resolution) -> Vec<AggregationBlock> {
        let expected_points = (resolution.minutes() / series.resolution().minutes()).max(1) as usize;
        let mut blocks: Vec<AggregationBlock> = Vec::new();

        for point in series.points() {
            let start = bucket_start(point.timestamp, resolution);

            match blocks.last_mut() {
                Some(block) if block.start == start => block.points.push(point.clone()),
                _ => blocks.push(AggregationBlock {
                    start,
                    end: start + resolution.duration(),
                    index: blocks.len() as u64,
                    resolution,
                    expected_points,
                    points: vec![point.clone()],
                }),
            }
        }

        blocks
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= self.expected_points
    }

    pub fn process(&self, schema: SeriesSchema, energy_tolerance_mwh: f64) -> ForecastResult<TimeSeriesPoint> {
        if self.points.is_empty() {
            return Err(ForecastError::data_integrity(format!(
                "bucket {} starting {} has no points",
                self.index, self.start
            )));
        }

        let powers: Vec<f64> = self.points.iter().map(|p| p.production_kw).collect();
        let bands: Vec<QuantileBand> = self.points.iter().map(|p| p.quantiles).collect();

        let mean_power = mean(&powers);
        let mut point = TimeSeriesPoint::new(self.start, mean_power, QuantileBand::reduce(&bands, mean));

        // Authoritative bucket energy, derived from mean power rather than any summed column
        let energy_mwh = mean_power / 1000.0 * self.resolution.hours();

        if schema != SeriesSchema::PowerOnly {
            let summed_mwh = self
                .points
                .iter()
                .map(|p| {
                    p.energy_mwh.ok_or_else(|| {
                        ForecastError::data_integrity(format!("energy_mwh missing at {}", p.timestamp))
                    })
                })
                .sum::<ForecastResult<f64>>()?;
            self.log_energy_drift(energy_mwh, summed_mwh, energy_tolerance_mwh);
        }

        let quantiles_mwh = if schema == SeriesSchema::WithEnergy {
            let energy_bands = self
                .points
                .iter()
                .map(|p| {
                    p.energy_quantiles_mwh.ok_or_else(|| {
                        ForecastError::data_integrity(format!("energy quantiles missing at {}", p.timestamp))
                    })
                })
                .collect::<ForecastResult<Vec<QuantileBand>>>()?;
            Some(QuantileBand::reduce(&energy_bands, |values| values.iter().sum()))
        } else {
            None
        };

        point = point.with_energy(energy_mwh, quantiles_mwh);

        if !point.production_kw.is_finite() || !point.quantiles.is_finite() {
            return Err(ForecastError::data_integrity(format!(
                "non-finite aggregate in bucket starting {}",
                self.start
            )));
        }

        Ok(point)
    }

    fn log_energy_drift(&self, energy_mwh: f64, summed_mwh: f64, tolerance_mwh: f64) {
        let drift = (energy_mwh - summed_mwh).abs();
        if drift <= tolerance_mwh {
            return;
        }

        if self.is_complete() {
            warn!(
                "Energy drift of {:.9} MWh in {} bucket starting {} (recomputed {:.6}, summed {:.6})",
                drift, self.resolution, self.start, energy_mwh, summed_mwh
            );
        } else {
            debug!(
                "Partial {} bucket starting {} holds {}/{} points, recomputed energy exceeds sum by {:.6} MWh",
                self.resolution,
                self.start,
                self.points.len(),
                self.expected_points,
                drift
            );
        }
    }
}
