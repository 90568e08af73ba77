use tracing::{debug, error, info, warn};

use crate::aggregators::aggregation_block::AggregationBlock;
use crate::aggregators::config::{AggregatorsConfig, PartialBucketPolicy};
use crate::forecast::{ForecastSeries, Resolution, ResolutionMap, SeriesMetadata};
use crate::utils::errors::{ForecastError, ForecastResult};

/// Aggregate `series` to every requested resolution.
///
/// Unsupported identifiers are logged and left out of the map. A resolution that fails to
/// aggregate maps to an empty series so the remaining resolutions are still produced. Fails only
/// when none of the requested identifiers is supported.
pub fn aggregate(
    series: &ForecastSeries,
    resolutions: &[String],
    config: &AggregatorsConfig,
) -> ForecastResult<ResolutionMap> {
    info!("Aggregating forecast to resolutions: {:?}", resolutions);

    let mut aggregated = ResolutionMap::new();

    for raw in resolutions {
        let resolution = match raw.parse::<Resolution>() {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!("{}, skipping", e);
                continue;
            }
        };

        if aggregated.contains_key(&resolution) {
            debug!("{} requested more than once", resolution);
            continue;
        }

        debug!("Aggregating to {}", resolution);
        let result = match aggregate_to_resolution(series, resolution, config) {
            Ok(result) => result,
            Err(e) => {
                error!("Failed to aggregate to {}: {}", resolution, e);
                ForecastSeries::empty(resolution, series.schema().aggregated(), declared_metadata(series, resolution))
            }
        };
        aggregated.insert(resolution, result);
    }

    if aggregated.is_empty() {
        return Err(ForecastError::config(format!(
            "none of the requested resolutions are supported: {:?}",
            resolutions
        )));
    }

    Ok(aggregated)
}

/// Aggregate to a single resolution, passing the series through when it already has that width
pub fn aggregate_to_resolution(
    series: &ForecastSeries,
    resolution: Resolution,
    config: &AggregatorsConfig,
) -> ForecastResult<ForecastSeries> {
    if resolution == series.resolution() {
        return Ok(series.clone());
    }

    if resolution < series.resolution() {
        return Err(ForecastError::config(format!(
            "cannot aggregate a {} series down to {}",
            series.resolution(),
            resolution
        )));
    }

    let blocks = AggregationBlock::partition(series, resolution);
    let total_blocks = blocks.len();

    let points = blocks
        .iter()
        .filter(|block| match config.partial_buckets {
            PartialBucketPolicy::Keep => true,
            PartialBucketPolicy::Drop => block.is_complete(),
        })
        .map(|block| block.process(series.schema(), config.energy_tolerance_mwh))
        .collect::<ForecastResult<Vec<_>>>()?;

    if points.len() < total_blocks {
        debug!(
            "Dropped {} partial {} buckets",
            total_blocks - points.len(),
            resolution
        );
    }

    if points.is_empty() {
        return Ok(ForecastSeries::empty(
            resolution,
            series.schema().aggregated(),
            declared_metadata(series, resolution),
        ));
    }

    ForecastSeries::new(resolution, points, declared_metadata(series, resolution))
}

/// Source metadata with the declared width rewritten to the target resolution
fn declared_metadata(series: &ForecastSeries, resolution: Resolution) -> SeriesMetadata {
    SeriesMetadata {
        resolution_minutes: Some(resolution.minutes()),
        ..series.metadata().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregators::aggregation_block::bucket_start;
    use crate::forecast::types::test_support::*;
    use crate::forecast::SeriesSchema;
    use chrono::Duration;

    fn all_levels() -> Vec<String> {
        Resolution::ALL.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_seven_day_horizon_point_counts() {
        let series = base_series(start_of(2025, 7, 3), 672, true);
        let map = aggregate(&series, &all_levels(), &AggregatorsConfig::default()).unwrap();

        assert_eq!(map.len(), 6);
        assert_eq!(map[&Resolution::FifteenMinutes].len(), 672);
        assert_eq!(map[&Resolution::ThirtyMinutes].len(), 336);
        assert_eq!(map[&Resolution::OneHour].len(), 168);
        assert_eq!(map[&Resolution::ThreeHours].len(), 56);
        assert_eq!(map[&Resolution::SixHours].len(), 28);
        assert_eq!(map[&Resolution::OneDay].len(), 7);
    }

    #[test]
    fn test_bucket_energy_equals_sum_of_base_energy() {
        let series = base_series(start_of(2025, 7, 3), 672, true);
        let map = aggregate(&series, &all_levels(), &AggregatorsConfig::default()).unwrap();

        for (resolution, aggregated) in map.iter().filter(|(r, _)| **r != Resolution::BASE) {
            for point in aggregated.points() {
                let base_sum: f64 = series
                    .points()
                    .iter()
                    .filter(|p| bucket_start(p.timestamp, *resolution) == point.timestamp)
                    .map(|p| p.energy_mwh.unwrap())
                    .sum();

                let energy = point.energy_mwh.unwrap();
                assert!(
                    (energy - base_sum).abs() < 1e-6,
                    "{} bucket {}: {} != {}",
                    resolution,
                    point.timestamp,
                    energy,
                    base_sum
                );
            }
        }
    }

    #[test]
    fn test_mean_fields_equal_arithmetic_mean() {
        let series = base_series(start_of(2025, 7, 3), 96, false);
        let hourly = aggregate_to_resolution(&series, Resolution::OneHour, &AggregatorsConfig::default()).unwrap();

        for (i, point) in hourly.points().iter().enumerate() {
            let chunk = &series.points()[i * 4..i * 4 + 4];
            let expected_power = chunk.iter().map(|p| p.production_kw).sum::<f64>() / 4.0;
            let expected_p75 = chunk.iter().map(|p| p.quantiles.p75).sum::<f64>() / 4.0;
            assert!((point.production_kw - expected_power).abs() < 1e-9);
            assert!((point.quantiles.p75 - expected_p75).abs() < 1e-9);
        }
    }

    #[test]
    fn test_power_only_input_gains_recomputed_energy() {
        let series = base_series(start_of(2025, 7, 3), 96, false);
        let map = aggregate(&series, &all_levels(), &AggregatorsConfig::default()).unwrap();

        assert_eq!(map[&Resolution::FifteenMinutes].schema(), SeriesSchema::PowerOnly);
        for (resolution, aggregated) in map.iter().filter(|(r, _)| **r != Resolution::BASE) {
            assert_eq!(aggregated.schema(), SeriesSchema::WithHeadlineEnergy);
            for point in aggregated.points() {
                let expected = point.production_kw / 1000.0 * resolution.hours();
                assert!((point.energy_mwh.unwrap() - expected).abs() < 1e-12);
                assert!(point.energy_quantiles_mwh.is_none());
            }
        }

        let hourly = &map[&Resolution::OneHour];
        assert_eq!(hourly.len(), 24);
        assert!(hourly.points()[12].energy_mwh.unwrap() > 0.0);
    }

    #[test]
    fn test_hourly_to_hourly_is_unchanged() {
        let series = base_series(start_of(2025, 7, 3), 672, true);
        let config = AggregatorsConfig::default();
        let hourly = aggregate_to_resolution(&series, Resolution::OneHour, &config).unwrap();

        let again = aggregate(&hourly, &["1hour".to_string()], &config).unwrap();
        assert_eq!(again[&Resolution::OneHour], hourly);
    }

    #[test]
    fn test_empty_series_yields_empty_outputs() {
        let series = base_series(start_of(2025, 7, 3), 0, false);
        let map = aggregate(&series, &all_levels(), &AggregatorsConfig::default()).unwrap();

        assert_eq!(map.len(), 6);
        for (resolution, aggregated) in &map {
            assert!(aggregated.is_empty());
            assert_eq!(aggregated.resolution(), *resolution);
        }
        assert_eq!(map[&Resolution::OneHour].schema(), SeriesSchema::WithHeadlineEnergy);
    }

    #[test]
    fn test_declared_resolution_matches_width() {
        let series = base_series(start_of(2025, 7, 3), 10, true);
        let map = aggregate(&series, &all_levels(), &AggregatorsConfig::default()).unwrap();

        for (resolution, aggregated) in &map {
            assert_eq!(aggregated.metadata().resolution_minutes, Some(resolution.minutes()));
            assert_eq!(aggregated.metadata().location.as_deref(), Some("butimanu"));
        }
        assert_eq!(map[&Resolution::OneDay].len(), 1);
    }

    #[test]
    fn test_unsupported_resolution_is_skipped() {
        let series = base_series(start_of(2025, 7, 3), 8, false);
        let requested = vec!["1hour".to_string(), "2hour".to_string(), "1hour".to_string()];
        let map = aggregate(&series, &requested, &AggregatorsConfig::default()).unwrap();

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![Resolution::OneHour]);
    }

    #[test]
    fn test_only_unsupported_resolutions_fail() {
        let series = base_series(start_of(2025, 7, 3), 8, false);
        let err = aggregate(&series, &["weekly".to_string()], &AggregatorsConfig::default()).unwrap_err();
        assert!(matches!(err, ForecastError::Config(_)));
    }

    #[test]
    fn test_finer_resolution_fails_only_that_entry() {
        let series = base_series(start_of(2025, 7, 3), 96, true);
        let hourly = aggregate_to_resolution(&series, Resolution::OneHour, &AggregatorsConfig::default()).unwrap();

        let requested = vec!["15min".to_string(), "6hour".to_string()];
        let map = aggregate(&hourly, &requested, &AggregatorsConfig::default()).unwrap();

        assert!(map[&Resolution::FifteenMinutes].is_empty());
        assert_eq!(map[&Resolution::FifteenMinutes].schema(), SeriesSchema::WithEnergy);
        assert_eq!(map[&Resolution::SixHours].len(), 4);
    }

    #[test]
    fn test_partial_boundary_buckets() {
        // 01:30 .. 03:15, so the first and last hourly buckets hold two points each
        let start = start_of(2025, 7, 3) + Duration::minutes(90);
        let series = base_series(start, 8, false);

        let kept = aggregate_to_resolution(&series, Resolution::OneHour, &AggregatorsConfig::default()).unwrap();
        assert_eq!(kept.len(), 3);
        let first_two = &series.points()[0..2];
        let expected = (first_two[0].production_kw + first_two[1].production_kw) / 2.0;
        assert!((kept.points()[0].production_kw - expected).abs() < 1e-9);
        assert_eq!(kept.points()[0].timestamp, start_of(2025, 7, 3) + Duration::hours(1));

        let config = AggregatorsConfig::new(PartialBucketPolicy::Drop, 1e-6);
        let dropped = aggregate_to_resolution(&series, Resolution::OneHour, &config).unwrap();
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped.points()[0].timestamp, start_of(2025, 7, 3) + Duration::hours(2));
    }

    #[test]
    fn test_horizon_shorter_than_resolution() {
        let series = base_series(start_of(2025, 7, 3), 8, true);
        let daily = aggregate_to_resolution(&series, Resolution::OneDay, &AggregatorsConfig::default()).unwrap();

        assert_eq!(daily.len(), 1);
        let mean_power = series.points().iter().map(|p| p.production_kw).sum::<f64>() / 8.0;
        let energy_mwh = daily.points()[0].energy_mwh.unwrap();
        assert!((energy_mwh - mean_power / 1000.0 * 24.0).abs() < 1e-9);
    }
}
