//! Reads the upstream base forecast CSV into a validated `ForecastSeries`.
//!
//! Accepted header layout:
//! - timestamp column named `timestamp`, `timestamp_utc` or left blank (pandas index export)
//! - required: `production_kw`, `q10`, `q25`, `q50`, `q75`, `q90`
//! - optional: `energy_mwh`, `energy_q10_mwh` .. `energy_q90_mwh`, `location`,
//!   `forecast_timestamp`, `resolution_minutes`

use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::forecast::resolution::Resolution;
use crate::forecast::types::{ForecastSeries, QuantileBand, SeriesMetadata, TimeSeriesPoint};
use crate::utils::errors::{ForecastError, ForecastResult};

pub const REQUIRED_COLUMNS: [&str; 7] = ["timestamp", "production_kw", "q10", "q25", "q50", "q75", "q90"];

const TIMESTAMP_ALIASES: [&str; 3] = ["", "timestamp_utc", "Unnamed: 0"];

#[derive(Deserialize, Debug)]
struct RawForecastRow {
    timestamp: String,
    production_kw: f64,
    q10: f64,
    q25: f64,
    q50: f64,
    q75: f64,
    q90: f64,
    energy_mwh: Option<f64>,
    energy_q10_mwh: Option<f64>,
    energy_q25_mwh: Option<f64>,
    energy_q50_mwh: Option<f64>,
    energy_q75_mwh: Option<f64>,
    energy_q90_mwh: Option<f64>,
    location: Option<String>,
    forecast_timestamp: Option<String>,
    resolution_minutes: Option<u32>,
}

impl RawForecastRow {
    /// Energy quantiles come as a complete group and require `energy_mwh` alongside them
    fn energy(&self) -> ForecastResult<(Option<f64>, Option<QuantileBand>)> {
        let quantiles = [
            self.energy_q10_mwh,
            self.energy_q25_mwh,
            self.energy_q50_mwh,
            self.energy_q75_mwh,
            self.energy_q90_mwh,
        ];

        match (self.energy_mwh, quantiles) {
            (energy_mwh, [None, None, None, None, None]) => Ok((energy_mwh, None)),
            (Some(e), [Some(p10), Some(p25), Some(p50), Some(p75), Some(p90)]) => {
                Ok((Some(e), Some(QuantileBand::new(p10, p25, p50, p75, p90))))
            }
            _ => Err(ForecastError::data_integrity(format!(
                "incomplete energy fields at {}",
                self.timestamp
            ))),
        }
    }
}

/// Parse RFC 3339, `YYYY-MM-DD HH:MM:SS[+HH:MM]` or naive timestamps (taken as UTC)
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn read_base_series<P: AsRef<Path>>(path: P) -> ForecastResult<ForecastSeries> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let series = read_series(reader)?;

    info!(
        "Loaded {} {} points from {}",
        series.len(),
        series.resolution(),
        path.display()
    );
    Ok(series)
}

pub fn read_series<R: Read>(mut reader: csv::Reader<R>) -> ForecastResult<ForecastSeries> {
    let headers = normalize_headers(reader.headers()?);

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ForecastError::data_integrity(format!("missing required column: {}", column)));
        }
    }

    let mut points = Vec::new();
    let mut metadata = SeriesMetadata::default();

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let row: RawForecastRow = record.deserialize(Some(&headers)).map_err(|e| {
            ForecastError::data_integrity(format!("row {}: {}", line + 1, e))
        })?;

        let timestamp = parse_utc_timestamp(&row.timestamp).ok_or_else(|| {
            ForecastError::data_integrity(format!("row {}: unparseable timestamp '{}'", line + 1, row.timestamp))
        })?;

        if points.is_empty() {
            metadata = SeriesMetadata {
                location: row.location.clone().filter(|l| !l.is_empty()),
                forecast_timestamp: row.forecast_timestamp.as_deref().and_then(parse_utc_timestamp),
                resolution_minutes: row.resolution_minutes,
            };
        }

        let mut point = TimeSeriesPoint::new(
            timestamp,
            row.production_kw,
            QuantileBand::new(row.q10, row.q25, row.q50, row.q75, row.q90),
        );
        (point.energy_mwh, point.energy_quantiles_mwh) = row.energy()?;
        points.push(point);
    }

    let resolution = infer_resolution(&points, metadata.resolution_minutes)?;
    debug!("Inferred {} spacing for {} rows", resolution, points.len());

    ForecastSeries::new(resolution, points, metadata)
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|h| if TIMESTAMP_ALIASES.contains(&h) { "timestamp" } else { h })
        .collect()
}

fn infer_resolution(points: &[TimeSeriesPoint], declared: Option<u32>) -> ForecastResult<Resolution> {
    match points {
        [first, second, ..] => {
            let minutes = (second.timestamp - first.timestamp).num_minutes();
            Resolution::from_minutes(minutes).ok_or_else(|| {
                ForecastError::data_integrity(format!("unsupported spacing of {} minutes", minutes))
            })
        }
        _ => match declared {
            Some(minutes) => Resolution::from_minutes(minutes as i64).ok_or_else(|| {
                ForecastError::data_integrity(format!("unsupported declared resolution of {} minutes", minutes))
            }),
            None => Ok(Resolution::BASE),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::types::SeriesSchema;
    use chrono::TimeZone;

    fn reader_for(content: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes())
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 7, 3, 10, 15, 0).unwrap();
        assert_eq!(parse_utc_timestamp("2025-07-03T10:15:00+00:00"), Some(expected));
        assert_eq!(parse_utc_timestamp("2025-07-03 12:15:00+02:00"), Some(expected));
        assert_eq!(parse_utc_timestamp("2025-07-03 10:15:00"), Some(expected));
        assert_eq!(parse_utc_timestamp("03/07/2025"), None);
    }

    #[test]
    fn test_reads_pandas_style_export_with_energy() {
        let content = "\
,production_kw,q10,q25,q50,q75,q90,energy_mwh,energy_q10_mwh,energy_q25_mwh,energy_q50_mwh,energy_q75_mwh,energy_q90_mwh,location,forecast_timestamp,resolution_minutes
2025-07-03 00:00:00+00:00,400,360,380,400,420,440,0.1,0.09,0.095,0.1,0.105,0.11,butimanu,2025-07-02 18:00:00+00:00,15
2025-07-03 00:15:00+00:00,800,720,760,800,840,880,0.2,0.18,0.19,0.2,0.21,0.22,butimanu,2025-07-02 18:00:00+00:00,15
";
        let series = read_series(reader_for(content)).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.resolution(), Resolution::FifteenMinutes);
        assert_eq!(series.schema(), SeriesSchema::WithEnergy);
        assert_eq!(series.metadata().location.as_deref(), Some("butimanu"));
        assert_eq!(
            series.metadata().forecast_timestamp,
            Some(Utc.with_ymd_and_hms(2025, 7, 2, 18, 0, 0).unwrap())
        );
        let point = &series.points()[1];
        assert_eq!(point.energy_mwh, Some(0.2));
        assert_eq!(point.energy_quantiles_mwh.unwrap().p90, 0.22);
    }

    #[test]
    fn test_reads_power_only_series() {
        let content = "\
timestamp,production_kw,q10,q25,q50,q75,q90
2025-07-03T00:00:00Z,0,0,0,0,0,0
2025-07-03T01:00:00Z,10,8,9,10,11,12
2025-07-03T02:00:00Z,20,16,18,20,22,24
";
        let series = read_series(reader_for(content)).unwrap();
        assert_eq!(series.resolution(), Resolution::OneHour);
        assert_eq!(series.schema(), SeriesSchema::PowerOnly);
        assert_eq!(series.metadata(), &SeriesMetadata::default());
    }

    #[test]
    fn test_missing_required_column_is_integrity_error() {
        let content = "timestamp,production_kw,q10,q25,q50,q75\n2025-07-03T00:00:00Z,1,1,1,1,1\n";
        let err = read_series(reader_for(content)).unwrap_err();
        assert!(matches!(err, ForecastError::DataIntegrity(_)));
        assert!(err.to_string().contains("q90"));
    }

    #[test]
    fn test_gap_is_detected() {
        let content = "\
timestamp,production_kw,q10,q25,q50,q75,q90
2025-07-03T00:00:00Z,1,1,1,1,1,1
2025-07-03T00:15:00Z,1,1,1,1,1,1
2025-07-03T00:45:00Z,1,1,1,1,1,1
";
        let err = read_series(reader_for(content)).unwrap_err();
        assert!(err.to_string().contains("gap"));
    }

    #[test]
    fn test_duplicate_and_partial_energy_are_rejected() {
        let duplicate = "\
timestamp,production_kw,q10,q25,q50,q75,q90
2025-07-03T00:00:00Z,1,1,1,1,1,1
2025-07-03T00:15:00Z,1,1,1,1,1,1
2025-07-03T00:15:00Z,1,1,1,1,1,1
";
        assert!(read_series(reader_for(duplicate)).unwrap_err().to_string().contains("duplicate"));

        let partial = "\
timestamp,production_kw,q10,q25,q50,q75,q90,energy_mwh,energy_q10_mwh
2025-07-03T00:00:00Z,1,1,1,1,1,1,0.1,0.09
";
        assert!(read_series(reader_for(partial)).unwrap_err().to_string().contains("incomplete energy"));
    }

    #[test]
    fn test_headline_energy_without_quantiles() {
        let content = "\
timestamp,production_kw,q10,q25,q50,q75,q90,energy_mwh
2025-07-03T00:00:00Z,1000,800,900,1000,1100,1200,1.0
2025-07-03T01:00:00Z,2000,1600,1800,2000,2200,2400,2.0
";
        let series = read_series(reader_for(content)).unwrap();
        assert_eq!(series.schema(), SeriesSchema::WithHeadlineEnergy);
        assert_eq!(series.points()[1].energy_mwh, Some(2.0));
    }

    #[test]
    fn test_empty_file_yields_empty_base_series() {
        let content = "timestamp,production_kw,q10,q25,q50,q75,q90\n";
        let series = read_series(reader_for(content)).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.resolution(), Resolution::BASE);
    }

    #[test]
    fn test_read_base_series_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.csv");
        std::fs::write(
            &path,
            "timestamp,production_kw,q10,q25,q50,q75,q90\n2025-07-03T00:00:00Z,5,4,4.5,5,5.5,6\n",
        )
        .unwrap();

        let series = read_base_series(&path).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].quantiles.p25, 4.5);
    }
}
