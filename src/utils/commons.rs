use chrono_tz::Tz;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::utils::errors::{ForecastError, ForecastResult};

/// Round to a fixed number of decimal places, half away from zero. Never returns `-0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    // Adding positive zero turns -0.0 into 0.0 and leaves every other value unchanged
    (value * factor).round() / factor + 0.0
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn parse_timezone(name: &str) -> ForecastResult<Tz> {
    name.parse::<Tz>()
        .map_err(|e| ForecastError::InvalidTimezone(name.to_string(), e.to_string()))
}

/// Serialize `value` as pretty JSON into `path`, creating parent directories as needed.
///
/// The writer is flushed before returning so a failed flush is reported instead of being
/// swallowed on drop.
pub fn write_json_pretty<T: Serialize>(value: &T, path: &Path) -> ForecastResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_567_89, 4), 1.2346);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-0.000_000_4, 6), 0.0);
        assert_eq!(round_to(123.456_789_123, 6), 123.456789);
        assert_eq!(round_to(-1.5, 0), -2.0);
    }

    #[test]
    fn test_round_to_never_yields_negative_zero() {
        for value in [-1e-7, -0.000_000_4, -0.0, -1e-300] {
            let rounded = round_to(value, 6);
            assert!(rounded.is_sign_positive(), "{} rounded to {}", value, rounded);
            assert_eq!(rounded.to_string(), "0");
        }
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_parse_timezone() {
        assert!(parse_timezone("Europe/Bucharest").is_ok());
        assert!(matches!(
            parse_timezone("Europe/Atlantis"),
            Err(ForecastError::InvalidTimezone(_, _))
        ));
    }

    #[test]
    fn test_write_json_pretty_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        write_json_pretty(&serde_json::json!({"ok": true}), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"ok\": true"));
    }
}
