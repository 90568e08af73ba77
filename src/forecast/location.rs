use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::utils::commons::parse_timezone;
use crate::utils::errors::{ForecastError, ForecastResult};

/// Static description of a solar plant
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    /// IANA timezone name, e.g. "Europe/Bucharest"
    pub timezone: String,
    /// Installed capacity. Unknown capacity yields a zero capacity factor.
    #[serde(default)]
    pub capacity_kw: Option<f64>,
}

impl Location {
    pub fn new(key: impl Into<String>, timezone: impl Into<String>, capacity_kw: Option<f64>) -> Self {
        Self {
            key: key.into(),
            name: None,
            timezone: timezone.into(),
            capacity_kw,
        }
    }

    pub fn tz(&self) -> ForecastResult<Tz> {
        parse_timezone(&self.timezone)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: BTreeMap<String, Location>,
}

impl LocationRegistry {
    /// Build a registry, rejecting unparseable timezones up front
    pub fn from_locations(locations: Vec<Location>) -> ForecastResult<Self> {
        let mut registry = Self::default();
        for location in locations {
            location.tz()?;
            if registry.locations.contains_key(&location.key) {
                return Err(ForecastError::config(format!(
                    "location '{}' is defined more than once",
                    location.key
                )));
            }
            registry.locations.insert(location.key.clone(), location);
        }
        Ok(registry)
    }

    /// Load a JSON array of locations
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ForecastResult<Self> {
        let file = File::open(path.as_ref())?;
        let locations: Vec<Location> = serde_json::from_reader(BufReader::new(file))?;
        Self::from_locations(locations)
    }

    pub fn get(&self, key: &str) -> ForecastResult<&Location> {
        self.locations
            .get(key)
            .ok_or_else(|| ForecastError::UnknownLocation(key.to_string()))
    }

    pub fn keys(&self) -> Vec<&str> {
        self.locations.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_registry_lookup() {
        let registry = LocationRegistry::from_locations(vec![
            Location::new("butimanu", "Europe/Bucharest", Some(10_800.0)),
            Location::new("berlin_roof", "Europe/Berlin", None),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys(), vec!["berlin_roof", "butimanu"]);
        assert_eq!(registry.get("butimanu").unwrap().capacity_kw, Some(10_800.0));
        assert!(matches!(
            registry.get("missing"),
            Err(ForecastError::UnknownLocation(_))
        ));
    }

    #[test]
    fn test_registry_rejects_bad_timezone_and_duplicates() {
        let bad_tz = LocationRegistry::from_locations(vec![Location::new("x", "Nowhere/Land", None)]);
        assert!(matches!(bad_tz, Err(ForecastError::InvalidTimezone(_, _))));

        let duplicate = LocationRegistry::from_locations(vec![
            Location::new("x", "UTC", None),
            Location::new("x", "UTC", None),
        ]);
        assert!(matches!(duplicate, Err(ForecastError::Config(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"key": "butimanu", "name": "CEF Butimanu", "timezone": "Europe/Bucharest", "capacity_kw": 10800.0}},
                {{"key": "lab", "timezone": "UTC"}}]"#
        )
        .unwrap();

        let registry = LocationRegistry::from_json_file(file.path()).unwrap();
        let plant = registry.get("butimanu").unwrap();
        assert_eq!(plant.name.as_deref(), Some("CEF Butimanu"));
        assert_eq!(plant.tz().unwrap(), chrono_tz::Europe::Bucharest);
        assert_eq!(registry.get("lab").unwrap().capacity_kw, None);
    }
}
