//! Sweep configuration.
//!
//! The city table, trip duration, reminder offsets, candidate query,
//! and the names of the label/folder/calendar the run writes to, as one
//! explicit value handed to the processor at construction. No ambient
//! globals.

use serde::{Deserialize, Serialize};

use crate::cities::CityEntry;
use crate::error::ConfigError;

/// Configuration for one sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Cities the extractor recognizes.
    pub cities: Vec<CityEntry>,
    /// Fixed duration of one leg, in hours.
    pub trip_duration_hours: i64,
    /// Reminder offsets before departure, e.g. "30m", "1h", "1.5h".
    pub alerts: Vec<String>,
    /// Exact subject line of confirmation emails.
    pub subject: String,
    /// Recency bound for the candidate query, in days.
    pub newer_than_days: u32,
    /// Label applied to a thread once at least one of its legs became an
    /// event. Labeled threads are never re-scanned.
    pub processed_label: String,
    /// Folder that receives the renamed ticket documents.
    pub ticket_folder: String,
    /// Prefix for renamed ticket documents.
    pub ticket_name_prefix: String,
    /// Calendar that receives the trip events.
    pub calendar_name: String,
    /// Regex fragment for the heading that opens a leg block in the
    /// message body. `None` matches bare city pairs anywhere — some
    /// template versions carry no heading at all.
    pub route_heading: Option<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            cities: vec![
                CityEntry { code: "THE".into(), name: "TERESINA - PI".into() },
                CityEntry { code: "PHB".into(), name: "PARNAIBA - PI".into() },
                CityEntry { code: "PIR".into(), name: "PIRIPIRI - PI".into() },
            ],
            trip_duration_hours: 3,
            alerts: vec!["30m".into(), "1h".into(), "1.5h".into()],
            subject: "Expresso Guanabara - Compra confirmada com sucesso".into(),
            newer_than_days: 30,
            processed_label: "Passagem Guanabara agendada".into(),
            ticket_folder: "Bilhetes - passagens Guanabara".into(),
            ticket_name_prefix: "Bilhete Guanabara".into(),
            calendar_name: "Viagens".into(),
            route_heading: Some(r"Viagem\s+de\s+(?:Ida|Volta)".into()),
        }
    }
}

impl SweepConfig {
    /// Parse a JSON configuration document. Missing fields fall back to
    /// the defaults; the result is validated before it is returned.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Candidate query: exact subject match plus the recency bound.
    pub fn query_string(&self) -> String {
        format!(
            "subject:\"{}\" newer_than:{}d",
            self.subject, self.newer_than_days
        )
    }

    /// Reminder offsets in minutes, zero offsets filtered out.
    pub fn reminder_minutes(&self) -> Vec<u32> {
        self.alerts
            .iter()
            .filter_map(|alert| alert_to_minutes(alert))
            .filter(|&minutes| minutes > 0)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cities.is_empty() {
            return Err(ConfigError::EmptyCityTable);
        }
        for (i, city) in self.cities.iter().enumerate() {
            if self.cities[..i].iter().any(|other| other.name == city.name) {
                return Err(ConfigError::DuplicateCity(city.name.clone()));
            }
            if !city.name.contains(['-', '–', '—']) {
                return Err(ConfigError::InvalidValue {
                    key: "cities".into(),
                    message: format!(
                        "city name {:?} has no locality/region separator",
                        city.name
                    ),
                });
            }
        }
        if self.trip_duration_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "trip_duration_hours".into(),
                message: "must be positive".into(),
            });
        }
        for alert in &self.alerts {
            if alert_to_minutes(alert).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: "alerts".into(),
                    message: format!("unrecognized reminder offset {alert:?}"),
                });
            }
        }
        Ok(())
    }
}

/// "30m" → 30, "1h" → 60, "1.5h" → 90. Unknown units yield `None`.
pub fn alert_to_minutes(alert: &str) -> Option<u32> {
    let alert = alert.trim();
    if let Some(value) = alert.strip_suffix('m') {
        let minutes: f64 = value.trim().parse().ok()?;
        Some(minutes.round() as u32)
    } else if let Some(value) = alert.strip_suffix('h') {
        let hours: f64 = value.trim().parse().ok()?;
        Some((hours * 60.0).round() as u32)
    } else {
        None
    }
}
