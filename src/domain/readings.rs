// Live readings and sun times shown in the header widgets
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Latest stored sample for every sensor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LatestSnapshot {
    pub data: BTreeMap<String, f64>,
    #[serde(default)]
    pub units: BTreeMap<String, String>,
    /// Qualitative word per metric, e.g. "humid" or "dry".
    #[serde(default)]
    pub description: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentReading {
    pub metric: String,
    pub value: f64,
    pub text: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl LatestSnapshot {
    /// Display text and icon for each metric in the snapshot. Icons are looked
    /// up by description; descriptions without an icon show text only.
    pub fn current_readings(&self, icons: &HashMap<String, String>) -> Vec<CurrentReading> {
        self.data
            .iter()
            .map(|(metric, value)| {
                let text = match self.units.get(metric).map(String::as_str) {
                    Some(unit) if !unit.is_empty() => format!("{:.2} {}", value, unit),
                    _ => format!("{:.2}", value),
                };
                let description = self.description.get(metric).cloned();
                let icon = description
                    .as_deref()
                    .and_then(|d| icons.get(d))
                    .cloned();

                CurrentReading {
                    metric: metric.clone(),
                    value: *value,
                    text,
                    description,
                    icon,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sun_up: String,
    pub sun_down: String,
}
