// Metric catalogue: simple metrics and composite groups
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogueError {
    #[error("metric identifier '{0}' is declared more than once")]
    Duplicate(String),
    #[error("group '{group}' has {size} members, expected 2 or 3")]
    GroupSize { group: String, size: usize },
    #[error("group '{group}' references unknown metric '{metric}'")]
    UnknownMember { group: String, metric: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub id: String,
    pub title: String,
    pub color: String,
    pub default_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupMember {
    pub metric: String,
    pub color: String,
}

/// Related metrics drawn together on one chart. Member order fixes each
/// member's dataset slot and therefore its color.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricGroup {
    pub id: String,
    pub title: String,
    pub default_enabled: bool,
    pub members: Vec<GroupMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCatalogue {
    metrics: Vec<Metric>,
    groups: Vec<MetricGroup>,
}

impl MetricCatalogue {
    pub fn new(metrics: Vec<Metric>, groups: Vec<MetricGroup>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for id in metrics.iter().map(|m| &m.id).chain(groups.iter().map(|g| &g.id)) {
            if !seen.insert(id.as_str()) {
                return Err(CatalogueError::Duplicate(id.clone()));
            }
        }

        for group in &groups {
            if !(2..=3).contains(&group.members.len()) {
                return Err(CatalogueError::GroupSize {
                    group: group.id.clone(),
                    size: group.members.len(),
                });
            }
            for member in &group.members {
                if !metrics.iter().any(|m| m.id == member.metric) {
                    return Err(CatalogueError::UnknownMember {
                        group: group.id.clone(),
                        metric: member.metric.clone(),
                    });
                }
            }
        }

        Ok(Self { metrics, groups })
    }

    /// The sensor catalogue of an Enviro+ board, with particulate sizes and
    /// noise bands also drawn as combined charts.
    pub fn standard() -> Self {
        let metric = |id: &str, title: &str, color: &str, default_enabled: bool| Metric {
            id: id.to_string(),
            title: title.to_string(),
            color: color.to_string(),
            default_enabled,
        };
        let member = |metric: &str, color: &str| GroupMember {
            metric: metric.to_string(),
            color: color.to_string(),
        };

        let metrics = vec![
            metric("temperature", "Temperature (°C)", "red", true),
            metric("humidity", "Humidity (%)", "blue", true),
            metric("pressure", "Pressure (HPa)", "green", true),
            metric("oxidising", "Oxidising Gas (Nitrogen) (kO)", "orange", true),
            metric("reducing", "Reducing Gas (CO) (kO)", "purple", true),
            metric("nh3", "Ammonia (NH3) (kO)", "brown", true),
            metric("lux", "Light (Lux)", "gold", true),
            metric("proximity", "Proximity", "grey", true),
            metric("pm1", "Particles 1μm (μg/m3)", "red", false),
            metric("pm25", "Particles 2.5μm (μg/m3)", "red", false),
            metric("pm10", "Particles 10μm (μg/m3)", "red", false),
            metric("noise_low", "Noise Low", "red", false),
            metric("noise_mid", "Noise Mid", "red", false),
            metric("noise_high", "Noise High", "red", false),
        ];
        let groups = vec![
            MetricGroup {
                id: "particles".to_string(),
                title: "Particles (Combined)".to_string(),
                default_enabled: true,
                members: vec![
                    member("pm1", "red"),
                    member("pm25", "green"),
                    member("pm10", "blue"),
                ],
            },
            MetricGroup {
                id: "noise".to_string(),
                title: "Noise (Combined)".to_string(),
                default_enabled: true,
                members: vec![
                    member("noise_low", "red"),
                    member("noise_mid", "green"),
                    member("noise_high", "blue"),
                ],
            },
        ];

        Self { metrics, groups }
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn groups(&self) -> &[MetricGroup] {
        &self.groups
    }

    pub fn metric(&self, id: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.id == id)
    }

    /// Every identifier a user can toggle: simple metrics first, then groups.
    pub fn known_ids(&self) -> impl Iterator<Item = &str> {
        self.metrics
            .iter()
            .map(|m| m.id.as_str())
            .chain(self.groups.iter().map(|g| g.id.as_str()))
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.known_ids().any(|known| known == id)
    }

    /// Identifiers enabled before the user touched anything.
    pub fn default_enabled(&self) -> HashSet<String> {
        self.metrics
            .iter()
            .filter(|m| m.default_enabled)
            .map(|m| m.id.clone())
            .chain(
                self.groups
                    .iter()
                    .filter(|g| g.default_enabled)
                    .map(|g| g.id.clone()),
            )
            .collect()
    }
}

/// Canvas the chart for `id` is drawn on.
pub fn canvas_id(id: &str) -> String {
    format!("canvas_{}", id)
}
