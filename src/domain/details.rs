// Aggregate statistics for one metric over a period
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    RisingFast,
    Rising,
    Steady,
    Falling,
    FallingFast,
}

impl Trend {
    /// Parse the backend's arrow glyphs. Anything unrecognised reads as steady.
    pub fn from_glyph(glyph: &str) -> Self {
        match glyph.trim() {
            ">>" => Trend::RisingFast,
            ">" => Trend::Rising,
            "<" => Trend::Falling,
            "<<" => Trend::FallingFast,
            _ => Trend::Steady,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Trend::RisingFast => "rising fast",
            Trend::Rising => "rising",
            Trend::Steady => "steady",
            Trend::Falling => "falling",
            Trend::FallingFast => "falling fast",
        };
        f.write_str(word)
    }
}

/// Statistics are absent when the period holds no samples.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricDetails {
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub std: Option<f64>,
    #[serde(default)]
    pub change_per_hour: Option<f64>,
    #[serde(default)]
    pub trend: String,
}

impl MetricDetails {
    pub fn trend(&self) -> Trend {
        Trend::from_glyph(&self.trend)
    }

    /// Short multi-line block for the details overlay.
    pub fn summary(&self, title: &str) -> String {
        let stat = |value: Option<f64>| match value {
            Some(v) => format!("{:.2}", v),
            None => "n/a".to_string(),
        };
        let change = match self.change_per_hour {
            Some(v) => format!("{:+.2}", v),
            None => "n/a".to_string(),
        };

        format!(
            "{}\nAverage: {}\nMinimum: {}\nMaximum: {}\nStd dev: {}\nChange/hour: {}\nTrend: {}",
            title,
            stat(self.avg),
            stat(self.min),
            stat(self.max),
            stat(self.std),
            change,
            self.trend()
        )
    }
}
