// Period selection and resolution into a sampling interval or date range
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PeriodError {
    #[error("unknown period '{0}'")]
    Unknown(String),
    #[error("custom period needs both a start and an end date")]
    MissingRange,
    #[error("custom period starts at {from} which is not before its end {to}")]
    InvertedRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

/// The time window a user picked for the charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodSelection {
    Hour,
    FourHours,
    TwelveHours,
    #[default]
    Day,
    Week,
    Month,
    Custom {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl PeriodSelection {
    /// Every selection that maps to a fixed sampling interval.
    pub const FIXED: [PeriodSelection; 6] = [
        PeriodSelection::Hour,
        PeriodSelection::FourHours,
        PeriodSelection::TwelveHours,
        PeriodSelection::Day,
        PeriodSelection::Week,
        PeriodSelection::Month,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PeriodSelection::Hour => "hour",
            PeriodSelection::FourHours => "4hour",
            PeriodSelection::TwelveHours => "12hour",
            PeriodSelection::Day => "day",
            PeriodSelection::Week => "week",
            PeriodSelection::Month => "month",
            PeriodSelection::Custom { .. } => "custom",
        }
    }

    /// Fixed selections sample so each window yields a few dozen points.
    /// Custom ranges pass through untouched and the backend picks the interval.
    pub fn sampling(&self) -> Sampling {
        match *self {
            PeriodSelection::Hour => Sampling::Interval(120),
            PeriodSelection::FourHours => Sampling::Interval(600),
            PeriodSelection::TwelveHours => Sampling::Interval(1_200),
            PeriodSelection::Day => Sampling::Interval(1_800),
            PeriodSelection::Week => Sampling::Interval(21_600),
            PeriodSelection::Month => Sampling::Interval(86_400),
            PeriodSelection::Custom { from, to } => Sampling::Range([from, to]),
        }
    }

    /// Map the raw period control to a selection.
    ///
    /// This is the only place that looks at control state. No active control
    /// means `day`; `custom` requires an ordered date range.
    pub fn from_control(
        control: Option<&str>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self, PeriodError> {
        let name = match control.map(str::trim) {
            None | Some("") => return Ok(PeriodSelection::Day),
            Some(name) => name,
        };

        if name == "custom" {
            return match (from, to) {
                (Some(from), Some(to)) if from < to => Ok(PeriodSelection::Custom { from, to }),
                (Some(from), Some(to)) => Err(PeriodError::InvertedRange { from, to }),
                _ => Err(PeriodError::MissingRange),
            };
        }

        PeriodSelection::FIXED
            .into_iter()
            .find(|selection| selection.label() == name)
            .ok_or_else(|| PeriodError::Unknown(name.to_string()))
    }
}

/// Second half of a resolved period: either a fixed interval or a raw range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Sampling {
    Interval(u32),
    Range([DateTime<Utc>; 2]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub label: &'static str,
    pub sampling: Sampling,
}

/// Resolve a selection into the `(label, interval | range)` pair the backend expects.
pub fn resolve(selection: &PeriodSelection) -> ResolvedPeriod {
    ResolvedPeriod {
        label: selection.label(),
        sampling: selection.sampling(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_periods_have_positive_intervals() {
        let labels = ["hour", "4hour", "12hour", "day", "week", "month"];
        for selection in PeriodSelection::FIXED {
            let resolved = resolve(&selection);
            assert!(labels.contains(&resolved.label));
            match resolved.sampling {
                Sampling::Interval(secs) => assert!(secs > 0),
                Sampling::Range(_) => panic!("{} resolved to a range", resolved.label),
            }
        }
    }

    #[test]
    fn test_missing_control_defaults_to_day() {
        let selection = PeriodSelection::from_control(None, None, None).unwrap();
        assert_eq!(selection, PeriodSelection::Day);
        assert_eq!(
            resolve(&selection),
            ResolvedPeriod {
                label: "day",
                sampling: Sampling::Interval(1_800)
            }
        );

        let blank = PeriodSelection::from_control(Some("  "), None, None).unwrap();
        assert_eq!(blank, PeriodSelection::Day);
    }

    #[test]
    fn test_custom_resolves_to_range() {
        let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        let selection = PeriodSelection::from_control(Some("custom"), Some(from), Some(to)).unwrap();

        let resolved = resolve(&selection);
        assert_eq!(resolved.label, "custom");
        assert_eq!(resolved.sampling, Sampling::Range([from, to]));
    }

    #[test]
    fn test_custom_rejects_bad_ranges() {
        let from = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        assert_eq!(
            PeriodSelection::from_control(Some("custom"), Some(from), None),
            Err(PeriodError::MissingRange)
        );
        assert_eq!(
            PeriodSelection::from_control(Some("custom"), Some(from), Some(to)),
            Err(PeriodError::InvertedRange { from, to })
        );
    }

    #[test]
    fn test_unknown_control_is_rejected() {
        assert_eq!(
            PeriodSelection::from_control(Some("fortnight"), None, None),
            Err(PeriodError::Unknown("fortnight".to_string()))
        );
    }

    #[test]
    fn test_sampling_serializes_as_backend_expects() {
        assert_eq!(serde_json::to_value(Sampling::Interval(600)).unwrap(), serde_json::json!(600));

        let from = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 3, 2, 12, 30, 0).unwrap();
        assert_eq!(
            serde_json::to_value(Sampling::Range([from, to])).unwrap(),
            serde_json::json!(["2024-03-01T00:00:00Z", "2024-03-02T12:30:00Z"])
        );
    }
}
