// In-memory dashboard board: the drawn state a front end reads
use crate::application::surface::{ChartSurface, WidgetSurface};
use crate::domain::chart::ChartSpec;
use crate::domain::readings::{CurrentReading, SunTimes};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardSnapshot {
    pub charts: BTreeMap<String, ChartSpec>,
    pub readings: BTreeMap<String, CurrentReading>,
    pub sun: Option<SunTimes>,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct Overlay {
    token: u64,
    text: String,
}

#[derive(Debug, Default)]
struct BoardState {
    charts: BTreeMap<String, ChartSpec>,
    readings: BTreeMap<String, CurrentReading>,
    sun: Option<SunTimes>,
    details: BTreeMap<String, Overlay>,
}

/// Holds the latest chart per canvas and the current widget contents.
/// Writers replace whole entries, so the last write for a slot wins.
#[derive(Debug, Default)]
pub struct InMemoryBoard {
    state: RwLock<BoardState>,
    next_token: AtomicU64,
}

impl InMemoryBoard {
    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        BoardSnapshot {
            charts: state.charts.clone(),
            readings: state.readings.clone(),
            sun: state.sun.clone(),
            details: state
                .details
                .iter()
                .map(|(metric, overlay)| (metric.clone(), overlay.text.clone()))
                .collect(),
        }
    }

    pub fn chart(&self, canvas: &str) -> Option<ChartSpec> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .charts
            .get(canvas)
            .cloned()
    }
}

impl ChartSurface for InMemoryBoard {
    fn draw_chart(&self, canvas: &str, chart: &ChartSpec) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.charts.insert(canvas.to_string(), chart.clone());
    }
}

impl WidgetSurface for InMemoryBoard {
    fn show_reading(&self, reading: &CurrentReading) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.readings.insert(reading.metric.clone(), reading.clone());
    }

    fn show_sun_times(&self, sun: &SunTimes) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.sun = Some(sun.clone());
    }

    fn show_details(&self, metric: &str, text: &str) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.details.insert(
            metric.to_string(),
            Overlay {
                token,
                text: text.to_string(),
            },
        );
        token
    }

    fn dismiss_details(&self, metric: &str, token: u64) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.details.get(metric).is_some_and(|overlay| overlay.token == token) {
            state.details.remove(metric);
        }
    }
}
