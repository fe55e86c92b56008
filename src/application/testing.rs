// In-memory fakes for the backend and surface seams
use crate::application::backend::DashboardBackend;
use crate::application::surface::{ChartSurface, WidgetSurface};
use crate::domain::chart::{ChartSpec, SeriesResult};
use crate::domain::details::MetricDetails;
use crate::domain::period::ResolvedPeriod;
use crate::domain::readings::{CurrentReading, LatestSnapshot, SunTimes};
use crate::domain::visibility::VisibilityMap;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct FakeBackend {
    pub series: HashMap<String, SeriesResult>,
    pub delays: HashMap<String, Duration>,
    pub failing: HashSet<String>,
    pub session_failing: bool,
    pub latest: LatestSnapshot,
    pub sun: Option<SunTimes>,
    pub details: MetricDetails,
    pub calls: Mutex<Vec<String>>,
    pub sessions: Mutex<Vec<VisibilityMap>>,
    pub latest_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_series(mut self, metric: &str, labels: &[&str], values: &[f64]) -> Self {
        self.series.insert(
            metric.to_string(),
            SeriesResult::new(
                labels.iter().map(|l| l.to_string()).collect(),
                values.to_vec(),
                "u".to_string(),
                metric.to_string(),
            ),
        );
        self
    }

    pub fn with_delay(mut self, metric: &str, delay: Duration) -> Self {
        self.delays.insert(metric.to_string(), delay);
        self
    }

    pub fn failing(mut self, metric: &str) -> Self {
        self.failing.insert(metric.to_string());
        self
    }

    /// `start:<metric>` / `end:<metric>` entries in request order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sessions(&self) -> Vec<VisibilityMap> {
        self.sessions.lock().unwrap().clone()
    }

    fn record(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl DashboardBackend for FakeBackend {
    async fn fetch_series(&self, metric: &str, period: &ResolvedPeriod) -> anyhow::Result<SeriesResult> {
        self.record(format!("start:{}", metric));
        if let Some(delay) = self.delays.get(metric) {
            tokio::time::sleep(*delay).await;
        }
        self.record(format!("end:{}", metric));

        if self.failing.contains(metric) {
            anyhow::bail!("connection refused while fetching {} for {}", metric, period.label);
        }
        Ok(self.series.get(metric).cloned().unwrap_or_default())
    }

    async fn latest(&self) -> anyhow::Result<LatestSnapshot> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.latest.clone())
    }

    async fn sun_times(&self) -> anyhow::Result<SunTimes> {
        self.sun
            .clone()
            .ok_or_else(|| anyhow::anyhow!("sun times unavailable"))
    }

    async fn update_session(&self, visibility: &VisibilityMap) -> anyhow::Result<()> {
        if self.session_failing {
            anyhow::bail!("session store unavailable");
        }
        self.sessions.lock().unwrap().push(visibility.clone());
        Ok(())
    }

    async fn details(&self, metric: &str, _period: &ResolvedPeriod) -> anyhow::Result<MetricDetails> {
        self.record(format!("details:{}", metric));
        Ok(self.details.clone())
    }
}

/// Surface that records every call it receives.
#[derive(Default)]
pub struct RecordingSurface {
    draws: Mutex<Vec<(String, ChartSpec)>>,
    readings: Mutex<Vec<CurrentReading>>,
    sun: Mutex<Vec<SunTimes>>,
    overlays: Mutex<HashMap<String, (u64, String)>>,
    next_token: AtomicU64,
}

impl RecordingSurface {
    pub fn draws(&self) -> Vec<(String, ChartSpec)> {
        self.draws.lock().unwrap().clone()
    }

    pub fn readings(&self) -> Vec<CurrentReading> {
        self.readings.lock().unwrap().clone()
    }

    pub fn sun(&self) -> Vec<SunTimes> {
        self.sun.lock().unwrap().clone()
    }

    pub fn overlay(&self, metric: &str) -> Option<String> {
        self.overlays
            .lock()
            .unwrap()
            .get(metric)
            .map(|(_, text)| text.clone())
    }
}

impl ChartSurface for RecordingSurface {
    fn draw_chart(&self, canvas: &str, chart: &ChartSpec) {
        self.draws
            .lock()
            .unwrap()
            .push((canvas.to_string(), chart.clone()));
    }
}

impl WidgetSurface for RecordingSurface {
    fn show_reading(&self, reading: &CurrentReading) {
        self.readings.lock().unwrap().push(reading.clone());
    }

    fn show_sun_times(&self, sun: &SunTimes) {
        self.sun.lock().unwrap().push(sun.clone());
    }

    fn show_details(&self, metric: &str, text: &str) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        self.overlays
            .lock()
            .unwrap()
            .insert(metric.to_string(), (token, text.to_string()));
        token
    }

    fn dismiss_details(&self, metric: &str, token: u64) {
        let mut overlays = self.overlays.lock().unwrap();
        if overlays.get(metric).is_some_and(|(current, _)| *current == token) {
            overlays.remove(metric);
        }
    }
}
