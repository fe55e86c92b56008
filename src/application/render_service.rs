// Chart rendering - Single metric charts and composite group charts
use crate::application::backend::DashboardBackend;
use crate::application::surface::ChartSurface;
use crate::domain::chart::{ChartSpec, CompositeChart};
use crate::domain::metric::{Metric, MetricCatalogue, MetricGroup, canvas_id};
use crate::domain::period::ResolvedPeriod;
use crate::domain::visibility::VisibilityMap;
use anyhow::Context;
use std::sync::{Arc, Mutex, PoisonError};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::task::JoinHandle;

/// Monotonic render generation. Draws tagged with an older generation are dropped.
#[derive(Debug, Clone, Default)]
pub struct RenderEpoch(Arc<AtomicU64>);

impl RenderEpoch {
    pub fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

/// Inputs of one render cycle, captured once when the cycle starts.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub period: ResolvedPeriod,
    pub visibility: VisibilityMap,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Drawn,
    /// No data in range; whatever the canvas showed before stays.
    Empty,
    /// A newer cycle started while this one was fetching.
    Stale,
    Failed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderReport {
    pub drawn: usize,
    pub empty: usize,
    pub stale: usize,
    pub failed: usize,
}

/// Handle on the tasks spawned for one render cycle.
pub struct RenderCycle {
    pub generation: u64,
    tasks: Vec<JoinHandle<RenderOutcome>>,
}

impl RenderCycle {
    /// Wait for every chart of the cycle to settle.
    pub async fn finished(self) -> RenderReport {
        let mut report = RenderReport::default();
        for outcome in futures::future::join_all(self.tasks).await {
            match outcome.unwrap_or(RenderOutcome::Failed) {
                RenderOutcome::Drawn => report.drawn += 1,
                RenderOutcome::Empty => report.empty += 1,
                RenderOutcome::Stale => report.stale += 1,
                RenderOutcome::Failed => report.failed += 1,
            }
        }
        report
    }
}

#[derive(Clone)]
pub struct ChartRenderService {
    backend: Arc<dyn DashboardBackend>,
    surface: Arc<dyn ChartSurface>,
    catalogue: Arc<MetricCatalogue>,
    epoch: RenderEpoch,
    /// Held across the generation check and the draw.
    draw_lock: Arc<Mutex<()>>,
}

impl ChartRenderService {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        surface: Arc<dyn ChartSurface>,
        catalogue: Arc<MetricCatalogue>,
    ) -> Self {
        Self {
            backend,
            surface,
            catalogue,
            epoch: RenderEpoch::default(),
            draw_lock: Arc::default(),
        }
    }

    /// Capture the inputs of a new cycle. Any cycle still in flight becomes stale.
    pub fn snapshot(&self, period: ResolvedPeriod, visibility: VisibilityMap) -> RenderSnapshot {
        RenderSnapshot {
            period,
            visibility,
            generation: self.epoch.advance(),
        }
    }

    /// Spawn one task per enabled metric and group. Simple metrics are fetched
    /// concurrently; each group fetches its members in order inside its task.
    pub fn render_all(&self, snapshot: RenderSnapshot) -> RenderCycle {
        let generation = snapshot.generation;
        let snapshot = Arc::new(snapshot);
        let mut tasks = Vec::new();

        tracing::info!(
            "Render cycle {} for period {}",
            generation,
            snapshot.period.label
        );

        for metric in self.catalogue.metrics() {
            if !snapshot.visibility.is_enabled(&metric.id) {
                continue;
            }

            let service = self.clone();
            let metric = metric.clone();
            let snapshot = snapshot.clone();
            tasks.push(tokio::spawn(async move {
                match service.render_single(&metric, &snapshot).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!("Error rendering chart {}: {:#}", metric.id, e);
                        RenderOutcome::Failed
                    }
                }
            }));
        }

        for group in self.catalogue.groups() {
            if !snapshot.visibility.is_enabled(&group.id) {
                continue;
            }

            let service = self.clone();
            let group = group.clone();
            let snapshot = snapshot.clone();
            tasks.push(tokio::spawn(async move {
                match service.render_group(&group, &snapshot).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!("Error rendering group chart {}: {:#}", group.id, e);
                        RenderOutcome::Failed
                    }
                }
            }));
        }

        RenderCycle { generation, tasks }
    }

    /// Fetch one metric and draw it on its own canvas. Empty results are not drawn.
    pub async fn render_single(
        &self,
        metric: &Metric,
        snapshot: &RenderSnapshot,
    ) -> anyhow::Result<RenderOutcome> {
        let series = self
            .backend
            .fetch_series(&metric.id, &snapshot.period)
            .await
            .with_context(|| format!("Failed to fetch series {}", metric.id))?;

        if series.is_empty() {
            tracing::debug!(
                "No data for {} over {}, leaving canvas as is",
                metric.id,
                snapshot.period.label
            );
            return Ok(RenderOutcome::Empty);
        }

        let chart = ChartSpec::single(series, &metric.color);
        Ok(self.draw(&canvas_id(&metric.id), &chart, snapshot.generation))
    }

    /// Fetch every member of a group, one after the other, and merge them
    /// into a single chart sharing the first non-empty member's labels.
    ///
    /// A fetch failure aborts the group; members after it are not requested.
    pub async fn compose_group(
        &self,
        group: &MetricGroup,
        period: &ResolvedPeriod,
    ) -> anyhow::Result<ChartSpec> {
        let mut composite = CompositeChart::new(&group.title, group.members.len());

        for (position, member) in group.members.iter().enumerate() {
            let series = self
                .backend
                .fetch_series(&member.metric, period)
                .await
                .with_context(|| {
                    format!("Failed to fetch series {} of group {}", member.metric, group.id)
                })?;

            tracing::debug!(
                "Group {} slot {} ({}): {} points",
                group.id,
                position,
                member.metric,
                series.len()
            );
            composite.fill(position, &member.color, series);
        }

        Ok(composite.finish())
    }

    pub async fn render_group(
        &self,
        group: &MetricGroup,
        snapshot: &RenderSnapshot,
    ) -> anyhow::Result<RenderOutcome> {
        let chart = self.compose_group(group, &snapshot.period).await?;

        if !chart.has_data() {
            tracing::debug!("No data for any member of group {}", group.id);
            return Ok(RenderOutcome::Empty);
        }

        Ok(self.draw(&canvas_id(&group.id), &chart, snapshot.generation))
    }

    fn draw(&self, canvas: &str, chart: &ChartSpec, generation: u64) -> RenderOutcome {
        let _guard = self.draw_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.epoch.is_current(generation) {
            tracing::debug!("Discarding stale chart for {} from cycle {}", canvas, generation);
            return RenderOutcome::Stale;
        }

        self.surface.draw_chart(canvas, chart);
        RenderOutcome::Drawn
    }
}
