// Application state for HTTP handlers
use crate::application::details_service::DetailsService;
use crate::application::render_service::{ChartRenderService, RenderCycle};
use crate::application::visibility_service::VisibilityService;
use crate::domain::metric::MetricCatalogue;
use crate::domain::period::{PeriodSelection, resolve};
use crate::domain::visibility::VisibilityMap;
use crate::infrastructure::board::InMemoryBoard;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// The user's control state: active period and checked metrics.
/// Authoritative; every render cycle reads it afresh.
#[derive(Debug, Clone)]
pub struct UiControls {
    pub period: PeriodSelection,
    pub checked: HashSet<String>,
}

pub struct AppState {
    pub catalogue: Arc<MetricCatalogue>,
    pub board: Arc<InMemoryBoard>,
    pub renderer: ChartRenderService,
    pub visibility: VisibilityService,
    pub details: DetailsService,
    controls: RwLock<UiControls>,
}

impl AppState {
    pub fn new(
        catalogue: Arc<MetricCatalogue>,
        board: Arc<InMemoryBoard>,
        renderer: ChartRenderService,
        visibility: VisibilityService,
        details: DetailsService,
    ) -> Self {
        let controls = UiControls {
            period: PeriodSelection::default(),
            checked: catalogue.default_enabled(),
        };

        Self {
            catalogue,
            board,
            renderer,
            visibility,
            details,
            controls: RwLock::new(controls),
        }
    }

    pub fn controls(&self) -> UiControls {
        self.controls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_period(&self, period: PeriodSelection) {
        self.controls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .period = period;
    }

    pub fn set_checked(&self, checked: HashSet<String>) {
        self.controls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .checked = checked;
    }

    /// Snapshot the controls and redraw every enabled chart.
    pub fn start_render(&self) -> RenderCycle {
        let controls = self.controls();
        let snapshot = self.renderer.snapshot(
            resolve(&controls.period),
            VisibilityMap::from_checked(&self.catalogue, &controls.checked),
        );
        self.renderer.render_all(snapshot)
    }

    /// Start a render cycle and log its outcome once every chart settles.
    pub fn refresh_charts(&self) -> u64 {
        let cycle = self.start_render();
        let generation = cycle.generation;

        tokio::spawn(async move {
            let report = cycle.finished().await;
            tracing::info!(
                "Render cycle {} done: {} drawn, {} empty, {} stale, {} failed",
                generation,
                report.drawn,
                report.empty,
                report.stale,
                report.failed
            );
        });

        generation
    }
}
