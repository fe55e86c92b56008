// Fixed-period refresh of the live readings and sun time widgets
use crate::application::backend::DashboardBackend;
use crate::application::surface::WidgetSurface;
use anyhow::Context;
use futures::StreamExt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// Run `refresh` every `every`. Each tick spawns its own request without
/// waiting for the previous one, so the last response to land wins.
fn spawn_ticker<F, Fut>(name: &'static str, every: Duration, refresh: F) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(interval);

        tracing::info!("Polling {} every {:?}", name, every);
        while ticks.next().await.is_some() {
            let request = refresh();
            tokio::spawn(async move {
                if let Err(e) = request.await {
                    tracing::warn!("Polling {} failed: {:#}", name, e);
                }
            });
        }
    })
}

#[derive(Clone)]
pub struct LiveReadingsPoller {
    backend: Arc<dyn DashboardBackend>,
    widgets: Arc<dyn WidgetSurface>,
    icons: Arc<HashMap<String, String>>,
    every: Duration,
}

impl LiveReadingsPoller {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        widgets: Arc<dyn WidgetSurface>,
        icons: Arc<HashMap<String, String>>,
        every: Duration,
    ) -> Self {
        Self {
            backend,
            widgets,
            icons,
            every,
        }
    }

    /// Fetch the latest snapshot once and update every reading widget.
    pub async fn refresh(&self) -> anyhow::Result<()> {
        let snapshot = self
            .backend
            .latest()
            .await
            .context("Failed to fetch latest readings")?;

        for reading in snapshot.current_readings(&self.icons) {
            self.widgets.show_reading(&reading);
        }
        Ok(())
    }

    pub fn spawn(self) -> JoinHandle<()> {
        let every = self.every;
        spawn_ticker("live readings", every, move || {
            let poller = self.clone();
            async move { poller.refresh().await }
        })
    }
}

#[derive(Clone)]
pub struct SunTimesPoller {
    backend: Arc<dyn DashboardBackend>,
    widgets: Arc<dyn WidgetSurface>,
    every: Duration,
}

impl SunTimesPoller {
    pub fn new(backend: Arc<dyn DashboardBackend>, widgets: Arc<dyn WidgetSurface>, every: Duration) -> Self {
        Self {
            backend,
            widgets,
            every,
        }
    }

    pub async fn refresh(&self) -> anyhow::Result<()> {
        let sun = self
            .backend
            .sun_times()
            .await
            .context("Failed to fetch sun times")?;
        self.widgets.show_sun_times(&sun);
        Ok(())
    }

    pub fn spawn(self) -> JoinHandle<()> {
        let every = self.every;
        spawn_ticker("sun times", every, move || {
            let poller = self.clone();
            async move { poller.refresh().await }
        })
    }
}
