// Details summary - Statistics overlay for one metric
use crate::application::backend::DashboardBackend;
use crate::application::surface::WidgetSurface;
use crate::domain::metric::MetricCatalogue;
use crate::domain::period::ResolvedPeriod;
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct DetailsService {
    backend: Arc<dyn DashboardBackend>,
    widgets: Arc<dyn WidgetSurface>,
    catalogue: Arc<MetricCatalogue>,
    dismiss_after: Duration,
}

impl DetailsService {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        widgets: Arc<dyn WidgetSurface>,
        catalogue: Arc<MetricCatalogue>,
        dismiss_after: Duration,
    ) -> Self {
        Self {
            backend,
            widgets,
            catalogue,
            dismiss_after,
        }
    }

    /// Fetch the statistics, show them over the metric's current value and
    /// schedule the overlay to close. Returns the text shown.
    pub async fn show(&self, metric: &str, period: &ResolvedPeriod) -> anyhow::Result<String> {
        let details = self
            .backend
            .details(metric, period)
            .await
            .with_context(|| format!("Failed to fetch details for {}", metric))?;

        let title = self
            .catalogue
            .metric(metric)
            .map(|m| m.title.as_str())
            .unwrap_or(metric);
        let text = details.summary(title);
        let token = self.widgets.show_details(metric, &text);

        let widgets = self.widgets.clone();
        let metric = metric.to_string();
        let dismiss_after = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(dismiss_after).await;
            widgets.dismiss_details(&metric, token);
        });

        Ok(text)
    }
}
