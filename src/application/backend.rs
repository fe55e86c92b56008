// Backend trait for the dashboard's data endpoints
use crate::domain::chart::SeriesResult;
use crate::domain::details::MetricDetails;
use crate::domain::period::ResolvedPeriod;
use crate::domain::readings::{LatestSnapshot, SunTimes};
use crate::domain::visibility::VisibilityMap;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// Samples of one metric over a resolved period. An empty result means no data in range.
    async fn fetch_series(&self, metric: &str, period: &ResolvedPeriod) -> anyhow::Result<SeriesResult>;

    /// Most recent stored reading of every sensor
    async fn latest(&self) -> anyhow::Result<LatestSnapshot>;

    /// Next sunrise and sunset
    async fn sun_times(&self) -> anyhow::Result<SunTimes>;

    /// Store the full visibility map in the user's session
    async fn update_session(&self, visibility: &VisibilityMap) -> anyhow::Result<()>;

    /// Aggregate statistics for one metric over a resolved period
    async fn details(&self, metric: &str, period: &ResolvedPeriod) -> anyhow::Result<MetricDetails>;
}
