// HTTP backend implementation against the sensor dashboard's JSON endpoints
use crate::application::backend::DashboardBackend;
use crate::domain::chart::SeriesResult;
use crate::domain::details::MetricDetails;
use crate::domain::period::{ResolvedPeriod, Sampling};
use crate::domain::readings::{LatestSnapshot, SunTimes};
use crate::domain::visibility::VisibilityMap;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SeriesRequest<'a> {
    #[serde(rename = "type")]
    metric: &'a str,
    period: &'a str,
    interval: Sampling,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    data: Vec<f64>,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Serialize)]
struct SessionRequest<'a> {
    selected: &'a VisibilityMap,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    data: MetricDetails,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}/", self.base_url, name)
    }

    async fn post<B, R>(&self, name: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(name);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} failed with status {}: {}", url, status, body);
        }

        // The backend labels its JSON as text/html, so parse the body regardless of content type.
        response
            .json::<R>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn fetch_series(&self, metric: &str, period: &ResolvedPeriod) -> Result<SeriesResult> {
        let request = SeriesRequest {
            metric,
            period: period.label,
            interval: period.sampling,
        };
        let response: SeriesResponse = self.post("data", &request).await?;

        if response.labels.len() != response.data.len() {
            anyhow::bail!(
                "Series {} has {} labels but {} values",
                metric,
                response.labels.len(),
                response.data.len()
            );
        }

        tracing::debug!("Fetched {} points of {} for {}", response.data.len(), metric, period.label);
        Ok(SeriesResult::new(
            response.labels,
            response.data,
            response.unit,
            response.title,
        ))
    }

    async fn latest(&self) -> Result<LatestSnapshot> {
        self.post("latest", &serde_json::json!({})).await
    }

    async fn sun_times(&self) -> Result<SunTimes> {
        self.post("sun", &serde_json::json!({})).await
    }

    async fn update_session(&self, visibility: &VisibilityMap) -> Result<()> {
        let _: IgnoredAny = self
            .post("update_session", &SessionRequest { selected: visibility })
            .await?;
        Ok(())
    }

    async fn details(&self, metric: &str, period: &ResolvedPeriod) -> Result<MetricDetails> {
        // Fixed periods send a placeholder interval; custom ranges still need their dates.
        let interval = match period.sampling {
            Sampling::Interval(_) => Sampling::Interval(1),
            range @ Sampling::Range(_) => range,
        };
        let request = SeriesRequest {
            metric,
            period: period.label,
            interval,
        };
        let response: DetailsResponse = self.post("details", &request).await?;
        Ok(response.data)
    }
}
