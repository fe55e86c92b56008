// Visibility settings - Push the checked metrics to the session store
use crate::application::backend::DashboardBackend;
use crate::domain::metric::MetricCatalogue;
use crate::domain::visibility::VisibilityMap;
use anyhow::Context;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct VisibilityService {
    backend: Arc<dyn DashboardBackend>,
    catalogue: Arc<MetricCatalogue>,
}

impl VisibilityService {
    pub fn new(backend: Arc<dyn DashboardBackend>, catalogue: Arc<MetricCatalogue>) -> Self {
        Self { backend, catalogue }
    }

    /// Build the complete map from the checked identifiers and store it.
    pub async fn push(&self, checked: &HashSet<String>) -> anyhow::Result<VisibilityMap> {
        let visibility = VisibilityMap::from_checked(&self.catalogue, checked);
        let enabled = visibility.iter().filter(|(_, on)| *on).count();
        let total = visibility.iter().count();

        self.backend
            .update_session(&visibility)
            .await
            .context("Failed to update session visibility")?;

        tracing::debug!("Stored visibility: {} of {} enabled", enabled, total);
        Ok(visibility)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeBackend;

    #[tokio::test]
    async fn test_push_sends_every_known_id() {
        let backend = Arc::new(FakeBackend::default());
        let catalogue = Arc::new(MetricCatalogue::standard());
        let service = VisibilityService::new(backend.clone(), catalogue.clone());

        service.push(&HashSet::new()).await.unwrap();
        service
            .push(&HashSet::from(["pressure".to_string(), "noise".to_string()]))
            .await
            .unwrap();

        let sessions = backend.sessions();
        assert_eq!(sessions.len(), 2);
        for map in &sessions {
            assert_eq!(map.iter().count(), catalogue.known_ids().count());
        }
        assert!(sessions.first().unwrap().iter().all(|(_, on)| !on));
        assert!(sessions[1].is_enabled("pressure"));
        assert!(sessions[1].is_enabled("noise"));
        assert!(!sessions[1].is_enabled("temperature"));
    }
}
