// Which metrics are shown, as pushed to the session store
use super::metric::MetricCatalogue;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};

/// Enabled flag for every known metric and group identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityMap(BTreeMap<String, bool>);

impl VisibilityMap {
    /// Build a complete map from the set of checked identifiers.
    /// Identifiers outside the catalogue are ignored.
    pub fn from_checked(catalogue: &MetricCatalogue, checked: &HashSet<String>) -> Self {
        Self(
            catalogue
                .known_ids()
                .map(|id| (id.to_string(), checked.contains(id)))
                .collect(),
        )
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, enabled)| (id.as_str(), *enabled))
    }
}

// The session store expects 0|1 flags rather than booleans.
impl Serialize for VisibilityMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, enabled)| (id, u8::from(*enabled))))
    }
}
