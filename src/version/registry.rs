//! Selection of the models that apply to a game version

use std::path::Path;

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::version::catalog::{CatalogVersion, VersionCatalog, VersionId};
use crate::version::error::CatalogError;
use crate::version::range::VersionRange;

/// Trait for resolving catalog versions
#[cfg_attr(test, automock)]
pub trait VersionLookup {
    fn lookup_id(&self, id: VersionId) -> Option<CatalogVersion>;

    fn lookup_name(&self, name: &str) -> Option<CatalogVersion>;
}

impl VersionLookup for VersionCatalog {
    fn lookup_id(&self, id: VersionId) -> Option<CatalogVersion> {
        self.get_by_id(id).cloned()
    }

    fn lookup_name(&self, name: &str) -> Option<CatalogVersion> {
        self.get_by_name(name).cloned()
    }
}

/// A trained model and the catalog window it was trained for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub dbdv_min_id: VersionId,
    pub dbdv_max_id: Option<VersionId>,
}

impl ModelEntry {
    /// Resolve the model's window through `lookup`
    pub fn window<L: VersionLookup>(
        &self,
        lookup: &L,
    ) -> Result<VersionRange<CatalogVersion>, CatalogError> {
        let min = lookup
            .lookup_id(self.dbdv_min_id)
            .ok_or(CatalogError::UnknownId(self.dbdv_min_id))?;
        let max = self
            .dbdv_max_id
            .map(|id| lookup.lookup_id(id).ok_or(CatalogError::UnknownId(id)))
            .transpose()?;
        Ok(VersionRange::new(min, max)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelRegistry {
    models: Vec<ModelEntry>,
}

impl ModelRegistry {
    pub fn new(models: Vec<ModelEntry>) -> Self {
        Self { models }
    }

    /// Load model entries from a JSON array
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let registry: Self = serde_json::from_str(&content)?;
        info!(
            "Loaded {} model entries from {}",
            registry.models.len(),
            path.display()
        );
        Ok(registry)
    }

    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Models whose window contains the version named `version_name`.
    ///
    /// Models whose window cannot be resolved are skipped.
    pub fn applicable<L: VersionLookup>(
        &self,
        lookup: &L,
        version_name: &str,
    ) -> Result<Vec<&ModelEntry>, CatalogError> {
        let version = lookup
            .lookup_name(version_name)
            .ok_or_else(|| CatalogError::UnknownName(version_name.to_string()))?;

        let selected: Vec<&ModelEntry> = self
            .models
            .iter()
            .filter(|model| {
                let Ok(window) = model.window(lookup).inspect_err(|e| {
                    warn!("Skipping model '{}': {}", model.name, e);
                }) else {
                    return false;
                };
                window.contains(&version)
            })
            .collect();

        debug!(
            "{} of {} models apply to {}",
            selected.len(),
            self.models.len(),
            version_name
        );
        Ok(selected)
    }

    /// Window in which both models apply, `None` when they never overlap
    pub fn combined_window<L: VersionLookup>(
        &self,
        lookup: &L,
        a: &str,
        b: &str,
    ) -> Result<Option<VersionRange<CatalogVersion>>, CatalogError> {
        let model = |name: &str| {
            self.get(name)
                .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
        };
        let a = model(a)?.window(lookup)?;
        let b = model(b)?.window(lookup)?;
        Ok(&a & &b)
    }
}
