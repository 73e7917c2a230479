//! Catalog of known game releases
//!
//! Downstream records refer to releases by catalog id (`dbdv_id`,
//! `dbdv_min_id`, `dbdv_max_id`). Ids are assigned in release order, so
//! catalog entries are ordered by id rather than by name.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::version::error::{CatalogError, VersionError};
use crate::version::range::VersionRange;
use crate::version::value::{GameVersion, PTB_SUFFIX};

/// Catalog id of a release
pub type VersionId = i64;

/// A release as stored in the version catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogVersion {
    pub id: VersionId,
    /// Full name, `M.m.p` or `M.m.p-ptb`
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl CatalogVersion {
    pub fn new(id: VersionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            common_name: None,
            release_date: None,
        }
    }

    pub fn is_ptb(&self) -> bool {
        self.name.ends_with(PTB_SUFFIX)
    }

    pub fn version(&self) -> Result<GameVersion, VersionError> {
        self.name.parse()
    }
}

impl PartialEq for CatalogVersion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CatalogVersion {}

impl Hash for CatalogVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Ord for CatalogVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl PartialOrd for CatalogVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// In-memory version catalog keyed by release name
#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    entries: IndexMap<String, CatalogVersion>,
    /// id -> name
    ids: IndexMap<VersionId, String>,
}

impl VersionCatalog {
    /// Build a catalog, rejecting entries with a malformed name or a
    /// duplicated name or id.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CatalogVersion>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for entry in entries {
            entry.version()?;
            if catalog.ids.contains_key(&entry.id) {
                return Err(CatalogError::Duplicate(format!("id {}", entry.id)));
            }
            if catalog.entries.contains_key(&entry.name) {
                return Err(CatalogError::Duplicate(entry.name));
            }
            catalog.ids.insert(entry.id, entry.name.clone());
            catalog.entries.insert(entry.name.clone(), entry);
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of entries
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<CatalogVersion> = serde_json::from_str(&content)?;
        let catalog = Self::from_entries(entries)?;
        info!(
            "Loaded {} catalog versions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogVersion> {
        self.entries.values()
    }

    pub fn get_by_name(&self, name: &str) -> Option<&CatalogVersion> {
        self.entries.get(name)
    }

    pub fn get_by_id(&self, id: VersionId) -> Option<&CatalogVersion> {
        self.ids.get(&id).and_then(|name| self.entries.get(name))
    }

    /// Resolve a release name to its parsed version
    pub fn resolve(&self, name: &str) -> Result<GameVersion, CatalogError> {
        let entry = self
            .get_by_name(name)
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))?;
        Ok(entry.version()?)
    }

    /// Window `[min_id, max_id)` over catalog entries
    pub fn id_range(
        &self,
        min_id: VersionId,
        max_id: Option<VersionId>,
    ) -> Result<VersionRange<CatalogVersion>, CatalogError> {
        let min = self.get_by_id(min_id).ok_or(CatalogError::UnknownId(min_id))?;
        let max = max_id
            .map(|id| self.get_by_id(id).ok_or(CatalogError::UnknownId(id)))
            .transpose()?;
        Ok(VersionRange::new(min.clone(), max.cloned())?)
    }

    /// Same window as [`Self::id_range`], expressed over release names.
    ///
    /// The result is ordered by name, not by id, so it inherits the lexical
    /// component order of [`GameVersion`]: ids 1 and 2 named `9.0.0` and
    /// `10.0.0` form a valid id range but an invalid name range. Use
    /// [`Self::id_range`] when the catalog spans a two-digit component.
    pub fn version_range(
        &self,
        min_id: VersionId,
        max_id: Option<VersionId>,
    ) -> Result<VersionRange, CatalogError> {
        let ids = self.id_range(min_id, max_id)?;
        let min = ids.min().version()?;
        let max = ids.max().map(CatalogVersion::version).transpose()?;
        let range = VersionRange::new(min, max)?;
        debug!("Resolved ids {}..{:?} to {}", min_id, max_id, range);
        Ok(range)
    }
}

/// Keep the items whose version id lies in `[min_id, max_id)`.
///
/// Items without a version id never match.
pub fn filter_by_version_id<T, F>(
    items: impl IntoIterator<Item = T>,
    min_id: VersionId,
    max_id: Option<VersionId>,
    version_id: F,
) -> Vec<T>
where
    F: Fn(&T) -> Option<VersionId>,
{
    items
        .into_iter()
        .filter(|item| {
            version_id(item)
                .is_some_and(|id| id >= min_id && max_id.is_none_or(|max| id < max))
        })
        .collect()
}
