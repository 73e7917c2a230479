//! Game version ordering and range algebra
//!
//! This module provides the value type for a single game release, the
//! half-open window type used to scope models and labeling rules, and the
//! catalog/registry layer that consumes them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Value    │────▶│    Range    │◀────│   Registry  │
//! │  (parse/cmp)│     │ (contains/&)│     │  (select)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            ▲                   │
//!                            │                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │    Bound    │     │   Catalog   │
//!                     │ (None = inf)│     │  (id order) │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`value`]: `GameVersion` parsing, formatting and total order
//! - [`range`]: `VersionRange` construction, membership and intersection
//! - [`bound`]: Comparisons against an optional upper bound
//! - [`catalog`]: Catalog entries ordered by id and id-window filtering
//! - [`registry`]: Model selection by version window
//! - [`error`]: Error types for parsing, ranges and catalogs

pub mod bound;
pub mod catalog;
pub mod error;
pub mod range;
pub mod registry;
pub mod value;

pub use catalog::{CatalogVersion, VersionCatalog, VersionId, filter_by_version_id};
pub use error::{CatalogError, VersionError};
pub use range::VersionRange;
pub use registry::{ModelEntry, ModelRegistry, VersionLookup};
pub use value::{GameVersion, compare_versions};
