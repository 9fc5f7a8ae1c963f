//! Core of the community permafrost risk dashboard.
//!
//! The dataset is loaded once into an immutable [`Dataset`]; each user
//! session owns a [`SelectionState`] and re-projects the map, hazard chart
//! and table from it on every change.

pub mod community;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod hazard;
pub mod projection;
pub mod risk;
pub mod selection;

pub use community::{Community, HazardReading};
pub use config::{DashboardConfig, MapboxToken};
pub use dashboard::{Dashboard, Session};
pub use dataset::{AuditFinding, AuditKind, Dataset};
pub use error::{DashboardError, Result};
pub use hazard::{Confidence, HazardCategory, HazardScore, RiskLevel};
pub use projection::ChartVariant;
pub use selection::{SelectionEvent, SelectionState, SelectorValue};
