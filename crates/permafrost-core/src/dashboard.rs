//! Shared dashboard state and per-session views over it.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::dataset::Dataset;
use crate::error::{ConfigError, Result};
use crate::hazard::HazardCategory;
use crate::projection::{project_hazard_chart, project_map, project_table, ChartSpec, MapSpec, TableSpec};
use crate::selection::{SelectionEvent, SelectionState};

/// Immutable dataset and configuration, shared by every session.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    config: Arc<DashboardConfig>,
    initial: SelectionState,
}

impl Dashboard {
    /// Fails when the configured default community is not in `dataset`.
    pub fn new(dataset: Dataset, config: DashboardConfig) -> Result<Self> {
        let initial = SelectionState::new(&dataset, &config.default_community, config.default_category)
            .map_err(|_| ConfigError::DefaultCommunityMissing(config.default_community.clone()))?;
        for finding in dataset.audit() {
            tracing::warn!("Data quality: {finding}");
        }
        Ok(Self { dataset: Arc::new(dataset), config: Arc::new(config), initial })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// A fresh session starting from the default selection.
    pub fn session(&self) -> Session {
        Session {
            dataset: Arc::clone(&self.dataset),
            config: Arc::clone(&self.config),
            selection: self.initial.clone(),
        }
    }
}

/// One user's view: owns its selection, borrows nothing mutable from others.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    config: Arc<DashboardConfig>,
    selection: SelectionState,
}

impl Session {
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Apply a selection event; a rejected event leaves the selection as it was.
    pub fn apply(&mut self, event: SelectionEvent) -> Result<()> {
        self.selection.apply(&self.dataset, event)?;
        Ok(())
    }

    pub fn map(&self) -> Result<MapSpec> {
        Ok(project_map(&self.dataset, &self.config.colors, self.selection.category())?)
    }

    pub fn chart(&self) -> Result<ChartSpec> {
        project_hazard_chart(&self.dataset, self.selection.communities(), self.config.chart_variant)
    }

    pub fn table(&self) -> Result<TableSpec> {
        Ok(project_table(&self.dataset, self.selection.communities())?)
    }

    pub fn community_options(&self) -> Vec<&str> {
        self.dataset.names().collect()
    }

    pub fn category_options(&self) -> &'static [HazardCategory] {
        &HazardCategory::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::tests::community;
    use crate::error::DashboardError;
    use crate::hazard::RiskLevel;

    fn dashboard() -> Dashboard {
        let ds = Dataset::from_communities(vec![
            community("Shishmaref", [3, 3, 3, 3, 3], 15, RiskLevel::High),
            community("Nome", [2, 2, 2, 2, 1], 9, RiskLevel::Medium),
        ])
        .unwrap();
        Dashboard::new(ds, DashboardConfig::default()).unwrap()
    }

    #[test]
    fn missing_default_community_is_a_config_error() {
        let ds = Dataset::from_communities(vec![community("Nome", [2, 2, 2, 2, 1], 9, RiskLevel::Medium)]).unwrap();
        let err = Dashboard::new(ds, DashboardConfig::default()).unwrap_err();
        assert!(matches!(err, DashboardError::Config(ConfigError::DefaultCommunityMissing(_))));
    }

    #[test]
    fn sessions_do_not_share_selection() {
        let dash = dashboard();
        let mut a = dash.session();
        let b = dash.session();
        a.apply(SelectionEvent::CommunitiesChanged(vec!["Nome".into()])).unwrap();
        assert_eq!(a.selection().communities(), ["Nome"]);
        assert_eq!(b.selection().communities(), ["Shishmaref"]);
    }

    #[test]
    fn projections_are_idempotent() {
        let dash = dashboard();
        let mut s = dash.session();
        s.apply(SelectionEvent::CommunitiesChanged(vec!["Nome".into(), "Shishmaref".into()])).unwrap();
        assert_eq!(s.map().unwrap(), s.map().unwrap());
        assert_eq!(s.chart().unwrap(), s.chart().unwrap());
        assert_eq!(s.table().unwrap(), s.table().unwrap());
    }

    #[test]
    fn options_list_names_and_categories() {
        let s = dashboard().session();
        assert_eq!(s.community_options(), ["Shishmaref", "Nome"]);
        assert_eq!(s.category_options().len(), 6);
    }
}
