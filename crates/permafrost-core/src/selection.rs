//! Per-session selection: which communities are charted and which category
//! colours the map.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::SelectionError;
use crate::hazard::HazardCategory;

/// A user interaction that changes the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A map marker was clicked; carries the marker's hover text.
    MapClick { hover_text: String },
    /// The community selector changed. An empty list restores the default.
    CommunitiesChanged(Vec<String>),
    /// The category selector changed.
    CategoryChanged(String),
}

/// Raw value of the community selector: one name while single-select, a
/// list of names while multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SelectorValue {
    One(String),
    Many(Vec<String>),
}

impl SelectionEvent {
    /// Selector change from its raw value. A cleared selector (`None`) is an
    /// empty selection and so restores the default community.
    pub fn from_selector(value: Option<SelectorValue>) -> Self {
        let names = match value {
            None => Vec::new(),
            Some(SelectorValue::One(name)) => vec![name],
            Some(SelectorValue::Many(names)) => names,
        };
        SelectionEvent::CommunitiesChanged(names)
    }
}

/// Community name encoded in a map marker's hover text: everything before
/// the first `:`, or the whole text when there is none.
pub fn community_from_hover_text(hover_text: &str) -> &str {
    hover_text.split_once(':').map_or(hover_text, |(name, _)| name).trim()
}

/// Current selection. Always holds at least one community, never the same
/// community twice, and only names present in the dataset it was validated
/// against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    communities: Vec<String>,
    category: HazardCategory,
    #[serde(skip)]
    default_community: String,
}

impl SelectionState {
    pub fn new(
        dataset: &Dataset,
        default_community: &str,
        category: HazardCategory,
    ) -> Result<Self, SelectionError> {
        if !dataset.contains(default_community) {
            return Err(SelectionError::UnknownCommunity(default_community.to_string()));
        }
        Ok(Self {
            communities: vec![default_community.to_string()],
            category,
            default_community: default_community.to_string(),
        })
    }

    /// Selected community names, in the order they were chosen.
    pub fn communities(&self) -> &[String] {
        &self.communities
    }

    pub fn category(&self) -> HazardCategory {
        self.category
    }

    /// Apply `event`. On error the previous selection is left untouched.
    pub fn apply(&mut self, dataset: &Dataset, event: SelectionEvent) -> Result<(), SelectionError> {
        let result = match event {
            SelectionEvent::MapClick { hover_text } => {
                let name = community_from_hover_text(&hover_text);
                self.set_communities(dataset, [name])
            }
            SelectionEvent::CommunitiesChanged(names) => {
                self.set_communities(dataset, names.iter().map(String::as_str))
            }
            SelectionEvent::CategoryChanged(raw) => match raw.parse::<HazardCategory>() {
                Ok(category) => {
                    self.category = category;
                    Ok(())
                }
                Err(_) => Err(SelectionError::UnknownCategory(raw)),
            },
        };
        if let Err(e) = &result {
            tracing::warn!("Rejected selection change: {e}");
        }
        result
    }

    fn set_communities<'a>(
        &mut self,
        dataset: &Dataset,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), SelectionError> {
        let mut next: Vec<String> = Vec::new();
        for name in names {
            let name = name.trim();
            if !dataset.contains(name) {
                return Err(SelectionError::UnknownCommunity(name.to_string()));
            }
            if !next.iter().any(|n| n == name) {
                next.push(name.to_string());
            }
        }
        if next.is_empty() {
            tracing::debug!("Empty community selection, restoring {}", self.default_community);
            next.push(self.default_community.clone());
        }
        self.communities = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::tests::community;
    use crate::hazard::RiskLevel;

    fn dataset() -> Dataset {
        Dataset::from_communities(vec![
            community("Shishmaref", [3, 3, 3, 3, 3], 15, RiskLevel::High),
            community("Nome", [2, 2, 2, 2, 1], 9, RiskLevel::Medium),
            community("Juneau", [0, 0, 0, 0, 0], 0, RiskLevel::None),
        ])
        .unwrap()
    }

    fn state(ds: &Dataset) -> SelectionState {
        SelectionState::new(ds, "Shishmaref", HazardCategory::RiskLevel).unwrap()
    }

    #[test]
    fn starts_from_defaults() {
        let ds = dataset();
        let s = state(&ds);
        assert_eq!(s.communities(), ["Shishmaref"]);
        assert_eq!(s.category(), HazardCategory::RiskLevel);
    }

    #[test]
    fn default_must_exist() {
        let ds = dataset();
        assert_eq!(
            SelectionState::new(&ds, "Atlantis", HazardCategory::RiskLevel),
            Err(SelectionError::UnknownCommunity("Atlantis".into()))
        );
    }

    #[test]
    fn hover_text_name_is_before_first_colon() {
        assert_eq!(community_from_hover_text("Shishmaref: High"), "Shishmaref");
        assert_eq!(community_from_hover_text("Nome: MAGT: -5 to -2"), "Nome");
        assert_eq!(community_from_hover_text("Juneau"), "Juneau");
    }

    #[test]
    fn map_click_selects_single_community() {
        let ds = dataset();
        let mut s = state(&ds);
        s.apply(&ds, SelectionEvent::CommunitiesChanged(vec!["Nome".into(), "Juneau".into()])).unwrap();
        s.apply(&ds, SelectionEvent::MapClick { hover_text: "Shishmaref: High".into() }).unwrap();
        assert_eq!(s.communities(), ["Shishmaref"]);
    }

    #[test]
    fn multi_select_keeps_order_and_drops_duplicates() {
        let ds = dataset();
        let mut s = state(&ds);
        let names = vec!["Juneau".into(), "Shishmaref".into(), "Juneau".into(), "Nome".into()];
        s.apply(&ds, SelectionEvent::CommunitiesChanged(names)).unwrap();
        assert_eq!(s.communities(), ["Juneau", "Shishmaref", "Nome"]);
    }

    #[test]
    fn empty_selection_restores_default() {
        let ds = dataset();
        let mut s = state(&ds);
        s.apply(&ds, SelectionEvent::CommunitiesChanged(vec!["Nome".into()])).unwrap();
        s.apply(&ds, SelectionEvent::CommunitiesChanged(Vec::new())).unwrap();
        assert_eq!(s.communities(), ["Shishmaref"]);
    }

    #[test]
    fn unknown_community_is_rejected_and_prior_selection_kept() {
        let ds = dataset();
        let mut s = state(&ds);
        s.apply(&ds, SelectionEvent::CommunitiesChanged(vec!["Nome".into()])).unwrap();
        let before = s.clone();

        let err = s
            .apply(&ds, SelectionEvent::CommunitiesChanged(vec!["Juneau".into(), "Atlantis".into()]))
            .unwrap_err();
        assert_eq!(err, SelectionError::UnknownCommunity("Atlantis".into()));
        assert_eq!(s, before);

        let err = s.apply(&ds, SelectionEvent::MapClick { hover_text: "Atlantis: High".into() });
        assert!(err.is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn selector_value_accepts_name_list_or_nothing() {
        let one: SelectorValue = serde_json::from_str(r#""Nome""#).unwrap();
        let many: SelectorValue = serde_json::from_str(r#"["Juneau", "Nome"]"#).unwrap();
        let cleared: Option<SelectorValue> = serde_json::from_str("null").unwrap();

        assert_eq!(
            SelectionEvent::from_selector(Some(one)),
            SelectionEvent::CommunitiesChanged(vec!["Nome".into()])
        );
        assert_eq!(
            SelectionEvent::from_selector(Some(many)),
            SelectionEvent::CommunitiesChanged(vec!["Juneau".into(), "Nome".into()])
        );
        assert_eq!(SelectionEvent::from_selector(cleared), SelectionEvent::CommunitiesChanged(Vec::new()));
    }

    #[test]
    fn cleared_selector_restores_default() {
        let ds = dataset();
        let mut s = state(&ds);
        s.apply(&ds, SelectionEvent::from_selector(Some(SelectorValue::One("Nome".into())))).unwrap();
        assert_eq!(s.communities(), ["Nome"]);
        s.apply(&ds, SelectionEvent::from_selector(None)).unwrap();
        assert_eq!(s.communities(), ["Shishmaref"]);
    }

    #[test]
    fn category_change_is_validated() {
        let ds = dataset();
        let mut s = state(&ds);
        s.apply(&ds, SelectionEvent::CategoryChanged("Massive Ice".into())).unwrap();
        assert_eq!(s.category(), HazardCategory::MassiveIce);

        let err = s.apply(&ds, SelectionEvent::CategoryChanged("Snow Load".into())).unwrap_err();
        assert_eq!(err, SelectionError::UnknownCategory("Snow Load".into()));
        assert_eq!(s.category(), HazardCategory::MassiveIce);
    }
}
