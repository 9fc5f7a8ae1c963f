//! Tabular view of the selected communities.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::SelectionError;

/// Column header and the row field it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub name: &'static str,
    pub id: &'static str,
}

pub const TABLE_COLUMNS: [TableColumn; 9] = [
    TableColumn { name: "Community", id: "Community" },
    TableColumn { name: "Confidence", id: "Confidence" },
    TableColumn { name: "Permafrost Occurrence", id: "Permafrost Occurrence Label" },
    TableColumn { name: "Permafrost Temperature", id: "Permafrost Temperature Label" },
    TableColumn { name: "Thaw Susceptibility", id: "Thaw Susceptibility Label" },
    TableColumn { name: "Massive Ice", id: "Massive Ice Label" },
    TableColumn { name: "Existing Problems", id: "Existing Problems Label" },
    TableColumn { name: "Rating Score", id: "Rating Score" },
    TableColumn { name: "Risk Level", id: "Risk Level" },
];

/// One table record, keyed by [`TableColumn::id`] when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(rename = "Community")]
    pub community: String,
    #[serde(rename = "Confidence")]
    pub confidence: &'static str,
    #[serde(rename = "Permafrost Occurrence Label")]
    pub permafrost_occurrence: String,
    #[serde(rename = "Permafrost Temperature Label")]
    pub permafrost_temperature: String,
    #[serde(rename = "Thaw Susceptibility Label")]
    pub thaw_susceptibility: String,
    #[serde(rename = "Massive Ice Label")]
    pub massive_ice: String,
    #[serde(rename = "Existing Problems Label")]
    pub existing_problems: String,
    #[serde(rename = "Rating Score")]
    pub rating_score: u32,
    #[serde(rename = "Risk Level")]
    pub risk_level: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSpec {
    pub columns: &'static [TableColumn],
    pub rows: Vec<TableRow>,
}

/// Rows for `communities`, in the given order.
pub fn project_table(dataset: &Dataset, communities: &[String]) -> Result<TableSpec, SelectionError> {
    let rows = communities
        .iter()
        .map(|name| {
            let c = dataset
                .get(name)
                .ok_or_else(|| SelectionError::UnknownCommunity(name.clone()))?;
            Ok(TableRow {
                community: c.name.clone(),
                confidence: c.confidence.as_str(),
                permafrost_occurrence: c.permafrost_occurrence.label.clone(),
                permafrost_temperature: c.permafrost_temperature.label.clone(),
                thaw_susceptibility: c.thaw_susceptibility.label.clone(),
                massive_ice: c.massive_ice.label.clone(),
                existing_problems: c.existing_problems.label.clone(),
                rating_score: c.rating_score,
                risk_level: c.risk_level.as_str(),
            })
        })
        .collect::<Result<Vec<_>, SelectionError>>()?;
    Ok(TableSpec { columns: &TABLE_COLUMNS, rows })
}
