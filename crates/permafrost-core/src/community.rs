//! Typed community record and its CSV row shape.

use serde::{Deserialize, Serialize};

use crate::hazard::{Confidence, HazardCategory, HazardScore, RiskLevel};
use crate::risk::CellValue;

/// Score and human-readable label of one hazard for one community.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardReading {
    pub score: HazardScore,
    pub label: String,
}

/// One assessed community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    pub name: String,
    /// Decimal degrees.
    pub latitude: f64,
    /// Decimal degrees.
    pub longitude: f64,
    pub confidence: Confidence,
    pub permafrost_occurrence: HazardReading,
    pub permafrost_temperature: HazardReading,
    pub thaw_susceptibility: HazardReading,
    pub massive_ice: HazardReading,
    pub existing_problems: HazardReading,
    /// Sum of the five hazard scores as supplied by the assessment.
    pub rating_score: u32,
    pub risk_level: RiskLevel,
}

impl Community {
    /// Reading for a scored hazard; `None` for the `Risk Level` pseudo-category.
    pub fn hazard(&self, category: HazardCategory) -> Option<&HazardReading> {
        match category {
            HazardCategory::RiskLevel => None,
            HazardCategory::MassiveIce => Some(&self.massive_ice),
            HazardCategory::ThawSusceptibility => Some(&self.thaw_susceptibility),
            HazardCategory::ExistingProblems => Some(&self.existing_problems),
            HazardCategory::PermafrostOccurrence => Some(&self.permafrost_occurrence),
            HazardCategory::PermafrostTemperature => Some(&self.permafrost_temperature),
        }
    }

    /// Raw cell for `category`, as fed to the colour lookup.
    pub fn cell_value(&self, category: HazardCategory) -> CellValue<'_> {
        match self.hazard(category) {
            Some(reading) => CellValue::Score(i64::from(reading.score.get())),
            None => CellValue::Level(self.risk_level.as_str()),
        }
    }

    /// Display label for `category`: the hazard's label column, or the
    /// risk-level string itself.
    pub fn label(&self, category: HazardCategory) -> &str {
        match self.hazard(category) {
            Some(reading) => &reading.label,
            None => self.risk_level.as_str(),
        }
    }

    pub fn hazard_sum(&self) -> u32 {
        HazardCategory::HAZARDS
            .into_iter()
            .filter_map(|c| self.hazard(c))
            .map(|r| u32::from(r.score.get()))
            .sum()
    }
}

// ── CSV row ──────────────────────────────────────────────────────────────────

/// One dataset row exactly as named in the CSV header.
#[derive(Debug, Deserialize)]
pub(crate) struct CommunityRow {
    #[serde(rename = "Community")]
    name: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Confidence")]
    confidence: String,
    #[serde(rename = "Permafrost Occurrence")]
    permafrost_occurrence: u8,
    #[serde(rename = "Permafrost Occurrence Label")]
    permafrost_occurrence_label: String,
    #[serde(rename = "Permafrost Temperature")]
    permafrost_temperature: u8,
    #[serde(rename = "Permafrost Temperature Label")]
    permafrost_temperature_label: String,
    #[serde(rename = "Thaw Susceptibility")]
    thaw_susceptibility: u8,
    #[serde(rename = "Thaw Susceptibility Label")]
    thaw_susceptibility_label: String,
    #[serde(rename = "Massive Ice")]
    massive_ice: u8,
    #[serde(rename = "Massive Ice Label")]
    massive_ice_label: String,
    #[serde(rename = "Existing Problems")]
    existing_problems: u8,
    #[serde(rename = "Existing Problems Label")]
    existing_problems_label: String,
    #[serde(rename = "Rating Score")]
    rating_score: u32,
    #[serde(rename = "Risk Level")]
    risk_level: String,
}

impl CommunityRow {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

fn reading(category: HazardCategory, score: u8, label: String) -> Result<HazardReading, String> {
    let score = HazardScore::try_from(score).map_err(|e| format!("{category}: {e}"))?;
    Ok(HazardReading { score, label })
}

impl TryFrom<CommunityRow> for Community {
    type Error = String;

    fn try_from(row: CommunityRow) -> Result<Self, Self::Error> {
        if row.name.trim().is_empty() {
            return Err("community name is empty".to_string());
        }
        Ok(Community {
            confidence: row.confidence.parse()?,
            risk_level: row.risk_level.parse()?,
            permafrost_occurrence: reading(
                HazardCategory::PermafrostOccurrence,
                row.permafrost_occurrence,
                row.permafrost_occurrence_label,
            )?,
            permafrost_temperature: reading(
                HazardCategory::PermafrostTemperature,
                row.permafrost_temperature,
                row.permafrost_temperature_label,
            )?,
            thaw_susceptibility: reading(
                HazardCategory::ThawSusceptibility,
                row.thaw_susceptibility,
                row.thaw_susceptibility_label,
            )?,
            massive_ice: reading(HazardCategory::MassiveIce, row.massive_ice, row.massive_ice_label)?,
            existing_problems: reading(
                HazardCategory::ExistingProblems,
                row.existing_problems,
                row.existing_problems_label,
            )?,
            name: row.name.trim().to_string(),
            latitude: row.latitude,
            longitude: row.longitude,
            rating_score: row.rating_score,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn reading(score: u8, label: &str) -> HazardReading {
        HazardReading { score: HazardScore::new(score).unwrap(), label: label.to_string() }
    }

    /// Builds a community whose hazards score `scores` in dataset column order.
    pub(crate) fn community(name: &str, scores: [u8; 5], rating: u32, risk: RiskLevel) -> Community {
        Community {
            name: name.to_string(),
            latitude: 64.0,
            longitude: -150.0,
            confidence: Confidence::Medium,
            permafrost_occurrence: reading(scores[0], "occurrence"),
            permafrost_temperature: reading(scores[1], "temperature"),
            thaw_susceptibility: reading(scores[2], "thaw"),
            massive_ice: reading(scores[3], "ice"),
            existing_problems: reading(scores[4], "problems"),
            rating_score: rating,
            risk_level: risk,
        }
    }

    #[test]
    fn cell_value_uses_risk_string_for_risk_level() {
        let c = community("Nome", [2, 2, 2, 2, 1], 9, RiskLevel::Medium);
        assert_eq!(c.cell_value(HazardCategory::RiskLevel), CellValue::Level("Medium"));
        assert_eq!(c.cell_value(HazardCategory::ExistingProblems), CellValue::Score(1));
        assert_eq!(c.label(HazardCategory::RiskLevel), "Medium");
        assert_eq!(c.label(HazardCategory::MassiveIce), "ice");
    }

    #[test]
    fn hazard_sum_adds_all_five_scores() {
        let c = community("Kotzebue", [3, 2, 3, 3, 2], 13, RiskLevel::High);
        assert_eq!(c.hazard_sum(), 13);
    }
}
