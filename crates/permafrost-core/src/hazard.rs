//! Closed enumerations of the permafrost assessment: hazard categories,
//! per-hazard scores, the cumulative risk level and the confidence rating.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Hazard category ──────────────────────────────────────────────────────────

/// A column of the assessment that the map can be coloured by.
///
/// `RiskLevel` is the cumulative pseudo-category; the other five are the
/// individual permafrost hazards that sum into the rating score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardCategory {
    #[serde(rename = "Risk Level")]
    RiskLevel,
    #[serde(rename = "Massive Ice")]
    MassiveIce,
    #[serde(rename = "Thaw Susceptibility")]
    ThawSusceptibility,
    #[serde(rename = "Existing Problems")]
    ExistingProblems,
    #[serde(rename = "Permafrost Occurrence")]
    PermafrostOccurrence,
    #[serde(rename = "Permafrost Temperature")]
    PermafrostTemperature,
}

impl HazardCategory {
    /// Every category, in the order the category selector lists them.
    pub const ALL: [HazardCategory; 6] = [
        HazardCategory::RiskLevel,
        HazardCategory::MassiveIce,
        HazardCategory::ThawSusceptibility,
        HazardCategory::ExistingProblems,
        HazardCategory::PermafrostOccurrence,
        HazardCategory::PermafrostTemperature,
    ];

    /// The five scored hazards, in dataset column order.
    pub const HAZARDS: [HazardCategory; 5] = [
        HazardCategory::PermafrostOccurrence,
        HazardCategory::PermafrostTemperature,
        HazardCategory::ThawSusceptibility,
        HazardCategory::MassiveIce,
        HazardCategory::ExistingProblems,
    ];

    pub fn name(self) -> &'static str {
        match self {
            HazardCategory::RiskLevel => "Risk Level",
            HazardCategory::MassiveIce => "Massive Ice",
            HazardCategory::ThawSusceptibility => "Thaw Susceptibility",
            HazardCategory::ExistingProblems => "Existing Problems",
            HazardCategory::PermafrostOccurrence => "Permafrost Occurrence",
            HazardCategory::PermafrostTemperature => "Permafrost Temperature",
        }
    }

    /// True for the five scored hazards, false for the cumulative risk level.
    pub fn is_hazard(self) -> bool {
        self != HazardCategory::RiskLevel
    }
}

impl fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for HazardCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        HazardCategory::ALL
            .into_iter()
            .find(|c| c.name() == trimmed)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// ── Hazard score ─────────────────────────────────────────────────────────────

/// Score of a single hazard: 0 = no permafrost, 1..=3 increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HazardScore(u8);

impl HazardScore {
    pub const MAX: u8 = 3;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HazardScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HazardScore::new(value)
            .ok_or_else(|| format!("hazard score {value} is outside 0..={}", HazardScore::MAX))
    }
}

impl From<HazardScore> for u8 {
    fn from(score: HazardScore) -> u8 {
        score.0
    }
}

// ── Risk level ───────────────────────────────────────────────────────────────

/// Cumulative risk level derived upstream from the rating score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::None => "None",
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Level implied by the assessment breakpoints:
    /// 0 → None, 5–8 → Low, 9–11 → Medium, 12–15 → High.
    /// Scores outside those ranges have no level.
    pub fn from_rating_score(score: u32) -> Option<Self> {
        match score {
            0 => Some(RiskLevel::None),
            5..=8 => Some(RiskLevel::Low),
            9..=11 => Some(RiskLevel::Medium),
            12..=15 => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "None" => Ok(RiskLevel::None),
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(format!("risk level {other:?} is not one of None, Low, Medium, High")),
        }
    }
}

// ── Confidence ───────────────────────────────────────────────────────────────

/// Data-quality annotation attached to each assessment. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Confidence {
    /// `*`: estimated from surficial geology and imagery alone.
    #[serde(rename = "*")]
    Low,
    /// `**`: some geotechnical reports or hazard mitigation plans.
    #[serde(rename = "**")]
    Medium,
    /// `***`: comprehensive geotechnical coverage.
    #[serde(rename = "***")]
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "*",
            Confidence::Medium => "**",
            Confidence::High => "***",
        }
    }
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" => Ok(Confidence::Low),
            "**" => Ok(Confidence::Medium),
            "***" => Ok(Confidence::High),
            other => Err(format!("confidence {other:?} is not one of *, **, ***")),
        }
    }
}
