//! Risk derivation: marker colour, rating-score bucket and marker size.
//!
//! All three are pure lookups over scalar inputs. Inputs outside their
//! enumeration are rejected with a [`DeriveError`] rather than mapped to a
//! fallback, so a bad cell can never shift the marker arrays out of step
//! with the community rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DeriveError;
use crate::hazard::{HazardCategory, RiskLevel};

// ── Colour ───────────────────────────────────────────────────────────────────

/// A CSS colour string, usually `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw cell of a category column: the risk-level string for
/// `Risk Level`, an integer score for the five hazards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue<'a> {
    Level(&'a str),
    Score(i64),
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Level(s) => write!(f, "{s:?}"),
            CellValue::Score(n) => write!(f, "{n}"),
        }
    }
}

/// Four-step palette indexed by severity (None/0 .. High/3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub none: Color,
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

impl Palette {
    /// Grey → olive → amber → brick red.
    pub fn risk_level() -> Self {
        Self {
            none: Color::new("#808080"),
            low: Color::new("#476220"),
            medium: Color::new("#F2CC50"),
            high: Color::new("#8d2520"),
        }
    }

    /// Grey followed by three steps of blue.
    pub fn hazard() -> Self {
        Self {
            none: Color::new("#808080"),
            low: Color::new("#406080"),
            medium: Color::new("#4080c0"),
            high: Color::new("#40a0f0"),
        }
    }

    pub fn step(&self, severity: u8) -> Option<&Color> {
        match severity {
            0 => Some(&self.none),
            1 => Some(&self.low),
            2 => Some(&self.medium),
            3 => Some(&self.high),
            _ => None,
        }
    }
}

/// Per-category palettes used to colour map markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTable {
    pub risk_level: Palette,
    pub massive_ice: Palette,
    pub thaw_susceptibility: Palette,
    pub existing_problems: Palette,
    pub permafrost_occurrence: Palette,
    pub permafrost_temperature: Palette,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            risk_level: Palette::risk_level(),
            massive_ice: Palette::hazard(),
            thaw_susceptibility: Palette::hazard(),
            existing_problems: Palette::hazard(),
            permafrost_occurrence: Palette::hazard(),
            permafrost_temperature: Palette::hazard(),
        }
    }
}

impl ColorTable {
    pub fn palette(&self, category: HazardCategory) -> &Palette {
        match category {
            HazardCategory::RiskLevel => &self.risk_level,
            HazardCategory::MassiveIce => &self.massive_ice,
            HazardCategory::ThawSusceptibility => &self.thaw_susceptibility,
            HazardCategory::ExistingProblems => &self.existing_problems,
            HazardCategory::PermafrostOccurrence => &self.permafrost_occurrence,
            HazardCategory::PermafrostTemperature => &self.permafrost_temperature,
        }
    }

    /// Marker colour for one community's `value` in `category`.
    ///
    /// `Risk Level` accepts only a risk-level string; every other category
    /// accepts only an integer score in 0..=3.
    pub fn color_for(&self, category: HazardCategory, value: CellValue<'_>) -> Result<&Color, DeriveError> {
        let outside = || DeriveError::OutsideEnumeration { category, value: value.to_string() };

        let severity = match (category, value) {
            (HazardCategory::RiskLevel, CellValue::Level(s)) => {
                s.parse::<RiskLevel>().map_err(|_| outside())? as u8
            }
            (c, CellValue::Score(n)) if c.is_hazard() => u8::try_from(n).map_err(|_| outside())?,
            _ => return Err(outside()),
        };
        self.palette(category).step(severity).ok_or_else(outside)
    }
}

// ── Rating-score bucket ──────────────────────────────────────────────────────

/// Largest bucket; the chart scale only has four steps.
pub const MAX_BUCKET: u8 = 3;

/// Normalizes a rating score onto the 0..=3 marker scale.
///
/// `0 → 0`, otherwise `ceil((score - 5) / 3)`, which puts 6–8 at 1, 9–11 at 2
/// and 12–14 at 3. Score 15 would land at 4 and is held at [`MAX_BUCKET`].
/// Only 0 and 5..=15 are valid rating scores.
pub fn bucket_rating_score(score: u32) -> Result<u8, DeriveError> {
    match score {
        0 => Ok(0),
        5..=15 => {
            let bucket = (score - 5).div_ceil(3);
            Ok((bucket as u8).min(MAX_BUCKET))
        }
        _ => Err(DeriveError::RatingScoreOutOfDomain(score)),
    }
}

// ── Marker size ──────────────────────────────────────────────────────────────

/// Linear marker scaling `size = raw * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerScale {
    pub scale: f64,
    pub offset: f64,
}

/// Scaling of the five-hazard chart.
pub const COMPACT_MARKER_SCALE: MarkerScale = MarkerScale { scale: 0.8, offset: 0.25 };

/// Scaling of the six-column chart that includes risk level.
pub const EXTENDED_MARKER_SCALE: MarkerScale = MarkerScale { scale: 1.2, offset: 0.25 };

impl MarkerScale {
    pub fn size(self, raw: f64) -> f64 {
        marker_size(raw, self.scale, self.offset)
    }
}

pub fn marker_size(raw: f64, scale: f64, offset: f64) -> f64 {
    raw * scale + offset
}
