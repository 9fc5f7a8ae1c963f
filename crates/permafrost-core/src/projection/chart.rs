//! Per-community hazard scatter chart.
//!
//! Each selected community gets its own horizontal lane (y = community name)
//! with one glyph per hazard column (x = category). Glyph size encodes the
//! score; glyph colour only identifies the column.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ChartLayout;
use crate::dataset::Dataset;
use crate::error::{DashboardError, SelectionError};
use crate::hazard::HazardCategory;
use crate::risk::{bucket_rating_score, MarkerScale, COMPACT_MARKER_SCALE, EXTENDED_MARKER_SCALE};

// ── Variants ─────────────────────────────────────────────────────────────────

/// The two chart layouts the dashboard has shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartVariant {
    /// Five hazards, raw scores as text, plus a grey reference lane.
    Compact,
    /// Five hazards and the risk level, labels as text.
    Extended,
}

const COMPACT_CATEGORIES: [HazardCategory; 5] = [
    HazardCategory::PermafrostOccurrence,
    HazardCategory::PermafrostTemperature,
    HazardCategory::ThawSusceptibility,
    HazardCategory::MassiveIce,
    HazardCategory::ExistingProblems,
];
const COMPACT_COLORS: [&str; 5] = ["#053F5A", "#2AACB5", "#DDE495", "#EEB26B", "#E1695B"];

const EXTENDED_CATEGORIES: [HazardCategory; 6] = [
    HazardCategory::MassiveIce,
    HazardCategory::ThawSusceptibility,
    HazardCategory::ExistingProblems,
    HazardCategory::PermafrostOccurrence,
    HazardCategory::PermafrostTemperature,
    HazardCategory::RiskLevel,
];
const EXTENDED_COLORS: [&str; 6] = ["#1D94A5", "#2A697D", "#AC8B53", "#2F798E", "#7F9EA3", "#EA906D"];

/// Lane name of the compact chart's scale legend.
pub const REFERENCE_LANE: &str = "<b>Reference</b>";
const REFERENCE_COLOR: &str = "rgb(150,150,150)";

impl ChartVariant {
    /// X-axis category order.
    pub fn categories(self) -> &'static [HazardCategory] {
        match self {
            ChartVariant::Compact => &COMPACT_CATEGORIES,
            ChartVariant::Extended => &EXTENDED_CATEGORIES,
        }
    }

    /// Glyph colour per category, parallel to [`ChartVariant::categories`].
    pub fn colors(self) -> &'static [&'static str] {
        match self {
            ChartVariant::Compact => &COMPACT_COLORS,
            ChartVariant::Extended => &EXTENDED_COLORS,
        }
    }

    pub fn marker_scale(self) -> MarkerScale {
        match self {
            ChartVariant::Compact => COMPACT_MARKER_SCALE,
            ChartVariant::Extended => EXTENDED_MARKER_SCALE,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartVariant::Compact => "Community Permafrost Risk",
            ChartVariant::Extended => "Community Permafrost Data",
        }
    }

    fn mode(self) -> &'static str {
        match self {
            ChartVariant::Compact => "markers",
            ChartVariant::Extended => "markers+text",
        }
    }

    fn hovertemplate(self) -> &'static str {
        match self {
            ChartVariant::Compact => "Risk Level: %{text}",
            ChartVariant::Extended => "%{text}",
        }
    }

    fn opacity(self) -> f64 {
        match self {
            ChartVariant::Compact => 1.0,
            ChartVariant::Extended => 0.6,
        }
    }
}

// ── Chart ─────────────────────────────────────────────────────────────────────

/// Text drawn on or hovered over a glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PointText {
    Score(u8),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub category: HazardCategory,
    pub community: String,
    pub text: PointText,
    pub size: f64,
    pub color: &'static str,
}

/// One lane of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub variant: ChartVariant,
    /// Selected communities, in selection order.
    pub series: Vec<ChartSeries>,
    /// Scale legend lane, compact variant only.
    pub reference: Option<ChartSeries>,
}

/// Build the hazard chart for `communities`, one series each, in the given
/// order.
///
/// The `Risk Level` column is sized by the bucketed rating score rather than
/// a hazard score. Unknown community names are rejected.
pub fn project_hazard_chart(
    dataset: &Dataset,
    communities: &[String],
    variant: ChartVariant,
) -> Result<ChartSpec, DashboardError> {
    let scale = variant.marker_scale();
    let mut series = Vec::with_capacity(communities.len());

    for name in communities {
        let community = dataset
            .get(name)
            .ok_or_else(|| SelectionError::UnknownCommunity(name.clone()))?;

        let mut points = Vec::with_capacity(variant.categories().len());
        for (&category, &color) in variant.categories().iter().zip(variant.colors()) {
            let (raw, text) = match community.hazard(category) {
                Some(reading) => {
                    let score = reading.score.get();
                    let text = match variant {
                        ChartVariant::Compact => PointText::Score(score),
                        ChartVariant::Extended => PointText::Label(reading.label.clone()),
                    };
                    (score, text)
                }
                None => (
                    bucket_rating_score(community.rating_score)?,
                    PointText::Label(community.risk_level.as_str().to_string()),
                ),
            };
            points.push(ChartPoint {
                category,
                community: community.name.clone(),
                text,
                size: scale.size(f64::from(raw)),
                color,
            });
        }
        series.push(ChartSeries { name: community.name.clone(), points });
    }

    let reference = match variant {
        ChartVariant::Compact => Some(reference_lane()),
        ChartVariant::Extended => None,
    };
    tracing::debug!("Projected {:?} chart with {} series", variant, series.len());
    Ok(ChartSpec { variant, series, reference })
}

/// Grey legend lane: glyphs for scores 0..=3 and an empty fifth slot.
fn reference_lane() -> ChartSeries {
    let points = COMPACT_CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, &category)| {
            let (text, size) = match u8::try_from(i) {
                Ok(score) if score <= 3 => {
                    (PointText::Score(score), COMPACT_MARKER_SCALE.size(f64::from(score)))
                }
                _ => (PointText::Label(String::new()), 0.0),
            };
            ChartPoint { category, community: REFERENCE_LANE.to_string(), text, size, color: REFERENCE_COLOR }
        })
        .collect();
    ChartSeries { name: REFERENCE_LANE.to_string(), points }
}

// ── Figure ───────────────────────────────────────────────────────────────────

impl ChartSpec {
    /// Plotly scatter figure (`data` + `layout`).
    pub fn to_figure(&self, layout: &ChartLayout) -> Value {
        let mut data: Vec<Value> = self.series.iter().map(|s| self.trace(s)).collect();
        if let Some(reference) = &self.reference {
            let mut trace = self.trace(reference);
            trace["hovertemplate"] = json!("Risk Level: %{text}");
            trace["mode"] = json!("markers+text");
            trace["textposition"] = json!("top center");
            trace["marker"]["color"] = json!(REFERENCE_COLOR);
            if let Some(marker) = trace["marker"].as_object_mut() {
                marker.remove("opacity");
            }
            data.push(trace);
        }

        let categories: Vec<&str> = self.variant.categories().iter().map(|c| c.name()).collect();
        json!({
            "data": data,
            "layout": {
                "barmode": "grouped",
                "hovermode": "closest",
                "title": { "text": self.variant.title() },
                "height": layout.height,
                "margin": { "b": layout.margin_bottom },
                "yaxis": { "showline": false, "hoverformat": "1f" },
                "xaxis": { "range": categories, "type": "category", "showline": false },
            },
        })
    }

    fn trace(&self, series: &ChartSeries) -> Value {
        let x: Vec<&str> = series.points.iter().map(|p| p.category.name()).collect();
        let y: Vec<&str> = series.points.iter().map(|p| p.community.as_str()).collect();
        let text: Vec<&PointText> = series.points.iter().map(|p| &p.text).collect();
        let color: Vec<&str> = series.points.iter().map(|p| p.color).collect();
        let size: Vec<f64> = series.points.iter().map(|p| p.size).collect();

        let mut trace = json!({
            "x": x,
            "y": y,
            "name": series.name,
            "showlegend": false,
            "hovertext": text,
            "hovertemplate": self.variant.hovertemplate(),
            "text": text,
            "mode": self.variant.mode(),
            "marker": {
                "color": color,
                "size": size,
                "sizeref": 0.05,
                "sizemode": "scaled",
                "opacity": self.variant.opacity(),
            },
        });
        // Compact text only shows on hover.
        if self.variant == ChartVariant::Extended {
            trace["textposition"] = json!("center");
        }
        trace
    }
}
