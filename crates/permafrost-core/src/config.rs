//! Dashboard configuration: defaults, layout constants and the map token.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ConfigError;
use crate::hazard::HazardCategory;
use crate::projection::chart::ChartVariant;
use crate::risk::ColorTable;

/// Environment variable holding the map-tile access token.
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Everything about the page that is fixed at startup.
/// Missing JSON fields fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Community selected at startup and whenever the selection is cleared.
    pub default_community: String,
    pub default_category: HazardCategory,
    pub chart_variant: ChartVariant,
    pub map: MapLayout,
    pub chart: ChartLayout,
    pub colors: ColorTable,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_community: "Shishmaref".to_string(),
            default_category: HazardCategory::RiskLevel,
            chart_variant: ChartVariant::Extended,
            map: MapLayout::default(),
            chart: ChartLayout::default(),
            colors: ColorTable::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }
}

/// Map view: Alaska-centred, fixed height, uniform marker size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLayout {
    pub height: u32,
    pub zoom: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    pub style: String,
    pub marker_size: f64,
    /// Plotly `displayModeBar`: `"hover"`, or `"true"`/`"false"`.
    pub display_mode_bar: String,
    pub scroll_zoom: bool,
    pub mode_bar_buttons_to_remove: Vec<String>,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            height: 400,
            zoom: 3.0,
            center_lat: 65.0,
            center_lon: -152.0,
            style: "light".to_string(),
            marker_size: 15.0,
            display_mode_bar: "hover".to_string(),
            scroll_zoom: true,
            mode_bar_buttons_to_remove: ["pan2d", "lasso2d", "toImage", "toggleHover", "select2d"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl MapLayout {
    /// Plotly config object for the map graph.
    pub fn plot_config(&self) -> Value {
        let display_mode_bar = match self.display_mode_bar.as_str() {
            "true" => json!(true),
            "false" => json!(false),
            other => json!(other),
        };
        json!({
            "displayModeBar": display_mode_bar,
            "scrollZoom": self.scroll_zoom,
            "modeBarButtonsToRemove": self.mode_bar_buttons_to_remove,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub height: u32,
    /// Bottom margin in pixels, room for the category labels.
    pub margin_bottom: u32,
    pub export: ImageExport,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self { height: 500, margin_bottom: 100, export: ImageExport::default() }
    }
}

/// Options for the chart's "download as image" button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageExport {
    pub format: String,
    pub filename: String,
    pub height: u32,
    pub width: u32,
    pub scale: u32,
}

impl Default for ImageExport {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            filename: "CommunityRisk".to_string(),
            height: 500,
            width: 1200,
            scale: 1,
        }
    }
}

// ── Map token ────────────────────────────────────────────────────────────────

/// Access token for the map-tile service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct MapboxToken(String);

impl MapboxToken {
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token))
    }

    /// Read [`MAPBOX_TOKEN_ENV`]; its absence is a startup failure.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(MAPBOX_TOKEN_ENV).map_err(|_| ConfigError::MissingEnv(MAPBOX_TOKEN_ENV))?;
        Self::new(token)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MapboxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MapboxToken(..)")
    }
}
