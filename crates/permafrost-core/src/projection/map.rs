//! Map markers coloured by the selected hazard category.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{MapLayout, MapboxToken};
use crate::dataset::Dataset;
use crate::error::DeriveError;
use crate::hazard::HazardCategory;
use crate::risk::{Color, ColorTable};

/// One community pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub color: Color,
    /// `"{name}: {label}"`; clicking the marker echoes this text back.
    pub hover_text: String,
}

/// Markers for every community, in dataset row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpec {
    pub category: HazardCategory,
    pub markers: Vec<MapMarker>,
}

pub fn project_map(
    dataset: &Dataset,
    colors: &ColorTable,
    category: HazardCategory,
) -> Result<MapSpec, DeriveError> {
    let markers = dataset
        .iter()
        .map(|c| {
            let color = colors.color_for(category, c.cell_value(category))?.clone();
            Ok(MapMarker {
                lat: c.latitude,
                lon: c.longitude,
                color,
                hover_text: format!("{}: {}", c.name, c.label(category)),
            })
        })
        .collect::<Result<Vec<_>, DeriveError>>()?;

    tracing::debug!("Projected {} map markers by {category}", markers.len());
    Ok(MapSpec { category, markers })
}

impl MapSpec {
    /// Plotly `scattermapbox` figure (`data` + `layout`).
    pub fn to_figure(&self, layout: &MapLayout, token: &MapboxToken) -> Value {
        let lat: Vec<f64> = self.markers.iter().map(|m| m.lat).collect();
        let lon: Vec<f64> = self.markers.iter().map(|m| m.lon).collect();
        let color: Vec<&str> = self.markers.iter().map(|m| m.color.as_str()).collect();
        let text: Vec<&str> = self.markers.iter().map(|m| m.hover_text.as_str()).collect();

        json!({
            "data": [{
                "type": "scattermapbox",
                "lat": lat,
                "lon": lon,
                "mode": "markers",
                "marker": { "size": layout.marker_size, "color": color },
                "text": text,
                "hoverinfo": "text",
            }],
            "layout": {
                "height": layout.height,
                "autosize": true,
                "hovermode": "closest",
                "mapbox": {
                    "accesstoken": token.expose(),
                    "zoom": layout.zoom,
                    "center": { "lat": layout.center_lat, "lon": layout.center_lon },
                    "style": layout.style,
                },
                "showlegend": false,
                "margin": { "l": 0, "r": 0, "t": 0, "b": 0 },
            },
        })
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
            community("Juneau", [0, 0, 0, 0, 0], 0, RiskLevel::None),
            community("Nome", [2, 2, 2, 2, 1], 9, RiskLevel::Medium),
        ])
        .unwrap()
    }

    #[test]
    fn one_marker_per_community_in_row_order() {
        let ds = dataset();
        let spec = project_map(&ds, &ColorTable::default(), HazardCategory::RiskLevel).unwrap();
        assert_eq!(spec.markers.len(), ds.len());
        let texts: Vec<_> = spec.markers.iter().map(|m| m.hover_text.as_str()).collect();
        assert_eq!(texts, ["Shishmaref: High", "Juneau: None", "Nome: Medium"]);
        let colors: Vec<_> = spec.markers.iter().map(|m| m.color.as_str()).collect();
        assert_eq!(colors, ["#8d2520", "#808080", "#F2CC50"]);
    }

    #[test]
    fn hazard_category_uses_label_and_blue_palette() {
        let ds = dataset();
        let spec = project_map(&ds, &ColorTable::default(), HazardCategory::ExistingProblems).unwrap();
        assert_eq!(spec.markers[2].hover_text, "Nome: problems");
        assert_eq!(spec.markers[2].color.as_str(), "#406080");
    }

    #[test]
    fn figure_carries_token_and_parallel_arrays() {
        let ds = dataset();
        let spec = project_map(&ds, &ColorTable::default(), HazardCategory::RiskLevel).unwrap();
        let token = MapboxToken::new("pk.test").unwrap();
        let fig = spec.to_figure(&MapLayout::default(), &token);
        assert_eq!(fig["layout"]["mapbox"]["accesstoken"], "pk.test");
        assert_eq!(fig["data"][0]["lat"].as_array().unwrap().len(), 3);
        assert_eq!(fig["data"][0]["marker"]["color"][0], "#8d2520");
        assert_eq!(fig["data"][0]["text"][1], "Juneau: None");
    }
}
