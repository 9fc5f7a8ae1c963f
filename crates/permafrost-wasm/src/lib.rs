//! Browser bindings: one `DashboardSession` per page, driven by the page's
//! selector and map callbacks.

use permafrost_core::{Dashboard, DashboardConfig, Dataset, MapboxToken, SelectionEvent, SelectorValue, Session};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize with plain JS objects rather than `Map`s, as Plotly expects.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_err)
}

#[wasm_bindgen]
pub struct DashboardSession {
    session: Session,
    token: MapboxToken,
}

#[wasm_bindgen]
impl DashboardSession {
    /// `csv` is the community table; `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(csv: &str, config_json: &str, mapbox_token: &str) -> Result<DashboardSession, JsValue> {
        let dataset = Dataset::from_csv_str(csv).map_err(js_err)?;
        let config = if config_json.trim().is_empty() {
            DashboardConfig::default()
        } else {
            DashboardConfig::from_json_str(config_json).map_err(js_err)?
        };
        let token = MapboxToken::new(mapbox_token).map_err(js_err)?;
        let dashboard = Dashboard::new(dataset, config).map_err(js_err)?;
        Ok(DashboardSession { session: dashboard.session(), token })
    }

    #[wasm_bindgen(js_name = communityOptions)]
    pub fn community_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.community_options())
    }

    #[wasm_bindgen(js_name = categoryOptions)]
    pub fn category_options(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.category_options())
    }

    /// Current selection as `{ communities, category }`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.selection())
    }

    /// Selector change. Accepts a single name, an array of names, or
    /// `null`/`undefined` for a cleared selector, which restores the default
    /// community.
    #[wasm_bindgen(js_name = selectCommunities)]
    pub fn select_communities(&mut self, value: JsValue) -> Result<(), JsValue> {
        let value: Option<SelectorValue> = if value.is_null() || value.is_undefined() {
            None
        } else {
            Some(serde_wasm_bindgen::from_value(value)?)
        };
        self.session.apply(SelectionEvent::from_selector(value)).map_err(js_err)
    }

    #[wasm_bindgen(js_name = selectCategory)]
    pub fn select_category(&mut self, category: &str) -> Result<(), JsValue> {
        self.session
            .apply(SelectionEvent::CategoryChanged(category.to_string()))
            .map_err(js_err)
    }

    /// Map click; `hover_text` is the clicked marker's text.
    #[wasm_bindgen(js_name = clickMap)]
    pub fn click_map(&mut self, hover_text: &str) -> Result<(), JsValue> {
        self.session
            .apply(SelectionEvent::MapClick { hover_text: hover_text.to_string() })
            .map_err(js_err)
    }

    #[wasm_bindgen(js_name = mapFigure)]
    pub fn map_figure(&self) -> Result<JsValue, JsValue> {
        let spec = self.session.map().map_err(js_err)?;
        to_js(&spec.to_figure(&self.session.config().map, &self.token))
    }

    #[wasm_bindgen(js_name = chartFigure)]
    pub fn chart_figure(&self) -> Result<JsValue, JsValue> {
        let spec = self.session.chart().map_err(js_err)?;
        to_js(&spec.to_figure(&self.session.config().chart))
    }

    /// Plotly config for the map: mode bar on hover, scroll zoom.
    #[wasm_bindgen(js_name = mapConfig)]
    pub fn map_config(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.config().map.plot_config())
    }

    /// Plotly config for the chart's image-export button.
    #[wasm_bindgen(js_name = chartConfig)]
    pub fn chart_config(&self) -> Result<JsValue, JsValue> {
        to_js(&serde_json::json!({ "toImageButtonOptions": self.session.config().chart.export }))
    }

    #[wasm_bindgen(js_name = tableData)]
    pub fn table_data(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.table().map_err(js_err)?)
    }
}
