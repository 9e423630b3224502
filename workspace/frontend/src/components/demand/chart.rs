use common::PopularRoute;
use plotly::common::{Line, Marker, Title};
use plotly::layout::{Axis, RangeMode};
use plotly::{Bar, Layout};
use serde_json::{json, Value};
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Legend label of the deal-count series
pub const DATASET_LABEL: &str = "Number of Deals Found";
pub const Y_AXIS_TITLE: &str = "Number of Deals";
const HOVER_TEMPLATE: &str = "Deals: %{y}<extra></extra>";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, catch)]
    fn purge(div_id: &str) -> Result<(), JsValue>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Failed to serialize chart: {0}")]
    Serialize(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

/// One bar per airline, height = number of deals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<u32>,
}

impl BarChartSpec {
    /// Keeps the route order as received.
    pub fn from_routes(routes: &[PopularRoute]) -> Self {
        Self {
            labels: routes.iter().map(|r| r.airline.clone()).collect(),
            values: routes.iter().map(|r| r.deal_count).collect(),
        }
    }

    pub fn bar_count(&self) -> usize {
        self.labels.len()
    }

    fn trace(&self) -> Box<Bar<String, u32>> {
        Bar::new(self.labels.clone(), self.values.clone())
            .name(DATASET_LABEL)
            .marker(
                Marker::new()
                    .color("rgba(0, 123, 255, 0.6)")
                    .line(Line::new().color("rgba(0, 123, 255, 1)").width(1.0)),
            )
    }

    fn layout(&self) -> Layout {
        Layout::new()
            .show_legend(false)
            .y_axis(
                Axis::new()
                    .title(Title::with_text(Y_AXIS_TITLE))
                    .range_mode(RangeMode::ToZero),
            )
    }

    /// Trace array in the shape `Plotly.newPlot` expects.
    pub fn plotly_data(&self) -> Result<Value, ChartError> {
        let mut trace =
            serde_json::to_value(self.trace()).map_err(|e| ChartError::Serialize(e.to_string()))?;
        trace["hovertemplate"] = json!(HOVER_TEMPLATE);
        Ok(json!([trace]))
    }

    pub fn plotly_layout(&self) -> Result<Value, ChartError> {
        serde_json::to_value(self.layout()).map_err(|e| ChartError::Serialize(e.to_string()))
    }
}

/// Something that can show a bar chart and later tear it down again.
pub trait ChartSurface {
    type Handle;

    fn draw(&mut self, chart: &BarChartSpec) -> Result<Self::Handle, ChartError>;

    fn dispose(&mut self, handle: Self::Handle);
}

/// Live Plotly plot bound to an element id
#[derive(Debug)]
pub struct PlotlyChart {
    element_id: String,
}

/// Draws into the element with the given id through the global `Plotly` object
#[derive(Debug, Clone)]
pub struct PlotlySurface {
    element_id: String,
}

impl PlotlySurface {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

fn to_js(value: &Value) -> Result<JsValue, ChartError> {
    js_sys::JSON::parse(&value.to_string())
        .map_err(|e| ChartError::Serialize(format!("{:?}", e)))
}

impl ChartSurface for PlotlySurface {
    type Handle = PlotlyChart;

    fn draw(&mut self, chart: &BarChartSpec) -> Result<PlotlyChart, ChartError> {
        let data = to_js(&chart.plotly_data()?)?;
        let layout = to_js(&chart.plotly_layout()?)?;
        let config = to_js(&json!({"responsive": true, "displayModeBar": false}))?;

        new_plot(&self.element_id, data, layout, config)
            .map_err(|e| ChartError::Draw(format!("{:?}", e)))?;
        log::trace!("Drew {} bars into #{}", chart.bar_count(), self.element_id);

        Ok(PlotlyChart {
            element_id: self.element_id.clone(),
        })
    }

    fn dispose(&mut self, handle: PlotlyChart) {
        if let Err(e) = purge(&handle.element_id) {
            log::warn!("Failed to purge chart #{}: {:?}", handle.element_id, e);
        }
    }
}
