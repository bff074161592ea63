//! The seam between the core and the external plotting surface.

use {crate::dataset::Panel, serde::Serialize};

/// One axis range in epoch milliseconds (horizontal) or data units (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AxisWindow {
    pub start: f64,
    pub end: f64,
}

impl AxisWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn shifted(self, delta_ms: f64) -> Self {
        Self {
            start: self.start + delta_ms,
            end: self.end + delta_ms,
        }
    }
}

/// Flat column mapping handed to the render surface as one atomic dataset
/// replacement. All columns have equal length.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChartPayload {
    pub time: Vec<i64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,

    pub candle_wick_color: Vec<&'static str>,
    pub candle_body_fill_color: Vec<&'static str>,
    pub candle_body_line_color: Vec<&'static str>,
    pub candle_bound_min: Vec<f64>,
    pub candle_bound_max: Vec<f64>,

    pub ma_slow: Vec<f64>,
    pub ma_fast: Vec<f64>,

    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub macd_bound_min: Vec<f64>,
    pub macd_bound_max: Vec<f64>,

    pub volume: Vec<f64>,
    pub volume_bound_min: Vec<f64>,
    pub volume_bound_max: Vec<f64>,

    pub signature: Vec<String>,
    pub bar_width: Vec<f64>,
}

impl ChartPayload {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// What the core needs from the plotting surface: the currently rendered
/// candlestick time window (captures user pan/zoom between cycles), writable
/// per-panel vertical ranges, and atomic payload replacement.
pub trait RenderSurface {
    fn x_window(&self) -> AxisWindow;
    fn set_x_window(&mut self, window: AxisWindow);
    fn set_y_window(&mut self, panel: Panel, window: AxisWindow);
    fn publish(&mut self, payload: ChartPayload);
}

/// Records what the controller pushes; stands in for the browser plot in the
/// binary and in tests.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    x: AxisWindow,
    y: [AxisWindow; 3],
    pub last_payload: Option<ChartPayload>,
    pub publish_count: usize,
}

fn panel_slot(panel: Panel) -> usize {
    match panel {
        Panel::Candlestick => 0,
        Panel::Volume => 1,
        Panel::Macd => 2,
    }
}

impl HeadlessSurface {
    pub fn y_window(&self, panel: Panel) -> AxisWindow {
        self.y[panel_slot(panel)]
    }
}

impl RenderSurface for HeadlessSurface {
    fn x_window(&self) -> AxisWindow {
        self.x
    }

    fn set_x_window(&mut self, window: AxisWindow) {
        self.x = window;
    }

    fn set_y_window(&mut self, panel: Panel, window: AxisWindow) {
        self.y[panel_slot(panel)] = window;
    }

    fn publish(&mut self, payload: ChartPayload) {
        self.last_payload = Some(payload);
        self.publish_count += 1;
    }
}
