//! Refresh orchestration: the state machine that runs one synchronous cycle
//! per user interaction.
//!
//! Cycle stages: reload decision, timezone update, wrangle, axis update,
//! payload assembly, publish. Cycles never overlap; the hosting event loop
//! serializes callbacks. All fallible work happens before the first session
//! commit, so an aborted cycle leaves the previously published state intact.

mod surface;

pub use surface::{AxisWindow, ChartPayload, HeadlessSurface, RenderSurface};

use {
    crate::{
        config::{MaConfig, MaKind, MacdConfig, constants},
        data,
        dataset::{self, Panel, RawLimits, WorkingDataset},
        domain::{CandleKind, Timeframe},
        error::Result,
        timezone,
    },
    log::{debug, info},
    std::path::PathBuf,
};

/// Live widget values, owned by the embedding UI and read once per cycle.
#[derive(Debug, Clone)]
pub struct WidgetState {
    pub asset: String,
    pub pair: String,
    pub timeframe: Timeframe,
    pub timezone_label: String,
    /// Moving-average selector label, e.g. `"SMA (13/30)"`.
    pub ma_label: String,
}

impl WidgetState {
    /// The `pair` column signature the source file stores, e.g. `BTC/EUR`.
    pub fn field(&self) -> String {
        format!("{}/{}", self.asset, self.pair)
    }
}

/// One cycle's inputs. The task label is used only for traceability.
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    pub task: String,
    /// Reload from source before anything else?
    pub active: bool,
    /// Reset the axes to the full dataset, discarding the visible window?
    pub axis_reset: bool,
    /// Recompute the MA columns from the live widget kind?
    pub wrangle: bool,
}

impl RefreshRequest {
    fn new(task: &str, active: bool, axis_reset: bool, wrangle: bool) -> Self {
        Self {
            task: task.to_string(),
            active,
            axis_reset,
            wrangle,
        }
    }

    // Asset, pair and timeframe changes restructure the dataset and need a
    // reload; MA-kind and timezone changes do not.

    pub fn init() -> Self {
        Self::new("main:init", true, true, false)
    }

    pub fn asset_changed() -> Self {
        Self::new("select:asset", true, false, true)
    }

    pub fn pair_changed() -> Self {
        Self::new("select:pair", true, false, true)
    }

    pub fn timeframe_changed() -> Self {
        Self::new("select:timeframe", true, true, true)
    }

    pub fn ma_kind_changed() -> Self {
        Self::new("select:mavg", false, false, true)
    }

    pub fn timezone_changed() -> Self {
        Self::new("select:timezone", false, false, false)
    }

    pub fn reload() -> Self {
        Self::new("reload", true, true, true)
    }

    /// The surface's reset event: re-fit axes without touching the source.
    pub fn reset_event() -> Self {
        Self::new("main:reset", false, true, false)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ZoneHistory {
    pub previous: Option<String>,
    pub current: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct WindowHistory {
    pub previous: AxisWindow,
    pub current: AxisWindow,
}

/// Session state carried across cycles. Mutated only by the controller, and
/// only after every fallible step of the cycle has succeeded.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub timezone: ZoneHistory,
    pub window: WindowHistory,
    pub pending_delta_ms: f64,
}

pub struct RefreshController {
    data_dir: PathBuf,
    ma_config: MaConfig,
    macd_config: MacdConfig,

    dataset: WorkingDataset,
    limits: RawLimits,
    /// Exchange-time (UTC) date snapshot, immutable per reload; every rebase
    /// starts from here to avoid compounding shifts.
    exchange_dates_ms: Vec<i64>,

    session: SessionState,
}

impl RefreshController {
    /// Build the controller with an initial source load for the current
    /// widget selection.
    pub fn new(
        data_dir: impl Into<PathBuf>,
        widgets: &WidgetState,
        ma_config: MaConfig,
        macd_config: MacdConfig,
    ) -> Result<Self> {
        let data_dir = data_dir.into();
        let path = data::source_path(&data_dir, widgets.timeframe);
        let rows = data::load_candles(&path, &widgets.field())?;
        let (dataset, limits) = dataset::build(&rows, &ma_config, &macd_config, true)?;
        let exchange_dates_ms = dataset.dates_ms.clone();

        let mut session = SessionState::default();
        session.timezone.current = Some(timezone::EXCHANGE_LABEL.to_string());

        Ok(Self {
            data_dir,
            ma_config,
            macd_config,
            dataset,
            limits,
            exchange_dates_ms,
            session,
        })
    }

    pub fn dataset(&self) -> &WorkingDataset {
        &self.dataset
    }

    pub fn limits(&self) -> &RawLimits {
        &self.limits
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Run one full refresh cycle against the render surface.
    pub fn refresh(
        &mut self,
        request: &RefreshRequest,
        widgets: &WidgetState,
        surface: &mut impl RenderSurface,
    ) -> Result<()> {
        info!("refresh cycle: task={}", request.task);

        // Stage every fallible step before the first session commit.
        let previous_label = self
            .session
            .timezone
            .current
            .clone()
            .unwrap_or_else(|| timezone::EXCHANGE_LABEL.to_string());
        let current_label = widgets.timezone_label.clone();
        timezone::lookup(&previous_label)?;
        timezone::lookup(&current_label)?;

        let live_kind = MaKind::from_label(&widgets.ma_label)?;

        let reloaded = if request.active {
            let path = data::source_path(&self.data_dir, widgets.timeframe);
            let rows = data::load_candles(&path, &widgets.field())?;
            Some(dataset::build(&rows, &self.ma_config, &self.macd_config, true)?)
        } else {
            None
        };

        // RELOAD_DECISION: swap in the fresh dataset and exchange snapshot.
        if let Some((fresh, limits)) = reloaded {
            self.exchange_dates_ms = fresh.dates_ms.clone();
            self.dataset = fresh;
            self.limits = limits;
            debug!("reloaded source: {} rows for {}", self.dataset.len(), self.dataset.pair);
        }

        // TIMEZONE_UPDATE: push history, then shift from the immutable
        // exchange snapshot. Rebase happens even when the zone is unchanged
        // (first run, and reloads replace the date column).
        self.session.timezone.previous = Some(previous_label.clone());
        self.session.timezone.current = Some(current_label.clone());

        self.dataset.dates_ms = timezone::rebase(&self.exchange_dates_ms, &current_label)?;
        let delta_ms = if previous_label != current_label && !request.axis_reset {
            timezone::compute_delta_ms(&self.exchange_dates_ms, &previous_label, &current_label)?
        } else {
            0.0
        };
        self.session.pending_delta_ms = delta_ms;
        debug!(
            "timezone: '{previous_label}' -> '{current_label}', delta {delta_ms} ms"
        );

        // CALLBACK_WRANGLE: the MA columns follow the live widget kind, which
        // may differ from the kind used at the last reload.
        if request.wrangle {
            dataset::recompute_moving_averages(&mut self.dataset, live_kind, &self.ma_config);
            debug!("wrangle: moving averages recomputed as {live_kind}");
        }

        // AXIS_UPDATE: the surface's current window captures any user
        // pan/zoom since the last cycle.
        self.session.window.previous = self.session.window.current;
        self.session.window.current = surface.x_window();

        if request.axis_reset {
            for panel in Panel::ALL {
                let (lower, upper) = self.limits.padded(panel, constants::PADDING_SCALE);
                debug!("axis reset: {panel} y-range [{lower}, {upper}]");
                surface.set_y_window(panel, AxisWindow::new(lower, upper));
            }
            let full = AxisWindow::new(
                self.dataset.first_date_ms().unwrap_or(0) as f64,
                self.dataset.last_date_ms().unwrap_or(0) as f64,
            );
            surface.set_x_window(full);
            self.session.window.current = full;
        } else if delta_ms != 0.0 {
            let shifted = self.session.window.current.shifted(delta_ms);
            debug!("axis shift: [{}, {}]", shifted.start, shifted.end);
            surface.set_x_window(shifted);
            self.session.window.current = shifted;
        }
        // The delta is consumed either way.
        self.session.pending_delta_ms = 0.0;

        // PAYLOAD_ASSEMBLE + PUBLISH: one atomic replacement.
        surface.publish(self.assemble_payload(widgets.timeframe));
        info!("refresh cycle done: task={}", request.task);
        Ok(())
    }

    fn assemble_payload(&self, timeframe: Timeframe) -> ChartPayload {
        let ds = &self.dataset;
        let len = ds.len();

        let mut colors = Vec::with_capacity(len);
        for i in 0..len {
            let kind = if ds.close[i] < ds.open[i] {
                CandleKind::Bearish
            } else {
                CandleKind::Bullish
            };
            colors.push(match kind {
                CandleKind::Bullish => constants::INCREASING_COLOR,
                CandleKind::Bearish => constants::DECREASING_COLOR,
            });
        }

        ChartPayload {
            time: ds.dates_ms.clone(),
            open: ds.open.clone(),
            high: ds.high.clone(),
            low: ds.low.clone(),
            close: ds.close.clone(),
            candle_wick_color: colors.clone(),
            candle_body_fill_color: colors.clone(),
            candle_body_line_color: colors,
            candle_bound_min: ds.candle_bound_min.clone(),
            candle_bound_max: ds.candle_bound_max.clone(),
            ma_slow: ds.ma_slow.clone(),
            ma_fast: ds.ma_fast.clone(),
            macd: ds.macd.clone(),
            macd_signal: ds.macd_signal.clone(),
            macd_histogram: ds.macd_histogram.clone(),
            macd_bound_min: ds.macd_bound_min.clone(),
            macd_bound_max: ds.macd_bound_max.clone(),
            volume: ds.volume.clone(),
            volume_bound_min: ds.volume_bound_min.clone(),
            volume_bound_max: ds.volume_bound_max.clone(),
            signature: vec![ds.pair.clone(); len],
            bar_width: vec![timeframe.bar_width_ms(); len],
        }
    }
}
