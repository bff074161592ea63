//! End-to-end refresh cycles against a headless render surface.

use candle_deck::{
    HeadlessSurface, Panel, RefreshController, RefreshRequest, RenderSurface, Timeframe,
    WidgetState,
    config::{MaConfig, MacdConfig, constants::PADDING_SCALE},
    indicators,
    refresh::AxisWindow,
};
use std::path::Path;

const HOUR_MS: f64 = 3_600_000.0;
const BASE_TS: i64 = 1_600_000_000; // unix seconds
const STEP_SECS: i64 = 300;

/// Eleven BTC/EUR rows (ten survive the drop of the unclosed bucket) with
/// strictly increasing closes 1..=11, plus a few BTC/USD rows to filter out.
fn write_fixture(dir: &Path) {
    let mut csv = String::from("timestamp,pair,open,high,low,close,volume\n");
    for i in 0..11i64 {
        let close = (i + 1) as f64;
        csv.push_str(&format!(
            "{},BTC/EUR,{},{},{},{},100.0\n",
            BASE_TS + i * STEP_SECS,
            close,
            close + 1.0,
            close - 1.0,
            close,
        ));
    }
    for i in 0..3i64 {
        csv.push_str(&format!("{},BTC/USD,5,6,4,5,50.0\n", BASE_TS + i * STEP_SECS));
    }
    std::fs::write(dir.join("data_5m.csv"), csv).unwrap();
}

fn widgets() -> WidgetState {
    WidgetState {
        asset: "BTC".into(),
        pair: "EUR".into(),
        timeframe: Timeframe::M5,
        timezone_label: "(UTC+01:00) London".into(),
        ma_label: "SMA (13/30)".into(),
    }
}

fn controller(dir: &Path, widgets: &WidgetState) -> RefreshController {
    RefreshController::new(dir, widgets, MaConfig::default(), MacdConfig::default()).unwrap()
}

fn close_enough(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn init_cycle_publishes_padded_ranges_and_full_window() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let widgets = widgets();
    let mut ctl = controller(dir.path(), &widgets);
    let mut surface = HeadlessSurface::default();

    ctl.refresh(&RefreshRequest::init(), &widgets, &mut surface).unwrap();

    assert_eq!(ctl.dataset().len(), 10);

    // Vertical ranges carry the 5% padding; the volume floor stays on the axis.
    let candle = surface.y_window(Panel::Candlestick);
    assert!(close_enough(candle.start, -0.55) && close_enough(candle.end, 11.55));
    // Volume floor stays at zero; only the ceiling is padded.
    let volume = surface.y_window(Panel::Volume);
    assert!(close_enough(volume.start, 0.0) && close_enough(volume.end, 105.0));
    let (macd_lo, macd_hi) = ctl.limits().padded(Panel::Macd, PADDING_SCALE);
    let macd = surface.y_window(Panel::Macd);
    assert!(close_enough(macd.start, macd_lo) && close_enough(macd.end, macd_hi));

    // Horizontal range spans the London-shifted dataset.
    let first_ms = (BASE_TS as f64 + 3600.0) * 1000.0;
    let last_ms = first_ms + 9.0 * STEP_SECS as f64 * 1000.0;
    let x = surface.x_window();
    assert!(close_enough(x.start, first_ms) && close_enough(x.end, last_ms));

    let payload = surface.last_payload.as_ref().unwrap();
    assert_eq!(payload.len(), 10);
    assert!(payload.signature.iter().all(|s| s == "BTC/EUR"));
    assert!(payload.bar_width.iter().all(|&w| w == 180_000.0));
    // All rows closed at or above the open: increasing colour throughout.
    assert!(payload.candle_body_fill_color.iter().all(|&c| c == "#30A092"));
}

#[test]
fn timezone_switch_shifts_the_visible_window() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let mut widgets = widgets();
    let mut ctl = controller(dir.path(), &widgets);
    let mut surface = HeadlessSurface::default();
    ctl.refresh(&RefreshRequest::init(), &widgets, &mut surface).unwrap();

    // User pans to an arbitrary window, then picks Berlin (+1h from London).
    let panned = AxisWindow::new(1e12, 1e12 + 2.0 * HOUR_MS);
    surface.set_x_window(panned);
    widgets.timezone_label = "(UTC+02:00) Berlin".into();
    ctl.refresh(&RefreshRequest::timezone_changed(), &widgets, &mut surface).unwrap();

    let x = surface.x_window();
    assert!(close_enough(x.start, panned.start + HOUR_MS));
    assert!(close_enough(x.end, panned.end + HOUR_MS));
    assert_eq!(ctl.session().pending_delta_ms, 0.0);

    // Same zone again: no further shift.
    ctl.refresh(&RefreshRequest::timezone_changed(), &widgets, &mut surface).unwrap();
    let x2 = surface.x_window();
    assert!(close_enough(x2.start, x.start) && close_enough(x2.end, x.end));
}

#[test]
fn reset_in_a_changed_zone_lands_on_that_zones_wallclock() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let mut widgets = widgets();
    let mut ctl = controller(dir.path(), &widgets);
    let mut surface = HeadlessSurface::default();
    ctl.refresh(&RefreshRequest::init(), &widgets, &mut surface).unwrap();

    widgets.timezone_label = "(UTC+09:00) Tokyo".into();
    ctl.refresh(&RefreshRequest::timezone_changed(), &widgets, &mut surface).unwrap();

    // Reset while displaying Tokyo time: full range in Tokyo wall-clock,
    // vertical ranges back to the padded dataset limits.
    ctl.refresh(&RefreshRequest::reset_event(), &widgets, &mut surface).unwrap();

    let first_ms = (BASE_TS as f64 + 9.0 * 3600.0) * 1000.0;
    let last_ms = first_ms + 9.0 * STEP_SECS as f64 * 1000.0;
    let x = surface.x_window();
    assert!(close_enough(x.start, first_ms) && close_enough(x.end, last_ms));

    let candle = surface.y_window(Panel::Candlestick);
    let (lo, hi) = ctl.limits().padded(Panel::Candlestick, PADDING_SCALE);
    assert!(close_enough(candle.start, lo) && close_enough(candle.end, hi));
}

#[test]
fn active_reset_republishes_padded_ranges_for_all_panels() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let widgets = widgets();
    let mut ctl = controller(dir.path(), &widgets);
    let mut surface = HeadlessSurface::default();
    ctl.refresh(&RefreshRequest::init(), &widgets, &mut surface).unwrap();

    // Disturb every axis, then reload with reset.
    surface.set_x_window(AxisWindow::new(1.0, 2.0));
    for panel in Panel::ALL {
        surface.set_y_window(panel, AxisWindow::new(-1.0, 1.0));
    }
    ctl.refresh(&RefreshRequest::reload(), &widgets, &mut surface).unwrap();

    for panel in Panel::ALL {
        let (lo, hi) = ctl.limits().padded(panel, PADDING_SCALE);
        let y = surface.y_window(panel);
        assert!(close_enough(y.start, lo) && close_enough(y.end, hi), "{panel}");
    }
    assert_eq!(surface.publish_count, 2);
}

#[test]
fn ma_kind_switch_needs_no_reload() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let mut widgets = widgets();
    let mut ctl = controller(dir.path(), &widgets);
    let mut surface = HeadlessSurface::default();
    ctl.refresh(&RefreshRequest::init(), &widgets, &mut surface).unwrap();

    widgets.ma_label = "EMA (13/30)".into();
    ctl.refresh(&RefreshRequest::ma_kind_changed(), &widgets, &mut surface).unwrap();

    let payload = surface.last_payload.as_ref().unwrap();
    let expected = indicators::ema(&ctl.dataset().close, MaConfig::default().slow_period);
    assert_eq!(payload.ma_slow, expected);
    assert_eq!(surface.publish_count, 2);
}

#[test]
fn failed_cycle_leaves_published_state_and_session_intact() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let mut widgets = widgets();
    let mut ctl = controller(dir.path(), &widgets);
    let mut surface = HeadlessSurface::default();
    ctl.refresh(&RefreshRequest::init(), &widgets, &mut surface).unwrap();

    let zone_before = ctl.session().timezone.current.clone();
    let rows_before = ctl.dataset().len();

    // The requested pair is not in the source file.
    widgets.pair = "GBP".into();
    widgets.timezone_label = "(UTC+09:00) Tokyo".into();
    let err = ctl.refresh(&RefreshRequest::pair_changed(), &widgets, &mut surface);
    assert!(err.is_err());

    assert_eq!(surface.publish_count, 1);
    assert_eq!(ctl.session().timezone.current, zone_before);
    assert_eq!(ctl.dataset().len(), rows_before);

    // An unknown timezone label aborts before anything is touched, too.
    widgets.pair = "EUR".into();
    widgets.timezone_label = "(UTC+99:00) Nowhere".into();
    let err = ctl.refresh(&RefreshRequest::timezone_changed(), &widgets, &mut surface);
    assert!(err.is_err());
    assert_eq!(surface.publish_count, 1);
    assert_eq!(ctl.session().timezone.current, zone_before);
}
