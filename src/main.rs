use {
    anyhow::Context,
    candle_deck::{
        Cli, HeadlessSurface, Panel, RefreshController, RefreshRequest, Timeframe, WidgetState,
        config::{
            MaConfig, MacdConfig,
            constants::{PADDING_SCALE, widget},
        },
    },
    clap::Parser,
    std::panic,
    tabled::{Table, Tabled},
};

#[derive(Tabled)]
struct LimitRow {
    panel: String,
    raw_min: String,
    raw_max: String,
    padded_min: String,
    padded_max: String,
}

fn main() -> anyhow::Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Warn)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("candle_deck"), my_code_level)
        .init();

    let args = Cli::parse();
    let timeframe: Timeframe = args
        .timeframe
        .parse()
        .with_context(|| format!("bad --timeframe '{}'", args.timeframe))?;

    let widgets = WidgetState {
        asset: args.asset.clone(),
        pair: args.pair.clone(),
        timeframe,
        timezone_label: widget::DEFAULT_TIMEZONE_LABEL.to_string(),
        ma_label: widget::DEFAULT_MA_LABEL.to_string(),
    };

    let mut controller = RefreshController::new(
        &args.data_dir,
        &widgets,
        MaConfig::default(),
        MacdConfig::default(),
    )
    .with_context(|| format!("loading {}/{} from {}", args.asset, args.pair, args.data_dir.display()))?;

    let mut surface = HeadlessSurface::default();
    controller.refresh(&RefreshRequest::init(), &widgets, &mut surface)?;

    println!(
        "candle-deck | {} {}/{} | {} rows",
        timeframe,
        args.asset,
        args.pair,
        controller.dataset().len()
    );

    let rows: Vec<LimitRow> = Panel::ALL
        .iter()
        .map(|&panel| {
            let (raw_min, raw_max) = controller.limits().for_panel(panel);
            let (padded_min, padded_max) = controller.limits().padded(panel, PADDING_SCALE);
            LimitRow {
                panel: panel.to_string(),
                raw_min: format!("{raw_min:.4}"),
                raw_max: format!("{raw_max:.4}"),
                padded_min: format!("{padded_min:.4}"),
                padded_max: format!("{padded_max:.4}"),
            }
        })
        .collect();
    println!("{}", Table::new(rows));

    if args.dump_payload {
        let payload = surface
            .last_payload
            .as_ref()
            .context("no payload published")?;
        println!("{}", serde_json::to_string_pretty(payload)?);
    }

    Ok(())
}
