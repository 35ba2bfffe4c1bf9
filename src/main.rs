//! fitchart entry point: CLI wiring, chart construction and gesture replay.

mod cli;

use std::io;
use std::path::Path;
use std::process;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Action, CliOptions};
use fitchart::chart::Chart;
use fitchart::config::ChartConfig;
use fitchart::demo::WorkoutGenerator;
use fitchart::io::export::{export_frame_csv, export_window_csv};
use fitchart::io::import::load_series;
use fitchart::range::{RangeSnapshot, Readable};
use fitchart::series::PointSeries;
use fitchart::viewport::{ViewportEngine, ViewportFrame};

/// JSON document printed by `--json`.
#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    points: usize,
    x_axis: RangeSnapshot,
    y_axis: RangeSnapshot,
    frame: &'a ViewportFrame,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &CliOptions) -> ChartConfig {
    // --config takes priority, then --preset
    let loaded = match (&cli.config, &cli.preset) {
        (Some(path), _) => ChartConfig::from_toml_file(path),
        (None, Some(name)) => ChartConfig::from_preset(name),
        (None, None) => Ok(ChartConfig::heart_rate()),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed {
        config.data.seed = seed;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn load_points(cli: &CliOptions, config: &ChartConfig) -> PointSeries {
    if let Some(path) = &cli.series {
        return load_series(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            process::exit(1);
        });
    }
    let Some(generator) = WorkoutGenerator::from_config(&config.data) else {
        eprintln!("error: unknown workout \"{}\"", config.data.source);
        process::exit(1);
    };
    generator
        .with_pace_unit(config.y_axis.data_unit)
        .series(config.data.samples)
}

fn replay(engine: &mut ViewportEngine<'_>, actions: &[Action], width: f64) -> ViewportFrame {
    let mut frame = engine.frame();
    for action in actions {
        frame = match *action {
            Action::Zoom(factor) => engine.on_zoom_settle(factor),
            Action::Pan(pixels) => engine.on_pan_settle(pixels, width),
            Action::Reset => engine.reset(),
        };
    }
    frame
}

fn print_axis(name: &str, axis: &dyn Readable, labels: &[String]) {
    let annotation = axis
        .label_factor_label()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default();
    println!("{name}{annotation}: {}", labels.join("  "));
}

fn print_frame(source: &str, chart: &Chart, frame: &ViewportFrame) {
    println!(
        "{source}: {} points, zoom {:.2}, pan {:.3}",
        chart.series().len(),
        frame.zoom,
        frame.pan
    );
    println!(
        "visible x {}  y {}  points {}..{}",
        frame.visible_x_range,
        frame.visible_y_range,
        frame.visible_index_range.start,
        frame.visible_index_range.end
    );
    print_axis("x", chart.x_axis(), &frame.x_labels);
    print_axis("y", chart.y_axis(), &frame.y_labels);
}

fn main() {
    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    init_logging(cli.verbose);

    let config = load_config(&cli);
    let source = match &cli.series {
        Some(path) => path.display().to_string(),
        None => config.data.source.clone(),
    };

    if cli.tui {
        run_tui(&cli, config);
        return;
    }

    let series = load_points(&cli, &config);
    let chart = Chart::new(series, &config.x_spec(), &config.y_spec()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    let mut engine = chart
        .viewport()
        .with_limits(config.viewport.max_zoom, config.viewport.min_y_span_fraction);
    let width = cli.width.unwrap_or(config.viewport.pixel_width);
    let frame = replay(&mut engine, &cli.actions, width);
    info!(
        actions = cli.actions.len(),
        zoom = frame.zoom,
        visible = frame.visible_index_range.len(),
        "viewport settled"
    );

    if cli.json {
        let report = Report {
            source: &source,
            points: chart.series().len(),
            x_axis: chart.x_axis().snapshot(),
            y_axis: chart.y_axis().snapshot(),
            frame: &frame,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize frame: {e}");
                process::exit(1);
            }
        }
    } else {
        print_frame(&source, &chart, &frame);
    }

    if let Some(path) = &cli.labels_out {
        write_or_exit(export_frame_csv(&frame, path), path, "labels");
    }
    if let Some(path) = &cli.window_out {
        write_or_exit(
            export_window_csv(engine.visible_points(), path),
            path,
            "visible points",
        );
    }
}

fn write_or_exit(result: io::Result<()>, path: &Path, what: &str) {
    if let Err(e) = result {
        eprintln!("error: failed to write CSV: {e}");
        process::exit(1);
    }
    eprintln!("{what} written to {}", path.display());
}

#[cfg(feature = "tui")]
fn run_tui(cli: &CliOptions, config: ChartConfig) {
    let name = cli.preset.clone().unwrap_or_else(|| "custom".to_string());
    let series = cli.series.as_ref().map(|_| load_points(cli, &config));
    if let Err(e) = fitchart::tui::run(&name, config, series) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(_cli: &CliOptions, _config: ChartConfig) {
    eprintln!("error: --tui requires building with `--features tui`");
    process::exit(1);
}
