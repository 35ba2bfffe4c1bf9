use std::env;
use std::path::PathBuf;

/// A settled gesture replayed from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Zoom by a factor.
    Zoom(f64),
    /// Drag by a number of pixels.
    Pan(f64),
    /// Back to the full domain.
    Reset,
}

#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub series: Option<PathBuf>,
    pub seed: Option<u64>,
    pub actions: Vec<Action>,
    pub width: Option<f64>,
    pub json: bool,
    pub labels_out: Option<PathBuf>,
    pub window_out: Option<PathBuf>,
    pub verbose: bool,
    pub tui: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--series" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --series (expected a CSV file path)")?;
                if opts.series.replace(PathBuf::from(path)).is_some() {
                    return Err("--series provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--zoom" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --zoom (expected a factor)")?;
                let factor = parse_finite("--zoom", raw)?;
                if factor <= 0.0 {
                    return Err(format!("--zoom value \"{raw}\" must be > 0"));
                }
                opts.actions.push(Action::Zoom(factor));
            }
            "--pan" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --pan (expected pixels)")?;
                opts.actions.push(Action::Pan(parse_finite("--pan", raw)?));
            }
            "--reset" => opts.actions.push(Action::Reset),
            "--width" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --width (expected pixels)")?;
                let width = parse_finite("--width", raw)?;
                if width <= 0.0 {
                    return Err(format!("--width value \"{raw}\" must be > 0"));
                }
                opts.width = Some(width);
            }
            "--json" => opts.json = true,
            "--labels-out" => {
                i += 1;
                let path = args
                    .next_or_err(i, "missing value for --labels-out (expected a file path)")?;
                if opts.labels_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--labels-out provided more than once".to_string());
                }
            }
            "--window-out" => {
                i += 1;
                let path = args
                    .next_or_err(i, "missing value for --window-out (expected a file path)")?;
                if opts.window_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--window-out provided more than once".to_string());
                }
            }
            "--verbose" | "-v" => opts.verbose = true,
            "--tui" => opts.tui = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.config.is_none() && opts.preset.is_none() {
        opts.preset = Some("heart_rate".to_string());
    }

    Ok(opts)
}

fn parse_finite(flag: &str, raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("{flag} value \"{raw}\" is not a finite number"))
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("fitchart: readable axes and pan/zoom windows for workout charts");
    eprintln!();
    eprintln!("Usage: fitchart [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>        Load chart configuration from a TOML file");
    eprintln!("  --preset <name>        Use a built-in preset (heart_rate, pace, pace_imperial, elevation)");
    eprintln!("  --series <path>        Plot an x,y CSV file instead of the synthetic workout");
    eprintln!("  --seed <u64>           Override the workout seed");
    eprintln!("  --zoom <factor>        Settle a zoom gesture (repeatable, applied in order)");
    eprintln!("  --pan <pixels>         Settle a drag gesture (repeatable, applied in order)");
    eprintln!("  --reset                Return to the full domain");
    eprintln!("  --width <pixels>       Plot width used to scale drags");
    eprintln!("  --json                 Print the final frame as JSON");
    eprintln!("  --labels-out <path>    Write the final tick labels to CSV");
    eprintln!("  --window-out <path>    Write the visible points to CSV");
    eprintln!("  --verbose, -v          Debug logging on stderr");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                  Open the interactive viewer");
    eprintln!("  --help                 Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the heart_rate preset is used.");
}
