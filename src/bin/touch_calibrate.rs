use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use touch_calibrator::calibration::{ReportFormat, ReportSink};
use touch_calibrator::{AppConfig, AxisRange, CalibrationError, Calibrator, ClickPoint};
use tracing_subscriber::EnvFilter;

/// Exit code when the session ends before all four corners were clicked
const EXIT_INCOMPLETE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("touch-calibrate error: {err:?}");
            ExitCode::from(1)
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "touch-calibrate",
    about = "Four-point touchscreen calibration from recorded corner clicks"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn execute(self) -> Result<ExitCode> {
        match self.command {
            Command::Run(args) => run_command(args),
            Command::Defaults => defaults_command(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay corner clicks through the calibrator and print the new range.
    Run(RunArgs),
    /// Print the default configuration as JSON.
    Defaults,
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Device name used in reports and diagnostics.
    #[arg(long, default_value = "touchscreen")]
    device: String,
    /// Display width in pixels.
    #[arg(long)]
    width: u32,
    /// Display height in pixels.
    #[arg(long)]
    height: u32,
    /// Range currently in effect on the device (defaults to the display size).
    #[arg(
        long,
        num_args = 4,
        value_names = ["MINX", "MAXX", "MINY", "MAXY"],
        allow_negative_numbers = true
    )]
    precalib: Option<Vec<i32>>,
    /// Corner click in raw coordinates, in UL, UR, LL, LR order. Repeatable.
    #[arg(long = "click", value_name = "X,Y", value_parser = parse_click, allow_hyphen_values = true)]
    clicks: Vec<ClickPoint>,
    /// JSON file holding an array of [x, y] clicks, replayed after --click.
    #[arg(long = "clicks", value_name = "FILE")]
    clicks_file: Option<PathBuf>,
    /// Mis-click threshold in pixels.
    #[arg(long)]
    misclick: Option<i32>,
    /// Double-click threshold in pixels (0 disables).
    #[arg(long)]
    doubleclick: Option<i32>,
    /// Grid divisions of the calibration target.
    #[arg(long)]
    num_blocks: Option<u32>,
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit debug diagnostics for every click.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
    /// Output format for the calibration report.
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

fn parse_click(value: &str) -> Result<ClickPoint, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("click must use X,Y format: {value}"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("invalid x in {value}: {err}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("invalid y in {value}: {err}"))?;
    Ok(ClickPoint::new(x, y))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

impl RunArgs {
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::try_load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AppConfig::default(),
        };

        let calibrator = &mut config.calibrator;
        if let Some(t) = self.misclick {
            calibrator.threshold_misclick = t;
        }
        if let Some(t) = self.doubleclick {
            calibrator.threshold_doubleclick = t;
        }
        if let Some(n) = self.num_blocks {
            calibrator.num_blocks = n;
        }
        calibrator.verbose |= self.verbose;
        calibrator.validate()?;

        Ok(config)
    }

    fn old_axys(&self) -> Result<AxisRange> {
        match self.precalib.as_deref() {
            Some([x_min, x_max, y_min, y_max]) => {
                Ok(AxisRange::new(*x_min, *x_max, *y_min, *y_max))
            }
            Some(other) => bail!("--precalib needs 4 values, got {}", other.len()),
            None => Ok(AxisRange::for_display(self.width, self.height)),
        }
    }

    fn all_clicks(&self) -> Result<Vec<ClickPoint>> {
        let mut clicks = self.clicks.clone();
        if let Some(path) = &self.clicks_file {
            let data =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let recorded: Vec<(i32, i32)> = serde_json::from_str(&data)
                .with_context(|| format!("parsing clicks from {}", path.display()))?;
            clicks.extend(recorded.into_iter().map(ClickPoint::from));
        }
        if clicks.is_empty() {
            bail!("Provide corner clicks via --click or --clicks");
        }
        Ok(clicks)
    }
}

fn run_command(args: RunArgs) -> Result<ExitCode> {
    if args.width == 0 || args.height == 0 {
        bail!("Display width and height must be greater than zero");
    }

    let config = args.load_config()?;
    init_logging(config.calibrator.verbose);

    let old_axys = args.old_axys()?;
    let clicks = args.all_clicks()?;
    let mut calibrator = Calibrator::from_config(&args.device, old_axys, &config.calibrator);

    tracing::info!(
        "Calibrating '{}' from {} on a {}x{} display",
        args.device,
        old_axys,
        args.width,
        args.height
    );

    for click in clicks {
        let Some(corner) = calibrator.next_corner() else {
            eprintln!("Ignoring extra click {},{}", click.x, click.y);
            continue;
        };
        if !calibrator.add_click(click.x, click.y) {
            eprintln!(
                "Click {},{} for {} rejected as a double-click",
                click.x,
                click.y,
                corner.display_name()
            );
        }
    }

    let stdout = io::stdout();
    let mut sink = ReportSink::new(stdout.lock(), &args.device, args.format.into());
    match calibrator.finish(
        args.width,
        args.height,
        config.calibrator.num_blocks,
        &mut sink,
    ) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(CalibrationError::InsufficientClicks {
            required,
            collected,
        }) => {
            eprintln!("Only {collected} of {required} corner clicks accepted; calibration incomplete");
            Ok(ExitCode::from(EXIT_INCOMPLETE))
        }
        Err(err) => Err(err).context("finishing calibration"),
    }
}

fn defaults_command() -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(&AppConfig::default())?;
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}
