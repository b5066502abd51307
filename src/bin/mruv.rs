use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mruv_calculator::export::history::{self, HistoryLog};
use mruv_calculator::export::series::{write_plot_json, write_samples_csv};
use mruv_calculator::kinematics::{
    Mode, Scenario, build_equations, explain, find_extremum, find_stop_time, total_distance,
};
use mruv_calculator::problems;
use mruv_calculator::scenario::load_scenarios;
use mruv_calculator::series::{SampleWindow, plot_data, sample_motion};
use mruv_calculator::session::Session;
use mruv_calculator::symbolic::{Expression, differentiate};
use mruv_core::constants::{
    DEFAULT_STEP_S, DEFAULT_WINDOW_END_S, DEFAULT_WINDOW_START_S, HISTORY_FILE,
};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "mruv",
    author,
    version,
    about = "Constant-acceleration motion: equations, stop times, extrema and distance"
)]
struct Cli {
    /// Log engine steps to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// History file appended to by `calc` and `run`
    #[arg(long, global = true, default_value = HISTORY_FILE)]
    history: PathBuf,

    /// Do not read or write the history file
    #[arg(long, global = true)]
    no_history: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the equation selected by --formula at --time
    Calc {
        #[arg(long, value_enum)]
        formula: Formula,
        #[command(flatten)]
        motion: MotionArgs,
        /// Evaluation time in seconds (required for position and velocity)
        #[arg(long, short, allow_negative_numbers = true)]
        time: Option<f64>,
        #[command(flatten)]
        window: WindowArgs,
        /// Write the plot data as JSON to this path
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// First instant t >= 0 at which the object stops
    Stop {
        #[command(flatten)]
        motion: MotionArgs,
    },
    /// Maximum or minimum position
    Extremum {
        #[command(flatten)]
        motion: MotionArgs,
    },
    /// Total distance travelled versus net displacement on [from, to]
    Distance {
        #[command(flatten)]
        motion: MotionArgs,
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
    },
    /// Solve one of the worked problems
    Problem {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        number: u8,
        /// Write the plot data as JSON to this path
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Sample position and velocity to CSV
    Sample {
        #[arg(long, value_enum, default_value_t = Formula::Position)]
        formula: Formula,
        #[command(flatten)]
        motion: MotionArgs,
        #[command(flatten)]
        window: WindowArgs,
        /// Output CSV file (use '-' for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,
        /// Also write a plot JSON sidecar highlighting this instant
        #[arg(long, allow_negative_numbers = true)]
        highlight: Option<f64>,
        /// Plot JSON sidecar path
        #[arg(long)]
        plot: Option<PathBuf>,
    },
    /// Calculate every scenario in a manifest
    Run {
        /// YAML list, TOML file or directory of TOML files
        #[arg(long)]
        scenarios: PathBuf,
    },
    /// Inspect or export the history
    #[command(subcommand)]
    History(HistoryCommands),
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Print the stored records as JSON
    Show,
    /// Copy the history to another file
    Export {
        /// Destination (defaults to history_<timestamp>.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct MotionArgs {
    /// Initial position (m)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x0: f64,
    /// Initial velocity (m/s)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    v0: f64,
    /// Constant acceleration (m/s²)
    #[arg(long, short, default_value_t = 0.0, allow_negative_numbers = true)]
    acceleration: f64,
}

#[derive(Args, Debug, Clone, Copy)]
struct WindowArgs {
    /// Start of the sampling window (s)
    #[arg(long, default_value_t = DEFAULT_WINDOW_START_S, allow_negative_numbers = true)]
    start: f64,
    /// End of the sampling window (s)
    #[arg(long, default_value_t = DEFAULT_WINDOW_END_S, allow_negative_numbers = true)]
    end: f64,
    /// Sampling step (s)
    #[arg(long, default_value_t = DEFAULT_STEP_S, allow_negative_numbers = true)]
    step: f64,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Formula {
    Position,
    Velocity,
    Acceleration,
}

impl From<Formula> for Mode {
    fn from(value: Formula) -> Self {
        match value {
            Formula::Position => Mode::Position,
            Formula::Velocity => Mode::Velocity,
            Formula::Acceleration => Mode::Acceleration,
        }
    }
}

impl MotionArgs {
    fn scenario(self, formula: Formula, time: Option<f64>) -> Scenario {
        Scenario {
            mode: formula.into(),
            x0: self.x0,
            v0: self.v0,
            acceleration: self.acceleration,
            time,
        }
    }

    fn position(self) -> anyhow::Result<Expression> {
        let equations = build_equations(&self.scenario(Formula::Position, None))?;
        equations
            .position
            .ok_or_else(|| anyhow!("position equation unavailable"))
    }
}

impl From<WindowArgs> for SampleWindow {
    fn from(value: WindowArgs) -> Self {
        SampleWindow {
            start: value.start,
            end: value.end,
            step: value.step,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Calc {
            formula,
            motion,
            time,
            window,
            plot,
        } => {
            if plot.is_some() && matches!(formula, Formula::Acceleration) {
                return Err(anyhow!("--plot is not available with --formula acceleration"));
            }
            let mut session = open_session(&cli.history, cli.no_history)?;
            let calculation =
                session.calculate_in(&motion.scenario(formula, time), &window.into())?;
            println!("{}", calculation.message);
            if let (Some(path), Some(data)) = (plot, calculation.plot.as_ref()) {
                write_plot_json(&path, data)?;
            }
        }
        Commands::Stop { motion } => {
            let position = motion.position()?;
            let velocity = differentiate(&position);
            let stop = find_stop_time(&position)?;
            println!("{}", explain::stop_time(&position, &velocity, stop.as_ref()));
        }
        Commands::Extremum { motion } => {
            let position = motion.position()?;
            let velocity = differentiate(&position);
            let extremum = find_extremum(&position)?;
            println!("{}", explain::extremum(&position, &velocity, &extremum));
        }
        Commands::Distance { motion, from, to } => {
            let position = motion.position()?;
            let report = total_distance(&position, from, to)?;
            println!("{}", explain::distance(&position, from, to, &report));
        }
        Commands::Problem { number, plot } => {
            let solution = problems::solve(number)?;
            println!("Problem {}: {}", solution.number, solution.title);
            println!("{}", solution.message);
            if let Some(path) = plot {
                write_plot_json(&path, &solution.plot)?;
            }
        }
        Commands::Sample {
            formula,
            motion,
            window,
            output,
            highlight,
            plot,
        } => {
            let equations = build_equations(&motion.scenario(formula, highlight))?;
            let window = SampleWindow::from(window);
            let samples = sample_motion(
                equations.position.as_ref(),
                equations.velocity.as_ref(),
                &window,
            )?;
            write_samples_csv(&output, &samples)?;
            if let Some(path) = plot {
                let data = plot_data(
                    equations.position.as_ref(),
                    equations.velocity.as_ref(),
                    &window,
                    highlight,
                )?;
                write_plot_json(&path, &data)?;
            }
        }
        Commands::Run {
            scenarios: manifest,
        } => {
            let scenarios = load_scenarios(&manifest)
                .with_context(|| format!("loading scenarios from {}", manifest.display()))?;
            let mut session = open_session(&cli.history, cli.no_history)?;
            let mut failures = 0usize;
            for named in &scenarios {
                println!("=== {} ===", named.name);
                match session.calculate_in(&named.scenario, &named.window) {
                    Ok(calculation) => println!("{}", calculation.message),
                    Err(err) => {
                        failures += 1;
                        eprintln!("{}: {err}", named.name);
                    }
                }
            }
            if failures > 0 {
                return Err(anyhow!(
                    "{failures} of {} scenario(s) failed",
                    scenarios.len()
                ));
            }
        }
        Commands::History(HistoryCommands::Show) => {
            let log = HistoryLog::open(&cli.history)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&history::to_json(log.records())?)?;
        }
        Commands::History(HistoryCommands::Export { output }) => {
            let log = HistoryLog::open(&cli.history)?;
            let output = output.unwrap_or_else(default_export_path);
            log.export_to(&output)?;
            println!("Exported {} record(s) to {}", log.len(), output.display());
        }
    }
    Ok(())
}

fn open_session(path: &Path, disabled: bool) -> anyhow::Result<Session> {
    if disabled {
        return Ok(Session::ephemeral());
    }
    Session::open(path).with_context(|| format!("opening history {}", path.display()))
}

fn default_export_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("history_{stamp}.json"))
}
