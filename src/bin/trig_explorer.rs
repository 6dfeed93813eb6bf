//! Trigonometry explorer
//!
//! Evaluates angles, solves inverse queries, prints the reference table and
//! replays recorded input events through the interaction pipeline.
//!
//! Usage:
//!   cargo run --bin trig_explorer -- eval 3pi/4
//!   cargo run --bin trig_explorer -- inverse arcsin 0.5
//!   cargo run --bin trig_explorer -- replay events.json --json

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use trigview::diagnostics::Diagnostics;
use trigview::formulas::{Difficulty, FormulaRegistry, PresentationNode};
use trigview::interaction::{
    FrameRequest, FrameScheduler, InputEvent, InputOutcome, InteractionPipeline, SurfaceGeometry,
};
use trigview::parser::detect_normalization;
use trigview::reference::ReferenceTable;
use trigview::trig::format::format_all;
use trigview::trig::inverse::solve;
use trigview::{
    parse_angle_input, AngleUnit, AppState, Config, InverseFunction, TrigFunction,
    TrigonometricValues,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Explores angles, trigonometric values and inverse solutions",
    long_about = None
)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnitArg {
    Deg,
    Rad,
}

impl From<UnitArg> for AngleUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Deg => AngleUnit::Degrees,
            UnitArg::Rad => AngleUnit::Radians,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    HighSchool,
    College,
    Graduate,
}

impl From<DifficultyArg> for Difficulty {
    fn from(level: DifficultyArg) -> Self {
        match level {
            DifficultyArg::HighSchool => Difficulty::HighSchool,
            DifficultyArg::College => Difficulty::College,
            DifficultyArg::Graduate => Difficulty::Graduate,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the six trigonometric functions for an angle
    Eval {
        /// Angle such as `30`, `45deg`, `1.2rad` or `3pi/4`
        angle: String,
        /// Unit for plain numbers
        #[arg(short, long, value_enum, default_value = "deg")]
        unit: UnitArg,
    },
    /// Solve an inverse function for every angle in one turn
    Inverse {
        /// arcsin, arccos, arctan, arccot, arcsec or arccsc
        function: InverseFunction,
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Print the standard-angle reference table
    Table,
    /// Render the formula visualizations for an angle
    Formulas {
        angle: String,
        #[arg(short, long, value_enum, default_value = "graduate")]
        difficulty: DifficultyArg,
    },
    /// Replay a JSON array of input events through the interaction pipeline
    Replay {
        events: PathBuf,
        /// Size of the square drawing surface in pixels
        #[arg(long, default_value_t = 300.0)]
        size: f64,
        /// Circle radius in surface units
        #[arg(long, default_value_t = 100.0)]
        radius: f64,
        /// Print the final state snapshot as JSON
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
}

/// Hands out frame ids; the recorded script carries the matching frame events
#[derive(Debug, Default)]
struct ScriptScheduler {
    next: u64,
}

impl FrameScheduler for ScriptScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next += 1;
        log::debug!("Frame {} requested", self.next);
        FrameRequest(self.next)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        log::debug!("Frame {} cancelled", request.0);
    }
}

fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn eval(config: &Config, input: &str, unit: AngleUnit) -> Result<()> {
    let angle = parse_angle_input(input, unit)?;
    let normalized = angle.normalize();

    print_section_header("Angle");
    println!("Input:       {}", angle);
    println!("Normalized:  {}", normalized);
    println!("Degrees:     {:.4}", normalized.to_degrees());
    println!("Radians:     {:.4}", normalized.to_radians());
    if let Some(label) = normalized.nearest_named() {
        println!("Named:       {}", label);
    }
    if let Some(summary) = detect_normalization(angle.magnitude(), &normalized).summary {
        println!("Note:        {}", summary);
    }

    print_section_header("Values");
    let values = TrigonometricValues::new(normalized);
    let table = ReferenceTable::standard();
    let exact = table.lookup(&normalized);
    for (function, text) in format_all(&values, &config.display) {
        let exact_text = exact.and_then(|entry| match function {
            TrigFunction::Sin => Some(entry.sin),
            TrigFunction::Cos => Some(entry.cos),
            TrigFunction::Tan => Some(entry.tan),
            _ => None,
        });
        match exact_text {
            Some(exact_text) => println!("{:<4} {:>12}   = {}", function.name(), text, exact_text),
            None => println!("{:<4} {:>12}", function.name(), text),
        }
    }
    Ok(())
}

fn inverse(function: InverseFunction, value: f64) -> Result<()> {
    let solution = solve(function, value)?;
    print_section_header(&format!("{}({})", function, value));
    println!("Principal value: {:.4} rad", solution.principal);
    for angle in &solution.solutions {
        println!("  {:.4} rad  ({:.4}°)", angle.to_radians(), angle.to_degrees());
    }
    Ok(())
}

fn table() {
    print_section_header("Standard angles");
    println!(
        "{:>6} {:>7} {:>8} {:>8} {:>10}",
        "deg", "rad", "sin", "cos", "tan"
    );
    for entry in ReferenceTable::standard().rows() {
        println!(
            "{:>6} {:>7} {:>8} {:>8} {:>10}",
            entry.degrees(),
            entry.radians_label,
            entry.sin,
            entry.cos,
            entry.tan
        );
    }
}

fn formulas(config: &Config, input: &str, difficulty: Difficulty) -> Result<()> {
    let angle = parse_angle_input(input, AngleUnit::Degrees)?;
    let registry = FormulaRegistry::with_builtins(config.tolerances.identity);
    for formula in registry.filter_by_difficulty(difficulty) {
        let tree = formula.render(&angle);
        print_section_header(&format!("{} ({})", tree.title, formula.difficulty()));
        println!("{}", tree.formula_text);
        for node in &tree.nodes {
            match node {
                PresentationNode::Text { text } => println!("  {}", text),
                PresentationNode::Value { label, value } => println!("  {} = {:.6}", label, value),
                PresentationNode::Check {
                    label, lhs, rhs, holds,
                } => println!(
                    "  {}: {:.6} vs {:.6} [{}]",
                    label,
                    lhs,
                    rhs,
                    if *holds { "ok" } else { "FAILED" }
                ),
                PresentationNode::Segment { .. } => {}
            }
        }
    }
    Ok(())
}

fn replay(config: Config, path: &PathBuf, size: f64, radius: f64, json: bool) -> Result<()> {
    let events: Vec<InputEvent> = serde_json::from_str(&fs::read_to_string(path)?)?;
    let geometry = SurfaceGeometry::square(0.0, 0.0, size, radius)?;
    let diagnostics = Rc::new(Diagnostics::default());
    diagnostics.set_sink(|d| eprintln!("{}", d));

    let mut pipeline =
        InteractionPipeline::new(config, geometry, ScriptScheduler::default(), diagnostics);
    let mut state = AppState::new();
    for (index, event) in events.into_iter().enumerate() {
        match pipeline.handle(event, &mut state) {
            InputOutcome::Updated(angle) => println!("#{:<3} -> {}", index, angle),
            InputOutcome::Ignored => println!("#{:<3} -- ignored", index),
            InputOutcome::Rejected(message) => println!("#{:<3} !! {}", index, message),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot_with(&config.display))?);
    } else {
        print_section_header("Final state");
        println!("Angle:  {}", state.snapshot_with(&config.display).angle_text);
        println!("Slider: {}", pipeline.slider_position(&state));
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match args.command {
        Command::Eval { angle, unit } => eval(&config, &angle, unit.into()),
        Command::Inverse { function, value } => inverse(function, value),
        Command::Table => {
            table();
            Ok(())
        }
        Command::Formulas { angle, difficulty } => formulas(&config, &angle, difficulty.into()),
        Command::Replay {
            events,
            size,
            radius,
            json,
        } => replay(config, &events, size, radius, json),
    }
}
