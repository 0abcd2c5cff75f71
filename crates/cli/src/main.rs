#![deny(unsafe_code)]
//! CLI binary for the gravity-basin fractal renderer.
//!
//! Subcommands:
//! - `render`: render a basin fractal and write a PNG
//! - `probe <x> <y>`: simulate one plane point and report its outcome
//! - `attractors`: print the perturbed attractor set for a seed
//! - `list`: print palettes and simulation parameters

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use gravity_basin_core::attractor::DEFAULT_PERTURBATION;
use gravity_basin_core::sampler::DEFAULT_ZOOM;
use gravity_basin_core::seed::DEFAULT_SIZE;
use gravity_basin_core::{
    classify, AttractorSet, Integrator, LabelGrid, LabelPalette, PixelLabel, Seed,
    SimulationParams,
};
use gravity_basin_render::snapshot::{timestamped_path, write_png};
use gravity_basin_render::Renderer;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser)]
#[command(
    name = "gravity-basin",
    about = "Basin-of-attraction fractal for a damped particle between four masses"
)]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options that decide the attractor set and the simulation.
#[derive(Args)]
struct SimulationArgs {
    /// PRNG seed for the attractor perturbation (defaults to the clock).
    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound of the uniform offset added to each attractor x, y and mass.
    #[arg(long, default_value_t = DEFAULT_PERTURBATION)]
    perturbation: f64,

    /// Simulation parameter overrides as a JSON object (see `list`).
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Render the fractal and write a PNG.
    Render {
        /// Grid width in pixels.
        #[arg(short = 'W', long, default_value_t = DEFAULT_SIZE)]
        width: usize,

        /// Grid height in pixels.
        #[arg(short = 'H', long, default_value_t = DEFAULT_SIZE)]
        height: usize,

        /// Half-extent of the sampled plane.
        #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
        zoom: f64,

        /// Label palette (classic, ocean, ember, mono).
        #[arg(short, long, default_value = "classic")]
        palette: String,

        /// Output file path (defaults to figs/attractors_<epoch>.png).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Load the whole recipe from a JSON file instead of the flags.
        #[arg(long)]
        from_seed: Option<PathBuf>,

        /// Hide the progress bar.
        #[arg(long)]
        no_progress: bool,

        #[command(flatten)]
        sim: SimulationArgs,
    },
    /// Simulate a single plane point and print its outcome and label.
    Probe {
        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,

        #[command(flatten)]
        sim: SimulationArgs,
    },
    /// Print the perturbed attractor set for a seed.
    Attractors {
        #[command(flatten)]
        sim: SimulationArgs,
    },
    /// List palettes and simulation parameters.
    List,
}

fn epoch() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn parse_params(params: &str) -> Result<serde_json::Value, CliError> {
    let value: serde_json::Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(value)
}

fn load_seed(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid recipe {}: {e}", path.display())))
}

fn progress_bar(rows: usize, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(rows as u64);
    let style = ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    bar.set_style(style);
    bar
}

/// Attractor set and validated parameters shared by `probe` and `attractors`.
fn simulation(sim: &SimulationArgs) -> Result<(u64, AttractorSet, SimulationParams), CliError> {
    if !sim.perturbation.is_finite() || sim.perturbation < 0.0 {
        return Err(CliError::Input(format!(
            "--perturbation {} must be finite and non-negative",
            sim.perturbation
        )));
    }
    let seed = sim.seed.unwrap_or_else(clock_seed);
    let params = SimulationParams::from_json(&parse_params(&sim.params)?);
    params.validate()?;
    let attractors = AttractorSet::from_seed(seed, sim.perturbation);
    debug!("seed {seed}: {attractors:?}");
    Ok((seed, attractors, params))
}

fn print_attractors(attractors: &AttractorSet) {
    for (i, a) in attractors.iter().enumerate() {
        println!(
            "  {i}: x = {:.6}, y = {:.6}, mass = {:.6}",
            a.position.x, a.position.y, a.mass
        );
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = LabelPalette::list_names();
            let schema = SimulationParams::param_schema();
            if cli.json {
                let info = serde_json::json!({
                    "palettes": palettes,
                    "params": schema,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Params:");
                if let Some(params) = schema.as_object() {
                    for (name, spec) in params {
                        println!(
                            "  {name:<22} default {:<8} {}",
                            spec["default"],
                            spec["description"].as_str().unwrap_or_default()
                        );
                    }
                }
            }
        }
        Command::Attractors { sim } => {
            let (seed, attractors, _) = simulation(&sim)?;
            if cli.json {
                let info = serde_json::json!({
                    "seed": seed,
                    "perturbation": sim.perturbation,
                    "attractors": attractors,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Attractors (seed {seed}):");
                print_attractors(&attractors);
            }
        }
        Command::Probe { x, y, sim } => {
            let (seed, attractors, params) = simulation(&sim)?;
            let outcome = Integrator::new(&attractors, &params).simulate(x, y);
            let label = classify(&outcome, &attractors, &params);
            if cli.json {
                let info = serde_json::json!({
                    "seed": seed,
                    "x": x,
                    "y": y,
                    "outcome": outcome,
                    "label": label,
                    "attractor": label.attractor_index(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "({x}, {y}) -> {:?} after {} steps at ({:.6}, {:.6})",
                    outcome.reason, outcome.steps, outcome.final_position.x, outcome.final_position.y
                );
                match label.attractor_index().and_then(|i| attractors.get(i)) {
                    Some(a) => println!(
                        "label: {} at ({:.6}, {:.6}) (seed {seed})",
                        label.name(),
                        a.position.x,
                        a.position.y
                    ),
                    None => println!("label: {} (seed {seed})", label.name()),
                }
            }
        }
        Command::Render {
            width,
            height,
            zoom,
            palette,
            output,
            from_seed,
            no_progress,
            sim,
        } => {
            let recipe = match from_seed {
                Some(path) => load_seed(&path)?,
                None => Seed {
                    width,
                    height,
                    zoom,
                    seed: sim.seed.unwrap_or_else(clock_seed),
                    perturbation: sim.perturbation,
                    palette,
                    params: parse_params(&sim.params)?,
                },
            };
            let palette = LabelPalette::from_name(&recipe.palette)?;
            let renderer = Renderer::from_seed(&recipe)?;
            let output = output.unwrap_or_else(|| timestamped_path(Path::new("figs"), epoch()));

            let bar = progress_bar(recipe.height, cli.json || no_progress);
            let mut grid = LabelGrid::new(recipe.width, recipe.height)?;
            let stats = renderer.render_into(&mut grid, |done| bar.set_position(done as u64))?;
            bar.finish_and_clear();

            write_png(&grid, &palette, &output)?;

            if cli.json {
                let histogram: serde_json::Map<String, serde_json::Value> = PixelLabel::ALL
                    .iter()
                    .map(|l| (l.name().to_string(), stats.histogram[l.index()].into()))
                    .collect();
                let info = serde_json::json!({
                    "recipe": recipe,
                    "attractors": renderer.attractors(),
                    "elapsed_ms": stats.elapsed.as_millis() as u64,
                    "histogram": histogram,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} (seed {}, {} palette) in {:.2?} -> {}",
                    recipe.width,
                    recipe.height,
                    recipe.seed,
                    recipe.palette,
                    stats.elapsed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
