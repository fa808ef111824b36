use anyhow::{bail, Context, Result};
use clap::Parser;
use fire_spread_core::grid::{Grid, HourlyWind, Shape, WindField};
use fire_spread_core::{IgnitionMask, Scenario, SpreadConfig, SpreadHistory};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Wildfire spread demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "spread-demo")]
#[command(about = "Hour-by-hour stochastic wildfire spread demo", long_about = None)]
struct Args {
    /// Load grids and configuration from a JSON scenario file instead of generating one
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Grid rows for the generated scenario
    #[arg(long, default_value_t = 11)]
    rows: usize,

    /// Grid columns for the generated scenario
    #[arg(long, default_value_t = 13)]
    cols: usize,

    /// Hour offsets to simulate (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 3, 6, 12])]
    hours: Vec<u32>,

    /// Base ignition probability per edge per hour
    #[arg(short, long, default_value_t = 0.3)]
    ignition_prob: f32,

    /// Random seed (a fresh one is drawn and logged when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Scan burning cells in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 5.0)]
    wind_speed: f32,

    /// Wind heading in degrees (0 = toward increasing rows, 90 = toward increasing columns)
    #[arg(long, default_value_t = 90.0)]
    wind_direction: f32,

    /// Change of wind heading per hour offset, in degrees
    #[arg(long, default_value_t = 0.0)]
    wind_veer: f32,

    /// Slope at the last row; slope ramps linearly from 0 at the first row
    #[arg(long, default_value_t = 0.3)]
    slope_max: f32,

    /// Fraction of cells carrying fuel (0-1)
    #[arg(long, default_value_t = 0.9)]
    fuel_coverage: f64,

    /// Seed for the generated fuel pattern
    #[arg(long, default_value_t = 7)]
    terrain_seed: u64,

    /// Radius in cells of the initial fire around the grid centre
    #[arg(long, default_value_t = 0)]
    ignition_radius: usize,

    /// Cell size in metres, used for burned area reporting
    #[arg(long, default_value_t = 1000.0)]
    cell_size: f32,

    /// Write the per-hour snapshots to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print each hour's cumulative mask
    #[arg(long)]
    print_masks: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Wildfire Spread Demo ===\n");

    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => generate_scenario(&args)?,
    };
    scenario.validate().context("scenario failed validation")?;

    let shape = scenario.shape();
    println!(
        "Grid: {} ({} initially burning, {} flammable)",
        shape,
        scenario.initial_mask.count_ignited(),
        scenario.fuel.as_slice().iter().filter(|&&flammable| flammable).count()
    );
    println!(
        "Hours: {:?}, base probability: {}, parallel: {}\n",
        scenario.config.hours, scenario.config.ignition_prob_base, scenario.config.parallel
    );

    let history = scenario.run()?;

    report(&history, shape, args.cell_size);

    if args.print_masks {
        for snapshot in &history {
            println!("\nt+{}h", snapshot.hour);
            print_mask(&snapshot.mask);
        }
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&history)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("\nSaved {} snapshots to {}", history.len(), path.display());
    }

    Ok(())
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    info!("Loading scenario from {}", path.display());
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let scenario = serde_json::from_str(&contents)
        .with_context(|| format!("parsing scenario {}", path.display()))?;
    Ok(scenario)
}

/// Build a synthetic scenario: linear slope ramp, random fuel gaps, fire at the centre
fn generate_scenario(args: &Args) -> Result<Scenario> {
    if !args.fuel_coverage.is_finite() {
        bail!("--fuel-coverage must be a number in [0, 1], got {}", args.fuel_coverage);
    }

    let shape = Shape::new(args.rows, args.cols);
    let (centre_row, centre_col) = (args.rows / 2, args.cols / 2);

    let initial_mask = Grid::from_fn(shape, |row, col| {
        row.abs_diff(centre_row) <= args.ignition_radius
            && col.abs_diff(centre_col) <= args.ignition_radius
    });

    let last_row = args.rows.saturating_sub(1).max(1) as f32;
    let slope = Grid::from_fn(shape, |row, _| args.slope_max * row as f32 / last_row);

    let mut rng = ChaCha8Rng::seed_from_u64(args.terrain_seed);
    let coverage = args.fuel_coverage.clamp(0.0, 1.0);
    let fuel = Grid::from_fn(shape, |_, _| rng.random_bool(coverage));

    let wind: HourlyWind = args
        .hours
        .iter()
        .map(|&hour| {
            let heading = args.wind_direction + args.wind_veer * hour as f32;
            (hour, WindField::uniform(shape, args.wind_speed, heading))
        })
        .collect();

    let mut config = SpreadConfig::default()
        .with_ignition_prob_base(args.ignition_prob)
        .with_hours(args.hours.clone())
        .with_parallel(args.parallel);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    Ok(Scenario {
        initial_mask,
        slope,
        fuel,
        wind,
        config,
    })
}

fn report(history: &SpreadHistory, shape: Shape, cell_size: f32) {
    println!(
        "{:>6} {:>10} {:>8} {:>12} {:>8}",
        "hour", "burning", "new", "area (ha)", "cover"
    );
    for snapshot in history {
        let burning = snapshot.ignited_cells();
        println!(
            "{:>6} {:>10} {:>8} {:>12.1} {:>7.1}%",
            format!("t+{}h", snapshot.hour),
            burning,
            snapshot.new_ignitions,
            snapshot.burned_area_hectares(cell_size),
            100.0 * burning as f32 / shape.len().max(1) as f32
        );
    }
}

fn print_mask(mask: &IgnitionMask) {
    for row in 0..mask.rows() {
        let line: String = mask
            .row(row)
            .iter()
            .map(|&burning| if burning { '#' } else { '.' })
            .collect();
        println!("{}", line);
    }
}
