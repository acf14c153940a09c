//! Command-line entry point: optimize distribution costs for a retail chain.

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use transport_ga::config::Config;
use transport_ga::error::GaError;
use transport_ga::problem::TransportationProblem;
use transport_ga::utils::save_result;
use transport_ga::{GeneticSolver, ShipmentSolver};

#[derive(Debug, Parser)]
#[command(version, about = "Optimize distribution costs for a retail chain.")]
struct Args {
    /// Path to the input JSON file
    #[arg(long)]
    input_file: PathBuf,

    /// Number of individuals per generation
    #[arg(long, default_value_t = 100)]
    population_size: usize,

    /// Maximum number of generations
    #[arg(long, default_value_t = 20000)]
    generations: usize,

    /// Number of elite individuals kept each generation
    #[arg(long, default_value_t = 2)]
    elite_count: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Directory to write fitness history plots to
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// File to save the resulting plan to, as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), GaError> {
    info!("Loading problem from: {}", args.input_file.display());
    let problem = TransportationProblem::from_file(&args.input_file)?;

    let mut config = Config::new()
        .with_population_size(args.population_size)
        .with_max_generations(args.generations)
        .with_elite_retention_count(args.elite_count);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(dir) = args.plot_dir {
        config = config.with_plot_dir(dir);
    }

    let result = GeneticSolver::new(config).solve(&problem)?;
    println!("{}", result);

    if let Some(path) = args.output {
        save_result(&result, &path)?;
        info!("Saved result to: {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
