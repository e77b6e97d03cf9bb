//! City Tour - Command Line Interface
//!
//! Plans a sightseeing route through a CSV of places and exports it.

use clap::{Parser, Subcommand, ValueEnum};
use log::warn;

use city_tour::export::write_geojson;
use city_tour::heuristics::{ConstructionHeuristic, LocalSearch, MultiStart, NearestNeighbor, TwoOpt};
use city_tour::instance::TourInstance;
use city_tour::tour::{close_tour, Route};
use city_tour::visualization::Visualizer;

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "city-tour")]
#[command(version = "1.0")]
#[command(about = "Plans short sightseeing routes with nearest-neighbor construction and 2-opt refinement")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a route through the places in a CSV file
    Solve {
        /// CSV file of places (name,lat,lon per row, no header)
        #[arg(short, long)]
        places: PathBuf,

        /// Start at this place (default: the first row)
        #[arg(short, long)]
        start: Option<String>,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "greedy-two-opt")]
        algorithm: Algorithm,

        /// Return to the start place (make the route a loop)
        #[arg(long)]
        roundtrip: bool,

        /// Random seed for the randomized construction
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Cap the number of 2-opt passes (unbounded if omitted)
        #[arg(long)]
        max_passes: Option<usize>,

        /// Write the route as GeoJSON
        #[arg(short, long)]
        geojson: Option<PathBuf>,

        /// Render the route as SVG
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Write the route as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print statistics about a CSV of places
    Analyze {
        /// CSV file of places
        #[arg(short, long)]
        places: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Nearest-neighbor construction only
    Greedy,
    /// Nearest-neighbor followed by 2-opt
    GreedyTwoOpt,
    /// Randomized nearest-neighbor construction
    Randomized,
    /// Randomized nearest-neighbor followed by 2-opt
    RandomizedTwoOpt,
    /// Best nearest-neighbor tour over all start places
    MultiStart,
    /// Multi-start construction followed by 2-opt
    MultiStartTwoOpt,
}

impl Algorithm {
    fn refines(self) -> bool {
        matches!(
            self,
            Algorithm::GreedyTwoOpt | Algorithm::RandomizedTwoOpt | Algorithm::MultiStartTwoOpt
        )
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            places,
            start,
            algorithm,
            roundtrip,
            seed,
            max_passes,
            geojson,
            svg,
            output,
            verbose,
        } => solve(
            &places, start, algorithm, roundtrip, seed, max_passes, geojson, svg, output, verbose,
        ),
        Commands::Analyze { places } => analyze(&places),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn solve(
    places: &PathBuf,
    start: Option<String>,
    algorithm: Algorithm,
    roundtrip: bool,
    seed: u64,
    max_passes: Option<usize>,
    geojson: Option<PathBuf>,
    svg: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> city_tour::Result<()> {
    let instance = TourInstance::from_csv_file(places)?;

    if verbose {
        println!("{}", instance.statistics());
    }

    if instance.is_empty() {
        println!("No places to visit.");
        return Ok(());
    }

    let matrix = instance.matrix();
    let started = Instant::now();

    let (mut path, mut algorithm_name) = match algorithm {
        Algorithm::Greedy | Algorithm::GreedyTwoOpt => {
            let heuristic = NearestNeighbor::new();
            let start_index = resolve_start(&instance, start.as_deref())?;
            (
                heuristic.construct(matrix, start_index)?,
                heuristic.name().to_string(),
            )
        }
        Algorithm::Randomized | Algorithm::RandomizedTwoOpt => {
            let heuristic = NearestNeighbor::randomized(seed);
            let start_index = resolve_start(&instance, start.as_deref())?;
            (
                heuristic.construct(matrix, start_index)?,
                heuristic.name().to_string(),
            )
        }
        Algorithm::MultiStart | Algorithm::MultiStartTwoOpt => {
            if start.is_some() {
                warn!("--start is ignored by multi-start: it picks the best start itself");
            }
            let heuristic = MultiStart::new();
            (heuristic.construct(matrix)?, heuristic.name().to_string())
        }
    };

    if algorithm.refines() {
        let refiner = match max_passes {
            Some(passes) => TwoOpt::with_max_passes(passes),
            None => TwoOpt::new(),
        };
        refiner.improve(&mut path, matrix)?;
        algorithm_name.push('+');
        algorithm_name.push_str(refiner.name());
    }

    if roundtrip {
        path = close_tour(&path);
    }

    let mut route = Route::from_path(matrix, path, &algorithm_name)?;
    route.computation_time = started.elapsed().as_secs_f64();

    let names: Vec<&str> = route
        .path
        .iter()
        .map(|&i| instance.places[i].name.as_str())
        .collect();
    println!("Route: {}", names.join(" -> "));
    println!("Total distance: {:.2} km", route.length);

    if verbose {
        println!("{route}");
    }

    if let Some(out) = geojson {
        write_geojson(&instance, &route.path, &out)?;
        println!("GeoJSON written to {}", out.display());
    }

    if let Some(out) = svg {
        Visualizer::new().save_svg(&instance, &route, &out)?;
        println!("SVG written to {}", out.display());
    }

    if let Some(out) = output {
        serde_json::to_writer_pretty(File::create(&out)?, &route)?;
        println!("Route JSON written to {}", out.display());
    }

    Ok(())
}

fn resolve_start(instance: &TourInstance, start: Option<&str>) -> city_tour::Result<usize> {
    match start {
        Some(name) => instance.find_place(name),
        None => Ok(0),
    }
}

fn analyze(places: &PathBuf) -> city_tour::Result<()> {
    let instance = TourInstance::from_csv_file(places)?;
    print!("{}", instance.statistics());
    Ok(())
}
