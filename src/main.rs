use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use u_lastmile::distance::DistanceMatrix;
use u_lastmile::error::SolveError;
use u_lastmile::ga::GaConfig;
use u_lastmile::geo::{
    resolve_locations, CacheError, Coordinate, FallbackMatrixBuilder, FileCache, GeocodeError,
    Geocoder, HaversineMatrixBuilder, InputLocation, MatrixBuilder, MatrixError, TravelMatrices,
};
use u_lastmile::route::{Endpoints, RouteSolution, RouteSolver};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(global = true, short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Optimize the visiting order of a request file
    Solve(SolveArgs),
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// Request JSON with `matrix` or `locations`
    #[arg(short, long)]
    input: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    pop_size: Option<usize>,

    #[arg(long)]
    generations: Option<usize>,

    /// Stop the route must begin at
    #[arg(long)]
    start: Option<usize>,

    /// Stop the route must end at
    #[arg(long)]
    end: Option<usize>,

    /// Directory for cached travel matrices
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug)]
struct Request {
    matrix: Option<DistanceMatrix>,
    durations: Option<DistanceMatrix>,
    locations: Option<Vec<InputLocation>>,
    start_index: Option<usize>,
    end_index: Option<usize>,
    #[serde(default)]
    config: GaConfig,
}

#[derive(Serialize, Debug)]
struct Response {
    #[serde(flatten)]
    solution: RouteSolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("request must contain either `matrix` or `locations`")]
    MissingInput,

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Refuses addresses: the binary ships without a network gazetteer.
struct OfflineGeocoder;

impl Geocoder for OfflineGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        Err(GeocodeError::Backend {
            address: address.to_string(),
            reason: "no geocoder available offline; supply lat/lon".into(),
        })
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Solve(args) => run_solve(&args),
    };

    match result {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to encode result: {e}");
                process::exit(1);
            }
        },
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}

fn run_solve(args: &SolveArgs) -> Result<Response, CliError> {
    let request = load_request(&args.input)?;
    info!(input = %args.input.display(), "loaded request");

    let mut config = request.config;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(pop_size) = args.pop_size {
        config.pop_size = pop_size;
    }
    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    let endpoints = Endpoints::new(
        args.start.or(request.start_index),
        args.end.or(request.end_index),
    );

    let (matrices, labels) = match (request.matrix, request.locations) {
        (Some(distances), _) => (
            TravelMatrices {
                distances,
                durations: request.durations,
            },
            None,
        ),
        (None, Some(items)) => {
            let locations = resolve_locations(&items, &OfflineGeocoder)?;
            let coords: Vec<Coordinate> = locations.iter().map(|l| l.coordinate()).collect();
            let matrices = build_matrices(&coords, args.cache_dir.as_deref())?;
            let labels = locations.into_iter().map(|l| l.label).collect::<Vec<_>>();
            (matrices, Some(labels))
        }
        (None, None) => return Err(CliError::MissingInput),
    };

    let mut solver = RouteSolver::new(matrices.distances, config)?;
    if let Some(durations) = matrices.durations {
        solver = solver.with_durations(durations)?;
    }
    let solution = solver.solve(endpoints)?;

    let labels = labels.map(|labels| {
        solution
            .route
            .iter()
            .map(|&i| labels[i].clone())
            .collect::<Vec<_>>()
    });
    Ok(Response { solution, labels })
}

fn load_request(path: &Path) -> Result<Request, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn build_matrices(
    coords: &[Coordinate],
    cache_dir: Option<&Path>,
) -> Result<TravelMatrices, CliError> {
    let builder = HaversineMatrixBuilder::new();
    let matrices = match cache_dir {
        Some(dir) => FallbackMatrixBuilder::new(builder, FileCache::open(dir)?).build(coords)?,
        None => builder.build(coords)?,
    };
    Ok(matrices)
}
