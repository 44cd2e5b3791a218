//! Command-line front end (component C8's CLI surface), ported from
//! `ad_main.cc`'s `main`/`parse_args` run loop.
//!
//! Three modes mirror the original's `-m`: read a DIMACS file as-is, read
//! its topology but regenerate weights, or synthesize a fresh random graph.
//! Each of `--runs` iterations re-samples weights (modes 1/2) and reports
//! `final {min,max}_lambda= <value> time= <seconds>`, exactly the line the
//! original prints after every run.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use cycle_ratio::dimacs::{read_dimacs, write_dimacs};
use cycle_ratio::driver::{max_cycle_ratio, min_cycle_ratio, Algorithm};
use cycle_ratio::generate::{generate_all, generate_part, Distribution as GenDistribution, GenerateParams};
use cycle_ratio::graph::Graph;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Read the input file and solve it as-is.
    Read,
    /// Read the input file's topology, then regenerate edge weights.
    Regenerate,
    /// Synthesize a fresh random graph from `--param`.
    Synthesize,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Version {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DistArg {
    Uniform,
    Normal,
    Exponential,
}

impl From<DistArg> for GenDistribution {
    fn from(d: DistArg) -> Self {
        match d {
            DistArg::Uniform => GenDistribution::Uniform,
            DistArg::Normal => GenDistribution::Normal,
            DistArg::Exponential => GenDistribution::Exponential,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    KarpOrlin,
    Yto,
    LawlerBf,
    LawlerSzymanski,
    Tarjan,
    Howard,
    ValueIteration,
    Burns,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(a: AlgorithmArg) -> Self {
        match a {
            AlgorithmArg::KarpOrlin => Algorithm::KarpOrlin,
            AlgorithmArg::Yto => Algorithm::YoungTarjanOrlin,
            AlgorithmArg::LawlerBf => Algorithm::LawlerBellmanFord,
            AlgorithmArg::LawlerSzymanski => Algorithm::LawlerSzymanski,
            AlgorithmArg::Tarjan => Algorithm::Tarjan,
            AlgorithmArg::Howard => Algorithm::Howard,
            AlgorithmArg::ValueIteration => Algorithm::ValueIteration,
            AlgorithmArg::Burns => Algorithm::Burns,
        }
    }
}

/// Minimum/maximum cycle ratio solver over directed, integer-weighted graphs.
#[derive(Debug, Parser)]
#[command(about = "Minimum/maximum cycle ratio solver", version)]
struct Cli {
    /// DIMACS-like input file (required unless `--mode synthesize`).
    input_file: Option<PathBuf>,

    /// Read only, read-and-regenerate-weights, or synthesize a fresh graph.
    #[arg(short, long, value_enum, default_value = "read")]
    mode: Mode,

    /// Which solver family to run.
    #[arg(short, long, value_enum, default_value = "karp-orlin")]
    algorithm: AlgorithmArg,

    /// Solve for the minimum or maximum cycle ratio.
    #[arg(short, long, value_enum, default_value = "min")]
    version: Version,

    /// Number of runs (each re-samples weights under modes regenerate/synthesize).
    #[arg(short = 'n', long, default_value_t = 1)]
    runs: u32,

    /// Subtracted from every sampled edge weight (modes regenerate/synthesize only).
    #[arg(short, long, default_value_t = 0)]
    offset: i64,

    /// Node and edge counts for `--mode synthesize`.
    #[arg(short, long, num_args = 2, value_names = ["NODES", "EDGES"])]
    param: Option<Vec<usize>>,

    /// Weight/transit-time sampling distribution.
    #[arg(short, long, value_enum, default_value = "uniform")]
    dist: DistArg,

    /// Weight distribution bounds (min/max, or mean/stddev for normal).
    #[arg(short, long, num_args = 2, default_values_t = [0i64, 0i64], value_names = ["W1", "W2"])]
    weight: Vec<i64>,

    /// Transit-time distribution bounds (min/max, or mean/stddev for normal).
    #[arg(short, long, num_args = 2, default_values_t = [1i64, 1i64], value_names = ["T1", "T2"])]
    time: Vec<i64>,

    /// Random seed; 0 seeds from the current system time, as the original does.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Dump the (possibly regenerated/synthesized) graph to this DIMACS file.
    #[arg(short = 'f', long)]
    dump: Option<PathBuf>,
}

fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn run() -> cycle_ratio::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let algorithm: Algorithm = cli.algorithm.into();
    let seed = resolve_seed(cli.seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let w1 = cli.weight.first().copied().unwrap_or(0);
    let w2 = cli.weight.get(1).copied().unwrap_or(0);
    let t1 = cli.time.first().copied().unwrap_or(1);
    let t2 = cli.time.get(1).copied().unwrap_or(1);

    let gen_params = GenerateParams {
        dist: cli.dist.into(),
        w1,
        w2,
        t1,
        t2,
        offset: cli.offset,
        min_version: true,
    };

    let base_graph: Graph = match cli.mode {
        Mode::Read | Mode::Regenerate => {
            let path = cli
                .input_file
                .as_ref()
                .ok_or_else(|| cycle_ratio::CycleRatioError::DimacsParse {
                    line: 0,
                    message: "an input file is required unless --mode synthesize".to_string(),
                })?;
            let file = File::open(path).map_err(cycle_ratio::CycleRatioError::Io)?;
            read_dimacs(BufReader::new(file))?
        }
        Mode::Synthesize => {
            let param = cli.param.clone().unwrap_or_default();
            let nnodes = param.first().copied().unwrap_or(0);
            let nedges = param.get(1).copied().unwrap_or(0);
            generate_all(&mut rng, nnodes, nedges, &gen_params)
        }
    };

    info!(
        nnodes = base_graph.num_nodes(),
        nedges = base_graph.num_edges(),
        mode = ?cli.mode,
        "loaded graph"
    );

    for run_idx in 0..cli.runs.max(1) {
        let graph = match cli.mode {
            Mode::Read => base_graph.clone(),
            Mode::Regenerate => generate_part(&mut rng, &base_graph, &gen_params),
            Mode::Synthesize => {
                if run_idx == 0 {
                    base_graph.clone()
                } else {
                    let param = cli.param.clone().unwrap_or_default();
                    let nnodes = param.first().copied().unwrap_or(0);
                    let nedges = param.get(1).copied().unwrap_or(0);
                    generate_all(&mut rng, nnodes, nedges, &gen_params)
                }
            }
        };

        if let Some(dump_path) = &cli.dump {
            let file = File::create(dump_path).map_err(cycle_ratio::CycleRatioError::Io)?;
            write_dimacs(&graph, "generated", BufWriter::new(file))?;
        }

        let start = Instant::now();
        let lambda = match cli.version {
            Version::Min => min_cycle_ratio(&graph, algorithm)?,
            Version::Max => max_cycle_ratio(&graph, algorithm)?,
        };
        let elapsed = start.elapsed().as_secs_f64();

        let label = match cli.version {
            Version::Min => "min_lambda",
            Version::Max => "max_lambda",
        };
        if lambda.is_infinite() {
            let text = if lambda > 0.0 { "infinity" } else { "-infinity" };
            println!("final {label}= {text} time= 0.00");
        } else {
            println!("final {label}= {lambda:.6} time= {elapsed:.2}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!(%err, "run failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
