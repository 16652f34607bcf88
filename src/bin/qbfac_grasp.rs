use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use u_grasp::grasp::{GraspConfig, GraspRunner, LocalSearchMode, RandomPhasePolicy};
use u_grasp::qbfac::QbfacGrasp;

fn cli() -> Command {
    Command::new("qbfac-grasp")
        .about("Maximizes a QBF instance under adjacency constraints with GRASP")
        .arg(
            arg!(<INSTANCE> "Path to the QBF instance file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--alpha <ALPHA> "RCL greediness in [0, 1]")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.2"),
        )
        .arg(arg!(--"first-improving" "Stop local search after one improving move"))
        .arg(arg!(--"no-perturbation" "Disable frequency-biased construction"))
        .arg(
            arg!(--target <VALUE> "Stop when this QBF value is reached")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--"time-limit" <SECS> "Wall-clock limit in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("1800"),
        )
        .arg(
            arg!(--"max-iterations" <N> "Cap on GRASP iterations")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--seed <SEED> "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(
            arg!(--"random-phase" <POLICY> "Multiplier of the free-random perturbation phase")
                .value_parser(["constant", "uniform", "reseeded"])
                .default_value("constant"),
        )
}

fn config_from(matches: &ArgMatches) -> Result<GraspConfig> {
    let mut config = GraspConfig::default()
        .with_perturbation(!matches.get_flag("no-perturbation"))
        .with_time_limit(Duration::from_secs(
            *matches.get_one::<u64>("time-limit").unwrap_or(&1800),
        ));
    if let Some(&alpha) = matches.get_one::<f64>("alpha") {
        config = config.with_alpha(alpha);
    }
    if matches.get_flag("first-improving") {
        config = config.with_local_search(LocalSearchMode::FirstImproving);
    }
    if let Some(&target) = matches.get_one::<f64>("target") {
        config = config.with_target_cost(-target);
    }
    if let Some(&n) = matches.get_one::<usize>("max-iterations") {
        config = config.with_max_iterations(n);
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    config.random_phase = match matches.get_one::<String>("random-phase").map(String::as_str) {
        Some("uniform") => RandomPhasePolicy::Uniform,
        Some("reseeded") => RandomPhasePolicy::Reseeded {
            seed: config.seed.unwrap_or(0),
        },
        _ => RandomPhasePolicy::Constant,
    };

    config.validate().map_err(|e| anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let path = matches
        .get_one::<PathBuf>("INSTANCE")
        .ok_or_else(|| anyhow!("missing instance path"))?;
    let config = config_from(matches)?;

    let mut solver = QbfacGrasp::from_file(path, &config)
        .with_context(|| format!("loading {}", path.display()))?;
    let result = GraspRunner::run(&mut solver, &config);

    println!("instance:   {}", path.display());
    println!("best value: {}", -result.best_cost);
    println!("selection:  {:?}", result.best.sorted_elements());
    println!("iterations: {} (best at {})", result.iterations, result.best_iteration);
    println!("stopped:    {:?}", result.stop_reason);
    println!("time:       {:.3}s", result.elapsed.as_secs_f64());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
