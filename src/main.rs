use std::process;

use pathfinder::utils::config::{Arguments, Config};
use pathfinder::utils::error::Result;
use pathfinder::utils::{json, yaml};
use pathfinder::PathFinder;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Arguments = argh::from_env();
    let config = match yaml::load_config(&args.config) {
        Ok(mut config) => {
            config.override_from_args(&args);
            config
        },
        Err(err) => {
            eprintln!("{}: {}", err, args.config);
            process::exit(2);
        },
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&args, config) {
        error!(reason = ?err, "{}", err);
        process::exit(1);
    }
}

fn run(args: &Arguments, config: Config) -> Result<()> {
    info!(config = %config.name, "loading {}", args.topology);
    let topology = if args.topology.ends_with(".json") {
        json::load_topology(&args.topology)?
    } else {
        yaml::load_topology(&args.topology)?
    };
    let query = yaml::load_query(&args.query)?;

    let finder = PathFinder::new(config);
    finder.apply_topology_snapshot(&topology, 1)?;
    let routes = finder.find_paths(&query)?;
    info!(source = %query.source, destination = %query.destination,
          paths = routes.len(), "answered query");
    println!("{}", json::dump_routes(&routes)?);
    Ok(())
}
