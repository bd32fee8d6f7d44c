//! WSN Simulator CLI
//!
//! Deploy a sensor network, form clusters once and run the energy model
//! for a number of steps.

use clap::Parser;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use wsn_sim::{SimConfig, SimError, SimWorld};

/// WSN cluster simulator CLI
#[derive(Parser, Debug)]
#[command(name = "wsn-sim")]
#[command(about = "Simulate energy drain in a clustered wireless sensor network", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of sensor nodes
    #[arg(short, long, default_value = "10")]
    nodes: usize,

    /// Side length of the square deployment area
    #[arg(long, default_value = "100")]
    size: f64,

    /// Number of cluster heads
    #[arg(short, long, default_value = "3")]
    clusters: usize,

    /// Routing steps to simulate
    #[arg(short = 't', long, default_value = "5")]
    steps: u64,

    /// Pause between steps in milliseconds
    #[arg(long, default_value = "0")]
    delay_ms: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output of the final report
    #[arg(long)]
    json: bool,

    /// Export the final network view to a JSON file for plotting
    #[arg(long)]
    export: Option<String>,
}

/// Builds the run configuration from parsed arguments.
fn config_from_args(args: &Args, seed: u64) -> SimConfig {
    SimConfig {
        seed,
        num_nodes: args.nodes,
        network_size: args.size,
        num_clusters: args.clusters,
        steps: args.steps,
    }
}

fn run(args: &Args, seed: u64) -> Result<(), SimError> {
    let mut world = SimWorld::new(config_from_args(args, seed))?;
    world.form_clusters()?;

    let delay = Duration::from_millis(args.delay_ms);
    world.run(|step, _| {
        if !args.json {
            info!("Step {} completed.", step);
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    });

    let report = world.report();

    if let Some(path) = &args.export {
        world.view().write_to_file(path)?;
        if !args.json {
            info!("Exported network view to {}", path);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!("Simulation finished.");
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        for line in report.node_details() {
            info!("{}", line);
        }
        info!(
            "Total energy = {:.2} | depleted nodes = {}/{}",
            report.total_energy,
            report.depleted,
            report.nodes.len()
        );
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    if !args.json {
        info!("WSN Cluster Simulator v{}", env!("CARGO_PKG_VERSION"));
    }

    // Determine seed
    let seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    } else {
        args.seed
    };
    if args.seed == 0 {
        info!("Using time-derived seed {}", seed);
    }

    // Exit with proper code for scripts
    if let Err(e) = run(&args, seed) {
        error!("{}", e);
        std::process::exit(1);
    }
}
