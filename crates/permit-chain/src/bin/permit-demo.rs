//! permit-demo - walk a permit list through every operation
//!
//! Prints the list after each stage, or with `--json` prints only the final
//! snapshot and statistics.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use permit_chain::core::{FakeDepartments, RandomDomains, SeededEntropy, SystemClock};
use permit_chain::{run_demo, ListConfig, PermitList};

/// permit-demo - permit chain walkthrough
#[derive(Parser, Debug)]
#[command(name = "permit-demo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Seed for ids, keys and generated domain sets (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the final state as JSON instead of the narrated walkthrough
    #[arg(long)]
    json: bool,

    /// Check list invariants after every structural change (always on in debug builds)
    #[arg(long)]
    verify: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "starting demo");

    let mut config = ListConfig::default();
    if cli.verify {
        config = config.with_verify_invariants(true);
    }
    let mut list = PermitList::with_config(SeededEntropy::new(seed), SystemClock, config);
    let mut random = RandomDomains::seeded(seed.wrapping_add(1));
    let mut departments = FakeDepartments::seeded(seed.wrapping_add(2));

    if cli.json {
        let outcome = run_demo(&mut list, &mut random, &mut departments, &mut io::sink())
            .context("demo failed")?;
        let json = serde_json::to_string_pretty(&outcome).context("failed to encode outcome")?;
        println!("{}", json);
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        run_demo(&mut list, &mut random, &mut departments, &mut out).context("demo failed")?;
    }

    Ok(())
}
