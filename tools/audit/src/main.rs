//! Data-quality audit of a community dataset.
//!
//! Loading already rejects out-of-enumeration cells; this checks the
//! cross-column invariants: rating score equals the hazard sum, risk level
//! agrees with the rating-score breakpoints, coordinates are in range.

use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use clap::Parser;
use permafrost_core::Dataset;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "audit", about = "Check a community dataset against its data-quality invariants")]
struct Args {
    /// Community CSV file.
    #[arg(short, long, default_value = "data/communities.csv")]
    dataset: String,

    /// Print findings as JSON instead of one line each.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let dataset = Dataset::from_path(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset))?;

    let findings = dataset.audit();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        for finding in &findings {
            println!("{finding}");
        }
    }

    if findings.is_empty() {
        tracing::info!("All {} communities passed", dataset.len());
        return Ok(());
    }
    let failing: BTreeSet<&str> = findings.iter().map(|f| f.community.as_str()).collect();
    bail!(
        "{} finding(s) in {} of {} communities",
        findings.len(),
        failing.len(),
        dataset.len()
    );
}
