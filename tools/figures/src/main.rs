//! Render the dashboard's figures for a selection as Plotly JSON.
//!
//! Runs the same startup as the page (dataset, config, map token) and prints
//! what the browser would draw for the given selection.

use std::fs;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use permafrost_core::{ChartVariant, Dashboard, DashboardConfig, Dataset, MapboxToken, SelectionEvent, Session};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "figures", about = "Export map, chart and table figures for a community selection")]
struct Args {
    /// Community CSV file.
    #[arg(short, long, default_value = "data/communities.csv")]
    dataset: String,

    /// Optional dashboard config JSON; defaults apply to missing fields.
    #[arg(long)]
    config: Option<String>,

    /// Write JSON here instead of stdout.
    #[arg(short, long)]
    output: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Map markers coloured by a hazard category.
    Map {
        #[arg(short, long, default_value = "Risk Level")]
        category: String,
    },
    /// Hazard chart, one lane per community in the order given.
    Chart {
        #[arg(short = 'n', long = "community")]
        communities: Vec<String>,

        /// Overrides the configured chart variant.
        #[arg(long)]
        variant: Option<VariantArg>,
    },
    /// Data table rows for the given communities.
    Table {
        #[arg(short = 'n', long = "community")]
        communities: Vec<String>,
    },
    /// Everything the page draws: map, chart, table and selection.
    Page {
        #[arg(short, long, default_value = "Risk Level")]
        category: String,

        #[arg(short = 'n', long = "community")]
        communities: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    Compact,
    Extended,
}

impl From<VariantArg> for ChartVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Compact => ChartVariant::Compact,
            VariantArg::Extended => ChartVariant::Extended,
        }
    }
}

// ── Figures ──────────────────────────────────────────────────────────────────

fn map_figure(session: &Session, token: &MapboxToken) -> Result<Value> {
    Ok(session.map()?.to_figure(&session.config().map, token))
}

fn chart_figure(session: &Session) -> Result<Value> {
    Ok(session.chart()?.to_figure(&session.config().chart))
}

fn select(session: &mut Session, category: Option<String>, communities: Vec<String>) -> Result<()> {
    if let Some(category) = category {
        session.apply(SelectionEvent::CategoryChanged(category))?;
    }
    session.apply(SelectionEvent::CommunitiesChanged(communities))?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let token = MapboxToken::from_env()?;
    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_json_file(path)?,
        None => DashboardConfig::default(),
    };
    if let Command::Chart { variant: Some(v), .. } = &args.command {
        config.chart_variant = (*v).into();
    }
    let dataset = Dataset::from_path(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset))?;
    let dashboard = Dashboard::new(dataset, config)?;
    let mut session = dashboard.session();

    let figure = match args.command {
        Command::Map { category } => {
            select(&mut session, Some(category), Vec::new())?;
            map_figure(&session, &token)?
        }
        Command::Chart { communities, .. } => {
            select(&mut session, None, communities)?;
            chart_figure(&session)?
        }
        Command::Table { communities } => {
            select(&mut session, None, communities)?;
            serde_json::to_value(session.table()?)?
        }
        Command::Page { category, communities } => {
            select(&mut session, Some(category), communities)?;
            json!({
                "selection": session.selection(),
                "map": map_figure(&session, &token)?,
                "map_config": session.config().map.plot_config(),
                "chart": chart_figure(&session)?,
                "chart_config": { "toImageButtonOptions": session.config().chart.export },
                "table": session.table()?,
            })
        }
    };

    let text = serde_json::to_string_pretty(&figure)?;
    match args.output {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("writing {path}"))?;
            tracing::info!("Wrote {path}");
        }
        None => println!("{text}"),
    }
    Ok(())
}
