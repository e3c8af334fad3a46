use anyhow::{Context, Result};
use clap::Parser;
use common::network::Network;
use mesh_map_lib::{MapArgs, MapViewConfig};
use std::io::Write;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod driver;
mod probe;
mod script;

fn main() -> Result<()> {
    let args = MapArgs::parse();

    // stdout carries the reports
    if args.pretty {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).pretty())
            .with(EnvFilter::from_default_env())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).compact())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let config = MapViewConfig::load(args.config_file.as_deref()).context("invalid configuration")?;
    let network = Network::from_path(&args.network)
        .with_context(|| format!("failed to load network {}", args.network.display()))?;
    let events = script::load(args.script.as_deref())?;

    let mut driver = driver::Driver::new(config, network, &args.route);
    let reports = driver.run(events);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for report in reports {
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    Ok(())
}
