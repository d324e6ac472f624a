#![allow(dead_code)]

mod application;
mod cli;
mod data;
mod domain;
mod features;
mod infra;
mod ml;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("nli={level}").parse()?),
        )
        .init();

    cli.run()
}
