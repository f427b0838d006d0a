use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use croc::curve::Curve;
use log::info;
use std::{fs, io};

/// Vertically average curve files
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Curve files
    files: Vec<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn read_curve(filename: &str) -> Result<Curve> {
    info!(target: "croc", "read: {filename}");
    let file = fs::File::open(filename).with_context(|| format!("cannot open {filename}"))?;
    Curve::read_from(io::BufReader::new(file))
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("cannot read curve from {filename}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    if args.files.is_empty() {
        Args::command().print_help()?;
        return Ok(());
    }
    let curves = args
        .files
        .iter()
        .map(|f| read_curve(f))
        .collect::<Result<Vec<_>>>()?;
    Curve::average(&curves)
        .and_then(|c| c.write_to(io::stdout().lock()))
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("cannot average curves")?;
    Ok(())
}
