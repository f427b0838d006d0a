use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use croc::curve::Curve;
use log::info;
use std::{fs, io};

/// Print the area under a curve
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Curve file (standard input if omitted)
    infile: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    let reader: Box<dyn io::BufRead> = match &args.infile {
        Some(filename) => {
            info!(target: "croc", "read: {filename}");
            let file = fs::File::open(filename).with_context(|| format!("cannot open {filename}"))?;
            Box::new(io::BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let curve = Curve::read_from(reader)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("cannot read curve")?;
    println!("{}", curve.area());
    Ok(())
}
