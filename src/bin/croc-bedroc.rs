use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use croc::driver::{self, InputFormat};
use croc::errors::{self, Result};
use croc::output::{self, OError, ORandomBedroc, OSampled, Summary};
use log::{error, info};
use std::{error, fs, io, process};

/// Compute the BEDROC score of scored data
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file (standard input if omitted)
    infile: Option<String>,
    /// Early recognition parameter
    #[arg(short, long, default_value_t = driver::DEFAULT_ALPHA)]
    alpha: f64,
    /// Number of times to sample the random curve
    #[arg(short, long, default_value_t = driver::DEFAULT_SAMPLES)]
    samples: u64,
    /// Random seed
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// File to store the best possible curve
    #[arg(short, long)]
    best: Option<String>,
    /// File to store the worst possible curve
    #[arg(short, long)]
    worst: Option<String>,
    /// File to store the average random curve
    #[arg(short, long)]
    random: Option<String>,
    /// Write the computed statistics as a JSON file
    #[arg(long)]
    summary: Option<String>,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn open_input(infile: &Option<String>) -> Result<Box<dyn io::BufRead>> {
    Ok(match infile {
        Some(filename) => {
            info!(target: "croc", "read: {filename}");
            Box::new(io::BufReader::new(fs::File::open(filename)?))
        }
        None => Box::new(io::stdin().lock()),
    })
}

fn process(args: &Args) -> Result<()> {
    if !(args.alpha > 0.0) {
        return Err(errors::invalid_argument(format!(
            "alpha must be positive, got {}",
            args.alpha
        )));
    }
    let data = driver::read_scored_data(open_input(&args.infile)?, InputFormat::Scored)?;
    let b = driver::calc_bedroc(&data, args.alpha)?;
    b.curve.write_to(io::stdout().lock())?;
    eprintln!("{}", output::stat_line("Area Under Curve", b.area));
    eprintln!("{}", output::stat_line("Area Under Best Curve", b.max_area));
    eprintln!("{}", output::stat_line("Area Under Worst Curve", b.min_area));
    eprintln!("{}", output::stat_line("BEDROC", b.bedroc));

    let mut summary = Summary {
        alpha: Some(args.alpha),
        area: Some(b.area),
        best_area: Some(b.max_area),
        worst_area: Some(b.min_area),
        bedroc: Some(b.bedroc),
        ..Default::default()
    };

    if let Some(filename) = &args.best {
        output::write_curve_file(filename, &b.max_curve)?;
    }
    if let Some(filename) = &args.worst {
        output::write_curve_file(filename, &b.min_curve)?;
    }

    if let Some(filename) = &args.random {
        let random = driver::calc_random_bedroc(&data, args.alpha, args.samples, args.seed)?;
        output::write_curve_file(filename, &random.curve)?;
        let s = OSampled::from(&random);
        for line in output::sampled_lines("Area Under Random Curve", &s) {
            eprintln!("{line}");
        }
        let rb = ORandomBedroc::new(&b, &random);
        eprintln!("{}", output::stat_line("Random BEDROC (average)", rb.average));
        eprintln!(
            "{}",
            output::opt_stat_line("Random BEDROC (standard deviation)", rb.std_deviation)
        );
        eprintln!(
            "{}",
            output::opt_stat_line("Random BEDROC (standard error)", rb.std_error)
        );
        summary.random = Some(s);
        summary.random_bedroc = Some(rb);
    }

    if let Some(filename) = &args.summary {
        info!(target: "croc", "write: {filename}");
        output::write_json(filename, &summary)?;
    }
    Ok(())
}

fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    output::write_json(error_file, &error)
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match store_error(filename, &*e) {
                    Ok(()) => {
                        info!(target: "croc", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "croc", "{e}");
                        error!(target: "croc", "{e2}");
                    }
                },
                None => error!(target: "croc", "{e}"),
            }
            process::exit(1);
        }
    }
}
