use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use croc::builders::CurveType;
use croc::driver::{self, CurveReport, CurveSettings, InputFormat};
use croc::errors::Result;
use croc::output::{self, OError, OSampled, Summary};
use croc::scored_data::TieMode;
use croc::transform::Transform;
use log::{error, info};
use std::{error, fs, io, process};

/// Compute a ROC or accumulation curve from scored data
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file (standard input if omitted)
    infile: Option<String>,
    /// Input is a rank file, indexed from 0
    #[arg(long, conflicts_with = "r1")]
    r0: bool,
    /// Input is a rank file, indexed from 1
    #[arg(long)]
    r1: bool,
    /// How to resolve tied scores
    #[arg(short = 'm', long, value_enum, default_value_t = TieMode::Smooth)]
    tie_mode: TieMode,
    /// Curve type
    #[arg(short, long, value_enum, default_value_t = CurveType::Roc)]
    curve_type: CurveType,
    /// X axis transform, e.g. linear, exponential(20), power:1
    #[arg(short, long, default_value = "linear")]
    transform: Transform,
    /// Number of times to sample ties and the random curve
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

impl Args {
    fn input_format(&self) -> InputFormat {
        if self.r0 {
            InputFormat::Ranks0
        } else if self.r1 {
            InputFormat::Ranks1
        } else {
            InputFormat::Scored
        }
    }

    fn settings(&self) -> CurveSettings {
        CurveSettings {
            tie_mode: self.tie_mode,
            curve_type: self.curve_type,
            transform: self.transform,
            samples: self.samples,
            seed: self.seed,
        }
    }
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
    let data = driver::read_scored_data(open_input(&args.infile)?, args.input_format())?;
    let settings = args.settings();
    let mut summary = Summary::for_curve(settings.tie_mode, settings.curve_type, &settings.transform);

    let report = driver::calc_curve(&settings, &data)?;
    report.curve().write_to(io::stdout().lock())?;
    match &report {
        CurveReport::Single { area, .. } => {
            eprintln!("{}", output::stat_line("Area Under Curve", *area));
            summary.area = Some(*area);
        }
        CurveReport::Sampled(s) => {
            let s = OSampled::from(s);
            for line in output::sampled_lines("Area Under Curve", &s) {
                eprintln!("{line}");
            }
            summary.area = Some(s.average);
            summary.sampled = Some(s);
        }
    }

    if let Some(filename) = &args.best {
        let best = driver::calc_best(&settings, &data)?;
        output::write_curve_file(filename, best.curve())?;
        eprintln!("{}", output::stat_line("Area Under Best Curve", best.area()));
        summary.best_area = Some(best.area());
    }

    if let Some(filename) = &args.worst {
        let worst = driver::calc_worst(&settings, &data)?;
        output::write_curve_file(filename, worst.curve())?;
        eprintln!("{}", output::stat_line("Area Under Worst Curve", worst.area()));
        summary.worst_area = Some(worst.area());
    }

    if let Some(filename) = &args.random {
        let random = driver::calc_random(&settings, &data)?;
        output::write_curve_file(filename, &random.curve)?;
        let s = OSampled::from(&random);
        for line in output::sampled_lines("Area Under Random Curve", &s) {
            eprintln!("{line}");
        }
        summary.random = Some(s);
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
