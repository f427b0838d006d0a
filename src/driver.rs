//! Main entry points used by the command line tools.

use crate::aggregate::{self, Bedroc, SampledCurves};
use crate::builders::{self, CurveType};
use crate::curve::Curve;
use crate::errors::Result;
use crate::scored_data::{Confusion, ScoredData, TieMode};
use crate::transform::Transform;
use clap::ValueEnum;
use log::{debug, info};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::io::BufRead;

/// Default number of random curves to average.
pub const DEFAULT_SAMPLES: u64 = 500;

/// Default early recognition parameter for BEDROC.
pub const DEFAULT_ALPHA: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// `score label` lines
    #[default]
    Scored,
    /// Total count, then positive ranks counting from 0
    Ranks0,
    /// Total count, then positive ranks counting from 1
    Ranks1,
}

pub fn read_scored_data<R: BufRead>(reader: R, format: InputFormat) -> Result<ScoredData> {
    let data = match format {
        InputFormat::Scored => ScoredData::read_from(reader)?,
        InputFormat::Ranks0 => ScoredData::read_ranks0_from(reader)?,
        InputFormat::Ranks1 => ScoredData::read_ranks1_from(reader)?,
    };
    info!(
        target: "croc",
        "instances: {}, positives: {}, negatives: {}, mixed ties: {}",
        data.len(),
        data.positives(),
        data.negatives(),
        data.mixed_tie_count()
    );
    Ok(data)
}

/// What curves to calculate?
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSettings {
    /// How to handle instances with equal scores.
    pub tie_mode: TieMode,

    /// Which curve to build from each sweep.
    pub curve_type: CurveType,

    /// Transform applied to the x axis of every curve.
    pub transform: Transform,

    /// Number of random curves to average.
    /// Used with [TieMode::Sample] and for the random baseline.
    pub samples: u64,

    /// Seed for all randomized calculations.
    pub seed: u64,
}

impl Default for CurveSettings {
    fn default() -> Self {
        CurveSettings {
            tie_mode: TieMode::default(),
            curve_type: CurveType::default(),
            transform: Transform::default(),
            samples: DEFAULT_SAMPLES,
            seed: 0,
        }
    }
}

impl CurveSettings {
    fn build<I>(&self, sweep: I) -> Result<Curve>
    where
        I: IntoIterator<Item = Result<Confusion>>,
    {
        self.curve_type.build(sweep)?.transform_x(&self.transform)
    }
}

/// The primary curve, either computed once or averaged over sampled ties.
#[derive(Clone, Debug, PartialEq)]
pub enum CurveReport {
    Single { curve: Curve, area: f64 },
    Sampled(SampledCurves),
}

impl CurveReport {
    fn single(curve: Curve) -> CurveReport {
        let area = curve.area();
        CurveReport::Single { curve, area }
    }

    pub fn curve(&self) -> &Curve {
        match self {
            CurveReport::Single { curve, .. } => curve,
            CurveReport::Sampled(s) => &s.curve,
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            CurveReport::Single { area, .. } => *area,
            CurveReport::Sampled(s) => s.mean_area,
        }
    }
}

/// Calculate the curve of the data.
///
/// This is the main entry point for the library.
pub fn calc_curve(settings: &CurveSettings, data: &ScoredData) -> Result<CurveReport> {
    debug!(
        target: "croc",
        "{} curve, {} transform, ties: {}",
        settings.curve_type, settings.transform, settings.tie_mode
    );
    match settings.tie_mode {
        TieMode::Sample => {
            let sampled = aggregate::sample_curves_parallel(
                |rng| {
                    settings.build(data.sweep_threshold_with_rng(TieMode::Sample, rng.clone())?)
                },
                settings.samples,
                settings.seed,
            )?;
            Ok(CurveReport::Sampled(sampled))
        }
        mode => Ok(CurveReport::single(settings.build(data.sweep_threshold(mode)?)?)),
    }
}

/// The curve if all positives were ranked first.
pub fn calc_best(settings: &CurveSettings, data: &ScoredData) -> Result<CurveReport> {
    Ok(CurveReport::single(settings.build(data.sweep_threshold_best()?)?))
}

/// The curve if all positives were ranked last.
pub fn calc_worst(settings: &CurveSettings, data: &ScoredData) -> Result<CurveReport> {
    Ok(CurveReport::single(settings.build(data.sweep_threshold_worst()?)?))
}

/// Average curve of random orderings.
pub fn calc_random(settings: &CurveSettings, data: &ScoredData) -> Result<SampledCurves> {
    aggregate::sample_curves_parallel(
        |rng| settings.build(data.sweep_threshold_random(rng)?),
        settings.samples,
        random_seed(settings.seed),
    )
}

pub fn calc_bedroc(data: &ScoredData, alpha: f64) -> Result<Bedroc> {
    let b = aggregate::bedroc(data, alpha)?;
    info!(target: "croc", "BEDROC with alpha {alpha}: {}", b.bedroc);
    Ok(b)
}

/// Average exponentially transformed accumulation curve of random orderings.
pub fn calc_random_bedroc(
    data: &ScoredData,
    alpha: f64,
    samples: u64,
    seed: u64,
) -> Result<SampledCurves> {
    let t = Transform::exponential(alpha)?;
    aggregate::sample_curves_parallel(
        |rng: &mut Xoshiro256PlusPlus| {
            builders::ceiling_ac(data.sweep_threshold_random(rng)?)?.transform_x(&t)
        },
        samples,
        random_seed(seed),
    )
}

/// The random baseline does not reuse the streams of the sampled ties.
fn random_seed(seed: u64) -> u64 {
    seed.wrapping_add(1)
}
