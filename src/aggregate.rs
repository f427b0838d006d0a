//! Averages over random curves, and the BEDROC score.

use crate::builders;
use crate::curve::Curve;
use crate::errors::{Result, invalid_input};
use crate::parallelism;
use crate::scored_data::{ScoredData, TieMode};
use crate::transform::Transform;
use log::debug;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

/// The vertical average of many random curves, with statistics of their areas.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledCurves {
    pub curve: Curve,
    pub mean_area: f64,
    /// Unbiased sample standard deviation of the areas; needs at least two samples.
    pub std_dev: Option<f64>,
    pub samples: u64,
}

impl SampledCurves {
    /// Standard error of [SampledCurves::mean_area].
    pub fn std_error(&self) -> Option<f64> {
        self.std_dev.map(|sd| sd / (self.samples as f64).sqrt())
    }
}

fn check_samples(n: u64) -> Result<()> {
    if n == 0 {
        return Err(invalid_input("at least one sample is needed".to_owned()));
    }
    Ok(())
}

/// Running vertical sum of sampled curves, with the area of each sample.
struct CurveSum {
    total: Option<Curve>,
    areas: Vec<f64>,
}

impl CurveSum {
    fn new() -> CurveSum {
        CurveSum {
            total: None,
            areas: Vec::new(),
        }
    }

    fn add(&mut self, curve: Curve) -> Result<()> {
        self.areas.push(curve.area());
        self.total = Some(match self.total.take() {
            None => curve,
            Some(total) => total.vertical_add(&curve)?,
        });
        Ok(())
    }

    fn finish(self) -> Result<SampledCurves> {
        let n = self.areas.len();
        let total = self
            .total
            .ok_or_else(|| invalid_input("at least one sample is needed".to_owned()))?;
        let curve = total.vertical_scale(1.0 / n as f64)?;
        let mean_area = self.areas.iter().sum::<f64>() / n as f64;
        let std_dev = if n >= 2 {
            let ss: f64 = self
                .areas
                .iter()
                .map(|a| (a - mean_area) * (a - mean_area))
                .sum();
            Some((ss / (n - 1) as f64).sqrt())
        } else {
            None
        };
        debug!(
            target: "croc",
            "{n} samples: mean area {mean_area}, standard deviation {}",
            std_dev.map_or("undefined".to_owned(), |sd| sd.to_string())
        );
        Ok(SampledCurves {
            curve,
            mean_area,
            std_dev,
            samples: n as u64,
        })
    }
}

/// Draw `n` curves from `sample` and average them.
pub fn sample_curves<F>(mut sample: F, n: u64) -> Result<SampledCurves>
where
    F: FnMut() -> Result<Curve>,
{
    check_samples(n)?;
    let mut sum = CurveSum::new();
    for _ in 0..n {
        sum.add(sample()?)?;
    }
    sum.finish()
}

/// Like [sample_curves], but the samples are drawn in parallel.
///
/// Sample `i` gets its own generator, seeded from `seed` and `i`, and the
/// samples are summed in index order, so the result only depends on `seed`.
pub fn sample_curves_parallel<F>(sample: F, n: u64, seed: u64) -> Result<SampledCurves>
where
    F: Fn(&mut Xoshiro256PlusPlus) -> Result<Curve> + Sync,
{
    check_samples(n)?;
    let sample = &sample;
    let mut sum = CurveSum::new();
    let mut failure = None;
    parallelism::compute_parallel(
        |job| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed ^ job.wrapping_mul(SEED_STRIDE));
            sample(&mut rng)
        },
        n,
        |curve| {
            if failure.is_none() {
                if let Err(e) = curve.and_then(|c| sum.add(c)) {
                    failure = Some(e);
                }
            }
        },
    );
    match failure {
        Some(e) => Err(e),
        None => sum.finish(),
    }
}

/// Spreads the per-sample seeds apart.
const SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// BEDROC score together with the curves it was computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Bedroc {
    pub curve: Curve,
    pub area: f64,
    pub max_curve: Curve,
    pub max_area: f64,
    pub min_curve: Curve,
    pub min_area: f64,
    pub bedroc: f64,
}

impl Bedroc {
    /// Difference between the best and the worst possible area.
    pub fn scale(&self) -> f64 {
        self.max_area - self.min_area
    }

    /// Place any area on the BEDROC scale of this data set.
    pub fn normalize(&self, area: f64) -> f64 {
        (area - self.min_area) / self.scale()
    }
}

/// The area under the exponentially transformed ceiling accumulation curve,
/// rescaled so that the worst ordering gets 0 and the best ordering gets 1.
pub fn bedroc(data: &ScoredData, alpha: f64) -> Result<Bedroc> {
    let t = Transform::exponential(alpha)?;
    let curve = builders::ceiling_ac(data.sweep_threshold(TieMode::Smooth)?)?.transform_x(&t)?;
    let min_curve = builders::ceiling_ac(data.sweep_threshold_worst()?)?.transform_x(&t)?;
    let max_curve = builders::ceiling_ac(data.sweep_threshold_best()?)?.transform_x(&t)?;
    let area = curve.area();
    let min_area = min_curve.area();
    let max_area = max_curve.area();
    let bedroc = (area - min_area) / (max_area - min_area);
    debug!(target: "croc", "{t}: area {area}, worst {min_area}, best {max_area}");
    Ok(Bedroc {
        curve,
        area,
        max_curve,
        max_area,
        min_curve,
        min_area,
        bedroc,
    })
}
