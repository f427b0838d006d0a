//! Data structures and helpers for reporting results.

use crate::aggregate::{Bedroc, SampledCurves};
use crate::builders::CurveType;
use crate::curve::Curve;
use crate::errors::Result;
use crate::scored_data::TieMode;
use crate::transform::Transform;
use serde::Serialize;
use std::{fs, io};

/// Statistics of a batch of random curves.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OSampled {
    pub average: f64,
    pub std_deviation: Option<f64>,
    pub std_error: Option<f64>,
    pub samples: u64,
}

impl From<&SampledCurves> for OSampled {
    fn from(s: &SampledCurves) -> Self {
        OSampled {
            average: s.mean_area,
            std_deviation: s.std_dev,
            std_error: s.std_error(),
            samples: s.samples,
        }
    }
}

/// BEDROC of a batch of random curves, on the scale of the actual data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ORandomBedroc {
    pub average: f64,
    pub std_deviation: Option<f64>,
    pub std_error: Option<f64>,
}

impl ORandomBedroc {
    pub fn new(b: &Bedroc, random: &SampledCurves) -> Self {
        ORandomBedroc {
            average: b.normalize(random.mean_area),
            std_deviation: random.std_dev.map(|sd| sd / b.scale()),
            std_error: random.std_error().map(|se| se / b.scale()),
        }
    }
}

/// Everything that the command line tools compute, for `--summary`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tie_mode: Option<TieMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve_type: Option<CurveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampled: Option<OSampled>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random: Option<OSampled>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedroc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_bedroc: Option<ORandomBedroc>,
}

impl Summary {
    pub fn for_curve(tie_mode: TieMode, curve_type: CurveType, transform: &Transform) -> Self {
        Summary {
            tie_mode: Some(tie_mode),
            curve_type: Some(curve_type),
            transform: Some(transform.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}

/// One `label = value` line of the report printed on stderr.
pub fn stat_line(label: &str, value: f64) -> String {
    format!("{label} = {value}")
}

/// Like [stat_line], for statistics that need more than one sample.
pub fn opt_stat_line(label: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => stat_line(label, v),
        None => format!("{label} = undefined"),
    }
}

/// Report lines for a batch of random curves.
pub fn sampled_lines(prefix: &str, s: &OSampled) -> Vec<String> {
    vec![
        stat_line(&format!("{prefix} (average)"), s.average),
        opt_stat_line(&format!("{prefix} (standard deviation)"), s.std_deviation),
        opt_stat_line(&format!("{prefix} (standard error)"), s.std_error),
    ]
}

pub fn write_curve_file(filename: &str, curve: &Curve) -> Result<()> {
    let file = fs::File::create(filename)?;
    curve.write_to(io::BufWriter::new(file))
}

pub fn write_json<T: Serialize>(filename: &str, value: &T) -> Result<()> {
    let file = fs::File::create(filename)?;
    let writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
