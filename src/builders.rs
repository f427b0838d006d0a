//! Curves built from threshold sweeps.
//!
//! Every builder consumes a sweep once, from the first threshold to the
//! last, and stops at the first error.

use crate::curve::Curve;
use crate::errors::{Result, invalid_argument};
use crate::scored_data::{Confusion, Counts};
use clap::ValueEnum;
use log::warn;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    /// Receiver operating characteristic
    #[default]
    Roc,
    /// Accumulation curve, linear within ties
    #[value(name = "slantedac", alias = "ac")]
    SlantedAc,
    /// Accumulation curve, upper staircase
    #[value(name = "ceilingac")]
    CeilingAc,
    /// Accumulation curve, lower staircase
    #[value(name = "floorac")]
    FloorAc,
}

impl CurveType {
    pub fn build<I>(self, sweep: I) -> Result<Curve>
    where
        I: IntoIterator<Item = Result<Confusion>>,
    {
        match self {
            CurveType::Roc => roc(sweep),
            CurveType::SlantedAc => slanted_ac(sweep),
            CurveType::CeilingAc => ceiling_ac(sweep),
            CurveType::FloorAc => floor_ac(sweep),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CurveType::Roc => write!(f, "roc"),
            CurveType::SlantedAc => write!(f, "slantedac"),
            CurveType::CeilingAc => write!(f, "ceilingac"),
            CurveType::FloorAc => write!(f, "floorac"),
        }
    }
}

impl FromStr for CurveType {
    type Err = Box<dyn std::error::Error + Send + Sync>;

    fn from_str(s: &str) -> Result<CurveType> {
        match s {
            "roc" => Ok(CurveType::Roc),
            "ac" | "slantedac" => Ok(CurveType::SlantedAc),
            "ceilingac" => Ok(CurveType::CeilingAc),
            "floorac" => Ok(CurveType::FloorAc),
            _ => Err(invalid_argument(format!(
                "curve type must be one of roc, ac, slantedac, ceilingac, floorac, got '{s}'"
            ))),
        }
    }
}

fn tpr(c: &Counts<f64>) -> f64 {
    c.tp / (c.tp + c.fn_)
}

fn fpr(c: &Counts<f64>) -> f64 {
    c.fp / (c.fp + c.tn)
}

/// Fraction of all instances above the threshold.
fn fraction(c: &Counts<f64>) -> f64 {
    (c.fp + c.tp) / (c.fp + c.tn + c.tp + c.fn_)
}

/// True positive rate against false positive rate.
pub fn roc<I>(sweep: I) -> Result<Curve>
where
    I: IntoIterator<Item = Result<Confusion>>,
{
    let mut curve = Curve::new();
    for c in sweep {
        let c = c?.to_f64();
        curve.append(fpr(&c), tpr(&c))?;
    }
    Ok(curve)
}

/// True positive rate against the fraction of instances retrieved.
pub fn slanted_ac<I>(sweep: I) -> Result<Curve>
where
    I: IntoIterator<Item = Result<Confusion>>,
{
    let mut curve = Curve::new();
    for c in sweep {
        let c = c?.to_f64();
        curve.append(fraction(&c), tpr(&c))?;
    }
    Ok(curve)
}

/// Accumulation curve that rises at the left end of each step.
pub fn ceiling_ac<I>(sweep: I) -> Result<Curve>
where
    I: IntoIterator<Item = Result<Confusion>>,
{
    let mut curve = Curve::new();
    let mut last_f = 0.0;
    for c in sweep {
        let c = c?.to_f64();
        let (f, t) = (fraction(&c), tpr(&c));
        curve.append(last_f, t)?;
        curve.append(f, t)?;
        last_f = f;
    }
    Ok(curve)
}

/// Accumulation curve that rises at the right end of each step.
pub fn floor_ac<I>(sweep: I) -> Result<Curve>
where
    I: IntoIterator<Item = Result<Confusion>>,
{
    let mut curve = Curve::new();
    let mut last_t = 0.0;
    for c in sweep {
        let c = c?.to_f64();
        let (f, t) = (fraction(&c), tpr(&c));
        if f < 0.0 {
            warn!(target: "croc", "skipping sweep step at negative position {f}");
            continue;
        }
        curve.append(f, last_t)?;
        curve.append(f, t)?;
        last_t = t;
    }
    Ok(curve)
}
