use crate::errors::{Result, invalid_argument, invalid_argument_ref};
use std::fmt;
use std::str::FromStr;

/// A monotone map of [0, 1] onto [0, 1] with f(0) = 0 and f(1) = 1.
///
/// Used on the x axis of a curve to give more weight to early retrieval.
/// The parametrized variants are built with [Transform::logarithm],
/// [Transform::exponential] and [Transform::power].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Transform {
    #[default]
    Linear,
    Logarithm(Alpha),
    Exponential(Alpha),
    Power(Alpha),
}

/// A transform parameter, always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alpha(f64);

impl Alpha {
    pub fn new(alpha: f64) -> Result<Alpha> {
        if alpha > 0.0 && alpha.is_finite() {
            Ok(Alpha(alpha))
        } else {
            Err(invalid_argument(format!(
                "alpha must be a positive number, got {alpha}"
            )))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Alpha {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Transform {
    /// f(x) = log(1 + alpha x) / log(1 + alpha)
    pub fn logarithm(alpha: f64) -> Result<Transform> {
        Ok(Transform::Logarithm(Alpha::new(alpha)?))
    }

    /// f(x) = (1 - exp(-alpha x)) / (1 - exp(-alpha))
    pub fn exponential(alpha: f64) -> Result<Transform> {
        Ok(Transform::Exponential(Alpha::new(alpha)?))
    }

    /// f(x) = x ^ (1 / (1 + alpha))
    pub fn power(alpha: f64) -> Result<Transform> {
        Ok(Transform::Power(Alpha::new(alpha)?))
    }

    pub fn apply(&self, x: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&x) {
            return Err(invalid_argument(format!(
                "{self} is defined on [0, 1], got {x}"
            )));
        }
        Ok(match *self {
            Transform::Linear => x,
            Transform::Logarithm(Alpha(alpha)) => (1.0 + x * alpha).ln() / (1.0 + alpha).ln(),
            Transform::Exponential(Alpha(alpha)) => {
                (1.0 - (-alpha * x).exp()) / (1.0 - (-alpha).exp())
            }
            Transform::Power(Alpha(alpha)) => x.powf(1.0 / (1.0 + alpha)),
        })
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Transform::Linear => write!(f, "linear"),
            Transform::Logarithm(alpha) => write!(f, "logarithm({alpha})"),
            Transform::Exponential(alpha) => write!(f, "exponential({alpha})"),
            Transform::Power(alpha) => write!(f, "power({alpha})"),
        }
    }
}

/// Accepts `linear`, `exponential(20)`, `exp:20`, `Power(1.5)` and so on.
impl FromStr for Transform {
    type Err = Box<dyn std::error::Error + Send + Sync>;

    fn from_str(s: &str) -> Result<Transform> {
        let s = s.trim();
        let (name, param) = match s.find(['(', ':']) {
            None => (s, None),
            Some(i) => {
                let rest = &s[i + 1..];
                let rest = if s[i..].starts_with('(') {
                    rest.strip_suffix(')').ok_or_else(|| {
                        invalid_argument(format!("unbalanced parentheses in transform '{s}'"))
                    })?
                } else {
                    rest
                };
                let rest = rest.trim();
                (s[..i].trim(), if rest.is_empty() { None } else { Some(rest) })
            }
        };
        let alpha = || -> Result<f64> {
            let p = param.ok_or_else(|| {
                invalid_argument(format!("transform '{name}' needs a parameter"))
            })?;
            p.parse()
                .map_err(|_| invalid_argument(format!("cannot parse transform parameter '{p}'")))
        };
        match name.to_lowercase().as_str() {
            "linear" | "lin" => match param {
                None => Ok(Transform::Linear),
                Some(_) => Err(invalid_argument_ref("linear transform takes no parameter")),
            },
            "logarithm" | "log" => Transform::logarithm(alpha()?),
            "exponential" | "exp" => Transform::exponential(alpha()?),
            "power" | "pow" => Transform::power(alpha()?),
            _ => Err(invalid_argument(format!("unknown transform '{s}'"))),
        }
    }
}
