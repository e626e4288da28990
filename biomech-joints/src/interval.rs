use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// A closed interval $[a, b]$ whose bounds may be infinite.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Default for Interval {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Interval {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// The interval $[-\infty, \infty]$.
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn with_lower(self, lower: f64) -> Self {
        Self { lower, ..self }
    }

    pub fn with_upper(self, upper: f64) -> Self {
        Self { upper, ..self }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether at least one bound is finite.
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() || self.upper.is_finite()
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }

    /// The value in the interval closest to `value`.
    pub fn clip(&self, value: f64) -> f64 {
        if value < self.lower {
            self.lower
        } else if value > self.upper {
            self.upper
        } else {
            value
        }
    }

    /// Like [`clip`](Self::clip), but logs when the value had to be changed.
    pub(crate) fn make_valid(&self, name: &str, value: f64) -> f64 {
        let clipped = self.clip(value);
        if clipped != value {
            debug!("Clamped {} = {} to range {}", name, value, self);
        }
        clipped
    }
}

fn fmt_bound(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value == f64::INFINITY {
        write!(f, "inf")
    } else if value == f64::NEG_INFINITY {
        write!(f, "-inf")
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        fmt_bound(f, self.lower)?;
        write!(f, ", ")?;
        fmt_bound(f, self.upper)?;
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIntervalError {
    input: String,
}

impl fmt::Display for ParseIntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot parse '{}' as an interval of the form [lower, upper]", self.input)
    }
}

impl Error for ParseIntervalError {}

fn parse_bound(token: &str) -> Option<f64> {
    match token.trim() {
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        other => other.parse().ok().filter(|value: &f64| !value.is_nan()),
    }
}

impl FromStr for Interval {
    type Err = ParseIntervalError;

    /// Parses `"[lower, upper]"`, where either bound may be `inf` or `-inf`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIntervalError { input: s.to_string() };
        let inner = s
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(err)?;
        let (lower, upper) = inner.split_once(',').ok_or_else(err)?;
        let lower = parse_bound(lower).ok_or_else(err)?;
        let upper = parse_bound(upper).ok_or_else(err)?;
        Ok(Self::new(lower, upper))
    }
}
