//! Real numbers that may be undefined
//!
//! [`Double`] is the numeric primitive behind `double` parameters. It carries
//! an explicit "undefined" state, compares with an epsilon, and converts to and
//! from text using the `NaN` / `inf` tokens understood by parameter files.

use crate::error::{ParamError, Result};
use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::pair,
    IResult, Parser,
};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Default precision used by `Double` comparisons.
pub const DEFAULT_EPSILON: f64 = 1e-13;

/// Text form of an undefined value.
pub const UNDEF_STR: &str = "NaN";

/// Text form of positive infinity. Negative infinity is written `-inf`.
pub const INF_STR: &str = "inf";

/// A real number that may be undefined.
///
/// # Examples
///
/// ```
/// use optparams_rs::Double;
///
/// let d: Double = "2.5e1".parse().unwrap();
/// assert_eq!(d.value(), Some(25.0));
///
/// let undef: Double = "NaN".parse().unwrap();
/// assert!(!undef.is_defined());
/// assert_eq!(undef.to_string(), "NaN");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Double {
    value: Option<f64>,
}

impl Double {
    /// Create a defined value. NaN input gives an undefined value.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::undefined()
        } else {
            Self { value: Some(value) }
        }
    }

    /// Create an undefined value.
    pub fn undefined() -> Self {
        Self { value: None }
    }

    /// Parse a value from text.
    ///
    /// Accepts `-` and `NaN` (undefined), `inf`, `+inf` and `-inf` in any case,
    /// and decimal numbers with optional sign, fraction and exponent.
    pub fn parse(s: &str) -> Result<Self> {
        if s == "-" || s == UNDEF_STR {
            return Ok(Self::undefined());
        }

        let upper = s.to_ascii_uppercase();
        let inf_upper = INF_STR.to_ascii_uppercase();
        if upper == inf_upper || upper == format!("+{}", inf_upper) {
            return Ok(Self::new(f64::INFINITY));
        }
        if upper == format!("-{}", inf_upper) {
            return Ok(Self::new(f64::NEG_INFINITY));
        }

        let conversion_error = || ParamError::ConversionError {
            value: s.to_string(),
            target: "double".to_string(),
        };

        all_consuming(decimal)
            .parse(s)
            .map_err(|_| conversion_error())?;
        s.parse::<f64>()
            .map(Self::new)
            .map_err(|_| conversion_error())
    }

    /// Whether the value is defined
    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }

    /// The underlying value, `None` when undefined
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// The underlying value, or an error when undefined
    pub fn todouble(&self) -> Result<f64> {
        self.value.ok_or_else(|| ParamError::ConversionError {
            value: UNDEF_STR.to_string(),
            target: "f64".to_string(),
        })
    }

    /// Compare two values using the given precision.
    ///
    /// Two undefined values are equal; a defined and an undefined value are not.
    pub fn approx_eq(&self, other: &Double, epsilon: f64) -> bool {
        match (self.value, other.value) {
            (Some(a), Some(b)) => a == b || (a - b).abs() < epsilon,
            (None, None) => true,
            _ => false,
        }
    }

    /// Order two values using the given precision. `None` if either is undefined.
    pub fn approx_cmp(&self, other: &Double, epsilon: f64) -> Option<Ordering> {
        let (a, b) = (self.value?, other.value?);
        if a == b || (a - b).abs() < epsilon {
            Some(Ordering::Equal)
        } else if a < b {
            Some(Ordering::Less)
        } else {
            Some(Ordering::Greater)
        }
    }
}

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, DEFAULT_EPSILON)
    }
}

impl PartialOrd for Double {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.approx_cmp(other, DEFAULT_EPSILON)
    }
}

impl From<f64> for Double {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl FromStr for Double {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            None => write!(f, "{}", UNDEF_STR),
            Some(v) if v == f64::INFINITY => write!(f, "{}", INF_STR),
            Some(v) if v == f64::NEG_INFINITY => write!(f, "-{}", INF_STR),
            Some(v) => write!(f, "{}", v),
        }
    }
}

// Number grammar: [+-]? (digits ['.' digits*] | '.' digits) ([eE] [+-]? digits)?

fn mantissa(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))
    .parse(input)
}

fn exponent(input: &str) -> IResult<&str, &str> {
    recognize(pair(one_of("eE"), pair(opt(one_of("+-")), digit1))).parse(input)
}

fn decimal(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(one_of("+-")), pair(mantissa, opt(exponent)))).parse(input)
}
