//! Kubernetes resource quantity parsing
//!
//! The API serializes quantities as strings ("500m", "1Gi", "1e3"). This
//! module parses them into a base-unit `f64` (cores for CPU, bytes for
//! memory) while keeping the canonical string for display. Parsing is
//! approximate by design; precision loss at extreme magnitudes is accepted.

use std::fmt;
use std::str::FromStr;

/// Errors raised while parsing a quantity string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("empty quantity string")]
    Empty,
    #[error("invalid number in quantity {0:?}")]
    InvalidNumber(String),
    #[error("unknown quantity suffix {0:?}")]
    UnknownSuffix(String),
}

/// A parsed Kubernetes quantity
///
/// Holds the canonical string exactly as the API served it, plus the
/// approximate base-unit value.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    raw: String,
    value: f64,
}

impl Quantity {
    /// Approximate value in base units (cores or bytes)
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value scaled to milli-units (e.g. CPU millicores)
    pub fn milli(&self) -> f64 {
        self.value * 1000.0
    }

    /// Value scaled from bytes to mebibytes
    pub fn mebibytes(&self) -> f64 {
        self.value / (1024.0 * 1024.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QuantityError::Empty);
        }

        // Leading sign, digits and decimal point form the number; the
        // remainder is the suffix.
        let split = s
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '+' || c == '-')))
            })
            .map(|(i, _)| i)
            .unwrap_or(s.len());

        let (number, suffix) = s.split_at(split);
        let base: f64 = number
            .parse()
            .map_err(|_| QuantityError::InvalidNumber(s.to_string()))?;
        let multiplier = suffix_multiplier(suffix)?;

        Ok(Quantity {
            raw: s.to_string(),
            value: base * multiplier,
        })
    }
}

/// Resolve a quantity suffix to its multiplier
///
/// Supports decimal SI ("m", "k".."E"), binary SI ("Ki".."Ei") and the
/// scientific-exponent form ("e3", "E-2"). A bare "E" is exa, not an
/// exponent marker.
fn suffix_multiplier(suffix: &str) -> Result<f64, QuantityError> {
    let multiplier = match suffix {
        "" => 1.0,
        "m" => 1e-3,
        "k" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        "T" => 1e12,
        "P" => 1e15,
        "E" => 1e18,
        "Ki" => (1u64 << 10) as f64,
        "Mi" => (1u64 << 20) as f64,
        "Gi" => (1u64 << 30) as f64,
        "Ti" => (1u64 << 40) as f64,
        "Pi" => (1u64 << 50) as f64,
        "Ei" => (1u64 << 60) as f64,
        _ => {
            if suffix.starts_with('e') || suffix.starts_with('E') {
                if let Ok(exp) = suffix[1..].parse::<i32>() {
                    return Ok(10f64.powi(exp));
                }
            }
            return Err(QuantityError::UnknownSuffix(suffix.to_string()));
        }
    };
    Ok(multiplier)
}
