//! Quantity string parsing

use crate::units::UnitTag;

/// Parsed quantity, value scaled by its unit suffix
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Quantity {
    /// Numeric part
    pub(crate) value: f64,
    /// Suffix
    pub(crate) unit: UnitTag,
}

/// Why a quantity string could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParseError {
    /// No digits at all
    #[error("empty quantity")]
    Empty,
    /// Not a decimal number once the suffix is removed
    #[error("invalid quantity {raw:?}")]
    InvalidNumber {
        /// Offending input
        raw: String,
    },
    /// Infinite or NaN
    #[error("non finite quantity {raw:?}")]
    NotFinite {
        /// Offending input
        raw: String,
    },
}

/// Split the unit suffix from a trimmed quantity string
fn split_suffix(s: &str) -> (&str, UnitTag) {
    if let Some(num) = s.strip_suffix(UnitTag::Milli.suffix()) {
        return (num, UnitTag::Milli);
    }
    for unit in UnitTag::BINARY {
        if let Some(num) = s.strip_suffix(unit.suffix()) {
            return (num, unit);
        }
    }
    (s, UnitTag::None)
}

fn parse_number(num: &str, raw: &str) -> Result<f64, ParseError> {
    if num.is_empty() {
        return Err(ParseError::Empty);
    }
    let value: f64 = num.parse().map_err(|_| ParseError::InvalidNumber {
        raw: raw.to_owned(),
    })?;
    if !value.is_finite() {
        return Err(ParseError::NotFinite {
            raw: raw.to_owned(),
        });
    }
    Ok(value)
}

/// Parse a quantity string like `500m`, `2Gi` or `1.5`
pub(crate) fn parse(raw: &str) -> Result<Quantity, ParseError> {
    let (num, unit) = split_suffix(raw.trim());
    let value = parse_number(num, raw)?;
    Ok(Quantity { value, unit })
}

/// Parse a quantity string, a malformed number counts as zero
///
/// The matched suffix is kept, so `"xMi"` gives `0 Mi`.
pub(crate) fn parse_or_zero(raw: &str) -> Quantity {
    let (num, unit) = split_suffix(raw.trim());
    let value = parse_number(num, raw).unwrap_or_else(|e| {
        log::debug!("Treating quantity {:?} as zero: {}", raw, e);
        0.0
    });
    Quantity { value, unit }
}
