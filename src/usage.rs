//! Used / hard ratio

use std::fmt;

use crate::config::UsageConfig;
use crate::quantity::{self, Quantity};
use crate::units::{self, UnitTag};

/// Utilization of a quota resource
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Usage {
    /// Hard limit is zero
    NotApplicable,
    /// Used amount relative to hard limit, in percent
    Percent(f64),
}

/// How close to its limit a resource is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    /// Below warning threshold
    Normal,
    /// At or above warning threshold
    Warning,
    /// At or above critical threshold
    Critical,
}

impl Usage {
    /// Compute usage from raw used and hard quantity strings
    pub(crate) fn compute(used_raw: &str, hard_raw: &str) -> Self {
        let used = quantity::parse_or_zero(used_raw);
        let hard = quantity::parse_or_zero(hard_raw);

        let used_value = align(used, hard.unit);

        if hard.value == 0.0 {
            return Self::NotApplicable;
        }
        Self::Percent(used_value / hard.value * 100.0)
    }

    /// Classify against warning and critical thresholds
    pub(crate) fn severity(self, cfg: &UsageConfig) -> Severity {
        match self {
            Self::Percent(p) if p >= cfg.critical => Severity::Critical,
            Self::Percent(p) if p >= cfg.warning => Severity::Warning,
            _ => Severity::Normal,
        }
    }
}

/// Express `q` in unit `target`
///
/// CPU units are used when both tags have a CPU meaning, bytes otherwise.
fn align(q: Quantity, target: UnitTag) -> f64 {
    if q.unit == target {
        return q.value;
    }
    match (q.unit.cpu(), target.cpu()) {
        (Some(from), Some(to)) => units::convert(q.value, from, to),
        _ => units::convert(q.value, q.unit.bytes(), target.bytes()),
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotApplicable => f.write_str("N/A"),
            Self::Percent(p) => write!(f, "{:.1}%", p),
        }
    }
}
