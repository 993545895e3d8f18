//! Human readable rendering of quantities

use crate::quantity;
use crate::units::{self, ByteUnit, UnitTag};

/// How a resource value is displayed, deduced from the resource name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResourceKind {
    /// Cores or millicores
    Cpu,
    /// Memory or storage bytes
    Bytes,
}

impl ResourceKind {
    /// Guess kind from a resource name like `limits.memory`
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        if name.contains("cpu") {
            Some(Self::Cpu)
        } else if name.contains("memory") || name.contains("storage") {
            Some(Self::Bytes)
        } else {
            None
        }
    }
}

/// Format a quota value according to its resource name
pub(crate) fn format_resource_value(name: &str, raw: &str) -> String {
    match ResourceKind::from_name(name) {
        Some(ResourceKind::Cpu) => format_cpu(raw),
        Some(ResourceKind::Bytes) => format_memory(raw),
        None => raw.to_owned(),
    }
}

/// Format a CPU quantity
///
/// Millicore values are left as is, whole cores are shown without suffix and
/// fractional cores are converted to millicores.
pub(crate) fn format_cpu(raw: &str) -> String {
    let value = raw.trim();
    if value.ends_with(UnitTag::Milli.suffix()) {
        return value.to_owned();
    }
    let Ok(q) = quantity::parse(value) else {
        return value.to_owned();
    };
    if q.unit != UnitTag::None {
        return value.to_owned();
    }
    if q.value.fract() == 0.0 {
        format!("{:.0}", q.value)
    } else {
        format!("{:.0}m", (q.value * 1000.0).round())
    }
}

/// Format a memory or storage quantity with the largest fitting binary unit
pub(crate) fn format_memory(raw: &str) -> String {
    let q = quantity::parse_or_zero(raw);
    let bytes = units::convert(q.value, q.unit.bytes(), ByteUnit::Bytes);
    let (val, unit) = bytes_to_unit(bytes);
    if val.fract() == 0.0 {
        format!("{:.0}{}", val, unit)
    } else {
        format!("{:.1}{}", val, unit)
    }
}

/// Scale a byte count down by 1024 until it is below 1024, or the unit is `Ei`
pub(crate) fn bytes_to_unit(bytes: f64) -> (f64, ByteUnit) {
    let mut val = bytes;
    let mut unit = ByteUnit::Bytes;
    while val >= 1024.0 {
        let Some(next) = unit.next() else {
            break;
        };
        val /= 1024.0;
        unit = next;
    }
    (val, unit)
}
