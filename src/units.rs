//! Quantity units and conversion between them

use std::fmt;

/// Suffix found on a raw quantity string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitTag {
    /// Bare number, cores or bytes depending on the resource
    None,
    /// `m`
    Milli,
    /// `Ki`
    Ki,
    /// `Mi`
    Mi,
    /// `Gi`
    Gi,
    /// `Ti`
    Ti,
    /// `Pi`
    Pi,
    /// `Ei`
    Ei,
}

impl UnitTag {
    /// Suffixes tried after the milli one, in that order
    pub(crate) const BINARY: [Self; 6] = [Self::Ki, Self::Mi, Self::Gi, Self::Ti, Self::Pi, Self::Ei];

    /// Suffix as written in a quantity string
    pub(crate) fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Milli => "m",
            Self::Ki => "Ki",
            Self::Mi => "Mi",
            Self::Gi => "Gi",
            Self::Ti => "Ti",
            Self::Pi => "Pi",
            Self::Ei => "Ei",
        }
    }

    /// Project into the CPU family, if the tag belongs to it
    pub(crate) fn cpu(self) -> Option<CpuUnit> {
        match self {
            Self::None => Some(CpuUnit::Cores),
            Self::Milli => Some(CpuUnit::Milli),
            _ => None,
        }
    }

    /// Project into the byte family, every tag has a byte meaning
    pub(crate) fn bytes(self) -> ByteUnit {
        match self {
            Self::None => ByteUnit::Bytes,
            Self::Milli => ByteUnit::Milli,
            Self::Ki => ByteUnit::Ki,
            Self::Mi => ByteUnit::Mi,
            Self::Gi => ByteUnit::Gi,
            Self::Ti => ByteUnit::Ti,
            Self::Pi => ByteUnit::Pi,
            Self::Ei => ByteUnit::Ei,
        }
    }
}

/// Unit of a single quantity family
pub(crate) trait Unit: Copy + PartialEq {
    /// Multiplicative factor relative to the family base unit
    fn factor(self) -> f64;
}

/// CPU units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CpuUnit {
    /// Whole cores
    Cores,
    /// Thousandths of a core
    Milli,
}

impl Unit for CpuUnit {
    fn factor(self) -> f64 {
        match self {
            Self::Cores => 1.0,
            Self::Milli => 0.001,
        }
    }
}

/// Byte units with binary prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ByteUnit {
    /// Thousandths of a byte, fractional byte counts are stored that way
    Milli,
    /// Plain bytes
    Bytes,
    /// 2^10 bytes
    Ki,
    /// 2^20 bytes
    Mi,
    /// 2^30 bytes
    Gi,
    /// 2^40 bytes
    Ti,
    /// 2^50 bytes
    Pi,
    /// 2^60 bytes
    Ei,
}

impl ByteUnit {
    /// Next larger unit, `None` past `Ei`
    pub(crate) fn next(self) -> Option<Self> {
        match self {
            Self::Milli => Some(Self::Bytes),
            Self::Bytes => Some(Self::Ki),
            Self::Ki => Some(Self::Mi),
            Self::Mi => Some(Self::Gi),
            Self::Gi => Some(Self::Ti),
            Self::Ti => Some(Self::Pi),
            Self::Pi => Some(Self::Ei),
            Self::Ei => None,
        }
    }

}

impl Unit for ByteUnit {
    fn factor(self) -> f64 {
        match self {
            Self::Milli => 0.001,
            Self::Bytes => 1.0,
            Self::Ki => 1024_f64,
            Self::Mi => 1024_f64.powi(2),
            Self::Gi => 1024_f64.powi(3),
            Self::Ti => 1024_f64.powi(4),
            Self::Pi => 1024_f64.powi(5),
            Self::Ei => 1024_f64.powi(6),
        }
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Milli => "m",
            Self::Bytes => "B",
            Self::Ki => "Ki",
            Self::Mi => "Mi",
            Self::Gi => "Gi",
            Self::Ti => "Ti",
            Self::Pi => "Pi",
            Self::Ei => "Ei",
        })
    }
}

/// Convert a value between two units of the same family
pub(crate) fn convert<U: Unit>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        return value;
    }
    value * from.factor() / to.factor()
}
