//! Capability definitions for column vectors.

use serde::{Deserialize, Serialize};

/// Typed-access capabilities a column vector variant may support.
///
/// Every vector supports exactly one capability besides null checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Boolean.
    Boolean,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer.
    Short,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// Variable-length bytes (also used for UTF-8 strings).
    Bytes,
    /// Fixed-point decimal, precision and scale supplied per read.
    Decimal,
    /// Timestamp, precision supplied per read.
    Timestamp,
    /// Variable-length array of a child type.
    Array,
    /// Key/value map.
    Map,
    /// Nested row (struct).
    Row,
}

impl Capability {
    /// Returns the name of the capability.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Boolean => "BOOLEAN",
            Capability::Byte => "BYTE",
            Capability::Short => "SHORT",
            Capability::Int => "INT",
            Capability::Long => "LONG",
            Capability::Float => "FLOAT",
            Capability::Double => "DOUBLE",
            Capability::Bytes => "BYTES",
            Capability::Decimal => "DECIMAL",
            Capability::Timestamp => "TIMESTAMP",
            Capability::Array => "ARRAY",
            Capability::Map => "MAP",
            Capability::Row => "ROW",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
