//! Decimal values read out of decimal vectors.

/// Maximum precision representable by an `i128` unscaled value.
pub const MAX_PRECISION: u8 = 38;

/// A fixed-point decimal: `unscaled * 10^-scale`.
///
/// Precision and scale are attached at read time by the caller; the vector
/// stores only the unscaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalData {
    unscaled: i128,
    precision: u8,
    scale: u8,
}

impl DecimalData {
    /// Creates a decimal from its unscaled value.
    #[must_use]
    pub const fn from_unscaled(unscaled: i128, precision: u8, scale: u8) -> Self {
        DecimalData {
            unscaled,
            precision,
            scale,
        }
    }

    /// Returns the unscaled integer value.
    #[must_use]
    pub const fn unscaled(&self) -> i128 {
        self.unscaled
    }

    /// Returns the precision supplied at read time.
    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns the scale supplied at read time.
    #[must_use]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// Returns true if the unscaled value has at most `precision` digits.
    #[must_use]
    pub fn fits_precision(&self) -> bool {
        digit_count(self.unscaled) <= u32::from(self.precision)
    }
}

fn digit_count(value: i128) -> u32 {
    let abs = value.unsigned_abs();
    if abs == 0 {
        1
    } else {
        abs.ilog10() + 1
    }
}

impl std::fmt::Display for DecimalData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.unscaled.unsigned_abs().to_string();
        let sign = if self.unscaled < 0 { "-" } else { "" };
        let scale = usize::from(self.scale);
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{sign}{int_part}.{frac_part}")
        } else {
            write!(f, "{sign}0.{digits:0>scale$}")
        }
    }
}
