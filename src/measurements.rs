//! Values of the INA219 measurement registers
//!
//! Both registers are read as raw 16 bit words. No range checks are done on them, values outside
//! the datasheet ranges are passed through as the chip reports them.

#![warn(clippy::pedantic)]
#![warn(clippy::missing_const_for_fn)]

use crate::register::{ReadRegister, Register, RegisterName};
use core::fmt::{Display, Formatter};

/// A shunt voltage measurement as read from the shunt voltage register
///
/// The register holds a signed value in units of 10µV. A positive value means current flows from
/// IN+ to IN-, which in most installations means the battery is charging.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ShuntVoltage(i16);

impl ShuntVoltage {
    /// Turns the bits read from the register into a `ShuntVoltage`
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(i16::from_ne_bytes(bits.to_ne_bytes()))
    }

    /// Get the shunt voltage in 10µV, this is the resolution used by the INA219.
    #[must_use]
    pub const fn voltage_10uv(self) -> i16 {
        self.0
    }

    /// Get the shunt voltage in µV
    #[must_use]
    pub fn voltage_uv(self) -> i32 {
        i32::from(self.0) * 10
    }

    /// Get the shunt voltage in mV, truncating toward zero
    #[must_use]
    pub const fn voltage_mv(self) -> i16 {
        self.0 / 100
    }
}

impl Register for ShuntVoltage {
    const NAME: RegisterName = RegisterName::ShuntVoltage;
}

impl ReadRegister for ShuntVoltage {
    fn from_bits(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl Display for ShuntVoltage {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}mV", self.voltage_mv())
    }
}

/// Contents of the bus voltage register
///
/// The voltage is stored in units of 4mV shifted up by three bits. The lowest bits carry flags
/// about the last conversion.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct BusVoltage(u16);

impl BusVoltage {
    const FLAG_MASK: u16 = 0b111;

    /// Create `BusVoltage` from the contents of the register.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// The raw register contents including the flag bits
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Return the bus voltage in mV
    ///
    /// Masking the flags leaves the voltage as a multiple of 8mV, one more shift gives mV.
    #[must_use]
    pub const fn voltage_mv(self) -> u16 {
        (self.0 & !Self::FLAG_MASK) >> 1
    }

    /// Check if the conversion ready flag is set
    #[must_use]
    pub const fn is_conversion_ready(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// This flag is set if the power or current calculation of the chip overflowed
    #[must_use]
    pub const fn has_math_overflowed(self) -> bool {
        self.0 & 1 != 0
    }
}

impl Register for BusVoltage {
    const NAME: RegisterName = RegisterName::BusVoltage;
}

impl ReadRegister for BusVoltage {
    fn from_bits(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl Display for BusVoltage {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}mV", self.voltage_mv())
    }
}
