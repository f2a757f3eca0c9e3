#![allow(clippy::module_name_repetitions)]

/// Addresses of the INA219 registers read by the battery monitor
///
/// See page 18 of the datasheet for the full register map.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RegisterName {
    /// Shunt voltage register, see [`ShuntVoltage`](crate::measurements::ShuntVoltage)
    ShuntVoltage = 0x01,
    /// Bus voltage register, see [`BusVoltage`](crate::measurements::BusVoltage)
    BusVoltage = 0x02,
}

impl RegisterName {
    /// The register index as written on the bus
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

pub trait Register {
    const NAME: RegisterName;
}

pub trait ReadRegister: Register {
    fn from_bits(bits: u16) -> Self;
}
