//! I2C address of the INA219 on the bus
//!
//! The address pins A0 and A1 select one of 16 addresses in `0x40..=0x4F` (table 1 of the
//! datasheet).

use core::fmt::Formatter;
use core::ops::RangeInclusive;

/// I2C address of the INA219 on the bus
///
/// # Example
/// ```rust
/// use ina219_battery::address::Address;
///
/// let address = Address::from_byte(0x42).unwrap();
/// assert_eq!(address.as_byte(), 0x42);
///
/// assert!(Address::from_byte(0x60).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Address {
    byte: u8,
}

impl Address {
    const VALID_ADDRESS: RangeInclusive<u8> = 0b100_0000..=0b100_1111;
    const MIN_ADDRESS: u8 = *Self::VALID_ADDRESS.start();
    const MAX_ADDRESS: u8 = *Self::VALID_ADDRESS.end();

    /// Create an address from a byte
    ///
    /// # Errors
    /// This will return `Err` if the byte is not one of the addresses an INA219 can be strapped to.
    pub const fn from_byte(byte: u8) -> Result<Self, OutOfRange> {
        match byte {
            Self::MIN_ADDRESS..=Self::MAX_ADDRESS => Ok(Self { byte }),
            which => Err(OutOfRange { which }),
        }
    }

    /// Get the address as a byte
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        self.byte
    }
}

impl Default for Address {
    /// Both address pins tied to GND
    fn default() -> Self {
        Self {
            byte: Self::MIN_ADDRESS,
        }
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x}", self.byte)
    }
}

/// The given address was not in the expected range for an INA219
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OutOfRange {
    which: u8,
}

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "AddressOutOfRange: {:x}, should be in range: {:x}..={:x}",
            self.which,
            Address::MIN_ADDRESS,
            Address::MAX_ADDRESS,
        )
    }
}

impl TryFrom<u8> for Address {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Address::from_byte(value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRange {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strappable_addresses() {
        for byte in 0x40..=0x4F {
            assert_eq!(Address::from_byte(byte).unwrap().as_byte(), byte);
        }
        assert_eq!(Address::default().as_byte(), 0x40);
    }

    #[test]
    fn rejects_other_addresses() {
        for byte in [0x00, 0x3F, 0x50, 0x7F, 0xFF] {
            assert_eq!(
                Address::try_from(byte),
                Err(OutOfRange { which: byte }),
                "{byte:#x} should be rejected"
            );
        }
    }

    #[test]
    fn displays_as_hex() {
        let address = Address::from_byte(0x42).unwrap();
        assert_eq!(address.to_string(), "0x42");
    }
}
