//! Errors that can be returned by the different functions

use crate::register::RegisterName;
use core::fmt::{Debug, Display, Formatter};

/// Errors that can happen while talking to the INA219
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error<OpenErr, I2cErr> {
    /// The bus could not be opened
    Open(OpenErr),
    /// Writing the register index failed
    Write {
        /// Register that was about to be read
        register: RegisterName,
        /// Error of the underlying bus
        source: I2cErr,
    },
    /// Reading the two bytes of the register failed
    Read {
        /// Register that was being read
        register: RegisterName,
        /// Error of the underlying bus
        source: I2cErr,
    },
    /// A read was attempted while the bus is closed
    NotInitialized,
}

impl<OpenErr, I2cErr> Error<OpenErr, I2cErr> {
    /// Whether this error was reported by the bus itself
    ///
    /// These are not retried by the driver. Once the bus was opened successfully they usually mean
    /// the hardware went away.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Open(_) | Self::Write { .. } | Self::Read { .. })
    }
}

impl<OpenErr: Display, I2cErr: Debug> Display for Error<OpenErr, I2cErr> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "Can't open I2C device: {err}"),
            Self::Write { register, source } => {
                write!(f, "Failed to write I2C device ({register:?}): {source:?}")
            }
            Self::Read { register, source } => {
                write!(f, "Failed to read I2C device ({register:?}): {source:?}")
            }
            Self::NotInitialized => write!(f, "I2C device is not open"),
        }
    }
}

#[cfg(feature = "std")]
impl<OpenErr, I2cErr> std::error::Error for Error<OpenErr, I2cErr>
where
    OpenErr: std::error::Error + 'static,
    I2cErr: Debug + std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open(err) => Some(err),
            Self::Write { source, .. } | Self::Read { source, .. } => Some(source),
            Self::NotInitialized => None,
        }
    }
}

/// The battery configuration can not be used to derive a charge status
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    /// The 100% voltage is not above the 0% voltage
    EmptyVoltageRange {
        /// Configured voltage for 0% charge
        empty_mv: i32,
        /// Configured voltage for 100% charge
        full_mv: i32,
    },
    /// The shunt resistance is zero, so no current can be derived
    ZeroShuntResistance,
    /// The battery capacity is negative
    NegativeCapacity(i32),
    /// The fully charged threshold is above 100%
    FullPercentOutOfRange(u8),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyVoltageRange { empty_mv, full_mv } => write!(
                f,
                "Full charge voltage {full_mv}mV must be above empty voltage {empty_mv}mV"
            ),
            Self::ZeroShuntResistance => write!(f, "Shunt resistance must not be zero"),
            Self::NegativeCapacity(capacity) => {
                write!(f, "Battery capacity {capacity}mAh must not be negative")
            }
            Self::FullPercentOutOfRange(percent) => {
                write!(f, "Fully charged threshold {percent}% is above 100%")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
