//! Battery monitor built on the INA219 current/voltage monitor
//!
//! The INA219 sits between a battery and its charger or load. The battery voltage is read from the
//! bus voltage register and the battery current from the voltage across the shunt resistor. From
//! these and a [`BatteryConfig`](config::BatteryConfig) the monitor derives how full the battery is,
//! whether it is charging and how long until it is full or empty.
//!
//! All voltages are in mV, currents in mA and capacities in mAh.
//!
//! # Example
//! ```rust,no_run
//! # #[cfg(feature = "linux")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ina219_battery::address::Address;
//! use ina219_battery::bus::LinuxBus;
//! use ina219_battery::config::BatteryConfig;
//! use ina219_battery::SyncBatteryMonitor;
//!
//! let mut monitor = SyncBatteryMonitor::new(
//!     LinuxBus::new("/dev/i2c-1"),
//!     Address::from_byte(0x42)?,
//!     BatteryConfig::default(),
//! )?;
//!
//! let mut session = monitor.session().map_err(|e| e.to_string())?;
//! let status = session.status().map_err(|e| e.to_string())?;
//! println!("{}% charged, {:?}", status.percent_charged, status.charge);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "linux"))]
//! # fn main() {}
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod address;
pub mod bus;
pub mod config;
pub mod errors;
pub mod measurements;
pub mod register;
pub mod status;

pub use errors::{ConfigError, Error};
pub use status::{BatteryStatus, ChargeStatus};

#[cfg(feature = "async")]
mod r#async;

#[cfg(feature = "async")]
pub use r#async::{
    BatteryMonitor as AsyncBatteryMonitor, MonitorError as AsyncMonitorError,
    Session as AsyncSession,
};

#[cfg(feature = "sync")]
mod sync {
    include!(concat!(env!("OUT_DIR"), "/de-asynced.rs"));
}

#[cfg(feature = "sync")]
pub use sync::{
    BatteryMonitor as SyncBatteryMonitor, MonitorError as SyncMonitorError,
    Session as SyncSession,
};
