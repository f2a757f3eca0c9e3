use crate::address::Address;
use crate::bus::OpenBus;
use crate::config::BatteryConfig;
use crate::errors::{ConfigError, Error};
use crate::measurements::{BusVoltage, ShuntVoltage};
use crate::register::ReadRegister;
use crate::status::BatteryStatus;
use core::ops::{Deref, DerefMut};
use embedded_hal_async::i2c::{ErrorType, I2c};

/// Errors returned by a [`BatteryMonitor`] opening its bus with `O`
pub type MonitorError<O> =
    Error<<O as OpenBus>::Error, <<O as OpenBus>::Bus as ErrorType>::Error>;

/// Embedded HAL compatible battery monitor built on the INA219
///
/// The monitor owns the configuration for its whole lifetime, while the bus is only open between
/// [`init`](Self::init) and [`deinit`](Self::deinit). Dropping the monitor closes the bus.
pub struct BatteryMonitor<O: OpenBus> {
    opener: O,
    address: Address,
    config: BatteryConfig,
    bus: Option<O::Bus>,
}

impl<O: OpenBus> BatteryMonitor<O> {
    /// Create a monitor with a closed bus
    ///
    /// This only stores the values, nothing is sent on the bus.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `config` does not pass [`BatteryConfig::validate`].
    pub fn new(opener: O, address: Address, config: BatteryConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(BatteryMonitor {
            opener,
            address,
            config,
            bus: None,
        })
    }

    /// Close the bus, doing nothing if it is not open
    pub fn deinit(&mut self) {
        drop(self.release());
    }

    /// Close the bus and hand the underlying handle back
    ///
    /// Returns `None` if the bus was not open.
    pub fn release(&mut self) -> Option<O::Bus> {
        let bus = self.bus.take();
        if bus.is_some() {
            log::debug!("closed I2C bus for INA219 at {}", self.address);
        }
        bus
    }

    /// Whether the bus is currently open
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.bus.is_some()
    }

    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub const fn config(&self) -> &BatteryConfig {
        &self.config
    }

    #[must_use]
    pub const fn opener(&self) -> &O {
        &self.opener
    }
}

impl<O> BatteryMonitor<O>
where
    O: OpenBus,
    O::Bus: I2c,
{
    /// Open the bus
    ///
    /// A bus that is already open is closed first. `init` and `deinit` can be called repeatedly.
    ///
    /// # Errors
    /// Returns [`Error::Open`] if the opener fails.
    pub fn init(&mut self) -> Result<(), MonitorError<O>> {
        self.deinit();

        let bus = self.opener.open().map_err(Error::Open)?;
        log::debug!("opened I2C bus for INA219 at {}", self.address);
        self.bus = Some(bus);

        Ok(())
    }

    /// Open the bus if needed and return a guard that closes it again when dropped
    ///
    /// A bus that was already open stays open after the guard is dropped.
    ///
    /// # Errors
    /// Returns [`Error::Open`] if the bus had to be opened and the opener failed.
    pub fn session(&mut self) -> Result<Session<'_, O>, MonitorError<O>> {
        let opened = !self.is_initialized();
        if opened {
            self.init()?;
        }

        Ok(Session {
            monitor: self,
            opened,
        })
    }

    /// Read the bus voltage, which is taken as the battery voltage
    ///
    /// # Errors
    /// Returns an error if the bus is not open or the transfer fails.
    pub async fn bus_voltage(&mut self) -> Result<BusVoltage, MonitorError<O>> {
        self.read().await
    }

    /// Read the voltage across the shunt resistor
    ///
    /// # Errors
    /// Returns an error if the bus is not open or the transfer fails.
    pub async fn shunt_voltage(&mut self) -> Result<ShuntVoltage, MonitorError<O>> {
        self.read().await
    }

    /// Read both voltages and derive the charge status
    ///
    /// The bus voltage is read first. If that fails the shunt voltage is not read at all, and no
    /// partial status is returned if the second read fails.
    ///
    /// # Errors
    /// Returns an error if the bus is not open or either transfer fails.
    pub async fn status(&mut self) -> Result<BatteryStatus, MonitorError<O>> {
        let bus_voltage = self.bus_voltage().await?;
        let shunt_voltage = self.shunt_voltage().await?;

        let status = self
            .config
            .estimate(bus_voltage.voltage_mv(), shunt_voltage.voltage_mv());
        log::debug!("bus {bus_voltage}, shunt {shunt_voltage}: {status:?}");

        Ok(status)
    }

    /// Write the register index, then read the two bytes of the register big endian
    async fn read<Reg: ReadRegister>(&mut self) -> Result<Reg, MonitorError<O>> {
        let address = self.address.as_byte();
        let register = Reg::NAME;
        let bus = self.bus.as_mut().ok_or(Error::NotInitialized)?;

        bus.write(address, &[register.as_byte()])
            .await
            .map_err(|source| Error::Write { register, source })?;

        let mut buf: [u8; 2] = [0x00; 2];
        bus.read(address, &mut buf)
            .await
            .map_err(|source| Error::Read { register, source })?;

        let bits = u16::from_be_bytes(buf);
        log::trace!("read {register:?} = {bits:#06x}");

        Ok(Reg::from_bits(bits))
    }
}

/// Keeps the bus of a [`BatteryMonitor`] open until dropped
///
/// Dereferences to the monitor so all reads are available on the session. The bus is closed on
/// drop only if the session opened it.
pub struct Session<'a, O: OpenBus> {
    monitor: &'a mut BatteryMonitor<O>,
    opened: bool,
}

impl<O: OpenBus> Deref for Session<'_, O> {
    type Target = BatteryMonitor<O>;

    fn deref(&self) -> &Self::Target {
        self.monitor
    }
}

impl<O: OpenBus> DerefMut for Session<'_, O> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.monitor
    }
}

impl<O: OpenBus> Drop for Session<'_, O> {
    fn drop(&mut self) {
        if self.opened {
            self.monitor.deinit();
        }
    }
}
