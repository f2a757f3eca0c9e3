//! Opening the I2C bus the INA219 is attached to
//!
//! The monitor does not keep a bus open for its whole lifetime. Instead it holds an [`OpenBus`]
//! which knows where the bus lives and can produce a fresh handle every time the monitor is
//! initialized. Dropping the handle closes the bus.

/// Something that can open an I2C bus
pub trait OpenBus {
    /// The open bus, an `embedded_hal::i2c::I2c` or `embedded_hal_async::i2c::I2c`
    type Bus;

    /// Reason the bus could not be opened
    type Error;

    /// Open the bus
    ///
    /// # Errors
    /// Returns an error if the underlying device can not be opened.
    fn open(&mut self) -> Result<Self::Bus, Self::Error>;
}

/// Opens the same kind of bus again and again by calling a closure
///
/// # Example
/// ```rust
/// use ina219_battery::bus::{FnBus, OpenBus};
///
/// let mut opener = FnBus(|| Ok::<_, ()>("bus"));
/// assert_eq!(opener.open(), Ok("bus"));
/// ```
#[derive(Debug, Clone)]
pub struct FnBus<F>(pub F);

impl<F, B, E> OpenBus for FnBus<F>
where
    F: FnMut() -> Result<B, E>,
{
    type Bus = B;
    type Error = E;

    fn open(&mut self) -> Result<B, E> {
        (self.0)()
    }
}

#[cfg(feature = "linux")]
pub use linux::LinuxBus;

#[cfg(feature = "linux")]
mod linux {
    use super::OpenBus;
    use linux_embedded_hal::I2cdev;
    use std::io;
    use std::path::{Path, PathBuf};

    /// An I2C character device such as `/dev/i2c-1`
    ///
    /// The slave address is bound by `linux-embedded-hal` on every transfer, so opening only needs
    /// the device path.
    #[derive(Debug, Clone)]
    pub struct LinuxBus {
        path: PathBuf,
    }

    impl LinuxBus {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl OpenBus for LinuxBus {
        type Bus = I2cdev;
        type Error = io::Error;

        fn open(&mut self) -> Result<I2cdev, io::Error> {
            I2cdev::new(&self.path).map_err(|e| {
                let err = io::Error::from(e);
                io::Error::new(err.kind(), format!("{}: {err}", self.path.display()))
            })
        }
    }

}
