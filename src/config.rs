//! Static properties of the battery and the measurement circuit
//!
//! All voltages are in mV, currents in mA and capacities in mAh so the arithmetic can stay in
//! integers. Fields can be overridden selectively using `..Default::default()`:
//! ```rust
//! use ina219_battery::config::BatteryConfig;
//!
//! let config = BatteryConfig {
//!     capacity_mah: 3000,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::errors::ConfigError;

/// Which direction of current through the shunt means the battery is charging
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CurrentPolarity {
    /// A positive shunt voltage (IN+ higher than IN-) means charging. This is the usual wiring.
    #[default]
    ChargingPositive,
    /// A negative shunt voltage means charging
    ChargingNegative,
}

impl CurrentPolarity {
    /// Orient a current measured across the shunt so that positive means charging
    #[must_use]
    pub const fn orient(self, current_ma: i32) -> i32 {
        match self {
            Self::ChargingPositive => current_ma,
            Self::ChargingNegative => -current_ma,
        }
    }
}

/// Battery and circuit properties used to derive the charge status
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatteryConfig {
    /// Resistance of the current sense resistor between IN+ and IN-
    pub shunt_milliohms: u32,
    /// Battery voltage that is reported as 0% charged
    pub empty_mv: i32,
    /// Battery voltage that is reported as 100% charged
    pub full_mv: i32,
    /// Nominal capacity of the battery
    pub capacity_mah: i32,
    /// Currents below this are treated as noise rather than charging
    pub min_charging_current_ma: i32,
    /// At or above this charge level the battery is reported as fully charged
    ///
    /// Near the top of the range the voltage oscillates and the current reverses direction, so
    /// charge and discharge are not distinguished there.
    pub full_percent: u8,
    /// How the INA219 is wired relative to the battery
    pub polarity: CurrentPolarity,
}

impl BatteryConfig {
    /// Default threshold above which the battery counts as fully charged
    pub const FULL_PERCENT: u8 = 99;

    /// Check the configuration can be used for the status arithmetic
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the voltage range is empty, the shunt resistance is zero, the
    /// capacity is negative or the full threshold is above 100%.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.full_mv <= self.empty_mv {
            return Err(ConfigError::EmptyVoltageRange {
                empty_mv: self.empty_mv,
                full_mv: self.full_mv,
            });
        }
        if self.shunt_milliohms == 0 {
            return Err(ConfigError::ZeroShuntResistance);
        }
        if self.capacity_mah < 0 {
            return Err(ConfigError::NegativeCapacity(self.capacity_mah));
        }
        if self.full_percent > 100 {
            return Err(ConfigError::FullPercentOutOfRange(self.full_percent));
        }
        Ok(())
    }
}

impl Default for BatteryConfig {
    /// Two 18650 cells in series measured across a 0.1Ω shunt
    fn default() -> Self {
        Self {
            shunt_milliohms: 100,
            empty_mv: 6000,
            full_mv: 8260,
            capacity_mah: 2400,
            min_charging_current_ma: 10,
            full_percent: Self::FULL_PERCENT,
            polarity: CurrentPolarity::ChargingPositive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(BatteryConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_voltage_range() {
        let config = BatteryConfig {
            empty_mv: 8000,
            full_mv: 8000,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyVoltageRange {
                empty_mv: 8000,
                full_mv: 8000
            })
        );

        let config = BatteryConfig {
            empty_mv: 9000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyVoltageRange { .. })
        ));
    }

    #[test]
    fn rejects_zero_shunt() {
        let config = BatteryConfig {
            shunt_milliohms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroShuntResistance));
    }

    #[test]
    fn rejects_negative_capacity_and_bad_threshold() {
        let config = BatteryConfig {
            capacity_mah: -1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeCapacity(-1)));

        let config = BatteryConfig {
            full_percent: 101,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::FullPercentOutOfRange(101))
        );
    }

    #[test]
    fn polarity_orients_current() {
        assert_eq!(CurrentPolarity::ChargingPositive.orient(500), 500);
        assert_eq!(CurrentPolarity::ChargingNegative.orient(500), -500);
        assert_eq!(CurrentPolarity::ChargingNegative.orient(-300), 300);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_from_toml() {
        let config: BatteryConfig = toml::from_str(
            r#"
            capacity_mah = 3000
            full_percent = 97
            polarity = "charging_negative"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            BatteryConfig {
                capacity_mah: 3000,
                full_percent: 97,
                polarity: CurrentPolarity::ChargingNegative,
                ..Default::default()
            }
        );
    }
}
