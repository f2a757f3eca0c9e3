//! Battery charge status derived from the bus and shunt voltages
//!
//! There is no way to measure the charge of most batteries except by their voltage, so the charge
//! level is a linear interpolation between the configured empty and full voltages. The time
//! estimates assume a constant current, which real chargers do not deliver. Expect the time to
//! full charge to grow as a charger throttles near the top of the range.

use crate::config::BatteryConfig;

/// Whether the battery is being charged or discharged
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChargeStatus {
    /// At or above the fully charged threshold, or the charging current is too small to count
    FullyCharged,
    /// Current flows into the battery
    Charging,
    /// Current flows out of the battery
    Discharging,
}

/// Everything known about the battery after one pair of register reads
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BatteryStatus {
    pub charge: ChargeStatus,
    /// Bus voltage, which is taken to be the battery voltage
    pub voltage_mv: u16,
    /// Charge level in `0..=100`
    pub percent_charged: u8,
    /// Battery current, positive while charging
    pub current_ma: i32,
    /// Minutes until fully charged or fully discharged depending on `charge`, 0 when fully charged
    pub minutes_remaining: u32,
}

/// Interpolate the charge level between `empty_mv` and `full_mv`, clamped to `0..=100`
///
/// Expects `full_mv > empty_mv`, see [`BatteryConfig::validate`].
#[must_use]
pub fn percent_charged(voltage_mv: i32, empty_mv: i32, full_mv: i32) -> u8 {
    let percent = 100 * (i64::from(voltage_mv) - i64::from(empty_mv))
        / (i64::from(full_mv) - i64::from(empty_mv));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = percent.clamp(0, 100) as u8;
    clamped
}

/// Current through a shunt of `shunt_milliohms` with `shunt_mv` across it
///
/// The sign follows the shunt voltage. Expects `shunt_milliohms > 0`.
#[must_use]
pub fn current_ma(shunt_mv: i16, shunt_milliohms: u32) -> i32 {
    let current = i64::from(shunt_mv) * 1000 / i64::from(shunt_milliohms);

    // |shunt_mv| * 1000 always fits
    #[allow(clippy::cast_possible_truncation)]
    let current = current as i32;
    current
}

/// Classify the charge status from the charge level and the oriented battery current
///
/// A charging current below `min_charging_current_ma` is noise, the battery is then taken to be
/// full. Discharge currents are never masked this way.
#[must_use]
pub const fn classify(
    percent_charged: u8,
    current_ma: i32,
    full_percent: u8,
    min_charging_current_ma: i32,
) -> ChargeStatus {
    let trickle = current_ma >= 0 && current_ma < min_charging_current_ma;
    if percent_charged >= full_percent || trickle {
        ChargeStatus::FullyCharged
    } else if current_ma > 0 {
        ChargeStatus::Charging
    } else {
        ChargeStatus::Discharging
    }
}

/// Estimate the minutes until the battery is full (current `>= 0`) or empty (current `< 0`)
///
/// Returns 0 when fully charged, and when no current flows since no estimate is possible then.
#[must_use]
pub fn minutes_remaining(
    charge: ChargeStatus,
    percent_charged: u8,
    current_ma: i32,
    capacity_mah: i32,
) -> u32 {
    if charge == ChargeStatus::FullyCharged {
        return 0;
    }
    if current_ma == 0 {
        log::warn!("no current flowing while {charge:?}, can't estimate remaining time");
        return 0;
    }

    let percent = i64::from(percent_charged);
    let capacity = i64::from(capacity_mah);
    let remaining_mah = if current_ma >= 0 {
        (100 - percent) * capacity / 100
    } else {
        percent * capacity / 100
    };

    // Only this division is done in floating point, the rest truncates like integer math
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let seconds =
        ((3600 * remaining_mah) as f64 / f64::from(current_ma.unsigned_abs())) as i64;

    u32::try_from(seconds / 60).unwrap_or(u32::MAX)
}

impl BatteryConfig {
    /// Derive the full battery status from a bus voltage and a shunt voltage in mV
    ///
    /// Expects a configuration that passed [`BatteryConfig::validate`].
    #[must_use]
    pub fn estimate(&self, voltage_mv: u16, shunt_mv: i16) -> BatteryStatus {
        let percent_charged = percent_charged(i32::from(voltage_mv), self.empty_mv, self.full_mv);
        let current_ma = self
            .polarity
            .orient(current_ma(shunt_mv, self.shunt_milliohms));
        let charge = classify(
            percent_charged,
            current_ma,
            self.full_percent,
            self.min_charging_current_ma,
        );

        BatteryStatus {
            charge,
            voltage_mv,
            percent_charged,
            current_ma,
            minutes_remaining: minutes_remaining(
                charge,
                percent_charged,
                current_ma,
                self.capacity_mah,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurrentPolarity;

    #[test]
    fn percent_is_clamped() {
        assert_eq!(percent_charged(7130, 6000, 8260), 50);
        assert_eq!(percent_charged(6000, 6000, 8260), 0);
        assert_eq!(percent_charged(8260, 6000, 8260), 100);
        assert_eq!(percent_charged(5000, 6000, 8260), 0);
        assert_eq!(percent_charged(0, 6000, 8260), 0);
        assert_eq!(percent_charged(8300, 6000, 8260), 100);
        assert_eq!(percent_charged(32_764, 6000, 8260), 100);
        // Truncates
        assert_eq!(percent_charged(6022, 6000, 8260), 0);
        assert_eq!(percent_charged(6023, 6000, 8260), 1);
    }

    #[test]
    fn current_follows_shunt_sign() {
        assert_eq!(current_ma(50, 100), 500);
        assert_eq!(current_ma(-30, 100), -300);
        assert_eq!(current_ma(1, 3), 333);
        assert_eq!(current_ma(-1, 3), -333);
        assert_eq!(current_ma(0, 100), 0);
    }

    #[test]
    fn classification_boundaries() {
        // At the full threshold the current does not matter
        for current in [-1000, -1, 0, 5, 500] {
            assert_eq!(classify(99, current, 99, 10), ChargeStatus::FullyCharged);
        }
        assert_eq!(classify(98, 9, 99, 10), ChargeStatus::FullyCharged);
        assert_eq!(classify(98, 0, 99, 10), ChargeStatus::FullyCharged);
        assert_eq!(classify(98, 10, 99, 10), ChargeStatus::Charging);
        assert_eq!(classify(50, 500, 99, 10), ChargeStatus::Charging);
        assert_eq!(classify(50, -1, 99, 10), ChargeStatus::Discharging);
        assert_eq!(classify(50, -300, 99, 10), ChargeStatus::Discharging);
        // Without a noise threshold zero current counts as discharging
        assert_eq!(classify(50, 0, 99, 0), ChargeStatus::Discharging);
    }

    #[test]
    fn charge_and_discharge_times_are_symmetric() {
        for percent in [0, 1, 25, 50, 73, 98] {
            for current in [1, 7, 300, 2500] {
                let to_full = minutes_remaining(ChargeStatus::Charging, percent, current, 2400);
                let to_empty =
                    minutes_remaining(ChargeStatus::Discharging, 100 - percent, -current, 2400);
                assert_eq!(to_full, to_empty, "percent {percent}, current {current}");
            }
        }
    }

    #[test]
    fn time_estimate_uses_float_division() {
        // 3600 * 1200 / 7 = 617142.86s, truncated to seconds then to minutes
        assert_eq!(
            minutes_remaining(ChargeStatus::Charging, 50, 7, 2400),
            617_142 / 60
        );
        assert_eq!(minutes_remaining(ChargeStatus::FullyCharged, 10, 500, 2400), 0);
    }

    #[test]
    fn zero_current_has_no_estimate() {
        assert_eq!(minutes_remaining(ChargeStatus::Discharging, 50, 0, 2400), 0);
    }

    #[test]
    fn charging_scenario() {
        let status = BatteryConfig::default().estimate(7130, 50);
        assert_eq!(
            status,
            BatteryStatus {
                charge: ChargeStatus::Charging,
                voltage_mv: 7130,
                percent_charged: 50,
                current_ma: 500,
                minutes_remaining: 144,
            }
        );
    }

    #[test]
    fn discharging_scenario() {
        let status = BatteryConfig::default().estimate(7130, -30);
        assert_eq!(status.charge, ChargeStatus::Discharging);
        assert_eq!(status.current_ma, -300);
        assert_eq!(status.percent_charged, 50);
        assert_eq!(status.minutes_remaining, 240);
    }

    #[test]
    fn overvoltage_is_fully_charged() {
        for shunt_mv in [-30, 0, 50] {
            let status = BatteryConfig::default().estimate(8300, shunt_mv);
            assert_eq!(status.percent_charged, 100);
            assert_eq!(status.charge, ChargeStatus::FullyCharged);
            assert_eq!(status.minutes_remaining, 0);
        }
    }

    #[test]
    fn inverted_polarity() {
        let config = BatteryConfig {
            polarity: CurrentPolarity::ChargingNegative,
            ..Default::default()
        };
        let status = config.estimate(7130, -50);
        assert_eq!(status.charge, ChargeStatus::Charging);
        assert_eq!(status.current_ma, 500);
        assert_eq!(status.minutes_remaining, 144);
    }

    #[test]
    fn configurable_full_threshold() {
        let config = BatteryConfig {
            full_percent: 50,
            ..Default::default()
        };
        assert_eq!(config.estimate(7130, 50).charge, ChargeStatus::FullyCharged);
        assert_eq!(config.estimate(7000, 50).charge, ChargeStatus::Charging);
    }
}
