use ina219_battery::address::Address;
use ina219_battery::bus::LinuxBus;
use ina219_battery::config::BatteryConfig;
use ina219_battery::{ChargeStatus, SyncBatteryMonitor};
use std::process::ExitCode;

// The address pins select 0x40-0x4F
const I2C_ADDR: u8 = 0x42;

// On a Raspberry Pi the I2C bus on the GPIO header is bus 1, not 0
const I2C_DEV: &str = "/dev/i2c-1";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let program = std::env::args().next().unwrap_or_else(|| "battery-status".into());

    // Two 18650 cells in series, measured across a 0.1Ω shunt
    let config = BatteryConfig::default();

    let address = match Address::from_byte(I2C_ADDR) {
        Ok(address) => address,
        Err(e) => {
            eprintln!("Can't set up INA219: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut monitor = match SyncBatteryMonitor::new(LinuxBus::new(I2C_DEV), address, config) {
        Ok(monitor) => monitor,
        Err(e) => {
            eprintln!("Can't set up INA219: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut session = match monitor.session() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Can't set up INA219: {e}");
            return ExitCode::FAILURE;
        }
    };

    let status = match session.status() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("{program}: {e}");
            return ExitCode::FAILURE;
        }
    };

    match status.charge {
        ChargeStatus::FullyCharged => println!("Fully charged"),
        ChargeStatus::Charging => println!(
            "Charging, {} minutes until fully charged",
            status.minutes_remaining
        ),
        ChargeStatus::Discharging => {
            println!("Discharging, {} minutes left", status.minutes_remaining);
        }
    }
    println!(
        "Battery voltage: {:.2} V",
        f64::from(status.voltage_mv) / 1000.0
    );
    println!("Battery current: {} mA", status.current_ma);
    println!("Battery charge: {} %", status.percent_charged);

    ExitCode::SUCCESS
}
