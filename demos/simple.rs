//! Based on the status script that came with the ODrive S1 module.
//!
//! Reads the position and status of an ODrive S1, spins it at half power for
//! five seconds and stops it again.
//!
//! ```text
//! cargo run --example simple -- [serial number] [-v]
//! ```
#[path = "_logging.rs"]
mod logging;

use odrive_s1::{Motor, OdriveConfig, OdriveS1, ScriptChannel};

fn main() -> Result<(), odrive_s1::Error> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbosity = args.iter().filter(|a| a.as_str() == "-v").count() as i8;
    logging::init("odrive_s1", verbosity);

    let mut config = OdriveConfig::new(600.0)?;
    // Without a serial number the control script picks any connected ODrive.
    if let Some(serial_number) = args.iter().find(|a| !a.starts_with('-')) {
        config = config.with_serial_number(serial_number.as_str());
    }
    let channel = ScriptChannel::from_config(&config);
    let motor = OdriveS1::new("odriveS1", config, channel);

    log::info!("position: {}", motor.position()?);
    log::info!("is_powered: {:?}", motor.is_powered()?);
    log::info!("is_moving: {}", motor.is_moving()?);

    motor.set_power(0.5)?;
    std::thread::sleep(std::time::Duration::from_secs(5));
    motor.stop()?;
    Ok(())
}
