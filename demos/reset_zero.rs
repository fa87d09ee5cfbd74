//! Makes the current position the logical zero, then moves one rotation
//! forward and back to zero.
//!
//! ```text
//! cargo run --example reset_zero -- '{"max_rpm": 120, "serial_number": "3867346B3432"}'
//! ```
#[path = "_logging.rs"]
mod logging;

use odrive_s1::{ConfigError, Motor, OdriveS1};

fn main() -> Result<(), odrive_s1::Error> {
    logging::init("odrive_s1", 1);

    let attributes = std::env::args()
        .nth(1)
        .unwrap_or_else(|| r#"{"max_rpm": 120}"#.to_string());
    let attributes: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&attributes).map_err(ConfigError::from)?;
    let motor = OdriveS1::from_attributes("odriveS1", &attributes)?;

    motor.reset_zero_position()?;
    log::info!("offset: {}", motor.offset());

    motor.go_to(60.0, 1.0)?;
    std::thread::sleep(std::time::Duration::from_secs(2));
    log::info!("position: {}", motor.position()?);

    motor.go_to(60.0, 0.0)?;
    std::thread::sleep(std::time::Duration::from_secs(2));
    log::info!("position: {}", motor.position()?);
    motor.stop()
}
