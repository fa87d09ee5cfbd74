//! The motor capability exposed to the host.
//!
//! Hosts only ever talk to [`Motor`], so the ODrive driver can be swapped for
//! any other motor without touching the code that commands it. Every method
//! blocks until the motor has acknowledged the command.

use crate::Error;

/// Optional features a motor may support.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Properties {
    /// The motor can report its position through [`Motor::position`].
    pub position_reporting: bool,
}

/// A motor as seen by the host: power, relative and absolute moves, position and status.
pub trait Motor: Send + Sync {
    /// Current position in rotations, relative to the logical zero.
    fn position(&self) -> Result<f64, Error>;

    /// Which optional features this motor supports.
    fn properties(&self) -> Properties;

    /// Spin at a fraction of full power, between -1 and 1.
    fn set_power(&self, power_pct: f64) -> Result<(), Error>;

    /// Turn `revolutions` at `rpm`, relative to the current position.
    /// Negative `rpm` reverses the direction, `revolutions == 0` spins indefinitely.
    fn go_for(&self, rpm: f64, revolutions: f64) -> Result<(), Error>;

    /// Move to the absolute `position` (in rotations) at `rpm`.
    fn go_to(&self, rpm: f64, position: f64) -> Result<(), Error>;

    /// Make the current position the logical zero.
    fn reset_zero_position(&self) -> Result<(), Error>;

    /// Cut power to the motor.
    fn stop(&self) -> Result<(), Error>;

    /// Whether the motor is powered, and at which fraction of full power.
    fn is_powered(&self) -> Result<(bool, f64), Error>;

    /// Whether the motor is moving.
    fn is_moving(&self) -> Result<bool, Error>;
}
