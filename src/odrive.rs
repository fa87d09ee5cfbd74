use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};

use crate::channel::{ControlChannel, ScriptChannel};
use crate::config::OdriveConfig;
use crate::motor::{Motor, Properties};
use crate::protocol::{response, Command, Request};
use crate::{Error, ParseError};

/// An ODrive S1 exposed as a [`Motor`].
///
/// Every method is one blocking round trip through the [`ControlChannel`].
/// The only state kept here is the zero offset, which is sent along with every
/// position related command so the control script can report and target
/// positions relative to the logical zero.
pub struct OdriveS1<C = ScriptChannel>
where
    C: ControlChannel,
{
    name: String,
    channel: C,
    serial_number: Option<String>,
    max_rpm: f64,
    position_reporting: bool,
    odrive_config_file: Option<PathBuf>,
    // difference between the user's zero (see `reset_zero_position`) and the encoder's zero
    offset: Mutex<f64>,
}

impl OdriveS1<ScriptChannel> {
    /// Create a new [`OdriveS1`] from the attributes the host configured the
    /// component with, talking to the ODrive through the control script.
    ///
    /// ```rust
    /// # fn main() -> Result<(), odrive_s1::Error> {
    /// let attributes = serde_json::json!({ "max_rpm": 600, "serial_number": "3867346B3432" });
    /// let motor = odrive_s1::OdriveS1::from_attributes(
    ///     "wheel",
    ///     attributes.as_object().expect("attributes are an object"),
    /// )?;
    /// assert_eq!(motor.offset(), 0.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_attributes(
        name: impl Into<String>,
        attributes: &Map<String, Value>,
    ) -> Result<Self, Error> {
        let config = OdriveConfig::from_attributes(attributes)?;
        let channel = ScriptChannel::from_config(&config);
        Ok(Self::new(name, config, channel))
    }

    /// Applies new attributes, including the control script settings.
    pub fn reconfigure_from_attributes(
        &mut self,
        attributes: &Map<String, Value>,
    ) -> Result<(), Error> {
        let config = OdriveConfig::from_attributes(attributes)?;
        self.channel = ScriptChannel::from_config(&config);
        self.reconfigure(config);
        Ok(())
    }
}

impl<C> OdriveS1<C>
where
    C: ControlChannel,
{
    /// Create a new [`OdriveS1`] talking to the ODrive through `channel`.
    ///
    /// If the config names an `odrive_config_file` it is restored onto the
    /// ODrive first. That restore is best effort: a failure is logged and the
    /// motor is still returned.
    pub fn new(name: impl Into<String>, config: OdriveConfig, channel: C) -> Self {
        let odrive = Self {
            name: name.into(),
            channel,
            serial_number: config.serial_number,
            max_rpm: config.max_rpm,
            position_reporting: config.position_reporting,
            odrive_config_file: config.odrive_config_file,
            offset: Mutex::new(0.0),
        };
        odrive.restore_config();
        odrive
    }

    /// Applies a new configuration.
    ///
    /// The zero offset is kept. The ODrive configuration file is only restored
    /// again when it changed.
    pub fn reconfigure(&mut self, config: OdriveConfig) {
        let restore = config.odrive_config_file.is_some()
            && config.odrive_config_file != self.odrive_config_file;
        self.serial_number = config.serial_number;
        self.max_rpm = config.max_rpm;
        self.position_reporting = config.position_reporting;
        self.odrive_config_file = config.odrive_config_file;
        if restore {
            log::info!("{}: updating odrive configuration", self.name);
            self.restore_config();
        }
    }

    /// The name the host gave this component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The serial number of the ODrive being controlled, if one was configured.
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// The configured maximum speed.
    pub fn max_rpm(&self) -> f64 {
        self.max_rpm
    }

    /// The accumulated zero offset, in rotations.
    pub fn offset(&self) -> f64 {
        *self.lock_offset()
    }

    fn lock_offset(&self) -> MutexGuard<'_, f64> {
        // a plain f64 cannot be left half written, so a poisoned lock is still usable
        self.offset.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn restore_config(&self) {
        let Some(config_file) = &self.odrive_config_file else {
            return;
        };
        if let Err(e) = self.channel.restore_config(config_file) {
            log::warn!(
                "{}: could not restore odrive configuration from {}: {e}",
                self.name,
                config_file.display()
            );
        }
    }

    fn request(&self, command: Command) -> Result<String, Error> {
        let request = Request::new(self.serial_number.as_deref(), command);
        Ok(self.channel.request(&request)?)
    }

    /// Sends a command that only causes motion. Anything printed is a diagnostic.
    fn send(&self, command: Command) -> Result<(), Error> {
        let flag = command.flag();
        let output = self.request(command)?;
        if let Some(text) = response::diagnostic(&output) {
            log::warn!("{}: {flag} printed: {text}", self.name);
        }
        Ok(())
    }

    fn position_with_offset(&self, offset: f64) -> Result<f64, Error> {
        let output = self.request(Command::GetPosition { offset })?;
        response::position(&output).map_err(|e| self.unexpected(e))
    }

    fn unexpected(&self, e: ParseError) -> Error {
        log::error!("{}: unexpected reply: {e}", self.name);
        e.into()
    }
}

impl<C> Motor for OdriveS1<C>
where
    C: ControlChannel,
{
    fn position(&self) -> Result<f64, Error> {
        let offset = self.offset();
        self.position_with_offset(offset)
    }

    fn properties(&self) -> Properties {
        Properties {
            position_reporting: self.position_reporting,
        }
    }

    fn set_power(&self, power_pct: f64) -> Result<(), Error> {
        self.send(Command::SetPower {
            max_rpm: self.max_rpm,
            power: power_pct,
        })
    }

    fn go_for(&self, rpm: f64, revolutions: f64) -> Result<(), Error> {
        self.send(Command::GoFor {
            rpm,
            revolutions,
            offset: self.offset(),
        })
    }

    fn go_to(&self, rpm: f64, position: f64) -> Result<(), Error> {
        self.send(Command::GoTo {
            rpm,
            position,
            offset: self.offset(),
        })
    }

    fn reset_zero_position(&self) -> Result<(), Error> {
        // held across the round trip so concurrent resets cannot lose an update
        let mut offset = self.lock_offset();
        let position = self.position_with_offset(*offset)?;
        *offset += position;
        log::debug!("{}: zero offset is now {}", self.name, *offset);
        Ok(())
    }

    fn stop(&self) -> Result<(), Error> {
        self.send(Command::Stop)
    }

    fn is_powered(&self) -> Result<(bool, f64), Error> {
        let output = self.request(Command::IsPowered {
            max_rpm: self.max_rpm,
        })?;
        response::is_powered(&output).map_err(|e| self.unexpected(e))
    }

    fn is_moving(&self) -> Result<bool, Error> {
        let output = self.request(Command::IsMoving)?;
        response::is_moving(&output).map_err(|e| self.unexpected(e))
    }
}
