//! Motor attributes, as handed over by the host when the component is built.
//!
//! Hosts deliver attributes as a loosely typed JSON object. [`OdriveConfig::from_attributes`]
//! deserializes that object and validates every field, so a bad attribute is
//! reported by name instead of surfacing later as a confusing script failure.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ConfigError;

const KNOWN_ATTRIBUTES: &[&str] = &[
    "serial_number",
    "max_rpm",
    "odrive_config_file",
    "position_reporting",
    "python",
    "control_script",
    "odrivetool",
];

/// Interpreter used to run the control script unless configured otherwise.
pub const DEFAULT_PYTHON: &str = "python3";
/// Control script path used unless configured otherwise.
pub const DEFAULT_CONTROL_SCRIPT: &str = "OdriveS1.py";
/// Tool used to restore an ODrive configuration file unless configured otherwise.
pub const DEFAULT_ODRIVETOOL: &str = "odrivetool";

#[derive(Debug, Deserialize)]
struct RawConfig {
    serial_number: Option<String>,
    max_rpm: Option<f64>,
    odrive_config_file: Option<String>,
    position_reporting: Option<bool>,
    python: Option<String>,
    control_script: Option<String>,
    odrivetool: Option<String>,
}

/// Validated configuration of an ODrive S1 motor.
#[derive(Debug, Clone, PartialEq)]
pub struct OdriveConfig {
    /// Serial number of the ODrive to control. `None` uses whichever ODrive is connected.
    pub serial_number: Option<String>,
    /// Maximum speed of the motor, used to scale power percentages.
    pub max_rpm: f64,
    /// ODrive configuration file restored once when the motor is built.
    pub odrive_config_file: Option<PathBuf>,
    /// Whether the motor reports its position.
    pub position_reporting: bool,
    /// Interpreter running the control script.
    pub python: String,
    /// Path of the control script.
    pub control_script: PathBuf,
    /// Program used to restore `odrive_config_file`.
    pub odrivetool: String,
}

impl OdriveConfig {
    /// Creates a configuration with the given max rpm and defaults for everything else.
    pub fn new(max_rpm: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            serial_number: None,
            max_rpm: validate_max_rpm(Some(max_rpm))?,
            odrive_config_file: None,
            position_reporting: true,
            python: DEFAULT_PYTHON.to_string(),
            control_script: PathBuf::from(DEFAULT_CONTROL_SCRIPT),
            odrivetool: DEFAULT_ODRIVETOOL.to_string(),
        })
    }

    /// Sets the serial number of the ODrive to control.
    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = non_empty(Some(serial_number.into()));
        self
    }

    /// Sets the ODrive configuration file restored when the motor is built.
    pub fn with_odrive_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.odrive_config_file = Some(path.into());
        self
    }

    /// Sets the interpreter and path of the control script.
    pub fn with_control_script(
        mut self,
        python: impl Into<String>,
        script: impl Into<PathBuf>,
    ) -> Self {
        self.python = python.into();
        self.control_script = script.into();
        self
    }

    /// Builds a configuration from the attribute map of a component.
    ///
    /// Fails with [`ConfigError::MissingField`] if `max_rpm` is absent, and with
    /// [`ConfigError::InvalidField`] or [`ConfigError::Malformed`] if any attribute
    /// has the wrong type or an unusable value.
    pub fn from_attributes(attributes: &Map<String, Value>) -> Result<Self, ConfigError> {
        for key in attributes.keys() {
            if !KNOWN_ATTRIBUTES.contains(&key.as_str()) {
                log::debug!("ignoring unknown odrive attribute `{key}`");
            }
        }
        Self::from_value(Value::Object(attributes.clone()))
    }

    /// Same as [`OdriveConfig::from_attributes`] for an arbitrary JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_value(value)?;
        raw.try_into()
    }
}

impl TryFrom<RawConfig> for OdriveConfig {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let serial_number = non_empty(raw.serial_number);
        if serial_number.is_none() {
            log::warn!(
                "no serial number provided for the odrive, using any odrive that is connected"
            );
        }
        Ok(Self {
            serial_number,
            max_rpm: validate_max_rpm(raw.max_rpm)?,
            odrive_config_file: non_empty(raw.odrive_config_file).map(PathBuf::from),
            position_reporting: raw.position_reporting.unwrap_or(true),
            python: required_text("python", raw.python, DEFAULT_PYTHON)?,
            control_script: PathBuf::from(required_text(
                "control_script",
                raw.control_script,
                DEFAULT_CONTROL_SCRIPT,
            )?),
            odrivetool: required_text("odrivetool", raw.odrivetool, DEFAULT_ODRIVETOOL)?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<String, ConfigError> {
    match value {
        None => Ok(default.to_string()),
        Some(v) if v.trim().is_empty() => Err(ConfigError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        }),
        Some(v) => Ok(v),
    }
}

fn validate_max_rpm(max_rpm: Option<f64>) -> Result<f64, ConfigError> {
    let max_rpm = max_rpm.ok_or(ConfigError::MissingField("max_rpm"))?;
    if !max_rpm.is_finite() || max_rpm <= 0.0 {
        return Err(ConfigError::InvalidField {
            field: "max_rpm",
            reason: format!("must be a positive number, got {max_rpm}"),
        });
    }
    Ok(max_rpm)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn attributes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("attributes must be an object"),
        }
    }

    #[test]
    fn test_minimal_attributes() {
        let config = OdriveConfig::from_attributes(&attributes(json!({ "max_rpm": 600 }))).unwrap();
        assert_eq!(config, OdriveConfig::new(600.0).unwrap());
        assert_eq!(config.serial_number, None);
        assert!(config.position_reporting);
        assert_eq!(config.python, "python3");
        assert_eq!(config.control_script, PathBuf::from("OdriveS1.py"));
    }

    #[test]
    fn test_full_attributes() {
        let config = OdriveConfig::from_attributes(&attributes(json!({
            "serial_number": "3867346B3432",
            "max_rpm": 250.5,
            "odrive_config_file": "/etc/odrive/s1.json",
            "position_reporting": false,
            "python": "/usr/bin/python3.11",
            "control_script": "/opt/odrive/OdriveS1.py",
            "odrivetool": "/usr/local/bin/odrivetool",
            "connection_type": "serial"
        })))
        .unwrap();
        assert_eq!(config.serial_number.as_deref(), Some("3867346B3432"));
        assert_eq!(config.max_rpm, 250.5);
        assert_eq!(
            config.odrive_config_file,
            Some(PathBuf::from("/etc/odrive/s1.json"))
        );
        assert!(!config.position_reporting);
        assert_eq!(config.python, "/usr/bin/python3.11");
        assert_eq!(config.odrivetool, "/usr/local/bin/odrivetool");
    }

    #[test]
    fn test_empty_strings_mean_absent() {
        let config = OdriveConfig::from_attributes(&attributes(json!({
            "serial_number": "",
            "odrive_config_file": "",
            "max_rpm": 100
        })))
        .unwrap();
        assert_eq!(config.serial_number, None);
        assert_eq!(config.odrive_config_file, None);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "serial_number": "3867346B3432" }))]
    #[case(json!({ "serial_number": "3867346B3432", "odrive_config_file": "s1.json" }))]
    #[case(json!({ "max_rpm": null }))]
    fn test_missing_max_rpm(#[case] value: Value) {
        assert!(matches!(
            OdriveConfig::from_attributes(&attributes(value)),
            Err(ConfigError::MissingField("max_rpm"))
        ));
    }

    #[rstest]
    #[case(json!({ "max_rpm": 0 }))]
    #[case(json!({ "max_rpm": -10.0 }))]
    fn test_invalid_max_rpm(#[case] value: Value) {
        assert!(matches!(
            OdriveConfig::from_attributes(&attributes(value)),
            Err(ConfigError::InvalidField { field: "max_rpm", .. })
        ));
    }

    #[rstest]
    #[case(json!({ "max_rpm": "fast" }))]
    #[case(json!({ "max_rpm": 100, "serial_number": 42 }))]
    #[case(json!({ "max_rpm": 100, "position_reporting": "yes" }))]
    fn test_wrong_types(#[case] value: Value) {
        assert!(matches!(
            OdriveConfig::from_attributes(&attributes(value)),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_control_script_is_rejected() {
        let result = OdriveConfig::from_attributes(&attributes(json!({
            "max_rpm": 100,
            "control_script": " "
        })));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidField {
                field: "control_script",
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_max_rpm() {
        assert!(OdriveConfig::new(f64::NAN).is_err());
        assert!(OdriveConfig::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_builder() {
        let config = OdriveConfig::new(300.0)
            .unwrap()
            .with_serial_number("ABC")
            .with_odrive_config_file("s1.json")
            .with_control_script("sh", "fake.sh");
        assert_eq!(config.serial_number.as_deref(), Some("ABC"));
        assert_eq!(config.odrive_config_file, Some(PathBuf::from("s1.json")));
        assert_eq!(config.python, "sh");
        assert_eq!(config.control_script, PathBuf::from("fake.sh"));
    }
}
