use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::channel::ControlChannel;
use crate::config::OdriveConfig;
use crate::protocol::{CommandLine, Request};
use crate::ProcessError;

/// Talks to the ODrive by running the control script once per request.
///
/// Every request spawns `<python> <control_script> <args>` and waits for it to
/// exit. There is no timeout, a hung script hangs the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptChannel {
    python: String,
    control_script: PathBuf,
    odrivetool: String,
}

impl ScriptChannel {
    /// Create a new [`ScriptChannel`] running `control_script` with `python`.
    ///
    /// ```rust
    /// let channel = odrive_s1::ScriptChannel::new("python3", "OdriveS1.py");
    /// ```
    pub fn new(python: impl Into<String>, control_script: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
            control_script: control_script.into(),
            odrivetool: crate::config::DEFAULT_ODRIVETOOL.to_string(),
        }
    }

    /// Create a new [`ScriptChannel`] from the script settings of a motor config.
    pub fn from_config(config: &OdriveConfig) -> Self {
        Self::new(config.python.clone(), config.control_script.clone())
            .with_odrivetool(config.odrivetool.clone())
    }

    /// Sets the program used by [`ControlChannel::restore_config`].
    pub fn with_odrivetool(mut self, odrivetool: impl Into<String>) -> Self {
        self.odrivetool = odrivetool.into();
        self
    }

    fn run(program: &str, command: &mut Command) -> Result<Output, ProcessError> {
        let output = command.output().map_err(|source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(ProcessError::Exit {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl ControlChannel for ScriptChannel {
    fn request(&self, request: &Request) -> Result<String, ProcessError> {
        let line = CommandLine::from(request);
        log::debug!(
            "{} {} {}",
            self.python,
            self.control_script.display(),
            line
        );
        let output = Self::run(
            &self.python,
            Command::new(&self.python)
                .arg(&self.control_script)
                .args(line.args()),
        )?;
        if !output.stderr.is_empty() {
            log::trace!(
                "{} stderr: {}",
                request.command.flag(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8(output.stdout)?)
    }

    fn restore_config(&self, config_file: &Path) -> Result<(), ProcessError> {
        log::debug!(
            "{} restore-config {}",
            self.odrivetool,
            config_file.display()
        );
        Self::run(
            &self.odrivetool,
            Command::new(&self.odrivetool)
                .arg("restore-config")
                .arg(config_file),
        )?;
        Ok(())
    }
}
