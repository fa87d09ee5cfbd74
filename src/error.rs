use thiserror::Error;

/// Errors that can occur when interacting with the ODrive through the control script.
#[derive(Error, Debug)]
pub enum Error {
    /// Config errors occur when the motor attributes are missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Process errors occur when the control script cannot be launched or exits unsuccessfully.
    #[error("process error: {0}")]
    Process(#[from] ProcessError),
    /// Parse errors occur when the control script prints something other than the expected reply.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors that can occur when reading the motor attributes.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required attribute was not provided.
    #[error("must provide `{0}` for motors controlled by an odrive")]
    MissingField(&'static str),
    /// An attribute was provided but its value is unusable.
    #[error("invalid `{field}`: {reason}")]
    InvalidField {
        /// Name of the offending attribute.
        field: &'static str,
        /// Human readable description of the problem.
        reason: String,
    },
    /// The attributes could not be deserialized, e.g. a number was given where a string is expected.
    #[error("malformed attributes: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors that can occur when running the control script.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The program could not be started (missing executable, permissions, ...).
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        /// The program that was being launched.
        program: String,
        /// Underlying io error.
        source: std::io::Error,
    },
    /// The program ran but reported failure.
    #[error("`{program}` exited with {}: {stderr}", exit_status(.code))]
    Exit {
        /// The program that failed.
        program: String,
        /// The exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Whatever the program wrote to stderr, trimmed.
        stderr: String,
    },
    /// The program wrote stdout that is not valid UTF-8.
    #[error("stdout is not valid utf-8: {0}")]
    InvalidOutput(#[from] std::string::FromUtf8Error),
}

/// Errors that can occur when parsing the plaintext replies of the control script.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Returned when a numeric reply does not hold a float literal.
    #[error("expected a float, got {input:?}: {source}")]
    Float {
        /// The reply, with line terminators stripped.
        input: String,
        /// Underlying float parsing error.
        source: std::num::ParseFloatError,
    },
    /// Returned when a boolean token is neither `True` nor `False`.
    #[error("expected `True` or `False`, got {input:?}")]
    Boolean {
        /// The unrecognised token.
        input: String,
    },
    /// Returned when a two-field reply is missing its separator.
    #[error("expected `<True|False> <float>`, got {input:?}")]
    MissingField {
        /// The reply, with line terminators stripped.
        input: String,
    },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}
