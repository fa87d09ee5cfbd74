//! Parsers for the plaintext replies printed by the control script.
//!
//! The script answers on stdout with a single line. Line terminators are
//! stripped before parsing, any other whitespace is significant.

use crate::ParseError;

fn strip_line_terminators(output: &str) -> &str {
    output.trim_end_matches(['\r', '\n'])
}

fn float(input: &str) -> Result<f64, ParseError> {
    input.parse::<f64>().map_err(|source| ParseError::Float {
        input: input.to_string(),
        source,
    })
}

fn boolean(input: &str) -> Result<bool, ParseError> {
    match input {
        "True" => Ok(true),
        "False" => Ok(false),
        _ => Err(ParseError::Boolean {
            input: input.to_string(),
        }),
    }
}

/// Parses the reply to `--get-position`: a single float, in rotations.
pub fn position(output: &str) -> Result<f64, ParseError> {
    float(strip_line_terminators(output))
}

/// Parses the reply to `--is-powered`: `"<True|False> <float>"`.
pub fn is_powered(output: &str) -> Result<(bool, f64), ParseError> {
    let line = strip_line_terminators(output);
    let (powered, power) = line.split_once(' ').ok_or_else(|| ParseError::MissingField {
        input: line.to_string(),
    })?;
    Ok((boolean(powered)?, float(power)?))
}

/// Parses the reply to `--is-moving`: `"True"` or `"False"`.
pub fn is_moving(output: &str) -> Result<bool, ParseError> {
    boolean(strip_line_terminators(output))
}

/// Commands that only cause motion are expected to print nothing. Returns the
/// trimmed text if the script printed diagnostics anyway.
pub fn diagnostic(output: &str) -> Option<&str> {
    let text = output.trim();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("12.5\n", 12.5)]
    #[case("12.5", 12.5)]
    #[case("-0.75\r\n", -0.75)]
    #[case("3\n\n", 3.0)]
    fn test_position(#[case] output: &str, #[case] expected: f64) {
        assert_eq!(position(output).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("\n")]
    #[case("abc")]
    #[case("None\n")]
    #[case("12.5 13.0")]
    #[case("AXIS_ERROR_MOTOR_FAILED\n")]
    fn test_position_rejects(#[case] output: &str) {
        assert!(matches!(position(output), Err(ParseError::Float { .. })));
    }

    #[rstest]
    #[case("True 0.5\n", (true, 0.5))]
    #[case("False 0.0", (false, 0.0))]
    #[case("True -0.25\r\n", (true, -0.25))]
    fn test_is_powered(#[case] output: &str, #[case] expected: (bool, f64)) {
        assert_eq!(is_powered(output).unwrap(), expected);
    }

    #[test]
    fn test_is_powered_rejects() {
        assert!(matches!(
            is_powered("Maybe 0.5"),
            Err(ParseError::Boolean { input }) if input == "Maybe"
        ));
        assert!(matches!(
            is_powered("True notanumber"),
            Err(ParseError::Float { input, .. }) if input == "notanumber"
        ));
        assert!(matches!(
            is_powered("True\n"),
            Err(ParseError::MissingField { input }) if input == "True"
        ));
        assert!(matches!(is_powered(""), Err(ParseError::MissingField { .. })));
        assert!(matches!(is_powered("True  0.5"), Err(ParseError::Float { .. })));
    }

    #[rstest]
    #[case("True\n", true)]
    #[case("False", false)]
    #[case("False\r\n", false)]
    fn test_is_moving(#[case] output: &str, #[case] expected: bool) {
        assert_eq!(is_moving(output).unwrap(), expected);
    }

    #[rstest]
    #[case("garbage")]
    #[case("")]
    #[case("true")]
    #[case(" True")]
    fn test_is_moving_rejects(#[case] output: &str) {
        assert!(matches!(is_moving(output), Err(ParseError::Boolean { .. })));
    }

    #[test]
    fn test_diagnostic() {
        assert_eq!(diagnostic(""), None);
        assert_eq!(diagnostic("\n"), None);
        assert_eq!(
            diagnostic("--power must be provided in order to set power\n"),
            Some("--power must be provided in order to set power")
        );
    }
}
