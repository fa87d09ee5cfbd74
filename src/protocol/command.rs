use std::fmt;

use itertools::Itertools;

/// The operations understood by the control script.
///
/// Each variant maps to one operation flag plus the numeric parameters the
/// script needs for it. Convert into a [`CommandLine`] to get the arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `--get-position --offset <offset>`
    GetPosition {
        /// The running zero offset, in rotations.
        offset: f64,
    },
    /// `--set-power --max-rpm <max_rpm> --power <power>`
    SetPower {
        /// Upper speed bound used to scale `power`.
        max_rpm: f64,
        /// Power fraction, between -1 and 1.
        power: f64,
    },
    /// `--go-for --rpm <rpm> --revolutions <revolutions> --offset <offset>`
    GoFor {
        /// Speed, negative values reverse the direction.
        rpm: f64,
        /// Revolutions relative to the current position. `0` spins indefinitely.
        revolutions: f64,
        /// The running zero offset, in rotations.
        offset: f64,
    },
    /// `--go-to --rpm <rpm> --revolutions <position> --offset <offset>`
    ///
    /// The script reuses the revolutions flag for the absolute target.
    GoTo {
        /// Speed in rotations per minute.
        rpm: f64,
        /// Target position in rotations, relative to the logical zero.
        position: f64,
        /// The running zero offset, in rotations.
        offset: f64,
    },
    /// `--stop`
    Stop,
    /// `--is-powered --max-rpm <max_rpm>`
    IsPowered {
        /// Upper speed bound, used by the script to report power as a fraction.
        max_rpm: f64,
    },
    /// `--is-moving`
    IsMoving,
}

impl Command {
    /// The operation flag selecting this command.
    pub fn flag(&self) -> &'static str {
        match self {
            Command::GetPosition { .. } => "--get-position",
            Command::SetPower { .. } => "--set-power",
            Command::GoFor { .. } => "--go-for",
            Command::GoTo { .. } => "--go-to",
            Command::Stop => "--stop",
            Command::IsPowered { .. } => "--is-powered",
            Command::IsMoving => "--is-moving",
        }
    }
}

/// Ordered list of arguments passed to the control script.
///
/// Numbers are written with six decimal places, which is what the script has
/// always been fed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandLine {
    args: Vec<String>,
}

impl CommandLine {
    /// Creates an empty command line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bare flag, e.g. `--stop`.
    pub fn flag(&mut self, name: &str) -> &mut Self {
        self.args.push(name.to_string());
        self
    }

    /// Appends a flag followed by a numeric value.
    pub fn value(&mut self, name: &str, value: f64) -> &mut Self {
        self.args.push(name.to_string());
        self.args.push(format!("{value:.6}"));
        self
    }

    /// Appends a flag followed by a text value.
    pub fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.args.push(name.to_string());
        self.args.push(value.to_string());
        self
    }

    /// Appends every argument of `other`.
    pub fn extend(&mut self, other: CommandLine) -> &mut Self {
        self.args.extend(other.args);
        self
    }

    /// The arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns true if `name` appears in the arguments.
    pub fn contains(&self, name: &str) -> bool {
        self.args.iter().any(|a| a == name)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.iter().join(" "))
    }
}

impl From<&Command> for CommandLine {
    fn from(command: &Command) -> CommandLine {
        let mut line = CommandLine::new();
        line.flag(command.flag());
        match *command {
            Command::GetPosition { offset } => {
                line.value("--offset", offset);
            }
            Command::SetPower { max_rpm, power } => {
                line.value("--max-rpm", max_rpm).value("--power", power);
            }
            Command::GoFor {
                rpm,
                revolutions,
                offset,
            } => {
                line.value("--rpm", rpm)
                    .value("--revolutions", revolutions)
                    .value("--offset", offset);
            }
            Command::GoTo {
                rpm,
                position,
                offset,
            } => {
                line.value("--rpm", rpm)
                    .value("--revolutions", position)
                    .value("--offset", offset);
            }
            Command::Stop | Command::IsMoving => {}
            Command::IsPowered { max_rpm } => {
                line.value("--max-rpm", max_rpm);
            }
        }
        line
    }
}

impl From<Command> for CommandLine {
    fn from(command: Command) -> CommandLine {
        CommandLine::from(&command)
    }
}

/// A [`Command`] addressed to a particular ODrive.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Serial number of the target ODrive. `None` lets the script pick any connected ODrive.
    pub serial_number: Option<String>,
    /// What to do.
    pub command: Command,
}

impl Request {
    /// Creates a request for the given ODrive.
    pub fn new(serial_number: Option<&str>, command: Command) -> Self {
        Self {
            serial_number: serial_number.map(str::to_string),
            command,
        }
    }
}

impl From<&Request> for CommandLine {
    fn from(request: &Request) -> CommandLine {
        let mut line = CommandLine::new();
        if let Some(serial_number) = &request.serial_number {
            line.text("--serial-number", serial_number);
        }
        line.extend((&request.command).into());
        line
    }
}
