//! The command line protocol spoken with the control script.
//!
//! Requests go out as `--flag value` arguments (see [`CommandLine`]), replies
//! come back as a single plaintext line on stdout (see [`response`]).

mod command;
pub mod response;

pub use command::{Command, CommandLine, Request};
