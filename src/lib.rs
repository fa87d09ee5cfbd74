//! A rust motor driver for the [ODrive S1](https://odriverobotics.com/shop/odrive-s1), driven through an external control script.
//!
//! The control script does the actual talking to the ODrive. This crate turns motor commands
//! (power, go for, go to, stop, ...) into invocations of that script and parses what it prints
//! back into typed values. See [`OdriveS1`] and the [`Motor`] trait.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true
)]
#![deny(
// missing_debug_implementations,
missing_docs,
trivial_casts,
trivial_numeric_casts,
unused_extern_crates,
unused_import_braces,
unused_qualifications,
// unused_results
)]
#![warn(clippy::unwrap_used)]

pub mod channel;
pub mod config;
mod error;
mod motor;
mod odrive;
pub mod protocol;

pub use channel::{ControlChannel, ScriptChannel};
pub use config::OdriveConfig;
pub use error::*;
pub use motor::{Motor, Properties};
pub use odrive::OdriveS1;
