//! A trait for sending commands to whatever actually talks to the ODrive.

mod script;

use std::path::Path;
use std::sync::Arc;

#[cfg(test)]
pub(crate) use mock::MockControlChannel;
pub use script::ScriptChannel;

use crate::protocol::Request;
use crate::ProcessError;

/// Runs [`Request`]s against an ODrive and hands back the raw reply.
///
/// [`ScriptChannel`] shells out to the control script. Tests substitute an
/// in-process implementation.
pub trait ControlChannel: Send + Sync {
    /// Runs `request`, blocking until it completes, and returns everything
    /// printed on stdout.
    fn request(&self, request: &Request) -> Result<String, ProcessError>;

    /// Restores an ODrive configuration file onto the connected controller.
    fn restore_config(&self, config_file: &Path) -> Result<(), ProcessError>;
}

impl<C: ControlChannel + ?Sized> ControlChannel for Arc<C> {
    fn request(&self, request: &Request) -> Result<String, ProcessError> {
        (**self).request(request)
    }

    fn restore_config(&self, config_file: &Path) -> Result<(), ProcessError> {
        (**self).restore_config(config_file)
    }
}

#[cfg(test)]
#[allow(dead_code, missing_docs, unused_qualifications)]
mod mock {
    use super::*;

    mockall::mock! {
        pub ControlChannel {}

        impl ControlChannel for ControlChannel {
            fn request(&self, request: &Request) -> Result<String, ProcessError>;
            fn restore_config(&self, config_file: &Path) -> Result<(), ProcessError>;
        }
    }
}
