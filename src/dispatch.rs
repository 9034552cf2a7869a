use std::env;
use std::rc::Rc;
use std::time::Duration;

use hcitool_builder::{BuildError, UnknownOptions};
use thiserror::Error;
use tracing::{debug, warn};

use crate::command::{Command, CommandKind, Context};
use crate::controller::HostController;
use crate::hci::ErrorCode;
use crate::interface::{ConsoleInterface, UserInterface};

/// How long operations awaiting a completion event wait, unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// The configuration of a [`Dispatcher`].
///
/// ### Example
/// ```
/// # use std::time::Duration;
/// # use hcitool::{Settings, UnknownOptions};
/// let settings = Settings::new("hcitool")
///     .timeout(Duration::from_secs(10))
///     .unknown_options(UnknownOptions::Reject);
/// assert_eq!(settings.get_timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    program: String,
    timeout: Duration,
    unknown_options: UnknownOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new("hcitool")
    }
}

impl Settings {
    /// Create the default settings for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
            unknown_options: UnknownOptions::default(),
        }
    }

    /// Set how long operations awaiting a completion event wait.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the treatment of options the command does not declare.
    pub fn unknown_options(mut self, unknown_options: UnknownOptions) -> Self {
        self.unknown_options = unknown_options;
        self
    }

    /// The program name, used to prefix error messages.
    pub fn get_program(&self) -> &str {
        &self.program
    }

    /// The configured completion timeout.
    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured treatment of undeclared options.
    pub fn get_unknown_options(&self) -> UnknownOptions {
        self.unknown_options
    }
}

/// The failure to execute a (successfully built) command.
#[derive(Debug, Error)]
pub enum ExecuteError<E: std::error::Error + 'static> {
    /// The controller could not complete the operation.
    #[error("Controller error: {0}")]
    ControllerOperationFailed(#[source] E),
    /// The controller completed the operation, reporting an error status.
    #[error("{operation} Error: {status}")]
    ControllerStatusError {
        /// The failed operation.
        operation: &'static str,
        /// The reported status.
        status: ErrorCode,
    },
}

/// Builds commands from arguments and executes them against a controller.
///
/// ### Example
/// ```no_run
/// # use hcitool::{Dispatcher, HostController, Settings};
/// fn main_with<C: HostController>(mut controller: C) {
///     Dispatcher::new(Settings::default()).run(&mut controller);
/// }
/// ```
pub struct Dispatcher {
    settings: Settings,
    user_interface: Rc<dyn UserInterface>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher writing to the console.
    pub fn new(settings: Settings) -> Self {
        Self::with_interface(settings, Rc::new(ConsoleInterface::default()))
    }

    /// Create a dispatcher writing to `user_interface`.
    pub fn with_interface(settings: Settings, user_interface: Rc<dyn UserInterface>) -> Self {
        Self {
            settings,
            user_interface,
        }
    }

    /// The settings of this dispatcher.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the command named by the first argument.
    pub fn build(&self, arguments: &[&str]) -> Result<Command, BuildError> {
        Command::from_arguments_with(arguments, self.settings.unknown_options)
    }

    /// Execute `command`, invoking exactly the controller operation(s) it names.
    pub fn execute<C: HostController>(
        &self,
        command: &Command,
        controller: &mut C,
    ) -> Result<(), ExecuteError<C::Error>> {
        let context = Context {
            timeout: self.settings.timeout,
            user_interface: self.user_interface.as_ref(),
        };
        debug!("Executing '{}'.", command.command_type());

        match command {
            Command::LowEnergyScan(command) => command.execute(controller, &context),
            Command::LowEnergySetRandomAddress(command) => command.execute(controller, &context),
            Command::LowEnergyClearWhiteList(command) => command.execute(controller, &context),
            Command::LowEnergyAddDeviceToWhiteList(command) => {
                command.execute(controller, &context)
            }
            Command::LowEnergyRemoveDeviceFromWhiteList(command) => {
                command.execute(controller, &context)
            }
            Command::LowEnergyCreateConnectionCancel(command) => {
                command.execute(controller, &context)
            }
            Command::LowEnergyReadLocalSupportedFeatures(command) => {
                command.execute(controller, &context)
            }
            Command::LowEnergyReadBufferSize(command) => command.execute(controller, &context),
            Command::LowEnergySetEventMask(command) => command.execute(controller, &context),
            Command::LowEnergyCreateConnection(command) => command.execute(controller, &context),
            Command::ReadRemoteExtendedFeatures(command) => command.execute(controller, &context),
            Command::Disconnect(command) => command.execute(controller, &context),
            Command::Inquiry(command) => command.execute(controller, &context),
            Command::ReadLocalName(command) => command.execute(controller, &context),
            Command::WriteLocalName(command) => command.execute(controller, &context),
            Command::ReadDeviceAddress(command) => command.execute(controller, &context),
            Command::ReadLocalVersionInformation(command) => {
                command.execute(controller, &context)
            }
        }
    }

    /// Build and execute the command in `arguments`, rendering any failure.
    ///
    /// Returns the exit code on failure: `1` for both build and execution failures.
    pub fn dispatch<C: HostController>(
        &self,
        arguments: &[&str],
        controller: &mut C,
    ) -> Result<(), i32> {
        let command = match self.build(arguments) {
            Ok(command) => command,
            Err(error) => {
                debug!("Rejected the arguments {arguments:?}: {error:?}.");
                self.user_interface.print_error(format!(
                    "{program}: Parse error: {error}",
                    program = self.settings.program
                ));
                return Err(1);
            }
        };

        match self.execute(&command, controller) {
            Ok(()) => Ok(()),
            Err(error) => {
                warn!("Failed to execute '{}': {error:?}.", command.command_type());
                self.user_interface.print_error(format!(
                    "{program}: {error}",
                    program = self.settings.program
                ));
                Err(1)
            }
        }
    }

    /// Dispatch the process arguments, exiting the process on failure.
    pub fn run<C: HostController>(&self, controller: &mut C) {
        let arguments: Vec<String> = env::args().skip(1).collect();

        match self.dispatch(
            arguments
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
            controller,
        ) {
            Ok(()) => {}
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        };
    }
}
