//! Commands of the controller & baseband group (OGF 0x03).
use hcitool_builder::{BuildError, Field, OptionDescriptor, Parameters, Scalar};

use crate::command::{Command, CommandKind, CommandType, Context};
use crate::controller::HostController;
use crate::dispatch::ExecuteError;

/// The longest local name the controller stores, in bytes (UTF-8).
pub const MAX_LOCAL_NAME_LENGTH: usize = 248;

#[allow(clippy::ptr_arg)]
fn fits_local_name(name: &String) -> bool {
    name.len() <= MAX_LOCAL_NAME_LENGTH
}

/// Read the controller's user friendly name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLocalName;

impl CommandKind for ReadLocalName {
    const TYPE: CommandType = CommandType::ReadLocalName;
    const NAME: &'static str = "readlocalname";
    const OPTIONS: &'static [OptionDescriptor] = &[];

    fn build(_parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self)
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let name = controller
            .read_local_name()
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print(name);
        Ok(())
    }
}

/// Change the controller's user friendly name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteLocalName {
    /// The new name, at most [`MAX_LOCAL_NAME_LENGTH`] bytes.
    pub name: String,
}

impl WriteLocalName {
    const LOCAL_NAME: Scalar<String> = Scalar::new("name").check(fits_local_name);
}

impl CommandKind for WriteLocalName {
    const TYPE: CommandType = CommandType::WriteLocalName;
    const NAME: &'static str = "writelocalname";
    const OPTIONS: &'static [OptionDescriptor] = &[Self::LOCAL_NAME.descriptor()];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            name: Self::LOCAL_NAME.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        _context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        controller
            .write_local_name(&self.name)
            .map_err(ExecuteError::ControllerOperationFailed)
    }
}

impl From<ReadLocalName> for Command {
    fn from(value: ReadLocalName) -> Self {
        Command::ReadLocalName(value)
    }
}

impl From<WriteLocalName> for Command {
    fn from(value: WriteLocalName) -> Self {
        Command::WriteLocalName(value)
    }
}
