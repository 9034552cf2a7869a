//! Commands of the informational group (OGF 0x04).
use hcitool_builder::{BuildError, OptionDescriptor, Parameters};

use crate::command::{Command, CommandKind, CommandType, Context};
use crate::controller::HostController;
use crate::dispatch::ExecuteError;

/// Read the controller's public device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadDeviceAddress;

impl CommandKind for ReadDeviceAddress {
    const TYPE: CommandType = CommandType::ReadDeviceAddress;
    const NAME: &'static str = "readdeviceaddress";
    const OPTIONS: &'static [OptionDescriptor] = &[];

    fn build(_parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self)
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let address = controller
            .read_device_address()
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print(address.to_string());
        Ok(())
    }
}

/// Read the controller's version information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLocalVersionInformation;

impl CommandKind for ReadLocalVersionInformation {
    const TYPE: CommandType = CommandType::ReadLocalVersionInformation;
    const NAME: &'static str = "readlocalversion";
    const OPTIONS: &'static [OptionDescriptor] = &[];

    fn build(_parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self)
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let version = controller
            .read_local_version_information()
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print(format!("HCI Version = 0x{:02X}", version.hci_version));
        context.print(format!("HCI Revision = 0x{:04X}", version.hci_revision));
        context.print(format!("LMP Version = 0x{:02X}", version.lmp_version));
        context.print(format!("Manufacturer = 0x{:04X}", version.manufacturer));
        context.print(format!("LMP Subversion = 0x{:04X}", version.lmp_subversion));
        Ok(())
    }
}

impl From<ReadDeviceAddress> for Command {
    fn from(value: ReadDeviceAddress) -> Self {
        Command::ReadDeviceAddress(value)
    }
}

impl From<ReadLocalVersionInformation> for Command {
    fn from(value: ReadLocalVersionInformation) -> Self {
        Command::ReadLocalVersionInformation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::util::execute;
    use crate::controller::util::{Call, RecordingController, Unavailable};

    #[test]
    fn read_device_address() {
        let mut controller = RecordingController::default();

        let (result, output) = execute(&ReadDeviceAddress, &mut controller);

        assert_matches!(result, Ok(()));
        assert_eq!(controller.calls, vec![Call::ReadDeviceAddress]);
        assert_eq!(output, "54:39:A3:47:D8:F0");
    }

    #[test]
    fn read_local_version() {
        let mut controller = RecordingController::default();

        let (result, output) = execute(&ReadLocalVersionInformation, &mut controller);

        assert_matches!(result, Ok(()));
        assert_eq!(controller.calls, vec![Call::ReadLocalVersionInformation]);
        assert_eq!(
            output,
            "HCI Version = 0x09\nHCI Revision = 0x0100\nLMP Version = 0x09\nManufacturer = 0x000F\nLMP Subversion = 0x2222"
        );
    }

    #[test]
    fn read_local_version_unavailable() {
        let mut controller = RecordingController::unavailable();

        let (result, output) = execute(&ReadLocalVersionInformation, &mut controller);

        assert_matches!(result, Err(ExecuteError::ControllerOperationFailed(Unavailable)));
        assert_eq!(output, "");
    }
}
