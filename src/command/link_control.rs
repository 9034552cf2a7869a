//! Commands of the link control group (OGF 0x01).
use hcitool_builder::{Address, BuildError, Field, OptionDescriptor, Optional, Parameters, Scalar};
use tracing::debug;

use crate::command::{require_success, Command, CommandKind, CommandType, Context};
use crate::controller::HostController;
use crate::dispatch::ExecuteError;
use crate::hci::{
    AllowRoleSwitch, ClockOffset, ConnectionHandle, DisconnectReason, PacketType,
    PageScanRepetitionMode,
};

/// Connect to a BR/EDR device, then read one page of its LMP features.
///
/// Every option is required.
///
/// ### Example
/// ```
/// # use hcitool::{Command, PageScanRepetitionMode};
/// let command = Command::from_arguments(&[
///     "readremoteextendedfeatures",
///     "--address", "54:39:A3:47:D8:F0",
///     "--packettype", "dm1,dh1",
///     "--pagescanrepetitionmode", "1",
///     "--clockoffset", "0x0000",
///     "--allowroleswitch", "1",
///     "--pagenumber", "1",
/// ])
/// .unwrap();
///
/// match command {
///     Command::ReadRemoteExtendedFeatures(command) => {
///         assert_eq!(command.packet_type.bits(), 0x0018);
///         assert_eq!(command.page_scan_repetition_mode, PageScanRepetitionMode::R1);
///         assert_eq!(command.page_number, 1);
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRemoteExtendedFeatures {
    /// The device to connect to.
    pub address: Address,
    /// The packet types the connection may use.
    pub packet_type: PacketType,
    /// The device's page scan repetition mode.
    pub page_scan_repetition_mode: PageScanRepetitionMode,
    /// The clock offset to the device.
    pub clock_offset: ClockOffset,
    /// Whether the local device accepts a role switch.
    pub allow_role_switch: AllowRoleSwitch,
    /// The page of features to read.
    pub page_number: u8,
}

impl ReadRemoteExtendedFeatures {
    const ADDRESS: Scalar<Address> = Scalar::new("address");
    const PACKET_TYPE: Scalar<PacketType> = Scalar::new("packettype");
    const PAGE_SCAN_REPETITION_MODE: Scalar<PageScanRepetitionMode> =
        Scalar::new("pagescanrepetitionmode");
    const CLOCK_OFFSET: Scalar<ClockOffset> = Scalar::new("clockoffset");
    const ALLOW_ROLE_SWITCH: Scalar<AllowRoleSwitch> = Scalar::new("allowroleswitch");
    const PAGE_NUMBER: Scalar<u8> = Scalar::new("pagenumber");
}

impl CommandKind for ReadRemoteExtendedFeatures {
    const TYPE: CommandType = CommandType::ReadRemoteExtendedFeatures;
    const NAME: &'static str = "readremoteextendedfeatures";
    const OPTIONS: &'static [OptionDescriptor] = &[
        Self::ADDRESS.descriptor(),
        Self::PACKET_TYPE.descriptor(),
        Self::PAGE_SCAN_REPETITION_MODE.descriptor(),
        Self::CLOCK_OFFSET.descriptor(),
        Self::ALLOW_ROLE_SWITCH.descriptor(),
        Self::PAGE_NUMBER.descriptor(),
    ];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            address: Self::ADDRESS.resolve(parameters)?,
            packet_type: Self::PACKET_TYPE.resolve(parameters)?,
            page_scan_repetition_mode: Self::PAGE_SCAN_REPETITION_MODE.resolve(parameters)?,
            clock_offset: Self::CLOCK_OFFSET.resolve(parameters)?,
            allow_role_switch: Self::ALLOW_ROLE_SWITCH.resolve(parameters)?,
            page_number: Self::PAGE_NUMBER.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let connection = controller
            .create_connection(
                self.address,
                self.packet_type,
                self.page_scan_repetition_mode,
                self.clock_offset,
                self.allow_role_switch,
                context.timeout,
            )
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print(format!("Connection handle = {}", connection.handle));
        require_success("Connection", connection.status)?;

        debug!(
            "Reading page {} of the features over {}.",
            self.page_number, connection.handle
        );
        let features = controller
            .read_remote_extended_features(connection.handle, self.page_number, context.timeout)
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print("LMP Features:");
        features.names().for_each(|name| context.print(name));
        Ok(())
    }
}

/// Terminate a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnect {
    /// The connection to terminate.
    pub handle: ConnectionHandle,
    /// Why the connection is being terminated.
    pub reason: DisconnectReason,
}

impl Disconnect {
    const HANDLE: Scalar<ConnectionHandle> = Scalar::new("handle");
    const REASON: Optional<DisconnectReason> =
        Optional::new("reason", DisconnectReason::RemoteUserTerminated);
}

impl CommandKind for Disconnect {
    const TYPE: CommandType = CommandType::Disconnect;
    const NAME: &'static str = "disconnect";
    const OPTIONS: &'static [OptionDescriptor] =
        &[Self::HANDLE.descriptor(), Self::REASON.descriptor()];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            handle: Self::HANDLE.resolve(parameters)?,
            reason: Self::REASON.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        debug!("Disconnecting {} with reason {}.", self.handle, self.reason.error_code());
        let complete = controller
            .disconnect(self.handle, self.reason, context.timeout)
            .map_err(ExecuteError::ControllerOperationFailed)?;
        require_success("Disconnection", complete.status)?;
        context.print(format!(
            "Disconnected {}: {}",
            complete.handle,
            complete.reason.name()
        ));
        Ok(())
    }
}

const MIN_INQUIRY_LENGTH: u8 = 0x01;
const MAX_INQUIRY_LENGTH: u8 = 0x30;

fn valid_inquiry_length(length: &u8) -> bool {
    (MIN_INQUIRY_LENGTH..=MAX_INQUIRY_LENGTH).contains(length)
}

/// Discover nearby BR/EDR devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inquiry {
    /// How long to inquire for, in units of 1.28 s (1 to 0x30).
    pub length: u8,
    /// How many responses to wait for; 0 means unlimited.
    pub responses: u8,
}

impl Inquiry {
    const LENGTH: Optional<u8> = Optional::checked("length", 8, valid_inquiry_length);
    const RESPONSES: Optional<u8> = Optional::new("responses", 0);
}

impl CommandKind for Inquiry {
    const TYPE: CommandType = CommandType::Inquiry;
    const NAME: &'static str = "inquiry";
    const OPTIONS: &'static [OptionDescriptor] =
        &[Self::LENGTH.descriptor(), Self::RESPONSES.descriptor()];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            length: Self::LENGTH.resolve(parameters)?,
            responses: Self::RESPONSES.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let results = controller
            .inquiry(self.length, self.responses, context.timeout)
            .map_err(ExecuteError::ControllerOperationFailed)?;

        for result in results {
            context.print(format!(
                "{} class 0x{:06X} mode {} clock offset 0x{:04X}",
                result.address,
                result.class_of_device,
                result.page_scan_repetition_mode,
                result.clock_offset.value()
            ));
        }

        Ok(())
    }
}

impl From<ReadRemoteExtendedFeatures> for Command {
    fn from(value: ReadRemoteExtendedFeatures) -> Self {
        Command::ReadRemoteExtendedFeatures(value)
    }
}

impl From<Disconnect> for Command {
    fn from(value: Disconnect) -> Self {
        Command::Disconnect(value)
    }
}

impl From<Inquiry> for Command {
    fn from(value: Inquiry) -> Self {
        Command::Inquiry(value)
    }
}
