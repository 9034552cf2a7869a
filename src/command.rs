use std::sync::OnceLock;
use std::time::Duration;

use hcitool_builder::{BuildError, OptionDescriptor, Parameters, Registry, RegistryBuilder, UnknownOptions};

use crate::controller::HostController;
use crate::dispatch::ExecuteError;
use crate::hci::Status;
use crate::interface::UserInterface;

mod controller_baseband;
mod informational;
mod link_control;
mod low_energy;

pub use controller_baseband::*;
pub use informational::*;
pub use link_control::*;
pub use low_energy::*;

/// Identifies the kind of a [`Command`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandType {
    /// `lescan`
    LowEnergyScan,
    /// `setrandomaddress`
    LowEnergySetRandomAddress,
    /// `clearwhitelist`
    LowEnergyClearWhiteList,
    /// `addwhitelist`
    LowEnergyAddDeviceToWhiteList,
    /// `removewhitelist`
    LowEnergyRemoveDeviceFromWhiteList,
    /// `createconnectioncancel`
    LowEnergyCreateConnectionCancel,
    /// `readlocalsupportedfeatures`
    LowEnergyReadLocalSupportedFeatures,
    /// `setreadbuffersize`
    LowEnergyReadBufferSize,
    /// `seteventmask`
    LowEnergySetEventMask,
    /// `lecreateconnection`
    LowEnergyCreateConnection,
    /// `readremoteextendedfeatures`
    ReadRemoteExtendedFeatures,
    /// `disconnect`
    Disconnect,
    /// `inquiry`
    Inquiry,
    /// `readlocalname`
    ReadLocalName,
    /// `writelocalname`
    WriteLocalName,
    /// `readdeviceaddress`
    ReadDeviceAddress,
    /// `readlocalversion`
    ReadLocalVersionInformation,
}

impl CommandType {
    /// The canonical command line name.
    pub fn name(&self) -> &'static str {
        match self {
            CommandType::LowEnergyScan => LowEnergyScan::NAME,
            CommandType::LowEnergySetRandomAddress => LowEnergySetRandomAddress::NAME,
            CommandType::LowEnergyClearWhiteList => LowEnergyClearWhiteList::NAME,
            CommandType::LowEnergyAddDeviceToWhiteList => LowEnergyAddDeviceToWhiteList::NAME,
            CommandType::LowEnergyRemoveDeviceFromWhiteList => {
                LowEnergyRemoveDeviceFromWhiteList::NAME
            }
            CommandType::LowEnergyCreateConnectionCancel => LowEnergyCreateConnectionCancel::NAME,
            CommandType::LowEnergyReadLocalSupportedFeatures => {
                LowEnergyReadLocalSupportedFeatures::NAME
            }
            CommandType::LowEnergyReadBufferSize => LowEnergyReadBufferSize::NAME,
            CommandType::LowEnergySetEventMask => LowEnergySetEventMask::NAME,
            CommandType::LowEnergyCreateConnection => LowEnergyCreateConnection::NAME,
            CommandType::ReadRemoteExtendedFeatures => ReadRemoteExtendedFeatures::NAME,
            CommandType::Disconnect => Disconnect::NAME,
            CommandType::Inquiry => Inquiry::NAME,
            CommandType::ReadLocalName => ReadLocalName::NAME,
            CommandType::WriteLocalName => WriteLocalName::NAME,
            CommandType::ReadDeviceAddress => ReadDeviceAddress::NAME,
            CommandType::ReadLocalVersionInformation => ReadLocalVersionInformation::NAME,
        }
    }
}

impl std::fmt::Display for CommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fully validated request for one controller operation.
///
/// ### Example
/// ```
/// # use hcitool::{Address, Command, LowEnergySetRandomAddress};
/// let command = Command::from_arguments(&["setrandomaddress", "--address", "54:39:A3:47:D8:F0"]).unwrap();
/// assert_eq!(
///     command,
///     Command::LowEnergySetRandomAddress(LowEnergySetRandomAddress {
///         address: Address::new([0x54, 0x39, 0xA3, 0x47, 0xD8, 0xF0]),
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan for advertising devices.
    LowEnergyScan(LowEnergyScan),
    /// Set the LE random address.
    LowEnergySetRandomAddress(LowEnergySetRandomAddress),
    /// Clear the LE white list.
    LowEnergyClearWhiteList(LowEnergyClearWhiteList),
    /// Add a device to the LE white list.
    LowEnergyAddDeviceToWhiteList(LowEnergyAddDeviceToWhiteList),
    /// Remove a device from the LE white list.
    LowEnergyRemoveDeviceFromWhiteList(LowEnergyRemoveDeviceFromWhiteList),
    /// Cancel a pending LE connection.
    LowEnergyCreateConnectionCancel(LowEnergyCreateConnectionCancel),
    /// Read the controller's LE features.
    LowEnergyReadLocalSupportedFeatures(LowEnergyReadLocalSupportedFeatures),
    /// Read the controller's LE buffer size.
    LowEnergyReadBufferSize(LowEnergyReadBufferSize),
    /// Set the LE event mask.
    LowEnergySetEventMask(LowEnergySetEventMask),
    /// Connect to an LE peer.
    LowEnergyCreateConnection(LowEnergyCreateConnection),
    /// Connect to a BR/EDR device, and read its LMP features.
    ReadRemoteExtendedFeatures(ReadRemoteExtendedFeatures),
    /// Terminate a connection.
    Disconnect(Disconnect),
    /// Discover BR/EDR devices.
    Inquiry(Inquiry),
    /// Read the controller's name.
    ReadLocalName(ReadLocalName),
    /// Change the controller's name.
    WriteLocalName(WriteLocalName),
    /// Read the controller's public address.
    ReadDeviceAddress(ReadDeviceAddress),
    /// Read the controller's versions.
    ReadLocalVersionInformation(ReadLocalVersionInformation),
}

impl Command {
    /// Build a command from `arguments` (the command name, followed by its options), ignoring undeclared options.
    pub fn from_arguments(arguments: &[&str]) -> Result<Command, BuildError> {
        Command::from_arguments_with(arguments, UnknownOptions::Ignore)
    }

    /// Build a command from `arguments`, treating undeclared options according to `policy`.
    pub fn from_arguments_with(
        arguments: &[&str],
        policy: UnknownOptions,
    ) -> Result<Command, BuildError> {
        registry().build(arguments, policy)
    }

    /// The kind of this command.
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::LowEnergyScan(_) => CommandType::LowEnergyScan,
            Command::LowEnergySetRandomAddress(_) => CommandType::LowEnergySetRandomAddress,
            Command::LowEnergyClearWhiteList(_) => CommandType::LowEnergyClearWhiteList,
            Command::LowEnergyAddDeviceToWhiteList(_) => CommandType::LowEnergyAddDeviceToWhiteList,
            Command::LowEnergyRemoveDeviceFromWhiteList(_) => {
                CommandType::LowEnergyRemoveDeviceFromWhiteList
            }
            Command::LowEnergyCreateConnectionCancel(_) => {
                CommandType::LowEnergyCreateConnectionCancel
            }
            Command::LowEnergyReadLocalSupportedFeatures(_) => {
                CommandType::LowEnergyReadLocalSupportedFeatures
            }
            Command::LowEnergyReadBufferSize(_) => CommandType::LowEnergyReadBufferSize,
            Command::LowEnergySetEventMask(_) => CommandType::LowEnergySetEventMask,
            Command::LowEnergyCreateConnection(_) => CommandType::LowEnergyCreateConnection,
            Command::ReadRemoteExtendedFeatures(_) => CommandType::ReadRemoteExtendedFeatures,
            Command::Disconnect(_) => CommandType::Disconnect,
            Command::Inquiry(_) => CommandType::Inquiry,
            Command::ReadLocalName(_) => CommandType::ReadLocalName,
            Command::WriteLocalName(_) => CommandType::WriteLocalName,
            Command::ReadDeviceAddress(_) => CommandType::ReadDeviceAddress,
            Command::ReadLocalVersionInformation(_) => CommandType::ReadLocalVersionInformation,
        }
    }
}

/// What a command needs while executing, besides the controller.
pub(crate) struct Context<'a> {
    pub(crate) timeout: Duration,
    pub(crate) user_interface: &'a dyn UserInterface,
}

impl Context<'_> {
    pub(crate) fn print(&self, message: impl Into<String>) {
        self.user_interface.print(message.into());
    }
}

/// Behaviour shared by every command payload: how it is declared, built and executed.
pub(crate) trait CommandKind: Sized + Into<Command> {
    const TYPE: CommandType;
    const NAME: &'static str;
    const ALIASES: &'static [&'static str] = &[];
    const OPTIONS: &'static [OptionDescriptor];

    fn build(parameters: &Parameters) -> Result<Self, BuildError>;

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>>;
}

/// Fail with a status error unless the controller reported success.
pub(crate) fn require_success<E: std::error::Error + 'static>(
    operation: &'static str,
    status: Status,
) -> Result<(), ExecuteError<E>> {
    match status {
        Status::Success => Ok(()),
        Status::Error(status) => Err(ExecuteError::ControllerStatusError { operation, status }),
    }
}

fn build_as<K: CommandKind>(parameters: &Parameters) -> Result<Command, BuildError> {
    K::build(parameters).map(Into::into)
}

fn register<K: CommandKind>(
    builder: RegistryBuilder<CommandType, Command>,
) -> RegistryBuilder<CommandType, Command> {
    let builder = builder.command(K::NAME, K::TYPE, K::OPTIONS, build_as::<K>);

    K::ALIASES
        .iter()
        .fold(builder, |builder, alias| builder.alias(*alias, K::NAME))
}

static REGISTRY: OnceLock<Registry<CommandType, Command>> = OnceLock::new();

/// The process-wide command registry, initialized on first use.
pub fn registry() -> &'static Registry<CommandType, Command> {
    REGISTRY.get_or_init(|| {
        let builder = Registry::builder();
        let builder = register::<LowEnergyScan>(builder);
        let builder = register::<LowEnergySetRandomAddress>(builder);
        let builder = register::<LowEnergyClearWhiteList>(builder);
        let builder = register::<LowEnergyAddDeviceToWhiteList>(builder);
        let builder = register::<LowEnergyRemoveDeviceFromWhiteList>(builder);
        let builder = register::<LowEnergyCreateConnectionCancel>(builder);
        let builder = register::<LowEnergyReadLocalSupportedFeatures>(builder);
        let builder = register::<LowEnergyReadBufferSize>(builder);
        let builder = register::<LowEnergySetEventMask>(builder);
        let builder = register::<LowEnergyCreateConnection>(builder);
        let builder = register::<ReadRemoteExtendedFeatures>(builder);
        let builder = register::<Disconnect>(builder);
        let builder = register::<Inquiry>(builder);
        let builder = register::<ReadLocalName>(builder);
        let builder = register::<WriteLocalName>(builder);
        let builder = register::<ReadDeviceAddress>(builder);
        let builder = register::<ReadLocalVersionInformation>(builder);

        builder
            .build()
            .expect("internal error - the command table must be valid")
    })
}
