//! Commands of the LE controller group (OGF 0x08).
use std::collections::BTreeSet;
use std::time::Duration;

use hcitool_builder::{
    Address, BuildError, Collection, Field, OptionDescriptor, Optional, Parameters, Scalar, Switch,
};
use tracing::debug;

use crate::command::{require_success, Command, CommandKind, CommandType, Context};
use crate::controller::{HostController, LeConnectionParameters};
use crate::dispatch::ExecuteError;
use crate::hci::{AddressType, LowEnergyEvent, LowEnergyEventMask};

const ADDRESS: Scalar<Address> = Scalar::new("address");
const ADDRESS_TYPE: Optional<AddressType> = Optional::new("addresstype", AddressType::Public);

/// Scan for advertising devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyScan {
    /// How long to scan for, in milliseconds.
    pub duration: u32,
    /// Whether the controller should report each advertiser only once.
    pub filter_duplicates: bool,
}

impl LowEnergyScan {
    /// The scan duration used when none is given.
    pub const DEFAULT_DURATION: u32 = 1000;

    const DURATION: Optional<u32> = Optional::new("duration", Self::DEFAULT_DURATION);
    const FILTER_DUPLICATES: Switch = Switch::new("filterduplicates");
}

impl CommandKind for LowEnergyScan {
    const TYPE: CommandType = CommandType::LowEnergyScan;
    const NAME: &'static str = "lescan";
    const OPTIONS: &'static [OptionDescriptor] = &[
        Self::DURATION.descriptor(),
        Self::FILTER_DUPLICATES.descriptor(),
    ];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            duration: Self::DURATION.resolve(parameters)?,
            filter_duplicates: Self::FILTER_DUPLICATES.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let reports = controller
            .le_scan(
                Duration::from_millis(u64::from(self.duration)),
                self.filter_duplicates,
            )
            .map_err(ExecuteError::ControllerOperationFailed)?;

        for report in reports {
            context.print(format!(
                "{} ({}) RSSI {} dBm",
                report.address, report.address_type, report.rssi
            ));
        }

        Ok(())
    }
}

/// Set the LE random device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergySetRandomAddress {
    /// The new random address.
    pub address: Address,
}

impl CommandKind for LowEnergySetRandomAddress {
    const TYPE: CommandType = CommandType::LowEnergySetRandomAddress;
    const NAME: &'static str = "setrandomaddress";
    const OPTIONS: &'static [OptionDescriptor] = &[ADDRESS.descriptor()];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            address: ADDRESS.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        _context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        controller
            .le_set_random_address(self.address)
            .map_err(ExecuteError::ControllerOperationFailed)
    }
}

/// Remove every device from the LE white list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyClearWhiteList;

impl CommandKind for LowEnergyClearWhiteList {
    const TYPE: CommandType = CommandType::LowEnergyClearWhiteList;
    const NAME: &'static str = "clearwhitelist";
    const ALIASES: &'static [&'static str] = &["clearallowlist"];
    const OPTIONS: &'static [OptionDescriptor] = &[];

    fn build(_parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self)
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        _context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        controller
            .le_clear_white_list()
            .map_err(ExecuteError::ControllerOperationFailed)
    }
}

/// Add a device to the LE white list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyAddDeviceToWhiteList {
    /// The device's address.
    pub address: Address,
    /// The type of the device's address.
    pub address_type: AddressType,
}

impl CommandKind for LowEnergyAddDeviceToWhiteList {
    const TYPE: CommandType = CommandType::LowEnergyAddDeviceToWhiteList;
    const NAME: &'static str = "addwhitelist";
    const ALIASES: &'static [&'static str] = &["addallowlist"];
    const OPTIONS: &'static [OptionDescriptor] = &[ADDRESS.descriptor(), ADDRESS_TYPE.descriptor()];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            address: ADDRESS.resolve(parameters)?,
            address_type: ADDRESS_TYPE.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        _context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        controller
            .le_add_device_to_white_list(self.address_type, self.address)
            .map_err(ExecuteError::ControllerOperationFailed)
    }
}

/// Remove a device from the LE white list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyRemoveDeviceFromWhiteList {
    /// The device's address.
    pub address: Address,
    /// The type of the device's address.
    pub address_type: AddressType,
}

impl CommandKind for LowEnergyRemoveDeviceFromWhiteList {
    const TYPE: CommandType = CommandType::LowEnergyRemoveDeviceFromWhiteList;
    const NAME: &'static str = "removewhitelist";
    const ALIASES: &'static [&'static str] = &["removeallowlist"];
    const OPTIONS: &'static [OptionDescriptor] = &[ADDRESS.descriptor(), ADDRESS_TYPE.descriptor()];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            address: ADDRESS.resolve(parameters)?,
            address_type: ADDRESS_TYPE.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        _context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        controller
            .le_remove_device_from_white_list(self.address_type, self.address)
            .map_err(ExecuteError::ControllerOperationFailed)
    }
}

/// Cancel a pending LE connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyCreateConnectionCancel;

impl CommandKind for LowEnergyCreateConnectionCancel {
    const TYPE: CommandType = CommandType::LowEnergyCreateConnectionCancel;
    const NAME: &'static str = "createconnectioncancel";
    const OPTIONS: &'static [OptionDescriptor] = &[];

    fn build(_parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self)
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        _context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        controller
            .le_create_connection_cancel()
            .map_err(ExecuteError::ControllerOperationFailed)
    }
}

/// Read the LE features supported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyReadLocalSupportedFeatures;

impl CommandKind for LowEnergyReadLocalSupportedFeatures {
    const TYPE: CommandType = CommandType::LowEnergyReadLocalSupportedFeatures;
    const NAME: &'static str = "readlocalsupportedfeatures";
    const OPTIONS: &'static [OptionDescriptor] = &[];

    fn build(_parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self)
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let features = controller
            .le_read_local_supported_features()
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print("LE Features:");
        features.names().for_each(|name| context.print(name));
        Ok(())
    }
}

/// Read the LE ACL buffer capacity of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyReadBufferSize;

impl CommandKind for LowEnergyReadBufferSize {
    const TYPE: CommandType = CommandType::LowEnergyReadBufferSize;
    const NAME: &'static str = "setreadbuffersize";
    const ALIASES: &'static [&'static str] = &["readbuffersize"];
    const OPTIONS: &'static [OptionDescriptor] = &[];

    fn build(_parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self)
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let buffer = controller
            .le_read_buffer_size()
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print(format!("Data Packet Length = {}", buffer.data_packet_length));
        context.print(format!("Data Packet Count = {}", buffer.data_packet_count));
        Ok(())
    }
}

/// Choose which LE meta events the controller reports.
///
/// Events left out of the set are disabled; an empty set disables every LE meta event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowEnergySetEventMask {
    /// The events to enable.
    pub events: BTreeSet<LowEnergyEvent>,
}

impl LowEnergySetEventMask {
    const EVENT: Collection<BTreeSet<LowEnergyEvent>, LowEnergyEvent> = Collection::new("event");

    /// The mask enabling exactly these events.
    pub fn mask(&self) -> LowEnergyEventMask {
        self.events.iter().copied().collect()
    }
}

impl CommandKind for LowEnergySetEventMask {
    const TYPE: CommandType = CommandType::LowEnergySetEventMask;
    const NAME: &'static str = "seteventmask";
    const OPTIONS: &'static [OptionDescriptor] = &[Self::EVENT.descriptor()];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            events: Self::EVENT.resolve(parameters)?,
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        _context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let mask = self.mask();
        debug!("Setting the LE event mask to {:#018x}.", mask.bits());
        controller
            .le_set_event_mask(mask)
            .map_err(ExecuteError::ControllerOperationFailed)
    }
}

/// Connect to an LE peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowEnergyCreateConnection {
    /// The connection request.
    pub parameters: LeConnectionParameters,
}

impl LowEnergyCreateConnection {
    const SCAN_INTERVAL: Optional<u16> = Optional::new("scaninterval", 0x0060);
    const SCAN_WINDOW: Optional<u16> = Optional::new("scanwindow", 0x0030);
    const CONNECTION_INTERVAL_MIN: Optional<u16> = Optional::new("connintervalmin", 0x0018);
    const CONNECTION_INTERVAL_MAX: Optional<u16> = Optional::new("connintervalmax", 0x0028);
    const LATENCY: Optional<u16> = Optional::new("latency", 0);
    const SUPERVISION_TIMEOUT: Optional<u16> = Optional::new("supervisiontimeout", 0x0048);
}

impl CommandKind for LowEnergyCreateConnection {
    const TYPE: CommandType = CommandType::LowEnergyCreateConnection;
    const NAME: &'static str = "lecreateconnection";
    const OPTIONS: &'static [OptionDescriptor] = &[
        ADDRESS.descriptor(),
        ADDRESS_TYPE.descriptor(),
        Self::SCAN_INTERVAL.descriptor(),
        Self::SCAN_WINDOW.descriptor(),
        Self::CONNECTION_INTERVAL_MIN.descriptor(),
        Self::CONNECTION_INTERVAL_MAX.descriptor(),
        Self::LATENCY.descriptor(),
        Self::SUPERVISION_TIMEOUT.descriptor(),
    ];

    fn build(parameters: &Parameters) -> Result<Self, BuildError> {
        Ok(Self {
            parameters: LeConnectionParameters {
                peer_address: ADDRESS.resolve(parameters)?,
                peer_address_type: ADDRESS_TYPE.resolve(parameters)?,
                scan_interval: Self::SCAN_INTERVAL.resolve(parameters)?,
                scan_window: Self::SCAN_WINDOW.resolve(parameters)?,
                connection_interval_min: Self::CONNECTION_INTERVAL_MIN.resolve(parameters)?,
                connection_interval_max: Self::CONNECTION_INTERVAL_MAX.resolve(parameters)?,
                latency: Self::LATENCY.resolve(parameters)?,
                supervision_timeout: Self::SUPERVISION_TIMEOUT.resolve(parameters)?,
            },
        })
    }

    fn execute<C: HostController>(
        &self,
        controller: &mut C,
        context: &Context<'_>,
    ) -> Result<(), ExecuteError<C::Error>> {
        let complete = controller
            .le_create_connection(self.parameters, context.timeout)
            .map_err(ExecuteError::ControllerOperationFailed)?;
        context.print(format!("Connection handle = {}", complete.handle));
        require_success("Connection", complete.status)
    }
}

impl From<LowEnergyScan> for Command {
    fn from(value: LowEnergyScan) -> Self {
        Command::LowEnergyScan(value)
    }
}

impl From<LowEnergySetRandomAddress> for Command {
    fn from(value: LowEnergySetRandomAddress) -> Self {
        Command::LowEnergySetRandomAddress(value)
    }
}

impl From<LowEnergyClearWhiteList> for Command {
    fn from(value: LowEnergyClearWhiteList) -> Self {
        Command::LowEnergyClearWhiteList(value)
    }
}

impl From<LowEnergyAddDeviceToWhiteList> for Command {
    fn from(value: LowEnergyAddDeviceToWhiteList) -> Self {
        Command::LowEnergyAddDeviceToWhiteList(value)
    }
}

impl From<LowEnergyRemoveDeviceFromWhiteList> for Command {
    fn from(value: LowEnergyRemoveDeviceFromWhiteList) -> Self {
        Command::LowEnergyRemoveDeviceFromWhiteList(value)
    }
}

impl From<LowEnergyCreateConnectionCancel> for Command {
    fn from(value: LowEnergyCreateConnectionCancel) -> Self {
        Command::LowEnergyCreateConnectionCancel(value)
    }
}

impl From<LowEnergyReadLocalSupportedFeatures> for Command {
    fn from(value: LowEnergyReadLocalSupportedFeatures) -> Self {
        Command::LowEnergyReadLocalSupportedFeatures(value)
    }
}

impl From<LowEnergyReadBufferSize> for Command {
    fn from(value: LowEnergyReadBufferSize) -> Self {
        Command::LowEnergyReadBufferSize(value)
    }
}

impl From<LowEnergySetEventMask> for Command {
    fn from(value: LowEnergySetEventMask) -> Self {
        Command::LowEnergySetEventMask(value)
    }
}

impl From<LowEnergyCreateConnection> for Command {
    fn from(value: LowEnergyCreateConnection) -> Self {
        Command::LowEnergyCreateConnection(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::util::{execute, parameters, TIMEOUT};
    use crate::controller::util::{Call, RecordingController, Unavailable, HANDLE, PEER};
    use crate::hci::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(vec!["lescan"], 1000, false)]
    #[case(vec!["lescan", "--duration", "1000"], 1000, false)]
    #[case(vec!["lescan", "--duration", "0x10"], 16, false)]
    #[case(vec!["lescan", "--duration=250", "--filterduplicates"], 250, true)]
    #[case(vec!["lescan", "--filterduplicates", "--duration", "5"], 5, true)]
    #[case(vec!["lescan", "--filterduplicates", "off"], 1000, false)]
    #[case(vec!["lescan", "--DURATION", "7"], 7, false)]
    fn scan_build(
        #[case] arguments: Vec<&str>,
        #[case] duration: u32,
        #[case] filter_duplicates: bool,
    ) {
        // Setup
        let parameters = parameters(arguments.as_slice());

        // Execute
        let command = LowEnergyScan::build(&parameters).unwrap();

        // Verify
        assert_eq!(
            command,
            LowEnergyScan {
                duration,
                filter_duplicates,
            }
        );
    }

    #[rstest]
    #[case(vec!["lescan", "--duration", "abc"], BuildError::InvalidOptionValue { option: "duration".to_string(), value: "abc".to_string() })]
    #[case(vec!["lescan", "--duration", "-1"], BuildError::InvalidOptionValue { option: "duration".to_string(), value: "-1".to_string() })]
    #[case(vec!["lescan", "--duration", "4294967296"], BuildError::InvalidOptionValue { option: "duration".to_string(), value: "4294967296".to_string() })]
    #[case(vec!["lescan", "--duration"], BuildError::MissingOption("duration".to_string()))]
    #[case(vec!["lescan", "--filterduplicates", "maybe"], BuildError::InvalidOptionValue { option: "filterduplicates".to_string(), value: "maybe".to_string() })]
    fn scan_build_invalid(#[case] arguments: Vec<&str>, #[case] expected: BuildError) {
        assert_eq!(
            LowEnergyScan::build(&parameters(arguments.as_slice())),
            Err(expected)
        );
    }

    #[test]
    fn scan_execute() {
        // Setup
        let mut controller = RecordingController::default();
        let command = LowEnergyScan {
            duration: 250,
            filter_duplicates: true,
        };

        // Execute
        let (result, output) = execute(&command, &mut controller);

        // Verify
        assert_matches!(result, Ok(()));
        assert_eq!(
            controller.calls,
            vec![Call::LeScan(Duration::from_millis(250), true)]
        );
        assert_eq!(output, "54:39:A3:47:D8:F0 (random) RSSI -60 dBm");
    }

    #[rstest]
    #[case(vec!["setrandomaddress", "--address", "54:39:A3:47:D8:F0"])]
    #[case(vec!["setrandomaddress", "--address", "54:39:a3:47:d8:f0"])]
    #[case(vec!["setrandomaddress", "--address=54:39:A3:47:D8:F0"])]
    fn set_random_address_build(#[case] arguments: Vec<&str>) {
        assert_eq!(
            LowEnergySetRandomAddress::build(&parameters(arguments.as_slice())),
            Ok(LowEnergySetRandomAddress { address: PEER })
        );
    }

    #[rstest]
    #[case(vec!["setrandomaddress"], BuildError::MissingOption("address".to_string()))]
    #[case(vec!["setrandomaddress", "--randomaddress"], BuildError::MissingOption("address".to_string()))]
    #[case(vec!["setrandomaddress", "--address"], BuildError::MissingOption("address".to_string()))]
    #[case(vec!["setrandomaddress", "--address", "54:39:A3:47:D8"], BuildError::InvalidOptionValue { option: "address".to_string(), value: "54:39:A3:47:D8".to_string() })]
    fn set_random_address_build_invalid(
        #[case] arguments: Vec<&str>,
        #[case] expected: BuildError,
    ) {
        assert_eq!(
            LowEnergySetRandomAddress::build(&parameters(arguments.as_slice())),
            Err(expected)
        );
    }

    #[test]
    fn set_random_address_execute() {
        let mut controller = RecordingController::default();
        let (result, output) = execute(&LowEnergySetRandomAddress { address: PEER }, &mut controller);

        assert_matches!(result, Ok(()));
        assert_eq!(controller.calls, vec![Call::LeSetRandomAddress(PEER)]);
        assert_eq!(output, "");
    }

    #[test]
    fn set_random_address_unavailable() {
        let mut controller = RecordingController::unavailable();
        let (result, _) = execute(&LowEnergySetRandomAddress { address: PEER }, &mut controller);

        assert_matches!(result, Err(ExecuteError::ControllerOperationFailed(Unavailable)));
    }

    #[rstest]
    #[case(vec!["addwhitelist", "--address", "54:39:A3:47:D8:F0"], AddressType::Public)]
    #[case(vec!["addwhitelist", "--address", "54:39:A3:47:D8:F0", "--addresstype", "random"], AddressType::Random)]
    #[case(vec!["addwhitelist", "--addresstype", "1", "--address", "54:39:A3:47:D8:F0"], AddressType::Random)]
    fn white_list_build(#[case] arguments: Vec<&str>, #[case] address_type: AddressType) {
        let parameters = parameters(arguments.as_slice());

        assert_eq!(
            LowEnergyAddDeviceToWhiteList::build(&parameters),
            Ok(LowEnergyAddDeviceToWhiteList {
                address: PEER,
                address_type,
            })
        );
        assert_eq!(
            LowEnergyRemoveDeviceFromWhiteList::build(&parameters),
            Ok(LowEnergyRemoveDeviceFromWhiteList {
                address: PEER,
                address_type,
            })
        );
    }

    #[test]
    fn white_list_build_invalid() {
        let parameters = parameters(&["addwhitelist", "--address", "54:39:A3:47:D8:F0", "--addresstype", "static"]);

        assert_eq!(
            LowEnergyAddDeviceToWhiteList::build(&parameters),
            Err(BuildError::InvalidOptionValue {
                option: "addresstype".to_string(),
                value: "static".to_string(),
            })
        );
    }

    #[test]
    fn white_list_execute() {
        // Setup
        let mut controller = RecordingController::default();

        // Execute
        let (add, _) = execute(
            &LowEnergyAddDeviceToWhiteList {
                address: PEER,
                address_type: AddressType::Random,
            },
            &mut controller,
        );
        let (remove, _) = execute(
            &LowEnergyRemoveDeviceFromWhiteList {
                address: PEER,
                address_type: AddressType::Public,
            },
            &mut controller,
        );
        let (clear, _) = execute(&LowEnergyClearWhiteList, &mut controller);

        // Verify
        assert_matches!(add, Ok(()));
        assert_matches!(remove, Ok(()));
        assert_matches!(clear, Ok(()));
        assert_eq!(
            controller.calls,
            vec![
                Call::LeAddDeviceToWhiteList(AddressType::Random, PEER),
                Call::LeRemoveDeviceFromWhiteList(AddressType::Public, PEER),
                Call::LeClearWhiteList,
            ]
        );
    }

    #[test]
    fn no_option_commands() {
        let parameters = parameters(&["clearwhitelist", "--moot", "1"]);

        assert_eq!(LowEnergyClearWhiteList::build(&parameters), Ok(LowEnergyClearWhiteList));
        assert_eq!(
            LowEnergyCreateConnectionCancel::build(&parameters),
            Ok(LowEnergyCreateConnectionCancel)
        );
        assert_eq!(
            LowEnergyReadLocalSupportedFeatures::build(&parameters),
            Ok(LowEnergyReadLocalSupportedFeatures)
        );
        assert_eq!(LowEnergyReadBufferSize::build(&parameters), Ok(LowEnergyReadBufferSize));
    }

    #[test]
    fn create_connection_cancel_execute() {
        let mut controller = RecordingController::default();
        let (result, _) = execute(&LowEnergyCreateConnectionCancel, &mut controller);

        assert_matches!(result, Ok(()));
        assert_eq!(controller.calls, vec![Call::LeCreateConnectionCancel]);
    }

    #[test]
    fn read_local_supported_features_execute() {
        let mut controller = RecordingController::default();
        let (result, output) = execute(&LowEnergyReadLocalSupportedFeatures, &mut controller);

        assert_matches!(result, Ok(()));
        assert_eq!(controller.calls, vec![Call::LeReadLocalSupportedFeatures]);
        assert_eq!(output, "LE Features:\nLE Encryption\nLE Ping");
    }

    #[test]
    fn read_buffer_size_execute() {
        let mut controller = RecordingController::default();
        let (result, output) = execute(&LowEnergyReadBufferSize, &mut controller);

        assert_matches!(result, Ok(()));
        assert_eq!(controller.calls, vec![Call::LeReadBufferSize]);
        assert_eq!(output, "Data Packet Length = 251\nData Packet Count = 8");
    }

    #[rstest]
    #[case(vec!["seteventmask"], vec![])]
    #[case(vec!["seteventmask", "--event", "connectioncomplete", "--event", "advertisingreport"], vec![LowEnergyEvent::ConnectionComplete, LowEnergyEvent::AdvertisingReport])]
    #[case(vec!["seteventmask", "--event", "advertisingreport", "--event", "ConnectionComplete", "--event", "advertisingreport"], vec![LowEnergyEvent::ConnectionComplete, LowEnergyEvent::AdvertisingReport])]
    fn set_event_mask_build(#[case] arguments: Vec<&str>, #[case] expected: Vec<LowEnergyEvent>) {
        assert_eq!(
            LowEnergySetEventMask::build(&parameters(arguments.as_slice())),
            Ok(LowEnergySetEventMask {
                events: BTreeSet::from_iter(expected),
            })
        );
    }

    #[rstest]
    #[case(vec!["seteventmask", "--event", "connectioncomplete", "--event", "moot"], BuildError::InvalidOptionValue { option: "event".to_string(), value: "moot".to_string() })]
    #[case(vec!["seteventmask", "--event"], BuildError::MissingOption("event".to_string()))]
    fn set_event_mask_build_invalid(#[case] arguments: Vec<&str>, #[case] expected: BuildError) {
        assert_eq!(
            LowEnergySetEventMask::build(&parameters(arguments.as_slice())),
            Err(expected)
        );
    }

    #[rstest]
    #[case(vec![], LowEnergyEventMask::empty())]
    #[case(vec![LowEnergyEvent::ConnectionComplete, LowEnergyEvent::AdvertisingReport], LowEnergyEventMask::from_bits_retain(0x03))]
    fn set_event_mask_execute(
        #[case] events: Vec<LowEnergyEvent>,
        #[case] expected: LowEnergyEventMask,
    ) {
        let mut controller = RecordingController::default();
        let command = LowEnergySetEventMask {
            events: BTreeSet::from_iter(events),
        };

        let (result, _) = execute(&command, &mut controller);

        assert_matches!(result, Ok(()));
        assert_eq!(controller.calls, vec![Call::LeSetEventMask(expected)]);
    }

    #[test]
    fn create_connection_build_defaults() {
        let parameters = parameters(&["lecreateconnection", "--address", "54:39:A3:47:D8:F0"]);

        assert_eq!(
            LowEnergyCreateConnection::build(&parameters),
            Ok(LowEnergyCreateConnection {
                parameters: LeConnectionParameters {
                    peer_address: PEER,
                    peer_address_type: AddressType::Public,
                    scan_interval: 0x0060,
                    scan_window: 0x0030,
                    connection_interval_min: 0x0018,
                    connection_interval_max: 0x0028,
                    latency: 0,
                    supervision_timeout: 0x0048,
                },
            })
        );
    }

    #[test]
    fn create_connection_build() {
        let parameters = parameters(&[
            "lecreateconnection",
            "--address",
            "54:39:A3:47:D8:F0",
            "--addresstype",
            "random",
            "--scaninterval",
            "0x0010",
            "--scanwindow",
            "0x0010",
            "--connintervalmin",
            "6",
            "--connintervalmax",
            "12",
            "--latency",
            "2",
            "--supervisiontimeout",
            "0x0C80",
        ]);

        assert_eq!(
            LowEnergyCreateConnection::build(&parameters),
            Ok(LowEnergyCreateConnection {
                parameters: LeConnectionParameters {
                    peer_address: PEER,
                    peer_address_type: AddressType::Random,
                    scan_interval: 0x0010,
                    scan_window: 0x0010,
                    connection_interval_min: 6,
                    connection_interval_max: 12,
                    latency: 2,
                    supervision_timeout: 0x0C80,
                },
            })
        );
    }

    #[test]
    fn create_connection_execute() {
        // Setup
        let mut controller = RecordingController::default();
        let command = LowEnergyCreateConnection::build(&parameters(&[
            "lecreateconnection",
            "--address",
            "54:39:A3:47:D8:F0",
        ]))
        .unwrap();

        // Execute
        let (result, output) = execute(&command, &mut controller);

        // Verify
        assert_matches!(result, Ok(()));
        assert_eq!(
            controller.calls,
            vec![Call::LeCreateConnection(command.parameters, TIMEOUT)]
        );
        assert_eq!(output, format!("Connection handle = {HANDLE}"));
    }

    #[test]
    fn create_connection_status_error() {
        let mut controller = RecordingController::failing_with(0x3E);
        let command = LowEnergyCreateConnection::build(&parameters(&[
            "lecreateconnection",
            "--address",
            "54:39:A3:47:D8:F0",
        ]))
        .unwrap();

        let (result, output) = execute(&command, &mut controller);

        assert_matches!(
            result,
            Err(ExecuteError::ControllerStatusError { operation: "Connection", status }) => {
                assert_eq!(status, ErrorCode::new(0x3E));
            }
        );
        assert_eq!(output, "Connection handle = 0x0040");
    }
}
