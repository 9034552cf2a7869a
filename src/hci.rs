//! Bluetooth HCI values exchanged with the controller.
//!
//! Only the parts needed to read them from the command line and to print them back are modelled here; the wire encoding belongs to the controller implementation.
use bitflags::bitflags;
use hcitool_builder::prelude::*;
use hcitool_builder::FromCommandLine;

/// The largest valid connection handle (Vol 4, Part E, Section 5.4.2).
const MAX_CONNECTION_HANDLE: u16 = 0x0EFF;

/// Identifies a connection between the controller and a remote device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionHandle(u16);

impl ConnectionHandle {
    /// Wrap a raw handle.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// The raw handle.
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// The handle as a `0x`-prefixed, zero padded hexadecimal string.
    pub fn to_hexadecimal(&self) -> String {
        format!("0x{:04X}", self.0)
    }
}

impl FromCommandLine for ConnectionHandle {
    fn from_command_line(token: &str) -> Option<Self> {
        u16::from_command_line(token)
            .filter(|value| *value <= MAX_CONNECTION_HANDLE)
            .map(ConnectionHandle)
    }
}

impl std::fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hexadecimal())
    }
}

/// An HCI error code (Vol 1, Part F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(u8);

const ERROR_NAMES: &[(u8, &str)] = &[
    (0x01, "Unknown HCI Command"),
    (0x02, "Unknown Connection Identifier"),
    (0x03, "Hardware Failure"),
    (0x04, "Page Timeout"),
    (0x05, "Authentication Failure"),
    (0x06, "PIN or Key Missing"),
    (0x07, "Memory Capacity Exceeded"),
    (0x08, "Connection Timeout"),
    (0x09, "Connection Limit Exceeded"),
    (0x0A, "Synchronous Connection Limit To A Device Exceeded"),
    (0x0B, "Connection Already Exists"),
    (0x0C, "Command Disallowed"),
    (0x0D, "Connection Rejected due to Limited Resources"),
    (0x0E, "Connection Rejected due to Security Reasons"),
    (0x0F, "Connection Rejected due to Unacceptable BD_ADDR"),
    (0x10, "Connection Accept Timeout Exceeded"),
    (0x11, "Unsupported Feature or Parameter Value"),
    (0x12, "Invalid HCI Command Parameters"),
    (0x13, "Remote User Terminated Connection"),
    (0x14, "Remote Device Terminated Connection due to Low Resources"),
    (0x15, "Remote Device Terminated Connection due to Power Off"),
    (0x16, "Connection Terminated by Local Host"),
    (0x17, "Repeated Attempts"),
    (0x18, "Pairing Not Allowed"),
    (0x19, "Unknown LMP PDU"),
    (0x1A, "Unsupported Remote Feature"),
    (0x1F, "Unspecified Error"),
    (0x22, "LMP Response Timeout"),
    (0x28, "Instant Passed"),
    (0x29, "Pairing With Unit Key Not Supported"),
    (0x3A, "Controller Busy"),
    (0x3B, "Unacceptable Connection Parameters"),
    (0x3C, "Advertising Timeout"),
    (0x3E, "Connection Failed to be Established"),
];

impl ErrorCode {
    /// Wrap a raw error code.
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// The raw error code.
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// The name given to this code by the Bluetooth Core error code table.
    pub fn name(&self) -> &'static str {
        ERROR_NAMES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
            .unwrap_or("Unknown Error")
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.0)
    }
}

/// The status reported by the controller for a completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation succeeded.
    Success,
    /// The operation failed with the given error.
    Error(ErrorCode),
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        match value {
            0 => Status::Success,
            code => Status::Error(ErrorCode(code)),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => write!(f, "Success"),
            Status::Error(error) => write!(f, "{error}"),
        }
    }
}

bitflags! {
    /// The ACL packet types which may be used for a BR/EDR connection (Vol 4, Part E, Section 7.1.5).
    ///
    /// The `NO_*` flags mark Enhanced Data Rate packet types which *shall not* be used.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PacketType: u16 {
        /// 2-DH1 may not be used.
        const NO_2_DH1 = 0x0002;
        /// 3-DH1 may not be used.
        const NO_3_DH1 = 0x0004;
        /// DM1 may be used.
        const DM1 = 0x0008;
        /// DH1 may be used.
        const DH1 = 0x0010;
        /// 2-DH3 may not be used.
        const NO_2_DH3 = 0x0100;
        /// 3-DH3 may not be used.
        const NO_3_DH3 = 0x0200;
        /// DM3 may be used.
        const DM3 = 0x0400;
        /// DH3 may be used.
        const DH3 = 0x0800;
        /// 2-DH5 may not be used.
        const NO_2_DH5 = 0x1000;
        /// 3-DH5 may not be used.
        const NO_3_DH5 = 0x2000;
        /// DM5 may be used.
        const DM5 = 0x4000;
        /// DH5 may be used.
        const DH5 = 0x8000;
    }
}

impl Keyword for PacketType {
    const KEYWORDS: &'static [(&'static str, Self)] = &[
        ("no2dh1", PacketType::NO_2_DH1),
        ("no3dh1", PacketType::NO_3_DH1),
        ("dm1", PacketType::DM1),
        ("dh1", PacketType::DH1),
        ("no2dh3", PacketType::NO_2_DH3),
        ("no3dh3", PacketType::NO_3_DH3),
        ("dm3", PacketType::DM3),
        ("dh3", PacketType::DH3),
        ("no2dh5", PacketType::NO_2_DH5),
        ("no3dh5", PacketType::NO_3_DH5),
        ("dm5", PacketType::DM5),
        ("dh5", PacketType::DH5),
    ];
}

impl Flag for PacketType {
    fn bits(&self) -> u64 {
        PacketType::bits(self) as u64
    }
}

impl FromCommandLine for PacketType {
    // Either the raw mask (taken as is), or a comma separated list of packet type names.
    fn from_command_line(token: &str) -> Option<Self> {
        u16::from_command_line(token)
            .or_else(|| parse_flag_list::<PacketType>(token).map(|mask| mask as u16))
            .map(PacketType::from_bits_retain)
    }
}

/// The page scan repetition mode of the remote device.
///
/// Any raw value is accepted: values beyond `R2` are kept as [`PageScanRepetitionMode::Reserved`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageScanRepetitionMode {
    /// R0
    R0,
    /// R1
    R1,
    /// R2
    R2,
    /// A value reserved for future use.
    Reserved(u8),
}

impl PageScanRepetitionMode {
    /// The raw mode.
    pub fn value(&self) -> u8 {
        match self {
            PageScanRepetitionMode::R0 => 0x00,
            PageScanRepetitionMode::R1 => 0x01,
            PageScanRepetitionMode::R2 => 0x02,
            PageScanRepetitionMode::Reserved(value) => *value,
        }
    }
}

impl From<u8> for PageScanRepetitionMode {
    fn from(value: u8) -> Self {
        match value {
            0x00 => PageScanRepetitionMode::R0,
            0x01 => PageScanRepetitionMode::R1,
            0x02 => PageScanRepetitionMode::R2,
            other => PageScanRepetitionMode::Reserved(other),
        }
    }
}

impl FromCommandLine for PageScanRepetitionMode {
    fn from_command_line(token: &str) -> Option<Self> {
        u8::from_command_line(token).map(PageScanRepetitionMode::from)
    }
}

impl std::fmt::Display for PageScanRepetitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageScanRepetitionMode::Reserved(value) => write!(f, "Reserved (0x{value:02X})"),
            mode => write!(f, "{mode:?}"),
        }
    }
}

/// The clock offset between the local and remote device.
///
/// Bits 0-14 carry the offset; bit 15 flags whether the offset is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClockOffset(u16);

const CLOCK_OFFSET_VALID: u16 = 0x8000;

impl ClockOffset {
    /// Wrap a raw clock offset.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// The raw value, including the valid flag.
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Whether the valid flag is set.
    pub const fn is_valid(&self) -> bool {
        self.0 & CLOCK_OFFSET_VALID != 0
    }

    /// The offset, without the valid flag.
    pub const fn offset(&self) -> u16 {
        self.0 & !CLOCK_OFFSET_VALID
    }
}

impl FromCommandLine for ClockOffset {
    fn from_command_line(token: &str) -> Option<Self> {
        u16::from_command_line(token).map(ClockOffset)
    }
}

/// Whether the local device accepts a role switch during connection.
///
/// Unlike the page scan repetition mode, unknown raw values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowRoleSwitch {
    /// The local device stays central.
    Disallowed = 0x00,
    /// The local device may become peripheral.
    Allowed = 0x01,
}

impl TryFrom<u8> for AllowRoleSwitch {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x00 => Ok(AllowRoleSwitch::Disallowed),
            0x01 => Ok(AllowRoleSwitch::Allowed),
            other => Err(other),
        }
    }
}

impl FromCommandLine for AllowRoleSwitch {
    fn from_command_line(token: &str) -> Option<Self> {
        u8::from_command_line(token).and_then(|value| AllowRoleSwitch::try_from(value).ok())
    }
}

/// The type of a device address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressType {
    /// A public device address.
    #[default]
    Public = 0x00,
    /// A random device address.
    Random = 0x01,
}

impl Keyword for AddressType {
    const KEYWORDS: &'static [(&'static str, Self)] = &[
        ("public", AddressType::Public),
        ("random", AddressType::Random),
    ];
}

impl FromCommandLine for AddressType {
    // Either the keyword, or its raw value.
    fn from_command_line(token: &str) -> Option<Self> {
        AddressType::from_keyword(token).or_else(|| match u8::from_command_line(token)? {
            0x00 => Some(AddressType::Public),
            0x01 => Some(AddressType::Random),
            _ => None,
        })
    }
}

impl std::fmt::Display for AddressType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("unknown"))
    }
}

/// The reasons permitted when terminating a connection (Vol 4, Part E, Section 7.1.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisconnectReason {
    /// Authentication Failure
    AuthenticationFailure = 0x05,
    /// Remote User Terminated Connection
    RemoteUserTerminated = 0x13,
    /// Remote Device Terminated Connection due to Low Resources
    RemoteLowResources = 0x14,
    /// Remote Device Terminated Connection due to Power Off
    RemotePowerOff = 0x15,
    /// Unsupported Remote Feature
    UnsupportedRemoteFeature = 0x1A,
    /// Pairing With Unit Key Not Supported
    PairingWithUnitKeyNotSupported = 0x29,
    /// Unacceptable Connection Parameters
    UnacceptableConnectionParameters = 0x3B,
}

impl DisconnectReason {
    /// The reason as an error code.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode(*self as u8)
    }
}

impl TryFrom<u8> for DisconnectReason {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x05 => Ok(DisconnectReason::AuthenticationFailure),
            0x13 => Ok(DisconnectReason::RemoteUserTerminated),
            0x14 => Ok(DisconnectReason::RemoteLowResources),
            0x15 => Ok(DisconnectReason::RemotePowerOff),
            0x1A => Ok(DisconnectReason::UnsupportedRemoteFeature),
            0x29 => Ok(DisconnectReason::PairingWithUnitKeyNotSupported),
            0x3B => Ok(DisconnectReason::UnacceptableConnectionParameters),
            other => Err(other),
        }
    }
}

impl FromCommandLine for DisconnectReason {
    fn from_command_line(token: &str) -> Option<Self> {
        u8::from_command_line(token).and_then(|value| DisconnectReason::try_from(value).ok())
    }
}

/// An LE meta event which may be enabled via the LE event mask (Vol 4, Part E, Section 7.8.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LowEnergyEvent {
    /// LE Connection Complete
    ConnectionComplete,
    /// LE Advertising Report
    AdvertisingReport,
    /// LE Connection Update Complete
    ConnectionUpdateComplete,
    /// LE Read Remote Features Complete
    ReadRemoteFeaturesComplete,
    /// LE Long Term Key Request
    LongTermKeyRequest,
    /// LE Remote Connection Parameter Request
    RemoteConnectionParameterRequest,
    /// LE Data Length Change
    DataLengthChange,
    /// LE Read Local P-256 Public Key Complete
    ReadLocalP256PublicKeyComplete,
    /// LE Generate DHKey Complete
    GenerateDhKeyComplete,
    /// LE Enhanced Connection Complete
    EnhancedConnectionComplete,
    /// LE Directed Advertising Report
    DirectedAdvertisingReport,
    /// LE PHY Update Complete
    PhyUpdateComplete,
    /// LE Extended Advertising Report
    ExtendedAdvertisingReport,
}

impl Keyword for LowEnergyEvent {
    const KEYWORDS: &'static [(&'static str, Self)] = &[
        ("connectioncomplete", LowEnergyEvent::ConnectionComplete),
        ("advertisingreport", LowEnergyEvent::AdvertisingReport),
        ("connectionupdatecomplete", LowEnergyEvent::ConnectionUpdateComplete),
        ("readremotefeaturescomplete", LowEnergyEvent::ReadRemoteFeaturesComplete),
        ("longtermkeyrequest", LowEnergyEvent::LongTermKeyRequest),
        ("remoteconnectionparameterrequest", LowEnergyEvent::RemoteConnectionParameterRequest),
        ("datalengthchange", LowEnergyEvent::DataLengthChange),
        ("readlocalp256publickeycomplete", LowEnergyEvent::ReadLocalP256PublicKeyComplete),
        ("generatedhkeycomplete", LowEnergyEvent::GenerateDhKeyComplete),
        ("enhancedconnectioncomplete", LowEnergyEvent::EnhancedConnectionComplete),
        ("directedadvertisingreport", LowEnergyEvent::DirectedAdvertisingReport),
        ("phyupdatecomplete", LowEnergyEvent::PhyUpdateComplete),
        ("extendedadvertisingreport", LowEnergyEvent::ExtendedAdvertisingReport),
    ];
}

impl Flag for LowEnergyEvent {
    fn bits(&self) -> u64 {
        1 << (*self as u64)
    }
}

impl FromCommandLine for LowEnergyEvent {
    fn from_command_line(token: &str) -> Option<Self> {
        LowEnergyEvent::from_keyword(token)
    }
}

bitflags! {
    /// The LE event mask: which LE meta events the controller reports.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LowEnergyEventMask: u64 {
        /// LE Connection Complete
        const CONNECTION_COMPLETE = 1 << 0;
        /// LE Advertising Report
        const ADVERTISING_REPORT = 1 << 1;
        /// LE Connection Update Complete
        const CONNECTION_UPDATE_COMPLETE = 1 << 2;
        /// LE Read Remote Features Complete
        const READ_REMOTE_FEATURES_COMPLETE = 1 << 3;
        /// LE Long Term Key Request
        const LONG_TERM_KEY_REQUEST = 1 << 4;
        /// LE Remote Connection Parameter Request
        const REMOTE_CONNECTION_PARAMETER_REQUEST = 1 << 5;
        /// LE Data Length Change
        const DATA_LENGTH_CHANGE = 1 << 6;
        /// LE Read Local P-256 Public Key Complete
        const READ_LOCAL_P256_PUBLIC_KEY_COMPLETE = 1 << 7;
        /// LE Generate DHKey Complete
        const GENERATE_DHKEY_COMPLETE = 1 << 8;
        /// LE Enhanced Connection Complete
        const ENHANCED_CONNECTION_COMPLETE = 1 << 9;
        /// LE Directed Advertising Report
        const DIRECTED_ADVERTISING_REPORT = 1 << 10;
        /// LE PHY Update Complete
        const PHY_UPDATE_COMPLETE = 1 << 11;
        /// LE Extended Advertising Report
        const EXTENDED_ADVERTISING_REPORT = 1 << 12;
    }
}

impl FromIterator<LowEnergyEvent> for LowEnergyEventMask {
    fn from_iter<I: IntoIterator<Item = LowEnergyEvent>>(iter: I) -> Self {
        iter.into_iter()
            .fold(LowEnergyEventMask::empty(), |mask, event| {
                mask | LowEnergyEventMask::from_bits_retain(event.bits())
            })
    }
}

bitflags! {
    /// The LMP features of a BR/EDR controller (Vol 2, Part C, Section 3.3).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LmpFeatures: u64 {
        /// 3-slot packets
        const THREE_SLOT_PACKETS = 1 << 0;
        /// 5-slot packets
        const FIVE_SLOT_PACKETS = 1 << 1;
        /// Encryption
        const ENCRYPTION = 1 << 2;
        /// Slot offset
        const SLOT_OFFSET = 1 << 3;
        /// Timing accuracy
        const TIMING_ACCURACY = 1 << 4;
        /// Role switch
        const ROLE_SWITCH = 1 << 5;
        /// Hold mode
        const HOLD_MODE = 1 << 6;
        /// Sniff mode
        const SNIFF_MODE = 1 << 7;
        /// Power control requests
        const POWER_CONTROL_REQUESTS = 1 << 9;
        /// Channel quality driven data rate
        const CHANNEL_QUALITY_DRIVEN_DATA_RATE = 1 << 10;
        /// SCO link
        const SCO_LINK = 1 << 11;
        /// HV2 packets
        const HV2_PACKETS = 1 << 12;
        /// HV3 packets
        const HV3_PACKETS = 1 << 13;
        /// u-law log synchronous data
        const MU_LAW_LOG_SYNCHRONOUS_DATA = 1 << 14;
        /// A-law log synchronous data
        const A_LAW_LOG_SYNCHRONOUS_DATA = 1 << 15;
        /// CVSD synchronous data
        const CVSD_SYNCHRONOUS_DATA = 1 << 16;
        /// Paging parameter negotiation
        const PAGING_PARAMETER_NEGOTIATION = 1 << 17;
        /// Power control
        const POWER_CONTROL = 1 << 18;
        /// Transparent synchronous data
        const TRANSPARENT_SYNCHRONOUS_DATA = 1 << 19;
        /// Broadcast encryption
        const BROADCAST_ENCRYPTION = 1 << 23;
        /// Enhanced Data Rate ACL 2 Mb/s mode
        const EDR_ACL_2_MBPS = 1 << 25;
        /// Enhanced Data Rate ACL 3 Mb/s mode
        const EDR_ACL_3_MBPS = 1 << 26;
        /// Enhanced inquiry scan
        const ENHANCED_INQUIRY_SCAN = 1 << 27;
        /// Interlaced inquiry scan
        const INTERLACED_INQUIRY_SCAN = 1 << 28;
        /// Interlaced page scan
        const INTERLACED_PAGE_SCAN = 1 << 29;
        /// RSSI with inquiry results
        const RSSI_WITH_INQUIRY_RESULTS = 1 << 30;
        /// Extended SCO link (EV3 packets)
        const EXTENDED_SCO_LINK = 1 << 31;
        /// EV4 packets
        const EV4_PACKETS = 1 << 32;
        /// EV5 packets
        const EV5_PACKETS = 1 << 33;
        /// AFH capable peripheral
        const AFH_CAPABLE_PERIPHERAL = 1 << 35;
        /// AFH classification peripheral
        const AFH_CLASSIFICATION_PERIPHERAL = 1 << 36;
        /// BR/EDR not supported
        const BR_EDR_NOT_SUPPORTED = 1 << 37;
        /// LE supported (controller)
        const LE_SUPPORTED = 1 << 38;
        /// Sniff subrating
        const SNIFF_SUBRATING = 1 << 41;
        /// Pause encryption
        const PAUSE_ENCRYPTION = 1 << 42;
        /// Extended inquiry response
        const EXTENDED_INQUIRY_RESPONSE = 1 << 48;
        /// Simultaneous LE and BR/EDR to same device capable (controller)
        const SIMULTANEOUS_LE_AND_BR_EDR = 1 << 49;
        /// Secure simple pairing
        const SECURE_SIMPLE_PAIRING = 1 << 51;
        /// Encapsulated PDU
        const ENCAPSULATED_PDU = 1 << 52;
        /// Erroneous data reporting
        const ERRONEOUS_DATA_REPORTING = 1 << 53;
        /// Non-flushable packet boundary flag
        const NON_FLUSHABLE_PACKET_BOUNDARY_FLAG = 1 << 54;
        /// Link supervision timeout changed event
        const LINK_SUPERVISION_TIMEOUT_CHANGED_EVENT = 1 << 56;
        /// Inquiry TX power level
        const INQUIRY_TX_POWER_LEVEL = 1 << 57;
        /// Enhanced power control
        const ENHANCED_POWER_CONTROL = 1 << 58;
        /// Extended features
        const EXTENDED_FEATURES = 1 << 63;
    }
}

const LMP_FEATURE_NAMES: &[(LmpFeatures, &str)] = &[
    (LmpFeatures::THREE_SLOT_PACKETS, "3 slot packets"),
    (LmpFeatures::FIVE_SLOT_PACKETS, "5 slot packets"),
    (LmpFeatures::ENCRYPTION, "Encryption"),
    (LmpFeatures::SLOT_OFFSET, "Slot offset"),
    (LmpFeatures::TIMING_ACCURACY, "Timing accuracy"),
    (LmpFeatures::ROLE_SWITCH, "Role switch"),
    (LmpFeatures::HOLD_MODE, "Hold mode"),
    (LmpFeatures::SNIFF_MODE, "Sniff mode"),
    (LmpFeatures::POWER_CONTROL_REQUESTS, "Power control requests"),
    (LmpFeatures::CHANNEL_QUALITY_DRIVEN_DATA_RATE, "Channel quality driven data rate (CQDDR)"),
    (LmpFeatures::SCO_LINK, "SCO link"),
    (LmpFeatures::HV2_PACKETS, "HV2 packets"),
    (LmpFeatures::HV3_PACKETS, "HV3 packets"),
    (LmpFeatures::MU_LAW_LOG_SYNCHRONOUS_DATA, "u-law log synchronous data"),
    (LmpFeatures::A_LAW_LOG_SYNCHRONOUS_DATA, "A-law log synchronous data"),
    (LmpFeatures::CVSD_SYNCHRONOUS_DATA, "CVSD synchronous data"),
    (LmpFeatures::PAGING_PARAMETER_NEGOTIATION, "Paging parameter negotiation"),
    (LmpFeatures::POWER_CONTROL, "Power control"),
    (LmpFeatures::TRANSPARENT_SYNCHRONOUS_DATA, "Transparent synchronous data"),
    (LmpFeatures::BROADCAST_ENCRYPTION, "Broadcast Encryption"),
    (LmpFeatures::EDR_ACL_2_MBPS, "Enhanced Data Rate ACL 2 Mb/s mode"),
    (LmpFeatures::EDR_ACL_3_MBPS, "Enhanced Data Rate ACL 3 Mb/s mode"),
    (LmpFeatures::ENHANCED_INQUIRY_SCAN, "Enhanced inquiry scan"),
    (LmpFeatures::INTERLACED_INQUIRY_SCAN, "Interlaced inquiry scan"),
    (LmpFeatures::INTERLACED_PAGE_SCAN, "Interlaced page scan"),
    (LmpFeatures::RSSI_WITH_INQUIRY_RESULTS, "RSSI with inquiry results"),
    (LmpFeatures::EXTENDED_SCO_LINK, "Extended SCO link (EV3 packets)"),
    (LmpFeatures::EV4_PACKETS, "EV4 packets"),
    (LmpFeatures::EV5_PACKETS, "EV5 packets"),
    (LmpFeatures::AFH_CAPABLE_PERIPHERAL, "AFH capable peripheral"),
    (LmpFeatures::AFH_CLASSIFICATION_PERIPHERAL, "AFH classification peripheral"),
    (LmpFeatures::BR_EDR_NOT_SUPPORTED, "BR/EDR Not Supported"),
    (LmpFeatures::LE_SUPPORTED, "LE Supported (Controller)"),
    (LmpFeatures::SNIFF_SUBRATING, "Sniff subrating"),
    (LmpFeatures::PAUSE_ENCRYPTION, "Pause encryption"),
    (LmpFeatures::EXTENDED_INQUIRY_RESPONSE, "Extended Inquiry Response"),
    (LmpFeatures::SIMULTANEOUS_LE_AND_BR_EDR, "Simultaneous LE and BR/EDR to Same Device Capable (Controller)"),
    (LmpFeatures::SECURE_SIMPLE_PAIRING, "Secure Simple Pairing"),
    (LmpFeatures::ENCAPSULATED_PDU, "Encapsulated PDU"),
    (LmpFeatures::ERRONEOUS_DATA_REPORTING, "Erroneous Data Reporting"),
    (LmpFeatures::NON_FLUSHABLE_PACKET_BOUNDARY_FLAG, "Non-flushable Packet Boundary Flag"),
    (LmpFeatures::LINK_SUPERVISION_TIMEOUT_CHANGED_EVENT, "Link Supervision Timeout Changed Event"),
    (LmpFeatures::INQUIRY_TX_POWER_LEVEL, "Inquiry TX Power Level"),
    (LmpFeatures::ENHANCED_POWER_CONTROL, "Enhanced Power Control"),
    (LmpFeatures::EXTENDED_FEATURES, "Extended features"),
];

impl LmpFeatures {
    /// The human readable names of the contained features, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        LMP_FEATURE_NAMES
            .iter()
            .filter(move |(feature, _)| self.contains(*feature))
            .map(|(_, name)| *name)
    }
}

bitflags! {
    /// The LE features of a controller (Vol 6, Part B, Section 4.6).
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LeFeatures: u64 {
        /// LE Encryption
        const ENCRYPTION = 1 << 0;
        /// Connection Parameters Request Procedure
        const CONNECTION_PARAMETERS_REQUEST_PROCEDURE = 1 << 1;
        /// Extended Reject Indication
        const EXTENDED_REJECT_INDICATION = 1 << 2;
        /// Peripheral-initiated Features Exchange
        const PERIPHERAL_INITIATED_FEATURES_EXCHANGE = 1 << 3;
        /// LE Ping
        const PING = 1 << 4;
        /// LE Data Packet Length Extension
        const DATA_PACKET_LENGTH_EXTENSION = 1 << 5;
        /// LL Privacy
        const LL_PRIVACY = 1 << 6;
        /// Extended Scanner Filter Policies
        const EXTENDED_SCANNER_FILTER_POLICIES = 1 << 7;
        /// LE 2M PHY
        const PHY_2M = 1 << 8;
        /// Stable Modulation Index - Transmitter
        const STABLE_MODULATION_INDEX_TX = 1 << 9;
        /// Stable Modulation Index - Receiver
        const STABLE_MODULATION_INDEX_RX = 1 << 10;
        /// LE Coded PHY
        const CODED_PHY = 1 << 11;
        /// LE Extended Advertising
        const EXTENDED_ADVERTISING = 1 << 12;
        /// LE Periodic Advertising
        const PERIODIC_ADVERTISING = 1 << 13;
        /// Channel Selection Algorithm #2
        const CHANNEL_SELECTION_ALGORITHM_2 = 1 << 14;
        /// LE Power Class 1
        const POWER_CLASS_1 = 1 << 15;
        /// Minimum Number of Used Channels Procedure
        const MINIMUM_NUMBER_OF_USED_CHANNELS_PROCEDURE = 1 << 16;
    }
}

const LE_FEATURE_NAMES: &[(LeFeatures, &str)] = &[
    (LeFeatures::ENCRYPTION, "LE Encryption"),
    (LeFeatures::CONNECTION_PARAMETERS_REQUEST_PROCEDURE, "Connection Parameters Request Procedure"),
    (LeFeatures::EXTENDED_REJECT_INDICATION, "Extended Reject Indication"),
    (LeFeatures::PERIPHERAL_INITIATED_FEATURES_EXCHANGE, "Peripheral-initiated Features Exchange"),
    (LeFeatures::PING, "LE Ping"),
    (LeFeatures::DATA_PACKET_LENGTH_EXTENSION, "LE Data Packet Length Extension"),
    (LeFeatures::LL_PRIVACY, "LL Privacy"),
    (LeFeatures::EXTENDED_SCANNER_FILTER_POLICIES, "Extended Scanner Filter Policies"),
    (LeFeatures::PHY_2M, "LE 2M PHY"),
    (LeFeatures::STABLE_MODULATION_INDEX_TX, "Stable Modulation Index - Transmitter"),
    (LeFeatures::STABLE_MODULATION_INDEX_RX, "Stable Modulation Index - Receiver"),
    (LeFeatures::CODED_PHY, "LE Coded PHY"),
    (LeFeatures::EXTENDED_ADVERTISING, "LE Extended Advertising"),
    (LeFeatures::PERIODIC_ADVERTISING, "LE Periodic Advertising"),
    (LeFeatures::CHANNEL_SELECTION_ALGORITHM_2, "Channel Selection Algorithm #2"),
    (LeFeatures::POWER_CLASS_1, "LE Power Class 1"),
    (LeFeatures::MINIMUM_NUMBER_OF_USED_CHANNELS_PROCEDURE, "Minimum Number of Used Channels Procedure"),
];

impl LeFeatures {
    /// The human readable names of the contained features, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        LE_FEATURE_NAMES
            .iter()
            .filter(move |(feature, _)| self.contains(*feature))
            .map(|(_, name)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeSet;

    #[rstest]
    #[case("0x0040", Some(ConnectionHandle(0x40)))]
    #[case("64", Some(ConnectionHandle(0x40)))]
    #[case("0x0EFF", Some(ConnectionHandle(0x0EFF)))]
    #[case("0x0F00", None)]
    #[case("handle", None)]
    fn connection_handle(#[case] token: &str, #[case] expected: Option<ConnectionHandle>) {
        assert_eq!(ConnectionHandle::from_command_line(token), expected);
    }

    #[test]
    fn connection_handle_display() {
        assert_eq!(ConnectionHandle::new(0x40).to_hexadecimal(), "0x0040");
        assert_eq!(ConnectionHandle::new(0x0EFF).to_string(), "0x0EFF");
    }

    #[rstest]
    #[case(0x00, "Success")]
    #[case(0x04, "Page Timeout (0x04)")]
    #[case(0x3E, "Connection Failed to be Established (0x3E)")]
    #[case(0x7F, "Unknown Error (0x7F)")]
    fn status(#[case] raw: u8, #[case] expected: &str) {
        assert_eq!(Status::from(raw).to_string(), expected);
    }

    #[rstest]
    #[case("0xCC18", Some(0xCC18))]
    #[case("52248", Some(0xCC18))]
    #[case("dm1", Some(0x0008))]
    #[case("DM1,DH1,dm3,dh3,dm5,dh5", Some(0xCC18))]
    #[case("no2dh1,no3dh1", Some(0x0006))]
    #[case("dm1,dh2", None)]
    #[case("0x10000", None)]
    #[case("", None)]
    fn packet_type(#[case] token: &str, #[case] expected: Option<u16>) {
        assert_eq!(
            PacketType::from_command_line(token).map(|p| p.bits()),
            expected
        );
    }

    #[rstest]
    #[case("0", PageScanRepetitionMode::R0)]
    #[case("1", PageScanRepetitionMode::R1)]
    #[case("0x02", PageScanRepetitionMode::R2)]
    #[case("3", PageScanRepetitionMode::Reserved(3))]
    #[case("0xFF", PageScanRepetitionMode::Reserved(0xFF))]
    fn page_scan_repetition_mode_unchecked(
        #[case] token: &str,
        #[case] expected: PageScanRepetitionMode,
    ) {
        let mode = PageScanRepetitionMode::from_command_line(token).unwrap();
        assert_eq!(mode, expected);
        assert_eq!(PageScanRepetitionMode::from(mode.value()), mode);
    }

    #[test]
    fn page_scan_repetition_mode_unparsable() {
        assert_eq!(PageScanRepetitionMode::from_command_line("256"), None);
        assert_eq!(PageScanRepetitionMode::from_command_line("r1"), None);
    }

    #[rstest]
    #[case("0", Some(AllowRoleSwitch::Disallowed))]
    #[case("1", Some(AllowRoleSwitch::Allowed))]
    #[case("0x01", Some(AllowRoleSwitch::Allowed))]
    #[case("2", None)]
    #[case("yes", None)]
    fn allow_role_switch_checked(#[case] token: &str, #[case] expected: Option<AllowRoleSwitch>) {
        assert_eq!(AllowRoleSwitch::from_command_line(token), expected);
    }

    #[test]
    fn clock_offset() {
        let offset = ClockOffset::from_command_line("0x8123").unwrap();
        assert!(offset.is_valid());
        assert_eq!(offset.offset(), 0x0123);
        assert_eq!(offset.value(), 0x8123);

        let offset = ClockOffset::from_command_line("0").unwrap();
        assert!(!offset.is_valid());
        assert_eq!(ClockOffset::from_command_line("0x10000"), None);
    }

    #[rstest]
    #[case("public", Some(AddressType::Public))]
    #[case("Random", Some(AddressType::Random))]
    #[case("0", Some(AddressType::Public))]
    #[case("0x01", Some(AddressType::Random))]
    #[case("2", None)]
    #[case("static", None)]
    fn address_type(#[case] token: &str, #[case] expected: Option<AddressType>) {
        assert_eq!(AddressType::from_command_line(token), expected);
    }

    #[rstest]
    #[case("0x13", Some(DisconnectReason::RemoteUserTerminated))]
    #[case("19", Some(DisconnectReason::RemoteUserTerminated))]
    #[case("0x3B", Some(DisconnectReason::UnacceptableConnectionParameters))]
    #[case("0x00", None)]
    #[case("0x16", None)]
    fn disconnect_reason(#[case] token: &str, #[case] expected: Option<DisconnectReason>) {
        assert_eq!(DisconnectReason::from_command_line(token), expected);
    }

    #[test]
    fn disconnect_reason_error_code() {
        assert_eq!(
            DisconnectReason::RemotePowerOff.error_code().name(),
            "Remote Device Terminated Connection due to Power Off"
        );
    }

    #[rstest]
    #[case("connectioncomplete", Some(LowEnergyEvent::ConnectionComplete))]
    #[case("AdvertisingReport", Some(LowEnergyEvent::AdvertisingReport))]
    #[case("extendedadvertisingreport", Some(LowEnergyEvent::ExtendedAdvertisingReport))]
    #[case("connection", None)]
    #[case("0x01", None)]
    fn low_energy_event(#[case] token: &str, #[case] expected: Option<LowEnergyEvent>) {
        assert_eq!(LowEnergyEvent::from_command_line(token), expected);
    }

    #[test]
    fn low_energy_event_mask() {
        let events = BTreeSet::from([
            LowEnergyEvent::ConnectionComplete,
            LowEnergyEvent::AdvertisingReport,
            LowEnergyEvent::PhyUpdateComplete,
        ]);
        let mask: LowEnergyEventMask = events.into_iter().collect();

        assert_eq!(
            mask,
            LowEnergyEventMask::CONNECTION_COMPLETE
                | LowEnergyEventMask::ADVERTISING_REPORT
                | LowEnergyEventMask::PHY_UPDATE_COMPLETE
        );
        assert_eq!(
            std::iter::empty::<LowEnergyEvent>().collect::<LowEnergyEventMask>(),
            LowEnergyEventMask::empty()
        );
    }

    #[test]
    fn event_keywords_match_mask() {
        for (_, event) in LowEnergyEvent::KEYWORDS {
            assert!(LowEnergyEventMask::from_bits(event.bits()).is_some());
        }
    }

    #[test]
    fn feature_names() {
        let features = LeFeatures::from_bits_retain(0x3F);
        assert_eq!(
            features.names().collect::<Vec<_>>(),
            vec![
                "LE Encryption",
                "Connection Parameters Request Procedure",
                "Extended Reject Indication",
                "Peripheral-initiated Features Exchange",
                "LE Ping",
                "LE Data Packet Length Extension",
            ]
        );

        let features = LmpFeatures::ENCRYPTION | LmpFeatures::EXTENDED_FEATURES;
        assert_eq!(
            features.names().collect::<Vec<_>>(),
            vec!["Encryption", "Extended features"]
        );
        assert_eq!(LmpFeatures::empty().names().count(), 0);
    }
}
