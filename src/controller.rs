//! The operations a Bluetooth controller must offer to execute commands.
use std::time::Duration;

use hcitool_builder::Address;

use crate::hci::{
    AddressType, AllowRoleSwitch, ClockOffset, ConnectionHandle, DisconnectReason, ErrorCode,
    LeFeatures, LmpFeatures, LowEnergyEventMask, PacketType, PageScanRepetitionMode, Status,
};

/// A device seen while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisingReport {
    /// The advertiser's address.
    pub address: Address,
    /// The type of the advertiser's address.
    pub address_type: AddressType,
    /// Received signal strength, in dBm.
    pub rssi: i8,
    /// The raw advertising data.
    pub data: Vec<u8>,
}

/// The LE ACL buffer capacity of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeBufferSize {
    /// The maximum length of an LE ACL data packet, in bytes.
    pub data_packet_length: u16,
    /// The number of LE ACL data packets the controller can hold.
    pub data_packet_count: u8,
}

/// Parameters of an LE connection request.
///
/// Intervals and timeouts are in the controller's units (0.625 ms for scanning, 1.25 ms for the connection interval, 10 ms for the supervision timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeConnectionParameters {
    /// The peer to connect to.
    pub peer_address: Address,
    /// The type of the peer's address.
    pub peer_address_type: AddressType,
    /// The LE scan interval.
    pub scan_interval: u16,
    /// The LE scan window.
    pub scan_window: u16,
    /// The minimum connection interval.
    pub connection_interval_min: u16,
    /// The maximum connection interval.
    pub connection_interval_max: u16,
    /// The peripheral latency, in connection events.
    pub latency: u16,
    /// The supervision timeout.
    pub supervision_timeout: u16,
}

/// The outcome of an LE connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeConnectionComplete {
    /// Whether the connection was established.
    pub status: Status,
    /// The new connection.
    pub handle: ConnectionHandle,
    /// The connected peer.
    pub peer_address: Address,
    /// The connection interval in use.
    pub interval: u16,
}

/// The outcome of a BR/EDR connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionComplete {
    /// Whether the connection was established.
    pub status: Status,
    /// The new connection.
    pub handle: ConnectionHandle,
    /// The connected peer.
    pub address: Address,
    /// Whether link level encryption is enabled.
    pub encryption_enabled: bool,
}

/// The outcome of a disconnection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisconnectionComplete {
    /// Whether the connection was terminated.
    pub status: Status,
    /// The terminated connection.
    pub handle: ConnectionHandle,
    /// Why the connection was terminated.
    pub reason: ErrorCode,
}

/// The versions reported by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVersionInformation {
    /// HCI version.
    pub hci_version: u8,
    /// HCI revision.
    pub hci_revision: u16,
    /// LMP version.
    pub lmp_version: u8,
    /// Company identifier of the manufacturer.
    pub manufacturer: u16,
    /// LMP subversion.
    pub lmp_subversion: u16,
}

/// A device which answered an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InquiryResult {
    /// The device's address.
    pub address: Address,
    /// The device's page scan repetition mode.
    pub page_scan_repetition_mode: PageScanRepetitionMode,
    /// The device's class of device (24 bits).
    pub class_of_device: u32,
    /// The clock offset to the device.
    pub clock_offset: ClockOffset,
}

/// The capability set required of a controller.
///
/// Each method issues one HCI command and blocks until it completes.
/// `Err` is reserved for failures to talk to the controller at all; a command the controller answered with an error status is reported through the returned value's `status` field where the response carries one.
/// Methods taking a `timeout` wait at most that long for their completion event.
pub trait HostController {
    /// The failure to complete an operation.
    type Error: std::error::Error + 'static;

    /// Scan for advertising devices for `duration`.
    fn le_scan(
        &mut self,
        duration: Duration,
        filter_duplicates: bool,
    ) -> Result<Vec<AdvertisingReport>, Self::Error>;

    /// Set the LE random device address.
    fn le_set_random_address(&mut self, address: Address) -> Result<(), Self::Error>;

    /// Clear the LE white list.
    fn le_clear_white_list(&mut self) -> Result<(), Self::Error>;

    /// Add a device to the LE white list.
    fn le_add_device_to_white_list(
        &mut self,
        address_type: AddressType,
        address: Address,
    ) -> Result<(), Self::Error>;

    /// Remove a device from the LE white list.
    fn le_remove_device_from_white_list(
        &mut self,
        address_type: AddressType,
        address: Address,
    ) -> Result<(), Self::Error>;

    /// Cancel a pending LE connection request.
    fn le_create_connection_cancel(&mut self) -> Result<(), Self::Error>;

    /// Read the LE features supported by the controller.
    fn le_read_local_supported_features(&mut self) -> Result<LeFeatures, Self::Error>;

    /// Read the LE ACL buffer capacity.
    fn le_read_buffer_size(&mut self) -> Result<LeBufferSize, Self::Error>;

    /// Set which LE meta events are reported.
    fn le_set_event_mask(&mut self, mask: LowEnergyEventMask) -> Result<(), Self::Error>;

    /// Connect to an LE peer.
    fn le_create_connection(
        &mut self,
        parameters: LeConnectionParameters,
        timeout: Duration,
    ) -> Result<LeConnectionComplete, Self::Error>;

    /// Connect to a BR/EDR device.
    fn create_connection(
        &mut self,
        address: Address,
        packet_type: PacketType,
        page_scan_repetition_mode: PageScanRepetitionMode,
        clock_offset: ClockOffset,
        allow_role_switch: AllowRoleSwitch,
        timeout: Duration,
    ) -> Result<ConnectionComplete, Self::Error>;

    /// Read one page of the remote device's LMP features over an established connection.
    fn read_remote_extended_features(
        &mut self,
        handle: ConnectionHandle,
        page_number: u8,
        timeout: Duration,
    ) -> Result<LmpFeatures, Self::Error>;

    /// Terminate a connection.
    fn disconnect(
        &mut self,
        handle: ConnectionHandle,
        reason: DisconnectReason,
        timeout: Duration,
    ) -> Result<DisconnectionComplete, Self::Error>;

    /// Read the controller's user friendly name.
    fn read_local_name(&mut self) -> Result<String, Self::Error>;

    /// Change the controller's user friendly name.
    fn write_local_name(&mut self, name: &str) -> Result<(), Self::Error>;

    /// Read the controller's public device address.
    fn read_device_address(&mut self) -> Result<Address, Self::Error>;

    /// Read the controller's version information.
    fn read_local_version_information(&mut self) -> Result<LocalVersionInformation, Self::Error>;

    /// Discover nearby BR/EDR devices.
    ///
    /// `length` is in units of 1.28 s; `responses` of 0 means unlimited.
    fn inquiry(
        &mut self,
        length: u8,
        responses: u8,
        timeout: Duration,
    ) -> Result<Vec<InquiryResult>, Self::Error>;
}
