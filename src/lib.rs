//! `hcitool` issues Bluetooth HCI commands to a local controller from the command line.
//!
//! An invocation names one command followed by its options:
//! ```console
//! $ hcitool setrandomaddress --address 54:39:A3:47:D8:F0
//! $ hcitool lescan --duration 5000 --filterduplicates
//! $ hcitool seteventmask --event connectioncomplete --event advertisingreport
//! ```
//!
//! Arguments are built into a strongly-typed [`Command`] (see [`Command::from_arguments`]).
//! Building is all-or-nothing: any missing or invalid option fails with a [`BuildError`] and nothing reaches the controller.
//! A [`Dispatcher`] then executes the command against any [`HostController`], printing the decoded response.
//!
//! The transport (opening the device, encoding packets, awaiting events) is left to the [`HostController`] implementation.
//!
//! # Options
//! Options are spelt `--name value` or `--name=value`.
//! Command and option names are case-insensitive.
//! Integers may be given in decimal (`64`) or hexadecimal (`0x40`).
//! Addresses are six colon separated hexadecimal octets (`54:39:A3:47:D8:F0`).
//!
//! Options a command does not declare are ignored, unless configured otherwise via [`Settings::unknown_options`]:
//! ```
//! # use hcitool::{BuildError, Command, UnknownOptions};
//! assert!(Command::from_arguments(&["lescan", "--moot", "1"]).is_ok());
//! assert_eq!(
//!     Command::from_arguments_with(&["lescan", "--moot", "1"], UnknownOptions::Reject),
//!     Err(BuildError::UnknownOption("moot".to_string()))
//! );
//! ```
#![deny(missing_docs)]
mod command;
mod controller;
mod dispatch;
mod hci;
mod interface;

pub use command::*;
pub use controller::*;
pub use dispatch::*;
pub use hci::*;
pub use interface::{ConsoleInterface, UserInterface};

pub use hcitool_builder::{Address, BuildError, InvalidAddress, UnknownOptions};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
