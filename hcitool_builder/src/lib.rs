//! Builder module for `hcitool`.
//!
//! Turns a raw argument list (`<command> [--option value]...`) into a strongly-typed command value.
//! The pieces, leaf first:
//! * Value parsers ([`FromCommandLine`], [`Address`], [`prelude::Keyword`]) convert a single token.
//! * Fields ([`Scalar`], [`Optional`], [`Switch`], [`Collection`]) declare one option of a command kind
//! and resolve it from the tokenized [`Parameters`].
//! * The [`Registry`] maps a command name onto the builder for its kind.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
mod tokens;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::*;
pub use tokens::{tokenize, tokenize_parameters, Parameter, Parameters, Tokens};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
