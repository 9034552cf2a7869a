use std::marker::PhantomData;

use crate::api::FromCommandLine;
use crate::model::{Arity, OptionDescriptor};
use crate::parser::BuildError;
use crate::prelude::Collectable;
use crate::tokens::{Parameter, Parameters};

/// An additional domain check applied after a value converts.
pub type Check<T> = fn(&T) -> bool;

/// Behaviour of a declared option: describe itself, and resolve its value from the parameters.
pub trait Field {
    /// The resolved type.
    type Value;

    /// The static description of this option.
    fn descriptor(&self) -> OptionDescriptor;

    /// Resolve the option against the parameters of an invocation.
    fn resolve(&self, parameters: &Parameters) -> Result<Self::Value, BuildError>;
}

fn value_of<'p>(name: &str, parameter: &'p Parameter) -> Result<&'p str, BuildError> {
    parameter.value().ok_or_else(|| BuildError::missing(name))
}

fn convert<T: FromCommandLine>(
    name: &str,
    raw: &str,
    check: Option<Check<T>>,
) -> Result<T, BuildError> {
    T::from_command_line(raw)
        .filter(|value| check.map_or(true, |check| check(value)))
        .ok_or_else(|| BuildError::invalid(name, raw))
}

/// A required option that takes a single value.
///
/// ### Example
/// ```
/// # use hcitool_builder::{tokenize, Address, Field, Scalar};
/// const ADDRESS: Scalar<Address> = Scalar::new("address");
///
/// let tokens = tokenize(&["setrandomaddress", "--address", "54:39:A3:47:D8:F0"]).unwrap();
/// let address = ADDRESS.resolve(tokens.parameters()).unwrap();
/// assert_eq!(address.to_string(), "54:39:A3:47:D8:F0");
/// ```
pub struct Scalar<T> {
    name: &'static str,
    check: Option<Check<T>>,
}

impl<T> Scalar<T> {
    /// Declare a required option.
    pub const fn new(name: &'static str) -> Self {
        Self { name, check: None }
    }

    /// Reject converted values for which `check` is false.
    pub const fn check(self, check: Check<T>) -> Self {
        Self {
            name: self.name,
            check: Some(check),
        }
    }

    /// The static description of this option.
    pub const fn descriptor(&self) -> OptionDescriptor {
        OptionDescriptor::new(self.name, true, Arity::Scalar, true)
    }
}

impl<T: FromCommandLine> Field for Scalar<T> {
    type Value = T;

    fn descriptor(&self) -> OptionDescriptor {
        Scalar::descriptor(self)
    }

    fn resolve(&self, parameters: &Parameters) -> Result<T, BuildError> {
        let parameter = parameters
            .first(self.name)
            .ok_or_else(|| BuildError::missing(self.name))?;
        convert(self.name, value_of(self.name, parameter)?, self.check)
    }
}

/// An option that takes a single value, falling back to a default when absent.
///
/// Presence without a value is still an error; only absence yields the default.
///
/// ### Example
/// ```
/// # use hcitool_builder::{tokenize, Field, Optional};
/// const DURATION: Optional<u32> = Optional::new("duration", 1000);
///
/// let tokens = tokenize(&["lescan"]).unwrap();
/// assert_eq!(DURATION.resolve(tokens.parameters()).unwrap(), 1000);
///
/// let tokens = tokenize(&["lescan", "--duration", "0x10"]).unwrap();
/// assert_eq!(DURATION.resolve(tokens.parameters()).unwrap(), 16);
/// ```
pub struct Optional<T> {
    name: &'static str,
    default: T,
    check: Option<Check<T>>,
}

impl<T> Optional<T> {
    /// Declare an optional option with its default.
    pub const fn new(name: &'static str, default: T) -> Self {
        Self {
            name,
            default,
            check: None,
        }
    }

    /// Declare an optional option with its default, rejecting converted values for which `check` is false.
    pub const fn checked(name: &'static str, default: T, check: Check<T>) -> Self {
        Self {
            name,
            default,
            check: Some(check),
        }
    }

    /// The static description of this option.
    pub const fn descriptor(&self) -> OptionDescriptor {
        OptionDescriptor::new(self.name, false, Arity::Scalar, true)
    }

    /// The value used when the option is absent.
    pub const fn default_value(&self) -> &T {
        &self.default
    }
}

impl<T: FromCommandLine + Clone> Field for Optional<T> {
    type Value = T;

    fn descriptor(&self) -> OptionDescriptor {
        Optional::descriptor(self)
    }

    fn resolve(&self, parameters: &Parameters) -> Result<T, BuildError> {
        match parameters.first(self.name) {
            Some(parameter) => convert(self.name, value_of(self.name, parameter)?, self.check),
            None => Ok(self.default.clone()),
        }
    }
}

/// A flag option that takes no value.
///
/// Absent resolves to `false`, present resolves to `true`.
/// If a value does follow the flag, it is read as a boolean (ex: `--filterduplicates false`).
pub struct Switch {
    name: &'static str,
}

impl Switch {
    /// Declare a flag option.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// The static description of this option.
    pub const fn descriptor(&self) -> OptionDescriptor {
        OptionDescriptor::new(self.name, false, Arity::Scalar, false)
    }
}

impl Field for Switch {
    type Value = bool;

    fn descriptor(&self) -> OptionDescriptor {
        Switch::descriptor(self)
    }

    fn resolve(&self, parameters: &Parameters) -> Result<bool, BuildError> {
        match parameters.first(self.name).map(Parameter::value) {
            Some(Some(raw)) => convert(self.name, raw, None),
            Some(None) => Ok(true),
            None => Ok(false),
        }
    }
}

/// A repeatable option, collecting every occurrence into `C`.
///
/// Absent resolves to the empty (default) collection.
/// Use a set for `C` when duplicates are irrelevant, or a `Vec` when order/duplicates matter.
///
/// ### Example
/// ```
/// # use std::collections::BTreeSet;
/// # use hcitool_builder::{tokenize, Collection, Field};
/// const PAGES: Collection<BTreeSet<u8>, u8> = Collection::new("page");
///
/// let tokens = tokenize(&["command", "--page", "2", "--page", "1", "--page", "2"]).unwrap();
/// assert_eq!(PAGES.resolve(tokens.parameters()).unwrap(), BTreeSet::from([1, 2]));
/// ```
pub struct Collection<C, T> {
    name: &'static str,
    check: Option<Check<T>>,
    _phantom: PhantomData<fn() -> C>,
}

impl<C, T> Collection<C, T> {
    /// Declare a repeatable option.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            check: None,
            _phantom: PhantomData,
        }
    }

    /// Reject converted values for which `check` is false.
    pub const fn check(self, check: Check<T>) -> Self {
        Self {
            name: self.name,
            check: Some(check),
            _phantom: PhantomData,
        }
    }

    /// The static description of this option.
    pub const fn descriptor(&self) -> OptionDescriptor {
        OptionDescriptor::new(self.name, false, Arity::Repeated, true)
    }
}

impl<C, T> Field for Collection<C, T>
where
    C: Collectable<T> + Default,
    T: FromCommandLine,
{
    type Value = C;

    fn descriptor(&self) -> OptionDescriptor {
        Collection::descriptor(self)
    }

    fn resolve(&self, parameters: &Parameters) -> Result<C, BuildError> {
        let mut collection = C::default();

        for parameter in parameters.all(self.name) {
            collection.add(convert(self.name, value_of(self.name, parameter)?, self.check)?);
        }

        Ok(collection)
    }
}
