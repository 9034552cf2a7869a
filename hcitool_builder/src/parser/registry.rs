use std::collections::{BTreeMap, HashSet};

use crate::model::OptionDescriptor;
use crate::parser::{BuildError, ConfigError};
use crate::tokens::{tokenize_parameters, Parameters};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The function building a command of one kind from its parameters.
pub type Builder<C> = fn(&Parameters) -> Result<C, BuildError>;

/// What to do with options the matched command does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOptions {
    /// Silently ignore them.
    #[default]
    Ignore,
    /// Fail the build with [`BuildError::UnknownOption`].
    Reject,
}

/// A registered command: its kind, its declared options, and its builder.
pub struct Entry<K, C> {
    kind: K,
    options: &'static [OptionDescriptor],
    builder: Builder<C>,
}

impl<K: Copy, C> Entry<K, C> {
    /// The kind of command this entry builds.
    pub fn kind(&self) -> K {
        self.kind
    }

    /// The options declared by this command.
    pub fn options(&self) -> &'static [OptionDescriptor] {
        self.options
    }

    /// Build the command from already tokenized parameters.
    pub fn build(&self, parameters: &Parameters, policy: UnknownOptions) -> Result<C, BuildError> {
        if policy == UnknownOptions::Reject {
            if let Some(unknown) = parameters
                .iter()
                .find(|p| !self.options.iter().any(|o| o.name() == p.option()))
            {
                return Err(BuildError::UnknownOption(unknown.option().to_string()));
            }
        }

        (self.builder)(parameters)
    }
}

impl<K: std::fmt::Debug, C> std::fmt::Debug for Entry<K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("kind", &self.kind)
            .field("options", &self.options)
            .finish()
    }
}

/// The immutable map from command name to its [`Entry`].
///
/// Configure via [`RegistryBuilder`]; once built, a registry cannot be changed.
///
/// ### Example
/// ```
/// # use hcitool_builder::{BuildError, Field, OptionDescriptor, Optional, Parameters, Registry, UnknownOptions};
/// const DURATION: Optional<u32> = Optional::new("duration", 1000);
/// const OPTIONS: &[OptionDescriptor] = &[DURATION.descriptor()];
///
/// fn scan(parameters: &Parameters) -> Result<u32, BuildError> {
///     DURATION.resolve(parameters)
/// }
///
/// let registry = Registry::builder()
///     .command("lescan", "scan", OPTIONS, scan)
///     .build()
///     .unwrap();
///
/// assert_eq!(registry.build(&["LEScan", "--duration", "10"], UnknownOptions::Ignore), Ok(10));
/// assert_eq!(
///     registry.build(&["scan"], UnknownOptions::Ignore),
///     Err(BuildError::UnknownCommand("scan".to_string()))
/// );
/// ```
pub struct Registry<K, C> {
    entries: BTreeMap<&'static str, Entry<K, C>>,
}

impl<K, C> std::fmt::Debug for Registry<K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<K: Copy, C> Registry<K, C> {
    /// Start configuring a registry.
    pub fn builder() -> RegistryBuilder<K, C> {
        RegistryBuilder::default()
    }

    /// Find the entry for `name` (case-insensitive).
    pub fn lookup(&self, name: &str) -> Option<&Entry<K, C>> {
        self.entries.get(name.to_ascii_lowercase().as_str())
    }

    /// The registered command names (including aliases), in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Build the command named by the first argument, from the remaining arguments.
    ///
    /// The command name is resolved before any option is read, so an unknown name always fails with
    /// [`BuildError::UnknownCommand`].
    pub fn build(&self, arguments: &[&str], policy: UnknownOptions) -> Result<C, BuildError> {
        let (command, rest) = arguments
            .split_first()
            .ok_or(BuildError::MissingCommand)?;
        let command = command.to_ascii_lowercase();
        let entry = self
            .lookup(&command)
            .ok_or_else(|| BuildError::UnknownCommand(command.clone()))?;
        let parameters = tokenize_parameters(rest)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Building '{command}' from {} parameters.", parameters.len());
        }

        entry.build(&parameters, policy)
    }
}

/// Configures a [`Registry`].
pub struct RegistryBuilder<K, C> {
    commands: Vec<(&'static str, Entry<K, C>)>,
    aliases: Vec<(&'static str, &'static str)>,
}

impl<K, C> Default for RegistryBuilder<K, C> {
    fn default() -> Self {
        Self {
            commands: Vec::default(),
            aliases: Vec::default(),
        }
    }
}

impl<K: Copy, C> RegistryBuilder<K, C> {
    /// Register a command under its (lowercase) name.
    pub fn command(
        mut self,
        name: &'static str,
        kind: K,
        options: &'static [OptionDescriptor],
        builder: Builder<C>,
    ) -> Self {
        self.commands.push((
            name,
            Entry {
                kind,
                options,
                builder,
            },
        ));
        self
    }

    /// Register an additional (lowercase) name for an already registered command.
    pub fn alias(mut self, alias: &'static str, name: &'static str) -> Self {
        self.aliases.push((alias, name));
        self
    }

    /// Validate the configuration and produce the registry.
    ///
    /// Names must be lowercase and unique, and each command's options must be uniquely named.
    pub fn build(self) -> Result<Registry<K, C>, ConfigError> {
        let RegistryBuilder { commands, aliases } = self;
        let mut entries: BTreeMap<&'static str, Entry<K, C>> = BTreeMap::default();

        for (name, entry) in commands.into_iter() {
            check_name(name)?;
            let mut seen = HashSet::new();

            for option in entry.options {
                check_name(option.name())?;

                if !seen.insert(option.name()) {
                    return Err(ConfigError(format!(
                        "Cannot duplicate the option '{}' of command '{name}'.",
                        option.name()
                    )));
                }
            }

            if entries.insert(name, entry).is_some() {
                return Err(ConfigError(format!("Cannot duplicate the command '{name}'.")));
            }
        }

        for (alias, name) in aliases.into_iter() {
            check_name(alias)?;
            let entry = match entries.get(name) {
                Some(entry) => Entry {
                    kind: entry.kind,
                    options: entry.options,
                    builder: entry.builder,
                },
                None => {
                    return Err(ConfigError(format!(
                        "Cannot alias '{alias}' to the unknown command '{name}'."
                    )));
                }
            };

            if entries.insert(alias, entry).is_some() {
                return Err(ConfigError(format!("Cannot duplicate the command '{alias}'.")));
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registry ready with {} command names.", entries.len());
        }

        Ok(Registry { entries })
    }
}

fn check_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name != name.to_ascii_lowercase() {
        Err(ConfigError(format!(
            "The name '{name}' must be non-empty and lowercase."
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use crate::{Address, Field, Optional, Scalar};
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Scan,
        Random,
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Command {
        Scan(u32),
        Random(Address),
    }

    const DURATION: Optional<u32> = Optional::new("duration", 1000);
    const ADDRESS: Scalar<Address> = Scalar::new("address");
    const SCAN_OPTIONS: &[OptionDescriptor] = &[DURATION.descriptor()];
    const RANDOM_OPTIONS: &[OptionDescriptor] = &[ADDRESS.descriptor()];

    fn registry() -> Registry<Kind, Command> {
        Registry::builder()
            .command("lescan", Kind::Scan, SCAN_OPTIONS, |p| {
                DURATION.resolve(p).map(Command::Scan)
            })
            .command("setrandomaddress", Kind::Random, RANDOM_OPTIONS, |p| {
                ADDRESS.resolve(p).map(Command::Random)
            })
            .alias("scan", "lescan")
            .build()
            .unwrap()
    }

    #[rstest]
    #[case(vec!["lescan"], Command::Scan(1000))]
    #[case(vec!["LESCAN", "--duration", "5"], Command::Scan(5))]
    #[case(vec!["scan", "--duration", "5"], Command::Scan(5))]
    #[case(vec!["lescan", "--duration", "5", "--moot"], Command::Scan(5))]
    #[case(
        vec!["setrandomaddress", "--address", "54:39:A3:47:D8:F0"],
        Command::Random(Address::new([0x54, 0x39, 0xA3, 0x47, 0xD8, 0xF0]))
    )]
    fn build(#[case] arguments: Vec<&str>, #[case] expected: Command) {
        assert_eq!(
            registry().build(arguments.as_slice(), UnknownOptions::Ignore),
            Ok(expected)
        );
    }

    #[rstest]
    #[case(vec![], UnknownOptions::Ignore, BuildError::MissingCommand)]
    #[case(vec!["moot"], UnknownOptions::Ignore, BuildError::UnknownCommand("moot".to_string()))]
    #[case(vec!["MOOT"], UnknownOptions::Reject, BuildError::UnknownCommand("moot".to_string()))]
    #[case(vec!["moot", "x"], UnknownOptions::Ignore, BuildError::UnknownCommand("moot".to_string()))]
    #[case(vec!["moot", "--duration", "5", "x"], UnknownOptions::Reject, BuildError::UnknownCommand("moot".to_string()))]
    #[case(vec!["--address", "54:39:A3:47:D8:F0"], UnknownOptions::Ignore, BuildError::UnknownCommand("--address".to_string()))]
    #[case(vec!["setrandomaddress", "--randomaddress"], UnknownOptions::Ignore, BuildError::MissingOption("address".to_string()))]
    #[case(vec!["setrandomaddress", "--randomaddress"], UnknownOptions::Reject, BuildError::UnknownOption("randomaddress".to_string()))]
    #[case(vec!["lescan", "--duration", "5", "--moot"], UnknownOptions::Reject, BuildError::UnknownOption("moot".to_string()))]
    #[case(vec!["lescan", "5"], UnknownOptions::Ignore, BuildError::UnexpectedValue("5".to_string()))]
    fn build_error(
        #[case] arguments: Vec<&str>,
        #[case] policy: UnknownOptions,
        #[case] expected: BuildError,
    ) {
        assert_eq!(registry().build(arguments.as_slice(), policy), Err(expected));
    }

    #[test]
    fn lookup() {
        let registry = registry();
        let entry = registry.lookup("LEScan").unwrap();
        assert_eq!(entry.kind(), Kind::Scan);
        assert_eq!(entry.options(), SCAN_OPTIONS);
        assert_eq!(registry.lookup("scan").unwrap().kind(), Kind::Scan);
        assert!(registry.lookup("moot").is_none());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["lescan", "scan", "setrandomaddress"]
        );
    }

    #[test]
    fn duplicate_command() {
        let error = Registry::<Kind, Command>::builder()
            .command("lescan", Kind::Scan, SCAN_OPTIONS, |_| Ok(Command::Scan(0)))
            .command("lescan", Kind::Scan, SCAN_OPTIONS, |_| Ok(Command::Scan(0)))
            .build()
            .unwrap_err();
        assert_contains!(error.to_string(), "Cannot duplicate the command 'lescan'");
    }

    #[test]
    fn duplicate_option() {
        const OPTIONS: &[OptionDescriptor] = &[DURATION.descriptor(), DURATION.descriptor()];
        let error = Registry::<Kind, Command>::builder()
            .command("lescan", Kind::Scan, OPTIONS, |_| Ok(Command::Scan(0)))
            .build()
            .unwrap_err();
        assert_contains!(error.to_string(), "Cannot duplicate the option 'duration'");
    }

    #[rstest]
    #[case("LEScan")]
    #[case("")]
    fn invalid_name(#[case] name: &'static str) {
        let error = Registry::<Kind, Command>::builder()
            .command(name, Kind::Scan, SCAN_OPTIONS, |_| Ok(Command::Scan(0)))
            .build()
            .unwrap_err();
        assert_contains!(error.to_string(), "must be non-empty and lowercase");
    }

    #[test]
    fn alias_unknown() {
        let error = Registry::<Kind, Command>::builder()
            .alias("scan", "lescan")
            .build()
            .unwrap_err();
        assert_contains!(error.to_string(), "unknown command 'lescan'");
    }

    #[test]
    fn alias_duplicate() {
        let error = Registry::<Kind, Command>::builder()
            .command("lescan", Kind::Scan, SCAN_OPTIONS, |_| Ok(Command::Scan(0)))
            .alias("lescan", "lescan")
            .build()
            .unwrap_err();
        assert_contains!(error.to_string(), "Cannot duplicate the command 'lescan'");
    }
}
