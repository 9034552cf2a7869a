use thiserror::Error;

/// Error raised while configuring a [`Registry`](crate::Registry).
///
/// These are programming errors in the static command declarations, never user input errors.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// Error raised while turning the raw arguments into a command.
///
/// Every variant is terminal for the invocation: no partially built command is ever observable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No command name was provided.
    #[error("no command provided.")]
    MissingCommand,

    /// The command name does not match any registered command.
    #[error("unknown command '{0}'.")]
    UnknownCommand(String),

    /// A value token appeared without a preceding `--option`.
    #[error("unexpected value '{0}' (values must follow an '--option').")]
    UnexpectedValue(String),

    /// An option was provided that the command does not declare.
    #[error("unrecognized option '{0}'.")]
    UnknownOption(String),

    /// A required option was absent, or an option that needs a value was given none.
    #[error("missing value for option '{0}'.")]
    MissingOption(String),

    /// The option value could not be converted (or failed validation).
    #[error("invalid value '{value}' for option '{option}'.")]
    InvalidOptionValue {
        /// The option name.
        option: String,
        /// The raw value, unchanged.
        value: String,
    },
}

impl BuildError {
    pub(crate) fn missing(option: &str) -> Self {
        BuildError::MissingOption(option.to_string())
    }

    pub(crate) fn invalid(option: &str, value: &str) -> Self {
        BuildError::InvalidOptionValue {
            option: option.to_string(),
            value: value.to_string(),
        }
    }
}
