use crate::constant::*;
use crate::parser::BuildError;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// One raw `(option, value)` pair, as found on the command line.
///
/// The option name is lowercased; the value (if any) is kept exactly as provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    option: String,
    value: Option<String>,
}

impl Parameter {
    /// Create a parameter.
    pub fn new(option: impl Into<String>, value: Option<String>) -> Self {
        Self {
            option: option.into(),
            value,
        }
    }

    /// The option name (lowercase, without the `--` prefix).
    pub fn option(&self) -> &str {
        &self.option
    }

    /// The raw value, or `None` if the option was given as a bare flag.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// The parameters of a single invocation, in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// The first parameter for `option`.
    pub fn first(&self, option: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.option == option)
    }

    /// Every parameter for `option`, in encounter order.
    pub fn all<'a>(&'a self, option: &'a str) -> impl Iterator<Item = &'a Parameter> + 'a {
        self.0.iter().filter(move |p| p.option == option)
    }

    /// Iterate over all parameters.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.0.iter()
    }

    /// The number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Parameters(iter.into_iter().collect())
    }
}

/// The tokenized command line: a command name followed by its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    command: String,
    parameters: Parameters,
}

impl Tokens {
    /// The command name (lowercase).
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The parameters following the command name.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Split into the command name and parameters.
    pub fn into_parts(self) -> (String, Parameters) {
        (self.command, self.parameters)
    }
}

/// Split the raw arguments into the command name and its parameters.
///
/// The first argument is the command name.
/// Each `--name` token starts an option; the next token is its value, unless that token is itself an option.
/// `--name=value` attaches the value inline (split on the first `=`).
/// Options are neither validated nor de-duplicated here: that is left to the command's fields.
///
/// ### Example
/// ```
/// # use hcitool_builder::{tokenize, Parameter};
/// let tokens = tokenize(&["LEScan", "--Duration", "1000", "--filterduplicates"]).unwrap();
/// assert_eq!(tokens.command(), "lescan");
/// assert_eq!(
///     tokens.parameters().first("duration"),
///     Some(&Parameter::new("duration", Some("1000".to_string())))
/// );
/// assert_eq!(tokens.parameters().first("filterduplicates").unwrap().value(), None);
/// ```
pub fn tokenize(arguments: &[&str]) -> Result<Tokens, BuildError> {
    let (command, rest) = arguments
        .split_first()
        .ok_or(BuildError::MissingCommand)?;
    let tokens = Tokens {
        command: command.to_ascii_lowercase(),
        parameters: tokenize_parameters(rest)?,
    };

    #[cfg(feature = "tracing_debug")]
    {
        debug!("Tokenized '{}' with {} parameters.", tokens.command, tokens.parameters.len());
    }

    Ok(tokens)
}

/// Split the arguments following a command name into its parameters.
///
/// ### Example
/// ```
/// # use hcitool_builder::{tokenize_parameters, BuildError};
/// let parameters = tokenize_parameters(&["--address=54:39:A3:47:D8:F0"]).unwrap();
/// assert_eq!(parameters.len(), 1);
/// assert_eq!(
///     tokenize_parameters(&["54:39:A3:47:D8:F0"]),
///     Err(BuildError::UnexpectedValue("54:39:A3:47:D8:F0".to_string()))
/// );
/// ```
pub fn tokenize_parameters(arguments: &[&str]) -> Result<Parameters, BuildError> {
    let mut tokenizer = Tokenizer::default();

    for token in arguments {
        tokenizer.feed(token)?;
    }

    Ok(tokenizer.close())
}

#[derive(Debug, Default)]
struct Tokenizer {
    parameters: Vec<Parameter>,
    pending: Option<String>,
}

impl Tokenizer {
    fn feed(&mut self, token: &str) -> Result<(), BuildError> {
        // Find an option, such as:
        //  --address
        //  --address ..
        //  --address=..
        if let Some(option) = token.strip_prefix(OPTION_PREFIX) {
            self.flush();

            match split_value_delimiter(option) {
                (name, Some(value)) => {
                    self.parameters
                        .push(Parameter::new(name.to_ascii_lowercase(), Some(value.to_string())));
                }
                (name, None) => {
                    self.pending.replace(name.to_ascii_lowercase());
                }
            };

            return Ok(());
        }

        // Otherwise, this is the value of the pending option.
        match self.pending.take() {
            Some(name) => {
                self.parameters
                    .push(Parameter::new(name, Some(token.to_string())));
                Ok(())
            }
            None => Err(BuildError::UnexpectedValue(token.to_string())),
        }
    }

    fn flush(&mut self) {
        if let Some(name) = self.pending.take() {
            self.parameters.push(Parameter::new(name, None));
        }
    }

    fn close(mut self) -> Parameters {
        self.flush();
        Parameters(self.parameters)
    }
}

fn split_value_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once(VALUE_DELIMITER) {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}
