/// How many times an option may appear for a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The option carries a single value; only its first occurrence is used.
    Scalar,
    /// Every occurrence of the option contributes a value.
    Repeated,
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The static description of one option recognized by a command kind.
///
/// Each field (ex: [`Scalar`](crate::Scalar)) produces its descriptor at compile time, so a command kind may list its options as a `const` slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDescriptor {
    name: &'static str,
    required: bool,
    arity: Arity,
    takes_value: bool,
}

impl OptionDescriptor {
    /// Describe an option.
    pub const fn new(name: &'static str, required: bool, arity: Arity, takes_value: bool) -> Self {
        Self {
            name,
            required,
            arity,
            takes_value,
        }
    }

    /// The canonical (lowercase) option name, without the `--` prefix.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the option must be present for the command to build.
    pub const fn required(&self) -> bool {
        self.required
    }

    /// The arity of the option.
    pub const fn arity(&self) -> Arity {
        self.arity
    }

    /// Whether the option expects a value token.
    pub const fn takes_value(&self) -> bool {
        self.takes_value
    }
}

impl std::fmt::Display for OptionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = if self.takes_value { " VALUE" } else { "" };
        let repeat = match self.arity {
            Arity::Scalar => "",
            Arity::Repeated => " [...]",
        };

        if self.required {
            write!(f, "--{n}{value}{repeat}", n = self.name)
        } else {
            write!(f, "[--{n}{value}{repeat}]", n = self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OptionDescriptor::new("address", true, Arity::Scalar, true), "--address VALUE")]
    #[case(OptionDescriptor::new("duration", false, Arity::Scalar, true), "[--duration VALUE]")]
    #[case(OptionDescriptor::new("event", false, Arity::Repeated, true), "[--event VALUE [...]]")]
    #[case(OptionDescriptor::new("filterduplicates", false, Arity::Scalar, false), "[--filterduplicates]")]
    fn display(#[case] descriptor: OptionDescriptor, #[case] expected: &str) {
        assert_eq!(descriptor.to_string(), expected);
    }

    #[test]
    fn accessors() {
        let descriptor = OptionDescriptor::new("event", false, Arity::Repeated, true);
        assert_eq!(descriptor.name(), "event");
        assert!(!descriptor.required());
        assert_eq!(descriptor.arity(), Arity::Repeated);
        assert!(descriptor.takes_value());
    }
}
