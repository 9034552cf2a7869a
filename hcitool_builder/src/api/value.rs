use crate::constant::HEX_PREFIXES;

/// Behaviour to convert a single command line token into a typed value.
///
/// Conversion either produces the value or rejects the token; the caller decides how to report the rejection.
///
/// Integers honour the numeric literal convention: a `0x`/`0X` prefix selects hexadecimal, otherwise decimal.
/// Signs, whitespace and separators are never accepted, and values beyond the target width are rejected.
///
/// ### Example
/// ```
/// # use hcitool_builder::FromCommandLine;
/// assert_eq!(u16::from_command_line("0x00FB"), Some(0xFB));
/// assert_eq!(u16::from_command_line("251"), Some(251));
/// assert_eq!(u8::from_command_line("256"), None);
/// assert_eq!(u32::from_command_line("abc"), None);
/// ```
pub trait FromCommandLine: Sized {
    /// Convert the token, or reject it with `None`.
    fn from_command_line(token: &str) -> Option<Self>;
}

fn split_radix(token: &str) -> (&str, u32) {
    match HEX_PREFIXES
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
    {
        Some(digits) => (digits, 16),
        None => (token, 10),
    }
}

macro_rules! integer {
    ($($t:ty),*) => {
        $(
            impl FromCommandLine for $t {
                fn from_command_line(token: &str) -> Option<Self> {
                    let (digits, radix) = split_radix(token);

                    // `from_str_radix` tolerates a leading '+', which we do not.
                    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                        return None;
                    }

                    <$t>::from_str_radix(digits, radix).ok()
                }
            }
        )*
    };
}

integer!(u8, u16, u32, u64);

impl FromCommandLine for bool {
    fn from_command_line(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl FromCommandLine for String {
    fn from_command_line(token: &str) -> Option<Self> {
        Some(token.to_string())
    }
}
