pub(crate) const OPTION_PREFIX: &str = "--";
pub(crate) const VALUE_DELIMITER: char = '=';
pub(crate) const HEX_PREFIXES: [&str; 2] = ["0x", "0X"];
pub(crate) const LIST_DELIMITER: char = ',';
