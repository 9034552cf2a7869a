mod address;
mod field;
mod value;

pub use address::*;
pub use field::*;
pub use value::*;
