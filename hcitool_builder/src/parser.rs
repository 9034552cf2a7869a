mod base;
mod registry;

pub use base::*;
pub use registry::*;
