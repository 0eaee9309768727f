mod interface;
mod linear;
mod to_u64;

pub use interface::*;
pub use linear::*;
pub use to_u64::*;
