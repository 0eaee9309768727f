mod hex;
mod interface;
mod le_bytes;

pub use hex::*;
pub use interface::*;
pub use le_bytes::*;
