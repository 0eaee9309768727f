mod atomic;
mod basic;
mod interface;
mod lock;
mod mutex;
mod state;
mod status;

pub use atomic::*;
pub use basic::*;
pub use interface::*;
pub use lock::*;
pub use mutex::*;
pub use status::*;
