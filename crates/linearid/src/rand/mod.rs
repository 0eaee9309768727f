mod compose;
mod interface;
mod thread_random;

pub use compose::*;
pub use interface::*;
pub use thread_random::*;
