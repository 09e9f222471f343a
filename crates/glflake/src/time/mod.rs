mod clock;
mod interface;
mod sleep;

pub use clock::*;
pub use interface::*;
pub use sleep::*;
