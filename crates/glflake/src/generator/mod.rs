mod interface;
mod lock;
mod mutex;
mod settings;

pub use interface::*;
pub use lock::*;
pub(crate) use mutex::*;
pub use settings::*;
