pub mod error;
pub mod format;
pub mod io;
pub mod model;
pub mod utils;

pub use error::{FeloError, Result};
pub use format::{parse, rewrite_roster, serialize, FeloFile};
pub use model::{calculate, update, Calculation, UpdateOptions};
