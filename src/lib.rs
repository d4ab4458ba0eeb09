pub mod cmd;
pub mod error;
pub mod merge;
pub mod sink;
pub mod source;
pub mod value;

pub use cmd::ValuesCmd;
pub use error::ValuesError;
pub use merge::{fold_merge, merge};
pub use value::{Mapping, Value};
