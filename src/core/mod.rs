pub mod access;
pub mod batch;
pub mod coerce;
pub mod compare;
pub mod errors;
pub mod event;
pub mod list;
pub mod merge;
pub mod path;
pub mod select;
pub mod value;

pub use errors::{Result, StoreError};
pub use path::{NamePath, Segment};
pub use value::Value;
