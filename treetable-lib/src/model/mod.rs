//! Tree data model

mod entry;
mod id;
mod value;

pub use entry::*;
pub use id::*;
pub use value::*;
