pub mod entry;
pub mod errors;

mod structs;
pub use entry::*;
pub use errors::*;
