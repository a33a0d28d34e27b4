//! Configuration based resolution of Android values resources.
//!
//! Values files are loaded into a [`ResourceTable`] with [`ResourceLoader`],
//! then looked up for a requested configuration through a [`Resolver`].

pub mod errors;
pub mod identity;
pub mod loader;
pub mod resolver;
pub mod style;
pub mod table;
pub mod theme;

pub use errors::ResourceError;
pub use identity::{ResName, ResType, ResourceId, ValueType};
pub use loader::{ResourceLoader, load_archive, values_dir_name};
pub use resolver::Resolver;
pub use style::{AttributeResource, StyleData};
pub use table::{Candidate, ResourceTable, ResourceTableBuilder, ResourceValue, TypedResource};
pub use theme::ThemeStyleSet;
