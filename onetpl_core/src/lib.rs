pub mod catalog;
pub mod cli;
pub mod config;
pub mod convert;
pub mod display;
pub mod filter;
pub mod flatten;
pub mod query;
pub mod template;

// Reexports
pub use catalog::{CatalogProvider, FileCatalog, StaticCatalog};
pub use filter::{filter, resolve_one, ConstraintSet};
pub use flatten::TemplateOutput;
pub use query::{list, lookup};
pub use template::{AttrValue, AttributeBag, Template};
