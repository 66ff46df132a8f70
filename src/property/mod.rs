//! Property resolution: request model, locator handling, file formats,
//! the resolution engine and typed access.

mod env;
mod error;
mod format;
mod locator;
mod producer;
mod resolver;
mod request;

pub use env::replace_env_references;
pub use error::ResolveError;
pub use format::{FormatError, PropertySet};
pub use locator::{ResourceUrl, SearchPath};
pub use producer::PropertyContext;
pub use resolver::PropertyResolver;
pub use request::{Format, Owner, Property, Resource};
