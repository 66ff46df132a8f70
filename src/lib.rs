//! Layered property resolution.
//!
//! Supplies configuration values (strings, numbers, dates, structured JSON)
//! by resolving them, in priority order, from process environment overrides
//! and from named property resources (`.properties` text or properties-XML),
//! with optional `${env.VAR}` interpolation inside resolved values.
//!
//! ## Example
//!
//! ```no_run
//! use propstack::{Property, PropertyContext, PropertyResolver, Resource};
//!
//! struct Server;
//!
//! let mut resolver = PropertyResolver::new();
//! let mut ctx = PropertyContext::of::<Server>(&mut resolver);
//!
//! // Looks for `<module path>/Server.properties` on the search path,
//! // unless the environment overrides the key first.
//! let port = ctx
//!     .integer(&Property::named("port").default_value("8080"))?
//!     .unwrap_or_default();
//!
//! let banner = ctx.string(
//!     &Property::named("banner")
//!         .resolve_environment(true)
//!         .resource(Resource::at("classpath:conf/app.properties")),
//! )?;
//! # Ok::<(), propstack::Error>(())
//! ```

pub mod property;

mod error;

pub use error::Error;
pub use property::{
    Format, FormatError, Owner, Property, PropertyContext, PropertyResolver, PropertySet,
    Resource, ResolveError, ResourceUrl, SearchPath,
};
