//! Request model for property lookups.
//!
//! A [`Property`] describes one logical lookup: the key name, an optional
//! default, an optional parse pattern, an optional override for the
//! environment key checked first, and the [`Resource`] holding the backing
//! property file. An [`Owner`] supplies the type whose path is used for
//! name and location defaulting.

/// File format of a property resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Flat `key=value` text in the Java `.properties` syntax.
    #[default]
    Properties,
    /// Properties-XML: `<properties><entry key="k">v</entry></properties>`.
    Xml,
}

/// Location and format of the property file backing a lookup.
///
/// An empty location defaults to `<owner path>.properties` on the resolver's
/// search path. Recognized schemes are `classpath:`, `file:`, `http(s):` and
/// `user-dir:`; scheme-less locations are treated as `classpath:` paths.
#[derive(Debug, Clone, Default)]
pub struct Resource {
    location: String,
    format: Format,
    allow_missing: bool,
    resolve_environment: bool,
}

impl Resource {
    /// A resource at an explicit location.
    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// When set, a resource that does not exist behaves as an empty
    /// property set instead of failing the lookup.
    pub fn allow_missing(mut self, allow_missing: bool) -> Self {
        self.allow_missing = allow_missing;
        self
    }

    /// When set, `${env.VAR}` references inside the location string are
    /// substituted before the locator is parsed.
    pub fn resolve_environment(mut self, resolve_environment: bool) -> Self {
        self.resolve_environment = resolve_environment;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn file_format(&self) -> Format {
        self.format
    }

    pub fn is_missing_allowed(&self) -> bool {
        self.allow_missing
    }

    pub fn resolves_environment(&self) -> bool {
        self.resolve_environment
    }
}

/// A single property lookup request.
///
/// ## Example
///
/// ```no_run
/// use propstack::{Owner, Property, PropertyResolver, Resource};
///
/// let mut resolver = PropertyResolver::new();
/// let greeting = resolver.resolve(
///     &Property::named("app.greeting")
///         .default_value("hello")
///         .resource(Resource::at("classpath:conf/app.properties")),
///     &Owner::named("myapp::Server"),
/// )?;
/// # Ok::<(), propstack::ResolveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    pattern: Option<String>,
    system_property: Option<String>,
    default_value: Option<String>,
    resolve_environment: bool,
    resource: Resource,
}

impl Property {
    /// A request for the property with the given key name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
            system_property: None,
            default_value: None,
            resolve_environment: false,
            resource: Resource::default(),
        }
    }

    /// Parse pattern applied by the big-decimal, big-integer and date
    /// accessors. Date patterns use `chrono` strftime syntax; a number
    /// pattern containing `,` enables group-separator stripping.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Overrides the environment key checked before the resource lookup.
    /// Unset, the key is `<owner qualified name>.<property name>`.
    pub fn system_property(mut self, key: impl Into<String>) -> Self {
        self.system_property = Some(key.into());
        self
    }

    /// Value used when the property is absent from the resource. Unset, an
    /// absent property resolves to `None`.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// When set, `${env.VAR}` references in the resolved value are
    /// substituted before the value is returned.
    pub fn resolve_environment(mut self, resolve_environment: bool) -> Self {
        self.resolve_environment = resolve_environment;
        self
    }

    pub fn resource(mut self, resource: Resource) -> Self {
        self.resource = resource;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse_pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn system_property_key(&self) -> Option<&str> {
        self.system_property.as_deref()
    }

    pub fn default(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn resolves_environment(&self) -> bool {
        self.resolve_environment
    }

    pub fn backing_resource(&self) -> &Resource {
        &self.resource
    }
}

/// The type on whose behalf a property is resolved.
///
/// The owner's path supplies the lookup namespace: the default resource path
/// is the type path with `::` replaced by `/` plus a `.properties` suffix,
/// and the default environment override key is the type path with `::`
/// replaced by `.` plus `.<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    type_path: String,
}

impl Owner {
    /// Derives the owner from a Rust type path via [`std::any::type_name`].
    pub fn of<T: ?Sized>() -> Self {
        Self::named(std::any::type_name::<T>())
    }

    /// An owner with an explicit `::`-separated type path.
    pub fn named(type_path: impl Into<String>) -> Self {
        Self {
            type_path: type_path.into(),
        }
    }

    /// The owner path in dotted form, e.g. `myapp.server.Server`.
    pub fn qualified_name(&self) -> String {
        self.type_path.replace("::", ".")
    }

    /// Default resource path for this owner, e.g. `myapp/server/Server.properties`.
    pub fn resource_path(&self) -> String {
        format!("{}.properties", self.type_path.replace("::", "/"))
    }

    /// Default environment override key for the given property name.
    pub fn override_key(&self, name: &str) -> String {
        format!("{}.{}", self.qualified_name(), name)
    }
}
