//! The property resolution engine.
//!
//! Precedence for a [`Property`] request: an environment override under the
//! computed or explicit key wins outright; otherwise the backing resource is
//! resolved, loaded once per locator into a cache, and the name is looked up
//! with the request's default-value policy applied.

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use url::Url;

use super::env::replace_env_references;
use super::error::ResolveError;
use super::format::PropertySet;
use super::locator::{parse_locator, ResourceUrl, SearchPath};
use super::request::{Format, Owner, Property, Resource};

/// Resolves property requests against the environment and cached property
/// resources.
///
/// The cache is keyed by the canonical locator string and lives as long as
/// the resolver. Intended for single-threaded, per-lookup use; loaded sets
/// are shared via [`Rc`].
#[derive(Debug, Default)]
pub struct PropertyResolver {
    search_path: SearchPath,
    cache: HashMap<String, Rc<PropertySet>>,
}

impl PropertyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver whose `classpath:` lookups use the given search path
    /// instead of the process current directory.
    pub fn with_search_path(search_path: SearchPath) -> Self {
        Self {
            search_path,
            cache: HashMap::new(),
        }
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Resolves a single property to its string value.
    ///
    /// Returns `Ok(None)` when the property is absent and the request
    /// carries no default value.
    pub fn resolve(
        &mut self,
        property: &Property,
        owner: &Owner,
    ) -> Result<Option<String>, ResolveError> {
        let override_key = match property.system_property_key() {
            Some(key) => key.to_string(),
            None => owner.override_key(property.name()),
        };

        if let Ok(value) = std::env::var(&override_key) {
            tracing::debug!(key = %override_key, "resolved from environment override");
            return Ok(Some(value));
        }

        let set = self.properties(property.backing_resource(), owner)?;
        let value = set.get_or(property.name(), property.default());

        Ok(value.map(|value| {
            if property.resolves_environment() {
                replace_env_references(value).into_owned()
            } else {
                value.to_string()
            }
        }))
    }

    /// Resolves a resource request to its whole property set.
    ///
    /// Repeated calls for the same locator return the same cached set.
    pub fn properties(
        &mut self,
        resource: &Resource,
        owner: &Owner,
    ) -> Result<Rc<PropertySet>, ResolveError> {
        let url = resource_url(resource, owner)?;
        self.load(&url, resource.file_format(), resource.is_missing_allowed())
    }

    /// Loads and caches the property set behind an already-resolved URL.
    pub fn load(
        &mut self,
        url: &ResourceUrl,
        format: Format,
        allow_missing: bool,
    ) -> Result<Rc<PropertySet>, ResolveError> {
        let key = url.to_string();

        if let Some(set) = self.cache.get(&key) {
            tracing::debug!(resource = %key, "property set served from cache");
            return Ok(Rc::clone(set));
        }

        let set = match self.read(url, &key) {
            Ok(text) => {
                let parsed = match format {
                    Format::Properties => PropertySet::from_properties(&text),
                    Format::Xml => PropertySet::from_xml(&text),
                };
                parsed.map_err(|source| ResolveError::Parse {
                    locator: key.clone(),
                    source,
                })?
            }
            Err(ResolveError::ResourceNotFound(_)) if allow_missing => {
                tracing::warn!(resource = %key, "resource not found, using empty property set");
                PropertySet::default()
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(resource = %key, entries = set.len(), "loaded property resource");
        let set = Rc::new(set);
        self.cache.insert(key, Rc::clone(&set));
        Ok(set)
    }

    fn read(&self, url: &ResourceUrl, key: &str) -> Result<String, ResolveError> {
        match url {
            ResourceUrl::Classpath(path) => {
                let file = self
                    .search_path
                    .locate(path)
                    .ok_or_else(|| ResolveError::ResourceNotFound(key.to_string()))?;
                read_file(&file, key)
            }
            ResourceUrl::File(path) => read_file(path, key),
            ResourceUrl::UserDir(path) => {
                let current = std::env::current_dir().map_err(|source| ResolveError::Read {
                    locator: key.to_string(),
                    source,
                })?;
                read_file(&current.join(path), key)
            }
            ResourceUrl::Remote(remote) => fetch_remote(remote, key),
        }
    }
}

/// Computes the resource URL for a request, applying the owner default for
/// empty locations and optional env interpolation inside the location.
fn resource_url(resource: &Resource, owner: &Owner) -> Result<ResourceUrl, ResolveError> {
    let location = resource.location();

    if location.is_empty() {
        return Ok(ResourceUrl::Classpath(owner.resource_path()));
    }

    if resource.resolves_environment() {
        parse_locator(&replace_env_references(location))
    } else {
        parse_locator(location)
    }
}

fn read_file(path: &Path, locator: &str) -> Result<String, ResolveError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ResolveError::ResourceNotFound(locator.to_string())
        } else {
            ResolveError::Read {
                locator: locator.to_string(),
                source,
            }
        }
    })
}

fn fetch_remote(url: &Url, locator: &str) -> Result<String, ResolveError> {
    let wrap = |source: reqwest::Error| ResolveError::Fetch {
        locator: locator.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url.clone()).map_err(wrap)?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(ResolveError::ResourceNotFound(locator.to_string()));
    }

    response.error_for_status().map_err(wrap)?.text().map_err(wrap)
}
