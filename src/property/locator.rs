//! Resource locator resolution.
//!
//! A locator is a URI-like string naming where a property file lives.
//! Recognized schemes are `classpath:` (search-path lookup), `file:`,
//! `http:`/`https:` and the `user-dir:` pseudo-scheme (relative to the
//! process current directory). Scheme-less locators are classpath lookups.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use super::error::ResolveError;

/// A fully resolved resource location. Its display form is canonical and
/// serves as the cache key for the loaded property set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUrl {
    /// A path looked up on the resolver's [`SearchPath`].
    Classpath(String),
    /// A filesystem path, absolute or relative to the process directory.
    File(PathBuf),
    /// A path resolved against [`std::env::current_dir`] at open time.
    UserDir(PathBuf),
    /// A remote `http:` or `https:` resource.
    Remote(Url),
}

impl fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classpath(path) => write!(f, "classpath:{path}"),
            Self::File(path) => write!(f, "file:{}", path.display()),
            Self::UserDir(path) => write!(f, "user-dir:{}", path.display()),
            Self::Remote(url) => f.write_str(url.as_str()),
        }
    }
}

/// Parses a non-empty locator string into a [`ResourceUrl`].
pub fn parse_locator(location: &str) -> Result<ResourceUrl, ResolveError> {
    let Some((scheme, rest)) = split_scheme(location) else {
        return Ok(ResourceUrl::Classpath(classpath_resource(location)));
    };

    match scheme {
        "classpath" => Ok(ResourceUrl::Classpath(classpath_resource(rest))),
        "file" => Ok(ResourceUrl::File(file_path(rest))),
        "user-dir" => Ok(ResourceUrl::UserDir(PathBuf::from(
            rest.trim_start_matches('/'),
        ))),
        "http" | "https" => {
            let url = Url::parse(location).map_err(|source| ResolveError::MalformedLocator {
                locator: location.to_string(),
                source,
            })?;
            Ok(ResourceUrl::Remote(url))
        }
        other => Err(ResolveError::UnsupportedScheme {
            scheme: other.to_string(),
            locator: location.to_string(),
        }),
    }
}

/// Splits off a leading URI scheme. Returns `None` when the string has no
/// scheme, so that plain paths (including ones containing `:` later on)
/// fall through to classpath lookup.
fn split_scheme(location: &str) -> Option<(&str, &str)> {
    let idx = location.find(':')?;
    let (scheme, rest) = (&location[..idx], &location[idx + 1..]);

    let mut chars = scheme.chars();
    let valid = matches!(chars.next(), Some(first) if first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid.then_some((scheme, rest))
}

/// Classpath resources are always relative to a search-path root; a leading
/// `/` would otherwise make `Path::join` discard the root entirely.
fn classpath_resource(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

/// Normalizes the path part of a `file:` locator. `file:///x`, `file:/x`
/// and `file:x` are all accepted; any authority slashes collapse into a
/// single root slash.
fn file_path(rest: &str) -> PathBuf {
    if rest.starts_with('/') {
        PathBuf::from(format!("/{}", rest.trim_start_matches('/')))
    } else {
        PathBuf::from(rest)
    }
}

/// Ordered list of root directories searched for `classpath:` resources.
///
/// This stands in for the host classpath: each root is tried in order and
/// the first existing file wins.
#[derive(Debug, Clone)]
pub struct SearchPath {
    roots: Vec<PathBuf>,
}

impl Default for SearchPath {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from(".")],
        }
    }
}

impl SearchPath {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// Returns the first root under which `resource` exists.
    pub fn locate(&self, resource: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(resource))
            .find(|candidate| candidate.is_file())
    }

    pub fn roots(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_less_is_classpath() {
        let url = parse_locator("conf/app.properties").unwrap();
        assert_eq!(url, ResourceUrl::Classpath("conf/app.properties".into()));
        assert_eq!(url.to_string(), "classpath:conf/app.properties");
    }

    #[test]
    fn test_explicit_classpath_scheme() {
        let url = parse_locator("classpath:conf/app.properties").unwrap();
        assert_eq!(url, ResourceUrl::Classpath("conf/app.properties".into()));
    }

    #[test]
    fn test_classpath_leading_slash_stays_root_relative() {
        let url = parse_locator("classpath:/conf/app.properties").unwrap();
        assert_eq!(url, ResourceUrl::Classpath("conf/app.properties".into()));

        let scheme_less = parse_locator("/conf/app.properties").unwrap();
        assert_eq!(
            scheme_less,
            ResourceUrl::Classpath("conf/app.properties".into())
        );
    }

    #[test]
    fn test_file_scheme_relative() {
        let url = parse_locator("file:target/app.properties").unwrap();
        assert_eq!(url, ResourceUrl::File(PathBuf::from("target/app.properties")));
    }

    #[test]
    fn test_file_scheme_authority_slashes_collapse() {
        let url = parse_locator("file:////tmp/app.properties").unwrap();
        assert_eq!(url, ResourceUrl::File(PathBuf::from("/tmp/app.properties")));
    }

    #[test]
    fn test_user_dir_scheme() {
        let url = parse_locator("user-dir:conf/app.properties").unwrap();
        assert_eq!(url, ResourceUrl::UserDir(PathBuf::from("conf/app.properties")));
    }

    #[test]
    fn test_http_scheme() {
        let url = parse_locator("http://example.com/app.properties").unwrap();
        assert!(matches!(url, ResourceUrl::Remote(_)));
        assert_eq!(url.to_string(), "http://example.com/app.properties");
    }

    #[test]
    fn test_malformed_http_locator() {
        let result = parse_locator("http://[invalid");
        assert!(matches!(result, Err(ResolveError::MalformedLocator { .. })));
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = parse_locator("ftp://example.com/app.properties");
        assert!(matches!(
            result,
            Err(ResolveError::UnsupportedScheme { ref scheme, .. }) if scheme == "ftp"
        ));
    }

    #[test]
    fn test_colon_in_path_is_not_a_scheme() {
        let url = parse_locator("conf/app:v2.properties").unwrap();
        assert_eq!(url, ResourceUrl::Classpath("conf/app:v2.properties".into()));
    }

    #[test]
    fn test_search_path_first_root_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("a.properties"), "x=1").unwrap();
        std::fs::write(second.path().join("a.properties"), "x=2").unwrap();

        let path = SearchPath::new([first.path(), second.path()]);
        assert_eq!(
            path.locate("a.properties"),
            Some(first.path().join("a.properties"))
        );
    }

    #[test]
    fn test_search_path_miss() {
        let root = tempfile::tempdir().unwrap();
        let path = SearchPath::new([root.path()]);
        assert_eq!(path.locate("missing.properties"), None);
    }
}
