use std::fmt;

use url::{Position, Url};

/// Query string that asks a host for its machine-readable discovery page.
pub const DISCOVERY_QUERY: &str = "go-get=1";

/// URL scheme used for a single discovery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovery request derived from a package identifier.
///
/// The scheme is deliberately absent: the resolver picks it per attempt
/// according to its [`SecurityMode`](crate::SecurityMode), and
/// [`DiscoveryRequest::url`] renders the concrete URL for that scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    host: String,
    path: String,
    /// Escaped `host/path?go-get=1`, everything after `scheme://`.
    target: String,
}

impl DiscoveryRequest {
    /// `None` when `host` is not a bare authority, e.g. it carries a query,
    /// a fragment or credentials.
    pub(crate) fn new(host: &str, path: &str) -> Option<Self> {
        let mut url = Url::parse(&format!("https://{host}")).ok()?;
        let bare = url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none()
            && url.username().is_empty()
            && url.password().is_none();
        if !bare {
            return None;
        }

        // `?` and `#` in the path are percent-encoded so the flag stays the query.
        url.set_path(path);
        url.set_query(Some(DISCOVERY_QUERY));
        Some(Self {
            host: host.to_string(),
            path: path.to_string(),
            target: url[Position::BeforeHost..].to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Request path as written in the identifier, `/` when it is a bare host.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &'static str {
        DISCOVERY_QUERY
    }

    /// Render the request URL for the given scheme.
    ///
    /// ```
    /// use forkdiff_discovery::{Scheme, request_for};
    ///
    /// let request = request_for("example.org/pkg").unwrap();
    /// assert_eq!(request.url(Scheme::Https), "https://example.org/pkg?go-get=1");
    /// ```
    pub fn url(&self, scheme: Scheme) -> String {
        format!("{scheme}://{}", self.target)
    }
}

impl fmt::Display for DiscoveryRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}
