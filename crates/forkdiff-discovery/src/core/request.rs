use crate::data::DiscoveryRequest;
use crate::error::{DiscoveryError, Result};

/// Build the discovery request for a package identifier.
///
/// The identifier is split at its first `/`: the part before is the host and
/// must contain a `.`, the rest (or `/`) is the request path. Characters in
/// the path that would end it early are percent-encoded.
///
/// # Examples
///
/// ```
/// use forkdiff_discovery::request_for;
///
/// let request = request_for("example.org").unwrap();
/// assert_eq!(request.host(), "example.org");
/// assert_eq!(request.path(), "/");
///
/// assert!(request_for("localhost/pkg").is_err());
/// ```
pub fn request_for(identifier: &str) -> Result<DiscoveryRequest> {
    let (host, path) = match identifier.find('/') {
        Some(slash) => identifier.split_at(slash),
        None => (identifier, ""),
    };
    let malformed = || DiscoveryError::MalformedIdentifier {
        identifier: identifier.to_string(),
    };
    if !host.contains('.') {
        return Err(malformed());
    }
    let path = if path.is_empty() { "/" } else { path };
    DiscoveryRequest::new(host, path).ok_or_else(malformed)
}
