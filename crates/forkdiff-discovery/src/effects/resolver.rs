use tracing::{debug, warn};

use super::http::HttpClient;
use crate::core::{apply_mod_policy, match_hint, parse_hints, request_for, validate_repo_root};
use crate::data::{DiscoveryRequest, HintRecord, ResolvedRoot, ResolverOptions, Scheme};
use crate::error::{DiscoveryError, Result};

/// Resolves package identifiers to verified repository roots.
///
/// A resolver holds no state besides its client and options, so one instance
/// can serve any number of concurrent callers. Nothing is cached: every call
/// goes back to the network.
pub struct Resolver<C: HttpClient> {
    client: C,
    options: ResolverOptions,
}

impl<C: HttpClient> Resolver<C> {
    pub fn new(client: C, options: ResolverOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `identifier` to the repository root its host publishes.
    ///
    /// When the governing hint was published for a shorter prefix than
    /// `identifier`, the prefix is looked up on its own and both answers must
    /// agree before the root is trusted.
    pub fn resolve(&self, identifier: &str) -> Result<ResolvedRoot> {
        let request = request_for(identifier)?;
        let (url, hints) = self.discover(&request)?;
        let hint = match_hint(&hints, identifier)
            .map_err(|e| DiscoveryError::from_match(&url, e))?
            .clone();
        debug!(%url, identifier, %hint, "matched go-import hint");

        if hint.prefix != identifier {
            self.verify(&url, &hint, identifier)?;
        }

        let root = validate_repo_root(&hint.repo_root).map_err(|source| {
            DiscoveryError::InvalidRepoRoot {
                url: url.clone(),
                repo_root: hint.repo_root.clone(),
                source,
            }
        })?;
        Ok(ResolvedRoot::new(root, hint))
    }

    /// Cross-check `hint` against what the owner of its prefix publishes.
    ///
    /// The prefix owner's document must yield the same hint twice: once for
    /// the prefix itself and once for `identifier`. The second lookup stops
    /// the owner's more specific hints (say `uni.edu/bob` under `uni.edu`)
    /// from being bypassed by a subpath that only repeats the broader one.
    fn verify(&self, url: &str, hint: &HintRecord, identifier: &str) -> Result<()> {
        let mismatch = |verify_url: String, source: Option<DiscoveryError>| {
            DiscoveryError::SecurityMismatch {
                url: url.to_string(),
                verify_url,
                prefix: hint.prefix.clone(),
                source: source.map(Box::new),
            }
        };

        let request =
            request_for(&hint.prefix).map_err(|e| mismatch(hint.prefix.clone(), Some(e)))?;
        debug!(prefix = %hint.prefix, "verifying go-import prefix");

        let (verify_url, hints) = match self.discover(&request) {
            Ok(found) => found,
            Err(e) => {
                let attempted = e
                    .url()
                    .map_or_else(|| self.first_url(&request), str::to_string);
                return Err(mismatch(attempted, Some(e)));
            }
        };
        for target in [hint.prefix.as_str(), identifier] {
            match match_hint(&hints, target) {
                Ok(confirmed) if confirmed == hint => {}
                Ok(confirmed) => {
                    warn!(%url, %verify_url, target, claimed = %hint, published = %confirmed, "go-import prefix disputed");
                    return Err(mismatch(verify_url, None));
                }
                Err(e) => {
                    let source = DiscoveryError::from_match(&verify_url, e);
                    return Err(mismatch(verify_url, Some(source)));
                }
            }
        }
        Ok(())
    }

    /// Fetch and parse the discovery document for `request`.
    fn discover(&self, request: &DiscoveryRequest) -> Result<(String, Vec<HintRecord>)> {
        let (url, body) = self.fetch(request)?;
        let hints = parse_hints(body).map_err(|e| DiscoveryError::from_parse(&url, e))?;
        let hints = apply_mod_policy(hints, self.options.mod_policy);
        if hints.is_empty() {
            return Err(DiscoveryError::NoHints { url });
        }
        Ok((url, hints))
    }

    /// Issue the discovery GET, trying each permitted scheme at most once.
    fn fetch(&self, request: &DiscoveryRequest) -> Result<(String, C::Body)> {
        let headers = self.options.headers();
        let schemes = self.options.security.schemes();

        for (attempt, scheme) in schemes.iter().enumerate() {
            let url = request.url(*scheme);
            debug!(%url, "fetching discovery document");
            match self.client.get(&url, &headers) {
                Ok(body) => return Ok((url, body)),
                Err(e) if attempt + 1 < schemes.len() => {
                    warn!(%url, error = %e, "discovery fetch failed, trying next scheme");
                }
                Err(e) => {
                    return Err(DiscoveryError::Network {
                        url,
                        source: Box::new(e),
                    });
                }
            }
        }

        Err(DiscoveryError::Network {
            url: self.first_url(request),
            source: "no scheme permitted".into(),
        })
    }

    fn first_url(&self, request: &DiscoveryRequest) -> String {
        let scheme = self.options.security.schemes().first().copied();
        request.url(scheme.unwrap_or(Scheme::Https))
    }
}
