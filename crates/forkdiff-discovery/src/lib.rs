//! Vanity import path discovery with cross-verified repository roots.
//!
//! Given an identifier such as `example.org/pkg/sub`, fetch
//! `https://example.org/pkg/sub?go-get=1`, read the
//! `<meta name="go-import" content="prefix kind repo-root">` tags from the
//! document head, pick the one that governs the identifier, and confirm the
//! claim with the owner of the claimed prefix before trusting it.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable configuration and types
//! - `core` - Pure transformations (request building, parsing, matching, validation)
//! - `effects` - I/O operations with trait abstraction
//!
//! # Example
//!
//! ```no_run
//! use forkdiff_discovery::{ReqwestClient, Resolver, ResolverOptions};
//!
//! let options = ResolverOptions::default();
//! let client = ReqwestClient::new(&options).unwrap();
//! let resolver = Resolver::new(client, options);
//! let root = resolver.resolve("golang.org/x/tools/cmd/goimports").unwrap();
//! println!("{root}");
//! ```

mod core;
mod data;
mod effects;
mod error;

pub use self::core::{
    apply_mod_policy, match_hint, parse_hints, path_prefix, request_for, validate_repo_root,
};
pub use self::data::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, DISCOVERY_QUERY, DiscoveryRequest, GO_IMPORT, HintKind,
    HintRecord, ModPolicy, ParsePolicyError, ResolvedRoot, ResolverOptions, Scheme, SecurityMode,
};
pub use self::effects::{HttpClient, Resolver};
pub use self::error::{DiscoveryError, MatchError, ParseError, Result, RootError};

#[cfg(feature = "reqwest")]
pub use self::effects::ReqwestClient;
