//! Immutable data types for discovery.
//!
//! Everything here is created fresh inside a single resolution and never
//! mutated afterwards. Configuration lives in [`options`].

pub mod hint;
pub mod options;
pub mod request;
pub mod root;

pub use hint::{GO_IMPORT, HintKind, HintRecord};
pub use options::{
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, ModPolicy, ParsePolicyError, ResolverOptions,
    SecurityMode,
};
pub use request::{DISCOVERY_QUERY, DiscoveryRequest, Scheme};
pub use root::ResolvedRoot;
