//! Pure transformations for discovery.
//!
//! Nothing in this module performs network I/O. The hint parser reads from
//! any [`std::io::Read`], so it is driven by the effects layer in production
//! and by in-memory documents in tests.

mod hints;
mod markup;
mod matching;
mod request;
mod root;

pub use hints::{apply_mod_policy, parse_hints};
pub use matching::{match_hint, path_prefix};
pub use request::request_for;
pub use root::validate_repo_root;
