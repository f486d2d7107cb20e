//! Error types for forkdiff-discovery.

use std::io;

use thiserror::Error;

/// Failure of a whole resolution. Every variant is terminal.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("import path '{identifier}' does not begin with hostname")]
    MalformedIdentifier { identifier: String },

    #[error("unable to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("parse {url}: can't decode document using charset '{charset}'")]
    UnsupportedEncoding { url: String, charset: String },

    #[error("parse {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("parse {url}: no go-import meta tags found")]
    NoHints { url: String },

    #[error("parse {url}: no go-import meta tags ({})", describe_mismatches(.identifier, .mismatches))]
    NoMatch {
        url: String,
        identifier: String,
        mismatches: Vec<String>,
    },

    #[error("parse {url}: multiple meta tags match import path '{identifier}'")]
    AmbiguousMatch { url: String, identifier: String },

    #[error("{url} and {verify_url} disagree about go-import for {prefix}")]
    SecurityMismatch {
        url: String,
        verify_url: String,
        prefix: String,
        #[source]
        source: Option<Box<DiscoveryError>>,
    },

    #[error("{url}: invalid repo root '{repo_root}': {source}")]
    InvalidRepoRoot {
        url: String,
        repo_root: String,
        #[source]
        source: RootError,
    },
}

impl DiscoveryError {
    pub(crate) fn from_parse(url: &str, err: ParseError) -> Self {
        let url = url.to_string();
        match err {
            ParseError::UnsupportedEncoding(charset) => Self::UnsupportedEncoding { url, charset },
            ParseError::NoHints => Self::NoHints { url },
            ParseError::Io(source) => Self::Io { url, source },
        }
    }

    pub(crate) fn from_match(url: &str, err: MatchError) -> Self {
        let url = url.to_string();
        match err {
            MatchError::NoMatch {
                identifier,
                mismatches,
            } => Self::NoMatch {
                url,
                identifier,
                mismatches,
            },
            MatchError::Ambiguous { identifier } => Self::AmbiguousMatch { url, identifier },
        }
    }

    /// Discovery URL the failure happened at, the last one attempted for
    /// network failures. `None` when no request was built.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::MalformedIdentifier { .. } => None,
            Self::Network { url, .. }
            | Self::UnsupportedEncoding { url, .. }
            | Self::Io { url, .. }
            | Self::NoHints { url }
            | Self::NoMatch { url, .. }
            | Self::AmbiguousMatch { url, .. }
            | Self::SecurityMismatch { url, .. }
            | Self::InvalidRepoRoot { url, .. } => Some(url),
        }
    }
}

/// Failure while scanning a discovery document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("can't decode document using charset '{0}'")]
    UnsupportedEncoding(String),

    #[error("no go-import meta tags found")]
    NoHints,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure while selecting a hint for an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("{}", describe_mismatches(.identifier, .mismatches))]
    NoMatch {
        identifier: String,
        mismatches: Vec<String>,
    },

    #[error("multiple meta tags match import path '{identifier}'")]
    Ambiguous { identifier: String },
}

/// Why a published repository root was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RootError {
    #[error("no scheme")]
    NoScheme,

    #[error("file scheme disallowed")]
    FileScheme,

    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

fn describe_mismatches(identifier: &str, mismatches: &[String]) -> String {
    mismatches
        .iter()
        .map(|prefix| format!("meta tag {prefix} did not match import path {identifier}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
