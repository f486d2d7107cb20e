use std::fmt;

use url::Url;

use super::hint::HintRecord;

/// A repository root that passed cross-verification and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoot {
    url: Url,
    hint: HintRecord,
}

impl ResolvedRoot {
    pub(crate) fn new(url: Url, hint: HintRecord) -> Self {
        Self { url, hint }
    }

    /// The repository root exactly as the host published it.
    pub fn as_str(&self) -> &str {
        &self.hint.repo_root
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The hint the root was taken from.
    pub fn hint(&self) -> &HintRecord {
        &self.hint
    }

    pub fn into_url(self) -> Url {
        self.url
    }
}

impl fmt::Display for ResolvedRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
