use std::fmt;

/// Value of the `name` attribute that marks a discovery meta tag.
pub const GO_IMPORT: &str = "go-import";

const MOD_KIND: &str = "mod";

/// What a hint points at: a module proxy or a version-control checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HintKind {
    /// Module-aware hint (`mod`).
    Mod,
    /// Legacy hint naming a version-control system (`git`, `hg`, ...).
    Vcs(String),
}

impl HintKind {
    pub fn parse(kind: &str) -> Self {
        if kind == MOD_KIND {
            HintKind::Mod
        } else {
            HintKind::Vcs(kind.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HintKind::Mod => MOD_KIND,
            HintKind::Vcs(vcs) => vcs,
        }
    }

    pub fn is_mod(&self) -> bool {
        matches!(self, HintKind::Mod)
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<meta name="go-import" content="prefix kind repo-root">` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintRecord {
    /// Import path prefix the host claims authority over.
    pub prefix: String,
    pub kind: HintKind,
    /// Repository URL as published, not yet validated.
    pub repo_root: String,
}

impl HintRecord {
    pub fn new(prefix: impl Into<String>, kind: HintKind, repo_root: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            kind,
            repo_root: repo_root.into(),
        }
    }

    /// Build a record from a `content` attribute.
    ///
    /// Returns `None` unless the content has exactly three whitespace-separated
    /// fields.
    pub fn from_content(content: &str) -> Option<Self> {
        let mut fields = content.split_whitespace();
        let (Some(prefix), Some(kind), Some(repo_root), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return None;
        };
        Some(Self::new(prefix, HintKind::parse(kind), repo_root))
    }
}

impl fmt::Display for HintRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.prefix, self.kind, self.repo_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_three_fields() {
        let hint = HintRecord::from_content("example.org/pkg git https://example.org/pkg.git")
            .unwrap();
        assert_eq!(hint.prefix, "example.org/pkg");
        assert_eq!(hint.kind, HintKind::Vcs("git".to_string()));
        assert_eq!(hint.repo_root, "https://example.org/pkg.git");
    }

    #[test]
    fn test_from_content_tolerates_extra_whitespace() {
        let hint = HintRecord::from_content("  example.org/pkg \n mod\thttps://proxy.example.org ")
            .unwrap();
        assert!(hint.kind.is_mod());
        assert_eq!(hint.repo_root, "https://proxy.example.org");
    }

    #[test]
    fn test_from_content_wrong_field_count() {
        assert!(HintRecord::from_content("").is_none());
        assert!(HintRecord::from_content("example.org/pkg git").is_none());
        assert!(HintRecord::from_content("example.org/pkg git https://a https://b").is_none());
    }

    #[test]
    fn test_kind_is_case_sensitive() {
        assert_eq!(HintKind::parse("MOD"), HintKind::Vcs("MOD".to_string()));
        assert_eq!(HintKind::parse("mod"), HintKind::Mod);
    }
}
