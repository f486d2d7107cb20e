use url::Url;

use crate::error::RootError;

/// Check that a published repository root is an absolute URL with a usable
/// scheme. `file` URLs are refused so discovery can never point later
/// operations at a local path.
///
/// ```
/// use forkdiff_discovery::validate_repo_root;
///
/// assert!(validate_repo_root("https://example.org/pkg.git").is_ok());
/// assert!(validate_repo_root("file:///tmp/x").is_err());
/// assert!(validate_repo_root("pkg.git").is_err());
/// ```
pub fn validate_repo_root(repo_root: &str) -> Result<Url, RootError> {
    let url = Url::parse(repo_root).map_err(|e| match e {
        url::ParseError::RelativeUrlWithoutBase => RootError::NoScheme,
        other => RootError::Parse(other),
    })?;
    if url.scheme().is_empty() {
        return Err(RootError::NoScheme);
    }
    if url.scheme() == "file" {
        return Err(RootError::FileScheme);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_remote_schemes() {
        for root in [
            "https://example.org/pkg.git",
            "http://example.org/pkg",
            "ssh://git@example.org/pkg.git",
            "git+ssh://example.org/pkg",
            "svn://example.org/trunk",
        ] {
            assert!(validate_repo_root(root).is_ok(), "{root} should be accepted");
        }
    }

    #[test]
    fn test_rejects_file_scheme() {
        assert_eq!(validate_repo_root("file:///tmp/x"), Err(RootError::FileScheme));
        assert_eq!(validate_repo_root("FILE:///tmp/x"), Err(RootError::FileScheme));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert_eq!(validate_repo_root("pkg.git"), Err(RootError::NoScheme));
        assert_eq!(validate_repo_root("/srv/git/pkg.git"), Err(RootError::NoScheme));
        assert_eq!(validate_repo_root(""), Err(RootError::NoScheme));
    }

    #[test]
    fn test_rejects_unparsable_url() {
        assert!(matches!(
            validate_repo_root("https://exa mple.org/pkg"),
            Err(RootError::Parse(_))
        ));
    }

    #[test]
    fn test_keeps_parsed_url() {
        let url = validate_repo_root("https://example.org/pkg.git").unwrap();
        assert_eq!(url.host_str(), Some("example.org"));
        assert_eq!(url.path(), "/pkg.git");
    }
}
