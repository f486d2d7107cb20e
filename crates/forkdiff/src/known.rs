const GITHUB_PREFIX: &str = "github.com/";

/// Repository root for hosts whose layout is known, without any discovery.
///
/// `github.com/<org>/<repo>/...` always lives at `https://github.com/<org>/<repo>`.
pub fn known_root(identifier: &str) -> Option<String> {
    let rest = identifier.strip_prefix(GITHUB_PREFIX)?;
    let mut parts = rest.split('/');
    let (Some(org), Some(repo)) = (parts.next(), parts.next()) else {
        return None;
    };
    if org.is_empty() || repo.is_empty() {
        return None;
    }
    Some(format!("https://github.com/{org}/{repo}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_repo_root() {
        assert_eq!(
            known_root("github.com/rancher/kubernetes/staging/src/k8s.io/api").as_deref(),
            Some("https://github.com/rancher/kubernetes")
        );
        assert_eq!(
            known_root("github.com/acme/widget").as_deref(),
            Some("https://github.com/acme/widget")
        );
    }

    #[test]
    fn test_short_github_paths_fall_through() {
        assert_eq!(known_root("github.com/acme"), None);
        assert_eq!(known_root("github.com/"), None);
        assert_eq!(known_root("github.com//widget"), None);
    }

    #[test]
    fn test_other_hosts_fall_through() {
        assert_eq!(known_root("k8s.io/api"), None);
        assert_eq!(known_root("gitlab.com/acme/widget"), None);
        assert_eq!(known_root("github.company.com/acme/widget"), None);
    }
}
