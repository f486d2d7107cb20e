use crate::data::HintRecord;
use crate::error::MatchError;

/// Reports whether `sub` is a prefix of `s` made of whole path components.
///
/// ```
/// use forkdiff_discovery::path_prefix;
///
/// assert!(path_prefix("example.org/pkg/sub", "example.org/pkg"));
/// assert!(path_prefix("example.org/pkg", "example.org/pkg"));
/// assert!(!path_prefix("example.org/pkgfoo", "example.org/pkg"));
/// ```
pub fn path_prefix(s: &str, sub: &str) -> bool {
    s.strip_prefix(sub)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Select the hint that governs `identifier`.
///
/// Hints are visited in order. The first matching hint is taken; a later
/// match is tolerated only when the current one is a `mod` hint and the later
/// one is not, because `mod` hints come before all others in a well-formed
/// document and the rest no longer matter. Any other second match is
/// ambiguous.
///
/// Used unchanged for both the primary lookup and the cross-verification.
pub fn match_hint<'a>(
    hints: &'a [HintRecord],
    identifier: &str,
) -> Result<&'a HintRecord, MatchError> {
    let mut matched: Option<&HintRecord> = None;
    let mut mismatches = Vec::new();

    for hint in hints {
        if !path_prefix(identifier, &hint.prefix) {
            mismatches.push(hint.prefix.clone());
            continue;
        }
        if let Some(current) = matched {
            if current.kind.is_mod() && !hint.kind.is_mod() {
                break;
            }
            return Err(MatchError::Ambiguous {
                identifier: identifier.to_string(),
            });
        }
        matched = Some(hint);
    }

    matched.ok_or_else(|| MatchError::NoMatch {
        identifier: identifier.to_string(),
        mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::HintKind;

    fn hint(prefix: &str, kind: &str, root: &str) -> HintRecord {
        HintRecord::new(prefix, HintKind::parse(kind), root)
    }

    #[test]
    fn test_path_prefix_respects_components() {
        assert!(path_prefix("a.org/b/c", "a.org"));
        assert!(path_prefix("a.org/b/c", "a.org/b"));
        assert!(path_prefix("a.org/b/c", "a.org/b/c"));
        assert!(!path_prefix("a.org/bc", "a.org/b"));
        assert!(!path_prefix("a.org/b", "a.org/b/c"));
        assert!(!path_prefix("a.org", "a.or"));
    }

    #[test]
    fn test_prefix_with_slash_boundary_matches() {
        let hints = [hint("example.org/pkg", "git", "https://example.org/pkg.git")];
        let matched = match_hint(&hints, "example.org/pkg/sub").unwrap();
        assert_eq!(matched.repo_root, "https://example.org/pkg.git");
    }

    #[test]
    fn test_string_prefix_alone_does_not_match() {
        let hints = [hint("example.org/pkg", "git", "https://example.org/pkg.git")];
        assert_eq!(
            match_hint(&hints, "example.org/pkgfoo"),
            Err(MatchError::NoMatch {
                identifier: "example.org/pkgfoo".to_string(),
                mismatches: vec!["example.org/pkg".to_string()],
            })
        );
    }

    #[test]
    fn test_only_matching_prefix_is_eligible() {
        let hints = [
            hint("a.org/x", "git", "https://x.example"),
            hint("a.org/b", "git", "https://y.example"),
        ];
        let matched = match_hint(&hints, "a.org/b/c").unwrap();
        assert_eq!(matched.repo_root, "https://y.example");
    }

    #[test]
    fn test_nested_prefixes_of_same_kind_are_ambiguous() {
        let hints = [
            hint("a.org", "git", "https://x.example"),
            hint("a.org/b", "git", "https://y.example"),
        ];
        assert_eq!(
            match_hint(&hints, "a.org/b/c"),
            Err(MatchError::Ambiguous {
                identifier: "a.org/b/c".to_string()
            })
        );
    }

    #[test]
    fn test_mixed_vcs_kinds_are_ambiguous() {
        let hints = [
            hint("a.org/b", "git", "https://x.example"),
            hint("a.org/b", "hg", "https://y.example"),
        ];
        assert!(matches!(
            match_hint(&hints, "a.org/b"),
            Err(MatchError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_two_mod_hints_are_ambiguous() {
        let hints = [
            hint("a.org/b", "mod", "https://p1.example"),
            hint("a.org/b", "mod", "https://p2.example"),
        ];
        assert!(matches!(
            match_hint(&hints, "a.org/b"),
            Err(MatchError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_mod_hint_shadows_later_vcs_hints() {
        let hints = [
            hint("a.org/b", "mod", "https://proxy.example"),
            hint("a.org/b", "git", "https://x.example"),
            hint("a.org/b", "git", "https://y.example"),
        ];
        let matched = match_hint(&hints, "a.org/b/c").unwrap();
        assert!(matched.kind.is_mod());
        assert_eq!(matched.repo_root, "https://proxy.example");
    }

    #[test]
    fn test_vcs_then_mod_is_ambiguous() {
        let hints = [
            hint("a.org/b", "git", "https://x.example"),
            hint("a.org/b", "mod", "https://proxy.example"),
        ];
        assert!(matches!(
            match_hint(&hints, "a.org/b"),
            Err(MatchError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_no_match_collects_every_rejected_prefix() {
        let hints = [
            hint("a.org/x", "git", "https://x.example"),
            hint("a.org/y", "mod", "https://y.example"),
        ];
        match match_hint(&hints, "a.org/z") {
            Err(MatchError::NoMatch { mismatches, .. }) => {
                assert_eq!(mismatches, vec!["a.org/x", "a.org/y"]);
            }
            other => panic!("expected NoMatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_hints_is_no_match() {
        assert!(matches!(
            match_hint(&[], "a.org/z"),
            Err(MatchError::NoMatch { .. })
        ));
    }
}
