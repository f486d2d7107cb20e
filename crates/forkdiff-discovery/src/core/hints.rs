use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};

use tracing::debug;

use super::markup::{Token, Tokenizer, attr_value};
use crate::data::{GO_IMPORT, HintRecord, ModPolicy};
use crate::error::ParseError;

/// Collect the go-import hints from a discovery document.
///
/// Scanning stops at the first `<body>` start tag or `</head>` end tag; no
/// content after that point is inspected. Hints are returned in document
/// order. A read error is reported only if no hint has been collected yet,
/// otherwise the hints found so far are returned.
///
/// # Examples
///
/// ```
/// use forkdiff_discovery::parse_hints;
///
/// let doc = r#"<html><head>
///   <meta name="go-import" content="example.org/pkg git https://example.org/pkg.git">
/// </head></html>"#;
/// let hints = parse_hints(doc.as_bytes()).unwrap();
/// assert_eq!(hints[0].repo_root, "https://example.org/pkg.git");
/// ```
pub fn parse_hints<R: Read>(reader: R) -> Result<Vec<HintRecord>, ParseError> {
    let mut tokens = Tokenizer::new(BufReader::new(reader));
    let mut hints = Vec::new();

    loop {
        let token = match next_checked(&mut tokens) {
            Ok(Some(token)) => token,
            Ok(None) => break,
            Err(e) if hints.is_empty() => return Err(e),
            Err(e) => {
                debug!(error = %e, found = hints.len(), "stopping scan early");
                break;
            }
        };

        match token {
            Token::Start { name, .. } if name.eq_ignore_ascii_case("body") => break,
            Token::End { name } if name.eq_ignore_ascii_case("head") => break,
            Token::Start { name, attrs } if name.eq_ignore_ascii_case("meta") => {
                if !attr_value(&attrs, "name").is_some_and(|v| v.eq_ignore_ascii_case(GO_IMPORT)) {
                    continue;
                }
                let content = attr_value(&attrs, "content").unwrap_or_default();
                match HintRecord::from_content(content) {
                    Some(hint) => hints.push(hint),
                    None => debug!(content, "skipping malformed go-import tag"),
                }
            }
            _ => {}
        }
    }

    if hints.is_empty() {
        return Err(ParseError::NoHints);
    }
    Ok(hints)
}

fn next_checked<R: BufRead>(tokens: &mut Tokenizer<R>) -> Result<Option<Token>, ParseError> {
    let token = tokens.next_token()?;
    if let Some(Token::Declaration {
        encoding: Some(charset),
    }) = &token
    {
        check_charset(charset)?;
    }
    Ok(token)
}

/// Only UTF-8 and ASCII documents are read; ASCII is read as UTF-8.
fn check_charset(charset: &str) -> Result<(), ParseError> {
    if charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("ascii") {
        Ok(())
    } else {
        Err(ParseError::UnsupportedEncoding(charset.to_string()))
    }
}

/// Filter parsed hints according to the module policy.
///
/// ```
/// use forkdiff_discovery::{HintKind, HintRecord, ModPolicy, apply_mod_policy};
///
/// let hints = vec![
///     HintRecord::new("example.org/pkg", HintKind::Mod, "https://proxy.example.org"),
///     HintRecord::new("example.org/pkg", HintKind::parse("git"), "https://example.org/pkg.git"),
/// ];
/// let kept = apply_mod_policy(hints, ModPolicy::IgnoreMod);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].kind.as_str(), "git");
/// ```
pub fn apply_mod_policy(hints: Vec<HintRecord>, policy: ModPolicy) -> Vec<HintRecord> {
    match policy {
        ModPolicy::AsPublished => hints,
        ModPolicy::IgnoreMod => hints.into_iter().filter(|hint| !hint.kind.is_mod()).collect(),
        ModPolicy::PreferMod => {
            let (mods, others): (Vec<_>, Vec<_>) =
                hints.into_iter().partition(|hint| hint.kind.is_mod());
            let superseded: HashSet<String> = mods.iter().map(|hint| hint.prefix.clone()).collect();
            mods.into_iter()
                .chain(others.into_iter().filter(|hint| !superseded.contains(&hint.prefix)))
                .collect()
        }
    }
}
