use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use super::request::Scheme;

/// Timeout applied to every discovery request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// `User-Agent` sent with every discovery request.
pub const DEFAULT_USER_AGENT: &str = "forkdiff";

/// Which schemes a discovery request may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityMode {
    /// `https` only.
    #[default]
    Secure,
    /// `https`, falling back to `http` when the `https` attempt cannot connect.
    Insecure,
}

impl SecurityMode {
    /// Schemes to attempt, in order.
    pub fn schemes(&self) -> &'static [Scheme] {
        match self {
            SecurityMode::Secure => &[Scheme::Https],
            SecurityMode::Insecure => &[Scheme::Https, Scheme::Http],
        }
    }
}

/// How module-aware (`mod`) hints are treated before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModPolicy {
    /// Use hints in document order, exactly as published.
    #[default]
    AsPublished,
    /// Move `mod` hints to the front and drop non-`mod` hints they supersede.
    PreferMod,
    /// Drop every `mod` hint.
    IgnoreMod,
}

impl ModPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModPolicy::AsPublished => "as-published",
            ModPolicy::PreferMod => "prefer-mod",
            ModPolicy::IgnoreMod => "ignore-mod",
        }
    }
}

impl fmt::Display for ModPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown mod policy '{0}' (expected as-published, prefer-mod or ignore-mod)")]
pub struct ParsePolicyError(pub String);

impl FromStr for ModPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "as-published" => Ok(ModPolicy::AsPublished),
            "prefer-mod" => Ok(ModPolicy::PreferMod),
            "ignore-mod" => Ok(ModPolicy::IgnoreMod),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Configuration for a [`Resolver`](crate::Resolver).
///
/// # Examples
///
/// ```
/// use forkdiff_discovery::{ModPolicy, ResolverOptions, SecurityMode};
/// use std::time::Duration;
///
/// let options = ResolverOptions::default()
///     .timeout(Duration::from_secs(5))
///     .security(SecurityMode::Insecure)
///     .mod_policy(ModPolicy::IgnoreMod);
/// assert_eq!(options.user_agent, "forkdiff");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverOptions {
    /// Per-request timeout. This is the only cancellation mechanism.
    ///
    /// Default: 20 seconds
    #[serde(rename = "timeout_secs", deserialize_with = "deserialize_secs")]
    pub timeout: Duration,

    /// Value of the `User-Agent` header.
    ///
    /// Default: `forkdiff`
    pub user_agent: String,

    /// Default: [`SecurityMode::Secure`]
    pub security: SecurityMode,

    /// Default: [`ModPolicy::AsPublished`]
    pub mod_policy: ModPolicy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            security: SecurityMode::default(),
            mod_policy: ModPolicy::default(),
        }
    }
}

impl ResolverOptions {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn security(mut self, security: SecurityMode) -> Self {
        self.security = security;
        self
    }

    #[must_use]
    pub fn mod_policy(mut self, mod_policy: ModPolicy) -> Self {
        self.mod_policy = mod_policy;
        self
    }

    /// Headers sent with every discovery request.
    pub fn headers(&self) -> Vec<(String, String)> {
        vec![("User-Agent".to_string(), self.user_agent.clone())]
    }
}

fn deserialize_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ResolverOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(20));
        assert_eq!(options.user_agent, "forkdiff");
        assert_eq!(options.security, SecurityMode::Secure);
        assert_eq!(options.mod_policy, ModPolicy::AsPublished);
    }

    #[test]
    fn test_secure_mode_is_https_only() {
        assert_eq!(SecurityMode::Secure.schemes(), &[Scheme::Https]);
        assert_eq!(
            SecurityMode::Insecure.schemes(),
            &[Scheme::Https, Scheme::Http]
        );
    }

    #[test]
    fn test_headers_carry_user_agent() {
        let options = ResolverOptions::default().user_agent("probe/1.0");
        assert_eq!(
            options.headers(),
            vec![("User-Agent".to_string(), "probe/1.0".to_string())]
        );
    }

    #[test]
    fn test_mod_policy_from_str() {
        assert_eq!("prefer-mod".parse::<ModPolicy>().unwrap(), ModPolicy::PreferMod);
        assert_eq!("ignore-mod".parse::<ModPolicy>().unwrap(), ModPolicy::IgnoreMod);
        assert!("sometimes".parse::<ModPolicy>().is_err());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let options: ResolverOptions = toml::from_str(
            r#"
            timeout_secs = 5
            security = "insecure"
            "#,
        )
        .unwrap();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.security, SecurityMode::Insecure);
        assert_eq!(options.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(options.mod_policy, ModPolicy::AsPublished);
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let result: Result<ResolverOptions, _> = toml::from_str("retries = 3");
        assert!(result.is_err());
    }
}
