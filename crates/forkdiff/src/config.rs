use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use forkdiff_discovery::{ResolverOptions, SecurityMode};

use crate::cli::GlobalArgs;

/// Options from the config file, if any, with command line flags on top.
pub fn load(args: &GlobalArgs) -> anyhow::Result<ResolverOptions> {
    let mut options = match &args.config {
        Some(path) => read_file(path)?,
        None => ResolverOptions::default(),
    };

    if let Some(secs) = args.timeout {
        options = options.timeout(Duration::from_secs(secs));
    }
    if args.insecure {
        options = options.security(SecurityMode::Insecure);
    }
    if let Some(policy) = args.mod_policy {
        options = options.mod_policy(policy);
    }
    Ok(options)
}

fn read_file(path: &Path) -> anyhow::Result<ResolverOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use forkdiff_discovery::ModPolicy;
    use tempfile::NamedTempFile;

    use super::*;

    fn args(config: Option<&Path>) -> GlobalArgs {
        GlobalArgs {
            config: config.map(Path::to_path_buf),
            timeout: None,
            insecure: false,
            mod_policy: None,
            verbose: false,
        }
    }

    fn config_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file() {
        let options = load(&args(None)).unwrap();
        assert_eq!(options, ResolverOptions::default());
    }

    #[test]
    fn test_reads_file() {
        let file = config_file("timeout_secs = 3\nsecurity = \"insecure\"\nmod_policy = \"prefer-mod\"\n");
        let options = load(&args(Some(file.path()))).unwrap();
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert_eq!(options.security, SecurityMode::Insecure);
        assert_eq!(options.mod_policy, ModPolicy::PreferMod);
    }

    #[test]
    fn test_flags_override_file() {
        let file = config_file("timeout_secs = 3\nmod_policy = \"prefer-mod\"\n");
        let mut args = args(Some(file.path()));
        args.timeout = Some(9);
        args.insecure = true;
        args.mod_policy = Some(ModPolicy::IgnoreMod);

        let options = load(&args).unwrap();
        assert_eq!(options.timeout, Duration::from_secs(9));
        assert_eq!(options.security, SecurityMode::Insecure);
        assert_eq!(options.mod_policy, ModPolicy::IgnoreMod);
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let file = config_file("retries = 3\n");
        let err = load(&args(Some(file.path()))).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&args(Some(&dir.path().join("absent.toml")))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
