//! Local configuration

use std::path::Path;

use anyhow::Context as _;

/// Local configuration
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Quota object selection
    pub(crate) quota: QuotaConfig,

    /// Usage column config
    pub(crate) usage: UsageConfig,
}

/// Quota object selection
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct QuotaConfig {
    /// Exclude quota objects whose name match any of theses regexs
    #[serde(with = "serde_regex")]
    pub(crate) name_blacklist: Vec<regex::Regex>,
    /// Exclude quota objects whose namespace match any of theses regexs
    #[serde(with = "serde_regex")]
    pub(crate) namespace_blacklist: Vec<regex::Regex>,
}

impl QuotaConfig {
    /// Whether a quota object should be hidden
    pub(crate) fn is_excluded(&self, name: &str, namespace: Option<&str>) -> bool {
        self.name_blacklist.iter().any(|r| r.is_match(name))
            || namespace.is_some_and(|ns| self.namespace_blacklist.iter().any(|r| r.is_match(ns)))
    }
}

/// Usage column config
#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub(crate) struct UsageConfig {
    /// Percentage from which usage is shown as a warning
    pub(crate) warning: f64,
    /// Percentage from which usage is shown as critical
    pub(crate) critical: f64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            warning: 85.0,
            critical: 95.0,
        }
    }
}

/// Parse configuration from an explicit file
pub(crate) fn parse_config_file(path: &Path) -> anyhow::Result<Config> {
    let toml_data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    toml::from_str(&toml_data).with_context(|| format!("Invalid config file {:?}", path))
}

/// Parse local configuration
pub(crate) fn parse_config() -> anyhow::Result<Config> {
    let binary_name = env!("CARGO_PKG_NAME");
    let xdg_dirs = xdg::BaseDirectories::with_prefix(binary_name);
    let config = if let Some(config_filepath) = xdg_dirs.find_config_file("config.toml") {
        log::debug!("Using config file {:?}", config_filepath);
        parse_config_file(&config_filepath)?
    } else {
        Config::default()
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;

    use super::*;

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[quota]\nname_blacklist = [\"^tmp-\"]\nnamespace_blacklist = [\"^kube-\"]\n\n[usage]\nwarning = 70.0\n",
        )
        .unwrap();

        let cfg = parse_config_file(&path).unwrap();
        assert_eq!(cfg.usage.warning, 70.0);
        assert_eq!(cfg.usage.critical, 95.0);
        assert!(cfg.quota.is_excluded("tmp-quota", None));
        assert!(cfg.quota.is_excluded("compute", Some("kube-system")));
        assert!(!cfg.quota.is_excluded("compute", Some("default")));
        assert!(!cfg.quota.is_excluded("compute", None));
    }

    #[test]
    fn test_parse_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[quota]\nname_blacklist = [\"(\"]\n").unwrap();
        assert!(parse_config_file(&path).is_err());
        assert!(parse_config_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_parse_config_xdg() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(env!("CARGO_PKG_NAME"));
        fs::create_dir_all(&cfg_dir).unwrap();
        fs::write(cfg_dir.join("config.toml"), "[usage]\ncritical = 99.5\n").unwrap();

        let prev = env::var_os("XDG_CONFIG_HOME");
        env::set_var("XDG_CONFIG_HOME", dir.path());
        let cfg = parse_config();
        match prev {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }

        let cfg = cfg.unwrap();
        assert_eq!(cfg.usage.critical, 99.5);
        assert_eq!(cfg.usage.warning, 85.0);
        assert!(cfg.quota.name_blacklist.is_empty());
    }
}
