use crate::i18n::Locale;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConsoleConfig {
    pub source: Option<String>,
    pub locale: Locale,
    pub state_file: Option<PathBuf>,
    pub route: Option<String>,
    pub use_kubeconfig: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            source: None,
            locale: Locale::default(),
            state_file: default_state_file(),
            route: None,
            use_kubeconfig: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ConsoleConfigFile {
    #[serde(default, alias = "lang", alias = "language")]
    locale: Option<String>,
    #[serde(default, alias = "namespace_state", alias = "state")]
    state_file: Option<PathBuf>,
    #[serde(default, alias = "url")]
    route: Option<String>,
    #[serde(default, alias = "kubeconfig")]
    use_kubeconfig: bool,
}

impl ConfigLoader {
    pub fn discover() -> Self {
        Self {
            path: discover_config_path(),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn load(&self) -> Result<ConsoleConfig> {
        let Some(path) = self.path.clone() else {
            return Ok(ConsoleConfig::default());
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read console config {}", path.display()))?;
        let parsed: ConsoleConfigFile = if raw.trim().is_empty() {
            ConsoleConfigFile::default()
        } else {
            serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse console config {}", path.display()))?
        };

        let locale = match parsed.locale.as_deref() {
            None => Locale::default(),
            Some(tag) => Locale::from_tag(tag).unwrap_or_else(|| {
                warn!("unsupported locale `{tag}` in {}, using default", path.display());
                Locale::default()
            }),
        };
        let route = parsed
            .route
            .map(|route| route.trim().to_string())
            .filter(|route| !route.is_empty());

        Ok(ConsoleConfig {
            source: Some(path.display().to_string()),
            locale,
            state_file: parsed.state_file.or_else(default_state_file),
            route,
            use_kubeconfig: parsed.use_kubeconfig,
        })
    }
}

fn default_state_file() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .filter(|home| !home.trim().is_empty())
        .map(|home| PathBuf::from(home).join(".config/kconsole/namespaces.yaml"))
}

fn discover_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("KCONSOLE_CONFIG")
        && !path.trim().is_empty()
    {
        return Some(PathBuf::from(path));
    }

    let cwd_candidates = [
        PathBuf::from("kconsole.yaml"),
        PathBuf::from("kconsole.yml"),
        PathBuf::from(".kconsole.yaml"),
    ];
    for candidate in cwd_candidates {
        if candidate.exists() {
            return Some(candidate);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let user_candidates = [
            PathBuf::from(&home).join(".config/kconsole/config.yaml"),
            PathBuf::from(&home).join(".config/kconsole/config.yml"),
            PathBuf::from(&home).join(".kconsole.yaml"),
        ];
        for candidate in user_candidates {
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{ConfigLoader, ConsoleConfig};
    use crate::i18n::Locale;
    use std::fs;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kconsole-{name}-{}.yaml", std::process::id()))
    }

    #[test]
    fn parses_locale_route_and_state_file() {
        let path = scratch("config-full");
        fs::write(
            &path,
            "locale: en_US\nstate_file: /tmp/ns.yaml\nroute: ' /clusters/prod '\nuse_kubeconfig: true\n",
        )
        .unwrap();

        let config = ConfigLoader::at(&path).load().unwrap();
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.state_file, Some(PathBuf::from("/tmp/ns.yaml")));
        assert_eq!(config.route.as_deref(), Some("/clusters/prod"));
        assert!(config.use_kubeconfig);
        assert_eq!(config.source, Some(path.display().to_string()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unknown_locale_and_blank_route_use_defaults() {
        let path = scratch("config-defaults");
        fs::write(&path, "lang: klingon\nroute: '  '\n").unwrap();

        let config = ConfigLoader::at(&path).load().unwrap();
        assert_eq!(config.locale, Locale::ZhCn);
        assert_eq!(config.route, None);
        assert!(!config.use_kubeconfig);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unparsable_config_names_the_file() {
        let path = scratch("config-broken");
        fs::write(&path, "locale: [1, 2\n").unwrap();

        let error = ConfigLoader::at(&path).load().unwrap_err();
        assert!(format!("{error:#}").contains("failed to parse console config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_path_loads_defaults() {
        let config = ConfigLoader { path: None }.load().unwrap();
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn empty_file_uses_defaults_with_source() {
        let path = scratch("config-empty");
        fs::write(&path, "\n").unwrap();

        let config = ConfigLoader::at(&path).load().unwrap();
        assert_eq!(config.locale, Locale::ZhCn);
        assert_eq!(config.route, None);
        assert_eq!(config.source, Some(path.display().to_string()));

        let _ = fs::remove_file(&path);
    }
}
