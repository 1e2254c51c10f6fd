use std::path::Path;

use super::types::AppConfig;

const DEFAULT_CONFIG_FILE: &str = "polctl.toml";

/// Load configuration from `path` (or `polctl.toml` in the working
/// directory), then layer environment overrides on top.
pub fn load_default(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut cfg: AppConfig = if path.exists() {
        let s = std::fs::read_to_string(path)?;
        toml::from_str::<AppConfig>(&s)?
    } else {
        AppConfig::default()
    };

    apply_env(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

// Env lookup is injected so tests do not have to mutate process state.
fn apply_env(cfg: &mut AppConfig, get: impl Fn(&str) -> Option<String>) {
    if let Some(v) = get("POLCTL_HOST") {
        if !v.trim().is_empty() {
            cfg.api.base_url = v;
        }
    }
    if let Some(v) = get("POLCTL_API_KEY") {
        if !v.trim().is_empty() {
            cfg.api.api_key = v;
        }
    }
    if let Some(v) = get("POLCTL_LOG") {
        if !v.trim().is_empty() {
            cfg.logging.filter = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_default(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:7171");
        assert_eq!(cfg.api.timeout_ms, 10_000);
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polctl.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://controller:9000\"\ntimeout_ms = 2500"
        )
        .unwrap();

        let cfg = load_default(Some(&path)).unwrap();
        assert_eq!(cfg.api.base_url, "http://controller:9000");
        assert_eq!(cfg.api.timeout_ms, 2500);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut cfg = AppConfig::default();
        let env: HashMap<&str, &str> = HashMap::from([
            ("POLCTL_HOST", "http://10.0.0.2:7171"),
            ("POLCTL_API_KEY", "s3cret"),
            ("POLCTL_LOG", "debug"),
        ]);

        apply_env(&mut cfg, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(cfg.api.base_url, "http://10.0.0.2:7171");
        assert_eq!(cfg.api.api_key, "s3cret");
        assert_eq!(cfg.logging.filter, "debug");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        apply_env(&mut cfg, |key| {
            (key == "POLCTL_HOST").then(|| "   ".to_string())
        });
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:7171");
    }
}
