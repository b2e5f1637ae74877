use crate::error::ConsoleResult;
use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `TALENT_CONSOLE__` and an optional TOML config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_platform_name")]
    pub platform_name: String,
    #[serde(default)]
    pub modules: ModuleConfig,
}

/// Module resolution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleConfig {
    /// Base searched first when looking up a module's candidate locations.
    #[serde(default = "default_absolute_base")]
    pub absolute_base: String,
    /// Base searched after every convention under `absolute_base` missed.
    #[serde(default = "default_relative_base")]
    pub relative_base: String,
    /// Module ids resolved eagerly at startup.
    #[serde(default)]
    pub preload: Vec<String>,
}

// Default functions
fn default_platform_name() -> String {
    "Talent Console".to_string()
}
fn default_absolute_base() -> String {
    "/src/modules".to_string()
}
fn default_relative_base() -> String {
    "../../modules".to_string()
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            absolute_base: default_absolute_base(),
            relative_base: default_relative_base(),
            preload: Vec::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform_name: default_platform_name(),
            modules: ModuleConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and optional config file.
    pub fn load(file: Option<&str>) -> ConsoleResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(
                config::File::with_name(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        let builder = builder.add_source(
            config::Environment::with_prefix("TALENT_CONSOLE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("modules.preload"),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.modules.absolute_base, "/src/modules");
        assert_eq!(config.modules.relative_base, "../../modules");
        assert!(config.modules.preload.is_empty());
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let raw = r#"{"modules": {"preload": ["people"]}}"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.platform_name, "Talent Console");
        assert_eq!(config.modules.preload, vec!["people".to_string()]);
        assert_eq!(config.modules.absolute_base, "/src/modules");
    }

    #[test]
    fn test_load_from_env() {
        std::env::set_var("TALENT_CONSOLE__MODULES__PRELOAD", "people,ats_core");
        std::env::set_var("TALENT_CONSOLE__MODULES__ABSOLUTE_BASE", "/app/mods");

        let loaded = AppConfig::load(None);

        std::env::remove_var("TALENT_CONSOLE__MODULES__PRELOAD");
        std::env::remove_var("TALENT_CONSOLE__MODULES__ABSOLUTE_BASE");

        let config = loaded.unwrap();
        assert_eq!(config.modules.preload, vec!["people", "ats_core"]);
        assert_eq!(config.modules.absolute_base, "/app/mods");
        assert_eq!(config.modules.relative_base, "../../modules");
        assert_eq!(config.platform_name, "Talent Console");
    }
}
