use crate::config::Settings;
use crate::core::backing::MapType;
use crate::utils::error::{DexError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub data: Option<DataConfig>,
    pub store: Option<StoreConfig>,
    pub shell: Option<ShellConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    pub file_name: Option<String>,
    pub default_path: Option<String>,
    pub search_root: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    pub map_type: Option<MapType>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShellConfig {
    pub autoload: Option<bool>,
    pub prompt: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| DexError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DexError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DEX_DATA_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DexError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 以預設值補齊未設定的欄位
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();

        if let Some(data) = self.data {
            if let Some(file_name) = data.file_name {
                settings.data_file_name = file_name;
            }
            if let Some(default_path) = data.default_path {
                settings.default_path = default_path;
            }
            if let Some(search_root) = data.search_root {
                settings.search_root = search_root;
            }
        }

        if let Some(map_type) = self.store.and_then(|s| s.map_type) {
            settings.map_type = map_type;
        }

        if let Some(shell) = self.shell {
            if let Some(autoload) = shell.autoload {
                settings.autoload = autoload;
            }
            if let Some(prompt) = shell.prompt {
                settings.prompt = prompt;
            }
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[data]
file_name = "creatures.csv"
default_path = "./data/creatures.csv"
search_root = "./data"

[store]
map_type = "insertion"

[shell]
autoload = true
prompt = "> "
"#;

        let settings = TomlConfig::from_toml_str(toml_content).unwrap().into_settings();

        assert_eq!(settings.data_file_name, "creatures.csv");
        assert_eq!(settings.default_path, "./data/creatures.csv");
        assert_eq!(settings.search_root, "./data");
        assert_eq!(settings.map_type, MapType::InsertionOrdered);
        assert!(settings.autoload);
        assert_eq!(settings.prompt, "> ");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = TomlConfig::from_toml_str("").unwrap().into_settings();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_map_type_accepts_display_name() {
        let config = TomlConfig::from_toml_str("[store]\nmap_type = \"TreeMap\"\n").unwrap();
        assert_eq!(config.into_settings().map_type, MapType::Sorted);
    }

    #[test]
    fn test_map_type_accepts_integer_value() {
        let config = TomlConfig::from_toml_str("[store]\nmap_type = 2\n").unwrap();
        assert_eq!(config.into_settings().map_type, MapType::Sorted);

        let config = TomlConfig::from_toml_str("[store]\nmap_type = 3\n").unwrap();
        assert_eq!(config.into_settings().map_type, MapType::InsertionOrdered);
    }

    #[test]
    fn test_out_of_range_map_type_value_fails_to_parse() {
        for content in ["[store]\nmap_type = 4\n", "[store]\nmap_type = -1\n", "[store]\nmap_type = 300\n"] {
            let result = TomlConfig::from_toml_str(content);
            assert!(matches!(result, Err(DexError::ConfigValidationError { .. })), "{}", content);
        }
    }

    #[test]
    fn test_invalid_map_type_fails_to_parse() {
        let result = TomlConfig::from_toml_str("[store]\nmap_type = \"skiplist\"\n");
        assert!(matches!(result, Err(DexError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMALL_DEX_TEST_ROOT", "/srv/dex");

        let toml_content = r#"
[data]
search_root = "${SMALL_DEX_TEST_ROOT}"
default_path = "${SMALL_DEX_TEST_UNSET_VAR}/x.csv"
"#;

        let settings = TomlConfig::from_toml_str(toml_content).unwrap().into_settings();
        assert_eq!(settings.search_root, "/srv/dex");
        assert_eq!(settings.default_path, "${SMALL_DEX_TEST_UNSET_VAR}/x.csv");

        std::env::remove_var("SMALL_DEX_TEST_ROOT");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[data]\nfile_name = \"nested/creatures.csv\"\n").unwrap();
        assert!(config.into_settings().validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[store]\nmap_type = \"2\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.into_settings().map_type, MapType::Sorted);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = TomlConfig::from_file("/no/such/small-dex.toml");
        assert!(matches!(result, Err(DexError::ConfigError { .. })));
    }
}
