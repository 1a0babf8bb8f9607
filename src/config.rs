//! Configuration module for rig
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional `config.toml` in the user's config directory, then `RIG_*`
//! environment variables. The result is one [`RigConfig`] built at startup
//! and handed to every component.

use crate::shell::ShellDialect;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::Level;

pub const ALIAS_FILE_ENV: &str = "RIG_ALIAS_FILE";
pub const ALIAS_FILE_DEFAULT: &str = "/tmp/rig-aliases";

pub const ALIAS_PREFIX_ENV: &str = "RIG_ALIAS_PREFIX";
pub const ALIAS_PREFIX_DEFAULT: &str = "e";

pub const EDITOR_ENV: &str = "RIG_EDITOR";
pub const EDITOR_DEFAULT: &str = "vim";

pub const EDIT_COMMAND_ENV: &str = "RIG_EDIT_COMMAND";

pub const BOOTSTRAP_ENV: &str = "RIG_BOOTSTRAP";

pub const RIPGREP_CMD_ENV: &str = "RIG_RIPGREP_CMD";
pub const RIPGREP_CMD_DEFAULT: &str = "rg";

/// Dialect of the shell that will source the alias file; set by the shell functions
pub const SHELL_ENV: &str = "RIG_SHELL";

pub const LOG_ENV: &str = "RIG_LOG";
pub const LOG_DEFAULT: &str = "warn";

const ENV_PREFIX: &str = "RIG";

/// Application configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RigConfig {
    /// Where the generated alias file is written
    pub alias_file: PathBuf,

    /// Name prefix of the generated aliases (`e` gives `e1`, `e2`, ...)
    pub alias_prefix: String,

    /// Editor name looked up in the editor table (`RIG_EDITOR`)
    #[serde(default)]
    pub editor: Option<String>,

    /// Full editor command template overriding the table (`RIG_EDIT_COMMAND`)
    #[serde(default)]
    pub edit_command: Option<String>,

    /// Shell to install the integration for; switches rig into install mode
    #[serde(default)]
    pub bootstrap: Option<String>,

    /// ripgrep executable
    pub ripgrep_cmd: String,

    /// Dialect of the shell sourcing the alias file (`RIG_SHELL`)
    #[serde(default)]
    pub shell: Option<String>,

    /// Maximum log level written to stderr
    pub log: String,

    /// The conventional `EDITOR` variable
    #[serde(skip)]
    pub editor_env: Option<String>,

    /// The conventional `SHELL` variable (login shell)
    #[serde(skip)]
    pub login_shell: Option<String>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            alias_file: PathBuf::from(ALIAS_FILE_DEFAULT),
            alias_prefix: ALIAS_PREFIX_DEFAULT.to_string(),
            editor: None,
            edit_command: None,
            bootstrap: None,
            ripgrep_cmd: RIPGREP_CMD_DEFAULT.to_string(),
            shell: None,
            log: LOG_DEFAULT.to_string(),
            editor_env: None,
            login_shell: None,
        }
    }
}

impl RigConfig {
    /// Get the path to the optional config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("rig").join("config.toml"))
    }

    /// Load configuration from the config file and the process environment
    ///
    /// A missing config directory or file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be parsed,
    /// or a setting has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path().ok();
        let env: HashMap<String, String> = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        Self::load_from(config_path.as_deref(), &env)
    }

    /// Load configuration from an explicit file and environment map
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed or a value has the wrong type.
    pub fn load_from(
        config_file: Option<&Path>,
        env: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let rig_vars: config::Map<String, String> = env
            .iter()
            .filter(|(key, _)| key.starts_with("RIG_"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut builder = Config::builder()
            .set_default("alias_file", ALIAS_FILE_DEFAULT)?
            .set_default("alias_prefix", ALIAS_PREFIX_DEFAULT)?
            .set_default("ripgrep_cmd", RIPGREP_CMD_DEFAULT)?
            .set_default("log", LOG_DEFAULT)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).source(Some(rig_vars)))
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.editor_env = env.get("EDITOR").cloned();
        config.login_shell = env.get("SHELL").cloned();
        config.normalize();
        Ok(config)
    }

    /// Treat empty settings as unset
    fn normalize(&mut self) {
        for value in [
            &mut self.editor,
            &mut self.edit_command,
            &mut self.bootstrap,
            &mut self.shell,
            &mut self.editor_env,
            &mut self.login_shell,
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *value = None;
            }
        }

        if self.alias_file.as_os_str().is_empty() {
            self.alias_file = PathBuf::from(ALIAS_FILE_DEFAULT);
        }
        if self.alias_prefix.is_empty() {
            self.alias_prefix = ALIAS_PREFIX_DEFAULT.to_string();
        }
        if self.ripgrep_cmd.is_empty() {
            self.ripgrep_cmd = RIPGREP_CMD_DEFAULT.to_string();
        }
    }

    /// The sidecar file holding the number of aliases in the alias file
    #[must_use]
    pub fn count_file(&self) -> PathBuf {
        let mut name = self.alias_file.clone().into_os_string();
        name.push(".count");
        PathBuf::from(name)
    }

    /// Dialect the alias file is written in
    ///
    /// `RIG_SHELL` wins, then the login shell, then bash.
    #[must_use]
    pub fn dialect(&self) -> ShellDialect {
        self.shell
            .as_deref()
            .and_then(ShellDialect::from_shell_path)
            .or_else(|| self.login_shell.as_deref().and_then(ShellDialect::from_shell_path))
            .unwrap_or(ShellDialect::Bash)
    }

    /// Parsed log level, `None` if the setting is not a level name
    #[must_use]
    pub fn log_level(&self) -> Option<Level> {
        self.log.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = RigConfig::load_from(None, &HashMap::new()).unwrap();
        assert_eq!(config, RigConfig::default());
        assert_eq!(config.alias_file, PathBuf::from("/tmp/rig-aliases"));
        assert_eq!(config.alias_prefix, "e");
        assert_eq!(config.ripgrep_cmd, "rg");
        assert!(config.bootstrap.is_none());
    }

    #[test]
    fn test_environment_overrides() {
        let config = RigConfig::load_from(
            None,
            &env(&[
                ("RIG_ALIAS_FILE", "/run/user/1000/rig"),
                ("RIG_ALIAS_PREFIX", "g"),
                ("RIG_EDITOR", "nvim"),
                ("RIG_EDIT_COMMAND", r#"kak +{lineNumber}:{columnNumber} "{filename}""#),
                ("RIG_BOOTSTRAP", "/bin/zsh"),
                ("RIG_RIPGREP_CMD", "/opt/rg"),
                ("RIG_SHELL", "fish"),
                ("RIG_LOG", "debug"),
                ("EDITOR", "hx"),
                ("SHELL", "/bin/bash"),
            ]),
        )
        .unwrap();

        assert_eq!(config.alias_file, PathBuf::from("/run/user/1000/rig"));
        assert_eq!(config.alias_prefix, "g");
        assert_eq!(config.editor.as_deref(), Some("nvim"));
        assert_eq!(
            config.edit_command.as_deref(),
            Some(r#"kak +{lineNumber}:{columnNumber} "{filename}""#)
        );
        assert_eq!(config.bootstrap.as_deref(), Some("/bin/zsh"));
        assert_eq!(config.ripgrep_cmd, "/opt/rg");
        assert_eq!(config.editor_env.as_deref(), Some("hx"));
        assert_eq!(config.dialect(), ShellDialect::Fish);
        assert_eq!(config.log_level(), Some(Level::DEBUG));
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let vars = env(&[("ALIAS_FILE", "/nope"), ("HOME", "/home/u")]);
        let config = RigConfig::load_from(None, &vars).unwrap();
        assert_eq!(config.alias_file, PathBuf::from(ALIAS_FILE_DEFAULT));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = RigConfig::load_from(
            None,
            &env(&[
                ("RIG_EDITOR", ""),
                ("RIG_ALIAS_PREFIX", ""),
                ("RIG_BOOTSTRAP", " "),
                ("EDITOR", ""),
            ]),
        )
        .unwrap();
        assert!(config.editor.is_none());
        assert!(config.bootstrap.is_none());
        assert!(config.editor_env.is_none());
        assert_eq!(config.alias_prefix, "e");
    }

    #[test]
    fn test_config_file_layer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "alias_prefix = \"f\"\neditor = \"micro\"\n").unwrap();

        let config = RigConfig::load_from(Some(&path), &env(&[("RIG_EDITOR", "nano")])).unwrap();
        assert_eq!(config.alias_prefix, "f");
        assert_eq!(config.editor.as_deref(), Some("nano"));
    }

    #[test]
    fn test_missing_config_file_is_fine() {
        let dir = TempDir::new().unwrap();
        let absent = dir.path().join("absent.toml");
        let config = RigConfig::load_from(Some(&absent), &HashMap::new()).unwrap();
        assert_eq!(config.alias_prefix, "e");
    }

    #[test]
    fn test_count_file_is_a_sibling() {
        let config = RigConfig::default();
        assert_eq!(config.count_file(), PathBuf::from("/tmp/rig-aliases.count"));
    }

    #[test]
    fn test_dialect_fallbacks() {
        let mut config = RigConfig::default();
        assert_eq!(config.dialect(), ShellDialect::Bash);

        config.login_shell = Some("/usr/bin/zsh".into());
        assert_eq!(config.dialect(), ShellDialect::Zsh);

        config.shell = Some("tcsh".into());
        assert_eq!(config.dialect(), ShellDialect::Zsh);

        config.shell = Some("fish".into());
        assert_eq!(config.dialect(), ShellDialect::Fish);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = RigConfig {
            log: "chatty".into(),
            ..RigConfig::default()
        };
        assert_eq!(config.log_level(), None);
    }
}
