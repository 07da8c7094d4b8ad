//! Launcher Configuration
//!
//! Parses the optional config.toml describing how the optimizer is invoked.
//! Every field has a default, and the defaults reproduce the stock command
//! `python ../optimize.py -h`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory name under the XDG config dir
pub const CONFIG_DIR_NAME: &str = "optimize-gui";

/// File name looked up inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// The main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub launcher: LauncherConfig,
}

/// How the optimization script is launched
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LauncherConfig {
    /// Interpreter used to run the script
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Script path, resolved relative to the working directory
    #[serde(default = "default_script")]
    pub script: PathBuf,

    /// Arguments passed after the script path
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Working directory for the child (default: inherit ours)
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Append the Step 1 file path to the command line.
    ///
    /// Off by default: the stock launcher never forwards the selection.
    #[serde(default)]
    pub pass_selected_file: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            args: default_args(),
            working_dir: None,
            pass_selected_file: false,
        }
    }
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_script() -> PathBuf {
    PathBuf::from("../optimize.py")
}

fn default_args() -> Vec<String> {
    vec!["-h".to_string()]
}

impl AppConfig {
    /// Load configuration from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string
    pub fn from_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse config.toml")
    }

    /// Default per-user config location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Resolve the configuration for this launch.
    ///
    /// An explicit path must exist. Without one, the per-user file is used
    /// when present and the built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Using config file {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.launcher.interpreter.trim().is_empty() {
            anyhow::bail!("launcher.interpreter must not be empty");
        }

        if self.launcher.script.as_os_str().is_empty() {
            anyhow::bail!("launcher.script must not be empty");
        }

        if let Some(ref dir) = self.launcher.working_dir {
            if !dir.is_dir() {
                anyhow::bail!(
                    "launcher.working_dir is not a directory: {}",
                    dir.display()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_stock_command() {
        let config = AppConfig::default();
        assert_eq!(config.launcher.interpreter, "python");
        assert_eq!(config.launcher.script, PathBuf::from("../optimize.py"));
        assert_eq!(config.launcher.args, vec!["-h".to_string()]);
        assert!(config.launcher.working_dir.is_none());
        assert!(!config.launcher.pass_selected_file);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = AppConfig::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
            [launcher]
            interpreter = "python3"
        "#;

        let config = AppConfig::from_str(toml).unwrap();
        assert_eq!(config.launcher.interpreter, "python3");
        assert_eq!(config.launcher.script, PathBuf::from("../optimize.py")); // default
        assert_eq!(config.launcher.args, vec!["-h".to_string()]); // default
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [launcher]
            interpreter = "/usr/bin/python2"
            script = "/opt/root_optimize/optimize.py"
            args = ["optimize", "--verbose"]
            working_dir = "/tmp"
            pass_selected_file = true
        "#;

        let config = AppConfig::from_str(toml).unwrap();
        assert_eq!(config.launcher.interpreter, "/usr/bin/python2");
        assert_eq!(config.launcher.args.len(), 2);
        assert_eq!(config.launcher.working_dir, Some(PathBuf::from("/tmp")));
        assert!(config.launcher.pass_selected_file);
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let toml = r#"
            [launcher]
            args = "-h"
        "#;
        assert!(AppConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[launcher]\nscript = \"optimize.py\"").unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.launcher.script, PathBuf::from("optimize.py"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());

        let mut config = AppConfig::default();
        config.launcher.interpreter = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.launcher.working_dir = Some(PathBuf::from("/definitely/not/here"));
        assert!(config.validate().is_err());
    }
}
