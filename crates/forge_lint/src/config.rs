//! Validator configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LintError, LintResult};

/// Name of the optional per-project configuration file.
pub const CONFIG_FILE: &str = "forge.yaml";

/// Default timeout for the external JavaScript syntax check.
pub const DEFAULT_JS_TIMEOUT_SECS: u64 = 10;

/// External JavaScript engine used for parse-only syntax checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsEngine {
    /// Executable to run
    pub command: String,
    /// Arguments placed before the file path
    #[serde(default)]
    pub args: Vec<String>,
}

impl JsEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Node.js in check-only mode.
    pub fn node() -> Self {
        Self::new("node").arg("-c")
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl Default for JsEngine {
    fn default() -> Self {
        Self::node()
    }
}

/// Validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Engine for JavaScript syntax checks; `None` uses the brace heuristic
    pub js_engine: Option<JsEngine>,
    /// Seconds to wait for the engine before falling back
    pub js_timeout_secs: u64,
    /// Glob patterns of root-relative paths to skip
    pub exclude: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            js_engine: Some(JsEngine::node()),
            js_timeout_secs: DEFAULT_JS_TIMEOUT_SECS,
            exclude: Vec::new(),
        }
    }
}

impl LintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `forge.yaml` from the project root, or defaults when absent.
    pub fn load(root: impl AsRef<Path>) -> LintResult<Self> {
        let path = root.as_ref().join(CONFIG_FILE);
        if !path.is_file() {
            debug!("No {} at {:?}, using defaults", CONFIG_FILE, root.as_ref());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Load configuration from an explicit file.
    pub fn from_file(path: impl Into<PathBuf>) -> LintResult<Self> {
        let path = path.into();
        debug!("Reading lint config from {:?}", path);

        let content = std::fs::read_to_string(&path)?;
        let config: LintConfig = serde_yaml::from_str(&content).map_err(|e| LintError::InvalidConfig {
            path: path.clone(),
            message: e.to_string(),
        })?;
        config.validate(&path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> LintResult<()> {
        if self.js_timeout_secs == 0 {
            return Err(LintError::InvalidConfig {
                path: path.to_path_buf(),
                message: "js_timeout_secs must be greater than zero".to_string(),
            });
        }
        if let Some(engine) = &self.js_engine {
            if engine.command.trim().is_empty() {
                return Err(LintError::InvalidConfig {
                    path: path.to_path_buf(),
                    message: "js_engine.command cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn js_engine(mut self, engine: JsEngine) -> Self {
        self.js_engine = Some(engine);
        self
    }

    /// Always use the heuristic JavaScript checker.
    pub fn without_js_engine(mut self) -> Self {
        self.js_engine = None;
        self
    }

    pub fn js_timeout(mut self, seconds: u64) -> Self {
        self.js_timeout_secs = seconds;
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub fn js_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.js_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = LintConfig::default();
        assert_eq!(config.js_engine, Some(JsEngine::node()));
        assert_eq!(config.js_timeout_secs, 10);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = LintConfig::load(temp.path()).unwrap();
        assert_eq!(config, LintConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "js_timeout_secs: 3\nexclude:\n  - \"node_modules/**\"\n",
        )
        .unwrap();

        let config = LintConfig::load(temp.path()).unwrap();
        assert_eq!(config.js_timeout_secs, 3);
        assert_eq!(config.exclude, vec!["node_modules/**".to_string()]);
        assert_eq!(config.js_engine, Some(JsEngine::node()));
    }

    #[test]
    fn test_load_disabled_engine() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "js_engine: null\n").unwrap();

        let config = LintConfig::load(temp.path()).unwrap();
        assert!(config.js_engine.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "js_timeout_secs: 0\n").unwrap();

        let err = LintConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, LintError::InvalidConfig { .. }));
    }

    #[test]
    fn test_builder() {
        let config = LintConfig::new()
            .js_engine(JsEngine::new("deno").arg("check"))
            .js_timeout(5)
            .exclude("dist/**");
        assert_eq!(config.js_engine.as_ref().unwrap().command, "deno");
        assert_eq!(config.js_timeout_duration(), Duration::from_secs(5));
        assert_eq!(config.exclude.len(), 1);
    }
}
