use std::{fs, path::Path};

use serde::Deserialize;

use crate::{error::BridgeError, runtime::InterpreterOptions};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "refbridge.json";

/// Runtime settings, read from JSON.
///
/// ```json
/// { "search_path": ["demos"], "heap_limit": 4096 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Directories scanned for `<name>.emb`, in order.
    pub search_path: Vec<String>,
    /// Appends the working directory (the empty entry) to the search path.
    pub include_working_dir: bool,
    /// Maximum number of live objects; `None` is unbounded.
    pub heap_limit: Option<usize>,
    pub trace_refcounts: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            search_path: Vec::new(),
            include_working_dir: true,
            heap_limit: None,
            trace_refcounts: false,
        }
    }
}

impl BridgeConfig {
    pub fn from_json(text: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(text).map_err(|err| BridgeError::Config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        let text = fs::read_to_string(path)
            .map_err(|err| BridgeError::Config(format!("{}: {}", path.display(), err)))?;
        Self::from_json(&text)
            .map_err(|err| BridgeError::Config(format!("{}: {}", path.display(), err)))
    }

    /// Loads `refbridge.json` from the working directory, or the defaults
    /// when there is no such file.
    pub fn discover() -> Result<Self, BridgeError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_module_dir(mut self, dir: impl Into<String>) -> Self {
        self.search_path.push(dir.into());
        self
    }

    pub fn with_heap_limit(mut self, limit: usize) -> Self {
        self.heap_limit = Some(limit);
        self
    }

    pub fn with_trace_refcounts(mut self, enabled: bool) -> Self {
        self.trace_refcounts = enabled;
        self
    }

    pub fn without_working_dir(mut self) -> Self {
        self.include_working_dir = false;
        self
    }

    pub fn effective_search_path(&self) -> Vec<String> {
        let mut path = self.search_path.clone();
        if self.include_working_dir && !path.iter().any(String::is_empty) {
            path.push(String::new());
        }
        path
    }

    pub(crate) fn interpreter_options(&self) -> InterpreterOptions {
        InterpreterOptions {
            heap_limit: self.heap_limit,
            trace_refcounts: self.trace_refcounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_the_working_dir() {
        let config = BridgeConfig::default();
        assert_eq!(config.effective_search_path(), vec![String::new()]);
        assert_eq!(config.heap_limit, None);
    }

    #[test]
    fn parses_partial_json() {
        let config = BridgeConfig::from_json(r#"{"search_path": ["demos"], "heap_limit": 64}"#)
            .unwrap();
        assert_eq!(config.search_path, vec!["demos".to_string()]);
        assert_eq!(config.heap_limit, Some(64));
        assert!(config.include_working_dir);
        assert_eq!(
            config.effective_search_path(),
            vec!["demos".to_string(), String::new()]
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = BridgeConfig::from_json(r#"{"serach_path": []}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Config(ref message) if message.contains("serach_path")));
    }

    #[test]
    fn overrides_stack_on_top() {
        let config = BridgeConfig::default()
            .without_working_dir()
            .with_module_dir("a")
            .with_module_dir("b")
            .with_heap_limit(10)
            .with_trace_refcounts(true);
        assert_eq!(config.effective_search_path(), vec!["a", "b"]);
        let options = config.interpreter_options();
        assert_eq!(options.heap_limit, Some(10));
        assert!(options.trace_refcounts);
    }
}
