//! Loads `recase.toml` defaults the way `renamify-core::config` loads
//! `.renamify/config.toml` — CLI flags always override whatever is in here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_case_mode")]
    pub case_mode: String,

    #[serde(default)]
    pub match_whole_word: bool,

    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            case_mode: default_case_mode(),
            match_whole_word: false,
            extensions: Vec::new(),
            format: default_format(),
        }
    }
}

fn default_case_mode() -> String {
    "preserve".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Config {
    /// Loads `recase.toml` from `dir` if present, else returns `Config::default()`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join("recase.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.defaults.case_mode, "preserve");
        assert!(!config.defaults.match_whole_word);
    }

    #[test]
    fn loads_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("recase.toml")).unwrap();
        writeln!(
            file,
            "[defaults]\ncase_mode = \"ignore\"\nmatch_whole_word = true\nextensions = [\"rs\", \"toml\"]\n"
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.defaults.case_mode, "ignore");
        assert!(config.defaults.match_whole_word);
        assert_eq!(config.defaults.extensions, vec!["rs", "toml"]);
    }
}
