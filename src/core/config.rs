use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::reporters::ReporterConfig;

pub const CONFIG_FILE: &str = ".tsreport.yml";

/// Chain configuration loaded from `.tsreport.yml`: the reporter order plus
/// one string/string section per reporter name. A missing or unparseable
/// file falls back to defaults so the tool stays usable out of the box.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub reporters: Option<Vec<String>>,
    #[serde(flatten)]
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = serde_yaml::from_str::<Config>(&content) {
                    return config;
                }
            }
        }
        Config::default()
    }

    /// Reporter names in publish order.
    pub fn chain(&self) -> Vec<String> {
        self.reporters
            .clone()
            .unwrap_or_else(|| vec!["console".to_string(), "json".to_string()])
    }

    /// Section for one reporter, empty when the file has none. Section names
    /// are the lowercase form of the reporter name.
    pub fn reporter_config(&self, name: &str) -> ReporterConfig {
        self.sections
            .get(&name.to_ascii_lowercase())
            .cloned()
            .map(ReporterConfig::from)
            .unwrap_or_default()
    }
}
