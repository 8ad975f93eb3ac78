//! Search engine configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The default engine name plus the engine-name to URL-template map. Each
/// template carries a `{}` placeholder replaced by the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Search {
    #[serde(rename = "default", default = "default_engine")]
    pub default_engine: String,

    #[serde(default = "default_engines")]
    pub engines: BTreeMap<String, String>,
}

fn default_engine() -> String {
    "google".to_string()
}

fn default_engines() -> BTreeMap<String, String> {
    [
        ("google", "https://google.com/search?q={}"),
        ("bing", "https://www.bing.com/search?q={}"),
        ("duckduckgo", "https://duckduckgo.com/?q={}"),
        ("wikipedia", "https://en.wikipedia.org/w/index.php?search={}"),
    ]
    .into_iter()
    .map(|(name, url)| (name.to_string(), url.to_string()))
    .collect()
}

impl Default for Search {
    fn default() -> Self {
        Self {
            default_engine: default_engine(),
            engines: default_engines(),
        }
    }
}

impl Search {
    /// The URL template of the default engine, when it is defined.
    pub fn default_template(&self) -> Option<&str> {
        self.engines.get(&self.default_engine).map(String::as_str)
    }
}
