use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where pages come from, where they go, and how fragments are recognized.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BuildConfig {
    /// Root of the source tree
    pub source: PathBuf,
    /// Root of the generated tree
    pub output: PathBuf,
    /// Name of the partials directory inside `source`
    pub partials: String,
    /// Extension shared by pages and partials, without the dot
    pub extension: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("./src"),
            output: PathBuf::from("."),
            partials: "partials".to_string(),
            extension: "html".to_string(),
        }
    }
}

impl BuildConfig {
    pub fn partials_dir(&self) -> PathBuf {
        self.source.join(&self.partials)
    }
}
