use std::collections::HashMap;

/// Settings of an [`AssetFs`](crate::AssetFs).
///
/// Keys are PascalCase, in the style of Orthanc configuration files:
///
/// ```json
/// { "Prefix": "dist", "Fallback": "index.html" }
/// ```
#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct AssetFsConfig {
    /// Prepended to every requested path.
    pub prefix: String,
    /// Served when a path is neither a file nor a directory. Empty to disable.
    pub fallback: String,
}

impl AssetFsConfig {
    /// Deserialize a configuration object.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Deserialize the configuration object under the top-level key `section`
    /// of a larger configuration file. Other sections are ignored.
    pub fn from_json_section(json: &str, section: &str) -> serde_json::Result<Option<Self>> {
        let mut sections: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        sections
            .remove(section)
            .map(serde_json::from_value)
            .transpose()
    }
}
