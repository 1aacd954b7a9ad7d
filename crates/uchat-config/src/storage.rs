use serde::Deserialize;

/// Backing store for conversations, feedback and visitors
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(rename = "type", default)]
    pub storage_type: StorageType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Process-local maps; contents are lost on restart
    #[default]
    Memory,
}
