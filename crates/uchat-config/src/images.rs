use serde::Deserialize;

/// Hard ceiling on images attached to one reply
pub const MAX_IMAGES_LIMIT: usize = 6;

/// Image search for pure image requests
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_images")]
    pub max_images: usize,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_images: default_max_images(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

const fn default_max_images() -> usize {
    MAX_IMAGES_LIMIT
}
