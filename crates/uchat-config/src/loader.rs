use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, images::MAX_IMAGES_LIMIT};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder does not
    /// resolve, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_llm()?;
        self.validate_images()?;
        self.validate_uploads()?;
        self.validate_providers()?;
        Ok(())
    }

    fn validate_llm(&self) -> anyhow::Result<()> {
        let has_key = self
            .llm
            .api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty());

        if !has_key {
            anyhow::bail!("llm.api_key must be set to a non-empty value");
        }

        if self.llm.default_model.trim().is_empty() {
            anyhow::bail!("llm.default_model must not be empty");
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be between 0.0 and 2.0, got {}", self.llm.temperature);
        }

        Ok(())
    }

    fn validate_images(&self) -> anyhow::Result<()> {
        let max = self.images.max_images;
        if !(1..=MAX_IMAGES_LIMIT).contains(&max) {
            anyhow::bail!("images.max_images must be between 1 and {MAX_IMAGES_LIMIT}, got {max}");
        }
        Ok(())
    }

    fn validate_uploads(&self) -> anyhow::Result<()> {
        if self.uploads.chunk_tokens == 0 {
            anyhow::bail!("uploads.chunk_tokens must be greater than zero");
        }
        if self.uploads.max_bytes == 0 {
            anyhow::bail!("uploads.max_bytes must be greater than zero");
        }
        Ok(())
    }

    fn validate_providers(&self) -> anyhow::Result<()> {
        let secrets = [
            ("search.api_key", self.search.as_ref().map(|s| &s.api_key)),
            ("weather.api_key", self.weather.as_ref().map(|w| &w.api_key)),
            ("transcription.api_key", self.transcription.as_ref().map(|t| &t.api_key)),
        ];

        for (name, secret) in secrets {
            if secret.is_some_and(|key| key.expose_secret().trim().is_empty()) {
                anyhow::bail!("{name} must not be empty when the section is present");
            }
        }

        if self.realtime.lookup_timeout.is_zero() {
            anyhow::bail!("realtime.lookup_timeout must be greater than zero");
        }

        if self.uploads.extract_timeout.is_zero() {
            anyhow::bail!("uploads.extract_timeout must be greater than zero");
        }

        Ok(())
    }
}
