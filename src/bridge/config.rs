use std::time::Duration;

use secrecy::SecretString;

use crate::bridge::consts::{AVATAR_API_KEY, EMBED_ORIGIN, LOAD_TIMEOUT, MOUNT_DELAY};

/// Configuration for one embed bridge. The api key is passed through to
/// the provider's session bootstrap unmodified; the bridge only checks it
/// is non-empty.
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    trusted_origin: String,
    embed_url: String,
    api_key: SecretString,
    mount_delay: Duration,
    load_timeout: Duration,
    capacity: usize,
}

pub struct EmbedConfigBuilder {
    config: EmbedConfig,
}

impl EmbedConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: EmbedConfig::new(),
        }
    }

    pub fn with_trusted_origin(mut self, origin: &str) -> Self {
        self.config.trusted_origin = origin.to_string();
        self
    }

    pub fn with_embed_url(mut self, url: &str) -> Self {
        self.config.embed_url = url.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.config.api_key = SecretString::from(api_key.to_string());
        self
    }

    pub fn with_mount_delay(mut self, delay: Duration) -> Self {
        self.config.mount_delay = delay;
        self
    }

    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.config.load_timeout = timeout;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn build(self) -> EmbedConfig {
        self.config
    }
}

impl Default for EmbedConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbedConfig {
    // Sets the default values.
    pub fn new() -> Self {
        Self {
            trusted_origin: EMBED_ORIGIN.to_string(),
            embed_url: String::new(),
            api_key: std::env::var(AVATAR_API_KEY)
                .unwrap_or_else(|_| "".to_string())
                .into(),
            mount_delay: MOUNT_DELAY,
            load_timeout: LOAD_TIMEOUT,
            capacity: 64,
        }
    }

    pub fn builder() -> EmbedConfigBuilder {
        EmbedConfigBuilder::new()
    }

    pub fn trusted_origin(&self) -> &str {
        &self.trusted_origin
    }

    pub fn embed_url(&self) -> &str {
        &self.embed_url
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    pub fn mount_delay(&self) -> Duration {
        self.mount_delay
    }

    pub fn load_timeout(&self) -> Duration {
        self.load_timeout
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self::new()
    }
}
