//! Collection configuration
//!
//! Loaded once per process, either from the environment on first use or
//! installed explicitly with [`install`] before any collection reads it.

use std::sync::OnceLock;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

static GLOBAL: OnceLock<CollectionConfig> = OnceLock::new();

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Dump rendering and sink
    pub dump: DumpConfig,
    /// Seed for `shuffle` / `random`; entropy-seeded when unset
    pub seed: Option<u64>,
}

/// Dump output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Payload rendering
    pub format: DumpFormat,
    /// Where dumps are written
    pub target: DumpTarget,
    /// Prefix each dump with `<variant>(<length>)`
    pub header: bool,
    /// Process exit code carried by the `dd` halt signal
    pub halt_code: i32,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            format: DumpFormat::Pretty,
            target: DumpTarget::Stdout,
            header: true,
            halt_code: 1,
        }
    }
}

/// Payload rendering for dumps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    /// Indented JSON
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

/// Dump sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpTarget {
    #[default]
    Stdout,
    Stderr,
}

impl CollectionConfig {
    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(format) = std::env::var("NEBULA_COLLECTION_DUMP_FORMAT") {
            config.dump.format = match format.to_lowercase().as_str() {
                "compact" => DumpFormat::Compact,
                _ => DumpFormat::Pretty,
            };
        }

        if let Ok(target) = std::env::var("NEBULA_COLLECTION_DUMP_TARGET") {
            config.dump.target = match target.to_lowercase().as_str() {
                "stderr" => DumpTarget::Stderr,
                _ => DumpTarget::Stdout,
            };
        }

        if let Ok(header) = std::env::var("NEBULA_COLLECTION_DUMP_HEADER") {
            config.dump.header = !matches!(header.to_lowercase().as_str(), "false" | "0" | "off");
        }

        if let Some(code) = std::env::var("NEBULA_COLLECTION_HALT_CODE")
            .ok()
            .and_then(|code| code.parse().ok())
        {
            config.dump.halt_code = code;
        }

        config.seed = std::env::var("NEBULA_COLLECTION_SEED")
            .ok()
            .and_then(|seed| seed.parse().ok());

        config
    }

    /// Random source for `shuffle` / `random`
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Process-wide configuration, read from the environment on first use
pub fn global() -> &'static CollectionConfig {
    GLOBAL.get_or_init(CollectionConfig::from_env)
}

/// Install the process-wide configuration
///
/// Fails (returning the rejected config) once a configuration is in place,
/// including one loaded implicitly by [`global`].
pub fn install(config: CollectionConfig) -> Result<(), CollectionConfig> {
    GLOBAL.set(config)
}
