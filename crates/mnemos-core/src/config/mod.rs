//! The single, fully-resolved configuration object.
//!
//! `MnemosConfig` is built once (from TOML or defaults), validated, and then
//! handed to every component. Components never merge overrides of their own.

pub mod backend_config;
pub mod compaction_config;
pub mod defaults;
pub mod duration;
pub mod markdown_config;
pub mod observability_config;
pub mod scoring_config;
pub mod storage_config;

use serde::{Deserialize, Serialize};

pub use backend_config::BackendConfig;
pub use compaction_config::CompactionConfig;
pub use duration::{DurationSpec, DurationUnit};
pub use markdown_config::MarkdownConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;

use crate::errors::ConfigError;

/// Top-level configuration, one section per component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MnemosConfig {
    pub storage: StorageConfig,
    pub scoring: ScoringConfig,
    pub compaction: CompactionConfig,
    pub markdown: MarkdownConfig,
    pub backend: BackendConfig,
    pub observability: ObservabilityConfig,
}

impl MnemosConfig {
    /// Parse and validate a TOML document. Missing fields take defaults;
    /// malformed explicit values are rejected.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field and range constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scoring;
        check_weight("scoring.importance_weight", s.importance_weight)?;
        check_weight("scoring.recency_weight", s.recency_weight)?;
        check_weight("scoring.access_boost", s.access_boost)?;
        check_weight("scoring.recency_boost", s.recency_boost)?;
        if s.importance_weight + s.recency_weight > 1.0 + f64::EPSILON {
            return Err(ConfigError::InvalidValue {
                field: "scoring".to_string(),
                reason: format!(
                    "importance_weight + recency_weight = {} exceeds 1",
                    s.importance_weight + s.recency_weight
                ),
            });
        }
        if !(s.decay_factor > 0.0 && s.decay_factor < 1.0) {
            return Err(invalid("scoring.decay_factor", "must lie strictly within (0, 1)"));
        }
        if !(s.recency_window_days > 0.0) {
            return Err(invalid("scoring.recency_window_days", "must be positive"));
        }

        let c = &self.compaction;
        if c.weekly_min_group == 0 {
            return Err(invalid("compaction.weekly_min_group", "must be at least 1"));
        }
        if c.monthly_min_group == 0 {
            return Err(invalid("compaction.monthly_min_group", "must be at least 1"));
        }
        if c.batch_limit == 0 {
            return Err(invalid("compaction.batch_limit", "must be at least 1"));
        }
        if c.summary_timeout.as_millis() == 0 {
            return Err(invalid("compaction.summary_timeout", "must be non-zero"));
        }

        let m = &self.markdown;
        if !(m.similarity_threshold > 0.0 && m.similarity_threshold <= 1.0) {
            return Err(invalid("markdown.similarity_threshold", "must lie within (0, 1]"));
        }
        if m.poll_interval_ms == 0 {
            return Err(invalid("markdown.poll_interval_ms", "must be non-zero"));
        }

        if self.storage.default_page_size == 0 {
            return Err(invalid("storage.default_page_size", "must be at least 1"));
        }
        if self.backend.candidate_multiplier == 0 {
            return Err(invalid("backend.candidate_multiplier", "must be at least 1"));
        }
        if self.backend.queue_capacity == 0 {
            return Err(invalid("backend.queue_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

fn check_weight(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidWeight {
            name: name.to_string(),
            value,
        })
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
