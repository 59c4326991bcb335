//! Configuration provenance tracking
//!
//! Track where each configuration value came from (preset, YAML, env, builder)

use super::preset::Preset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration provenance tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigProvenance {
    /// Base preset used
    preset: Preset,

    /// Field-level tracking: field path → source
    /// Example: "taint.max_depth" → ConfigSource::Env("CODEGRAPH__TAINT__MAX_DEPTH")
    field_sources: HashMap<String, ConfigSource>,
}

/// Configuration source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConfigSource {
    /// From preset defaults
    Preset(Preset),

    /// From YAML file (v1: path only, no line tracking)
    Yaml { path: String },

    /// From environment variable
    Env(String),

    /// From builder API
    Builder,
}

impl ConfigProvenance {
    /// Create from preset
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            field_sources: HashMap::new(),
        }
    }

    /// Record field-level override
    pub fn track_field(&mut self, field_path: &str, source: ConfigSource) {
        self.field_sources.insert(field_path.to_string(), source);
    }

    /// Get source for a specific field
    pub fn get_source(&self, field_path: &str) -> Option<&ConfigSource> {
        self.field_sources.get(field_path)
    }

    /// Get base preset
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Get all field sources
    pub fn field_sources(&self) -> &HashMap<String, ConfigSource> {
        &self.field_sources
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Base preset: {:?}", self.preset)];

        if !self.field_sources.is_empty() {
            lines.push("\nOverridden fields:".to_string());

            let mut sorted_fields: Vec<_> = self.field_sources.iter().collect();
            sorted_fields.sort_by_key(|(k, _)| *k);

            for (field, source) in sorted_fields {
                let source_str = match source {
                    ConfigSource::Preset(p) => format!("preset {:?}", p),
                    ConfigSource::Yaml { path } => format!("{}", path),
                    ConfigSource::Env(var) => format!("env ${}", var),
                    ConfigSource::Builder => "builder API".to_string(),
                };
                lines.push(format!("  {} ← {}", field, source_str));
            }
        }

        lines.join("\n")
    }
}

impl ConfigSource {
    /// Get a short description
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Preset(p) => format!("preset:{}", p),
            ConfigSource::Yaml { path } => format!("yaml:{}", path),
            ConfigSource::Env(var) => format!("env:{}", var),
            ConfigSource::Builder => "builder".to_string(),
        }
    }
}
