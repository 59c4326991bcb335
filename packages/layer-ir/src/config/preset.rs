//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::performance::PerformanceProfile;
use serde::{Deserialize, Serialize};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI/CD: Minimal fast analysis
    ///
    /// - Taint: max_depth=10, context_depth=0 (context-insensitive)
    /// - Performance: <5s, <200MB
    Fast,

    /// Development: Balanced analysis
    ///
    /// - Taint: max_depth=30, context_depth=1 (1-CFA)
    /// - Performance: <30s, <1GB
    Balanced,

    /// Security Audit: Complete analysis
    ///
    /// - Taint: max_depth=100, context_depth=2 (2-CFA), interprocedural
    /// - Performance: <5m, <4GB
    Thorough,

    /// Custom: User-defined (YAML/TOML only)
    ///
    /// This preset provides minimal defaults.
    /// Users must override via YAML or builder API.
    Custom,
}

impl Preset {
    /// Get performance profile for this preset
    pub fn performance_profile(&self) -> PerformanceProfile {
        match self {
            Self::Fast => PerformanceProfile::fast(),
            Self::Balanced => PerformanceProfile::balanced(),
            Self::Thorough => PerformanceProfile::thorough(),
            Self::Custom => PerformanceProfile::balanced(), // Default to balanced
        }
    }

    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            "custom" => Ok(Self::Custom),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: fast, balanced, thorough, custom",
                s
            )),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
