//! Stage-specific configuration types
//!
//! Each pipeline stage has its own configuration struct with validation.
//!
//! ## SOLID Compliance
//! - **S**: Each config struct has single responsibility
//! - **O**: New configs can be added without modifying existing ones
//! - **D**: All configs implement `Validatable` trait for DIP

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

// ============================================================================
// Taint Fixpoint Solver Configuration
// ============================================================================

/// Monotone worklist taint solver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaintConfig {
    /// Maximum call chain depth (1..=1000)
    pub max_depth: usize,

    /// Maximum taint paths to track (1..=100000)
    pub max_paths: usize,

    /// Enable field-sensitive tracking
    pub field_sensitive: bool,

    /// Enable SSA-based analysis
    pub use_ssa: bool,

    /// Detect sanitizers (reduces false positives)
    pub detect_sanitizers: bool,

    /// Enable interprocedural analysis
    pub enable_interprocedural: bool,

    /// k-CFA context depth for call-site sensitivity
    pub context_depth: usize,

    /// Worklist solver max iterations (1..=10000)
    pub worklist_max_iterations: usize,

    /// Analysis timeout in seconds (0 = unlimited)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    60
}

impl TaintConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 || self.max_depth > 1000 {
            return Err(ConfigError::range_with_hint(
                "max_depth",
                self.max_depth,
                1,
                1000,
                "Call chain depth must be at least 1",
            ));
        }

        if self.max_paths == 0 || self.max_paths > 100000 {
            return Err(ConfigError::range_with_hint(
                "max_paths",
                self.max_paths,
                1,
                100000,
                "Number of taint paths must be reasonable",
            ));
        }

        if self.worklist_max_iterations == 0 || self.worklist_max_iterations > 10000 {
            return Err(ConfigError::range_with_hint(
                "worklist_max_iterations",
                self.worklist_max_iterations,
                1,
                10000,
                "Worklist iterations must be finite",
            ));
        }

        if self.context_depth > 10 {
            return Err(ConfigError::range_with_hint(
                "context_depth",
                self.context_depth,
                0,
                10,
                "k-CFA context depth beyond 10 is not practical",
            ));
        }

        if self.timeout_seconds > 3600 {
            return Err(ConfigError::range_with_hint(
                "timeout_seconds",
                self.timeout_seconds as usize,
                0,
                3600,
                "Analysis timeout should be at most 1 hour (3600 seconds)",
            ));
        }

        Ok(())
    }

    /// Builder: Set max_depth
    pub fn max_depth(mut self, v: usize) -> Self {
        self.max_depth = v;
        self
    }

    /// Builder: Set max_paths
    pub fn max_paths(mut self, v: usize) -> Self {
        self.max_paths = v;
        self
    }

    /// Builder: Set field_sensitive
    pub fn field_sensitive(mut self, v: bool) -> Self {
        self.field_sensitive = v;
        self
    }

    /// Builder: Set use_ssa
    pub fn use_ssa(mut self, v: bool) -> Self {
        self.use_ssa = v;
        self
    }

    /// Builder: Set detect_sanitizers
    pub fn detect_sanitizers(mut self, v: bool) -> Self {
        self.detect_sanitizers = v;
        self
    }

    /// Builder: Set enable_interprocedural
    pub fn enable_interprocedural(mut self, v: bool) -> Self {
        self.enable_interprocedural = v;
        self
    }

    /// Builder: Set context_depth
    pub fn context_depth(mut self, v: usize) -> Self {
        self.context_depth = v;
        self
    }

    /// Builder: Set worklist_max_iterations
    pub fn worklist_max_iterations(mut self, v: usize) -> Self {
        self.worklist_max_iterations = v;
        self
    }

    /// Builder: Set analysis timeout in seconds
    pub fn timeout_seconds(mut self, v: u64) -> Self {
        self.timeout_seconds = v;
        self
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                max_depth: 10,
                max_paths: 100,
                field_sensitive: false,
                use_ssa: false,
                detect_sanitizers: false,
                enable_interprocedural: false,
                context_depth: 0,
                worklist_max_iterations: 100,
                timeout_seconds: 5,
            },
            Preset::Balanced => Self {
                max_depth: 30,
                max_paths: 500,
                field_sensitive: true,
                use_ssa: true,
                detect_sanitizers: true,
                enable_interprocedural: true,
                context_depth: 1,
                worklist_max_iterations: 1000,
                timeout_seconds: 60,
            },
            Preset::Thorough => Self {
                max_depth: 100,
                max_paths: 5000,
                field_sensitive: true,
                use_ssa: true,
                detect_sanitizers: true,
                enable_interprocedural: true,
                context_depth: 2,
                worklist_max_iterations: 10000,
                timeout_seconds: 300,
            },
            Preset::Custom => Self::default(),
        }
    }
}

impl Default for TaintConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Chunking Configuration
// ============================================================================

/// Chunking Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters (100..=10000)
    pub max_chunk_size: usize,

    /// Minimum chunk size (50..=5000)
    pub min_chunk_size: usize,

    /// Overlap lines between chunks (0..=10)
    pub overlap_lines: usize,

    /// Enable semantic-aware chunking
    pub enable_semantic: bool,

    /// Respect scope boundaries
    pub respect_scope: bool,
}

impl ChunkingConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_chunk_size < 100 || self.max_chunk_size > 10000 {
            return Err(ConfigError::range_with_hint(
                "max_chunk_size",
                self.max_chunk_size,
                100,
                10000,
                "Chunk size must be reasonable",
            ));
        }

        if self.min_chunk_size < 50 || self.min_chunk_size > 5000 {
            return Err(ConfigError::range_with_hint(
                "min_chunk_size",
                self.min_chunk_size,
                50,
                5000,
                "Minimum chunk size must be reasonable",
            ));
        }

        if self.min_chunk_size >= self.max_chunk_size {
            return Err(ConfigError::Validation(
                "min_chunk_size must be less than max_chunk_size".to_string(),
            ));
        }

        if self.overlap_lines > 10 {
            return Err(ConfigError::range_with_hint(
                "overlap_lines",
                self.overlap_lines,
                0,
                10,
                "Overlap must be reasonable",
            ));
        }

        Ok(())
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                max_chunk_size: 2000,
                min_chunk_size: 200,
                overlap_lines: 0,
                enable_semantic: false,
                respect_scope: false,
            },
            Preset::Balanced => Self {
                max_chunk_size: 1000,
                min_chunk_size: 100,
                overlap_lines: 3,
                enable_semantic: true,
                respect_scope: true,
            },
            Preset::Thorough => Self {
                max_chunk_size: 500,
                min_chunk_size: 100,
                overlap_lines: 5,
                enable_semantic: true,
                respect_scope: true,
            },
            Preset::Custom => Self::default(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Lexical/Search Configuration
// ============================================================================

/// Lexical/Search Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalConfig {
    /// Enable fuzzy search
    pub enable_fuzzy: bool,

    /// Fuzzy edit distance (1..=5)
    pub fuzzy_distance: usize,

    /// Maximum search results (1..=10000)
    pub max_results: usize,

    /// Enable n-gram indexing
    pub enable_ngram: bool,

    /// N-gram size (2..=5)
    pub ngram_size: usize,

    /// Enable stemming
    pub enable_stemming: bool,
}

impl LexicalConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fuzzy_distance < 1 || self.fuzzy_distance > 5 {
            return Err(ConfigError::range_with_hint(
                "fuzzy_distance",
                self.fuzzy_distance,
                1,
                5,
                "Fuzzy distance must be reasonable",
            ));
        }

        if self.max_results < 1 || self.max_results > 10000 {
            return Err(ConfigError::range_with_hint(
                "max_results",
                self.max_results,
                1,
                10000,
                "Max results must be reasonable",
            ));
        }

        if self.ngram_size < 2 || self.ngram_size > 5 {
            return Err(ConfigError::range_with_hint(
                "ngram_size",
                self.ngram_size,
                2,
                5,
                "N-gram size must be reasonable",
            ));
        }

        Ok(())
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                enable_fuzzy: false,
                fuzzy_distance: 1,
                max_results: 100,
                enable_ngram: false,
                ngram_size: 3,
                enable_stemming: false,
            },
            Preset::Balanced => Self {
                enable_fuzzy: true,
                fuzzy_distance: 2,
                max_results: 100,
                enable_ngram: true,
                ngram_size: 3,
                enable_stemming: false,
            },
            Preset::Thorough => Self {
                enable_fuzzy: true,
                fuzzy_distance: 3,
                max_results: 1000,
                enable_ngram: true,
                ngram_size: 3,
                enable_stemming: true,
            },
            Preset::Custom => Self::default(),
        }
    }
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Parallelism Configuration
// ============================================================================

/// Parallelism Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,

    /// Batch size for parallel processing (1..=10000)
    pub batch_size: usize,

    /// Enable Rayon parallel iterator
    pub enable_rayon: bool,

    /// Thread stack size in MB (1..=64)
    pub stack_size_mb: usize,
}

impl ParallelConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }

        if self.batch_size < 1 || self.batch_size > 10000 {
            return Err(ConfigError::range_with_hint(
                "batch_size",
                self.batch_size,
                1,
                10000,
                "Batch size must be reasonable",
            ));
        }

        if self.stack_size_mb < 1 || self.stack_size_mb > 64 {
            return Err(ConfigError::range_with_hint(
                "stack_size_mb",
                self.stack_size_mb,
                1,
                64,
                "Stack size must be reasonable",
            ));
        }

        Ok(())
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                num_workers: 0, // Auto
                batch_size: 100,
                enable_rayon: true,
                stack_size_mb: 8,
            },
            Preset::Balanced => Self {
                num_workers: 0, // Auto
                batch_size: 100,
                enable_rayon: true,
                stack_size_mb: 8,
            },
            Preset::Thorough => Self {
                num_workers: 0, // Auto
                batch_size: 50,
                enable_rayon: true,
                stack_size_mb: 16,
            },
            Preset::Custom => Self::default(),
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for TaintConfig {
    fn validate(&self) -> ConfigResult<()> {
        TaintConfig::validate(self)
    }
}

impl Validatable for ChunkingConfig {
    fn validate(&self) -> ConfigResult<()> {
        ChunkingConfig::validate(self)
    }
}

impl Validatable for LexicalConfig {
    fn validate(&self) -> ConfigResult<()> {
        LexicalConfig::validate(self)
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        ParallelConfig::validate(self)
    }
}
