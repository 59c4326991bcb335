//! FFI-friendly Patch types
//!
//! Patch types with all-optional fields, letting cross-language callers
//! (CLI flags, config-file overlays) override a preset field-by-field
//! without a Rust closure.

use super::{pipeline_config::PipelineConfig, provenance::ConfigSource, stage_configs::*};
use serde::{Deserialize, Serialize};

/// Patch type for TaintConfig (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaintConfigPatch {
    pub max_depth: Option<usize>,
    pub max_paths: Option<usize>,
    pub field_sensitive: Option<bool>,
    pub use_ssa: Option<bool>,
    pub detect_sanitizers: Option<bool>,
    pub enable_interprocedural: Option<bool>,
    pub context_depth: Option<usize>,
    pub worklist_max_iterations: Option<usize>,
}

impl PipelineConfig {
    /// Apply taint patch (FFI-friendly alternative to closure)
    pub fn taint_patch(mut self, patch: TaintConfigPatch) -> Self {
        let mut base = TaintConfig::from_preset(self.preset);

        if let Some(v) = patch.max_depth {
            base.max_depth = v;
        }
        if let Some(v) = patch.max_paths {
            base.max_paths = v;
        }
        if let Some(v) = patch.field_sensitive {
            base.field_sensitive = v;
        }
        if let Some(v) = patch.use_ssa {
            base.use_ssa = v;
        }
        if let Some(v) = patch.detect_sanitizers {
            base.detect_sanitizers = v;
        }
        if let Some(v) = patch.enable_interprocedural {
            base.enable_interprocedural = v;
        }
        if let Some(v) = patch.context_depth {
            base.context_depth = v;
        }
        if let Some(v) = patch.worklist_max_iterations {
            base.worklist_max_iterations = v;
        }

        self.taint = Some(base);
        self.provenance
            .track_field("taint.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for ChunkingConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingConfigPatch {
    pub max_chunk_size: Option<usize>,
    pub min_chunk_size: Option<usize>,
    pub overlap_lines: Option<usize>,
    pub enable_semantic: Option<bool>,
    pub respect_scope: Option<bool>,
}

impl PipelineConfig {
    /// Apply chunking patch
    pub fn chunking_patch(mut self, patch: ChunkingConfigPatch) -> Self {
        let mut base = ChunkingConfig::from_preset(self.preset);

        if let Some(v) = patch.max_chunk_size {
            base.max_chunk_size = v;
        }
        if let Some(v) = patch.min_chunk_size {
            base.min_chunk_size = v;
        }
        if let Some(v) = patch.overlap_lines {
            base.overlap_lines = v;
        }
        if let Some(v) = patch.enable_semantic {
            base.enable_semantic = v;
        }
        if let Some(v) = patch.respect_scope {
            base.respect_scope = v;
        }

        self.chunking = Some(base);
        self.provenance
            .track_field("chunking.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for LexicalConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexicalConfigPatch {
    pub enable_fuzzy: Option<bool>,
    pub fuzzy_distance: Option<usize>,
    pub max_results: Option<usize>,
    pub enable_ngram: Option<bool>,
    pub ngram_size: Option<usize>,
    pub enable_stemming: Option<bool>,
}

impl PipelineConfig {
    /// Apply lexical patch
    pub fn lexical_patch(mut self, patch: LexicalConfigPatch) -> Self {
        let mut base = LexicalConfig::from_preset(self.preset);

        if let Some(v) = patch.enable_fuzzy {
            base.enable_fuzzy = v;
        }
        if let Some(v) = patch.fuzzy_distance {
            base.fuzzy_distance = v;
        }
        if let Some(v) = patch.max_results {
            base.max_results = v;
        }
        if let Some(v) = patch.enable_ngram {
            base.enable_ngram = v;
        }
        if let Some(v) = patch.ngram_size {
            base.ngram_size = v;
        }
        if let Some(v) = patch.enable_stemming {
            base.enable_stemming = v;
        }

        self.lexical = Some(base);
        self.provenance
            .track_field("lexical.*", ConfigSource::Builder);
        self
    }
}

/// Patch type for ParallelConfig
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParallelConfigPatch {
    pub num_workers: Option<usize>,
    pub batch_size: Option<usize>,
    pub enable_rayon: Option<bool>,
    pub stack_size_mb: Option<usize>,
}

impl PipelineConfig {
    /// Apply parallel patch
    pub fn parallel_patch(mut self, patch: ParallelConfigPatch) -> Self {
        let mut base = ParallelConfig::from_preset(self.preset);

        if let Some(v) = patch.num_workers {
            base.num_workers = v;
        }
        if let Some(v) = patch.batch_size {
            base.batch_size = v;
        }
        if let Some(v) = patch.enable_rayon {
            base.enable_rayon = v;
        }
        if let Some(v) = patch.stack_size_mb {
            base.stack_size_mb = v;
        }

        self.parallel = Some(base);
        self.provenance
            .track_field("parallel.*", ConfigSource::Builder);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::super::preset::Preset;
    use super::*;

    #[test]
    fn test_taint_patch() {
        let config = PipelineConfig::preset(Preset::Balanced).taint_patch(TaintConfigPatch {
            max_depth: Some(50),
            max_paths: Some(1000),
            ..Default::default()
        });

        let taint = config.taint.unwrap();
        assert_eq!(taint.max_depth, 50);
        assert_eq!(taint.max_paths, 1000);
        // Untouched fields keep the preset's default
        assert!(taint.field_sensitive);
    }

    #[test]
    fn test_partial_patch() {
        let config = PipelineConfig::preset(Preset::Fast).taint_patch(TaintConfigPatch {
            max_depth: Some(99),
            ..Default::default()
        });

        let taint = config.taint.unwrap();
        assert_eq!(taint.max_depth, 99);
        // Other fields fall back to the Fast preset
        assert_eq!(taint.max_paths, TaintConfig::from_preset(Preset::Fast).max_paths);
    }

    #[test]
    fn test_chunking_patch() {
        let config = PipelineConfig::preset(Preset::Balanced).chunking_patch(ChunkingConfigPatch {
            max_chunk_size: Some(4000),
            ..Default::default()
        });

        let chunking = config.chunking.unwrap();
        assert_eq!(chunking.max_chunk_size, 4000);
    }

    #[test]
    fn test_lexical_patch() {
        let config = PipelineConfig::preset(Preset::Balanced).lexical_patch(LexicalConfigPatch {
            fuzzy_distance: Some(4),
            ..Default::default()
        });

        let lexical = config.lexical.unwrap();
        assert_eq!(lexical.fuzzy_distance, 4);
    }

    #[test]
    fn test_parallel_patch() {
        let config = PipelineConfig::preset(Preset::Balanced).parallel_patch(ParallelConfigPatch {
            num_workers: Some(16),
            ..Default::default()
        });

        let parallel = config.parallel.unwrap();
        assert_eq!(parallel.num_workers, 16);
    }

    #[test]
    fn test_multiple_patches() {
        let config = PipelineConfig::preset(Preset::Balanced)
            .taint_patch(TaintConfigPatch {
                max_depth: Some(50),
                ..Default::default()
            })
            .chunking_patch(ChunkingConfigPatch {
                max_chunk_size: Some(2000),
                ..Default::default()
            });

        assert_eq!(config.taint.unwrap().max_depth, 50);
        assert_eq!(config.chunking.unwrap().max_chunk_size, 2000);
    }

    #[test]
    fn test_patch_with_all_none() {
        let config = PipelineConfig::preset(Preset::Balanced).taint_patch(TaintConfigPatch::default());
        let taint = config.taint.unwrap();
        let preset_default = TaintConfig::from_preset(Preset::Balanced);
        assert_eq!(taint.max_depth, preset_default.max_depth);
    }

    #[test]
    fn test_taint_patch_all_fields() {
        let config = PipelineConfig::preset(Preset::Thorough).taint_patch(TaintConfigPatch {
            max_depth: Some(42),
            max_paths: Some(999),
            field_sensitive: Some(false),
            use_ssa: Some(false),
            detect_sanitizers: Some(false),
            enable_interprocedural: Some(false),
            context_depth: Some(3),
            worklist_max_iterations: Some(123),
        });

        let taint = config.taint.unwrap();
        assert_eq!(taint.max_depth, 42);
        assert_eq!(taint.max_paths, 999);
        assert!(!taint.field_sensitive);
        assert!(!taint.use_ssa);
        assert!(!taint.detect_sanitizers);
        assert!(!taint.enable_interprocedural);
        assert_eq!(taint.context_depth, 3);
        assert_eq!(taint.worklist_max_iterations, 123);
    }
}
