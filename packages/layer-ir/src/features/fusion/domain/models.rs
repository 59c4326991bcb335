/// Per-source scores for one chunk, already normalized to `[0,1]` by each
/// index's own scorer. A source that didn't return this chunk is `None`,
/// not `0.0` — absence and a genuine zero score are different for the
/// correlation-adjustment rules below.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceScores {
    pub lexical: Option<f32>,
    pub vector: Option<f32>,
    pub symbol: Option<f32>,
    pub fuzzy: Option<f32>,
    pub domain: Option<f32>,
    /// Graph-proximity score (distinct from `symbol`), used only by the
    /// `symbol`+`graph` correlation bonus.
    pub graph: Option<f32>,
}

impl SourceScores {
    fn get(score: Option<f32>) -> f32 {
        score.unwrap_or(0.0)
    }
}

/// Per-intent weight vector, loaded from a versioned preset store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub lexical: f32,
    pub vector: f32,
    pub symbol: f32,
    pub fuzzy: f32,
    pub domain: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            lexical: 0.3,
            vector: 0.3,
            symbol: 0.2,
            fuzzy: 0.1,
            domain: 0.1,
        }
    }
}

fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// The correlation constants behind `fused_score`'s cross-source agreement
/// and semantic-drift adjustments, promoted to config instead of left as
/// hardcoded literals, resolving spec.md §9's "correlation constants as
/// config" Open Question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionConfig {
    pub lexical_symbol_agreement_threshold: f32,
    pub lexical_symbol_agreement_bonus: f32,
    pub symbol_graph_agreement_threshold: f32,
    pub symbol_graph_agreement_bonus: f32,
    pub drift_vector_threshold: f32,
    pub drift_lexical_symbol_threshold: f32,
    pub drift_penalty_multiplier: f32,
    pub mismatch_vector_threshold: f32,
    pub mismatch_lexical_threshold: f32,
    pub mismatch_penalty: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            lexical_symbol_agreement_threshold: 0.7,
            lexical_symbol_agreement_bonus: 0.15,
            symbol_graph_agreement_threshold: 0.7,
            symbol_graph_agreement_bonus: 0.10,
            drift_vector_threshold: 0.85,
            drift_lexical_symbol_threshold: 0.2,
            drift_penalty_multiplier: 0.6,
            mismatch_vector_threshold: 0.7,
            mismatch_lexical_threshold: 0.3,
            mismatch_penalty: 0.05,
        }
    }
}

/// Combines every source's weighted score plus the correlation adjustments
/// spec'd for cross-source agreement and semantic drift, clamped to `[0,1]`.
pub fn fused_score(scores: &SourceScores, weights: &FusionWeights, config: &FusionConfig) -> f32 {
    let lexical = SourceScores::get(scores.lexical);
    let vector = SourceScores::get(scores.vector);
    let symbol = SourceScores::get(scores.symbol);
    let fuzzy = SourceScores::get(scores.fuzzy);
    let domain = SourceScores::get(scores.domain);
    let graph = SourceScores::get(scores.graph);

    let mut score = weights.lexical * lexical
        + weights.vector * vector
        + weights.symbol * symbol
        + weights.fuzzy * fuzzy
        + weights.domain * domain;

    if lexical >= config.lexical_symbol_agreement_threshold && symbol >= config.lexical_symbol_agreement_threshold {
        score += config.lexical_symbol_agreement_bonus;
    }
    if symbol >= config.symbol_graph_agreement_threshold && graph >= config.symbol_graph_agreement_threshold {
        score += config.symbol_graph_agreement_bonus;
    }
    if vector >= config.drift_vector_threshold
        && lexical < config.drift_lexical_symbol_threshold
        && symbol < config.drift_lexical_symbol_threshold
    {
        score *= config.drift_penalty_multiplier;
    }
    if vector >= config.mismatch_vector_threshold && lexical < config.mismatch_lexical_threshold {
        score -= config.mismatch_penalty;
    }

    clamp01(score)
}

/// Final ranking score: `0.6×fused + 0.25×repomap_importance + 0.15×symbol_score`.
pub fn priority_score(fused: f32, repomap_importance: f32, symbol_score: f32) -> f32 {
    clamp01(0.6 * fused + 0.25 * repomap_importance + 0.15 * symbol_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fused_score_with_no_correlation_bonus() {
        let scores = SourceScores {
            lexical: Some(0.5),
            vector: Some(0.0),
            symbol: Some(0.0),
            fuzzy: None,
            domain: None,
            graph: None,
        };
        let weights = FusionWeights::default();
        let config = FusionConfig::default();
        let fused = fused_score(&scores, &weights, &config);
        assert!((fused - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_lexical_symbol_agreement_bonus() {
        let scores = SourceScores {
            lexical: Some(0.8),
            symbol: Some(0.8),
            vector: None,
            fuzzy: None,
            domain: None,
            graph: None,
        };
        let weights = FusionWeights::default();
        let config = FusionConfig::default();
        let base = weights.lexical * 0.8 + weights.symbol * 0.8;
        let fused = fused_score(&scores, &weights, &config);
        assert!((fused - (base + 0.15)).abs() < 1e-6);
    }

    #[test]
    fn test_semantic_drift_penalty_applies() {
        // lexical < 0.2 also satisfies the separate vector>=0.7 && lexical<0.3
        // subtract rule, so both adjustments stack here.
        let scores = SourceScores {
            lexical: Some(0.1),
            symbol: Some(0.1),
            vector: Some(0.9),
            fuzzy: None,
            domain: None,
            graph: None,
        };
        let weights = FusionWeights::default();
        let config = FusionConfig::default();
        let raw = weights.lexical * 0.1 + weights.symbol * 0.1 + weights.vector * 0.9;
        let fused = fused_score(&scores, &weights, &config);
        assert!((fused - (raw * 0.6 - 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_score_clamped_to_one() {
        let scores = SourceScores {
            lexical: Some(1.0),
            symbol: Some(1.0),
            graph: Some(1.0),
            vector: Some(1.0),
            fuzzy: Some(1.0),
            domain: Some(1.0),
        };
        let weights = FusionWeights {
            lexical: 1.0,
            vector: 1.0,
            symbol: 1.0,
            fuzzy: 1.0,
            domain: 1.0,
        };
        assert_eq!(fused_score(&scores, &weights, &FusionConfig::default()), 1.0);
    }

    #[test]
    fn test_priority_score_formula() {
        let p = priority_score(0.5, 0.4, 0.3);
        assert!((p - (0.6 * 0.5 + 0.25 * 0.4 + 0.15 * 0.3)).abs() < 1e-6);
    }
}
