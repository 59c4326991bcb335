use crate::features::fusion::domain::{fused_score, priority_score, FusionConfig, SourceScores};
use crate::features::fusion::infrastructure::ABRouter;

/// One chunk's per-source scores plus the extra signals `priority_score`
/// needs on top of fusion.
pub struct ChunkCandidate {
    pub chunk_id: String,
    pub scores: SourceScores,
    pub repomap_importance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedChunk {
    pub chunk_id: String,
    pub fused_score: f32,
    pub priority_score: f32,
}

/// Fuses every candidate's per-source scores under the preset selected by
/// A/B routing, computes its priority score, and sorts descending.
pub struct RankQueryResultsUseCase<'a> {
    router: ABRouter<'a>,
    config: FusionConfig,
}

impl<'a> RankQueryResultsUseCase<'a> {
    pub fn new(router: ABRouter<'a>) -> Self {
        Self::with_config(router, FusionConfig::default())
    }

    pub fn with_config(router: ABRouter<'a>, config: FusionConfig) -> Self {
        Self { router, config }
    }

    pub fn execute(&self, intent: &str, query_id: &str, candidates: Vec<ChunkCandidate>) -> Vec<RankedChunk> {
        let preset = self.router.route(intent, query_id);

        let mut ranked: Vec<RankedChunk> = candidates
            .into_iter()
            .map(|candidate| {
                let fused = fused_score(&candidate.scores, &preset.weights, &self.config);
                let symbol_score = candidate.scores.symbol.unwrap_or(0.0);
                let priority = priority_score(fused, candidate.repomap_importance, symbol_score);
                RankedChunk {
                    chunk_id: candidate.chunk_id,
                    fused_score: fused,
                    priority_score: priority,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.priority_score
                .partial_cmp(&a.priority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::fusion::infrastructure::StaticPresetStore;

    #[test]
    fn test_ranks_by_priority_descending() {
        let store = StaticPresetStore::default();
        let router = ABRouter::new(&store, 0);
        let usecase = RankQueryResultsUseCase::new(router);

        let candidates = vec![
            ChunkCandidate {
                chunk_id: "low".to_string(),
                scores: SourceScores {
                    lexical: Some(0.1),
                    ..Default::default()
                },
                repomap_importance: 0.1,
            },
            ChunkCandidate {
                chunk_id: "high".to_string(),
                scores: SourceScores {
                    lexical: Some(0.9),
                    symbol: Some(0.9),
                    ..Default::default()
                },
                repomap_importance: 0.9,
            },
        ];

        let ranked = usecase.execute("code_search", "q1", candidates);
        assert_eq!(ranked[0].chunk_id, "high");
        assert!(ranked[0].priority_score > ranked[1].priority_score);
    }
}
