use crate::features::ir_generation::domain::IRDocument;
use crate::features::type_resolution::ports::{ReturnSummaryAnalyzer, ReturnSummaryResult};

pub struct SummarizeReturnSummariesUseCase<A: ReturnSummaryAnalyzer> {
    analyzer: A,
}

impl<A: ReturnSummaryAnalyzer> SummarizeReturnSummariesUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn execute(&self, ir: &IRDocument) -> ReturnSummaryResult {
        self.analyzer.analyze(ir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::type_resolution::domain::Type;
    use crate::features::type_resolution::infrastructure::CallGraphReturnSummarySolver;
    use crate::shared::models::{Node, NodeKind, Span};

    #[test]
    fn test_execute_delegates_to_analyzer() {
        let mut ir = IRDocument::new("mod.py".to_string());
        let mut f = Node::new("f1".to_string(), NodeKind::Function, "f".to_string(), "mod.py".to_string(), Span::new(1, 0, 1, 0));
        f.return_type = Some("bool".to_string());
        ir.nodes.push(f);

        let usecase = SummarizeReturnSummariesUseCase::new(CallGraphReturnSummarySolver::default());
        let result = usecase.execute(&ir);
        assert_eq!(result.return_type_of("f1"), Some(&Type::simple("bool")));
    }
}
