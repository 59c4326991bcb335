use crate::features::constant_propagation::domain::SCCPProgram;
use crate::features::constant_propagation::ports::{ConstantPropagationAnalyzer, SCCPResult};

pub struct RunSCCPUseCase<A: ConstantPropagationAnalyzer> {
    analyzer: A,
}

impl<A: ConstantPropagationAnalyzer> RunSCCPUseCase<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn execute(&self, program: &SCCPProgram) -> SCCPResult {
        self.analyzer.analyze(program)
    }
}
