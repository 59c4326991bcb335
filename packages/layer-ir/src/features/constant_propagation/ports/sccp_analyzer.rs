use std::collections::HashMap;

use crate::features::constant_propagation::domain::{ConstantLattice, Reachability, SCCPProgram};

#[derive(Debug, Clone, Default)]
pub struct SCCPResult {
    pub values: HashMap<String, ConstantLattice>,
    pub block_reachability: HashMap<String, Reachability>,
}

impl SCCPResult {
    pub fn is_reachable(&self, block_id: &str) -> bool {
        matches!(
            self.block_reachability.get(block_id),
            Some(Reachability::Reachable)
        )
    }

    pub fn constant_of(&self, var: &str) -> Option<&crate::features::constant_propagation::domain::Literal> {
        self.values.get(var).and_then(|l| l.as_literal())
    }
}

pub trait ConstantPropagationAnalyzer: Send + Sync {
    fn analyze(&self, program: &SCCPProgram) -> SCCPResult;
}
