use std::collections::HashMap;

use crate::features::ir_generation::domain::IRDocument;
use crate::features::type_resolution::domain::{ReturnSummary, Type};

#[derive(Debug, Clone, Default)]
pub struct ReturnSummaryResult {
    pub summaries: HashMap<String, ReturnSummary>,
}

impl ReturnSummaryResult {
    pub fn return_type_of(&self, function_id: &str) -> Option<&Type> {
        self.summaries.get(function_id).map(|summary| &summary.return_type)
    }
}

pub trait ReturnSummaryAnalyzer: Send + Sync {
    fn analyze(&self, ir: &IRDocument) -> ReturnSummaryResult;
}
