//! Symbol index write path.
//!
//! `SymbolIndex` only ever ingests parsed `IRDocument`s
//! (`SymbolIndex::build_from_irs`/`add_from_ir`), so unlike the lexical and
//! fuzzy writers this one can't work off raw `FileToIndex.content` alone —
//! it needs the same parse-then-generate pipeline the IR layer itself uses
//! (`Parser::parse` -> `IRGenerator::generate`) injected in.

use std::sync::Arc;
use std::time::Instant;

use crate::features::cross_file::{IRDocument as CrossFileIRDocument, SymbolIndex};
use crate::features::index_writers::domain::{FailureKind, WriteFailure, WriteOutcome};
use crate::features::index_writers::ports::{IndexWriter, WriterKind};
use crate::features::ir_generation::ports::IRGenerator;
use crate::features::lexical::FileToIndex;
use crate::features::parsing::ports::Parser;

pub struct SymbolIndexWriter {
    parser: Arc<dyn Parser>,
    generator: Arc<dyn IRGenerator>,
    index: SymbolIndex,
}

impl SymbolIndexWriter {
    pub fn new(parser: Arc<dyn Parser>, generator: Arc<dyn IRGenerator>) -> Self {
        Self {
            parser,
            generator,
            index: SymbolIndex::new(),
        }
    }

    pub fn symbol_index(&self) -> &SymbolIndex {
        &self.index
    }
}

impl IndexWriter for SymbolIndexWriter {
    fn writer_kind(&self) -> WriterKind {
        WriterKind::Symbol
    }

    fn index_files(&self, files: &[FileToIndex]) -> WriteOutcome {
        let start = Instant::now();
        let mut success_count = 0;
        let mut failed = Vec::new();

        for file in files {
            let result = self
                .parser
                .parse(&file.content, &file.file_path)
                .and_then(|tree| self.generator.generate(&tree, &file.repo_id));

            match result {
                Ok(ir) => {
                    let cross_file_ir =
                        CrossFileIRDocument::new(ir.file_path, ir.nodes, ir.edges);
                    self.index.add_from_ir(&cross_file_ir);
                    success_count += 1;
                }
                Err(err) => {
                    failed.push(WriteFailure::new(
                        file.file_path.clone(),
                        FailureKind::Permanent,
                        err.to_string(),
                    ));
                }
            }
        }

        WriteOutcome {
            success_count,
            failed,
            duration: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ir_generation::domain::IRDocument as IrGenDocument;
    use crate::features::parsing::domain::{ParsedTree, SyntaxKind, SyntaxNode};
    use crate::shared::models::{Node, NodeKind, Result as ModelResult, Span};

    struct StubParser;
    impl Parser for StubParser {
        fn parse(&self, source: &str, file_path: &str) -> ModelResult<ParsedTree> {
            let root = SyntaxNode::new(SyntaxKind::FunctionDef, Span::zero());
            Ok(ParsedTree::new(
                root,
                source.to_string(),
                file_path.to_string(),
                "stub".to_string(),
            ))
        }
        fn supports_extension(&self, _ext: &str) -> bool {
            true
        }
        fn language_name(&self) -> &'static str {
            "stub"
        }
    }

    struct StubGenerator;
    impl IRGenerator for StubGenerator {
        fn generate(&self, tree: &ParsedTree, repo_id: &str) -> ModelResult<IrGenDocument> {
            let mut doc = IrGenDocument::new(tree.file_path.clone());
            doc.nodes.push(Node::new(
                format!("{}::fn::1", repo_id),
                NodeKind::Function,
                "my_function".to_string(),
                tree.file_path.clone(),
                Span::new(1, 0, 1, 0),
            ));
            Ok(doc)
        }
    }

    #[test]
    fn test_indexes_parsed_symbols() {
        let writer = SymbolIndexWriter::new(Arc::new(StubParser), Arc::new(StubGenerator));
        let files = vec![FileToIndex::new("repo", "a.py", "def my_function(): pass").unwrap()];
        let outcome = writer.index_files(&files);
        assert_eq!(outcome.success_count, 1);
        assert!(!writer.symbol_index().get_file_symbols("a.py").is_empty());
    }
}
