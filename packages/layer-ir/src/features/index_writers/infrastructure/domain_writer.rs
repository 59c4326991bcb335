//! Domain (rule-based tag) index.
//!
//! Applies a fixed set of regex-to-tag rules to file content, mirroring the
//! `TaintSource`/`TaintSink` pattern-matching shape — a rule is a compiled
//! `Regex` plus a description, tested against the file instead of a symbol
//! name.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Instant;

use regex::Regex;

use crate::features::index_writers::domain::{FailureKind, WriteFailure, WriteOutcome};
use crate::features::index_writers::ports::{IndexWriter, WriterKind};
use crate::features::lexical::FileToIndex;

/// A named tag applied to any file whose content matches `pattern`.
pub struct DomainRule {
    pub tag: String,
    pattern: Regex,
}

impl DomainRule {
    pub fn new(tag: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            tag: tag.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

fn default_rules() -> Vec<DomainRule> {
    vec![
        DomainRule::new("sql", r"(?i)\b(select|insert|update|delete)\s+.*\bfrom\b|\bexecute\s*\(").unwrap(),
        DomainRule::new("http-handler", r"(?i)\b(get|post|put|delete|patch)\s*\(\s*[\"']/").unwrap(),
        DomainRule::new("auth", r"(?i)\b(password|token|session|authenticate|authorize)\b").unwrap(),
        DomainRule::new("test", r"(?i)\b(fn test_|def test_|#\[test\]|describe\(|it\()\b").unwrap(),
    ]
}

pub struct DomainIndexWriter {
    rules: Vec<DomainRule>,
    /// file_path -> tags assigned to it
    tags: Mutex<HashMap<String, HashSet<String>>>,
}

impl Default for DomainIndexWriter {
    fn default() -> Self {
        Self::with_rules(default_rules())
    }
}

impl DomainIndexWriter {
    pub fn with_rules(rules: Vec<DomainRule>) -> Self {
        Self {
            rules,
            tags: Mutex::new(HashMap::new()),
        }
    }

    pub fn tags_for(&self, file_path: &str) -> HashSet<String> {
        self.tags
            .lock()
            .expect("domain index mutex poisoned")
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn files_tagged(&self, tag: &str) -> HashSet<String> {
        self.tags
            .lock()
            .expect("domain index mutex poisoned")
            .iter()
            .filter(|(_, tags)| tags.contains(tag))
            .map(|(path, _)| path.clone())
            .collect()
    }
}

impl IndexWriter for DomainIndexWriter {
    fn writer_kind(&self) -> WriterKind {
        WriterKind::Domain
    }

    fn index_files(&self, files: &[FileToIndex]) -> WriteOutcome {
        let start = Instant::now();
        let mut tags = self.tags.lock().expect("domain index mutex poisoned");
        let mut success_count = 0;

        for file in files {
            let matched: HashSet<String> = self
                .rules
                .iter()
                .filter(|rule| rule.matches(&file.content))
                .map(|rule| rule.tag.clone())
                .collect();
            tags.insert(file.file_path.clone(), matched);
            success_count += 1;
        }

        WriteOutcome {
            success_count,
            failed: Vec::<WriteFailure>::new(),
            duration: start.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_rule_tags_query_file() {
        let writer = DomainIndexWriter::default();
        let files = vec![FileToIndex::new("repo", "db.py", "cursor.execute(\"SELECT * FROM users\")").unwrap()];
        writer.index_files(&files);
        assert!(writer.tags_for("db.py").contains("sql"));
    }

    #[test]
    fn test_non_matching_file_gets_no_tags() {
        let writer = DomainIndexWriter::default();
        let files = vec![FileToIndex::new("repo", "util.py", "def add(a, b): return a + b").unwrap()];
        writer.index_files(&files);
        assert!(writer.tags_for("util.py").is_empty());
    }

    #[test]
    fn test_files_tagged_reverse_lookup() {
        let writer = DomainIndexWriter::default();
        let files = vec![
            FileToIndex::new("repo", "auth.py", "def login(password): authenticate(password)").unwrap(),
            FileToIndex::new("repo", "math.py", "def add(a, b): return a + b").unwrap(),
        ];
        writer.index_files(&files);
        let tagged = writer.files_tagged("auth");
        assert!(tagged.contains("auth.py"));
        assert!(!tagged.contains("math.py"));
    }
}
