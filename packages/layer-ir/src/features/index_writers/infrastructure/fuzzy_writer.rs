//! Fuzzy (edit-distance) identifier index.
//!
//! Tokenizes file content with the same `CamelCaseTokenizer` + `LowerCaser`
//! pipeline `build_code_analyzer()` uses for the lexical index, so
//! `getUserName` indexes as `get`/`user`/`name` here too — case-insensitive
//! by default, matching lexical's own tokenization.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Instant;

use tantivy::tokenizer::{TextAnalyzer, TokenStream};

use crate::features::index_writers::domain::{WriteFailure, WriteOutcome};
use crate::features::index_writers::ports::{IndexWriter, WriterKind};
use crate::features::lexical::{build_code_analyzer, FileToIndex};

/// Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut prev_diag = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cur = row[j + 1];
            row[j + 1] = if ca == cb {
                prev_diag
            } else {
                1 + prev_diag.min(row[j]).min(row[j + 1])
            };
            prev_diag = cur;
        }
    }
    row[b.len()]
}

fn tokenize(content: &str) -> Vec<String> {
    let mut analyzer: TextAnalyzer = build_code_analyzer();
    let mut stream = analyzer.token_stream(content);
    let mut tokens = Vec::new();
    while stream.advance() {
        tokens.push(stream.token().text.clone());
    }
    tokens
}

pub struct FuzzyIndexWriter {
    /// token -> files it appears in
    index: Mutex<HashMap<String, HashSet<String>>>,
}

impl Default for FuzzyIndexWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyIndexWriter {
    pub fn new() -> Self {
        Self {
            index: Mutex::new(HashMap::new()),
        }
    }

    /// Files whose indexed identifiers are within `max_distance` (clamped to
    /// `1..=3` per the default threshold) of `query`, case-insensitive.
    pub fn search(&self, query: &str, max_distance: usize) -> HashSet<String> {
        let max_distance = max_distance.clamp(1, 3);
        let query = query.to_lowercase();
        let index = self.index.lock().expect("fuzzy index mutex poisoned");
        let mut matches = HashSet::new();
        for (token, files) in index.iter() {
            if levenshtein(token, &query) <= max_distance {
                matches.extend(files.iter().cloned());
            }
        }
        matches
    }
}

impl IndexWriter for FuzzyIndexWriter {
    fn writer_kind(&self) -> WriterKind {
        WriterKind::Fuzzy
    }

    fn index_files(&self, files: &[FileToIndex]) -> WriteOutcome {
        let start = Instant::now();
        let mut index = self.index.lock().expect("fuzzy index mutex poisoned");
        let mut success_count = 0;

        for file in files {
            // Drop any stale entries for this file before re-indexing.
            for files_for_token in index.values_mut() {
                files_for_token.remove(&file.file_path);
            }
            for token in tokenize(&file.content) {
                index.entry(token).or_default().insert(file.file_path.clone());
            }
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
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_substitution() {
        assert_eq!(levenshtein("hello", "hallo"), 1);
    }

    #[test]
    fn test_index_and_search_within_threshold() {
        let writer = FuzzyIndexWriter::new();
        let files = vec![FileToIndex::new("repo", "a.py", "def getUserName(): pass").unwrap()];
        let outcome = writer.index_files(&files);
        assert_eq!(outcome.success_count, 1);

        let hits = writer.search("usre", 2); // typo for "user"
        assert!(hits.contains("a.py"));
    }

    #[test]
    fn test_search_outside_threshold_misses() {
        let writer = FuzzyIndexWriter::new();
        let files = vec![FileToIndex::new("repo", "a.py", "def getUserName(): pass").unwrap()];
        writer.index_files(&files);

        let hits = writer.search("zzzzzzzzzz", 1);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_reindexing_file_drops_stale_tokens() {
        let writer = FuzzyIndexWriter::new();
        writer.index_files(&[FileToIndex::new("repo", "a.py", "def oldName(): pass").unwrap()]);
        writer.index_files(&[FileToIndex::new("repo", "a.py", "def newName(): pass").unwrap()]);

        assert!(writer.search("old", 0).is_empty());
        assert!(writer.search("new", 0).contains("a.py"));
    }
}
