use std::fs;
use std::path::Path;

use crate::error::Result;

/// One normalized corpus sentence plus its provenance. `line` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusLine {
    pub text: String,
    pub source: String,
    pub line: u32,
    pub weight: f64,
}

impl CorpusLine {
    pub fn new(text: impl Into<String>, source: impl Into<String>, line: u32) -> Self {
        CorpusLine {
            text: text.into(),
            source: source.into(),
            line,
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Lowercase, keep ASCII alphabetic words only, single-space separated.
/// This is the one normalization rule in the system; the index contents and
/// the variant alphabet both assume it.
pub fn normalize_line(line: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in line.chars() {
        if c.is_ascii_alphabetic() {
            current.push(c.to_ascii_lowercase());
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.join(" ")
}

/// Read every `.txt` file directly under `dir` (sorted by path for
/// deterministic sentence ids), normalizing line by line. Lines that
/// normalize to empty are skipped, so line numbers in the output are sparse
/// but faithful to the source file.
pub fn read_corpus_dir(dir: &Path) -> Result<Vec<CorpusLine>> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut lines = Vec::new();
    for path in &paths {
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content = fs::read_to_string(path)?;
        for (i, raw) in content.lines().enumerate() {
            let text = normalize_line(raw);
            if text.is_empty() {
                continue;
            }
            lines.push(CorpusLine {
                text,
                source: source.clone(),
                line: (i + 1) as u32,
                weight: 1.0,
            });
        }
    }
    Ok(lines)
}
