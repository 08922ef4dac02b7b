use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type SentenceId = u32;

/// A normalized corpus sentence with its provenance and prior weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: SentenceId,
    pub text: String,
    pub source: String,
    pub line: u32,
    pub weight: f64,
}

/// Owns the corpus sentences as handed over by ingestion; duplicates are the
/// caller's concern. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentenceStore {
    sentences: Vec<Sentence>,
}

impl SentenceStore {
    pub fn new() -> Self {
        SentenceStore::default()
    }

    /// Ids are assigned strictly increasing from 0. The caller is expected to
    /// have normalized `text` already; the store does not re-normalize, it
    /// only rejects empty or whitespace-only input.
    pub fn add(&mut self, text: &str, source: &str, line: u32, weight: f64) -> Result<SentenceId> {
        if text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "sentence text must not be empty".into(),
            ));
        }
        let id = self.sentences.len() as SentenceId;
        self.sentences.push(Sentence {
            id,
            text: text.to_owned(),
            source: source.to_owned(),
            line,
            weight,
        });
        Ok(id)
    }

    pub fn get(&self, id: SentenceId) -> Option<&Sentence> {
        self.sentences.get(id as usize)
    }

    pub fn all(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_from_zero() {
        let mut store = SentenceStore::new();
        let a = store.add("apple pie", "a.txt", 1, 1.0).unwrap();
        let b = store.add("banana bread", "a.txt", 2, 1.0).unwrap();
        let c = store.add("cherry tart", "b.txt", 7, 2.0).unwrap();
        assert_eq!((a, b, c), (0, 1, 2));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_get_returns_stored_sentence() {
        let mut store = SentenceStore::new();
        let id = store.add("apple pie", "recipes.txt", 4, 1.5).unwrap();
        let sentence = store.get(id).unwrap();
        assert_eq!(sentence.text, "apple pie");
        assert_eq!(sentence.source, "recipes.txt");
        assert_eq!(sentence.line, 4);
        assert_eq!(sentence.weight, 1.5);
        assert!(store.get(99).is_none());
    }

    #[test]
    fn test_rejects_empty_text() {
        let mut store = SentenceStore::new();
        assert!(matches!(
            store.add("", "a.txt", 1, 1.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            store.add("   ", "a.txt", 1, 1.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(store.is_empty());
    }
}
