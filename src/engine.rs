use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::{self, CorpusLine};
use crate::error::{Error, Result};
use crate::index::SubstringIndex;
use crate::store::{Sentence, SentenceId, SentenceStore};
use crate::variants;

/// Scoring and index-construction knobs, threaded through construction
/// instead of living in ambient globals. The default `cost_penalty` is larger
/// than any achievable `match_len + weight`, so every exact (cost-0) match
/// outranks every one-edit match.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub cost_penalty: f64,
    pub max_substring_len: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cost_penalty: 1000.0,
            max_substring_len: None,
        }
    }
}

/// One sentence reachable from the query, after de-duplication across
/// variants: lowest cost wins, then the longest matched substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub sentence_id: SentenceId,
    pub cost: u8,
    pub match_len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub sentence: Sentence,
    pub score: f64,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Filename: {} Line: {})",
            self.sentence.text, self.sentence.source, self.sentence.line
        )
    }
}

/// Look up every variant in the index and keep, per sentence, only the best
/// match. Without this de-duplication a sentence reachable through many
/// overlapping substrings would dominate the ranking. The result is sorted by
/// sentence id, independent of variant iteration order.
pub fn find_matches(variants: &HashMap<String, u8>, index: &SubstringIndex) -> Vec<Match> {
    let mut best: HashMap<SentenceId, Match> = HashMap::new();
    for (text, &cost) in variants {
        let match_len = text.chars().count();
        for &id in index.lookup(text) {
            let candidate = Match {
                sentence_id: id,
                cost,
                match_len,
            };
            best.entry(id)
                .and_modify(|current| {
                    if beats(&candidate, current) {
                        *current = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }
    let mut matches: Vec<Match> = best.into_values().collect();
    matches.sort_unstable_by_key(|m| m.sentence_id);
    matches
}

fn beats(a: &Match, b: &Match) -> bool {
    a.cost < b.cost || (a.cost == b.cost && a.match_len > b.match_len)
}

/// Score each match and return the top `k` distinct sentences, score
/// descending then sentence id ascending. Fewer matches than `k` is a normal
/// outcome, not an error.
pub fn rank(
    matches: &[Match],
    store: &SentenceStore,
    k: usize,
    config: &EngineConfig,
) -> Result<Vec<Suggestion>> {
    if k < 1 {
        return Err(Error::InvalidInput("k must be at least 1".into()));
    }
    let mut suggestions: Vec<Suggestion> = matches
        .iter()
        .filter_map(|m| {
            let sentence = store.get(m.sentence_id)?;
            let score = sentence.weight + m.match_len as f64
                - config.cost_penalty * f64::from(m.cost);
            Some(Suggestion {
                sentence: sentence.clone(),
                score,
            })
        })
        .collect();
    suggestions.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.sentence.id.cmp(&b.sentence.id))
    });
    suggestions.truncate(k);
    Ok(suggestions)
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    store: &'a SentenceStore,
    index: &'a SubstringIndex,
}

#[derive(Deserialize)]
struct Snapshot {
    store: SentenceStore,
    index: SubstringIndex,
}

/// Long-lived owner of the store and index. Both are read-only after
/// construction, so `&Engine` can be shared freely across threads; all
/// per-query state lives on the caller's stack.
#[derive(Debug, Clone)]
pub struct Engine {
    store: SentenceStore,
    index: SubstringIndex,
    config: EngineConfig,
}

impl Engine {
    /// One-shot construction from already-normalized corpus lines. Index
    /// build cost is paid here, never per query.
    pub fn build<I>(lines: I, config: EngineConfig) -> Result<Engine>
    where
        I: IntoIterator<Item = CorpusLine>,
    {
        let mut store = SentenceStore::new();
        for line in lines {
            store.add(&line.text, &line.source, line.line, line.weight)?;
        }
        let index = SubstringIndex::build(&store, config.max_substring_len);
        Ok(Engine {
            store,
            index,
            config,
        })
    }

    /// Combined entry point: generate variants, match, rank. An empty query
    /// or an empty store yields an empty list, not an error.
    pub fn suggest(&self, query: &str, k: usize) -> Result<Vec<Suggestion>> {
        if k < 1 {
            return Err(Error::InvalidInput("k must be at least 1".into()));
        }
        if query.trim().is_empty() || self.store.is_empty() {
            return Ok(Vec::new());
        }
        let variants = variants::generate(query);
        let matches = find_matches(&variants, &self.index);
        rank(&matches, &self.store, k, &self.config)
    }

    pub fn store(&self) -> &SentenceStore {
        &self.store
    }

    pub fn index(&self) -> &SubstringIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Opaque snapshot of store + index. The blob's layout is not part of the
    /// public contract; only the round-trip through `from_snapshot_str` is.
    pub fn to_snapshot_string(&self) -> Result<String> {
        let json = serde_json::to_string(&SnapshotRef {
            store: &self.store,
            index: &self.index,
        })?;
        Ok(json)
    }

    /// Fails closed: malformed or incompatible data is `CorruptSnapshot`,
    /// never a partial engine. Incompatible includes an index whose entries
    /// reference sentence ids the store does not hold.
    pub fn from_snapshot_str(data: &str, config: EngineConfig) -> Result<Engine> {
        let snapshot: Snapshot = serde_json::from_str(data)
            .map_err(|e| Error::CorruptSnapshot(e.to_string()))?;
        if let Some(max_id) = snapshot.index.max_sentence_id() {
            if snapshot.store.get(max_id).is_none() {
                return Err(Error::CorruptSnapshot(format!(
                    "index references sentence id {} but the store holds {} sentences",
                    max_id,
                    snapshot.store.len()
                )));
            }
        }
        Ok(Engine {
            store: snapshot.store,
            index: snapshot.index,
            config,
        })
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let json = self.to_snapshot_string()?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_snapshot(path: &Path, config: EngineConfig) -> Result<Engine> {
        let content = fs::read_to_string(path)?;
        Engine::from_snapshot_str(&content, config)
    }

    /// Load the snapshot if one exists, otherwise build from the corpus
    /// directory and write the snapshot for next time. A corrupt snapshot is
    /// reported, not silently rebuilt over.
    pub fn load_or_build(
        snapshot_path: &Path,
        corpus_dir: &Path,
        config: EngineConfig,
    ) -> Result<Engine> {
        if snapshot_path.exists() {
            return Engine::load_snapshot(snapshot_path, config);
        }
        let lines = corpus::read_corpus_dir(corpus_dir)?;
        let engine = Engine::build(lines, config)?;
        engine.save_snapshot(snapshot_path)?;
        Ok(engine)
    }
}
