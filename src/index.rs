use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::store::{SentenceId, SentenceStore};

static EMPTY_IDS: BTreeSet<SentenceId> = BTreeSet::new();

/// Maps every contiguous substring of every stored sentence to the set of
/// sentences containing it. O(L²) entries per sentence buys O(1) containment
/// checks at query time, so the index is built once and reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstringIndex {
    entries: HashMap<String, BTreeSet<SentenceId>>,
    /// Cap on indexed substring length. `None` indexes every substring.
    /// A cap changes which long queries can still match, so it is stored in
    /// the index (and its snapshots) rather than assumed at query time.
    max_substring_len: Option<usize>,
}

impl SubstringIndex {
    /// Pure function of the store's contents: deterministic for a given store
    /// and cap. Substring enumeration is fanned out per sentence with rayon
    /// since this is the one expensive, one-shot operation.
    pub fn build(store: &SentenceStore, max_substring_len: Option<usize>) -> Self {
        let entries = store
            .all()
            .par_iter()
            .map(|s| sentence_substrings(s.id, &s.text, max_substring_len))
            .reduce(HashMap::new, merge_entries);
        SubstringIndex {
            entries,
            max_substring_len,
        }
    }

    /// Absent substrings yield an empty set, never an error.
    pub fn lookup(&self, substring: &str) -> &BTreeSet<SentenceId> {
        self.entries.get(substring).unwrap_or(&EMPTY_IDS)
    }

    pub fn contains(&self, substring: &str) -> bool {
        self.entries.contains_key(substring)
    }

    /// Number of distinct indexed substrings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_substring_len(&self) -> Option<usize> {
        self.max_substring_len
    }

    /// Largest sentence id referenced by any entry, if there is one. Ids are
    /// assigned densely from 0, so this bounds every id in the index.
    pub fn max_sentence_id(&self) -> Option<SentenceId> {
        self.entries
            .values()
            .filter_map(|ids| ids.last().copied())
            .max()
    }
}

fn sentence_substrings(
    id: SentenceId,
    text: &str,
    cap: Option<usize>,
) -> HashMap<String, BTreeSet<SentenceId>> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let mut out = HashMap::new();
    for start in 0..n {
        let max_end = cap.map_or(n, |c| (start + c).min(n));
        let mut sub = String::new();
        for &c in &chars[start..max_end] {
            sub.push(c);
            out.entry(sub.clone())
                .or_insert_with(BTreeSet::new)
                .insert(id);
        }
    }
    out
}

fn merge_entries(
    mut acc: HashMap<String, BTreeSet<SentenceId>>,
    other: HashMap<String, BTreeSet<SentenceId>>,
) -> HashMap<String, BTreeSet<SentenceId>> {
    for (substring, ids) in other {
        acc.entry(substring).or_default().extend(ids);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(texts: &[&str]) -> SentenceStore {
        let mut store = SentenceStore::new();
        for (i, text) in texts.iter().enumerate() {
            store.add(text, "test.txt", (i + 1) as u32, 1.0).unwrap();
        }
        store
    }

    #[test]
    fn test_every_substring_indexed() {
        let store = store_of(&["abc"]);
        let index = SubstringIndex::build(&store, None);
        for sub in ["a", "b", "c", "ab", "bc", "abc"] {
            assert!(index.lookup(sub).contains(&0), "missing substring {}", sub);
        }
        assert_eq!(index.len(), 6);
    }

    #[test]
    fn test_lookup_miss_is_empty_set() {
        let store = store_of(&["abc"]);
        let index = SubstringIndex::build(&store, None);
        assert!(index.lookup("xyz").is_empty());
        assert!(index.lookup("").is_empty());
    }

    #[test]
    fn test_shared_substring_maps_to_all_sentences() {
        let store = store_of(&["apple pie", "apple pancakes"]);
        let index = SubstringIndex::build(&store, None);
        let ids: Vec<_> = index.lookup("apple p").iter().copied().collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(index.lookup("pie").iter().copied().collect::<Vec<_>>(), [0]);
        assert_eq!(
            index.lookup("cakes").iter().copied().collect::<Vec<_>>(),
            [1]
        );
    }

    #[test]
    fn test_substring_length_cap() {
        let store = store_of(&["abcd"]);
        let index = SubstringIndex::build(&store, Some(2));
        assert!(index.contains("ab"));
        assert!(index.contains("cd"));
        assert!(!index.contains("abc"));
        assert!(!index.contains("abcd"));
        assert_eq!(index.max_substring_len(), Some(2));
    }

    #[test]
    fn test_max_sentence_id() {
        let store = store_of(&["apple pie", "apple pancakes"]);
        let index = SubstringIndex::build(&store, None);
        assert_eq!(index.max_sentence_id(), Some(1));

        let empty = SubstringIndex::build(&SentenceStore::new(), None);
        assert_eq!(empty.max_sentence_id(), None);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_lookups() {
        let store = store_of(&["apple pie is delicious", "apple pancakes are the best"]);
        let index = SubstringIndex::build(&store, None);
        let json = serde_json::to_string(&index).unwrap();
        let restored: SubstringIndex = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), index.len());
        assert_eq!(restored.max_substring_len(), index.max_substring_len());
        for sentence in store.all() {
            let chars: Vec<char> = sentence.text.chars().collect();
            for start in 0..chars.len() {
                for end in start + 1..=chars.len() {
                    let sub: String = chars[start..end].iter().collect();
                    assert_eq!(restored.lookup(&sub), index.lookup(&sub));
                }
            }
        }
    }
}
