use std::collections::HashMap;

/// Characters the corpus normalization can produce, and therefore the only
/// characters worth inserting or substituting into a query.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz ";

/// Expand `query` into every string reachable by at most one single-character
/// edit, mapped to the minimal edit cost that produces it. The query itself is
/// always present at cost 0; duplicates collapse to the minimum cost.
pub fn generate(query: &str) -> HashMap<String, u8> {
    let chars: Vec<char> = query.chars().collect();
    let n = chars.len();

    let mut variants = HashMap::new();
    variants.insert(query.to_owned(), 0);

    // Deletions: one per position.
    for i in 0..n {
        let text: String = chars[..i].iter().chain(&chars[i + 1..]).collect();
        variants.entry(text).or_insert(1);
    }

    // Insertions: every gap, including end-of-string.
    for i in 0..=n {
        for c in ALPHABET.chars() {
            let mut text = String::with_capacity(n + 1);
            text.extend(&chars[..i]);
            text.push(c);
            text.extend(&chars[i..]);
            variants.entry(text).or_insert(1);
        }
    }

    // Replacements: only characters that differ from the one in place.
    for i in 0..n {
        for c in ALPHABET.chars() {
            if c == chars[i] {
                continue;
            }
            let mut text = String::with_capacity(n);
            text.extend(&chars[..i]);
            text.push(c);
            text.extend(&chars[i + 1..]);
            variants.entry(text).or_insert(1);
        }
    }

    variants
}
