//! Confix-stripping stemmer for Indonesian.
//!
//! A word is reduced by removing inflectional suffixes, then derivational
//! suffixes, then up to three derivational prefixes, checking the root
//! dictionary after every step. Prefixes with nasal assimilation (`meN-`,
//! `peN-`) are tried with each possible recoding of the root's first letter.
//! A word that never reaches a dictionary root is returned unchanged.

use super::{RootDictionary, Stem};

const PARTICLES: &[&str] = &["lah", "kah", "tah", "pun"];
const POSSESSIVES: &[&str] = &["nya", "ku", "mu"];
const DERIVATIONAL: &[&str] = &["kan", "an", "i"];
const MAX_PREFIXES: usize = 3;

pub struct IndonesianStemmer {
    dictionary: RootDictionary,
}

impl IndonesianStemmer {
    pub fn new(dictionary: RootDictionary) -> Self {
        Self { dictionary }
    }

    pub fn with_builtin_dictionary() -> Self {
        Self::new(RootDictionary::builtin())
    }

    fn is_root(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    fn stem_word(&self, word: &str) -> Option<String> {
        if self.is_root(word) {
            return Some(word.to_string());
        }
        if removes_prefix_first(word) {
            let found = self.strip_prefixes(word, 0, &|w| self.strip_suffixes(w));
            if found.is_some() {
                return found;
            }
        }
        self.strip_suffixes_then_prefixes(word)
    }

    /// Removes particle, possessive and derivational suffixes in turn.
    fn strip_suffixes(&self, word: &str) -> Option<String> {
        if self.is_root(word) {
            return Some(word.to_string());
        }
        let mut current = word;
        for group in [PARTICLES, POSSESSIVES, DERIVATIONAL] {
            if let Some((base, _)) = strip_suffix(current, group) {
                if self.is_root(base) {
                    return Some(base.to_string());
                }
                current = base;
            }
        }
        None
    }

    fn strip_suffixes_then_prefixes(&self, word: &str) -> Option<String> {
        let root_only = |w: &str| self.is_root(w).then(|| w.to_string());

        // stages[i] is the word after i suffix removals
        let mut stages = vec![word];
        let mut derivational = None;
        for (step, group) in [PARTICLES, POSSESSIVES, DERIVATIONAL].into_iter().enumerate() {
            let current = stages[stages.len() - 1];
            if let Some((base, suffix)) = strip_suffix(current, group) {
                if self.is_root(base) {
                    return Some(base.to_string());
                }
                stages.push(base);
                if step == 2 {
                    derivational = Some(suffix);
                }
            }
        }

        let stripped = stages[stages.len() - 1];
        if let Some(root) = self.strip_prefixes(stripped, 0, &root_only) {
            return Some(root);
        }

        // `-kan` may really be a root ending in `k` followed by `-an`.
        if derivational == Some("kan") {
            let with_k = format!("{stripped}k");
            if let Some(root) = root_only(&with_k).or_else(|| self.strip_prefixes(&with_k, 0, &root_only)) {
                return Some(root);
            }
        }

        // Put suffixes back one at a time and retry the prefixes.
        for stage in stages.iter().rev().skip(1) {
            if let Some(root) = self.strip_prefixes(stage, 0, &root_only) {
                return Some(root);
            }
        }
        None
    }

    /// Depth-first search over prefix removals; `accept` decides whether a
    /// candidate (or something derived from it) is a root.
    fn strip_prefixes(&self, word: &str, depth: usize, accept: &dyn Fn(&str) -> Option<String>) -> Option<String> {
        if depth == MAX_PREFIXES {
            return None;
        }
        for candidate in prefix_candidates(word) {
            if let Some(root) = accept(&candidate) {
                return Some(root);
            }
            if let Some(root) = self.strip_prefixes(&candidate, depth + 1, accept) {
                return Some(root);
            }
        }
        None
    }
}

impl Stem for IndonesianStemmer {
    fn stem(&self, token: &str) -> String {
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
            return token.to_string();
        }
        // Reduplicated plurals: buku-buku, sayur-mayur. The tokenizer splits on
        // `-`, so only direct callers with hyphenated words reach this.
        if let Some((left, right)) = token.split_once('-') {
            let left_root = self.stem_word(left).unwrap_or_else(|| left.to_string());
            let right_root = self.stem_word(right).unwrap_or_else(|| right.to_string());
            if left_root == right_root {
                return left_root;
            }
            return token.to_string();
        }
        self.stem_word(token).unwrap_or_else(|| token.to_string())
    }
}

/// `be-...-lah`, `be-...-an` and `me|di|pe|ter-...-i` strip the prefix first.
fn removes_prefix_first(word: &str) -> bool {
    let be = word.starts_with("be") && (word.ends_with("lah") || word.ends_with("an"));
    let i = ["me", "di", "pe", "ter"].iter().any(|p| word.starts_with(p)) && word.ends_with('i');
    be || i
}

/// Longest suffix of `group` leaving a non-empty base.
fn strip_suffix<'a>(word: &'a str, group: &[&'static str]) -> Option<(&'a str, &'static str)> {
    group
        .iter()
        .filter(|s| word.len() > s.len() + 1 && word.ends_with(*s))
        .max_by_key(|s| s.len())
        .map(|s| (&word[..word.len() - s.len()], *s))
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Every way of removing one derivational prefix from `word`, most likely first.
fn prefix_candidates(word: &str) -> Vec<String> {
    let b = word.as_bytes();
    let at = |i: usize| b.get(i).copied().unwrap_or(0);
    let rest = |i: usize| word.get(i..).unwrap_or("").to_string();
    let recode = |c: &str, i: usize| format!("{c}{}", rest(i));
    let mut out: Vec<String> = Vec::new();

    if word.len() < 4 {
        return out;
    }

    if word.starts_with("di") || word.starts_with("ke") || word.starts_with("se") {
        out.push(rest(2));
    }

    if word.starts_with("ber") {
        out.push(rest(3));
        if is_vowel(at(3)) {
            out.push(recode("r", 3));
        }
    } else if word.starts_with("belajar") {
        out.push(rest(3));
    } else if word.starts_with("be") && !is_vowel(at(2)) && word.get(3..5) == Some("er") {
        out.push(rest(2));
    }

    if word.starts_with("ter") {
        out.push(rest(3));
        if is_vowel(at(3)) {
            out.push(recode("r", 3));
        }
    } else if word.starts_with("te") && !is_vowel(at(2)) && word.get(3..5) == Some("er") {
        out.push(rest(2));
    }

    if word.starts_with("me") {
        nasal_candidates(word, 2, &mut out);
    }

    if word.starts_with("pe") {
        if word.starts_with("per") {
            out.push(rest(3));
            if is_vowel(at(3)) {
                out.push(recode("r", 3));
            }
        }
        if word.starts_with("pelajar") {
            out.push(rest(3));
        }
        nasal_candidates(word, 2, &mut out);
    }

    out.retain(|c| c.len() >= 2);
    out.dedup();
    out
}

/// `meN-` / `peN-`: `p` is the length of `me` / `pe`.
fn nasal_candidates(word: &str, p: usize, out: &mut Vec<String>) {
    let b = word.as_bytes();
    let at = |i: usize| b.get(i).copied().unwrap_or(0);
    let rest = |i: usize| word.get(i..).unwrap_or("").to_string();
    let recode = |c: &str, i: usize| format!("{c}{}", rest(i));

    match (at(p), at(p + 1)) {
        (b'l' | b'r' | b'w' | b'y', _) => out.push(rest(p)),
        (b'm', b'b' | b'f' | b'v' | b'p') => out.push(rest(p + 1)),
        (b'm', c) if is_vowel(c) || c == b'r' => {
            out.push(recode("m", p + 1));
            out.push(recode("p", p + 1));
        }
        (b'n', b'c' | b'd' | b'j' | b'z' | b's' | b't') => out.push(rest(p + 1)),
        (b'n', b'y') => {
            out.push(recode("s", p + 2));
            out.push(rest(p));
        }
        (b'n', b'g') => {
            let after = at(p + 2);
            if matches!(after, b'g' | b'h' | b'q' | b'k') {
                out.push(rest(p + 2));
            } else if after == b'e' && !is_vowel(at(p + 3)) {
                // menge-/penge- before a monosyllabic root: mengebom
                out.push(rest(p + 3));
                out.push(rest(p + 2));
            } else if is_vowel(after) {
                out.push(rest(p + 2));
                out.push(recode("k", p + 2));
            }
        }
        (b'n', c) if is_vowel(c) => {
            out.push(recode("n", p + 1));
            out.push(recode("t", p + 1));
        }
        (c, _) if c != 0 && !is_vowel(c) => out.push(rest(p)),
        _ => {}
    }
}
