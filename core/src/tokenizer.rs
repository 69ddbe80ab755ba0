use crate::stopwords::StopwordSet;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Letters, digits and underscore. Combining marks split words, so NFD
    // input such as `cafe\u{301}` yields `cafe`.
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{N}_]+").expect("valid regex");
}

pub fn case_fold(text: &str) -> String {
    text.to_lowercase()
}

/// Split text into maximal runs of word characters. Order and duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

pub fn filter_stopwords(tokens: Vec<String>, stopwords: &StopwordSet) -> Vec<String> {
    tokens.into_iter().filter(|t| !stopwords.contains(t)).collect()
}

/// Case-fold, tokenize and drop stopwords, in that order.
pub fn normalize(text: &str, stopwords: &StopwordSet) -> Vec<String> {
    filter_stopwords(tokenize(&case_fold(text)), stopwords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_never_becomes_a_token() {
        let t = tokenize("kucing, makan... ikan! (segar) snake_case 42");
        assert_eq!(t, vec!["kucing", "makan", "ikan", "segar", "snake_case", "42"]);
    }

    #[test]
    fn duplicates_and_order_are_kept() {
        let t = normalize("Ikan ikan IKAN dan nasi", &StopwordSet::from_words(["dan"]));
        assert_eq!(t, vec!["ikan", "ikan", "ikan", "nasi"]);
    }

    #[test]
    fn unicode_letters_are_word_characters() {
        let t = normalize("Café Ünïcode", &StopwordSet::empty());
        assert_eq!(t, vec!["café", "ünïcode"]);
    }

    #[test]
    fn combining_marks_end_a_word() {
        let t = tokenize("cafe\u{301} ok");
        assert_eq!(t, vec!["cafe", "ok"]);
    }
}
