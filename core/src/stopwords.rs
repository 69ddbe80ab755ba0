use crate::error::Result;
use crate::tokenizer::case_fold;
use std::collections::HashSet;
use std::path::Path;

const INDONESIAN: &[&str] = &[
    "ada","adalah","adanya","agar","akan","akhirnya","aku","amat","anda","antara","apa","apabila","apakah","atas","atau",
    "bagai","bagaimana","bagi","bahkan","bahwa","banyak","baru","begitu","belum","berapa","berbagai","bisa","bukan","bukankah",
    "cukup","dalam","dan","dapat","dari","daripada","demikian","dengan","di","dia","dirinya","doeloe","dong",
    "hal","hampir","hanya","harus","hingga","ia","ialah","ini","itu",
    "jadi","jangan","jika","juga","kalau","kami","kamu","kan","karena","ke","kemudian","kenapa","kepada","ketika","kita",
    "lagi","lah","lain","lalu","lebih","maka","masih","masing","mau","melainkan","mereka","meski","mungkin",
    "namun","nya","oleh","pada","para","paling","pernah","pula","pun",
    "saat","saja","sampai","sangat","saya","se","sebagai","sebelum","sedang","sehingga","sejak","selain","seluruh","semua",
    "sendiri","seperti","serta","sesudah","setelah","setiap","siapa","sudah","supaya",
    "tapi","telah","tentang","terhadap","tersebut","tetapi","tidak","untuk","walau","yaitu","yakni","yang",
];

/// Case-folded words removed from the token stream before stemming.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| case_fold(w.as_ref().trim()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Built-in list of common Indonesian function words.
    pub fn indonesian() -> Self {
        Self::from_words(INDONESIAN)
    }

    /// Header-less CSV: the first column of every non-empty row is a stopword.
    pub fn from_csv_str(csv: &str) -> Self {
        Self::from_words(csv.lines().filter_map(first_column))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let csv = std::fs::read_to_string(path)?;
        Ok(Self::from_csv_str(&csv))
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn first_column(line: &str) -> Option<&str> {
    let field = line.split(',').next()?.trim().trim_matches('"').trim();
    (!field.is_empty()).then_some(field)
}
