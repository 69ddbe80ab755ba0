use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;

const ROOT_WORDS: &[&str] = &[
    "abadi", "acara", "adil", "ajar", "akhir", "alam", "alir", "ambil", "aman", "ampun", "anak", "angkat", "anjing",
    "antar", "arah", "asal", "atur", "awal", "ayam", "bahasa", "baik", "baca", "badan", "bagi", "bakar", "balas",
    "bangun", "bantu", "banding", "bangsa", "barang", "batas", "bawa", "bayar", "beda", "bela", "beli", "benar",
    "bentuk", "berat", "beri", "bersih", "besar", "biasa", "bicara", "bikin", "bilang", "bina", "bom", "buah",
    "buat", "buka", "bukti", "buku", "bunga", "bunyi", "buruk", "cabut", "cakap", "campur", "cari", "catat",
    "cepat", "cerita", "cinta", "coba", "contoh", "cuci", "daging", "dapat", "darat", "datang", "dekat", "dengar",
    "didik", "diam", "duduk", "dukung", "emas", "empat", "gambar", "ganti", "gerak", "guna", "gunung", "hadap",
    "hadir", "hafal", "hancur", "harga", "hasil", "hemat", "hidup", "hilang", "hitung", "hormat", "hubung",
    "hujan", "hukum", "ikan", "ikat", "ikut", "ingat", "ingin", "isi", "izin", "jadi", "jaga", "jalan", "jamin",
    "janji", "jatuh", "jawab", "jelas", "jual", "kaji", "kali", "kata", "kebun", "kecil", "kejar", "kelola",
    "kembang", "kena", "kenal", "kerja", "kirim", "kota", "kuat", "kucing", "kumpul", "kunci", "kurang", "laku",
    "lalu", "lambat", "lancar", "langsung", "lapor", "lari", "latih", "layan", "lebar", "lepas", "lihat", "lindung",
    "lipat", "luas", "lupa", "main", "makan", "malu", "mandi", "masak", "masuk", "mati", "milik", "minta", "minum",
    "mohon", "mulai", "murid", "nama", "nanti", "nasi", "nikah", "nilai", "nyanyi", "nyata", "obat", "olah", "pakai",
    "paham", "panas", "pandang", "panjang", "pasang", "pegang", "pelihara", "pergi", "periksa", "perintah", "pesan",
    "pikir", "pilih", "pimpin", "pindah", "pinjam", "pukul", "pulang", "punya", "putus", "rasa", "rawat", "rencana",
    "rumah", "rusak", "sakit", "salah", "sama", "sampai", "sapu", "satu", "sayang", "sebut", "sedia", "sehat",
    "sekolah", "selamat", "selesai", "senang", "serah", "siap", "simpan", "sinar", "surat", "susun", "tahan",
    "tahu", "tambah", "tampil", "tanam", "tanda", "tangan", "tanggung", "tanya", "tari", "tarik", "tata", "temu",
    "tempat", "tentu", "terang", "terbang", "terima", "terus", "tetap", "tidur", "tiba", "tinggal", "tinggi",
    "tolong", "tonton", "tua", "tuju", "tukar", "tulis", "tumbuh", "tunggu", "tunjuk", "turun", "tutup", "ubah",
    "ujar", "uji", "ukur", "ulang", "umum", "undang", "untung", "urus", "usaha", "usul", "utama", "wajib", "warna",
];

/// Root words the Indonesian stemmer accepts as final stems.
#[derive(Debug, Clone, Default)]
pub struct RootDictionary {
    words: HashSet<String>,
}

impl RootDictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compact built-in list of common roots.
    pub fn builtin() -> Self {
        let mut dict = Self::empty();
        dict.extend(ROOT_WORDS.iter().copied());
        dict
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for w in words {
            let w = w.as_ref().trim().to_lowercase();
            if !w.is_empty() {
                self.words.insert(w);
            }
        }
    }

    /// Adds one root per line from a word list file.
    pub fn extend_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let text = std::fs::read_to_string(path)?;
        let before = self.words.len();
        self.extend(text.lines());
        Ok(self.words.len() - before)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
