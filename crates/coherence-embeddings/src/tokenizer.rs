//! Lowercasing, Unicode-aware word splitter with stop-word removal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use coherence_core::config::defaults::DEFAULT_MIN_TOKEN_CHARS;

/// Articles, conjunctions, prepositions and pronouns. Artifacts are mostly
/// Spanish with some English mixed in, so both lists are covered.
const STOP_WORDS: &[&str] = &[
    // Spanish
    "los", "las", "una", "unos", "unas", "del", "que", "por", "para", "con", "sin", "sobre",
    "entre", "hasta", "desde", "hacia", "como", "pero", "porque", "cuando", "donde", "este",
    "esta", "estos", "estas", "ese", "esa", "esos", "esas", "aquel", "aquella", "sus", "nos",
    "les", "mas", "más", "muy", "también", "tambien", "cual", "cuales", "quien", "ser", "son",
    "fue", "era", "hay", "está", "están", "estan", "sea", "otro", "otra", "otros",
    "otras", "todo", "toda", "todos", "todas", "cada", "según", "segun", "mediante", "durante",
    "ante", "bajo", "tras", "contra", "nuestro", "nuestra", "vuestro", "ellos", "ellas",
    "usted", "ustedes", "mismo", "misma", "aún", "aun",
    // English
    "the", "and", "for", "are", "but", "not", "with", "this", "that", "from", "into", "have",
    "has", "was", "were", "will", "its", "they", "their", "which", "what", "each",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Combining marks that survive composition stay inside their word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c)
}

/// Splits text into lowercase terms.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_chars: usize,
}

impl Tokenizer {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Tokenize `text`. Never fails; degenerate input yields an empty vec.
    ///
    /// Input is NFC-composed first, so decomposed and precomposed spellings
    /// of the same word produce the same token.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let composed: String = text.nfc().collect();
        composed
            .split(|c: char| !is_word_char(c))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .filter(|w| w.chars().count() >= self.min_chars && !is_stop_word(w))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_CHARS)
    }
}
