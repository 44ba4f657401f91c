use std::sync::LazyLock;

use regex::Regex;

// ASCII punctuation: !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[[:punct:]]").expect("punctuation class is a valid regex"));

/// Replaces every punctuation character with a space and lowercases the
/// result. Splitting the returned string on whitespace yields the tokens.
pub fn normalize(text: &str) -> String {
    PUNCTUATION.replace_all(text, " ").to_lowercase()
}

/// Splits raw text into normalized tokens.
///
/// The same normalization is used when building the vocabulary, when
/// vectorizing documents and when parsing queries, so a word always maps
/// to the same vocabulary entry.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
