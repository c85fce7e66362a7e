//! Split raw text into words.

/// Characters separating words. Line breaks and tabs count as spaces.
pub const DELIMITERS: &[char] = &[' ', ',', '!', '|', '.', '\n', '\r', '\t'];

/// Split `text` on [`DELIMITERS`], dropping empty entries.
///
/// Words are kept verbatim: no case folding and no trimming of other
/// punctuation, so `farmer's` and `right-clicking` stay single words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(DELIMITERS)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
