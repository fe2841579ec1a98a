//! Text Normalizer: raw extracted document text → comparable token stream.
//!
//! lowercase → tokenize → keep purely alphanumeric tokens → drop English stopwords
//! → re-join with single spaces. No stemming.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Standard English stopword list (the NLTK corpus list).
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once", "here", "there", "when", "where", "why", "how",
        "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
        "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re",
        "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn",
        "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma",
        "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
        "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
        "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Punctuation that always stands alone, wherever it appears in a word.
const SEPARATORS: &[char] = &[
    ';', '@', '#', '$', '%', '&', '?', '!', '(', ')', '[', ']', '{', '}', '<', '>', '"', '`',
    '|', '=', '~', '^', '*',
];

/// Text that has been through [`normalize`]. Only constructible by normalizing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Surviving tokens in original order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split(' ').filter(|t| !t.is_empty())
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes raw document text. Never fails; empty input yields empty output.
pub fn normalize(raw: &str) -> NormalizedText {
    let lowered = raw.to_lowercase();
    let kept: Vec<&str> = tokenize(&lowered)
        .into_iter()
        .filter(|t| t.chars().all(char::is_alphanumeric))
        .filter(|t| !STOP_WORDS.contains(*t))
        .collect();
    NormalizedText(kept.join(" "))
}

/// Word-boundary tokenizer. Punctuation comes out as separate tokens:
/// separator characters anywhere, and any non-alphanumeric character at either
/// edge of a word. Inner joiners (`e-mail`, `3.5`, `node.js`) keep the word whole.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        let mut start = 0;
        for (i, c) in chunk.char_indices() {
            if is_separator(c, chunk[i + c.len_utf8()..].chars().next()) {
                push_piece(&chunk[start..i], &mut tokens);
                let end = i + c.len_utf8();
                tokens.push(&chunk[i..end]);
                start = end;
            }
        }
        push_piece(&chunk[start..], &mut tokens);
    }
    tokens
}

/// `,` and `:` split unless they sit in front of a digit (`1,000`, `10:30`).
fn is_separator(c: char, next: Option<char>) -> bool {
    match c {
        ',' | ':' => !next.is_some_and(|n| n.is_ascii_digit()),
        _ => SEPARATORS.contains(&c),
    }
}

fn push_piece<'a>(piece: &'a str, tokens: &mut Vec<&'a str>) {
    if piece.is_empty() {
        return;
    }

    let core_start = piece.find(char::is_alphanumeric);
    let Some(core_start) = core_start else {
        // No word inside: every character is punctuation.
        push_chars(piece, tokens);
        return;
    };
    let core_end = piece
        .char_indices()
        .filter(|(_, c)| c.is_alphanumeric())
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(piece.len());

    push_chars(&piece[..core_start], tokens);
    tokens.push(&piece[core_start..core_end]);
    push_chars(&piece[core_end..], tokens);
}

fn push_chars<'a>(s: &'a str, tokens: &mut Vec<&'a str>) {
    for (i, c) in s.char_indices() {
        tokens.push(&s[i..i + c.len_utf8()]);
    }
}
