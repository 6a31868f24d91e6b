//! Splits a pattern into words and renders word lists into the nine
//! canonical casing styles the engine matches and emits.
//!
//! Unlike a style *detector* (which would need to guess a single style for
//! an already-cased string), this only ever needs to go one direction: split
//! once, then render into every style so each can become a trie key.

/// One of the nine canonical casing projections of a word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rendering {
    Normal,
    Camel,
    Pascal,
    Lower,
    Upper,
    LowerSnake,
    UpperSnake,
    LowerKebab,
    UpperKebab,
}

/// All nine renderings, in the order variant tokens are installed.
pub const ALL_RENDERINGS: [Rendering; 9] = [
    Rendering::Normal,
    Rendering::Camel,
    Rendering::Pascal,
    Rendering::Lower,
    Rendering::Upper,
    Rendering::LowerSnake,
    Rendering::UpperSnake,
    Rendering::LowerKebab,
    Rendering::UpperKebab,
];

/// Splits `s` into words at spaces, hyphens, underscores (delimiter
/// discarded) and at every boundary where the current byte is ASCII
/// uppercase and the previous byte is not. That last rule also covers
/// digit→uppercase boundaries without introducing a generic letter↔digit
/// split: `oneTwo3Four` splits as `[one, Two3, Four]`, not
/// `[one, Two, 3, Four]`.
pub fn split_words(s: &[u8]) -> Vec<Vec<u8>> {
    let mut words = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for (i, &b) in s.iter().enumerate() {
        if b == b' ' || b == b'-' || b == b'_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if i > 0 && b.is_ascii_uppercase() && !s[i - 1].is_ascii_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(b);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &[u8]) -> Vec<u8> {
    let mut out = word.to_ascii_lowercase();
    if let Some(first) = out.first_mut() {
        *first = first.to_ascii_uppercase();
    }
    out
}

fn join(words: &[Vec<u8>], sep: Option<u8>, transform: impl Fn(&[u8]) -> Vec<u8>) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, w) in words.iter().enumerate() {
        if i > 0 {
            if let Some(sep) = sep {
                out.push(sep);
            }
        }
        out.extend(transform(w));
    }
    out
}

/// Renders `words` under `rendering`. An empty word list renders to the
/// empty string under every rendering.
pub fn render(words: &[Vec<u8>], rendering: Rendering) -> Vec<u8> {
    match rendering {
        Rendering::Normal => join(words, Some(b' '), |w| w.to_vec()),
        Rendering::Camel => {
            let mut out = Vec::new();
            for (i, w) in words.iter().enumerate() {
                if i == 0 {
                    out.extend(w.to_ascii_lowercase());
                } else {
                    out.extend(capitalize(w));
                }
            }
            out
        },
        Rendering::Pascal => join(words, None, |w| capitalize(w)),
        Rendering::Lower => join(words, None, |w| w.to_ascii_lowercase()),
        Rendering::Upper => join(words, None, |w| w.to_ascii_uppercase()),
        Rendering::LowerSnake => join(words, Some(b'_'), |w| w.to_ascii_lowercase()),
        Rendering::UpperSnake => join(words, Some(b'_'), |w| w.to_ascii_uppercase()),
        Rendering::LowerKebab => join(words, Some(b'-'), |w| w.to_ascii_lowercase()),
        Rendering::UpperKebab => join(words, Some(b'-'), |w| w.to_ascii_uppercase()),
    }
}
