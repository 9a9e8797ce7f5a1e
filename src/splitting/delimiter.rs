//! Delimiter selectors and the patterns they compile to
//!
//! Every selector becomes one [`DelimiterPattern`]. Applying it to a text span yields
//! either nothing or a [`DelimiterMatch`]: the full matched span plus, optionally, a
//! narrower submatch (capture group 1) naming the slice that actually gets wrapped.
//! The full match may carry surrounding context (the word pattern absorbs the
//! spaces around a word, for instance) that the submatch trims away.
//!
//! | Selector                   | Unit                                            |
//! |----------------------------|-------------------------------------------------|
//! | `all`                      | every character except line feeds               |
//! | `character`/`char`/`letter`| every non-space character                       |
//! | `word`                     | runs of non-space characters                    |
//! | `sentence`                 | text up to sentence-final punctuation or the end|
//! | `element`                  | everything between the first and last non-space |
//! | custom                     | a caller supplied [`Regex`]                     |
//!
//! The `regex` crate has no lookaround, so the sentence and element patterns are
//! written in lookaround-free form. The one piece that needs a lookahead (a sentence
//! running to the end of the text stops before trailing whitespace) is applied by
//! trimming the submatch instead.

use crate::error::SplitError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static ALL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.)").unwrap());

static CHARACTER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S)").unwrap());

/// Adjoined punctuation stays inside the run: "Hey!" is a single word.
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*(\S+)\s*").unwrap());

/// Expanded:
///
/// ```text
/// (
///   (?: \.{2,}[^!?]+?        leading ellipsis belongs to the sentence
///     | [^!?\s][^!?]*? )     otherwise start at a non-space, non-terminator
///   (?: [.…!?]+ | $ )        sentence-final punctuation or end of text
///   (?: \s*[′’'”″“")»]+ )*   closing quotes and parentheses
/// )
/// ```
///
/// `!` and `?` always terminate; line breaks never do.
static SENTENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"((?:\.{2,}[^!?]+?|[^!?\s][^!?]*?)",
        r"(?:[.…!?]+|$)",
        r#"(?:\s*[′’'”″“")»]+)*)"#,
    ))
    .unwrap()
});

static ELEMENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(\S(?:.*\S)?)").unwrap());

/// How text is cut into units
#[derive(Debug, Clone, Default)]
pub enum Delimiter {
    All,
    Character,
    #[default]
    Word,
    Sentence,
    Element,
    Custom(Regex),
}

impl Delimiter {
    /// Lenient selector lookup.
    ///
    /// Unknown names are logged and replaced by [`Delimiter::Word`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                delimiter = %name,
                "Unrecognized delimiter, empty search string, or invalid custom regex. Defaulting to word regex."
            );
            Delimiter::Word
        })
    }

    /// Compile a caller-supplied pattern.
    ///
    /// Empty and malformed patterns are logged and replaced by [`Delimiter::Word`].
    pub fn custom(pattern: &str) -> Self {
        if pattern.is_empty() {
            tracing::warn!("Empty custom delimiter pattern. Defaulting to word regex.");
            return Delimiter::Word;
        }
        match Regex::new(pattern) {
            Ok(regex) => Delimiter::Custom(regex),
            Err(e) => {
                tracing::warn!(
                    pattern = %pattern,
                    error = %e,
                    "Invalid custom delimiter regex. Defaulting to word regex."
                );
                Delimiter::Word
            }
        }
    }

    /// Canonical lowercase name, as used in value classes
    pub fn name(&self) -> &'static str {
        match self {
            Delimiter::All => "all",
            Delimiter::Character => "character",
            Delimiter::Word => "word",
            Delimiter::Sentence => "sentence",
            Delimiter::Element => "element",
            Delimiter::Custom(_) => "custom",
        }
    }
}

impl PartialEq for Delimiter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Delimiter::Custom(a), Delimiter::Custom(b)) => a.as_str() == b.as_str(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl FromStr for Delimiter {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Delimiter::All),
            "character" | "char" | "letter" => Ok(Delimiter::Character),
            "word" => Ok(Delimiter::Word),
            "sentence" => Ok(Delimiter::Sentence),
            "element" => Ok(Delimiter::Element),
            _ => Err(SplitError::UnknownDelimiter(s.to_string())),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Custom(regex) => write!(f, "/{}/", regex.as_str()),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// One application of a pattern to a text span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterMatch<'t> {
    /// Byte offset of the full match
    pub start: usize,
    /// The full matched text
    pub text: &'t str,
    /// Narrower slice to wrap, when the pattern reports one
    pub submatch: Option<&'t str>,
}

/// A compiled delimiter, built once per traversal
#[derive(Debug, Clone)]
pub struct DelimiterPattern {
    regex: Regex,
    trim_trailing_space: bool,
}

impl DelimiterPattern {
    pub fn new(delimiter: &Delimiter) -> Self {
        let regex = match delimiter {
            Delimiter::All => ALL_REGEX.clone(),
            Delimiter::Character => CHARACTER_REGEX.clone(),
            Delimiter::Word => WORD_REGEX.clone(),
            Delimiter::Sentence => SENTENCE_REGEX.clone(),
            Delimiter::Element => ELEMENT_REGEX.clone(),
            Delimiter::Custom(regex) => regex.clone(),
        };
        Self {
            regex,
            trim_trailing_space: matches!(delimiter, Delimiter::Sentence),
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// First match in `text`.
    ///
    /// The submatch is capture group 1 when it participated and is non-empty.
    pub fn find<'t>(&self, text: &'t str) -> Option<DelimiterMatch<'t>> {
        let caps = self.regex.captures(text)?;
        let full = caps.get(0)?;
        let submatch = caps
            .get(1)
            .map(|m| m.as_str())
            .map(|s| {
                if self.trim_trailing_space && full.end() == text.len() {
                    s.trim_end()
                } else {
                    s
                }
            })
            .filter(|s| !s.is_empty());

        Some(DelimiterMatch {
            start: full.start(),
            text: full.as_str(),
            submatch,
        })
    }
}
