//! Placeholder encoding for punctuation that must not end a sentence
//!
//! A placeholder wraps a character's decimal code in double braces:
//!
//! | Character | Placeholder |
//! |-----------|-------------|
//! | `.`       | `{{46}}`    |
//! | `!`       | `{{33}}`    |
//! | `?`       | `{{63}}`    |
//!
//! The sentence delimiter encodes periods that are unlikely to end a sentence (common
//! abbreviations and periods between two letters) before matching, then decodes each
//! matched sentence. Every other delimiter decodes up front, so callers can write
//! placeholders themselves to keep specific punctuation from splitting sentences
//! without it leaking into word or character output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const PERIOD_PLACEHOLDER: &str = "{{46}}";

/// e.g., i.e., Mr., Mrs., Ms., Dr., Prof., Esq., Sr. and Jr., case-insensitively,
/// when not glued to a preceding letter.
static ABBREVIATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(^|[^A-Za-z\x{C0}-\x{27F}])(e\.g\.|i\.e\.|mr\.|mrs\.|ms\.|dr\.|prof\.|esq\.|sr\.|jr\.)",
    )
    .unwrap()
});

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\d{1,3})\}\}").unwrap());

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{C0}'..='\u{27F}').contains(&c)
}

/// Replace likely false-positive sentence terminators with placeholders
pub fn encode_punctuation(text: &str) -> String {
    let escaped = ABBREVIATION_REGEX.replace_all(text, |caps: &Captures| {
        format!("{}{}", &caps[1], caps[2].replace('.', PERIOD_PLACEHOLDER))
    });
    escape_inner_word_periods(&escaped)
}

fn escape_inner_word_periods(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        let flanked = c == '.'
            && i > 0
            && is_latin_letter(chars[i - 1])
            && chars.get(i + 1).copied().is_some_and(is_latin_letter);
        if flanked {
            out.push_str(PERIOD_PLACEHOLDER);
        } else {
            out.push(c);
        }
    }
    out
}

/// Turn every `{{NNN}}` placeholder back into its character
pub fn decode_punctuation(text: &str) -> String {
    PLACEHOLDER_REGEX
        .replace_all(text, |caps: &Captures| {
            caps[1]
                .parse::<u32>()
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_titles() {
        assert_eq!(
            encode_punctuation("Dr. Smith left."),
            "Dr{{46}} Smith left."
        );
        assert_eq!(
            encode_punctuation("Ask mrs. Jones or PROF. Li"),
            "Ask mrs{{46}} Jones or PROF{{46}} Li"
        );
    }

    #[test]
    fn test_encode_latin_abbreviations() {
        assert_eq!(
            encode_punctuation("Fruit, e.g. apples, i.e. food."),
            "Fruit, e{{46}}g{{46}} apples, i{{46}}e{{46}} food."
        );
    }

    #[test]
    fn test_abbreviation_must_start_a_word() {
        assert_eq!(encode_punctuation("Go to Madr. now"), "Go to Madr. now");
    }

    #[test]
    fn test_encode_inner_word_periods() {
        assert_eq!(
            encode_punctuation("Visit www.example.com today."),
            "Visit www{{46}}example{{46}}com today."
        );
        assert_eq!(encode_punctuation("Version 2.0 ships."), "Version 2.0 ships.");
        assert_eq!(encode_punctuation("End. Start"), "End. Start");
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_punctuation("a{{46}}b{{33}}{{63}}"), "a.b!?");
        assert_eq!(decode_punctuation("{{x}} and {{1000}}"), "{{x}} and {{1000}}");
        assert_eq!(decode_punctuation("no placeholders"), "no placeholders");
    }

    #[test]
    fn test_decode_reverses_encode() {
        let text = "Mr. Brown met Dr. Who at 3.30 on www.site.org. Fine!";
        assert_eq!(decode_punctuation(&encode_punctuation(text)), text);
    }
}
