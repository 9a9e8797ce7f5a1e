//! Construction of the element that wraps one matched slice

use super::delimiter::Delimiter;
use super::options::SplitTextOptions;
use super::MARKER_CLASS;
use crate::dom;
use markup5ever_rcdom::Handle;

/// Punctuation stripped from the edges of a word before it becomes a value class
const LATIN_PUNCTUATION: &str = "–—′’'“″„\"(«.…¡¿”)»!?";

fn is_latin_punctuation(c: char) -> bool {
    LATIN_PUNCTUATION.contains(c)
}

/// Builds wrappers for one traversal
#[derive(Debug)]
pub struct WrapperBuilder<'a> {
    options: &'a SplitTextOptions,
    tag: String,
}

impl<'a> WrapperBuilder<'a> {
    /// `tag` must already be validated.
    pub fn new(options: &'a SplitTextOptions, tag: String) -> Self {
        Self { options, tag }
    }

    /// Wrap a clone of the isolated text node `slice`.
    ///
    /// `index` is the sequential match counter. Returns `None` if `slice` is not a
    /// text node.
    pub fn build(&self, slice: &Handle, index: usize) -> Option<Handle> {
        let text = dom::text_of(slice)?;
        let options = self.options;

        let mut classes = MARKER_CLASS.to_string();
        let mut id = None;
        if let Some(custom) = options.custom_class() {
            classes.push(' ');
            classes.push_str(custom);
            if options.generate_index_id {
                id = Some(format!("{}-{}", custom, index));
            }
        }

        // Keeps spaces wrapped one by one from collapsing
        let style = (options.delimiter == Delimiter::All && text.chars().any(char::is_whitespace))
            .then_some("white-space: pre-line;");

        if options.generate_value_class {
            if let Some(value) = value_class(&options.delimiter, &text) {
                classes.push(' ');
                classes.push_str(&value);
            }
        }

        let mut attrs = vec![("class", classes.as_str())];
        if let Some(id) = id.as_deref() {
            attrs.push(("id", id));
        }
        if let Some(style) = style {
            attrs.push(("style", style));
        }
        if options.aria {
            attrs.push(("aria-hidden", "true"));
        }

        let wrapper = dom::create_element(&self.tag, attrs);
        dom::append_child(&wrapper, dom::clone_node(slice)?);
        Some(wrapper)
    }
}

/// Class derived from the wrapped text, for the character and word delimiters only.
///
/// Words lose punctuation adjoined to either edge ("word!" → "word") unless they
/// are nothing but punctuation ("!!!" stays "!!!").
///
/// The `char` and `letter` aliases parse to [`Delimiter::Character`], so they get
/// `character` value classes as well.
pub fn value_class(delimiter: &Delimiter, text: &str) -> Option<String> {
    let value = match delimiter {
        Delimiter::Character => text,
        Delimiter::Word if text.chars().all(is_latin_punctuation) => text,
        Delimiter::Word => text.trim_matches(is_latin_punctuation),
        _ => return None,
    };
    Some(format!(
        "{}-{}-{}",
        MARKER_CLASS,
        delimiter.name(),
        value.to_lowercase()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_node(text: &str) -> Handle {
        dom::create_text(text)
    }

    #[test]
    fn test_plain_wrapper() {
        let options = SplitTextOptions::default();
        let builder = WrapperBuilder::new(&options, "span".to_string());

        let wrapper = builder.build(&text_node("Hello"), 0).unwrap();

        assert_eq!(
            dom::outer_html(&wrapper).unwrap(),
            "<span class=\"splitted-text-element\" aria-hidden=\"true\">Hello</span>"
        );
    }

    #[test]
    fn test_custom_class_and_index_id() {
        let options = SplitTextOptions {
            custom_class: Some("word".to_string()),
            generate_index_id: true,
            aria: false,
            ..Default::default()
        };
        let builder = WrapperBuilder::new(&options, "em".to_string());

        let wrapper = builder.build(&text_node("Hi"), 7).unwrap();

        assert_eq!(
            dom::outer_html(&wrapper).unwrap(),
            "<em class=\"splitted-text-element word\" id=\"word-7\">Hi</em>"
        );
    }

    #[test]
    fn test_index_id_needs_custom_class() {
        let options = SplitTextOptions {
            generate_index_id: true,
            ..Default::default()
        };
        let builder = WrapperBuilder::new(&options, "span".to_string());

        let wrapper = builder.build(&text_node("Hi"), 0).unwrap();

        assert_eq!(dom::get_attribute(&wrapper, "id"), None);
    }

    #[test]
    fn test_all_delimiter_preserves_whitespace() {
        let options = SplitTextOptions {
            delimiter: Delimiter::All,
            ..Default::default()
        };
        let builder = WrapperBuilder::new(&options, "span".to_string());

        let space = builder.build(&text_node(" "), 0).unwrap();
        let letter = builder.build(&text_node("a"), 1).unwrap();

        assert_eq!(
            dom::get_attribute(&space, "style").as_deref(),
            Some("white-space: pre-line;")
        );
        assert_eq!(dom::get_attribute(&letter, "style"), None);
    }

    #[test]
    fn test_value_classes() {
        assert_eq!(
            value_class(&Delimiter::Word, "Word!").as_deref(),
            Some("splitted-text-element-word-word")
        );
        assert_eq!(
            value_class(&Delimiter::Word, "!!!").as_deref(),
            Some("splitted-text-element-word-!!!")
        );
        assert_eq!(
            value_class(&Delimiter::Word, "«Quoted»").as_deref(),
            Some("splitted-text-element-word-quoted")
        );
        assert_eq!(
            value_class(&Delimiter::Character, "A").as_deref(),
            Some("splitted-text-element-character-a")
        );
        assert_eq!(value_class(&Delimiter::Sentence, "Hi."), None);
        assert_eq!(value_class(&Delimiter::All, "a"), None);
    }

    #[test]
    fn test_character_aliases_share_value_classes() {
        for alias in ["char", "letter"] {
            let delimiter = Delimiter::from_name(alias);
            assert_eq!(
                value_class(&delimiter, "Q").as_deref(),
                Some("splitted-text-element-character-q")
            );
        }
    }

    #[test]
    fn test_wrapper_child_is_a_copy() {
        let options = SplitTextOptions::default();
        let builder = WrapperBuilder::new(&options, "span".to_string());
        let slice = text_node("copy");

        let wrapper = builder.build(&slice, 0).unwrap();
        dom::set_text(&slice, "changed");

        assert_eq!(dom::text_content(&wrapper), "copy");
    }

    #[test]
    fn test_non_text_slice_is_refused() {
        let options = SplitTextOptions::default();
        let builder = WrapperBuilder::new(&options, "span".to_string());
        let element = dom::create_element("b", vec![]);

        assert!(builder.build(&element, 0).is_none());
    }
}
