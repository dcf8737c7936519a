//! Text with markup. Rules see only the plain text, matches are mapped back to the original text.

use serde::{Deserialize, Serialize};

/// Maps char positions in a plain text view back to char positions in the original text
/// the plain text was derived from (e. g. by removing markup).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotatedText {
    plain_text: String,
    plain_len: usize,
    original_len: usize,
    /// `(plain position, original position)` at the start of each text part, ordered by both.
    mapping: Vec<(usize, usize)>,
}

impl AnnotatedText {
    /// Creates an annotated text without markup. Positions map onto themselves.
    pub fn plain<S: Into<String>>(text: S) -> Self {
        AnnotatedTextBuilder::new().add_text(text).build()
    }

    /// The text as seen by the rules.
    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    /// Length of the original text in chars.
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Maps a char position in the plain text to the corresponding position in the original text.
    /// Positions at or after the end of the plain text map to the end of the original text.
    pub fn map_position(&self, plain_position: usize) -> usize {
        if plain_position >= self.plain_len {
            return self.original_len;
        }

        // the last part starting at or before the position; parts without plain text
        // share their plain position with the next part, so the later one wins
        let index = self
            .mapping
            .partition_point(|(plain, _)| *plain <= plain_position);

        match index.checked_sub(1).map(|i| self.mapping[i]) {
            Some((plain, original)) => original + (plain_position - plain),
            None => plain_position,
        }
    }
}

/// Builds an [AnnotatedText] from a sequence of text and markup parts.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedTextBuilder {
    text: AnnotatedText,
}

impl AnnotatedTextBuilder {
    pub fn new() -> Self {
        AnnotatedTextBuilder::default()
    }

    /// Adds text which is checked.
    pub fn add_text<S: Into<String>>(mut self, text: S) -> Self {
        let text = text.into();
        let len = text.chars().count();

        self.text
            .mapping
            .push((self.text.plain_len, self.text.original_len));
        self.text.plain_text.push_str(&text);
        self.text.plain_len += len;
        self.text.original_len += len;
        self
    }

    /// Adds markup which is not checked.
    pub fn add_markup<S: AsRef<str>>(mut self, markup: S) -> Self {
        self.text.original_len += markup.as_ref().chars().count();
        self
    }

    /// Adds markup which the rules see as `interpreted_as`, e. g. `<br/>` as `"\n"`.
    /// Positions inside the interpretation map to the start of the markup.
    pub fn add_markup_as<S: AsRef<str>, I: AsRef<str>>(mut self, markup: S, interpreted_as: I) -> Self {
        let interpreted_as = interpreted_as.as_ref();
        let len = interpreted_as.chars().count();

        for i in 0..len {
            self.text
                .mapping
                .push((self.text.plain_len + i, self.text.original_len));
        }
        self.text.plain_text.push_str(interpreted_as);
        self.text.plain_len += len;
        self.text.original_len += markup.as_ref().chars().count();
        self
    }

    pub fn build(self) -> AnnotatedText {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_maps_onto_itself() {
        let text = AnnotatedText::plain("word");

        assert_eq!(text.plain_text(), "word");
        assert_eq!((0..4).map(|i| text.map_position(i)).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(text.map_position(4), 4);
        assert_eq!(text.map_position(10), 4);
    }

    #[test]
    fn markup_is_skipped() {
        let text = AnnotatedTextBuilder::new()
            .add_markup("<b>")
            .add_text("word")
            .add_markup("</b>")
            .build();

        assert_eq!(text.plain_text(), "word");
        assert_eq!(text.map_position(0), 3);
        assert_eq!(text.map_position(3), 6);
        // the end of the plain text is the end of the original text
        assert_eq!(text.map_position(4), 11);
    }

    #[test]
    fn markup_between_text_is_skipped() {
        let text = AnnotatedTextBuilder::new()
            .add_text("a ")
            .add_markup("<i>")
            .add_markup("<b>")
            .add_text("b")
            .build();

        assert_eq!(text.plain_text(), "a b");
        assert_eq!(text.map_position(1), 1);
        assert_eq!(text.map_position(2), 8);
    }

    #[test]
    fn interpreted_markup_maps_to_markup_start() {
        let text = AnnotatedTextBuilder::new()
            .add_text("a")
            .add_markup_as("<br/>", "\n")
            .add_text("b")
            .build();

        assert_eq!(text.plain_text(), "a\nb");
        assert_eq!(text.map_position(1), 1);
        assert_eq!(text.map_position(2), 6);
    }

    #[test]
    fn mapping_is_monotonic() {
        let text = AnnotatedTextBuilder::new()
            .add_markup("<p>")
            .add_text("one ")
            .add_markup_as("<br>", "\n")
            .add_markup("<x/>")
            .add_text("two")
            .build();

        let positions: Vec<_> = (0..=text.plain_text().chars().count() + 1)
            .map(|i| text.map_position(i))
            .collect();

        assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    }
}
