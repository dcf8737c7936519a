//! Default sentence and word tokenizers.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use super::{SentenceTokenizer, WordTokenizer};
use crate::{utils, OtherError};

fn ends_with_terminal(text: &str) -> bool {
    text.trim_end().ends_with(|c: char| matches!(c, '.' | '!' | '?' | '…' | ':' | ';'))
}

/// Splits text into sentences at Unicode sentence boundaries (UAX #29).
///
/// Unless single line breaks mark paragraphs, a line break only ends a sentence if it follows
/// sentence-final punctuation or another line break.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentenceSplitter {
    #[serde(default)]
    single_line_breaks_marks_paragraph: bool,
}

impl SentenceSplitter {
    pub fn new(single_line_breaks_marks_paragraph: bool) -> Self {
        SentenceSplitter {
            single_line_breaks_marks_paragraph,
        }
    }

    fn joins_next(&self, part: &str, next: Option<&str>) -> bool {
        let next = match next {
            Some(next) => next,
            None => return false,
        };

        !self.single_line_breaks_marks_paragraph
            && part.ends_with('\n')
            && !part.ends_with("\n\n")
            && !part.trim().is_empty()
            && !ends_with_terminal(part)
            && !next.starts_with(|c: char| c == '\n' || c == '\r')
    }
}

impl SentenceTokenizer for SentenceSplitter {
    fn tokenize<'t>(&self, text: &'t str) -> Result<Vec<&'t str>, OtherError> {
        let parts: Vec<_> = text.split_sentence_bound_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;

        for (i, (index, part)) in parts.iter().enumerate() {
            if self.joins_next(part, parts.get(i + 1).map(|x| x.1)) {
                continue;
            }

            let end = index + part.len();
            sentences.push(&text[start..end]);
            start = end;
        }

        if start < text.len() {
            sentences.push(&text[start..]);
        }

        Ok(sentences)
    }

    fn single_line_breaks_marks_paragraph(&self) -> bool {
        self.single_line_breaks_marks_paragraph
    }
}

/// Splits a sentence into tokens at whitespace and punctuation. Every whitespace char and every
/// punctuation char becomes a token of its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordSplitter {
    /// Extra language-specific characters to split text on.
    #[serde(default)]
    extra_split_chars: Vec<char>,
}

impl WordSplitter {
    pub fn new(extra_split_chars: Vec<char>) -> Self {
        WordSplitter { extra_split_chars }
    }
}

impl WordTokenizer for WordSplitter {
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, OtherError> {
        let split_char = |c: char| {
            c.is_whitespace()
                || utils::splitting_chars().contains(c)
                || self.extra_split_chars.contains(&c)
        };

        Ok(utils::split(sentence, split_char)
            .into_iter()
            .map(ToOwned::to_owned)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentences_are_lossless() {
        let splitter = SentenceSplitter::default();

        for text in &[
            "Foo bar. Baz qux.",
            "One line\nstill the same sentence. Next!",
            "Para one.\n\nPara two",
            "",
            "  \n ",
        ] {
            assert_eq!(splitter.tokenize(text).unwrap().join(""), *text);
        }
    }

    #[test]
    fn sentences_are_split() {
        let splitter = SentenceSplitter::default();

        assert_eq!(
            splitter.tokenize("Foo bar. Baz qux.").unwrap(),
            vec!["Foo bar. ", "Baz qux."]
        );
    }

    #[test]
    fn single_line_breaks_are_joined() {
        let joined = SentenceSplitter::new(false).tokenize("a line\nbreak").unwrap();
        assert_eq!(joined, vec!["a line\nbreak"]);

        let split = SentenceSplitter::new(true).tokenize("a line\nbreak").unwrap();
        assert_eq!(split, vec!["a line\n", "break"]);
    }

    #[test]
    fn words_are_lossless() {
        let tokens = WordSplitter::default().tokenize("Hello, world  (again)!").unwrap();

        assert_eq!(
            tokens,
            vec!["Hello", ",", " ", "world", " ", " ", "(", "again", ")", "!"]
        );
    }

    #[test]
    fn extra_split_chars_are_used() {
        let tokens = WordSplitter::new(vec!['-']).tokenize("well-known").unwrap();

        assert_eq!(tokens, vec!["well", "-", "known"]);
    }
}
