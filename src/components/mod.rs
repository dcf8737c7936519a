//! The linguistic components a [Language][crate::lang::Language] is assembled from.
//!
//! Every component is a trait so languages can plug in their own implementations. This module
//! provides simple, language-agnostic defaults for each of them.

use crate::types::{IncompleteToken, Sentence, Word, WordData};
use crate::OtherError;

pub mod disambiguator;
pub mod tagger;
pub mod tokenizer;

/// Splits a text into sentences.
pub trait SentenceTokenizer: Send + Sync {
    /// Splits the text. Concatenating the sentences must give back the text.
    fn tokenize<'t>(&self, text: &'t str) -> Result<Vec<&'t str>, OtherError>;

    /// Whether a single line break already ends a paragraph.
    fn single_line_breaks_marks_paragraph(&self) -> bool {
        false
    }
}

/// Splits a sentence into tokens.
pub trait WordTokenizer: Send + Sync {
    /// Splits the sentence. Concatenating the tokens must give back the sentence.
    fn tokenize(&self, sentence: &str) -> Result<Vec<String>, OtherError>;
}

/// Assigns readings to tokens.
pub trait Tagger: Send + Sync {
    /// Tags the tokens. Must return one [Word] per token, in the same order.
    fn tag(&self, tokens: &[String]) -> Result<Vec<Word>, OtherError>;

    /// Creates a single reading for the given surface form.
    fn create_token(&self, surface: &str, pos: Option<&str>) -> WordData {
        WordData::new(surface, pos.unwrap_or(""))
    }
}

/// Adds chunk tags to tokens.
pub trait Chunker: Send + Sync {
    fn add_chunk_tags(&self, tokens: &mut [IncompleteToken]) -> Result<(), OtherError>;
}

/// Changes the readings of an analyzed sentence, e. g. by removing readings
/// which are impossible in context.
pub trait Disambiguator: Send + Sync {
    fn disambiguate(&self, sentence: Sentence) -> Result<Sentence, OtherError>;
}
