//! Rule-based grammar and style checking.
//! # Overview
//!
//! rulecheck has the following core abstractions:
//! - A [Language][lang::Language] bundling the linguistic components (sentence / word tokenizer,
//!   tagger, optional chunker, disambiguator) used to turn text into [Sentence][types::Sentence]s.
//! - [Rule][rule::Rule]s, either sentence-scoped or text-scoped, producing raw matches.
//! - A [Checker][checker::Checker] session resolving which rules are active, dispatching them and
//!   remapping every match back to the coordinates of the original text.
//!
//! # Examples
//!
//! Check a text:
//!
//! ```
//! use rulecheck::{lang::generic, Checker};
//!
//! let mut checker = Checker::new(generic::language());
//! let matches = checker.check("This is a test .")?;
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(*matches[0].span(), 14..15);
//! assert_eq!(matches[0].rule().id(), "COMMA_PARENTHESIS_WHITESPACE");
//! assert_eq!(matches[0].line(), Some(1));
//! assert_eq!(matches[0].column(), Some(15));
//! # Ok::<(), rulecheck::Error>(())
//! ```
//!
//! Check a text containing markup:
//!
//! ```
//! use rulecheck::{annotated::AnnotatedTextBuilder, lang::generic, Checker, ParagraphMode};
//!
//! let text = AnnotatedTextBuilder::new()
//!     .add_markup("<p>")
//!     .add_text("It is is here.")
//!     .add_markup("</p>")
//!     .build();
//!
//! let mut checker = Checker::new(generic::language());
//! let matches = checker.check_annotated(&text, true, ParagraphMode::Normal)?;
//!
//! assert_eq!(matches[0].rule().id(), "WORD_REPEAT_RULE");
//! // spans are relative to the original text, the offset is relative to the plain text
//! assert_eq!(*matches[0].span(), 6..11);
//! assert_eq!(matches[0].offset(), 3);
//! # Ok::<(), rulecheck::Error>(())
//! ```

use thiserror::Error;

pub mod analysis;
pub mod annotated;
pub mod checker;
pub mod components;
pub mod dispatch;
mod filter;
pub mod lang;
pub mod position;
pub mod rule;
pub mod rules;
pub mod types;
pub mod utils;

pub use checker::{Checker, CheckerOptions, ParagraphMode};
pub use rule::Rule;
pub use rules::Rules;

/// Error type of the linguistic components and of rule implementations.
pub type OtherError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    /// Unknown words were requested from a checker which does not collect them.
    #[error("unknown words are not collected, set `list_unknown_words` to collect them")]
    UnknownWordsDisabled,
    /// A linguistic component (tokenizer, tagger, chunker, disambiguator) failed.
    #[error("{component} failed: {source}")]
    Analysis {
        component: &'static str,
        #[source]
        source: OtherError,
    },
    /// A rule failed while matching.
    #[error("rule {rule} failed: {source}")]
    Rule {
        rule: rule::id::RuleId,
        #[source]
        source: OtherError,
    },
    /// A rule returned a span which is not inside its sentence.
    #[error("rule {rule} returned span {span:?} outside of a sentence with {len} chars")]
    InvalidSpan {
        rule: rule::id::RuleId,
        span: std::ops::Range<usize>,
        len: usize,
    },
    /// Checking one sentence failed.
    #[error("could not check sentence: '{preview}'")]
    Sentence {
        preview: String,
        #[source]
        source: Box<Error>,
    },
    #[error("unknown paragraph mode '{0}', expected normal, only_paragraph or only_sentence")]
    UnknownParagraphMode(String),
    #[error("sentences and analyzed sentences do not have the same length: {sentences} != {analyzed}")]
    MismatchedInput { sentences: usize, analyzed: usize },
    #[error(transparent)]
    Regex(#[from] onig::Error),
    #[error(transparent)]
    Id(#[from] rule::id::Error),
}
