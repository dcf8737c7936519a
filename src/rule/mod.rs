//! Implementations related to single rules.
//!
//! A [Rule] is either sentence-scoped (a [SentenceRule] sees one [Sentence] at a time) or
//! text-scoped (a [TextRule] sees all sentences of a text at once and may keep state across them).

use derivative::Derivative;
use std::ops::Range;

use crate::types::Sentence;
use crate::OtherError;

pub mod activation;
pub mod builtin;
pub mod id;

use id::{Category, RuleId};

/// A match as returned by a rule implementation.
/// Its span is sentence-relative for [SentenceRule]s and relative to the plain text
/// for [TextRule]s.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatch {
    pub(crate) span: Range<usize>,
    pub(crate) message: String,
    pub(crate) short_message: Option<String>,
    pub(crate) replacements: Vec<String>,
}

impl RawMatch {
    /// Creates a match over a char span.
    pub fn new<S: Into<String>>(span: Range<usize>, message: S) -> Self {
        RawMatch {
            span,
            message: message.into(),
            short_message: None,
            replacements: Vec::new(),
        }
    }

    pub fn with_short_message<S: Into<String>>(mut self, short_message: S) -> Self {
        self.short_message = Some(short_message.into());
        self
    }

    pub fn with_replacements<I, S>(mut self, replacements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replacements = replacements.into_iter().map(Into::into).collect();
        self
    }

    pub fn span(&self) -> &Range<usize> {
        &self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> Option<&str> {
        self.short_message.as_deref()
    }

    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }
}

/// Checking logic operating on one sentence.
pub trait SentenceRule: Send + Sync {
    /// Computes the matches in the sentence. Spans are char spans relative to the sentence.
    fn match_sentence(&self, sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError>;

    /// Whether this rule can cheaply tell that it will not match the sentence.
    /// Returning `false` is always correct.
    #[allow(unused_variables)]
    fn can_be_ignored_for(&self, sentence: &Sentence) -> bool {
        false
    }

    /// Clears state accumulated while matching.
    fn reset(&mut self) {}
}

/// Checking logic operating on all sentences of a text.
pub trait TextRule: Send + Sync {
    /// Computes the matches in the text. Spans are char spans relative to the plain text.
    fn match_text(&mut self, sentences: &[Sentence]) -> Result<Vec<RawMatch>, OtherError>;

    /// Clears state accumulated while matching.
    fn reset(&mut self);
}

/// The two capabilities a rule can have.
pub enum RuleKind {
    Sentence(Box<dyn SentenceRule>),
    Text(Box<dyn TextRule>),
}

impl RuleKind {
    pub fn is_text_rule(&self) -> bool {
        matches!(self, RuleKind::Text(_))
    }
}

/// A checking unit with its metadata.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Rule {
    id: RuleId,
    category: Option<Category>,
    default_off: bool,
    #[derivative(Debug = "ignore")]
    kind: RuleKind,
}

impl Rule {
    /// Creates a sentence-scoped rule.
    pub fn sentence<S, R>(id: S, rule: R) -> Self
    where
        S: Into<String>,
        R: SentenceRule + 'static,
    {
        Rule {
            id: RuleId::new(id),
            category: None,
            default_off: false,
            kind: RuleKind::Sentence(Box::new(rule)),
        }
    }

    /// Creates a text-scoped rule.
    pub fn text<S, R>(id: S, rule: R) -> Self
    where
        S: Into<String>,
        R: TextRule + 'static,
    {
        Rule {
            id: RuleId::new(id),
            category: None,
            default_off: false,
            kind: RuleKind::Text(Box::new(rule)),
        }
    }

    pub fn with_sub_id<S: Into<String>>(mut self, sub_id: S) -> Self {
        self.id = self.id.with_sub_id(sub_id);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Makes the rule inactive unless it is explicitly enabled.
    pub fn with_default_off(mut self) -> Self {
        self.default_off = true;
        self
    }

    pub fn id(&self) -> &RuleId {
        &self.id
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn is_default_off(&self) -> bool {
        self.default_off
    }

    pub fn set_default_off(&mut self) {
        self.default_off = true;
    }

    pub fn set_default_on(&mut self) {
        self.default_off = false;
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut RuleKind {
        &mut self.kind
    }

    pub fn is_text_rule(&self) -> bool {
        self.kind.is_text_rule()
    }

    /// Clears the state the rule accumulated.
    pub fn reset(&mut self) {
        match &mut self.kind {
            RuleKind::Sentence(rule) => rule.reset(),
            RuleKind::Text(rule) => rule.reset(),
        }
    }
}
