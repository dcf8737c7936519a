//! Fundamental types used by this crate.

use itertools::Itertools;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::rule::id::{Category, RuleId};

/// Part-of-speech tag assigned to the sentence start token.
pub const SENT_START: &str = "SENT_START";

/// Lemma and part-of-speech tag associated with a word.
/// An empty `pos` means the reading carries no tag.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct WordData {
    pub lemma: String,
    pub pos: String,
}

impl WordData {
    pub fn new<S: Into<String>, P: Into<String>>(lemma: S, pos: P) -> Self {
        WordData {
            lemma: lemma.into(),
            pos: pos.into(),
        }
    }

    /// Whether this reading carries a part-of-speech tag.
    pub fn is_tagged(&self) -> bool {
        !self.pos.is_empty()
    }
}

/// The text of a token together with all its readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub tags: Vec<WordData>,
}

impl Word {
    pub fn new_with_tags<S: Into<String>>(text: S, tags: Vec<WordData>) -> Self {
        Word {
            text: text.into(),
            tags,
        }
    }

    /// Whether any reading of this word has a part-of-speech tag.
    pub fn is_tagged(&self) -> bool {
        self.tags.iter().any(WordData::is_tagged)
    }
}

/// Whether a token text counts as whitespace. Line breaks are whitespace too.
pub fn is_whitespace(text: &str) -> bool {
    text.trim().is_empty() || text == "\u{200B}"
}

/// Whether a token text is a single line break.
pub fn is_linebreak(text: &str) -> bool {
    matches!(text, "\n" | "\r\n" | "\r" | "\u{2028}" | "\u{2029}")
}

/// A token during analysis, before the sentence boundaries are known.
/// Chunkers work on these tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteToken {
    pub word: Word,
    /// Char position of the token in its sentence.
    pub start: usize,
    /// Length of the token in the original sentence, in chars. Can differ from the length of
    /// the word if ignored characters were stripped.
    pub len: usize,
    pub has_space_before: bool,
    pub chunks: Vec<String>,
}

impl IncompleteToken {
    pub fn new(word: Word, start: usize) -> Self {
        IncompleteToken {
            len: word.text.chars().count(),
            word,
            start,
            has_space_before: false,
            chunks: Vec::new(),
        }
    }

    pub fn is_whitespace(&self) -> bool {
        is_whitespace(&self.word.text)
    }
}

/// A finished token. Immutable except for its readings, which a
/// [Disambiguator][crate::components::Disambiguator] may change.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    word: Word,
    start: usize,
    len: usize,
    has_space_before: bool,
    chunks: Vec<String>,
    is_sentence_start: bool,
    is_sentence_end: bool,
    is_paragraph_end: bool,
}

impl Token {
    /// Get the special, zero-length sentence start token.
    pub(crate) fn sent_start() -> Self {
        Token {
            word: Word::new_with_tags("", vec![WordData::new("", SENT_START)]),
            start: 0,
            len: 0,
            has_space_before: false,
            chunks: Vec::new(),
            is_sentence_start: true,
            is_sentence_end: false,
            is_paragraph_end: false,
        }
    }

    fn finish(data: IncompleteToken, is_sentence_end: bool, is_paragraph_end: bool) -> Self {
        Token {
            word: data.word,
            start: data.start,
            len: data.len,
            has_space_before: data.has_space_before,
            chunks: data.chunks,
            is_sentence_start: false,
            is_sentence_end,
            is_paragraph_end,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn as_str(&self) -> &str {
        &self.word.text
    }

    /// Char position of the token in its sentence.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Char span of the token in its sentence, including ignored characters.
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    pub fn has_space_before(&self) -> bool {
        self.has_space_before
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn is_sentence_start(&self) -> bool {
        self.is_sentence_start
    }

    pub fn is_sentence_end(&self) -> bool {
        self.is_sentence_end
    }

    pub fn is_paragraph_end(&self) -> bool {
        self.is_paragraph_end
    }

    pub fn is_whitespace(&self) -> bool {
        !self.is_sentence_start && is_whitespace(&self.word.text)
    }

    pub fn is_linebreak(&self) -> bool {
        is_linebreak(&self.word.text)
    }

    pub fn is_tagged(&self) -> bool {
        self.word.is_tagged()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.word.text
    }
}

/// Assembles the tokens of one sentence: prepends the sentence start token and marks the last
/// non-whitespace token as sentence end. If the last token is a line break without any
/// non-whitespace token before it, it is marked as paragraph end too.
pub(crate) fn finalize(tokens: Vec<IncompleteToken>) -> Vec<Token> {
    let sent_end = tokens
        .iter()
        .rposition(|x| !x.is_whitespace())
        .unwrap_or_else(|| tokens.len().saturating_sub(1));
    let n = tokens.len();

    let mut finalized = Vec::with_capacity(n + 1);
    finalized.push(Token::sent_start());

    if n == 0 {
        finalized[0].is_sentence_end = true;
        return finalized;
    }

    finalized.extend(tokens.into_iter().enumerate().map(|(i, token)| {
        let is_sentence_end = i == sent_end;
        let is_paragraph_end =
            is_sentence_end && i == n - 1 && is_linebreak(&token.word.text);

        Token::finish(token, is_sentence_end, is_paragraph_end)
    }));

    finalized
}

/// An analyzed sentence: an ordered, non-empty sequence of tokens starting with a
/// zero-length sentence start token.
#[derive(Debug, Clone)]
pub struct Sentence {
    tokens: Vec<Token>,
    text: OnceCell<String>,
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Sentence {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(!tokens.is_empty() && tokens[0].is_sentence_start);

        Sentence {
            tokens,
            text: OnceCell::new(),
        }
    }

    /// All tokens including the sentence start token and whitespace.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Tokens without the sentence start token and without whitespace.
    pub fn tokens_without_whitespace(&self) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(|x| !x.is_sentence_start && !x.is_whitespace())
    }

    /// The text of the sentence, reconstructed from its tokens.
    pub fn text(&self) -> &str {
        self.text
            .get_or_init(|| self.tokens.iter().map(|x| x.as_str()).join(""))
    }

    /// The length of the original sentence in chars.
    pub fn char_len(&self) -> usize {
        self.tokens.iter().map(|x| x.len).sum()
    }

    /// Changes the readings of every token. Boundaries and positions stay untouched.
    pub fn map_words<F: FnMut(&mut Word)>(mut self, mut f: F) -> Self {
        for token in self.tokens.iter_mut().skip(1) {
            f(&mut token.word);
        }
        self.text = OnceCell::new();
        self
    }

    /// Marks the last token as paragraph end.
    pub(crate) fn with_paragraph_end(mut self) -> Self {
        if let Some(last) = self.tokens.last_mut() {
            last.is_paragraph_end = true;
        }
        self
    }
}

/// A 1-based line / column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

impl LineColumn {
    pub fn new(line: usize, column: usize) -> Self {
        LineColumn { line, column }
    }
}

/// A finding of a rule, in the coordinates of the checked document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleMatch {
    pub(crate) rule: RuleId,
    pub(crate) category: Option<Category>,
    pub(crate) span: Range<usize>,
    pub(crate) offset: usize,
    pub(crate) start: Option<LineColumn>,
    pub(crate) end: Option<LineColumn>,
    pub(crate) message: String,
    pub(crate) short_message: Option<String>,
    pub(crate) replacements: Vec<String>,
}

impl RuleMatch {
    /// The ID of the rule this match is from.
    pub fn rule(&self) -> &RuleId {
        &self.rule
    }

    /// The category of the rule this match is from.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// The char span in the original text (i. e. after mapping through an
    /// [AnnotatedText][crate::annotated::AnnotatedText], if any).
    pub fn span(&self) -> &Range<usize> {
        &self.span
    }

    /// Char offset of the match start in the plain text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line of the match start.
    pub fn line(&self) -> Option<usize> {
        self.start.map(|x| x.line)
    }

    /// 1-based line of the match end.
    pub fn end_line(&self) -> Option<usize> {
        self.end.map(|x| x.line)
    }

    /// 1-based column of the match start.
    pub fn column(&self) -> Option<usize> {
        self.start.map(|x| x.column)
    }

    /// 1-based column of the match end.
    pub fn end_column(&self) -> Option<usize> {
        self.end.map(|x| x.column)
    }

    /// A human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> Option<&str> {
        self.short_message.as_deref()
    }

    /// The suggested replacement options for the text.
    pub fn replacements(&self) -> &[String] {
        &self.replacements
    }
}

/// Correct a text by applying matches to it.
/// In the case of multiple possible replacements, always chooses the first one.
/// Matches without replacements and matches overlapping an earlier applied match are skipped.
/// The matches must be sorted by start and their spans must refer to `text`.
pub fn apply_matches(text: &str, matches: &[RuleMatch]) -> String {
    let mut offset: isize = 0;
    let mut chars: Vec<_> = text.chars().collect();
    let mut last_end = 0;

    for m in matches {
        let replacement = match m.replacements.first() {
            Some(x) => x,
            None => continue,
        };
        if m.span.start < last_end || m.span.end > text.chars().count() {
            continue;
        }

        let replacement: Vec<_> = replacement.chars().collect();
        chars.splice(
            (m.span.start as isize + offset) as usize..(m.span.end as isize + offset) as usize,
            replacement.iter().cloned(),
        );
        offset = offset + replacement.len() as isize - m.span.len() as isize;
        last_end = m.span.end;
    }

    chars.into_iter().collect()
}
