//! Maps matches from rule coordinates to document coordinates.
//!
//! All positions count chars. Lines and columns are 1-based.

use fnv::FnvHashMap;
use std::ops::Range;

use crate::annotated::AnnotatedText;
use crate::rule::{RawMatch, Rule};
use crate::types::{LineColumn, RuleMatch, Sentence};
use crate::{utils, Error};

/// The position in the document at which a sentence starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    /// Chars of all previous sentences.
    pub char_count: usize,
    pub line_count: usize,
    pub column_count: usize,
}

impl Default for Counters {
    fn default() -> Self {
        Counters::start()
    }
}

impl Counters {
    /// The position of the first sentence of a document.
    pub fn start() -> Self {
        Counters {
            char_count: 0,
            line_count: 1,
            column_count: 1,
        }
    }

    /// The position of the sentence following `sentence`.
    ///
    /// If the last line break of the sentence is its first char, the column restarts at the
    /// sentence length, one less unless single line breaks mark paragraphs.
    pub fn advance(&self, sentence: &str, single_line_breaks_marks_paragraph: bool) -> Counters {
        let len = sentence.chars().count();
        let line_breaks = utils::count_line_breaks(sentence);
        let last_break = last_line_break(sentence);

        let column_count = match last_break {
            None => self.column_count + len,
            Some(0) if single_line_breaks_marks_paragraph => len,
            Some(0) => len - 1,
            Some(i) => len - i,
        };

        Counters {
            char_count: self.char_count + len,
            line_count: self.line_count + line_breaks,
            column_count,
        }
    }

    /// Line and column of a char position inside a sentence starting at these counters.
    /// A line break inside the sentence restarts the column count.
    pub fn locate(&self, sentence: &str, position: usize) -> LineColumn {
        let end = sentence
            .char_indices()
            .nth(position)
            .map_or(sentence.len(), |(i, _)| i);
        let prefix = &sentence[..end];
        let line_breaks = utils::count_line_breaks(prefix);
        let last_break = last_line_break(prefix);

        let column = match last_break {
            Some(i) => position - i,
            None => position + self.column_count,
        };

        LineColumn::new(self.line_count + line_breaks, column)
    }
}

/// Char position of the last line break in `text`.
fn last_line_break(text: &str) -> Option<usize> {
    text.rfind('\n').map(|i| text[..i].chars().count())
}

/// Maps a plain text span to the original text. The end is mapped through its last char so
/// markup following the span is not included.
fn map_span(span: &Range<usize>, annotated: Option<&AnnotatedText>) -> Range<usize> {
    match annotated {
        Some(text) => {
            let start = text.map_position(span.start);
            let end = if span.end > span.start {
                text.map_position(span.end - 1) + 1
            } else {
                start
            };
            start..end
        }
        None => span.clone(),
    }
}

fn check_span(rule: &Rule, span: &Range<usize>, len: usize) -> Result<(), Error> {
    if span.start > span.end || span.end > len {
        return Err(Error::InvalidSpan {
            rule: rule.id().clone(),
            span: span.clone(),
            len,
        });
    }
    Ok(())
}

fn build(
    rule: &Rule,
    raw: RawMatch,
    span: Range<usize>,
    offset: usize,
    start: Option<LineColumn>,
    end: Option<LineColumn>,
) -> RuleMatch {
    RuleMatch {
        rule: rule.id().clone(),
        category: rule.category().cloned(),
        span,
        offset,
        start,
        end,
        message: raw.message,
        short_message: raw.short_message,
        replacements: raw.replacements,
    }
}

/// Turns a sentence-relative match of a sentence rule into a match in document coordinates.
///
/// `sentence` is the raw text of the sentence (i. e. including ignored characters).
///
/// # Errors
/// - If the span is not inside the sentence.
pub fn remap(
    rule: &Rule,
    raw: RawMatch,
    counters: &Counters,
    sentence: &str,
    annotated: Option<&AnnotatedText>,
) -> Result<RuleMatch, Error> {
    check_span(rule, &raw.span, sentence.chars().count())?;

    let plain = raw.span.start + counters.char_count..raw.span.end + counters.char_count;
    let start = counters.locate(sentence, raw.span.start);
    let end = counters.locate(sentence, raw.span.end);

    Ok(build(
        rule,
        raw,
        map_span(&plain, annotated),
        plain.start,
        Some(start),
        Some(end),
    ))
}

/// Line and column of every char position of a text at which a token ends, computed by walking
/// over the tokens of all sentences.
#[derive(Debug, Clone, Default)]
pub struct TextPositions {
    positions: FnvHashMap<usize, LineColumn>,
    len: usize,
}

impl TextPositions {
    pub fn new(sentences: &[Sentence]) -> Self {
        let mut positions = FnvHashMap::default();
        let mut line = 1;
        let mut column = 0;
        let mut count = 0;

        for token in sentences.iter().flat_map(|x| x.tokens()) {
            let len = token.span().len();

            if token.as_str() == "\n" {
                line += 1;
                column = 0;
            } else {
                column += len;
            }
            count += len;

            positions.insert(count, LineColumn::new(line, column + 1));
        }

        TextPositions {
            positions,
            len: count,
        }
    }

    /// Length of the text in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The position at `offset`, if a token ends there.
    pub fn get(&self, offset: usize) -> Option<LineColumn> {
        self.positions.get(&offset).copied()
    }
}

/// Turns a match of a text rule into a match in document coordinates.
///
/// # Errors
/// - If the span is not inside the text.
pub fn remap_text(
    rule: &Rule,
    raw: RawMatch,
    positions: &TextPositions,
    annotated: Option<&AnnotatedText>,
) -> Result<RuleMatch, Error> {
    check_span(rule, &raw.span, positions.len())?;

    let start = positions.get(raw.span.start);
    let end = positions.get(raw.span.end);
    let span = map_span(&raw.span, annotated);
    let offset = raw.span.start;

    Ok(build(rule, raw, span, offset, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_sentences, UnknownWords};
    use crate::annotated::AnnotatedTextBuilder;
    use crate::lang::Language;
    use crate::rule::SentenceRule;
    use crate::OtherError;

    struct Nothing;

    impl SentenceRule for Nothing {
        fn match_sentence(&self, _sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
            Ok(Vec::new())
        }
    }

    fn rule() -> Rule {
        Rule::sentence("NOTHING", Nothing)
    }

    #[test]
    fn counters_advance_over_plain_sentences() {
        let counters = Counters::start().advance("Foo bar. ", false);

        assert_eq!(counters.char_count, 9);
        assert_eq!(counters.line_count, 1);
        assert_eq!(counters.column_count, 10);
    }

    #[test]
    fn counters_advance_over_line_breaks() {
        let counters = Counters::start().advance("Foo\nbar. ", false);

        assert_eq!(counters.line_count, 2);
        // "bar. " takes columns 1 to 5
        assert_eq!(counters.column_count, 6);
    }

    #[test]
    fn leading_line_break_depends_on_paragraph_handling() {
        let start = Counters {
            char_count: 10,
            line_count: 1,
            column_count: 11,
        };

        let joined = start.advance("\n", false);
        assert_eq!(joined.char_count, 11);
        assert_eq!(joined.line_count, 2);
        assert_eq!(joined.column_count, 0);

        let split = start.advance("\n", true);
        assert_eq!(split.column_count, 1);

        assert_eq!(start.advance("\nab", false).column_count, 2);
        assert_eq!(start.advance("\nab", true).column_count, 3);
    }

    #[test]
    fn matches_get_document_positions() {
        let counters = Counters::start().advance("Foo bar. ", false);
        let raw = RawMatch::new(0..3, "message").with_replacements(vec!["Qux"]);

        let m = remap(&rule(), raw, &counters, "Baz qux.", None).unwrap();

        assert_eq!(*m.span(), 9..12);
        assert_eq!(m.offset(), 9);
        assert_eq!(m.line(), Some(1));
        assert_eq!(m.column(), Some(10));
        assert_eq!(m.end_column(), Some(13));
        assert_eq!(m.replacements(), &["Qux".to_owned()]);
        assert_eq!(m.rule().id(), "NOTHING");
    }

    #[test]
    fn line_breaks_inside_sentences_restart_columns() {
        let raw = RawMatch::new(2..6, "message");

        let m = remap(&rule(), raw, &Counters::start(), "a\nbc\nde", None).unwrap();

        assert_eq!(m.line(), Some(2));
        assert_eq!(m.column(), Some(1));
        assert_eq!(m.end_line(), Some(3));
        assert_eq!(m.end_column(), Some(2));
    }

    #[test]
    fn spans_are_mapped_through_markup() {
        let text = AnnotatedTextBuilder::new()
            .add_markup("<b>")
            .add_text("word")
            .add_markup("</b>")
            .build();
        let raw = RawMatch::new(0..4, "message");

        let m = remap(&rule(), raw, &Counters::start(), "word", Some(&text)).unwrap();

        assert_eq!(*m.span(), 3..7);
        assert_eq!(m.offset(), 0);
    }

    #[test]
    fn empty_spans_stay_empty() {
        let text = AnnotatedTextBuilder::new()
            .add_text("ab")
            .add_markup("<br/>")
            .add_text("cd")
            .build();
        let raw = RawMatch::new(2..2, "message");

        let m = remap(&rule(), raw, &Counters::start(), "abcd", Some(&text)).unwrap();

        assert_eq!(*m.span(), 7..7);
    }

    #[test]
    fn spans_outside_of_the_sentence_fail() {
        let raw = RawMatch::new(2..10, "message");

        assert!(matches!(
            remap(&rule(), raw, &Counters::start(), "abc", None),
            Err(Error::InvalidSpan { len: 3, .. })
        ));
    }

    #[test]
    fn text_positions_follow_token_boundaries() {
        let sentences = analyze_sentences(
            &Language::builder("xx").build(),
            &["Foo bar.\n", "Baz qux."],
            &mut UnknownWords::new(false),
        )
        .unwrap();
        let positions = TextPositions::new(&sentences);
        let text_match = |span| remap_text(&rule(), RawMatch::new(span, "message"), &positions, None);

        assert_eq!(positions.len(), 17);

        // inside of "Foo"
        let m = text_match(1..2).unwrap();
        assert_eq!(m.line(), None);
        assert_eq!(m.column(), None);
        assert_eq!(m.end_line(), None);
        assert_eq!(m.end_column(), None);
        assert_eq!(m.offset(), 1);

        let m = text_match(4..7).unwrap();
        assert_eq!((m.line(), m.column()), (Some(1), Some(5)));
        assert_eq!((m.end_line(), m.end_column()), (Some(1), Some(8)));

        // the line break restarts the column count
        let m = text_match(9..12).unwrap();
        assert_eq!((m.line(), m.column()), (Some(2), Some(1)));
        assert_eq!((m.end_line(), m.end_column()), (Some(2), Some(4)));

        assert!(matches!(
            text_match(12..18),
            Err(Error::InvalidSpan { len: 17, .. })
        ));
    }
}
