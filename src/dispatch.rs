//! Runs rules over analyzed sentences.
//!
//! Text rules run first, once over all sentences. Sentence rules then run on each sentence in
//! order. The sentence phase is a pure function of the rules, a contiguous batch of sentences and
//! the [Counters] at the start of the batch, so a batch can be split into chunks which are checked
//! independently (in parallel with the `parallel` feature).

use log::debug;
use std::ops::Range;

use crate::annotated::AnnotatedText;
use crate::checker::ParagraphMode;
use crate::filter::{Filter, SameRuleGroupFilter};
use crate::position::{remap, remap_text, Counters, TextPositions};
use crate::rule::{activation::ActivationState, Rule, RuleKind};
use crate::rules::Rules;
use crate::types::{RuleMatch, Sentence};
use crate::utils::{self, parallelism::*};
use crate::Error;

/// Settings shared by all sentences of one check.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Maps plain text positions to the original text. Without it, positions are reported
    /// relative to the plain text.
    pub annotated: Option<&'a AnnotatedText>,
    pub single_line_breaks_marks_paragraph: bool,
    /// Maximum length of the sentence shown in errors.
    pub preview_len: usize,
}

/// A contiguous range of sentences with the counters at its first sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub range: Range<usize>,
    pub counters: Counters,
}

/// Splits the sentences into chunks of at most `chunk_size` sentences.
/// The counters of each chunk are computed in one sequential pass.
pub fn plan_chunks<S: AsRef<str>>(
    sentences: &[S],
    chunk_size: usize,
    start: Counters,
    single_line_breaks_marks_paragraph: bool,
) -> Vec<Chunk> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::new();
    let mut counters = start;

    for (i, batch) in sentences.chunks(chunk_size).enumerate() {
        let begin = i * chunk_size;
        chunks.push(Chunk {
            range: begin..begin + batch.len(),
            counters,
        });

        counters = batch.iter().fold(counters, |counters, sentence| {
            counters.advance(sentence.as_ref(), single_line_breaks_marks_paragraph)
        });
    }

    chunks
}

/// Runs the text rules over all sentences. Their spans refer to the concatenated sentences.
pub fn check_text<'a, I>(
    rules: I,
    analyzed: &[Sentence],
    annotated: Option<&AnnotatedText>,
) -> Result<Vec<RuleMatch>, Error>
where
    I: IntoIterator<Item = &'a mut Rule>,
{
    let positions = TextPositions::new(analyzed);
    let mut matches = Vec::new();

    for rule in rules {
        let raw_matches = match rule.kind_mut() {
            RuleKind::Text(text_rule) => text_rule.match_text(analyzed),
            RuleKind::Sentence(_) => continue,
        }
        .map_err(|source| Error::Rule {
            rule: rule.id().clone(),
            source,
        })?;

        for raw in raw_matches {
            matches.push(remap_text(rule, raw, &positions, annotated)?);
        }
    }

    Ok(matches)
}

fn check_sentence(
    rules: &[&Rule],
    sentence: &str,
    analyzed: &Sentence,
    counters: &Counters,
    annotated: Option<&AnnotatedText>,
) -> Result<Vec<RuleMatch>, Error> {
    let mut matches = Vec::new();

    for rule in rules {
        let sentence_rule = match rule.kind() {
            RuleKind::Sentence(sentence_rule) => sentence_rule,
            RuleKind::Text(_) => continue,
        };

        if sentence_rule.can_be_ignored_for(analyzed) {
            continue;
        }

        let raw_matches = sentence_rule
            .match_sentence(analyzed)
            .map_err(|source| Error::Rule {
                rule: rule.id().clone(),
                source,
            })?;

        for raw in raw_matches {
            matches.push(remap(rule, raw, counters, sentence, annotated)?);
        }
    }

    Ok(SameRuleGroupFilter.filter(matches))
}

/// Runs the sentence rules on each sentence of a batch starting at `start`.
///
/// `sentences` are the raw sentence texts, `analyzed` their analyses.
///
/// # Errors
/// - If the number of sentences and analyses differ.
/// - If checking any sentence fails. The error carries a preview of the sentence.
pub fn check_sentences<S: AsRef<str>>(
    rules: &[&Rule],
    sentences: &[S],
    analyzed: &[Sentence],
    start: Counters,
    context: &Context,
) -> Result<Vec<RuleMatch>, Error> {
    if sentences.len() != analyzed.len() {
        return Err(Error::MismatchedInput {
            sentences: sentences.len(),
            analyzed: analyzed.len(),
        });
    }

    let mut counters = start;
    let mut matches = Vec::new();

    for (sentence, analyzed) in sentences.iter().zip(analyzed) {
        let sentence = sentence.as_ref();

        let sentence_matches =
            check_sentence(rules, sentence, analyzed, &counters, context.annotated).map_err(
                |source| Error::Sentence {
                    preview: utils::abbreviate(analyzed.text(), context.preview_len),
                    source: Box::new(source),
                },
            )?;
        matches.extend(sentence_matches);

        counters = counters.advance(sentence, context.single_line_breaks_marks_paragraph);
    }

    Ok(matches)
}

/// Runs all active rules selected by `mode`. Matches are returned unsorted.
///
/// With a `chunk_size`, the sentence phase is split into chunks of that many sentences.
pub fn dispatch<S: AsRef<str> + Sync>(
    rules: &mut Rules,
    activation: &ActivationState,
    mode: ParagraphMode,
    sentences: &[S],
    analyzed: &[Sentence],
    context: &Context,
    chunk_size: Option<usize>,
) -> Result<Vec<RuleMatch>, Error> {
    if sentences.len() != analyzed.len() {
        return Err(Error::MismatchedInput {
            sentences: sentences.len(),
            analyzed: analyzed.len(),
        });
    }

    let mut matches = if mode.runs_text_rules() {
        check_text(
            rules
                .rules_mut()
                .iter_mut()
                .filter(|rule| rule.is_text_rule() && activation.is_active(rule)),
            analyzed,
            context.annotated,
        )?
    } else {
        Vec::new()
    };
    debug!("text rules: {} matches", matches.len());

    if !mode.runs_sentence_rules() {
        return Ok(matches);
    }

    let active: Vec<&Rule> = rules
        .iter()
        .filter(|rule| !rule.is_text_rule() && activation.is_active(rule))
        .collect();
    let start = Counters::start();

    let sentence_matches: Vec<RuleMatch> = match chunk_size {
        Some(chunk_size) => {
            let chunks = plan_chunks(
                sentences,
                chunk_size,
                start,
                context.single_line_breaks_marks_paragraph,
            );
            debug!("checking {} sentences in {} chunks", sentences.len(), chunks.len());

            chunks
                .maybe_par_iter()
                .map(|chunk| {
                    check_sentences(
                        &active,
                        &sentences[chunk.range.clone()],
                        &analyzed[chunk.range],
                        chunk.counters,
                        context,
                    )
                })
                .collect::<Result<Vec<_>, Error>>()?
                .into_iter()
                .flatten()
                .collect()
        }
        None => check_sentences(&active, sentences, analyzed, start, context)?,
    };
    debug!("sentence rules: {} matches", sentence_matches.len());

    matches.extend(sentence_matches);
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_sentences, UnknownWords};
    use crate::lang::Language;
    use crate::rule::{RawMatch, SentenceRule, TextRule};
    use crate::OtherError;

    /// Flags the first char of every sentence.
    struct First;

    impl SentenceRule for First {
        fn match_sentence(&self, _sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
            Ok(vec![RawMatch::new(0..1, "first")])
        }
    }

    /// Flags the whole text.
    struct Everything;

    impl TextRule for Everything {
        fn match_text(&mut self, sentences: &[Sentence]) -> Result<Vec<RawMatch>, OtherError> {
            let len = sentences.iter().map(|x| x.char_len()).sum();
            Ok(vec![RawMatch::new(0..len, "everything")])
        }

        fn reset(&mut self) {}
    }

    struct Failing;

    impl SentenceRule for Failing {
        fn match_sentence(&self, _sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
            Err("broken".into())
        }
    }

    fn context() -> Context<'static> {
        Context {
            annotated: None,
            single_line_breaks_marks_paragraph: false,
            preview_len: 200,
        }
    }

    fn analyzed(sentences: &[&str]) -> Vec<Sentence> {
        let language = Language::builder("xx").build();
        analyze_sentences(&language, sentences, &mut UnknownWords::new(false)).unwrap()
    }

    fn rules() -> Rules {
        vec![Rule::sentence("FIRST", First), Rule::text("EVERYTHING", Everything)]
            .into_iter()
            .collect()
    }

    #[test]
    fn sentence_matches_get_document_offsets() {
        let sentences = ["Foo bar. ", "Baz qux."];
        let analyzed = analyzed(&sentences);
        let mut rules = rules();

        let matches = dispatch(
            &mut rules,
            &ActivationState::default(),
            ParagraphMode::OnlySentence,
            &sentences,
            &analyzed,
            &context(),
            None,
        )
        .unwrap();

        let spans: Vec<_> = matches.iter().map(|x| x.span().clone()).collect();
        assert_eq!(spans, vec![0..1, 9..10]);
        assert_eq!(matches[1].column(), Some(10));
    }

    #[test]
    fn paragraph_mode_selects_rules() {
        let sentences = ["Foo bar. ", "Baz qux."];
        let analyzed = analyzed(&sentences);
        let mut rules = rules();

        let matches = dispatch(
            &mut rules,
            &ActivationState::default(),
            ParagraphMode::OnlyParagraph,
            &sentences,
            &analyzed,
            &context(),
            None,
        )
        .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule().id(), "EVERYTHING");
        assert_eq!(*matches[0].span(), 0..17);
        assert_eq!(matches[0].line(), Some(1));
        assert_eq!(matches[0].column(), Some(1));
        assert_eq!(matches[0].end_line(), Some(1));
        assert_eq!(matches[0].end_column(), Some(18));
    }

    #[test]
    fn inactive_rules_do_not_run() {
        let sentences = ["Foo bar."];
        let analyzed = analyzed(&sentences);
        let mut rules = rules();
        let mut activation = ActivationState::default();
        activation.disable_rule("EVERYTHING");

        let matches = dispatch(
            &mut rules,
            &activation,
            ParagraphMode::Normal,
            &sentences,
            &analyzed,
            &context(),
            None,
        )
        .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].rule().id(), "FIRST");
    }

    #[test]
    fn chunked_dispatch_gives_the_same_matches() {
        let sentences = ["One.\n", "Two. ", "Three\n\n", "Four. ", "Five."];
        let analyzed = analyzed(&sentences);

        let sequential = dispatch(
            &mut rules(),
            &ActivationState::default(),
            ParagraphMode::Normal,
            &sentences,
            &analyzed,
            &context(),
            None,
        )
        .unwrap();

        for chunk_size in 1..=6 {
            let chunked = dispatch(
                &mut rules(),
                &ActivationState::default(),
                ParagraphMode::Normal,
                &sentences,
                &analyzed,
                &context(),
                Some(chunk_size),
            )
            .unwrap();

            assert_eq!(chunked, sequential);
        }
    }

    #[test]
    fn chunks_carry_counters() {
        let chunks = plan_chunks(&["ab ", "c\nd ", "e"], 2, Counters::start(), false);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].range, 0..2);
        assert_eq!(chunks[0].counters, Counters::start());
        assert_eq!(chunks[1].range, 2..3);
        assert_eq!(
            chunks[1].counters,
            Counters {
                char_count: 7,
                line_count: 2,
                column_count: 3,
            }
        );
    }

    #[test]
    fn mismatched_input_fails_before_rules_run() {
        let analyzed = analyzed(&["Foo."]);

        assert!(matches!(
            dispatch(
                &mut rules(),
                &ActivationState::default(),
                ParagraphMode::Normal,
                &["Foo.", "Bar."],
                &analyzed,
                &context(),
                None,
            ),
            Err(Error::MismatchedInput {
                sentences: 2,
                analyzed: 1
            })
        ));
    }

    #[test]
    fn failing_rules_abort_with_preview() {
        let sentences = ["Foo bar."];
        let analyzed = analyzed(&sentences);
        let mut rules: Rules = vec![Rule::sentence("FAILING", Failing)].into_iter().collect();

        let error = dispatch(
            &mut rules,
            &ActivationState::default(),
            ParagraphMode::Normal,
            &sentences,
            &analyzed,
            &Context {
                preview_len: 6,
                ..context()
            },
            None,
        )
        .unwrap_err();

        match error {
            Error::Sentence { preview, source } => {
                assert_eq!(preview, "Foo...");
                assert!(matches!(*source, Error::Rule { .. }));
            }
            _ => panic!("unexpected error: {}", error),
        }
    }
}
