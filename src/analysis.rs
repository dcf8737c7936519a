//! Turns raw sentences into analyzed [Sentence]s using the components of a [Language].

use fnv::{FnvHashMap, FnvHashSet};
use log::trace;

use crate::lang::Language;
use crate::types::{finalize, IncompleteToken, Sentence};
use crate::utils::regex::Regex;
use crate::{Error, OtherError};

fn failed(component: &'static str) -> impl FnOnce(OtherError) -> Error {
    move |source| Error::Analysis { component, source }
}

/// Removes the ignored characters from every token matching `regex`.
/// Returns the original form of each changed token by index.
fn strip_ignored(regex: Option<&Regex>, tokens: &mut [String]) -> FnvHashMap<usize, String> {
    let mut originals = FnvHashMap::default();

    if let Some(regex) = regex {
        for (i, token) in tokens.iter_mut().enumerate() {
            if regex.is_found(token) {
                let stripped = regex.remove_all(token);
                originals.insert(i, std::mem::replace(token, stripped));
            }
        }
    }

    originals
}

/// Analyzes a sentence without disambiguation: tokenizes it, strips ignored characters,
/// tags and chunks the tokens and marks the sentence boundaries.
///
/// Tokens which contained ignored characters keep their original form as an additional reading.
/// Token positions refer to the sentence *with* ignored characters.
pub fn analyze_raw(language: &Language, sentence: &str) -> Result<Sentence, Error> {
    let mut tokens = language
        .word_tokenizer()
        .tokenize(sentence)
        .map_err(failed("word tokenizer"))?;
    let originals = strip_ignored(language.ignored_characters(), &mut tokens);

    let words = language.tagger().tag(&tokens).map_err(failed("tagger"))?;
    if words.len() != tokens.len() {
        return Err(Error::Analysis {
            component: "tagger",
            source: format!("got {} words for {} tokens", words.len(), tokens.len()).into(),
        });
    }

    let mut start = 0;
    let mut prev_whitespace = false;
    let mut tokens: Vec<_> = words
        .into_iter()
        .enumerate()
        .map(|(i, mut word)| {
            let mut len = word.text.chars().count();
            if let Some(original) = originals.get(&i) {
                word.tags.push(language.tagger().create_token(original, None));
                len = original.chars().count();
            }

            let mut token = IncompleteToken::new(word, start);
            token.len = len;
            token.has_space_before = prev_whitespace;
            prev_whitespace = token.is_whitespace();

            start += token.len;
            token
        })
        .collect();

    if let Some(chunker) = language.chunker() {
        chunker
            .add_chunk_tags(&mut tokens)
            .map_err(failed("chunker"))?;
    }

    Ok(Sentence::new(finalize(tokens)))
}

/// Analyzes a sentence and disambiguates it.
pub fn analyze(language: &Language, sentence: &str) -> Result<Sentence, Error> {
    language
        .disambiguator()
        .disambiguate(analyze_raw(language, sentence)?)
        .map_err(failed("disambiguator"))
}

/// Analyzes consecutive sentences. The last token of the last sentence is marked as paragraph end.
pub fn analyze_sentences<S: AsRef<str>>(
    language: &Language,
    sentences: &[S],
    unknown_words: &mut UnknownWords,
) -> Result<Vec<Sentence>, Error> {
    let mut analyzed = Vec::with_capacity(sentences.len());

    for (i, sentence) in sentences.iter().enumerate() {
        let mut sentence = analyze(language, sentence.as_ref())?;
        unknown_words.remember(&sentence);

        if i + 1 == sentences.len() {
            sentence = sentence.with_paragraph_end();
        }

        trace!("{:?}", sentence);
        analyzed.push(sentence);
    }

    Ok(analyzed)
}

/// Collects the words no reading was found for.
#[derive(Debug, Clone, Default)]
pub struct UnknownWords {
    words: Option<FnvHashSet<String>>,
}

impl UnknownWords {
    pub fn new(enabled: bool) -> Self {
        UnknownWords {
            words: if enabled {
                Some(FnvHashSet::default())
            } else {
                None
            },
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.words.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(words) = &mut self.words {
            words.clear();
        }
    }

    /// Adds the untagged, non-whitespace tokens of the sentence. Does nothing if disabled.
    pub fn remember(&mut self, sentence: &Sentence) {
        if let Some(words) = &mut self.words {
            for token in sentence.tokens_without_whitespace() {
                if !token.is_tagged() {
                    words.insert(token.as_str().to_owned());
                }
            }
        }
    }

    /// The unknown words, sorted alphabetically.
    ///
    /// # Errors
    /// - If unknown words are not collected.
    pub fn sorted(&self) -> Result<Vec<String>, Error> {
        let mut words: Vec<_> = self
            .words
            .as_ref()
            .ok_or(Error::UnknownWordsDisabled)?
            .iter()
            .cloned()
            .collect();
        words.sort();
        Ok(words)
    }
}
