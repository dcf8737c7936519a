//! A tagger looking up readings in a dictionary.

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use super::Tagger;
use crate::types::{is_whitespace, Word, WordData};
use crate::OtherError;

/// Assigns readings by dictionary lookup. Words which are not found as-is are looked up in
/// lower case. Tokens consisting only of punctuation get the `punctuation_tag`, if one is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryTagger {
    tags: FnvHashMap<String, Vec<WordData>>,
    #[serde(default)]
    punctuation_tag: Option<String>,
}

impl DictionaryTagger {
    pub fn new() -> Self {
        DictionaryTagger::default()
    }

    /// Tags tokens without letters or digits with `tag`.
    pub fn with_punctuation_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.punctuation_tag = Some(tag.into());
        self
    }

    /// Adds a reading of `word`.
    pub fn add<S: Into<String>>(&mut self, word: S, data: WordData) {
        let entry = self.tags.entry(word.into()).or_insert_with(Vec::new);
        if !entry.contains(&data) {
            entry.push(data);
        }
    }

    /// Parses a dictionary dump with one `word<TAB>lemma<TAB>tag` entry per line.
    /// Empty lines and lines starting with `#` are skipped.
    pub fn from_dump(dump: &str) -> Result<Self, OtherError> {
        let mut tagger = DictionaryTagger::default();

        for (i, line) in dump.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split('\t').collect::<Vec<_>>().as_slice() {
                [word, lemma, tag] => tagger.add(*word, WordData::new(*lemma, *tag)),
                _ => return Err(format!("invalid dictionary entry in line {}: {:?}", i + 1, line).into()),
            }
        }

        Ok(tagger)
    }

    /// Gets the readings of one word.
    pub fn get_tags(&self, word: &str) -> Vec<WordData> {
        if let Some(tags) = self.tags.get(word) {
            return tags.clone();
        }

        let lower = word.to_lowercase();
        if lower != word {
            if let Some(tags) = self.tags.get(&lower) {
                return tags.clone();
            }
        }

        match &self.punctuation_tag {
            Some(tag) if !is_whitespace(word) && !word.chars().any(char::is_alphanumeric) => {
                vec![WordData::new(word, tag.as_str())]
            }
            _ => Vec::new(),
        }
    }
}

impl Tagger for DictionaryTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<Word>, OtherError> {
        Ok(tokens
            .iter()
            .map(|token| Word::new_with_tags(token.as_str(), self.get_tags(token)))
            .collect())
    }
}
