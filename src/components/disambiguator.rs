//! A simple rule-based disambiguator.

use serde::{Deserialize, Serialize};

use super::Disambiguator;
use crate::types::{Sentence, Word};
use crate::utils::regex::Regex;
use crate::OtherError;

/// Keeps only the readings matching `keep_pos` of words matching `word`.
/// Words which have no matching reading are left unchanged.
#[derive(Debug, Serialize, Deserialize)]
pub struct PosFilter {
    word: Regex,
    keep_pos: Regex,
}

impl PosFilter {
    /// Both regexes must match the whole word / tag.
    pub fn new(word: &str, keep_pos: &str) -> Result<Self, crate::Error> {
        Ok(PosFilter {
            word: Regex::new(word)?,
            keep_pos: Regex::new(keep_pos)?,
        })
    }

    fn apply(&self, word: &mut Word) {
        if !self.word.is_full_match(&word.text) {
            return;
        }

        if word.tags.iter().any(|x| self.keep_pos.is_full_match(&x.pos)) {
            let keep_pos = &self.keep_pos;
            word.tags.retain(|x| keep_pos.is_full_match(&x.pos));
        }
    }
}

/// Applies [PosFilter]s in order. Without filters, sentences pass through unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RuleDisambiguator {
    filters: Vec<PosFilter>,
}

impl RuleDisambiguator {
    pub fn new(filters: Vec<PosFilter>) -> Self {
        RuleDisambiguator { filters }
    }

    /// Gets all filters in the order they are applied.
    pub fn filters(&self) -> &[PosFilter] {
        &self.filters
    }
}

impl Disambiguator for RuleDisambiguator {
    fn disambiguate(&self, sentence: Sentence) -> Result<Sentence, OtherError> {
        if self.filters.is_empty() {
            return Ok(sentence);
        }

        Ok(sentence.map_words(|word| {
            for filter in &self.filters {
                filter.apply(word);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WordData;

    #[test]
    fn filters_keep_matching_readings() {
        let filter = PosFilter::new("(?:can|Can)", "MD").unwrap();
        let mut word = Word::new_with_tags(
            "can",
            vec![WordData::new("can", "NN"), WordData::new("can", "MD")],
        );

        filter.apply(&mut word);
        assert_eq!(word.tags, vec![WordData::new("can", "MD")]);
    }

    #[test]
    fn filters_keep_words_without_match() {
        let filter = PosFilter::new("can", "VB").unwrap();
        let mut word = Word::new_with_tags("can", vec![WordData::new("can", "NN")]);

        filter.apply(&mut word);
        assert_eq!(word.tags.len(), 1);
    }

    #[test]
    fn invalid_filters_fail() {
        assert!(PosFilter::new("(", "NN").is_err());
    }
}
