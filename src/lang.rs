//! Languages: the linguistic components and built-in rules used to check text.

use derivative::Derivative;

use crate::components::{
    disambiguator::RuleDisambiguator,
    tagger::DictionaryTagger,
    tokenizer::{SentenceSplitter, WordSplitter},
    Chunker, Disambiguator, SentenceTokenizer, Tagger, WordTokenizer,
};
use crate::rule::Rule;
use crate::utils::regex::Regex;

pub mod generic;

const ERROR_MSG: &str = "built-in resources are pre-tested.";

/// Bundles the components which turn text into analyzed sentences, plus a factory for the
/// language's built-in rules.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct Language {
    code: String,
    #[derivative(Debug = "ignore")]
    sentence_tokenizer: Box<dyn SentenceTokenizer>,
    #[derivative(Debug = "ignore")]
    word_tokenizer: Box<dyn WordTokenizer>,
    #[derivative(Debug = "ignore")]
    tagger: Box<dyn Tagger>,
    #[derivative(Debug = "ignore")]
    chunker: Option<Box<dyn Chunker>>,
    #[derivative(Debug = "ignore")]
    disambiguator: Box<dyn Disambiguator>,
    ignored_characters: Option<Regex>,
    #[derivative(Debug = "ignore")]
    rules: fn() -> Vec<Rule>,
}

impl Language {
    /// Starts building a language with default components and no built-in rules.
    pub fn builder<S: Into<String>>(code: S) -> LanguageBuilder {
        LanguageBuilder {
            language: Language {
                code: code.into(),
                sentence_tokenizer: Box::new(SentenceSplitter::default()),
                word_tokenizer: Box::new(WordSplitter::default()),
                tagger: Box::new(DictionaryTagger::default()),
                chunker: None,
                disambiguator: Box::new(RuleDisambiguator::default()),
                ignored_characters: None,
                rules: Vec::new,
            },
        }
    }

    /// The language code, e. g. `en`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn sentence_tokenizer(&self) -> &dyn SentenceTokenizer {
        self.sentence_tokenizer.as_ref()
    }

    pub fn word_tokenizer(&self) -> &dyn WordTokenizer {
        self.word_tokenizer.as_ref()
    }

    pub fn tagger(&self) -> &dyn Tagger {
        self.tagger.as_ref()
    }

    pub fn chunker(&self) -> Option<&dyn Chunker> {
        self.chunker.as_deref()
    }

    pub fn disambiguator(&self) -> &dyn Disambiguator {
        self.disambiguator.as_ref()
    }

    /// Characters stripped from tokens before tagging, e. g. soft hyphens.
    pub fn ignored_characters(&self) -> Option<&Regex> {
        self.ignored_characters.as_ref()
    }

    /// Creates fresh instances of the built-in rules.
    pub fn rules(&self) -> Vec<Rule> {
        (self.rules)()
    }
}

/// Builds a [Language]. Components which are not set keep their defaults.
pub struct LanguageBuilder {
    language: Language,
}

impl LanguageBuilder {
    pub fn sentence_tokenizer<T: SentenceTokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.language.sentence_tokenizer = Box::new(tokenizer);
        self
    }

    pub fn word_tokenizer<T: WordTokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.language.word_tokenizer = Box::new(tokenizer);
        self
    }

    pub fn tagger<T: Tagger + 'static>(mut self, tagger: T) -> Self {
        self.language.tagger = Box::new(tagger);
        self
    }

    pub fn chunker<C: Chunker + 'static>(mut self, chunker: C) -> Self {
        self.language.chunker = Some(Box::new(chunker));
        self
    }

    pub fn disambiguator<D: Disambiguator + 'static>(mut self, disambiguator: D) -> Self {
        self.language.disambiguator = Box::new(disambiguator);
        self
    }

    pub fn ignored_characters(mut self, regex: Regex) -> Self {
        self.language.ignored_characters = Some(regex);
        self
    }

    /// Sets the factory creating the built-in rules.
    pub fn rules(mut self, rules: fn() -> Vec<Rule>) -> Self {
        self.language.rules = rules;
        self
    }

    pub fn build(self) -> Language {
        self.language
    }
}
