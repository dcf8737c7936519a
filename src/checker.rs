//! A checking session: owns the rules and the activation state and runs checks.

use fnv::FnvHashSet;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::analysis::{self, UnknownWords};
use crate::annotated::AnnotatedText;
use crate::dispatch::{dispatch, Context};
use crate::lang::Language;
use crate::rule::{activation::ActivationState, id::Selector, Rule};
use crate::rules::{Rules, RulesIter, RulesIterMut};
use crate::types::{apply_matches, RuleMatch, Sentence};
use crate::Error;

/// Selects which kinds of rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphMode {
    /// Sentence rules and text rules.
    Normal,
    /// Only text rules.
    OnlyParagraph,
    /// Only sentence rules.
    OnlySentence,
}

impl Default for ParagraphMode {
    fn default() -> Self {
        ParagraphMode::Normal
    }
}

impl ParagraphMode {
    pub fn runs_text_rules(self) -> bool {
        self != ParagraphMode::OnlySentence
    }

    pub fn runs_sentence_rules(self) -> bool {
        self != ParagraphMode::OnlyParagraph
    }
}

impl FromStr for ParagraphMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "normal" => ParagraphMode::Normal,
            "only_paragraph" => ParagraphMode::OnlyParagraph,
            "only_sentence" => ParagraphMode::OnlySentence,
            _ => return Err(Error::UnknownParagraphMode(s.to_owned())),
        })
    }
}

impl fmt::Display for ParagraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParagraphMode::Normal => "normal",
            ParagraphMode::OnlyParagraph => "only_paragraph",
            ParagraphMode::OnlySentence => "only_sentence",
        })
    }
}

/// Options of a [Checker].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerOptions {
    /// Whether to collect words without any reading. See [Checker::unknown_words].
    pub list_unknown_words: bool,
    /// Checks this many sentences per work item. Without a chunk size, sentences are checked
    /// sequentially.
    pub chunk_size: Option<usize>,
    /// Maximum length of the sentence preview in errors.
    pub preview_len: usize,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            list_unknown_words: false,
            chunk_size: None,
            preview_len: 200,
        }
    }
}

/// Checks text with the built-in rules of a [Language] and the rules added to it.
///
/// Enabling and disabling rules changes the session state and takes effect on the next check.
#[derive(Debug)]
pub struct Checker {
    language: Language,
    rules: Rules,
    activation: ActivationState,
    options: CheckerOptions,
    unknown_words: UnknownWords,
    sentence_count: usize,
}

impl Checker {
    /// Creates a checker with default options.
    pub fn new(language: Language) -> Self {
        Checker::with_options(language, CheckerOptions::default())
    }

    pub fn with_options(language: Language, options: CheckerOptions) -> Self {
        let rules: Rules = language.rules().into_iter().collect();
        info!(
            "created checker for '{}' with {} built-in rules",
            language.code(),
            rules.len()
        );

        Checker {
            unknown_words: UnknownWords::new(options.list_unknown_words),
            language,
            rules,
            activation: ActivationState::default(),
            options,
            sentence_count: 0,
        }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// The explicit enable / disable decisions of this session.
    pub fn activation(&self) -> &ActivationState {
        &self.activation
    }

    /// Replaces all enable / disable decisions, e. g. with ones loaded from a file.
    pub fn set_activation(&mut self, activation: ActivationState) {
        self.activation = activation;
    }

    /// Adds a rule used by the next checks.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Disables the rules with the ID. Unknown IDs are ignored.
    pub fn disable_rule<S: Into<String>>(&mut self, id: S) {
        self.activation.disable_rule(id);
    }

    pub fn disable_rules<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.activation.disable_rule(id);
        }
    }

    /// Removes an explicit disable of the rules with the ID.
    /// Rules which are off by default stay off, see [Checker::enable_rule].
    pub fn restore_rule(&mut self, id: &str) {
        self.activation.restore_rule(id);
    }

    /// Enables rules which are off by default. Does not override [Checker::disable_rule].
    pub fn enable_rule<S: Into<String>>(&mut self, id: S) {
        self.activation.enable_rule(id);
    }

    /// Disables all rules in the category.
    pub fn disable_category<S: Into<String>>(&mut self, category: S) {
        self.activation.disable_category(category);
    }

    /// Removes an explicit disable of the category.
    pub fn enable_category(&mut self, category: &str) {
        self.activation.enable_category(category);
    }

    pub fn disabled_rules(&self) -> &FnvHashSet<String> {
        self.activation.disabled_rules()
    }

    pub fn disabled_categories(&self) -> &FnvHashSet<String> {
        self.activation.disabled_categories()
    }

    pub fn enabled_rules(&self) -> &FnvHashSet<String> {
        self.activation.enabled_rules()
    }

    /// All built-in and added rules. Resets the state of every rule.
    pub fn all_rules(&mut self) -> &[Rule] {
        self.rules.reset();
        self.rules.rules()
    }

    /// All rules which are currently active. Resets the state of every rule.
    pub fn all_active_rules(&mut self) -> Vec<&Rule> {
        self.rules.reset();
        let activation = &self.activation;

        self.rules
            .iter()
            .filter(|rule| activation.is_active(rule))
            .collect()
    }

    /// Returns an iterator over all rules matching the selector.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> RulesIter<'a> {
        self.rules.select(selector)
    }

    /// Returns an iterator over all rules matching the selector (mutable).
    pub fn select_mut<'a>(&'a mut self, selector: &'a Selector) -> RulesIterMut<'a> {
        self.rules.select_mut(selector)
    }

    /// Splits the text into sentences.
    pub fn sentence_tokenize<'t>(&self, text: &'t str) -> Result<Vec<&'t str>, Error> {
        self.language
            .sentence_tokenizer()
            .tokenize(text)
            .map_err(|source| Error::Analysis {
                component: "sentence tokenizer",
                source,
            })
    }

    /// Splits the text into sentences and analyzes them.
    pub fn analyze_text(&self, text: &str) -> Result<Vec<Sentence>, Error> {
        let sentences = self.sentence_tokenize(text)?;
        analysis::analyze_sentences(&self.language, &sentences, &mut UnknownWords::new(false))
    }

    /// Analyzes one sentence including disambiguation.
    pub fn analyze_sentence(&self, sentence: &str) -> Result<Sentence, Error> {
        analysis::analyze(&self.language, sentence)
    }

    /// Analyzes one sentence without disambiguation.
    pub fn raw_analyze_sentence(&self, sentence: &str) -> Result<Sentence, Error> {
        analysis::analyze_raw(&self.language, sentence)
    }

    /// The number of sentences of the last check.
    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    /// The words without any reading in the last check, sorted alphabetically.
    ///
    /// # Errors
    /// - If the checker was not created with `list_unknown_words`.
    pub fn unknown_words(&self) -> Result<Vec<String>, Error> {
        self.unknown_words.sorted()
    }

    /// Checks a text split into sentences with all kinds of rules.
    pub fn check(&mut self, text: &str) -> Result<Vec<RuleMatch>, Error> {
        self.check_text(text, true, ParagraphMode::Normal)
    }

    /// Checks a text. Without `tokenize`, the whole text is treated as one sentence.
    pub fn check_text(
        &mut self,
        text: &str,
        tokenize: bool,
        mode: ParagraphMode,
    ) -> Result<Vec<RuleMatch>, Error> {
        self.check_annotated(&AnnotatedText::plain(text), tokenize, mode)
    }

    /// Checks a text with markup. Matches are reported in positions of the original text.
    ///
    /// The state of all rules is reset first, so text rules only see this text.
    pub fn check_annotated(
        &mut self,
        text: &AnnotatedText,
        tokenize: bool,
        mode: ParagraphMode,
    ) -> Result<Vec<RuleMatch>, Error> {
        self.rules.reset();
        self.run(text, tokenize, mode)
    }

    /// Like [Checker::check_annotated] but keeps the state of the rules, for checking a
    /// continuous document in pieces.
    pub fn check_continuation(
        &mut self,
        text: &AnnotatedText,
        tokenize: bool,
        mode: ParagraphMode,
    ) -> Result<Vec<RuleMatch>, Error> {
        self.run(text, tokenize, mode)
    }

    fn run(
        &mut self,
        text: &AnnotatedText,
        tokenize: bool,
        mode: ParagraphMode,
    ) -> Result<Vec<RuleMatch>, Error> {
        self.unknown_words.clear();

        let plain_text = text.plain_text();
        let sentences = if tokenize {
            self.sentence_tokenize(plain_text)?
        } else {
            vec![plain_text]
        };

        // a failed analysis must not leave the words of the sentences before the failure
        let analyzed =
            analysis::analyze_sentences(&self.language, &sentences, &mut self.unknown_words)
                .map_err(|error| {
                    self.unknown_words.clear();
                    error
                })?;
        self.sentence_count = sentences.len();

        debug!(
            "checking {} sentences with {} of {} rules",
            sentences.len(),
            self.rules
                .iter()
                .filter(|rule| self.activation.is_active(rule))
                .count(),
            self.rules.len()
        );

        let context = Context {
            annotated: Some(text),
            single_line_breaks_marks_paragraph: self
                .language
                .sentence_tokenizer()
                .single_line_breaks_marks_paragraph(),
            preview_len: self.options.preview_len,
        };

        let mut matches = dispatch(
            &mut self.rules,
            &self.activation,
            mode,
            &sentences,
            &analyzed,
            &context,
            self.options.chunk_size,
        )?;
        matches.sort_by_key(|x| x.span().start);

        Ok(matches)
    }

    /// Corrects a text by applying the first replacement of every match.
    /// Overlapping matches are skipped.
    pub fn correct(&mut self, text: &str) -> Result<String, Error> {
        let matches = self.check(text)?;
        Ok(apply_matches(text, &matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{SentenceTokenizer, Tagger};
    use crate::lang::generic;
    use crate::rule::{id::Category, RawMatch, SentenceRule};
    use crate::types::Word;
    use crate::OtherError;
    use std::convert::TryFrom;

    struct First;

    impl SentenceRule for First {
        fn match_sentence(&self, _sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
            Ok(vec![RawMatch::new(0..1, "first")])
        }
    }

    fn checker() -> Checker {
        let mut checker = Checker::new(Language::builder("xx").build());
        checker.add_rule(Rule::sentence("FIRST", First).with_category(Category::new("TEST")));
        checker.add_rule(Rule::sentence("OFF", First).with_default_off());
        checker
    }

    #[test]
    fn paragraph_modes_parse() {
        for mode in &[
            ParagraphMode::Normal,
            ParagraphMode::OnlyParagraph,
            ParagraphMode::OnlySentence,
        ] {
            assert_eq!(mode.to_string().parse::<ParagraphMode>().unwrap(), *mode);
        }
        assert!("sometimes".parse::<ParagraphMode>().is_err());
    }

    #[test]
    fn options_have_defaults() {
        let options: CheckerOptions = serde_json::from_str(r#"{"chunk_size": 4}"#).unwrap();

        assert_eq!(options.chunk_size, Some(4));
        assert_eq!(options.preview_len, 200);
        assert!(!options.list_unknown_words);
    }

    #[test]
    fn default_off_rules_need_enabling() {
        let mut checker = checker();

        assert_eq!(checker.check("Foo bar.").unwrap().len(), 1);

        checker.enable_rule("OFF");
        assert_eq!(checker.check("Foo bar.").unwrap().len(), 2);
        assert_eq!(checker.all_active_rules().len(), 2);
    }

    #[test]
    fn disabled_rules_can_be_restored() {
        let mut checker = checker();

        checker.disable_rules(vec!["FIRST", "UNKNOWN"]);
        assert!(checker.check("Foo bar.").unwrap().is_empty());
        assert!(checker.disabled_rules().contains("UNKNOWN"));

        checker.restore_rule("FIRST");
        assert_eq!(checker.check("Foo bar.").unwrap().len(), 1);
    }

    #[test]
    fn categories_can_be_disabled() {
        let mut checker = checker();

        checker.disable_category("TEST");
        checker.enable_rule("FIRST");
        assert!(checker.check("Foo bar.").unwrap().is_empty());

        checker.enable_category("TEST");
        assert_eq!(checker.check("Foo bar.").unwrap().len(), 1);
        assert!(checker.disabled_categories().is_empty());
    }

    #[test]
    fn rules_can_be_selected() {
        let mut checker = checker();
        let selector = Selector::try_from("OFF").unwrap();

        checker.select_mut(&selector).for_each(Rule::set_default_on);

        assert_eq!(checker.select(&selector).count(), 1);
        assert_eq!(checker.check("Foo bar.").unwrap().len(), 2);
        assert_eq!(checker.all_rules().len(), 2);
    }

    #[test]
    fn text_can_be_checked_as_one_sentence() {
        let mut checker = checker();

        let split = checker
            .check_text("Foo. Bar.", true, ParagraphMode::Normal)
            .unwrap();
        assert_eq!(split.len(), 2);
        assert_eq!(checker.sentence_count(), 2);

        let whole = checker
            .check_text("Foo. Bar.", false, ParagraphMode::Normal)
            .unwrap();
        assert_eq!(whole.len(), 1);
        assert_eq!(checker.sentence_count(), 1);
    }

    #[test]
    fn unknown_words_need_to_be_enabled() {
        let mut checker = checker();
        checker.check("Foo bar.").unwrap();

        assert!(matches!(
            checker.unknown_words(),
            Err(Error::UnknownWordsDisabled)
        ));
    }

    /// Fails on the word "fail", leaves every other word without readings.
    struct Picky;

    impl Tagger for Picky {
        fn tag(&self, tokens: &[String]) -> Result<Vec<Word>, OtherError> {
            tokens
                .iter()
                .map(|token| {
                    if token == "fail" {
                        Err("cannot tag".into())
                    } else {
                        Ok(Word::new_with_tags(token.as_str(), Vec::new()))
                    }
                })
                .collect()
        }
    }

    /// Fails on texts containing "fail".
    struct PickySplitter;

    impl SentenceTokenizer for PickySplitter {
        fn tokenize<'t>(&self, text: &'t str) -> Result<Vec<&'t str>, OtherError> {
            if text.contains("fail") {
                Err("cannot split".into())
            } else {
                Ok(vec![text])
            }
        }
    }

    fn listing(language: Language) -> Checker {
        let options = CheckerOptions {
            list_unknown_words: true,
            ..CheckerOptions::default()
        };
        Checker::with_options(language, options)
    }

    #[test]
    fn failed_analysis_forgets_unknown_words() {
        let mut checker = listing(Language::builder("xx").tagger(Picky).build());

        checker.check("Foo bar.").unwrap();
        assert!(checker.unknown_words().unwrap().contains(&"Foo".to_owned()));

        assert!(checker.check("Foo. Bar fail.").is_err());
        assert!(checker.unknown_words().unwrap().is_empty());
    }

    #[test]
    fn failed_sentence_tokenization_forgets_unknown_words() {
        let mut checker = listing(
            Language::builder("xx")
                .sentence_tokenizer(PickySplitter)
                .build(),
        );

        checker.check("Foo bar.").unwrap();
        assert!(!checker.unknown_words().unwrap().is_empty());

        assert!(checker.check("Foo fail.").is_err());
        assert!(checker.unknown_words().unwrap().is_empty());
    }

    #[test]
    fn texts_are_corrected() {
        let mut checker = Checker::new(generic::language());

        assert_eq!(
            checker.correct("It is is a test .").unwrap(),
            "It is a test."
        );
    }

    #[test]
    fn texts_are_analyzed() {
        let checker = Checker::new(generic::language());
        let sentences = checker.analyze_text("The house. A tree.").unwrap();

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].tokens()[1].word().tags[0].pos, "DT");
        assert!(sentences[1].tokens().last().unwrap().is_paragraph_end());
    }
}
