//! A language without language specific resources. Checks typography, casing, repeated words
//! and unpaired brackets.

use super::{Language, ERROR_MSG};
use crate::components::{
    disambiguator::RuleDisambiguator,
    tagger::DictionaryTagger,
    tokenizer::{SentenceSplitter, WordSplitter},
};
use crate::rule::builtin;
use crate::utils::regex::Regex;

/// Readings of frequent English function words.
const DICTIONARY: &str = "\
# word\tlemma\ttag
a\ta\tDT
an\tan\tDT
the\tthe\tDT
this\tthis\tDT
that\tthat\tDT
is\tbe\tVBZ
are\tbe\tVBP
was\tbe\tVBD
be\tbe\tVB
it\tit\tPRP
he\the\tPRP
she\tshe\tPRP
we\twe\tPRP
they\tthey\tPRP
i\tI\tPRP
you\tyou\tPRP
and\tand\tCC
or\tor\tCC
but\tbut\tCC
of\tof\tIN
in\tin\tIN
on\ton\tIN
for\tfor\tIN
to\tto\tTO
not\tnot\tRB
here\there\tRB
there\tthere\tEX
";

/// Soft hyphens are stripped from tokens before tagging.
pub const IGNORED_CHARACTERS: &str = "\u{AD}";

pub fn tagger() -> DictionaryTagger {
    DictionaryTagger::from_dump(DICTIONARY)
        .expect(ERROR_MSG)
        .with_punctuation_tag("PCT")
}

pub fn language() -> Language {
    Language::builder("generic")
        .sentence_tokenizer(SentenceSplitter::default())
        .word_tokenizer(WordSplitter::default())
        .tagger(tagger())
        .disambiguator(RuleDisambiguator::default())
        .ignored_characters(Regex::new(IGNORED_CHARACTERS).expect(ERROR_MSG))
        .rules(builtin::rules)
        .build()
}
