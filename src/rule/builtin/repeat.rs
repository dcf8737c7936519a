use crate::rule::{RawMatch, SentenceRule};
use crate::types::{Sentence, Token};
use crate::OtherError;

fn is_word(token: &Token) -> bool {
    token.as_str().chars().any(char::is_alphabetic)
}

/// Finds a word directly repeated after whitespace, e. g. `is is`.
pub struct WordRepeat;

impl SentenceRule for WordRepeat {
    fn match_sentence(&self, sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
        let words: Vec<_> = sentence
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, x)| !x.is_sentence_start() && !x.is_whitespace())
            .collect();

        Ok(words
            .windows(2)
            .filter(|w| {
                let ((i, first), (j, second)) = (w[0], w[1]);
                // only whitespace in between, no line break
                let separated = sentence.tokens()[i + 1..j].iter().all(|x| !x.is_linebreak());

                j > i + 1
                    && separated
                    && is_word(first)
                    && first.as_str().to_lowercase() == second.as_str().to_lowercase()
            })
            .map(|w| {
                let (first, second) = (w[0].1, w[1].1);

                RawMatch::new(
                    first.start()..second.span().end,
                    "Possible typo: you repeated a word.",
                )
                .with_short_message("Word repetition")
                .with_replacements(vec![first.as_str()])
            })
            .collect())
    }

    fn can_be_ignored_for(&self, sentence: &Sentence) -> bool {
        sentence.tokens_without_whitespace().filter(|x| is_word(x)).count() < 2
    }
}
