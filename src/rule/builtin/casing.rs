use crate::rule::{RawMatch, SentenceRule};
use crate::types::Sentence;
use crate::{utils, OtherError};

/// Finds sentences starting with a lowercase letter.
/// Words with uppercase letters after the first char (e. g. `iPhone`) are accepted.
pub struct UppercaseSentenceStart;

impl SentenceRule for UppercaseSentenceStart {
    fn match_sentence(&self, sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
        let first = match sentence.tokens_without_whitespace().next() {
            Some(token) => token,
            None => return Ok(Vec::new()),
        };
        let text = first.as_str();

        let starts_lowercase = text.chars().next().map_or(false, char::is_lowercase);
        let mixed_case = text.chars().skip(1).any(char::is_uppercase);

        if !starts_lowercase || mixed_case {
            return Ok(Vec::new());
        }

        let replacement = utils::apply_to_first(text, |c| c.to_uppercase().collect());

        Ok(vec![RawMatch::new(
            first.span(),
            "This sentence does not start with an uppercase letter.",
        )
        .with_short_message("Lowercase sentence start")
        .with_replacements(vec![replacement])])
    }
}
