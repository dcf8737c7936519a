use crate::rule::{RawMatch, SentenceRule};
use crate::types::{Sentence, Token};
use crate::OtherError;

const NO_SPACE_BEFORE: &[&str] = &[",", ".", ";", ":", "!", "?", ")", "]", "}"];
const NO_SPACE_AFTER: &[&str] = &["(", "[", "{"];

fn is_space(token: &Token) -> bool {
    token.is_whitespace() && !token.is_linebreak()
}

/// Finds a space before closing punctuation (`word ,`) or after an opening parenthesis (`( word`).
pub struct CommaParenthesisWhitespace;

impl SentenceRule for CommaParenthesisWhitespace {
    fn match_sentence(&self, sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
        let tokens = sentence.tokens();
        let mut matches = Vec::new();

        for (i, window) in tokens.windows(2).enumerate() {
            let (prev, token) = (&window[0], &window[1]);
            let next = tokens.get(i + 2);

            if is_space(prev)
                && NO_SPACE_BEFORE.contains(&token.as_str())
                && i > 1
                && !tokens[i - 1].is_whitespace()
            {
                // ellipses like "and ..." are fine
                if token.as_str() == "." && next.map_or(false, |x| x.as_str() == ".") {
                    continue;
                }

                matches.push(
                    RawMatch::new(prev.span(), format!("Don't put a space before '{}'.", token.as_str()))
                        .with_short_message("Space before punctuation")
                        .with_replacements(vec![""]),
                );
            }

            if NO_SPACE_AFTER.contains(&prev.as_str())
                && is_space(token)
                && next.map_or(false, |x| !x.is_whitespace())
            {
                matches.push(
                    RawMatch::new(token.span(), format!("Don't put a space after '{}'.", prev.as_str()))
                        .with_short_message("Space after parenthesis")
                        .with_replacements(vec![""]),
                );
            }
        }

        Ok(matches)
    }
}

/// Finds runs of more than one space inside a line.
pub struct MultipleWhitespace;

impl SentenceRule for MultipleWhitespace {
    fn match_sentence(&self, sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
        let tokens = sentence.tokens();
        let mut matches = Vec::new();
        let mut i = 1;

        while i < tokens.len() {
            if !is_space(&tokens[i]) {
                i += 1;
                continue;
            }

            let run_start = i;
            while i < tokens.len() && is_space(&tokens[i]) {
                i += 1;
            }

            // indentation at the start of a sentence or line is not flagged
            let indented = run_start == 1 || tokens[run_start - 1].is_linebreak();
            if i - run_start > 1 && !indented {
                let span = tokens[run_start].start()..tokens[i - 1].span().end;
                matches.push(
                    RawMatch::new(span, "Possible typo: you repeated a whitespace.")
                        .with_short_message("Repeated whitespace")
                        .with_replacements(vec![" "]),
                );
            }
        }

        Ok(matches)
    }

    fn can_be_ignored_for(&self, sentence: &Sentence) -> bool {
        !sentence
            .tokens()
            .windows(2)
            .any(|w| is_space(&w[0]) && is_space(&w[1]))
    }
}
