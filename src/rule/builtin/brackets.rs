use crate::rule::{RawMatch, TextRule};
use crate::types::Sentence;
use crate::OtherError;

const PAIRS: &[(&str, &str)] = &[("(", ")"), ("[", "]"), ("{", "}"), ("“", "”"), ("«", "»")];

fn message(symbol: &str) -> String {
    format!("Unpaired symbol: '{}' seems to be missing", symbol)
}

/// Finds brackets and quotes which are opened but never closed or closed but never opened.
///
/// Symbols still open at the end of a text are kept, so a closing symbol in a text checked as
/// continuation of this one is accepted. [TextRule::reset] forgets them.
#[derive(Debug, Default)]
pub struct UnpairedBrackets {
    /// Indices into [PAIRS] of symbols left open by previous texts.
    carried: Vec<usize>,
}

impl TextRule for UnpairedBrackets {
    fn match_text(&mut self, sentences: &[Sentence]) -> Result<Vec<RawMatch>, OtherError> {
        // (index into PAIRS, char position) of the symbols opened in this text
        let mut open: Vec<(usize, usize)> = Vec::new();
        let mut matches = Vec::new();
        let mut position = 0;

        for token in sentences.iter().flat_map(|x| x.tokens()) {
            let text = token.as_str();

            if let Some(pair) = PAIRS.iter().position(|(opening, _)| *opening == text) {
                open.push((pair, position));
            } else if let Some(pair) = PAIRS.iter().position(|(_, closing)| *closing == text) {
                match open.last() {
                    Some((last, _)) if *last == pair => {
                        open.pop();
                    }
                    None if self.carried.last() == Some(&pair) => {
                        self.carried.pop();
                    }
                    _ => matches.push(
                        RawMatch::new(position..position + 1, message(PAIRS[pair].0))
                            .with_short_message("Unpaired symbol"),
                    ),
                }
            }

            position += token.span().len();
        }

        for (pair, start) in &open {
            matches.push(
                RawMatch::new(*start..*start + 1, message(PAIRS[*pair].1))
                    .with_short_message("Unpaired symbol"),
            );
        }
        self.carried.extend(open.into_iter().map(|(pair, _)| pair));

        matches.sort_by_key(|x| x.span().start);
        Ok(matches)
    }

    fn reset(&mut self) {
        self.carried.clear();
    }
}
