//! Language independent rules.

use super::{id::Category, Rule};

mod brackets;
mod casing;
mod repeat;
mod whitespace;

pub use brackets::UnpairedBrackets;
pub use casing::UppercaseSentenceStart;
pub use repeat::WordRepeat;
pub use whitespace::{CommaParenthesisWhitespace, MultipleWhitespace};

/// Creates fresh instances of all built-in rules.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule::sentence("COMMA_PARENTHESIS_WHITESPACE", CommaParenthesisWhitespace)
            .with_category(Category::new("TYPOGRAPHY")),
        Rule::sentence("WHITESPACE_RULE", MultipleWhitespace)
            .with_category(Category::new("TYPOGRAPHY")),
        Rule::sentence("WORD_REPEAT_RULE", WordRepeat).with_category(Category::new("MISC")),
        Rule::sentence("UPPERCASE_SENTENCE_START", UppercaseSentenceStart)
            .with_category(Category::new("CASING")),
        Rule::text("UNPAIRED_BRACKETS", UnpairedBrackets::default())
            .with_category(Category::new("PUNCTUATION")),
    ]
}
