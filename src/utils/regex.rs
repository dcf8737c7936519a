use onig::{Regex as OnigRegex, RegexOptions, SearchOptions};
use serde::{Deserialize, Serialize, Serializer};
use std::{convert::TryFrom, fmt, ops::Deref};

/// A regular expression in Java syntax which keeps its source string, so it can be serialized.
/// A trailing `(?i)` makes it case insensitive.
#[derive(Deserialize)]
#[serde(try_from = "String")]
pub struct Regex {
    string: String,
    regex: OnigRegex,
}

impl TryFrom<String> for Regex {
    type Error = onig::Error;

    fn try_from(string: String) -> Result<Self, onig::Error> {
        Ok(Regex {
            regex: Regex::compile(&string)?,
            string,
        })
    }
}

impl Serialize for Regex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.string)
    }
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Regex({:?})", self.string)
    }
}

impl PartialEq for Regex {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Regex {
    pub fn new(regex_str: &str) -> Result<Self, onig::Error> {
        Regex::try_from(regex_str.to_owned())
    }

    fn compile(regex_str: &str) -> Result<OnigRegex, onig::Error> {
        let mut case_sensitive = true;
        let regex_str = if let Some(stripped) = regex_str.strip_suffix("(?i)") {
            case_sensitive = false;
            stripped
        } else {
            regex_str
        };

        OnigRegex::with_options(
            regex_str,
            if case_sensitive {
                RegexOptions::REGEX_OPTION_NONE
            } else {
                RegexOptions::REGEX_OPTION_IGNORECASE
            },
            onig::Syntax::java(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }

    /// Whether the regex matches anywhere in the text.
    pub fn is_found(&self, text: &str) -> bool {
        self.regex.find(text).is_some()
    }

    /// Whether the regex matches the whole text.
    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex
            .match_with_options(text, 0, SearchOptions::SEARCH_OPTION_NONE, None)
            == Some(text.len())
    }

    pub fn remove_all(&self, text: &str) -> String {
        self.regex.replace_all(text, "")
    }
}

impl Deref for Regex {
    type Target = OnigRegex;

    fn deref(&self) -> &Self::Target {
        &self.regex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regexes_find_and_remove() {
        let regex = Regex::new("\u{AD}").unwrap();

        assert!(regex.is_found("Sil\u{AD}ben"));
        assert!(!regex.is_found("Silben"));
        assert_eq!(regex.remove_all("Sil\u{AD}ben"), "Silben");
    }

    #[test]
    fn regexes_can_be_case_insensitive() {
        let regex = Regex::new("NN.*(?i)").unwrap();

        assert!(regex.is_full_match("nns"));
        assert!(!Regex::new("NN").unwrap().is_full_match("NNS"));
    }

    #[test]
    fn regexes_serialize_as_strings() {
        let regex = Regex::new("a+b").unwrap();
        let json = serde_json::to_string(&regex).unwrap();

        assert_eq!(json, r#""a+b""#);
        assert_eq!(serde_json::from_str::<Regex>(&json).unwrap(), regex);
        assert!(serde_json::from_str::<Regex>(r#""(""#).is_err());
    }
}
