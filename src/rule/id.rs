//! Provides structures to identify rules and categories and a [Selector] to match on them.
//!
//! Rules which are variations of one another share an ID and are told apart by a sub ID.
//! Rules sharing an ID form a *rule group*.

use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

use super::Rule;

#[derive(Debug, Clone, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("error parsing selector from string: {0}")]
    ParseStringError(String),
}

/// Identifies a category of rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    /// Creates a new category identifier.
    pub fn new<S: Into<String>>(category: S) -> Self {
        Category(category.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a rule by its ID and optional sub ID.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId {
    id: String,
    sub_id: Option<String>,
}

impl RuleId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        RuleId {
            id: id.into(),
            sub_id: None,
        }
    }

    /// Creates an identifier for one rule of a rule group.
    pub fn with_sub_id<S: Into<String>>(mut self, sub_id: S) -> Self {
        self.sub_id = Some(sub_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sub_id(&self) -> Option<&str> {
        self.sub_id.as_deref()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_id {
            Some(sub_id) => write!(f, "{}[{}]", self.id, sub_id),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A *selector* to filter rules.
/// Parses from `ID`, `ID[SUB_ID]` or `category:CATEGORY`.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    /// Selects all rules in a category.
    Category(Category),
    /// Selects all rules with an ID, regardless of sub ID.
    Rule(String),
    /// Selects the rules with an ID and a sub ID.
    SubRule(RuleId),
}

impl From<Category> for Selector {
    fn from(category: Category) -> Self {
        Selector::Category(category)
    }
}

impl From<RuleId> for Selector {
    fn from(id: RuleId) -> Self {
        match id.sub_id {
            Some(_) => Selector::SubRule(id),
            None => Selector::Rule(id.id),
        }
    }
}

impl TryFrom<&str> for Selector {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let invalid = || Error::ParseStringError(value.to_owned());

        if let Some(category) = value.strip_prefix("category:") {
            if category.is_empty() {
                return Err(invalid());
            }
            return Ok(Selector::Category(Category::new(category)));
        }

        Ok(match value.find('[') {
            Some(0) => return Err(invalid()),
            Some(i) => {
                let sub_id = value[i + 1..].strip_suffix(']').ok_or_else(invalid)?;
                if sub_id.is_empty() || sub_id.contains(|c: char| c == '[' || c == ']') {
                    return Err(invalid());
                }
                Selector::SubRule(RuleId::new(&value[..i]).with_sub_id(sub_id))
            }
            None if value.is_empty() || value.contains(']') => return Err(invalid()),
            None => Selector::Rule(value.to_owned()),
        })
    }
}

impl TryFrom<String> for Selector {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Selector::try_from(value.as_str())
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        match &selector {
            Selector::Category(x) => format!("category:{}", x),
            Selector::Rule(x) => x.clone(),
            Selector::SubRule(x) => format!("{}", x),
        }
    }
}

impl Selector {
    /// Determines whether a rule matches this selector. It matches iff:
    /// 1. the rule is in the category (if this is a category selector)
    /// 2. the rule has the ID (if this is a rule selector)
    /// 3. the rule has the ID and the sub ID (if this is a sub rule selector)
    pub fn is_match(&self, rule: &Rule) -> bool {
        match &self {
            Selector::Category(category) => rule.category() == Some(category),
            Selector::Rule(id) => rule.id().id() == id.as_str(),
            Selector::SubRule(id) => rule.id() == id,
        }
    }
}
