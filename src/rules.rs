//! An ordered collection of rules.

use std::iter::FromIterator;

use crate::rule::{id::Selector, Rule};

/// A set of rules in the order they were added.
#[derive(Debug, Default)]
pub struct Rules {
    rules: Vec<Rule>,
}

impl Rules {
    pub fn new() -> Self {
        Rules::default()
    }

    /// All rules in insertion order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// All rules in insertion order (mutable).
    pub fn rules_mut(&mut self) -> &mut [Rule] {
        &mut self.rules
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns an iterator over all rules.
    pub fn iter(&self) -> RulesIter<'_> {
        RulesIter {
            inner: self.rules.iter(),
            selector: None,
        }
    }

    /// Returns an iterator over all rules matching the selector.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> RulesIter<'a> {
        RulesIter {
            inner: self.rules.iter(),
            selector: Some(selector),
        }
    }

    /// Returns an iterator over all rules matching the selector (mutable).
    pub fn select_mut<'a>(&'a mut self, selector: &'a Selector) -> RulesIterMut<'a> {
        RulesIterMut {
            inner: self.rules.iter_mut(),
            selector: Some(selector),
        }
    }

    /// Clears the accumulated state of every rule.
    pub fn reset(&mut self) {
        self.rules.iter_mut().for_each(Rule::reset);
    }
}

/// An iterator over references to rules.
pub struct RulesIter<'a> {
    selector: Option<&'a Selector>,
    inner: std::slice::Iter<'a, Rule>,
}

impl<'a> Iterator for RulesIter<'a> {
    type Item = &'a Rule;
    fn next(&mut self) -> Option<Self::Item> {
        let selector = self.selector;

        self.inner
            .find(|rule| selector.map_or(true, |s| s.is_match(rule)))
    }
}

/// An iterator over mutable references to rules.
pub struct RulesIterMut<'a> {
    selector: Option<&'a Selector>,
    inner: std::slice::IterMut<'a, Rule>,
}

impl<'a> Iterator for RulesIterMut<'a> {
    type Item = &'a mut Rule;
    fn next(&mut self) -> Option<Self::Item> {
        let selector = self.selector;

        self.inner
            .find(|rule| selector.map_or(true, |s| s.is_match(rule)))
    }
}

impl IntoIterator for Rules {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;
    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a Rules {
    type Item = &'a Rule;
    type IntoIter = RulesIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R> FromIterator<R> for Rules
where
    R: Into<Rule>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Rules {
            rules: iter.into_iter().map(|x| x.into()).collect(),
        }
    }
}

impl Extend<Rule> for Rules {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{id::Category, RawMatch, SentenceRule};
    use crate::types::Sentence;
    use crate::OtherError;
    use std::convert::TryFrom;

    struct Nothing;

    impl SentenceRule for Nothing {
        fn match_sentence(&self, _sentence: &Sentence) -> Result<Vec<RawMatch>, OtherError> {
            Ok(Vec::new())
        }
    }

    fn rules() -> Rules {
        vec![
            Rule::sentence("A", Nothing).with_sub_id("1"),
            Rule::sentence("A", Nothing).with_sub_id("2"),
            Rule::sentence("B", Nothing).with_category(Category::new("TYPOS")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn selectors_filter_rules() {
        let rules = rules();

        let selector = Selector::try_from("A").unwrap();
        assert_eq!(rules.select(&selector).count(), 2);

        let selector = Selector::try_from("A[2]").unwrap();
        let selected: Vec<_> = rules.select(&selector).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id().sub_id(), Some("2"));

        let selector = Selector::try_from("category:TYPOS").unwrap();
        assert_eq!(rules.select(&selector).next().unwrap().id().id(), "B");
    }

    #[test]
    fn rules_can_be_changed_by_selector() {
        let mut rules = rules();
        let selector = Selector::try_from("A").unwrap();

        rules.select_mut(&selector).for_each(Rule::set_default_off);

        assert_eq!(rules.iter().filter(|x| x.is_default_off()).count(), 2);
        assert_eq!(rules.len(), 3);
    }
}
