//! Filters applied to the matches of one sentence.

use crate::types::RuleMatch;

pub trait Filter: Send + Sync {
    fn filter(&self, matches: Vec<RuleMatch>) -> Vec<RuleMatch>;
}

fn overlaps(a: &RuleMatch, b: &RuleMatch) -> bool {
    a.span == b.span || (a.span.start < b.span.end && b.span.start < a.span.end)
}

/// Collapses matches of the same rule group with overlapping spans into the first one.
/// Rules with the same ID (regardless of sub ID) form a group. The order of the remaining
/// matches is preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct SameRuleGroupFilter;

impl Filter for SameRuleGroupFilter {
    fn filter(&self, matches: Vec<RuleMatch>) -> Vec<RuleMatch> {
        let mut kept: Vec<RuleMatch> = Vec::with_capacity(matches.len());

        for candidate in matches {
            let duplicate = kept
                .iter()
                .any(|x| x.rule.id() == candidate.rule.id() && overlaps(x, &candidate));

            if !duplicate {
                kept.push(candidate);
            }
        }

        kept
    }
}
