//! Line rejection rules.
//!
//! Each rule is a predicate over one trimmed line. [`RuleSet::first_rejection`]
//! evaluates them in precedence order and stops at the first match.

use regex::Regex;

use super::Denylist;
use crate::model::HeadingCandidate;

/// Minimum number of words a heading line must have.
pub const MIN_HEADING_WORDS: usize = 4;

/// Why a line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectRule {
    /// The line is a denylisted form label
    StopWord,
    /// One or two digits, optionally followed by a period
    BareNumeral,
    /// Fewer than four words
    TooShort,
    /// A number, a period, then at most ten letters or spaces (e.g. "3. Age")
    NumberedLabel,
}

impl RejectRule {
    /// All rules in evaluation order.
    pub const ORDER: [RejectRule; 4] = [
        RejectRule::StopWord,
        RejectRule::BareNumeral,
        RejectRule::TooShort,
        RejectRule::NumberedLabel,
    ];

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RejectRule::StopWord => "stop-word",
            RejectRule::BareNumeral => "bare-numeral",
            RejectRule::TooShort => "too-short",
            RejectRule::NumberedLabel => "numbered-label",
        }
    }
}

/// Compiled rejection rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    denylist: Denylist,
    bare_numeral: Regex,
    numbered_label: Regex,
    numeric_token: Regex,
}

impl RuleSet {
    /// Compile the rules around a denylist.
    pub fn new(denylist: Denylist) -> Self {
        Self {
            denylist,
            bare_numeral: Regex::new(r"^\d{1,2}\.?$").unwrap(),
            numbered_label: Regex::new(r"^\d+\.\s*[A-Za-z ]{0,10}$").unwrap(),
            numeric_token: Regex::new(r"^\d+$").unwrap(),
        }
    }

    /// The denylist backing the stop-word rule.
    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    /// Whether a single rule matches the trimmed line.
    pub fn matches(&self, rule: RejectRule, line: &str) -> bool {
        match rule {
            RejectRule::StopWord => self.is_stop_word(line),
            RejectRule::BareNumeral => self.is_bare_numeral(line),
            RejectRule::TooShort => is_too_short(line),
            RejectRule::NumberedLabel => self.is_numbered_label(line),
        }
    }

    /// The first rule that rejects the line, or `None` if it is a heading.
    pub fn first_rejection(&self, line: &str) -> Option<RejectRule> {
        RejectRule::ORDER
            .into_iter()
            .find(|rule| self.matches(*rule, line))
    }

    /// Line equals a denylisted label, ignoring case.
    pub fn is_stop_word(&self, line: &str) -> bool {
        self.denylist.contains(line)
    }

    /// Line is "7", "12." and the like.
    pub fn is_bare_numeral(&self, line: &str) -> bool {
        self.bare_numeral.is_match(line)
    }

    /// Token made only of decimal digits. Roman numerals and fractions such
    /// as `Ⅱ` or `½` are not decimal digits.
    pub fn is_numeric_token(&self, token: &str) -> bool {
        self.numeric_token.is_match(token)
    }

    /// Whether every candidate's lead token is numeric, which marks a form
    /// whose only "headings" are numbered fields. Trivially true when empty.
    pub fn is_numbered_form(&self, candidates: &[HeadingCandidate]) -> bool {
        candidates
            .iter()
            .all(|candidate| self.is_numeric_token(candidate.lead_token()))
    }

    /// Line is a numbered form field such as "3. Age".
    pub fn is_numbered_label(&self, line: &str) -> bool {
        self.numbered_label.is_match(line)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(Denylist::default())
    }
}

/// Line has fewer than [`MIN_HEADING_WORDS`] words. Blank lines are too short.
pub fn is_too_short(line: &str) -> bool {
    line.split_whitespace().count() < MIN_HEADING_WORDS
}
