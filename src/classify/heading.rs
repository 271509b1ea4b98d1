//! Heading detection over the lines of every text container.

use crate::model::{HeadingCandidate, PageLayout};

use super::rules::RuleSet;
use super::Denylist;

/// Classifies text lines as headings or form/noise text.
#[derive(Debug, Clone, Default)]
pub struct HeadingClassifier {
    rules: RuleSet,
}

impl HeadingClassifier {
    /// Create a classifier with the default denylist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with a custom denylist.
    pub fn with_denylist(denylist: Denylist) -> Self {
        Self {
            rules: RuleSet::new(denylist),
        }
    }

    /// The rejection rules in use.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Collect every line that survives the rejection rules, in encounter
    /// order, then apply the whole-document veto.
    pub fn extract(&self, pages: &[PageLayout]) -> Vec<HeadingCandidate> {
        let mut candidates = Vec::new();

        for page in pages {
            for container in page.text_containers() {
                for line in container.lines() {
                    let text = line.trim();
                    match self.rules.first_rejection(text) {
                        Some(rule) => {
                            log::trace!("page {}: {:?} rejected ({})", page.number, text, rule.name());
                        }
                        None => candidates.push(HeadingCandidate::new(text, page.number)),
                    }
                }
            }
        }

        if self.rules.is_numbered_form(&candidates) {
            log::debug!(
                "Discarding {} headings: every heading starts with a number",
                candidates.len()
            );
            candidates.clear();
        }

        candidates
    }
}

/// Extract headings with the default denylist.
pub fn extract_headings(pages: &[PageLayout]) -> Vec<HeadingCandidate> {
    HeadingClassifier::new().extract(pages)
}
