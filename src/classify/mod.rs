//! Title and heading classification.
//!
//! Both classifiers read parsed pages only; neither uses geometry or fonts.

mod denylist;
mod heading;
pub mod rules;
mod title;

pub use denylist::{Denylist, DEFAULT_STOP_WORDS};
pub use heading::{extract_headings, HeadingClassifier};
pub use rules::{RejectRule, RuleSet};
pub use title::{extract_title, TitleExtractor, MAX_TITLE_CHARS, MIN_TITLE_WORDS, UNTITLED};
