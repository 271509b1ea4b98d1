//! Output records: heading candidates and the per-document result.

use serde::{Deserialize, Serialize};

/// Heading level. Outlines are flat, so every heading is `H1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    #[default]
    H1,
}

impl HeadingLevel {
    /// The label written to JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line that survived every rejection rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadingCandidate {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,
}

impl HeadingCandidate {
    /// Create an `H1` heading on the given page.
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            level: HeadingLevel::H1,
            text: text.into(),
            page,
        }
    }

    /// The first whitespace-delimited token with one trailing period removed.
    pub fn lead_token(&self) -> &str {
        let token = self.text.split_whitespace().next().unwrap_or("");
        token.strip_suffix('.').unwrap_or(token)
    }
}

/// Title and outline extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentResult {
    /// Document title, or "Untitled Document"
    pub title: String,

    /// Headings in encounter order
    pub outline: Vec<HeadingCandidate>,
}

impl DocumentResult {
    /// Create a result from a title and outline.
    pub fn new(title: impl Into<String>, outline: Vec<HeadingCandidate>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Trim surrounding whitespace from the title and every heading text.
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.title);
        for heading in &mut self.outline {
            trim_in_place(&mut heading.text);
        }
        self
    }

    /// Number of headings in the outline.
    pub fn heading_count(&self) -> usize {
        self.outline.len()
    }
}

fn trim_in_place(s: &mut String) {
    let trimmed = s.trim();
    if trimmed.len() != s.len() {
        *s = trimmed.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_serializes_level_as_h1() {
        let heading = HeadingCandidate::new("Scope Of The Present Work", 2);
        let json = serde_json::to_string(&heading).unwrap();
        assert_eq!(
            json,
            r#"{"level":"H1","text":"Scope Of The Present Work","page":2}"#
        );
    }

    #[test]
    fn test_lead_token_strips_one_period() {
        assert_eq!(HeadingCandidate::new("12. Travel Plans Ahead", 1).lead_token(), "12");
        assert_eq!(HeadingCandidate::new("1.. Odd", 1).lead_token(), "1.");
        assert_eq!(HeadingCandidate::new("Overview", 1).lead_token(), "Overview");
        assert_eq!(HeadingCandidate::new("   ", 1).lead_token(), "");
    }

    #[test]
    fn test_normalized_trims_everything() {
        let result = DocumentResult::new(
            "  Annual Report 2024 For Members \n",
            vec![HeadingCandidate::new("\tRevenue And Expenses Summary ", 1)],
        )
        .normalized();

        assert_eq!(result.title, "Annual Report 2024 For Members");
        assert_eq!(result.outline[0].text, "Revenue And Expenses Summary");
        assert_eq!(result.clone().normalized(), result);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json = r#"{"title":"t","outline":[],"extra":1}"#;
        assert!(serde_json::from_str::<DocumentResult>(json).is_err());
    }
}
