use serde::{Deserialize, Serialize};

/// Canned page snippet shown under the conversation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SearchResult {
    pub icon: String,
    pub label: String,
}

impl SearchResult {
    pub fn new(icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
        }
    }

    /// Snippets shipped with the dialog
    pub fn defaults() -> Vec<SearchResult> {
        vec![
            SearchResult::new("🚙", "Workback plan @Yesterday"),
            SearchResult::new("🌟", "Website weekly sync @Last Friday"),
            SearchResult::new("🚀", "Product development process"),
        ]
    }

    /// Heading for a panel holding `count` results
    pub fn heading(count: usize) -> String {
        if count == 1 {
            "1 page found".to_string()
        } else {
            format!("{} pages found", count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_pluralizes() {
        assert_eq!(SearchResult::heading(0), "0 pages found");
        assert_eq!(SearchResult::heading(1), "1 page found");
        assert_eq!(SearchResult::heading(SearchResult::defaults().len()), "3 pages found");
    }
}
