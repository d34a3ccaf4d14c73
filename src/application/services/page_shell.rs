use std::fmt::Write;

/// Title used when nothing overrides it
pub const DEFAULT_TITLE: &str = "我的项目";

/// Document metadata entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

impl MetaTag {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Structural wrapper around the page content: title, metadata, and
/// header / main / footer slots. Holds no state beyond its configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageShell {
    title: String,
    meta: Vec<MetaTag>,
}

impl PageShell {
    pub fn new(title: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            meta: vec![
                MetaTag::new("charset", "utf-8"),
                MetaTag::new("viewport", "initial-scale=1.0, width=device-width"),
            ],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn meta(&self) -> &[MetaTag] {
        &self.meta
    }

    pub fn meta_value(&self, name: &str) -> Option<&str> {
        self.meta.iter().find(|m| m.name == name).map(|m| m.content.as_str())
    }

    /// Wrap `content` in the header and footer slots
    pub fn render(&self, content: &str, width: usize) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let rule = "═".repeat(width);
        writeln!(out, "{}", rule)?;
        writeln!(out, " {}", self.title)?;
        writeln!(out, "{}", rule)?;
        out.push_str(content);
        if !content.is_empty() && !content.ends_with('\n') {
            out.push('\n');
        }
        writeln!(out, "{}", rule)?;
        Ok(out)
    }
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_title_and_meta() {
        let shell = PageShell::default();
        assert_eq!(shell.title(), "我的项目");
        assert_eq!(shell.meta_value("charset"), Some("utf-8"));
        assert_eq!(shell.meta_value("viewport"), Some("initial-scale=1.0, width=device-width"));
        assert_eq!(shell.meta().len(), 2);
    }

    #[test]
    fn test_title_override() {
        let shell = PageShell::new(Some("Docs".to_string()));
        assert_eq!(shell.title(), "Docs");
    }

    #[test]
    fn test_render_wraps_content() {
        let shell = PageShell::new(Some("Docs".to_string()));
        let page = shell.render("body", 10).unwrap();
        let lines: Vec<&str> = page.lines().collect();
        assert_eq!(lines, vec!["══════════", " Docs", "══════════", "body", "══════════"]);
    }
}
