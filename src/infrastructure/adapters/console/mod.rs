//! Console surface - draws the dialog in a terminal

pub mod icons;

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt::Write;
use std::io::IsTerminal;
use crate::application::errors::DialogError;
use crate::application::services::PageShell;
use crate::domain::entities::{SearchResult, StreamItem, Transcript};
use crate::domain::traits::{DialogView, Surface};
use crate::infrastructure::config::Config;
pub use icons::Icon;

/// Everything around the message list that comes from configuration
#[derive(Debug, Clone)]
pub struct DialogChrome {
    pub heading: String,
    pub badge: String,
    pub placeholder: String,
    pub width: usize,
    pub viewport_lines: usize,
    pub date_format: String,
    pub command_prefix: String,
    pub search_results: Vec<SearchResult>,
}

impl From<&Config> for DialogChrome {
    fn from(config: &Config) -> Self {
        Self {
            heading: config.dialog.heading.clone(),
            badge: config.dialog.badge.clone(),
            placeholder: config.dialog.placeholder.clone(),
            width: config.dialog.width,
            viewport_lines: config.dialog.viewport_lines,
            date_format: config.dialog.date_format.clone(),
            command_prefix: config.dialog.command_prefix.clone(),
            search_results: config.search.results.clone(),
        }
    }
}

/// Console surface for local use
pub struct ConsoleSurface {
    shell: PageShell,
    chrome: DialogChrome,
    interactive: bool,
}

impl ConsoleSurface {
    pub fn new(shell: PageShell, chrome: DialogChrome) -> Self {
        Self {
            shell,
            chrome,
            interactive: std::io::stdout().is_terminal(),
        }
    }

    /// Full page for a snapshot, shell included
    pub fn render_page(&self, view: &DialogView) -> Result<String, DialogError> {
        let body = if view.is_open() {
            self.render_dialog(view)?
        } else {
            format!("  Dialog closed. Type {}open to bring it back.\n", self.chrome.command_prefix)
        };
        Ok(self.shell.render(&body, self.chrome.width)?)
    }

    fn render_dialog(&self, view: &DialogView) -> Result<String, std::fmt::Error> {
        let width = self.chrome.width;
        let mut out = String::new();

        // header
        let title = format!("{} {}  [{}]", Icon::Back.glyph(), self.chrome.heading, self.chrome.badge);
        let gap = width.saturating_sub(text_width(&title) + text_width(Icon::Close.glyph()));
        writeln!(out, "{}{}{}", title, " ".repeat(gap), Icon::Close.glyph())?;
        writeln!(out, "{}", "─".repeat(width))?;

        // messages
        let (lines, ends) = self.message_lines(&view.transcript);
        let end = view
            .scrolled_to
            .and_then(|id| ends.get(id.index()).copied())
            .unwrap_or(lines.len());
        let start = end.saturating_sub(self.chrome.viewport_lines);
        if start > 0 {
            writeln!(out, "{}", center(&format!("↑ {} earlier lines", start), width))?;
        }
        for line in &lines[start..end] {
            writeln!(out, "{}", line)?;
        }
        writeln!(out, "{}", "─".repeat(width))?;

        // search results
        writeln!(out, "{}", SearchResult::heading(self.chrome.search_results.len()))?;
        for result in &self.chrome.search_results {
            writeln!(out, "  {} {}", result.icon, result.label)?;
        }
        writeln!(out)?;

        // action buttons, decorative
        writeln!(out, "( {} Copy )  ( {} Try again )", Icon::Copy.glyph(), Icon::Retry.glyph())?;

        // input
        let input = if view.input.is_empty() { self.chrome.placeholder.as_str() } else { view.input.as_str() };
        writeln!(out, "› {}  {}", input, Icon::Send.glyph())?;
        Ok(out)
    }

    /// Rendered message area plus, per message id, the line index just
    /// past that message
    fn message_lines(&self, transcript: &Transcript) -> (Vec<String>, Vec<usize>) {
        let width = self.chrome.width;
        let inner = (width * 7 / 10).saturating_sub(4).max(1);
        let mut lines = Vec::new();
        let mut ends = Vec::with_capacity(transcript.len());

        for item in transcript.day_grouped() {
            match item {
                StreamItem::DaySeparator(day) => {
                    lines.push(center(&format_day(day, &self.chrome.date_format), width));
                }
                StreamItem::Message(message) => {
                    let chunks = wrap(&message.content, inner);
                    let bubble = chunks.iter().map(|c| text_width(c)).max().unwrap_or(0);
                    let count = chunks.len();
                    for (i, chunk) in chunks.into_iter().enumerate() {
                        let cell = format!("│ {:<bubble$} │", chunk, bubble = bubble);
                        if message.is_user() {
                            let pad = width.saturating_sub(text_width(&cell));
                            lines.push(format!("{}{}", " ".repeat(pad), cell));
                        } else if i + 1 == count {
                            lines.push(format!("{} {} {}", cell, Icon::ThumbsUp.glyph(), Icon::ThumbsDown.glyph()));
                        } else {
                            lines.push(cell);
                        }
                    }
                    ends.push(lines.len());
                }
            }
        }

        (lines, ends)
    }
}

#[async_trait]
impl Surface for ConsoleSurface {
    async fn start(&self) -> Result<(), DialogError> {
        use std::io::Write as _;

        tracing::info!("Starting console surface: {}", self.shell.title());
        for meta in self.shell.meta() {
            tracing::debug!("Page meta {}={}", meta.name, meta.content);
        }
        if self.interactive {
            // terminal window title
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "\x1b]0;{}\x07", self.shell.title())?;
            stdout.flush()?;
        }
        Ok(())
    }

    async fn render(&self, view: &DialogView) -> Result<(), DialogError> {
        use std::io::Write as _;

        let page = self.render_page(view)?;
        let mut stdout = std::io::stdout().lock();
        if self.interactive {
            write!(stdout, "\x1b[2J\x1b[H")?;
        }
        stdout.write_all(page.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    async fn notice(&self, text: &str) -> Result<(), DialogError> {
        use std::io::Write as _;

        let mut stdout = std::io::stdout().lock();
        for line in text.lines() {
            writeln!(stdout, "  {}", line)?;
        }
        stdout.flush()?;
        Ok(())
    }
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text_width(text)) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Falls back to ISO dates when the pattern is not a valid strftime string
fn format_day(day: NaiveDate, pattern: &str) -> String {
    let mut label = String::new();
    if write!(label, "{}", day.format(pattern)).is_err() {
        return day.to_string();
    }
    label
}

/// Hard wrap at `width` characters
fn wrap(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width.max(1)).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use crate::domain::entities::{MessageId, ModalState, Origin};

    fn surface(viewport_lines: usize) -> ConsoleSurface {
        let mut config = Config::default();
        config.dialog.width = 40;
        config.dialog.viewport_lines = viewport_lines;
        ConsoleSurface::new(PageShell::new(Some("Test page".to_string())), DialogChrome::from(&config))
    }

    fn view(transcript: Transcript) -> DialogView {
        let scrolled_to = transcript.last().map(|m| m.id);
        DialogView {
            modal: ModalState::Open,
            transcript,
            input: String::new(),
            scrolled_to,
        }
    }

    fn at(day: u32, hour: u32) -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("abcdef", 4), vec!["abcd".to_string(), "ef".to_string()]);
        assert_eq!(wrap("", 4), vec![String::new()]);
        assert_eq!(wrap("ab", 0), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_format_day_falls_back_to_iso() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(format_day(day, "%Y/%m/%d"), "2026/10/18");
        assert_eq!(format_day(day, "%Q"), "2026-10-18");
    }

    #[test]
    fn test_empty_dialog_shows_chrome() {
        let page = surface(10).render_page(&view(Transcript::new())).unwrap();
        assert!(page.contains("Test page"));
        assert!(page.contains("Ask AI  [Q&A Beta]"));
        assert!(page.contains("3 pages found"));
        assert!(page.contains("Workback plan @Yesterday"));
        assert!(page.contains("Try again"));
        assert!(page.contains("› Ask a question..."));
    }

    #[test]
    fn test_separators_and_alignment() {
        let mut transcript = Transcript::new();
        transcript.append(Origin::User, "Hello", at(17, 9));
        transcript.append(Origin::SystemReply, "abc123", at(17, 9));
        transcript.append(Origin::User, "Again", at(18, 9));
        let page = surface(20).render_page(&view(transcript)).unwrap();

        assert_eq!(page.matches("2026/10/17").count(), 1);
        assert_eq!(page.matches("2026/10/18").count(), 1);

        let user_line = page.lines().find(|l| l.contains("Hello")).unwrap();
        assert!(user_line.starts_with(' '));
        assert!(user_line.ends_with("│ Hello │"));
        assert_eq!(user_line.chars().count(), 40);

        let reply_line = page.lines().find(|l| l.contains("abc123")).unwrap();
        assert!(reply_line.starts_with("│ abc123 │"));
        assert!(reply_line.contains("👍"));
    }

    #[test]
    fn test_long_reply_wraps_inside_bubble() {
        let mut transcript = Transcript::new();
        transcript.append(Origin::SystemReply, "x".repeat(51), at(18, 9));
        let page = surface(20).render_page(&view(transcript)).unwrap();

        // 40 columns wide, bubble text at most 24 characters per line
        let bubble_lines: Vec<&str> = page.lines().filter(|l| l.contains("xxx")).collect();
        assert_eq!(bubble_lines.len(), 3);
        assert!(bubble_lines.iter().all(|l| l.matches('x').count() <= 24));
        assert!(bubble_lines.last().unwrap().contains("👎"));
    }

    #[test]
    fn test_viewport_ends_at_scroll_anchor() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.append(Origin::User, format!("msg{}", i), at(18, 9));
        }
        let mut snapshot = view(transcript);
        let page = surface(4).render_page(&snapshot).unwrap();
        assert!(page.contains("msg9"));
        assert!(page.contains("msg6"));
        assert!(!page.contains("msg5"));
        assert!(page.contains("↑ 7 earlier lines"));

        snapshot.scrolled_to = Some(MessageId::new(2));
        let page = surface(4).render_page(&snapshot).unwrap();
        assert!(page.contains("msg2"));
        assert!(!page.contains("msg3"));
        assert!(!page.contains("earlier lines"));
    }

    #[test]
    fn test_input_replaces_placeholder() {
        let mut snapshot = view(Transcript::new());
        snapshot.input = "draft question".to_string();
        let page = surface(10).render_page(&snapshot).unwrap();
        assert!(page.contains("› draft question"));
        assert!(!page.contains("Ask a question..."));
    }

    #[test]
    fn test_closed_dialog_renders_shell_only() {
        let mut snapshot = view(Transcript::new());
        snapshot.modal = ModalState::Closed;
        let page = surface(10).render_page(&snapshot).unwrap();
        assert!(page.contains("Test page"));
        assert!(page.contains("Type /open"));
        assert!(!page.contains("Ask AI"));
    }
}
