/// Decorative glyphs used by the console surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Back,
    Close,
    Copy,
    Retry,
    ThumbsUp,
    ThumbsDown,
    Send,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Back => "←",
            Icon::Close => "✕",
            Icon::Copy => "⧉",
            Icon::Retry => "↻",
            Icon::ThumbsUp => "👍",
            Icon::ThumbsDown => "👎",
            Icon::Send => "↑",
        }
    }
}
