//! ANSI colouring for terminal output

const RESET: &str = "\u{1b}[0m";

/// What a piece of text means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Bullish candle, positive change
    Up,
    /// Bearish candle, negative change
    Down,
    /// Axis labels, hints
    Muted,
    Heading,
    Warning,
    Error,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Up => "\u{1b}[32m",
            Tone::Down | Tone::Error => "\u{1b}[31m",
            Tone::Muted => "\u{1b}[90m",
            Tone::Heading => "\u{1b}[1m",
            Tone::Warning => "\u{1b}[33m",
        }
    }
}

/// Applies tones, or leaves text untouched when colour is off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn ansi() -> Self {
        Self::new(true)
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if self.enabled && !text.is_empty() {
            format!("{}{text}{RESET}", tone.code())
        } else {
            text.to_string()
        }
    }

    /// Green for a leading `+`, red for a leading `-`
    pub fn signed(&self, text: &str) -> String {
        match text.chars().next() {
            Some('+') => self.paint(text, Tone::Up),
            Some('-') => self.paint(text, Tone::Down),
            _ => text.to_string(),
        }
    }
}
