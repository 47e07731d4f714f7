//! Page renderers
//!
//! A [`Page`] is a plain value; turning it into output is a separate step
//! so the same page can be printed to a terminal or emitted as JSON.

mod chart;
pub mod style;
pub mod text;

pub use style::{Palette, Tone};
pub use text::TextRenderer;

use crate::dashboard::Page;
use crate::error::Result;

/// Turns a page into printable output
pub trait PageRenderer {
    fn render(&self, page: &Page) -> Result<String>;
}

/// Layout of the text output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit ANSI colour codes
    pub color: bool,
    /// Total line width, price axis included
    pub width: usize,
    /// Rows in the candlestick chart
    pub chart_height: usize,
    /// Rows in the volume chart
    pub volume_height: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            width: 100,
            chart_height: 16,
            volume_height: 6,
        }
    }
}

/// Serializes the page with serde
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl PageRenderer for JsonRenderer {
    fn render(&self, page: &Page) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(page)?
        } else {
            serde_json::to_string(page)?
        };
        Ok(json)
    }
}
