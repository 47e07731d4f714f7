//! Terminal rendering of a page

use super::chart::{self, Y_AXIS_WIDTH};
use super::style::{Palette, Tone};
use super::{PageRenderer, RenderOptions};
use crate::dashboard::{BarFigure, CandlestickFigure, Metric, Page, Section};
use crate::dashboard::metrics::format_thousands;
use crate::error::Result;
use crate::market::HistoryRecord;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

/// Writes a page as plain or ANSI-coloured text
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    options: RenderOptions,
}

impl TextRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn palette(&self) -> Palette {
        Palette::new(self.options.color)
    }

    /// Columns left for candles once the price axis is drawn
    fn plot_width(&self) -> usize {
        self.options.width.saturating_sub(Y_AXIS_WIDTH).max(10)
    }

    fn header(&self, page: &Page) -> Vec<String> {
        let palette = self.palette();
        let mut lines = vec![palette.paint(&page.title, Tone::Heading)];
        if page.selection.has_symbol() {
            lines.push(format!(
                "{} · {}",
                page.selection.symbol, page.selection.range
            ));
        }
        lines
    }

    fn metrics(&self, metrics: &[Metric]) -> Vec<String> {
        let palette = self.palette();
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(metrics.iter().map(|m| m.label.as_str()).collect::<Vec<_>>())
            .add_row(metrics.iter().map(|m| m.value.as_str()).collect::<Vec<_>>());

        let mut lines: Vec<String> = table.lines().collect();
        let deltas: Vec<String> = metrics
            .iter()
            .filter_map(|m| {
                m.delta
                    .as_deref()
                    .map(|d| format!("{}: {}", m.label, palette.signed(d)))
            })
            .collect();
        lines.extend(deltas);
        lines
    }

    fn candlestick(&self, figure: &CandlestickFigure, volume: Option<&BarFigure>) -> Vec<String> {
        let palette = self.palette();
        let width = self.plot_width();
        let candles = chart::candles(figure, volume, width);

        let mut lines = vec![palette.paint(
            &format!("{} ({})", figure.title, figure.y_title),
            Tone::Heading,
        )];
        lines.extend(chart::candlestick_lines(
            &candles,
            width,
            self.options.chart_height,
            &palette,
        ));
        lines
    }

    fn volume(&self, figure: &BarFigure, prices: Option<&CandlestickFigure>) -> Vec<String> {
        let palette = self.palette();
        let width = self.plot_width();
        let candles = match prices {
            Some(prices) => chart::candles(prices, Some(figure), width),
            None => chart::volume_candles(figure, width),
        };

        let mut lines = vec![palette.paint(&figure.title, Tone::Heading)];
        lines.extend(chart::volume_lines(
            &candles,
            width,
            self.options.volume_height,
            &palette,
        ));
        lines
    }

    fn history(&self, rows: &[HistoryRecord]) -> Vec<String> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Disabled)
            .set_header(vec!["Date", "Open", "High", "Low", "Close", "Volume"]);

        for row in rows {
            table.add_row(vec![
                Cell::new(row.date),
                price_cell(row.open),
                price_cell(row.high),
                price_cell(row.low),
                price_cell(row.close),
                Cell::new(format_thousands(row.volume as f64)).set_alignment(CellAlignment::Right),
            ]);
        }

        let mut lines = vec![self.palette().paint("Historical data", Tone::Heading)];
        lines.extend(table.lines());
        lines
    }

    fn analysis(&self, markdown: &str, citations: &[String]) -> Vec<String> {
        let mut lines = vec![self.palette().paint("AI analysis", Tone::Heading)];
        lines.extend(markdown.lines().map(str::to_string));
        if !citations.is_empty() {
            lines.push(String::new());
            lines.push("Sources:".to_string());
            lines.extend(
                citations
                    .iter()
                    .enumerate()
                    .map(|(i, url)| format!("[{}] {url}", i + 1)),
            );
        }
        lines
    }
}

fn price_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

impl PageRenderer for TextRenderer {
    fn render(&self, page: &Page) -> Result<String> {
        let palette = self.palette();
        let prices = page.sections.iter().find_map(|s| match s {
            Section::Candlestick(figure) => Some(figure),
            _ => None,
        });
        let volume = page.sections.iter().find_map(|s| match s {
            Section::Volume(figure) => Some(figure),
            _ => None,
        });

        let mut blocks = vec![self.header(page)];
        for section in &page.sections {
            let block = match section {
                Section::Warning { message } => {
                    vec![palette.paint(&format!("Warning: {message}"), Tone::Warning)]
                }
                Section::Error { message, hint } => {
                    let mut block = vec![palette.paint(&format!("Error: {message}"), Tone::Error)];
                    if let Some(hint) = hint {
                        block.push(palette.paint(hint, Tone::Muted));
                    }
                    block
                }
                Section::Info { message } => vec![palette.paint(message, Tone::Muted)],
                Section::Metrics { metrics } => self.metrics(metrics),
                Section::Candlestick(figure) => self.candlestick(figure, volume),
                Section::Volume(figure) => self.volume(figure, prices),
                Section::History { rows } => self.history(rows),
                Section::Analysis {
                    markdown,
                    citations,
                } => self.analysis(markdown, citations),
            };
            blocks.push(block);
        }

        let mut out = blocks
            .iter()
            .map(|block| block.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        Ok(out)
    }
}
