//! Text candlestick and volume charts
//!
//! Drawn row by row from the top. Each candle is split into three zones:
//! upper wick, body, lower wick; the 0.25/0.75 thresholds pick half-height
//! glyphs so a candle can end between two rows.

use super::style::{Palette, Tone};
use crate::dashboard::{BarFigure, CandlestickFigure};
use crate::dashboard::metrics::format_thousands;
use chrono::NaiveDate;
use std::collections::HashMap;

const VOID: char = ' ';
const BODY: char = '┃';
const HALF_BODY_BOTTOM: char = '╻';
const HALF_BODY_TOP: char = '╹';
const WICK: char = '│';
const TOP: char = '╽';
const BOTTOM: char = '╿';
const UPPER_WICK: char = '╷';
const LOWER_WICK: char = '╵';

const BAR_FULL: char = '█';
const BAR_HALF: char = '▄';

/// Width of the price labels plus the axis line
pub const Y_AXIS_WIDTH: usize = 12;

/// Price rows between two axis labels
const LABEL_EVERY: usize = 4;

/// One drawn column: a single day or several merged days
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Candle {
    fn bullish(&self) -> bool {
        self.close >= self.open
    }

    fn tone(&self) -> Tone {
        if self.bullish() { Tone::Up } else { Tone::Down }
    }

    /// Merge consecutive days: first open, last close, extreme high/low
    fn merge(days: &[Candle]) -> Option<Candle> {
        let (first, rest) = days.split_first()?;
        Some(rest.iter().fold(*first, |acc, day| Candle {
            open: acc.open,
            high: acc.high.max(day.high),
            low: acc.low.min(day.low),
            close: day.close,
            volume: acc.volume.saturating_add(day.volume),
            first: acc.first,
            last: day.last,
        }))
    }
}

/// Zip the two figures into candles, merged so at most `width` remain
///
/// Price series are zipped, so a figure with uneven series draws only the
/// complete rows. Volume is matched by date.
pub(crate) fn candles(prices: &CandlestickFigure, volume: Option<&BarFigure>, width: usize) -> Vec<Candle> {
    let volumes: HashMap<NaiveDate, u64> = volume
        .map(|v| v.x.iter().copied().zip(v.y.iter().copied()).collect())
        .unwrap_or_default();

    let days = prices
        .x
        .iter()
        .zip(&prices.open)
        .zip(&prices.high)
        .zip(&prices.low)
        .zip(&prices.close)
        .map(|((((&date, &open), &high), &low), &close)| Candle {
            open,
            high,
            low,
            close,
            volume: volumes.get(&date).copied().unwrap_or(0),
            first: date,
            last: date,
        })
        .collect();
    bucket(days, width)
}

/// Candles carrying volume only, for a page without prices
pub(crate) fn volume_candles(volume: &BarFigure, width: usize) -> Vec<Candle> {
    let days = volume
        .x
        .iter()
        .zip(&volume.y)
        .map(|(&date, &v)| Candle {
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close: 0.0,
            volume: v,
            first: date,
            last: date,
        })
        .collect();
    bucket(days, width)
}

fn bucket(days: Vec<Candle>, width: usize) -> Vec<Candle> {
    let width = width.max(1);
    if days.len() <= width {
        return days;
    }

    let per_column = days.len().div_ceil(width);
    days.chunks(per_column).filter_map(Candle::merge).collect()
}

/// Column of each candle when `count` candles share `width` cells
fn columns(width: usize, count: usize) -> Vec<usize> {
    match count {
        0 => Vec::new(),
        1 => vec![width / 2],
        _ => {
            let spacing = width as f64 / count as f64;
            (0..count)
                .map(|i| ((i as f64 * spacing).round() as usize).min(width.saturating_sub(1)))
                .collect()
        }
    }
}

/// Maps prices onto row heights
struct Scale {
    min: f64,
    max: f64,
    rows: usize,
}

impl Scale {
    fn new(candles: &[Candle], rows: usize) -> Self {
        let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let margin = (high - low) * 0.02;
        Self {
            min: (low - margin).max(0.0),
            max: high + margin,
            rows,
        }
    }

    fn height(&self, price: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            return self.rows as f64 / 2.0;
        }
        (price - self.min) / span * self.rows as f64
    }

    fn price_at(&self, row: usize) -> f64 {
        self.min + row as f64 * (self.max - self.min) / self.rows as f64
    }
}

fn glyph(scale: &Scale, candle: &Candle, row: usize) -> char {
    let y = row as f64;
    let high = scale.height(candle.high);
    let low = scale.height(candle.low);
    let top = scale.height(candle.open.max(candle.close));
    let bottom = scale.height(candle.open.min(candle.close));

    // Bodies thinner than half a row would vanish between the thresholds
    if top - bottom < 0.5 && top.round().max(1.0) as usize == row {
        return BODY;
    }

    if high.ceil() >= y && y >= top.floor() {
        if top - y > 0.75 {
            BODY
        } else if top - y > 0.25 {
            if high - y > 0.75 { TOP } else { HALF_BODY_BOTTOM }
        } else if high - y > 0.75 {
            WICK
        } else if high - y > 0.25 {
            UPPER_WICK
        } else {
            VOID
        }
    } else if top.floor() >= y && y >= bottom.ceil() {
        BODY
    } else if bottom.ceil() >= y && y >= low.floor() {
        if bottom - y < 0.25 {
            BODY
        } else if bottom - y < 0.75 {
            if low - y < 0.25 { BOTTOM } else { HALF_BODY_TOP }
        } else if low - y < 0.25 {
            WICK
        } else if low - y < 0.75 {
            LOWER_WICK
        } else {
            VOID
        }
    } else {
        VOID
    }
}

/// Candlestick rows, price labels on the left, dates underneath
pub(crate) fn candlestick_lines(candles: &[Candle], width: usize, rows: usize, palette: &Palette) -> Vec<String> {
    if candles.is_empty() || rows == 0 {
        return Vec::new();
    }

    let scale = Scale::new(candles, rows);
    let positions = columns(width, candles.len());
    let mut lines = Vec::with_capacity(rows + 1);

    for row in (1..=rows).rev() {
        let label = if row % LABEL_EVERY == 0 || row == rows {
            format!("{:>9.2}", scale.price_at(row))
        } else {
            String::new()
        };
        let mut line = palette.paint(&format!("{label:>9} │ "), Tone::Muted);

        let mut cells = vec![String::from(VOID); width];
        for (candle, &column) in candles.iter().zip(&positions) {
            let ch = glyph(&scale, candle, row);
            if ch != VOID {
                cells[column] = palette.paint(&ch.to_string(), candle.tone());
            }
        }
        line.push_str(cells.concat().trim_end());
        lines.push(line);
    }

    lines.push(date_axis(candles, width, palette));
    lines
}

/// Volume bars scaled to the largest column
pub(crate) fn volume_lines(candles: &[Candle], width: usize, rows: usize, palette: &Palette) -> Vec<String> {
    let peak = candles.iter().map(|c| c.volume).max().unwrap_or(0);
    if candles.is_empty() || rows == 0 || peak == 0 {
        return Vec::new();
    }

    let positions = columns(width, candles.len());
    let mut lines = Vec::with_capacity(rows + 1);

    for row in (1..=rows).rev() {
        let label = if row == rows {
            compact(peak)
        } else {
            String::new()
        };
        let mut line = palette.paint(&format!("{label:>9} │ "), Tone::Muted);

        let mut cells = vec![String::from(VOID); width];
        for (candle, &column) in candles.iter().zip(&positions) {
            let filled = candle.volume as f64 / peak as f64 * rows as f64;
            let y = row as f64;
            let ch = if filled >= y {
                BAR_FULL
            } else if filled >= y - 0.5 {
                BAR_HALF
            } else {
                continue;
            };
            cells[column] = palette.paint(&ch.to_string(), candle.tone());
        }
        line.push_str(cells.concat().trim_end());
        lines.push(line);
    }

    lines.push(date_axis(candles, width, palette));
    lines
}

/// First date on the left, last date on the right
fn date_axis(candles: &[Candle], width: usize, palette: &Palette) -> String {
    let (Some(first), Some(last)) = (candles.first(), candles.last()) else {
        return String::new();
    };
    let start = first.first.format("%Y-%m-%d").to_string();
    let end = last.last.format("%Y-%m-%d").to_string();

    let axis = if first.first == last.last {
        start
    } else {
        let gap = width.saturating_sub(start.len() + end.len()).max(1);
        format!("{start}{}{end}", " ".repeat(gap))
    };
    format!("{}{}", " ".repeat(Y_AXIS_WIDTH), palette.paint(&axis, Tone::Muted))
}

/// `950`, `12.3K`, `4.5M`, `1.2B`
fn compact(value: u64) -> String {
    let v = value as f64;
    if v >= 1e9 {
        format!("{:.1}B", v / 1e9)
    } else if v >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if v >= 1e4 {
        format!("{:.1}K", v / 1e3)
    } else {
        format_thousands(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::HistoryRecord;

    fn history(days: u32) -> Vec<HistoryRecord> {
        (0..days)
            .map(|i| {
                let base = 100.0 + f64::from(i);
                HistoryRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(i)),
                    open: base,
                    high: base + 2.0,
                    low: base - 2.0,
                    close: if i % 2 == 0 { base + 1.0 } else { base - 1.0 },
                    volume: 1_000 * u64::from(i + 1),
                }
            })
            .collect()
    }

    fn figures(days: u32) -> (CandlestickFigure, BarFigure) {
        let rows = history(days);
        (
            CandlestickFigure::from_history("TEST", None, &rows).unwrap(),
            BarFigure::volume("TEST", &rows),
        )
    }

    #[test]
    fn test_candles_are_bucketed_to_width() {
        let (prices, volume) = figures(100);
        let merged = candles(&prices, Some(&volume), 30);

        assert!(merged.len() <= 30);
        assert_eq!(merged[0].first, prices.x[0]);
        assert_eq!(merged.last().unwrap().last, prices.x[99]);
        assert_eq!(merged[0].open, prices.open[0]);

        let total: u64 = merged.iter().map(|c| c.volume).sum();
        assert_eq!(total, volume.y.iter().sum::<u64>());
    }

    #[test]
    fn test_uneven_series_draw_complete_rows() {
        let (mut prices, volume) = figures(4);
        prices.open.truncate(2);
        prices.low.pop();

        let merged = candles(&prices, Some(&volume), 20);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].first, prices.x[1]);
        assert_eq!(merged[1].volume, 2_000);
        assert_eq!(candlestick_lines(&merged, 20, 6, &Palette::plain()).len(), 7);
    }

    #[test]
    fn test_volume_matched_by_date() {
        let (prices, mut volume) = figures(3);
        volume.x.remove(0);
        volume.y.remove(0);

        let merged = candles(&prices, Some(&volume), 20);
        let volumes: Vec<u64> = merged.iter().map(|c| c.volume).collect();
        assert_eq!(volumes, vec![0, 2_000, 3_000]);
    }

    #[test]
    fn test_short_history_is_not_bucketed() {
        let (prices, volume) = figures(5);
        assert_eq!(candles(&prices, Some(&volume), 60).len(), 5);
    }

    #[test]
    fn test_candlestick_lines_shape() {
        let (prices, volume) = figures(10);
        let merged = candles(&prices, Some(&volume), 40);
        let lines = candlestick_lines(&merged, 40, 12, &Palette::plain());

        assert_eq!(lines.len(), 13);
        assert!(lines.iter().take(12).all(|l| l.contains('│')));
        assert!(
            lines
                .iter()
                .take(12)
                .any(|l| l.chars().any(|c| "┃╻╹╽╿".contains(c)))
        );
        assert!(lines[12].contains("2024-01-01"));
        assert!(lines[12].contains("2024-01-10"));
        assert!(!lines.concat().contains('\u{1b}'));
    }

    #[test]
    fn test_colored_candles_use_ansi() {
        let (prices, volume) = figures(4);
        let merged = candles(&prices, Some(&volume), 20);
        let lines = candlestick_lines(&merged, 20, 8, &Palette::ansi());
        assert!(lines.concat().contains("\u{1b}[32m"));
        assert!(lines.concat().contains("\u{1b}[31m"));
    }

    #[test]
    fn test_volume_tallest_bar_is_full() {
        let (prices, volume) = figures(3);
        let merged = candles(&prices, Some(&volume), 30);
        let lines = volume_lines(&merged, 30, 4, &Palette::plain());

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains(BAR_FULL));
        assert!(lines[0].trim_start().starts_with("3,000"));
    }

    #[test]
    fn test_flat_prices_still_draw() {
        let rows = vec![HistoryRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 5.0,
            high: 5.0,
            low: 5.0,
            close: 5.0,
            volume: 0,
        }];
        let prices = CandlestickFigure::from_history("FLAT", None, &rows).unwrap();
        let merged = candles(&prices, None, 10);
        let lines = candlestick_lines(&merged, 10, 6, &Palette::plain());
        assert!(lines.iter().any(|l| l.contains(BODY)));
        assert!(volume_lines(&merged, 10, 4, &Palette::plain()).is_empty());
    }

    #[test]
    fn test_compact_volume() {
        assert_eq!(compact(950), "950");
        assert_eq!(compact(12_300), "12.3K");
        assert_eq!(compact(4_500_000), "4.5M");
        assert_eq!(compact(1_200_000_000), "1.2B");
    }
}
