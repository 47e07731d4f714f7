//! Display metrics derived from a quote

use super::page::Metric;
use crate::market::Quote;

/// Shown for any value the provider did not supply
pub const PLACEHOLDER: &str = "N/A";

/// The three metrics in display order: price, market cap, day range
pub fn quote_metrics(quote: &Quote) -> Vec<Metric> {
    vec![
        price_metric(quote),
        market_cap_metric(quote),
        day_range_metric(quote),
    ]
}

/// Current price with the change since the previous close
///
/// Shown only when both numbers are known.
pub fn price_metric(quote: &Quote) -> Metric {
    match (known(quote.current_price), known(quote.previous_close)) {
        (Some(current), Some(previous)) => {
            Metric::new("Current price", format_price(current))
                .with_delta(format_change(current, previous))
        }
        _ => Metric::new("Current price", PLACEHOLDER),
    }
}

pub fn market_cap_metric(quote: &Quote) -> Metric {
    let value = known(quote.market_cap)
        .map_or_else(|| PLACEHOLDER.to_string(), |cap| format!("${}", format_thousands(cap)));
    Metric::new("Market cap", value)
}

pub fn day_range_metric(quote: &Quote) -> Metric {
    let value = match (known(quote.day_low), known(quote.day_high)) {
        (Some(low), Some(high)) => format!("{} - {}", format_price(low), format_price(high)),
        _ => PLACEHOLDER.to_string(),
    };
    Metric::new("Day range", value)
}

/// `$150.00`
pub fn format_price(value: f64) -> String {
    format!("${value:.2}")
}

/// `+5.00 (+3.45%)`; a zero previous close shows the change alone
pub fn format_change(current: f64, previous: f64) -> String {
    let change = current - previous;
    if previous.abs() < f64::EPSILON {
        return format!("{change:+.2}");
    }
    let pct = change / previous * 100.0;
    format!("{change:+.2} ({pct:+.2}%)")
}

/// Whole number with comma separators: `2,345,678,901`
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_with_change() {
        let quote = Quote {
            current_price: Some(150.0),
            previous_close: Some(145.0),
            ..Quote::default()
        };
        let metric = price_metric(&quote);
        assert_eq!(metric.value, "$150.00");
        assert_eq!(metric.delta.as_deref(), Some("+5.00 (+3.45%)"));
    }

    #[test]
    fn test_price_without_previous_close() {
        let quote = Quote {
            current_price: Some(150.0),
            ..Quote::default()
        };
        let metric = price_metric(&quote);
        assert_eq!(metric.value, "N/A");
        assert_eq!(metric.delta, None);
    }

    #[test]
    fn test_negative_and_zero_base_change() {
        assert_eq!(format_change(98.0, 100.0), "-2.00 (-2.00%)");
        assert_eq!(format_change(1.5, 0.0), "+1.50");
    }

    #[test]
    fn test_day_range() {
        let quote = Quote {
            day_low: Some(140.0),
            day_high: Some(152.0),
            ..Quote::default()
        };
        assert_eq!(day_range_metric(&quote).value, "$140.00 - $152.00");

        let quote = Quote {
            day_low: Some(140.0),
            ..Quote::default()
        };
        assert_eq!(day_range_metric(&quote).value, "N/A");
    }

    #[test]
    fn test_market_cap() {
        let quote = Quote {
            market_cap: Some(2_345_678_901.4),
            ..Quote::default()
        };
        assert_eq!(market_cap_metric(&quote).value, "$2,345,678,901");
        assert_eq!(market_cap_metric(&Quote::default()).value, "N/A");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1_000.0), "1,000");
        assert_eq!(format_thousands(-1_234_567.0), "-1,234,567");
    }

    #[test]
    fn test_quote_metrics_order() {
        let labels: Vec<_> = quote_metrics(&Quote::default())
            .into_iter()
            .map(|m| m.label)
            .collect();
        assert_eq!(labels, vec!["Current price", "Market cap", "Day range"]);
    }
}
