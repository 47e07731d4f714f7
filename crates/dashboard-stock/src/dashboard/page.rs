//! The rendered page as a plain value

use super::figure::{BarFigure, CandlestickFigure};
use crate::market::HistoryRecord;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};

/// Page heading
pub const PAGE_TITLE: &str = "Stock Analysis Dashboard";

/// Hint attached to errors nothing else explains
pub const RETRY_HINT: &str = "Please check the symbol and try again later.";

/// Terminal state of one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    /// No symbol, nothing fetched
    Idle,
    /// Every section built
    Rendered,
    /// At least one error section on the page
    Failed,
}

/// One labelled number in the metrics row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    /// Change shown under the value, e.g. `+5.00 (+3.45%)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            delta: None,
        }
    }

    pub fn with_delta(mut self, delta: impl Into<String>) -> Self {
        self.delta = Some(delta.into());
        self
    }
}

/// A block of the page, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Warning {
        message: String,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    Info {
        message: String,
    },
    Metrics {
        metrics: Vec<Metric>,
    },
    Candlestick(CandlestickFigure),
    Volume(BarFigure),
    History {
        rows: Vec<HistoryRecord>,
    },
    Analysis {
        markdown: String,
        citations: Vec<String>,
    },
}

/// Everything one render produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub selection: Selection,
    pub status: RenderStatus,
    pub sections: Vec<Section>,
}

impl Page {
    pub(crate) fn new(selection: Selection) -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            selection,
            status: RenderStatus::Idle,
            sections: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Append an error section and mark the page failed
    pub(crate) fn fail(&mut self, message: impl Into<String>, hint: Option<&str>) {
        self.sections.push(Section::Error {
            message: message.into(),
            hint: hint.map(str::to_string),
        });
        self.status = RenderStatus::Failed;
    }

    /// Messages of every error section
    pub fn errors(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Error { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages of every warning section
    pub fn warnings(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Warning { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The metrics row, if one was built
    pub fn metrics(&self) -> Option<&[Metric]> {
        self.sections.iter().find_map(|section| match section {
            Section::Metrics { metrics } => Some(metrics.as_slice()),
            _ => None,
        })
    }

    /// Whether any chart section is present
    pub fn has_charts(&self) -> bool {
        self.sections
            .iter()
            .any(|section| matches!(section, Section::Candlestick(_) | Section::Volume(_)))
    }

    /// The analysis markdown, if the analysis succeeded
    pub fn analysis(&self) -> Option<&str> {
        self.sections.iter().find_map(|section| match section {
            Section::Analysis { markdown, .. } => Some(markdown.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fail_marks_page() {
        let mut page = Page::new(Selection::default());
        assert_eq!(page.status, RenderStatus::Idle);

        page.fail("boom", Some(RETRY_HINT));
        assert_eq!(page.status, RenderStatus::Failed);
        assert_eq!(page.errors(), vec!["boom"]);
    }

    #[test]
    fn test_sections_serialize_with_kind_tag() {
        let section = Section::Metrics {
            metrics: vec![Metric::new("Market cap", "N/A")],
        };
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({
                "kind": "metrics",
                "metrics": [{ "label": "Market cap", "value": "N/A" }]
            })
        );

        let section = Section::Error {
            message: "timeout".to_string(),
            hint: None,
        };
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            json!({ "kind": "error", "message": "timeout" })
        );
    }
}
