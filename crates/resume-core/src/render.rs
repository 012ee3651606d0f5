//! Result rendering
//!
//! `render` is a pure mapping from an analysis result to a [`ResultView`]:
//! a complete description of what the result panel shows. Each field is
//! derived from the input alone, never from another field of the view, so
//! applying a view always replaces the previous one wholesale.

use crate::model::{AnalysisResult, DownloadLinks};
use serde::Serialize;

/// Text shown when a result carries no sub-scores
pub const NO_BREAKDOWN: &str = "No breakdown available";

/// Name shown when the result carries none
pub const UNKNOWN_NAME: &str = "Unknown";

/// Everything the result panel displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub name: String,
    pub email: String,
    pub domain: String,
    pub skills: Vec<String>,
    pub gauge: ScoreGauge,
    pub breakdown: Breakdown,
    /// Pretty-printed result, shown and copied verbatim
    pub json: String,
    pub downloads: DownloadLinks,
}

/// Circular score indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreGauge {
    /// Clamped, rounded score in 0..=100
    pub percent: u8,
    /// Text inside the gauge, e.g. `88%`
    pub label: String,
    /// Filled arc out of 360 degrees
    pub arc_degrees: f64,
}

impl ScoreGauge {
    pub fn from_score(score: f64) -> Self {
        let percent = display_score(score);
        Self {
            percent,
            label: format!("{}%", percent),
            arc_degrees: f64::from(percent) * 3.6,
        }
    }

    /// CSS background painting the filled arc over the track
    pub fn conic_gradient(&self, fill: &str, track: &str) -> String {
        format!(
            "conic-gradient({} {}deg, {} 0deg)",
            fill, self.arc_degrees, track
        )
    }
}

/// Sub-score list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items")]
pub enum Breakdown {
    Placeholder(String),
    Rows(Vec<BreakdownRow>),
}

impl Breakdown {
    pub fn rows(&self) -> &[BreakdownRow] {
        match self {
            Breakdown::Placeholder(_) => &[],
            Breakdown::Rows(rows) => rows,
        }
    }
}

/// One labelled bar of the breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    /// The raw value as the server spelled it, so `70.0` stays `70.0`
    pub value_text: String,
    /// Bar width in percent, clamped to 0..=100
    pub bar_width: f64,
}

impl BreakdownRow {
    pub fn width_css(&self) -> String {
        format!("{}%", self.bar_width)
    }
}

/// Map a result and its download links to a view
pub fn render(result: &AnalysisResult, downloads: &DownloadLinks, max_skills: usize) -> ResultView {
    let name = result
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_NAME);

    let breakdown = if result.score_breakdown.is_empty() {
        Breakdown::Placeholder(NO_BREAKDOWN.to_string())
    } else {
        Breakdown::Rows(
            result
                .score_breakdown
                .iter()
                .map(|(category, value)| BreakdownRow {
                    label: category_label(category),
                    value_text: value.to_string(),
                    bar_width: bar_width(value.as_f64().unwrap_or(0.0)),
                })
                .collect(),
        )
    };

    ResultView {
        name: title_case(name),
        email: result.email.clone().unwrap_or_default(),
        domain: result.predicted_domain.clone().unwrap_or_default(),
        skills: result.top_skills.iter().take(max_skills).cloned().collect(),
        gauge: ScoreGauge::from_score(result.score),
        breakdown,
        json: serde_json::to_string_pretty(result).unwrap_or_default(),
        downloads: downloads.clone(),
    }
}

/// `clamp(round(score), 0, 100)`
pub fn display_score(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}

/// `clamp(value, 0, 100)`
pub fn bar_width(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Upper-case the first character of every whitespace-delimited word
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// `legal_experience` -> `Legal Experience`
pub fn category_label(category: &str) -> String {
    title_case(&category.replace('_', " "))
}
