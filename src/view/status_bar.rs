//! One-line status bar under the grid.
//!
//! Shows the month of the current date, the current date itself, and a
//! "jump to today" hint while the view is away from the anchor column.

use chrono::NaiveDate;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Hint shown while the anchor column is scrolled out of view.
const TODAY_HINT: &str = "t: today";

/// Key hints always shown on the right.
const KEY_HINTS: &str = "←/→ day  ↑/↓ hour  q quit";

/// Status bar content. Pure: built from values read off the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    month_label: String,
    current_date: NaiveDate,
    away_from_anchor: bool,
}

impl StatusBar {
    /// Create a status bar for one frame.
    pub fn new(month_label: String, current_date: NaiveDate, away_from_anchor: bool) -> Self {
        Self {
            month_label,
            current_date,
            away_from_anchor,
        }
    }

    /// Render as a single line of spans.
    pub fn render(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.month_label),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.current_date.format("%Y-%m-%d").to_string(),
                Style::default().fg(Color::Gray),
            ),
        ];

        if self.away_from_anchor {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                TODAY_HINT,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        spans.push(Span::raw("  "));
        spans.push(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)));

        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 21).unwrap()
    }

    #[test]
    fn shows_month_and_date() {
        let line = StatusBar::new("2024년 1월".to_string(), date(), false).render();
        let text = text(&line);
        assert!(text.starts_with(" 2024년 1월 2024-01-21"), "{text}");
        assert!(!text.contains(TODAY_HINT));
    }

    #[test]
    fn today_hint_only_when_away() {
        let line = StatusBar::new("January 2024".to_string(), date(), true).render();
        assert!(text(&line).contains(TODAY_HINT));
    }
}
