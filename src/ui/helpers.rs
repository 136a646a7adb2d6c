//! Helper functions for building label/value rows and column line stacks.

use crate::stats::{format_number_full, FormattedStats};
use crate::theme::ThemeColors;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

/// Bold primary-colored value spans.
pub fn value_spans(value: String, colors: &ThemeColors) -> Vec<Span<'static>> {
    vec![Span::styled(
        value,
        Style::default()
            .fg(colors.text_primary)
            .add_modifier(Modifier::BOLD),
    )]
}

/// One label/value row: label on the left, value spans pushed to the right
/// edge of `width` by display-width padding. At least one space always
/// separates label and value.
pub fn stat_row(
    label: &str,
    value: Vec<Span<'static>>,
    width: usize,
    colors: &ThemeColors,
) -> Line<'static> {
    let value_width: usize = value.iter().map(|s| s.content.width()).sum();
    let pad = width
        .saturating_sub(label.width() + value_width)
        .max(1);

    let mut spans = Vec::with_capacity(value.len() + 2);
    spans.push(Span::styled(
        label.to_string(),
        Style::default().fg(colors.text_secondary),
    ));
    spans.push(Span::raw(" ".repeat(pad)));
    spans.extend(value);
    Line::from(spans)
}

/// A titled stats column: bold title line plus the six token rows.
///
/// A cumulative column additionally annotates the Cached row with its share
/// of the total, the one row where the session-wide view differs from the
/// per-turn view.
pub fn stats_column_lines(
    title: String,
    stats: &FormattedStats,
    is_cumulative: bool,
    width: usize,
    colors: &ThemeColors,
) -> Vec<Line<'static>> {
    let token_value = |v: u64| value_spans(format_number_full(v), colors);

    let mut cached_value = token_value(stats.cached_tokens);
    if is_cumulative && stats.total_tokens > 0 {
        let pct = stats.cached_tokens as f64 / stats.total_tokens as f64 * 100.0;
        cached_value.push(Span::styled(
            format!(" ({:.1}%)", pct),
            Style::default().fg(colors.accent_green),
        ));
    }

    vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(colors.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        stat_row("Input Tokens", token_value(stats.input_tokens), width, colors),
        stat_row("Output Tokens", token_value(stats.output_tokens), width, colors),
        stat_row("Tool Use Tokens", token_value(stats.tool_use_tokens), width, colors),
        stat_row("Thoughts Tokens", token_value(stats.thoughts_tokens), width, colors),
        stat_row("Cached Tokens", cached_value, width, colors),
        stat_row("Total Tokens", token_value(stats.total_tokens), width, colors),
    ]
}

/// Header line: title on the left, an optional right-aligned badge.
pub fn header_line(
    title: &str,
    badge: Option<Span<'static>>,
    width: usize,
    colors: &ThemeColors,
) -> Line<'static> {
    let title_span = Span::styled(
        title.to_string(),
        Style::default()
            .fg(colors.accent_purple)
            .add_modifier(Modifier::BOLD),
    );
    match badge {
        Some(badge) => {
            let pad = width
                .saturating_sub(title.width() + badge.content.width())
                .max(1);
            Line::from(vec![title_span, Span::raw(" ".repeat(pad)), badge])
        }
        None => Line::from(title_span),
    }
}
