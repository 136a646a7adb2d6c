//! Stats panel rendering.

use super::helpers::{header_line, stat_row, stats_column_lines, value_spans};
use crate::stats::{format_duration, format_stats, StatsRecord};
use crate::theme::ThemeColors;
use crate::tier::{resolve_tier, BadgeEmphasis};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
    Frame,
};

/// Per-render inputs for the stats panel. All borrowed, never mutated.
pub struct StatsDisplayProps<'a> {
    /// Cumulative session counters.
    pub stats: &'a StatsRecord,
    /// Counters for the most recent turn only.
    pub last_turn_stats: &'a StatsRecord,
    /// Pre-formatted wall-clock duration, echoed verbatim.
    pub duration: &'a str,
    /// Optional account tier label, e.g. "free-tier".
    pub user_tier: Option<&'a str>,
}

/// Render the full stats panel into `area`: header with optional license
/// badge and advisory, two token columns, then the duration rows.
pub fn render_stats_display(
    frame: &mut Frame,
    area: Rect,
    props: &StatsDisplayProps,
    colors: &ThemeColors,
) {
    let notice = resolve_tier(props.user_tier);
    let last_turn = format_stats(props.last_turn_stats);
    let cumulative = format_stats(props.stats);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.border_default))
        .padding(Padding::new(2, 2, 1, 1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let advisory = notice.as_ref().and_then(|n| n.advisory);
    let header_height = if advisory.is_some() { 3 } else { 1 };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(1),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    // Header: title, right-aligned badge, advisory on its own line below.
    let badge = notice.as_ref().map(|n| {
        let emphasis = match n.emphasis {
            BadgeEmphasis::Warning => colors.error,
            BadgeEmphasis::Success => colors.success,
        };
        Span::styled(
            format!("License: {}", n.badge_text),
            Style::default().fg(emphasis).add_modifier(Modifier::BOLD),
        )
    });
    let mut header_lines = vec![header_line("Stats", badge, inner.width as usize, colors)];
    if let Some(advisory) = advisory {
        header_lines.push(Line::default());
        header_lines.push(Line::from(Span::styled(
            advisory,
            Style::default()
                .fg(colors.error)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    frame.render_widget(Paragraph::new(header_lines), rows[0]);

    // Two token columns at just under half width each, gutter between.
    let column_constraints = [
        Constraint::Percentage(48),
        Constraint::Min(0),
        Constraint::Percentage(48),
    ];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(column_constraints)
        .split(rows[2]);

    frame.render_widget(
        Paragraph::new(stats_column_lines(
            "Last Turn".to_string(),
            &last_turn,
            false,
            cols[0].width as usize,
            colors,
        )),
        cols[0],
    );
    frame.render_widget(
        Paragraph::new(stats_column_lines(
            format!("Cumulative ({} Turns)", props.stats.turn_count),
            &cumulative,
            true,
            cols[2].width as usize,
            colors,
        )),
        cols[2],
    );

    // Duration rows: per-turn API time left, session totals right.
    let duration_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(column_constraints)
        .split(rows[4]);

    frame.render_widget(
        Paragraph::new(vec![stat_row(
            "Turn Duration (API)",
            value_spans(format_duration(props.last_turn_stats.api_time_ms), colors),
            duration_cols[0].width as usize,
            colors,
        )]),
        duration_cols[0],
    );
    frame.render_widget(
        Paragraph::new(vec![
            stat_row(
                "Total duration (API)",
                value_spans(format_duration(props.stats.api_time_ms), colors),
                duration_cols[2].width as usize,
                colors,
            ),
            stat_row(
                "Total duration (wall)",
                value_spans(props.duration.to_string(), colors),
                duration_cols[2].width as usize,
                colors,
            ),
        ]),
        duration_cols[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;

    fn sample_props<'a>(user_tier: Option<&'a str>) -> StatsDisplayProps<'a> {
        StatsDisplayProps {
            stats: &SAMPLE_CUMULATIVE,
            last_turn_stats: &SAMPLE_LAST_TURN,
            duration: "2m 3s",
            user_tier,
        }
    }

    static SAMPLE_CUMULATIVE: StatsRecord = StatsRecord {
        prompt_token_count: 10_000,
        candidates_token_count: 4_000,
        tool_use_prompt_token_count: 1_000,
        thoughts_token_count: 2_000,
        cached_content_token_count: 3_000,
        total_token_count: 20_000,
        turn_count: 5,
        api_time_ms: 63_000,
    };

    static SAMPLE_LAST_TURN: StatsRecord = StatsRecord {
        prompt_token_count: 120,
        candidates_token_count: 80,
        tool_use_prompt_token_count: 10,
        thoughts_token_count: 30,
        cached_content_token_count: 0,
        total_token_count: 240,
        turn_count: 1,
        api_time_ms: 1_500,
    };

    fn buffer_lines(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn render_lines(props: &StatsDisplayProps) -> Vec<String> {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                render_stats_display(frame, frame.area(), props, &ThemeColors::DEFAULT);
            })
            .unwrap();
        buffer_lines(terminal.backend().buffer())
    }

    fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    #[test]
    fn panel_shows_title_and_both_columns() {
        let lines = render_lines(&sample_props(None));
        assert!(screen_contains(&lines, "Stats"));
        assert!(screen_contains(&lines, "Last Turn"));
        assert!(screen_contains(&lines, "Cumulative (5 Turns)"));
        // Each token label appears once per column.
        let input_rows = lines
            .iter()
            .filter(|l| l.matches("Input Tokens").count() == 2)
            .count();
        assert_eq!(input_rows, 1);
        assert!(screen_contains(&lines, "10,000"));
    }

    #[test]
    fn free_tier_shows_badge_and_training_advisory() {
        let lines = render_lines(&sample_props(Some("free-tier")));
        assert!(screen_contains(&lines, "License: FREE"));
        assert!(screen_contains(&lines, "Free tier:"));
        assert!(screen_contains(&lines, "/privacy"));
    }

    #[test]
    fn unknown_tier_shows_verification_advisory() {
        let lines = render_lines(&sample_props(Some("unknown-tier")));
        assert!(screen_contains(&lines, "License: UNKNOWN"));
        assert!(screen_contains(&lines, "Unable to verify"));
        assert!(screen_contains(&lines, "/privacy"));
    }

    #[test]
    fn paid_tier_shows_badge_without_advisory() {
        let lines = render_lines(&sample_props(Some("pro-tier")));
        assert!(screen_contains(&lines, "License: PRO"));
        assert!(!screen_contains(&lines, "/privacy"));
    }

    #[test]
    fn missing_tier_renders_no_badge() {
        let lines = render_lines(&sample_props(None));
        assert!(!screen_contains(&lines, "License:"));
        assert!(!screen_contains(&lines, "/privacy"));
    }

    #[test]
    fn duration_rows_use_formatter_and_echo_wall_string() {
        let lines = render_lines(&sample_props(None));
        let turn_row = lines
            .iter()
            .find(|l| l.contains("Turn Duration (API)"))
            .unwrap();
        assert!(turn_row.contains("1.5s"));
        let api_row = lines
            .iter()
            .find(|l| l.contains("Total duration (API)"))
            .unwrap();
        assert!(api_row.contains("1m 3s"));
        let wall_row = lines
            .iter()
            .find(|l| l.contains("Total duration (wall)"))
            .unwrap();
        assert!(wall_row.contains("2m 3s"));
    }

    #[test]
    fn all_zero_records_render_zero_rows() {
        let zero = StatsRecord::default();
        let props = StatsDisplayProps {
            stats: &zero,
            last_turn_stats: &zero,
            duration: "0s",
            user_tier: None,
        };
        let lines = render_lines(&props);
        assert!(screen_contains(&lines, "Cumulative (0 Turns)"));
        for label in [
            "Input Tokens",
            "Output Tokens",
            "Tool Use Tokens",
            "Thoughts Tokens",
            "Cached Tokens",
            "Total Tokens",
        ] {
            let row = lines.iter().find(|l| l.contains(label)).unwrap();
            assert!(row.contains('0'), "row for {label} should show a zero");
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        let first = render_lines(&sample_props(Some("free-tier")));
        let second = render_lines(&sample_props(Some("free-tier")));
        assert_eq!(first, second);
    }
}
