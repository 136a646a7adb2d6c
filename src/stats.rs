//! Session statistics records and display formatting.

use serde::Deserialize;

/// Raw usage counters for one scope: either the most recent turn or the
/// cumulative session. Supplied by the session tracker; read-only here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsRecord {
    pub prompt_token_count: u64,
    pub candidates_token_count: u64,
    pub tool_use_prompt_token_count: u64,
    pub thoughts_token_count: u64,
    pub cached_content_token_count: u64,
    pub total_token_count: u64,
    pub turn_count: u64,
    pub api_time_ms: u64,
}

/// The six token fields the panel displays, under their display names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormattedStats {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub tool_use_tokens: u64,
    pub thoughts_tokens: u64,
    pub cached_tokens: u64,
    pub total_tokens: u64,
}

/// Rename a raw record into its display fields. Pure 1:1 copy, no
/// aggregation; applied once per column.
#[inline]
pub fn format_stats(record: &StatsRecord) -> FormattedStats {
    FormattedStats {
        input_tokens: record.prompt_token_count,
        output_tokens: record.candidates_token_count,
        tool_use_tokens: record.tool_use_prompt_token_count,
        thoughts_tokens: record.thoughts_token_count,
        cached_tokens: record.cached_content_token_count,
        total_tokens: record.total_token_count,
    }
}

/// Render milliseconds as a short human duration: "0s", "850ms", "1.5s",
/// "1m 3s", "2h 5m 0s".
pub fn format_duration(ms: u64) -> String {
    if ms == 0 {
        return "0s".to_string();
    }
    if ms < 1000 {
        return format!("{}ms", ms);
    }
    let total_secs = ms / 1000;
    if total_secs < 60 {
        return format!("{:.1}s", ms as f64 / 1000.0);
    }
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs)
    } else {
        format!("{}m {}s", mins, secs)
    }
}

#[inline]
pub fn format_number_full(value: u64) -> String {
    let s = value.to_string();
    let len = s.len();

    // Fast path: numbers with 3 or fewer digits don't need commas
    if len <= 3 {
        return s;
    }

    let mut result = String::with_capacity(len + (len - 1) / 3);
    for (i, &byte) in s.as_bytes().iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(byte as char);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> StatsRecord {
        StatsRecord {
            prompt_token_count: 1,
            candidates_token_count: 2,
            tool_use_prompt_token_count: 3,
            thoughts_token_count: 4,
            cached_content_token_count: 5,
            total_token_count: 15,
            turn_count: 7,
            api_time_ms: 1500,
        }
    }

    #[test]
    fn format_stats_is_identity_per_field() {
        let formatted = format_stats(&sample_record());
        assert_eq!(formatted.input_tokens, 1);
        assert_eq!(formatted.output_tokens, 2);
        assert_eq!(formatted.tool_use_tokens, 3);
        assert_eq!(formatted.thoughts_tokens, 4);
        assert_eq!(formatted.cached_tokens, 5);
        assert_eq!(formatted.total_tokens, 15);
    }

    #[test]
    fn format_stats_passes_zeros_through() {
        assert_eq!(
            format_stats(&StatsRecord::default()),
            FormattedStats::default()
        );
    }

    #[test]
    fn format_duration_tiers() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(850), "850ms");
        assert_eq!(format_duration(1500), "1.5s");
        assert_eq!(format_duration(59_900), "59.9s");
        assert_eq!(format_duration(63_000), "1m 3s");
        assert_eq!(format_duration(7_500_000), "2h 5m 0s");
    }

    #[test]
    fn format_number_full_groups_thousands() {
        assert_eq!(format_number_full(0), "0");
        assert_eq!(format_number_full(999), "999");
        assert_eq!(format_number_full(1000), "1,000");
        assert_eq!(format_number_full(1_234_567), "1,234,567");
    }

    #[test]
    fn record_parses_from_camel_case_json() {
        let record: StatsRecord = serde_json::from_str(
            r#"{"promptTokenCount": 10, "totalTokenCount": 10, "apiTimeMs": 42}"#,
        )
        .unwrap();
        assert_eq!(record.prompt_token_count, 10);
        assert_eq!(record.total_token_count, 10);
        assert_eq!(record.api_time_ms, 42);
        // Unlisted fields default to zero.
        assert_eq!(record.thoughts_token_count, 0);
    }
}
