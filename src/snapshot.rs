//! Snapshot file loading.
//!
//! The session tracker writes its counters as a single JSON document; this
//! module deserializes it and derives the wall-clock duration string the
//! panel displays verbatim.

use crate::stats::{format_duration, StatsRecord};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One on-disk snapshot: cumulative and last-turn counters plus session
/// metadata. Every field defaults so a sparse file still parses.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub stats: StatsRecord,
    pub last_turn_stats: StatsRecord,
    pub user_tier: Option<String>,
    /// Session start as epoch milliseconds; drives the wall duration row.
    pub session_start_ms: Option<i64>,
}

pub fn load_snapshot(path: &Path) -> Result<StatsSnapshot, Box<dyn std::error::Error>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Wall-clock duration string for the snapshot at `now_ms` (epoch millis).
/// A missing or future start timestamp renders as "0s".
pub fn wall_duration(snapshot: &StatsSnapshot, now_ms: i64) -> String {
    let elapsed = snapshot
        .session_start_ms
        .map(|start| (now_ms - start).max(0) as u64)
        .unwrap_or(0);
    format_duration(elapsed)
}
