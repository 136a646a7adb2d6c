//! Account tier badge and advisory selection.

/// Color emphasis for the license badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeEmphasis {
    Warning,
    Success,
}

/// Resolved presentation of a tier label: badge text, emphasis, and an
/// optional advisory line shown under the panel header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierNotice {
    pub badge_text: String,
    pub emphasis: BadgeEmphasis,
    pub advisory: Option<&'static str>,
}

pub const FREE_TIER_ADVISORY: &str =
    "⚠️ Free tier: the provider may use your data for training. Run /privacy for details.";
pub const UNKNOWN_TIER_ADVISORY: &str =
    "⚠️ Unable to verify license tier. Run /privacy to check your data handling settings.";

/// Badge text for a tier label: strip a trailing "-tier" suffix
/// (case-insensitively) if present, then upper-case the remainder.
pub fn badge_text(label: &str) -> String {
    let len = label.len();
    let stripped = if len >= 5
        && label.is_char_boundary(len - 5)
        && label[len - 5..].eq_ignore_ascii_case("-tier")
    {
        &label[..len - 5]
    } else {
        label
    };
    stripped.to_uppercase()
}

/// Resolve the optional tier label once per render. Absent or empty labels
/// produce no badge and no advisory; free and unknown tiers warn, anything
/// else is treated as a verified paid tier.
pub fn resolve_tier(label: Option<&str>) -> Option<TierNotice> {
    let label = label.filter(|l| !l.is_empty())?;
    let (emphasis, advisory) = match label {
        "free-tier" => (BadgeEmphasis::Warning, Some(FREE_TIER_ADVISORY)),
        "unknown-tier" => (BadgeEmphasis::Warning, Some(UNKNOWN_TIER_ADVISORY)),
        _ => (BadgeEmphasis::Success, None),
    };
    Some(TierNotice {
        badge_text: badge_text(label),
        emphasis,
        advisory,
    })
}
