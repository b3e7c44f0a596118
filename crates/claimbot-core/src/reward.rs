//! Fixed-point reward decoding
//!
//! The marketplace encodes USDC amounts as integers scaled by 10^6 so the
//! wire format never carries floats. This is the one place that convention
//! is undone.

/// Scale of the marketplace's fixed-point reward encoding (6 decimals)
pub const REWARD_SCALE: f64 = 1_000_000.0;

/// Decode a raw fixed-point reward into a USDC amount.
///
/// Absent, non-numeric and non-finite input all decode to `0.0`.
///
/// ```
/// use claimbot_core::parse_reward;
///
/// assert_eq!(parse_reward(Some("5000000")), 5.0);
/// assert_eq!(parse_reward(None), 0.0);
/// assert_eq!(parse_reward(Some("abc")), 0.0);
/// ```
pub fn parse_reward(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| value / REWARD_SCALE)
        .unwrap_or(0.0)
}

/// Render a USDC amount with two decimals for log lines
pub fn format_usdc(amount: f64) -> String {
    format!("{:.2}", amount)
}
