//! Dotted-integer version comparison
//!
//! Release tags for the applications we check use a plain `N.N.N` scheme,
//! so this deliberately implements segment-wise integer comparison rather
//! than full semver precedence (no pre-release or build metadata).

/// Returns true when `candidate` is strictly newer than `baseline`.
///
/// Both inputs are split on `.`; segments that fail to parse as a
/// non-negative integer count as 0, and the shorter version is
/// right-padded with zeros. Equal versions are not newer.
///
/// Examples:
/// - `is_newer("1.10.0", "1.9.0")` -> true
/// - `is_newer("1.2", "1.2.0")` -> false
/// - `is_newer("1.2.3", "1.2.3")` -> false
pub fn is_newer(candidate: &str, baseline: &str) -> bool {
    let candidate = parse_segments(candidate);
    let baseline = parse_segments(baseline);

    for i in 0..candidate.len().max(baseline.len()) {
        let c = candidate.get(i).copied().unwrap_or(0);
        let b = baseline.get(i).copied().unwrap_or(0);
        if c != b {
            return c > b;
        }
    }

    false
}

/// Split a version string into integer segments, with unparseable
/// segments degrading to 0 rather than erroring.
fn parse_segments(version: &str) -> Vec<u64> {
    version
        .split('.')
        .map(|s| s.parse::<u64>().unwrap_or(0))
        .collect()
}
