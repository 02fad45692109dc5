/// Day offsets relative to the expiration date used when nothing is configured.
/// Negative offsets fire before the expiration date, positive ones after.
pub const DEFAULT_REMINDER_OFFSETS: [i64; 5] = [-30, -7, -3, -1, 1];

/// Parses a comma separated list of signed day offsets, e.g. `-30,-7,-3,-1,1`.
///
/// An absent or blank value gives the `DEFAULT_REMINDER_OFFSETS`. Tokens that are
/// not integers are dropped so that a typo in the configuration never stops
/// reminders from being scheduled for the remaining offsets.
///
/// A token has to be a whole signed integer. Leading digits are never salvaged,
/// so `1.5` and `7days` are dropped rather than read as `1` and `7`.
pub fn parse_offsets(raw: Option<&str>) -> Vec<i64> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return DEFAULT_REMINDER_OFFSETS.to_vec(),
    };

    raw.split(',')
        .filter_map(|token| token.trim().parse::<i64>().ok())
        .collect()
}
