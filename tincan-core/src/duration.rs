//! ISO-8601 durations for time spent on learning content.

/// Format a duration given in milliseconds as `PT{h}H{m}M{s}S`.
///
/// Fractions of a second are truncated; negative input formats as zero.
pub fn time_to_iso_duration(milliseconds: f64) -> String {
    let total_seconds = (milliseconds.max(0.0) / 1000.0).trunc() as u64;

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("PT{hours}H{minutes}M{seconds}S")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zero_components() {
        assert_eq!(time_to_iso_duration(0.0), "PT0H0M0S");
    }

    #[test]
    fn splits_hours_minutes_seconds() {
        let ms = ((2 * 3600 + 5 * 60 + 7) * 1000) as f64;
        assert_eq!(time_to_iso_duration(ms), "PT2H5M7S");
    }

    #[test]
    fn truncates_partial_seconds() {
        assert_eq!(time_to_iso_duration(59_999.0), "PT0H0M59S");
    }

    #[test]
    fn negative_time_is_zero() {
        assert_eq!(time_to_iso_duration(-500.0), "PT0H0M0S");
    }
}
