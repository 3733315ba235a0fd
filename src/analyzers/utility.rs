/// Weight of the test rating when a skill has both measurements.
pub const TEST_WEIGHT: f64 = 0.6;
/// Weight of the practice rating when a skill has both measurements.
pub const PRACTICE_WEIGHT: f64 = 0.4;

/// Percentage of `count` over `total`, rounded to one decimal place.
/// Returns 0.0 when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_tenth(count as f64 / total as f64 * 100.0)
}

/// Blends a practice and a test value, weighting the test more heavily.
pub fn weighted_average(practice: f64, test: f64) -> f64 {
    TEST_WEIGHT * test + PRACTICE_WEIGHT * practice
}

/// Rounds to one decimal place, resolving exact ties to the even digit.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
