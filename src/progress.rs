//! Pure time formatting and progress figures.

use crate::recipe::Recipe;

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped into hours.
///
/// ```rust
/// assert_eq!(cookwise::progress::format_duration(125), "02:05");
/// assert_eq!(cookwise::progress::format_duration(6000), "100:00");
/// ```
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Percentage of `duration` already elapsed, rounded to the nearest integer.
///
/// A zero duration reports 0% rather than dividing by zero.
pub fn step_progress_percent(remaining: u64, duration: u64) -> u8 {
    percent_elapsed(remaining, duration)
}

/// Same formula as [`step_progress_percent`], over whole-recipe totals.
pub fn overall_progress_percent(overall_remaining: u64, total: u64) -> u8 {
    percent_elapsed(overall_remaining, total)
}

fn percent_elapsed(remaining: u64, duration: u64) -> u8 {
    let elapsed = duration.saturating_sub(remaining);
    let ratio = elapsed as f64 / duration.max(1) as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Sum of all step durations, in seconds.
pub fn total_duration_seconds(recipe: &Recipe) -> u64 {
    recipe.steps.iter().map(|s| s.duration_seconds()).sum()
}
