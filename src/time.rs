use chrono::Utc;

/// Returns the current Unix time in milliseconds.
pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Converts a claim timestamp (seconds, possibly fractional) into milliseconds.
pub fn secs_to_millis(secs: f64) -> f64 {
    secs * 1000.0
}
